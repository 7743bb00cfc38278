//! Pagination and detail links.
//!
//! # Data Flow
//! ```text
//! parsed payload {results: [...], next?, previous?}
//!     → page.rs decorate() (pure, no network)
//!     → Page { next_page?, previous_page?, results[].details? }
//!     → link.fetch() → client core → retry engine → transport
//! ```
//!
//! # Design Decisions
//! - Links are small values (stripped URL + shared client core), not closures
//! - Links exist iff the payload carried the corresponding URL
//! - No caching: each fetch is an independent request cycle

pub mod page;

pub use page::{DetailLink, Page, PageLink, Record, SELF_URL_FIELD};

pub(crate) use page::decorate;

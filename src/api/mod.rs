//! Directory API surface.
//!
//! # Data Flow
//! ```text
//! caller
//!     → query.rs (typed record or runtime-validated options)
//!     → client.rs (RequestTarget → retry engine → transport)
//!     → pagination (decorated Page)
//! ```

pub mod client;
pub mod query;

pub use client::MozilliansClient;
pub use query::{GroupQuery, OptionType, Query, QuerySchema, SkillQuery, UserQuery, GROUPS, SKILLS, USERS};

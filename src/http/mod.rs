//! HTTP transport subsystem.
//!
//! # Data Flow
//! ```text
//! RequestTarget (endpoint + options, or server-supplied URL)
//!     → request.rs (fresh RequestSpec: URL, nonce, X-API-KEY header)
//!     → transport.rs (single GET, timeout, buffered body)
//!     → response.rs (classify into ResponseOutcome)
//!     → [retry engine decides whether to go again]
//! ```

pub mod request;
pub mod response;
pub mod transport;

pub use request::{ApiKey, RequestSpec, RequestTarget, API_KEY_HEADER, NONCE_PARAM};
pub use response::{classify, ResponseOutcome, TIMEOUT_CODE};
pub use transport::{client_builder, ReqwestTransport, Transport};

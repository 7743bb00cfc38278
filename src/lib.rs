//! Client library for the Mozillians directory API (users, groups, skills).
//!
//! # Architecture Overview
//!
//! ```text
//!   caller ──▶ api (query options, MozilliansClient)
//!                 │
//!                 ▼
//!              resilience (retry engine, capped exponential backoff)
//!                 │  one fresh RequestSpec per attempt
//!                 ▼
//!              http (RequestSpec → Transport → ResponseOutcome)
//!                 │
//!                 ▼
//!              pagination (Page with next/previous/details links)
//! ```
//!
//! Cross-cutting: `config` (ClientConfig, TOML loading, validation),
//! `observability` (tracing, metrics), `error` (taxonomy with retry counts).

pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod observability;
pub mod pagination;
pub mod resilience;

pub use api::{GroupQuery, MozilliansClient, SkillQuery, UserQuery};
pub use config::{ClientConfig, ErrorCode};
pub use error::{Error, Result};
pub use pagination::{DetailLink, Page, PageLink, Record};

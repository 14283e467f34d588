//! # sf-client
//!
//! Core HTTP client infrastructure for Salesforce APIs.
//!
//! This crate provides the foundational HTTP client with:
//! - Compression support (gzip, deflate)
//! - Rate limit detection
//! - Salesforce error-response parsing
//! - Connection pooling
//! - Request/response tracing
//!
//! Retries are deliberately not part of this layer: every failure is
//! surfaced to the caller, which decides whether to retry the whole
//! operation.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Application Layer                        │
//! │                  (sf-rest, sf-tooling)                      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    SfHttpClient                             │
//! │  - Raw HTTP with compression and rate-limit detection       │
//! │  - Request building, bearer authentication                  │
//! │  - Salesforce error-response handling                       │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod client;
mod config;
mod error;
mod request;
mod response;
pub mod security;
mod types;

pub use client::SfHttpClient;
pub use config::{ClientConfig, ClientConfigBuilder, CompressionConfig};
pub use error::{Error, ErrorKind, Result};
pub use request::{RequestBuilder, RequestMethod};
pub use response::{ApiUsage, Response, ResponseExt};
pub use types::{CreateResult, QueryResult, SalesforceError};

/// Default Salesforce API version
pub const DEFAULT_API_VERSION: &str = "62.0";

/// User-Agent string for the client
pub const USER_AGENT: &str = concat!("orgbridge-sf-api/", env!("CARGO_PKG_VERSION"));

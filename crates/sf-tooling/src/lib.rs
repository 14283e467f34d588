//! # sf-tooling
//!
//! Salesforce Tooling API client for development-time objects.
//!
//! ## Features
//!
//! - **SOQL queries** against the Tooling endpoint, with manual and
//!   automatic pagination
//! - **SObject CRUD** for Tooling-only objects (TraceFlag, ApexLog, ...)
//! - **Apex class creation** from source code
//! - **Object classification** via [`references_tooling_object`], used
//!   to decide whether a query belongs on the Tooling or REST endpoint
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use orgbridge_sf_auth::{AuthConfig, TokenProvider};
//! use orgbridge_sf_tooling::{ApexClass, ToolingClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), orgbridge_sf_tooling::Error> {
//!     let provider = Arc::new(TokenProvider::new(AuthConfig::from_env()?));
//!     let client = ToolingClient::new(provider)?;
//!
//!     let classes: Vec<ApexClass> = client
//!         .query_all("SELECT Id, Name FROM ApexClass LIMIT 10")
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod objects;
mod types;

pub use client::ToolingClient;
pub use error::{Error, ErrorKind, Result};
pub use objects::{references_tooling_object, TOOLING_OBJECTS};
pub use types::ApexClass;

// Re-export shared wire and config types users need alongside this client
pub use orgbridge_sf_client::{ClientConfig, ClientConfigBuilder, CreateResult, QueryResult};

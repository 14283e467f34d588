//! # sf-rest
//!
//! Salesforce REST (Data) API client with Tooling-aware query routing.
//!
//! ## Features
//!
//! - **Routed SOQL queries**: queries touching Tooling-only objects are
//!   transparently dispatched to the Tooling endpoint
//! - **SObject CRUD** and describe against the Data API
//! - **AsyncApexJob search** via a safe query builder
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use orgbridge_sf_auth::{AuthConfig, TokenProvider};
//! use orgbridge_sf_rest::{AsyncApexJobQuery, SalesforceRestClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), orgbridge_sf_rest::Error> {
//!     let provider = Arc::new(TokenProvider::new(AuthConfig::from_env()?));
//!     let client = SalesforceRestClient::new(provider)?;
//!
//!     // Routed to the Data API
//!     let accounts = client
//!         .query::<serde_json::Value>("SELECT Id, Name FROM Account LIMIT 10")
//!         .await?;
//!
//!     // Routed to the Tooling API
//!     let jobs = client
//!         .search_async_apex_jobs(&AsyncApexJobQuery::new().status("Processing"))
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod soql;

pub use client::SalesforceRestClient;
pub use error::{Error, ErrorKind, Result};
pub use soql::AsyncApexJobQuery;

// Re-export shared wire and config types users need alongside this client
pub use orgbridge_sf_client::{ClientConfig, ClientConfigBuilder, CreateResult, QueryResult};
pub use orgbridge_sf_tooling::{references_tooling_object, ToolingClient, TOOLING_OBJECTS};

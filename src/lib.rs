//! # orgbridge-sf-api
//!
//! Salesforce authentication and dual-API (Tooling/REST) client library.
//!
//! ## Security
//!
//! This library is designed with security in mind:
//! - Sensitive data (tokens, secrets, private keys) are redacted in
//!   Debug output
//! - Tracing/logging skips credential parameters
//! - Error messages sanitize any credential data
//!
//! ## Crates
//!
//! - **orgbridge-sf-client** - Core HTTP client infrastructure with
//!   compression, rate-limit detection, and Salesforce error parsing
//! - **orgbridge-sf-auth** - Authentication: CLI session reuse, JWT
//!   bearer flow, username-password flow, cached token provider
//! - **orgbridge-sf-tooling** - Tooling API: SOQL, SObject CRUD, Apex
//!   class creation
//! - **orgbridge-sf-rest** - REST API: routed SOQL, SObject CRUD,
//!   AsyncApexJob search
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use orgbridge_sf_api::{AuthConfig, SalesforceRestClient, TokenProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Resolves credentials from the sf CLI, JWT bearer, or
//!     // username-password, in that order
//!     let provider = Arc::new(TokenProvider::new(AuthConfig::from_env()?));
//!
//!     let client = SalesforceRestClient::new(provider)?;
//!
//!     // Routed automatically: Account goes to the Data API,
//!     // AsyncApexJob would go to the Tooling API
//!     let accounts = client
//!         .query_all::<serde_json::Value>("SELECT Id, Name FROM Account LIMIT 10")
//!         .await?;
//!
//!     for account in accounts {
//!         println!("{}", account["Name"]);
//!     }
//!
//!     Ok(())
//! }
//! ```

// Re-export member crates for convenient access
#[cfg(feature = "auth")]
pub use orgbridge_sf_auth as auth;
#[cfg(feature = "client")]
pub use orgbridge_sf_client as client;
#[cfg(feature = "rest")]
pub use orgbridge_sf_rest as rest;
#[cfg(feature = "tooling")]
pub use orgbridge_sf_tooling as tooling;

// Re-export commonly used types at the top level
#[cfg(feature = "auth")]
pub use orgbridge_sf_auth::{AuthConfig, TokenProvider};
#[cfg(feature = "client")]
pub use orgbridge_sf_client::{ClientConfig, SfHttpClient};
#[cfg(feature = "rest")]
pub use orgbridge_sf_rest::{AsyncApexJobQuery, SalesforceRestClient};
#[cfg(feature = "tooling")]
pub use orgbridge_sf_tooling::ToolingClient;

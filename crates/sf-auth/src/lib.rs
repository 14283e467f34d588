//! # sf-auth
//!
//! Salesforce authentication with multi-strategy credential resolution.
//!
//! ## Security
//!
//! - Sensitive data (tokens, secrets, private keys) are redacted in Debug
//!   output
//! - Tracing/logging skips credential parameters
//! - Error messages sanitize any credential data
//!
//! ## Authentication Strategies
//!
//! Attempted in strict order on every (re-)authentication, first success
//! wins:
//!
//! 1. **CLI session reuse** - picks up an org already authenticated with
//!    the local `sf` CLI; any CLI failure falls through to the next
//!    strategy
//! 2. **OAuth 2.0 JWT Bearer Flow** - server-to-server, requires a private
//!    key and a subject username; exchange failures propagate
//! 3. **OAuth 2.0 Username-Password Flow** - requires username and
//!    password (a configured security token is appended to the password);
//!    exchange failures propagate
//!
//! The resulting session (access token + instance URL) is held in a
//! single in-memory slot with a flat one-hour TTL and replaced wholesale
//! on the next acquisition after expiry.
//!
//! ## Example
//!
//! ```rust,ignore
//! use orgbridge_sf_auth::{AuthConfig, TokenProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), orgbridge_sf_auth::Error> {
//!     let config = AuthConfig::from_env()?;
//!     let provider = TokenProvider::new(config);
//!
//!     let token = provider.access_token().await?;
//!     let instance_url = provider.instance_url();
//!
//!     Ok(())
//! }
//! ```

mod cli;
mod config;
mod error;
mod jwt;
mod oauth;
mod provider;

pub use cli::{CliOrg, OrgSource, SfCli};
pub use config::AuthConfig;
pub use error::{Error, ErrorKind, Result};
pub use jwt::JwtBearer;
pub use oauth::{PasswordFlow, TokenResponse};
pub use provider::TokenProvider;

//! Salesforce Tooling API client.
//!
//! Wraps the shared HTTP client from `sf-client` and targets the
//! `/services/data/vXX.X/tooling/` endpoint family. Tokens come from a
//! shared [`TokenProvider`], acquired per request so an expired session
//! is replaced transparently.

use std::sync::Arc;

use orgbridge_sf_auth::TokenProvider;
use orgbridge_sf_client::{ClientConfig, SfHttpClient};

use crate::error::Result;

mod apex;
mod query;
mod sobject;

/// Salesforce Tooling API client.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use orgbridge_sf_auth::{AuthConfig, TokenProvider};
/// use orgbridge_sf_tooling::ToolingClient;
///
/// let provider = Arc::new(TokenProvider::new(AuthConfig::from_env()?));
/// let client = ToolingClient::new(provider)?;
///
/// let classes: Vec<ApexClass> = client
///     .query_all("SELECT Id, Name FROM ApexClass")
///     .await?;
/// ```
#[derive(Clone)]
pub struct ToolingClient {
    provider: Arc<TokenProvider>,
    http: SfHttpClient,
}

impl ToolingClient {
    /// Create a new Tooling API client with default HTTP configuration.
    pub fn new(provider: Arc<TokenProvider>) -> Result<Self> {
        Self::with_config(provider, ClientConfig::default())
    }

    /// Create a new Tooling API client with custom HTTP configuration.
    pub fn with_config(provider: Arc<TokenProvider>, config: ClientConfig) -> Result<Self> {
        let http = SfHttpClient::new(config)?;
        Ok(Self { provider, http })
    }

    /// The token provider backing this client.
    pub fn provider(&self) -> &Arc<TokenProvider> {
        &self.provider
    }

    /// The instance URL requests currently target.
    pub fn instance_url(&self) -> String {
        self.provider.instance_url()
    }

    /// The Salesforce API version in use.
    pub fn api_version(&self) -> &str {
        self.provider.api_version()
    }

    pub(crate) fn http(&self) -> &SfHttpClient {
        &self.http
    }

    /// Base URL of the Tooling endpoint family, rebuilt per call because
    /// re-authentication can move the instance URL.
    pub(crate) fn base_url(&self) -> String {
        format!(
            "{}/services/data/v{}/tooling",
            self.provider.instance_url(),
            self.provider.api_version()
        )
    }

    pub(crate) async fn token(&self) -> Result<String> {
        Ok(self.provider.access_token().await?)
    }
}

impl std::fmt::Debug for ToolingClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolingClient")
            .field("instance_url", &self.instance_url())
            .field("api_version", &self.api_version())
            .finish()
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::client_for;

    #[tokio::test]
    async fn test_base_url_uses_tooling_prefix() {
        let client = client_for("https://na1.salesforce.com");
        assert_eq!(
            client.base_url(),
            "https://na1.salesforce.com/services/data/v62.0/tooling"
        );
        assert_eq!(client.api_version(), "62.0");
    }
}

//! Salesforce REST (Data) API client with Tooling-aware query routing.

use std::sync::Arc;

use orgbridge_sf_auth::TokenProvider;
use orgbridge_sf_client::{ClientConfig, SfHttpClient};
use orgbridge_sf_tooling::ToolingClient;

use crate::error::Result;

mod jobs;
mod query;
mod sobject;

/// Salesforce REST API client.
///
/// Queries are classified before dispatch: SOQL touching a Tooling-only
/// object is delegated to an embedded [`ToolingClient`], everything else
/// goes to the Data API. Both clients share the same [`TokenProvider`],
/// so a session established by one is reused by the other.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use orgbridge_sf_auth::{AuthConfig, TokenProvider};
/// use orgbridge_sf_rest::SalesforceRestClient;
///
/// let provider = Arc::new(TokenProvider::new(AuthConfig::from_env()?));
/// let client = SalesforceRestClient::new(provider)?;
///
/// // Routed to the Data API
/// let accounts = client.query::<serde_json::Value>("SELECT Id FROM Account").await?;
///
/// // Routed to the Tooling API
/// let jobs = client.query::<serde_json::Value>("SELECT Id FROM AsyncApexJob").await?;
/// ```
#[derive(Clone)]
pub struct SalesforceRestClient {
    provider: Arc<TokenProvider>,
    http: SfHttpClient,
    tooling: ToolingClient,
}

impl SalesforceRestClient {
    /// Create a new REST client with default HTTP configuration.
    pub fn new(provider: Arc<TokenProvider>) -> Result<Self> {
        Self::with_config(provider, ClientConfig::default())
    }

    /// Create a new REST client with custom HTTP configuration, shared
    /// with the embedded Tooling client.
    pub fn with_config(provider: Arc<TokenProvider>, config: ClientConfig) -> Result<Self> {
        let http = SfHttpClient::new(config.clone())?;
        let tooling = ToolingClient::with_config(Arc::clone(&provider), config)?;
        Ok(Self {
            provider,
            http,
            tooling,
        })
    }

    /// The token provider backing this client.
    pub fn provider(&self) -> &Arc<TokenProvider> {
        &self.provider
    }

    /// The embedded Tooling API client.
    pub fn tooling(&self) -> &ToolingClient {
        &self.tooling
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

    /// Base URL of the Data endpoint family, rebuilt per call because
    /// re-authentication can move the instance URL.
    pub(crate) fn base_url(&self) -> String {
        format!(
            "{}/services/data/v{}",
            self.provider.instance_url(),
            self.provider.api_version()
        )
    }

    pub(crate) async fn token(&self) -> Result<String> {
        Ok(self.provider.access_token().await?)
    }
}

impl std::fmt::Debug for SalesforceRestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SalesforceRestClient")
            .field("instance_url", &self.instance_url())
            .field("api_version", &self.api_version())
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use futures::future::BoxFuture;
    use orgbridge_sf_auth::{AuthConfig, CliOrg, OrgSource};

    struct StaticOrgs {
        instance_url: String,
    }

    impl OrgSource for StaticOrgs {
        fn list_orgs(&self) -> BoxFuture<'_, orgbridge_sf_auth::Result<Vec<CliOrg>>> {
            Box::pin(async move {
                Ok(vec![CliOrg {
                    alias: Some("test".to_string()),
                    username: Some("test@example.com".to_string()),
                    access_token: Some("00Dxx!test-token".to_string()),
                    instance_url: Some(self.instance_url.clone()),
                    connected_status: Some("Connected".to_string()),
                    is_default_username: true,
                }])
            })
        }
    }

    pub(crate) fn client_for(instance_url: &str) -> SalesforceRestClient {
        let config = AuthConfig::new(instance_url, "test-client-id");
        let provider = Arc::new(TokenProvider::with_org_source(
            config,
            Box::new(StaticOrgs {
                instance_url: instance_url.to_string(),
            }),
        ));
        SalesforceRestClient::new(provider).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::client_for;

    #[tokio::test]
    async fn test_base_urls_for_both_families() {
        let client = client_for("https://na1.salesforce.com");
        assert_eq!(
            client.base_url(),
            "https://na1.salesforce.com/services/data/v62.0"
        );
        assert!(client.tooling().instance_url().contains("na1"));
    }
}

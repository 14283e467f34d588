//! OAuth 2.0 token exchange plumbing shared by the password and JWT
//! bearer flows.

use serde::Deserialize;
use serde::Serialize;
use tracing::instrument;

use crate::error::{Error, ErrorKind, Result};

/// Successful response from the Salesforce token endpoint.
///
/// The access token is redacted in Debug output.
#[derive(Clone, Deserialize)]
pub struct TokenResponse {
    /// Session access token.
    pub access_token: String,

    /// Instance URL for subsequent API calls. May differ from the URL
    /// the exchange was performed against (for example a My Domain URL).
    pub instance_url: String,

    /// Token type, normally `Bearer`.
    #[serde(default)]
    pub token_type: Option<String>,

    /// Granted scopes.
    #[serde(default)]
    pub scope: Option<String>,

    /// Identity URL for the authenticated user.
    #[serde(default)]
    pub id: Option<String>,

    /// Issue timestamp in epoch milliseconds, as a string.
    #[serde(default)]
    pub issued_at: Option<String>,
}

impl std::fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenResponse")
            .field("access_token", &"[REDACTED]")
            .field("instance_url", &self.instance_url)
            .field("token_type", &self.token_type)
            .field("scope", &self.scope)
            .field("id", &self.id)
            .field("issued_at", &self.issued_at)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct OAuthErrorResponse {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

/// Parse a token endpoint response, mapping error bodies to
/// [`ErrorKind::OAuth`].
pub(crate) async fn handle_token_response(response: reqwest::Response) -> Result<TokenResponse> {
    let status = response.status();
    let body = response.text().await?;

    if status.is_success() {
        return serde_json::from_str(&body).map_err(|e| {
            Error::with_source(
                ErrorKind::Json("unexpected token endpoint response".to_string()),
                e,
            )
        });
    }

    match serde_json::from_str::<OAuthErrorResponse>(&body) {
        Ok(oauth_err) => Err(Error::new(ErrorKind::OAuth {
            error: oauth_err.error,
            description: oauth_err
                .error_description
                .unwrap_or_else(|| "no description provided".to_string()),
        })),
        Err(_) => Err(Error::new(ErrorKind::Http(format!(
            "token endpoint returned {status}"
        )))),
    }
}

/// OAuth 2.0 Username-Password Flow credentials.
///
/// Secrets are redacted in Debug output. If a security token is
/// configured it is appended to the password before the exchange.
pub struct PasswordFlow {
    client_id: String,
    client_secret: Option<String>,
    username: String,
    password: String,
}

#[derive(Serialize)]
struct PasswordForm<'a> {
    grant_type: &'a str,
    client_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    client_secret: Option<&'a str>,
    username: &'a str,
    password: &'a str,
}

impl PasswordFlow {
    /// Create username-password flow credentials.
    ///
    /// `password` should already have the security token appended when
    /// the org requires one.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: Option<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret,
            username: username.into(),
            password: password.into(),
        }
    }

    /// Exchange the credentials for an access token at the org's token
    /// endpoint.
    #[instrument(skip(self), fields(username = %self.username))]
    pub async fn authenticate(&self, instance_url: &str) -> Result<TokenResponse> {
        let form = PasswordForm {
            grant_type: "password",
            client_id: &self.client_id,
            client_secret: self.client_secret.as_deref(),
            username: &self.username,
            password: &self.password,
        };
        let body = serde_urlencoded::to_string(&form)?;

        let response = reqwest::Client::new()
            .post(format!("{instance_url}/services/oauth2/token"))
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await?;

        handle_token_response(response).await
    }
}

impl std::fmt::Debug for PasswordFlow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordFlow")
            .field("client_id", &self.client_id)
            .field(
                "client_secret",
                &self.client_secret.as_ref().map(|_| "[REDACTED]"),
            )
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_password_flow_success() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/services/oauth2/token"))
            .and(body_string_contains("grant_type=password"))
            .and(body_string_contains("username=user%40example.com"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "00Dxx!session",
                "instance_url": "https://test.my.salesforce.com",
                "token_type": "Bearer",
                "issued_at": "1724673600000"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let flow = PasswordFlow::new(
            "client123",
            Some("secret456".to_string()),
            "user@example.com",
            "hunter2token",
        );
        let token = flow.authenticate(&server.uri()).await.unwrap();
        assert_eq!(token.access_token, "00Dxx!session");
        assert_eq!(token.instance_url, "https://test.my.salesforce.com");
    }

    #[tokio::test]
    async fn test_password_flow_invalid_grant() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/services/oauth2/token"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": "invalid_grant",
                "error_description": "authentication failure"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let flow = PasswordFlow::new("client123", None, "user@example.com", "wrong");
        let err = flow.authenticate(&server.uri()).await.unwrap_err();
        match err.kind {
            ErrorKind::OAuth { error, description } => {
                assert_eq!(error, "invalid_grant");
                assert_eq!(description, "authentication failure");
            }
            other => panic!("expected OAuth error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_non_oauth_error_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/services/oauth2/token"))
            .respond_with(ResponseTemplate::new(503).set_body_string("gateway timeout"))
            .mount(&server)
            .await;

        let flow = PasswordFlow::new("client123", None, "user@example.com", "pw");
        let err = flow.authenticate(&server.uri()).await.unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Http(_)));
    }

    #[test]
    fn test_token_response_debug_redacts() {
        let token = TokenResponse {
            access_token: "00Dxx!secret".to_string(),
            instance_url: "https://test.my.salesforce.com".to_string(),
            token_type: Some("Bearer".to_string()),
            scope: None,
            id: None,
            issued_at: None,
        };
        let debug = format!("{token:?}");
        assert!(!debug.contains("00Dxx!secret"));
        assert!(debug.contains("[REDACTED]"));
    }
}

//! Error types for sf-tooling.

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    pub kind: ErrorKind,
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// Returns true for authentication failures, surfaced so callers can
    /// tell credential problems apart from other API errors.
    pub fn is_auth_error(&self) -> bool {
        matches!(self.kind, ErrorKind::Auth(_))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// Authentication failed, either during token acquisition or with a
    /// 401 from the API. Check your credentials; never retried.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// HTTP transport or client-level error.
    #[error("Client error: {0}")]
    Client(String),

    /// Error reported by the Salesforce API.
    #[error("Salesforce error: {error_code} - {message}")]
    Salesforce { error_code: String, message: String },

    /// SObject name failed validation.
    #[error("Invalid SObject name: {0}")]
    InvalidSObjectName(String),

    #[error("{0}")]
    Other(String),
}

impl From<orgbridge_sf_client::Error> for Error {
    fn from(err: orgbridge_sf_client::Error) -> Self {
        use orgbridge_sf_client::ErrorKind as ClientKind;
        let kind = match &err.kind {
            ClientKind::Authentication(message) => ErrorKind::Auth(message.clone()),
            ClientKind::SalesforceApi {
                error_code,
                message,
                ..
            } => ErrorKind::Salesforce {
                error_code: error_code.clone(),
                message: message.clone(),
            },
            _ => ErrorKind::Client(err.to_string()),
        };
        Error {
            kind,
            source: Some(Box::new(err)),
        }
    }
}

impl From<orgbridge_sf_auth::Error> for Error {
    fn from(err: orgbridge_sf_auth::Error) -> Self {
        Error {
            kind: ErrorKind::Auth(err.to_string()),
            source: Some(Box::new(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_conversion_preserves_auth() {
        let client_err = orgbridge_sf_client::Error::new(
            orgbridge_sf_client::ErrorKind::Authentication(
                "401 Unauthorized - check your credentials".to_string(),
            ),
        );
        let err: Error = client_err.into();
        assert!(err.is_auth_error());
        assert!(err.to_string().contains("check your credentials"));
    }

    #[test]
    fn test_salesforce_error_conversion() {
        let client_err = orgbridge_sf_client::Error::new(
            orgbridge_sf_client::ErrorKind::SalesforceApi {
                error_code: "INVALID_FIELD".to_string(),
                message: "No such column".to_string(),
                fields: vec![],
            },
        );
        let err: Error = client_err.into();
        match err.kind {
            ErrorKind::Salesforce { error_code, .. } => assert_eq!(error_code, "INVALID_FIELD"),
            other => panic!("expected Salesforce, got {other:?}"),
        }
    }
}

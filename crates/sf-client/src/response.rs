//! HTTP response handling with Salesforce-specific extensions.

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::error::{Error, ErrorKind, Result};

/// Wrapper around HTTP response with additional functionality.
#[derive(Debug)]
pub struct Response {
    inner: reqwest::Response,
}

impl Response {
    /// Create a new Response from a reqwest::Response.
    pub(crate) fn new(inner: reqwest::Response) -> Self {
        Self { inner }
    }

    /// Get the HTTP status code.
    pub fn status(&self) -> u16 {
        self.inner.status().as_u16()
    }

    /// Returns true if the response status is successful (2xx).
    pub fn is_success(&self) -> bool {
        let status = self.status();
        (200..300).contains(&status)
    }

    /// Returns true if the response has no body (204 No Content).
    pub fn is_no_content(&self) -> bool {
        self.status() == 204
    }

    /// Get a header value.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.inner.headers().get(name)?.to_str().ok()
    }

    /// Get the Retry-After header as a Duration.
    pub fn retry_after(&self) -> Option<Duration> {
        let value = self.header("retry-after")?;
        value.parse::<u64>().ok().map(Duration::from_secs)
    }

    /// Get the Content-Type header.
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// Get the response body as text.
    pub async fn text(self) -> Result<String> {
        self.inner.text().await.map_err(Into::into)
    }

    /// Deserialize the response body as JSON.
    pub async fn json<T: DeserializeOwned>(self) -> Result<T> {
        self.inner.json().await.map_err(Into::into)
    }

    /// Get API usage limits from response headers.
    pub fn api_usage(&self) -> Option<ApiUsage> {
        // Salesforce returns usage in Sforce-Limit-Info header
        // Format: "api-usage=25/15000"
        let info = self.header("sforce-limit-info")?;

        for part in info.split(',') {
            let part = part.trim();
            if part.starts_with("api-usage=") {
                let usage = part.trim_start_matches("api-usage=");
                let parts: Vec<&str> = usage.split('/').collect();
                if parts.len() == 2 {
                    let used = parts[0].parse().ok()?;
                    let limit = parts[1].parse().ok()?;
                    return Some(ApiUsage { used, limit });
                }
            }
        }

        None
    }
}

/// API usage information from response headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiUsage {
    /// Number of API calls used.
    pub used: u64,
    /// Total API call limit.
    pub limit: u64,
}

impl ApiUsage {
    /// Get the remaining API calls.
    pub fn remaining(&self) -> u64 {
        self.limit.saturating_sub(self.used)
    }
}

/// Extension trait for processing Salesforce API responses.
pub trait ResponseExt {
    /// Check for Salesforce API errors and convert to appropriate error type.
    fn check_salesforce_error(self) -> impl std::future::Future<Output = Result<Response>> + Send;
}

impl ResponseExt for Response {
    async fn check_salesforce_error(self) -> Result<Response> {
        let status = self.status();

        if self.is_success() {
            return Ok(self);
        }

        let retry_after = self.retry_after();
        let body = self.text().await.unwrap_or_default();
        Err(parse_error_response(status, retry_after, &body))
    }
}

/// Parse an error response body and convert to the appropriate error kind.
///
/// Status handling:
/// - 429 surfaces a rate-limit error with the Retry-After value attached
/// - 401 surfaces a distinct, user-actionable authentication error and is
///   never retried by this layer
/// - 400 surfaces the Salesforce-provided message when the body parses as
///   a Salesforce error, else a generic bad-request message
/// - everything else propagates status + sanitized body
fn parse_error_response(status: u16, retry_after: Option<Duration>, body: &str) -> Error {
    if status == 429 {
        return Error::new(ErrorKind::RateLimited { retry_after });
    }

    if status == 401 {
        let detail = parse_salesforce_errors(body)
            .map(|e| e.message)
            .unwrap_or_else(|| "session invalid or expired".to_string());
        return Error::new(ErrorKind::Authentication(format!(
            "{} - check your credentials",
            sanitize_error_message(&detail)
        )));
    }

    if let Some(err) = parse_salesforce_errors(body) {
        return Error::new(ErrorKind::SalesforceApi {
            error_code: err.error_code,
            message: sanitize_error_message(&err.message),
            fields: err.fields.unwrap_or_default(),
        });
    }

    let sanitized = sanitize_error_message(body);
    let kind = match status {
        400 => {
            if sanitized.is_empty() {
                ErrorKind::BadRequest("malformed request".to_string())
            } else {
                ErrorKind::BadRequest(sanitized)
            }
        }
        _ => ErrorKind::Http {
            status,
            message: sanitized,
        },
    };

    Error::new(kind)
}

/// Parse the Salesforce error body, accepting both the array and the single
/// object formats.
fn parse_salesforce_errors(body: &str) -> Option<SalesforceErrorResponse> {
    if let Ok(errors) = serde_json::from_str::<Vec<SalesforceErrorResponse>>(body) {
        return errors.into_iter().next();
    }
    serde_json::from_str::<SalesforceErrorResponse>(body).ok()
}

/// Sanitize an error message to prevent exposing sensitive data.
///
/// This function:
/// - Truncates messages longer than 500 characters
/// - Removes potential access tokens
/// - Removes potential session IDs
fn sanitize_error_message(message: &str) -> String {
    const MAX_LENGTH: usize = 500;

    let mut sanitized = message.to_string();

    // Salesforce tokens typically start with "00D" and are 100+ chars
    let token_pattern = regex_lite::Regex::new(r"00[A-Za-z0-9]{13,}[!][A-Za-z0-9_.]+").unwrap();
    sanitized = token_pattern
        .replace_all(&sanitized, "[REDACTED_TOKEN]")
        .to_string();

    let session_pattern = regex_lite::Regex::new(r"sid=[A-Za-z0-9]{20,}").unwrap();
    sanitized = session_pattern
        .replace_all(&sanitized, "sid=[REDACTED]")
        .to_string();

    if sanitized.len() > MAX_LENGTH {
        sanitized.truncate(MAX_LENGTH);
        sanitized.push_str("...[truncated]");
    }

    sanitized
}

/// Salesforce API error response format.
#[derive(Debug, serde::Deserialize)]
struct SalesforceErrorResponse {
    #[serde(alias = "errorCode")]
    error_code: String,
    message: String,
    fields: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_usage() {
        let usage = ApiUsage {
            used: 100,
            limit: 1000,
        };

        assert_eq!(usage.remaining(), 900);
    }

    #[test]
    fn test_parse_401_is_authentication_error() {
        let err = parse_error_response(401, None, r#"[{"errorCode":"INVALID_SESSION_ID","message":"Session expired or invalid"}]"#);
        match err.kind {
            ErrorKind::Authentication(msg) => {
                assert!(msg.contains("check your credentials"), "got: {msg}");
                assert!(msg.contains("Session expired or invalid"));
            }
            other => panic!("expected Authentication, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_401_without_body() {
        let err = parse_error_response(401, None, "");
        match err.kind {
            ErrorKind::Authentication(msg) => {
                assert!(msg.contains("check your credentials"));
            }
            other => panic!("expected Authentication, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_400_with_salesforce_body() {
        let err = parse_error_response(
            400,
            None,
            r#"[{"errorCode":"MALFORMED_QUERY","message":"unexpected token: FRM","fields":[]}]"#,
        );
        match err.kind {
            ErrorKind::SalesforceApi {
                error_code,
                message,
                ..
            } => {
                assert_eq!(error_code, "MALFORMED_QUERY");
                assert_eq!(message, "unexpected token: FRM");
            }
            other => panic!("expected SalesforceApi, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_400_without_salesforce_body() {
        let err = parse_error_response(400, None, "<html>nope</html>");
        assert!(matches!(err.kind, ErrorKind::BadRequest(_)));

        let err = parse_error_response(400, None, "");
        match err.kind {
            ErrorKind::BadRequest(msg) => assert_eq!(msg, "malformed request"),
            other => panic!("expected BadRequest, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_429_rate_limited() {
        let err = parse_error_response(429, Some(Duration::from_secs(30)), "");
        assert!(err.is_rate_limited());
        assert_eq!(err.retry_after(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_parse_other_status_propagates() {
        let err = parse_error_response(503, None, "Service Unavailable");
        match err.kind {
            ErrorKind::Http { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "Service Unavailable");
            }
            other => panic!("expected Http, got {other:?}"),
        }
    }

    #[test]
    fn test_sanitize_redacts_access_tokens() {
        let msg = "Session expired: 00Dxx0000001gEF!AQcAQH3k9s7LKbp_example_token_value.here";
        let sanitized = sanitize_error_message(msg);
        assert!(
            sanitized.contains("[REDACTED_TOKEN]"),
            "Should redact token: {sanitized}"
        );
        assert!(
            !sanitized.contains("AQcAQH3k9s7LKbp"),
            "Should not contain token value: {sanitized}"
        );
    }

    #[test]
    fn test_sanitize_redacts_session_ids() {
        let msg = "Invalid session: sid=abc123def456ghi789jkl012";
        let sanitized = sanitize_error_message(msg);
        assert!(
            sanitized.contains("sid=[REDACTED]"),
            "Should redact session ID: {sanitized}"
        );
    }

    #[test]
    fn test_sanitize_truncates_long_messages() {
        let long_msg = "x".repeat(600);
        let sanitized = sanitize_error_message(&long_msg);
        assert!(sanitized.len() < 600);
        assert!(sanitized.ends_with("...[truncated]"));
    }

    #[test]
    fn test_sanitize_passes_through_clean_messages() {
        let msg = "No such column 'foo' on entity 'Account'";
        assert_eq!(sanitize_error_message(msg), msg);
    }

    #[test]
    fn test_salesforce_error_response_array_format() {
        let json = r#"[{"errorCode":"INVALID_FIELD","message":"No such column","fields":["Foo"]}]"#;
        let err = parse_salesforce_errors(json).unwrap();
        assert_eq!(err.error_code, "INVALID_FIELD");
        assert_eq!(err.message, "No such column");
        assert_eq!(err.fields, Some(vec!["Foo".to_string()]));
    }

    #[test]
    fn test_salesforce_error_response_single_object() {
        let json = r#"{"errorCode":"NOT_FOUND","message":"The requested resource does not exist"}"#;
        let err = parse_salesforce_errors(json).unwrap();
        assert_eq!(err.error_code, "NOT_FOUND");
        assert!(err.fields.is_none());
    }

    #[test]
    fn test_salesforce_error_response_empty_array() {
        assert!(parse_salesforce_errors("[]").is_none());
        assert!(parse_salesforce_errors("not json").is_none());
    }
}

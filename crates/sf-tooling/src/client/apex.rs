use serde::Serialize;
use tracing::instrument;

use orgbridge_sf_client::CreateResult;

use crate::error::Result;

#[derive(Serialize)]
struct NewApexClass<'a> {
    #[serde(rename = "Name")]
    name: &'a str,
    #[serde(rename = "Body")]
    body: &'a str,
}

impl super::ToolingClient {
    /// Create an ApexClass from source code.
    ///
    /// `name` must match the class name declared in `body`; Salesforce
    /// compiles the source on creation and reports compile errors in the
    /// result's `errors`.
    #[instrument(skip(self, body), fields(name = %name))]
    pub async fn create_apex_class(&self, name: &str, body: &str) -> Result<CreateResult> {
        self.create("ApexClass", &NewApexClass { name, body }).await
    }
}

#[cfg(test)]
mod tests {
    use crate::client::test_support::client_for;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_create_apex_class_payload() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/services/data/v62.0/tooling/sobjects/ApexClass"))
            .and(body_json(serde_json::json!({
                "Name": "AccountService",
                "Body": "public class AccountService {}"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "id": "01pxx0000001aBcAAI",
                "success": true,
                "errors": []
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        let result = client
            .create_apex_class("AccountService", "public class AccountService {}")
            .await
            .unwrap();

        assert!(result.success);
        assert_eq!(result.id, "01pxx0000001aBcAAI");
    }

    #[tokio::test]
    async fn test_create_apex_class_compile_failure_in_result() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/services/data/v62.0/tooling/sobjects/ApexClass"))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "id": "",
                "success": false,
                "errors": [{
                    "statusCode": "APEX_COMPILE_ERROR",
                    "message": "unexpected token: '}'",
                    "fields": []
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        let result = client
            .create_apex_class("Broken", "public class Broken {")
            .await
            .unwrap();

        assert!(!result.success);
        assert_eq!(result.errors[0].status_code, "APEX_COMPILE_ERROR");
    }
}

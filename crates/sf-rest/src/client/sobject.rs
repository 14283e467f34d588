use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::instrument;

use orgbridge_sf_client::security::soql;
use orgbridge_sf_client::CreateResult;

use crate::error::{Error, ErrorKind, Result};

impl super::SalesforceRestClient {
    /// Create an SObject record.
    ///
    /// The result is returned raw; inspecting `success` and `errors` is
    /// the caller's responsibility.
    #[instrument(skip(self, record))]
    pub async fn create<T: Serialize>(
        &self,
        sobject_type: &str,
        record: &T,
    ) -> Result<CreateResult> {
        self.validate_sobject_name(sobject_type)?;
        let token = self.token().await?;
        let url = format!("{}/sobjects/{}", self.base_url(), sobject_type);
        let result = self
            .http()
            .send_json(self.http().post(url).bearer_auth(token).json(record)?)
            .await?;
        Ok(result)
    }

    /// Retrieve an SObject record by ID, optionally restricted to a
    /// field list.
    #[instrument(skip(self))]
    pub async fn get<T: DeserializeOwned>(
        &self,
        sobject_type: &str,
        id: &str,
        fields: Option<&[&str]>,
    ) -> Result<T> {
        self.validate_sobject_name(sobject_type)?;
        let token = self.token().await?;
        let url = format!("{}/sobjects/{}/{}", self.base_url(), sobject_type, id);
        let mut request = self.http().get(url).bearer_auth(token);
        if let Some(fields) = fields {
            request = request.query("fields", fields.join(","));
        }
        let result = self.http().send_json(request).await?;
        Ok(result)
    }

    /// Update an SObject record. Salesforce returns no body on success.
    #[instrument(skip(self, record))]
    pub async fn update<T: Serialize>(
        &self,
        sobject_type: &str,
        id: &str,
        record: &T,
    ) -> Result<()> {
        self.validate_sobject_name(sobject_type)?;
        let token = self.token().await?;
        let url = format!("{}/sobjects/{}/{}", self.base_url(), sobject_type, id);
        self.http()
            .execute(self.http().patch(url).bearer_auth(token).json(record)?)
            .await?;
        Ok(())
    }

    /// Delete an SObject record.
    #[instrument(skip(self))]
    pub async fn delete(&self, sobject_type: &str, id: &str) -> Result<()> {
        self.validate_sobject_name(sobject_type)?;
        let token = self.token().await?;
        let url = format!("{}/sobjects/{}/{}", self.base_url(), sobject_type, id);
        self.http()
            .execute(self.http().delete(url).bearer_auth(token))
            .await?;
        Ok(())
    }

    /// Describe an SObject's metadata.
    #[instrument(skip(self))]
    pub async fn describe(&self, sobject_type: &str) -> Result<serde_json::Value> {
        self.validate_sobject_name(sobject_type)?;
        let token = self.token().await?;
        let url = format!("{}/sobjects/{}/describe", self.base_url(), sobject_type);
        let result = self
            .http()
            .send_json(self.http().get(url).bearer_auth(token))
            .await?;
        Ok(result)
    }

    fn validate_sobject_name(&self, name: &str) -> Result<()> {
        if soql::is_safe_sobject_name(name) {
            Ok(())
        } else {
            Err(Error::new(ErrorKind::InvalidSObjectName(name.to_string())))
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::client::test_support::client_for;
    use crate::ErrorKind;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_create_and_update() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/services/data/v62.0/sobjects/Account"))
            .and(body_json(serde_json::json!({"Name": "Acme"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "id": "001xx000003DgAAAS",
                "success": true,
                "errors": []
            })))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("PATCH"))
            .and(path(
                "/services/data/v62.0/sobjects/Account/001xx000003DgAAAS",
            ))
            .and(body_json(serde_json::json!({"Name": "Acme Corp"})))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        let result = client
            .create("Account", &serde_json::json!({"Name": "Acme"}))
            .await
            .unwrap();
        assert!(result.success);

        client
            .update(
                "Account",
                "001xx000003DgAAAS",
                &serde_json::json!({"Name": "Acme Corp"}),
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_describe() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/services/data/v62.0/sobjects/Account/describe"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "name": "Account",
                "fields": [{"name": "Id"}, {"name": "Name"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        let describe = client.describe("Account").await.unwrap();
        assert_eq!(describe["name"], "Account");
    }

    #[tokio::test]
    async fn test_delete_failure_propagates_salesforce_error() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path(
                "/services/data/v62.0/sobjects/Account/001xx000003DgAAAS",
            ))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!([{
                "errorCode": "NOT_FOUND",
                "message": "Provided external ID field does not exist"
            }])))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        let err = client
            .delete("Account", "001xx000003DgAAAS")
            .await
            .unwrap_err();
        match err.kind {
            ErrorKind::Salesforce { error_code, .. } => assert_eq!(error_code, "NOT_FOUND"),
            other => panic!("expected Salesforce, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_invalid_sobject_name_rejected_locally() {
        let server = MockServer::start().await;
        let client = client_for(&server.uri());

        let err = client
            .create("Robert'); DROP", &serde_json::json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidSObjectName(_)));
        assert_eq!(server.received_requests().await.unwrap().len(), 0);
    }
}

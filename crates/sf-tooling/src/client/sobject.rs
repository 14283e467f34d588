use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::instrument;

use orgbridge_sf_client::security::soql;
use orgbridge_sf_client::CreateResult;

use crate::error::{Error, ErrorKind, Result};

impl super::ToolingClient {
    /// Create a Tooling SObject record.
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

    /// Retrieve a Tooling SObject record by ID, optionally restricted to
    /// a field list.
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

    /// Update a Tooling SObject record. Salesforce returns no body on
    /// success.
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

    /// Delete a Tooling SObject record.
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

    /// Describe a Tooling SObject's metadata.
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

use serde::de::DeserializeOwned;
use tracing::instrument;

use orgbridge_sf_client::QueryResult;

use crate::error::Result;

impl super::ToolingClient {
    /// Execute a SOQL query against the Tooling API.
    ///
    /// Returns the first page of results. Use [`query_more`] to follow
    /// pagination manually or [`query_all`] for automatic pagination.
    ///
    /// # Security
    ///
    /// User-provided values in the WHERE clause MUST be escaped to
    /// prevent SOQL injection:
    ///
    /// ```rust,ignore
    /// use orgbridge_sf_client::security::soql;
    ///
    /// let safe_name = soql::escape_string(user_input);
    /// let query = format!("SELECT Id FROM ApexClass WHERE Name = '{}'", safe_name);
    /// ```
    ///
    /// [`query_more`]: Self::query_more
    /// [`query_all`]: Self::query_all
    #[instrument(skip(self))]
    pub async fn query<T: DeserializeOwned>(&self, soql: &str) -> Result<QueryResult<T>> {
        let token = self.token().await?;
        let url = format!("{}/query?q={}", self.base_url(), urlencoding::encode(soql));
        let result = self
            .http()
            .send_json(self.http().get(url).bearer_auth(token))
            .await?;
        Ok(result)
    }

    /// Fetch the next page of a query using the `nextRecordsUrl` from a
    /// previous result.
    ///
    /// The URL is followed verbatim: Salesforce encodes the API family
    /// in it, so no re-classification happens here.
    #[instrument(skip(self))]
    pub async fn query_more<T: DeserializeOwned>(
        &self,
        next_records_url: &str,
    ) -> Result<QueryResult<T>> {
        let token = self.token().await?;
        let url = if next_records_url.starts_with("http") {
            next_records_url.to_string()
        } else {
            format!("{}{}", self.provider().instance_url(), next_records_url)
        };
        let result = self
            .http()
            .send_json(self.http().get(url).bearer_auth(token))
            .await?;
        Ok(result)
    }

    /// Execute a SOQL query and return all records, following pagination.
    #[instrument(skip(self))]
    pub async fn query_all<T: DeserializeOwned>(&self, soql: &str) -> Result<Vec<T>> {
        let mut result: QueryResult<T> = self.query(soql).await?;
        let mut records = std::mem::take(&mut result.records);

        while !result.done {
            let Some(next_url) = result.next_records_url.take() else {
                break;
            };
            result = self.query_more(&next_url).await?;
            records.append(&mut result.records);
        }

        Ok(records)
    }
}

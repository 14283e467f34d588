use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use orgbridge_sf_client::QueryResult;
use orgbridge_sf_tooling::references_tooling_object;

use crate::error::Result;

impl super::SalesforceRestClient {
    /// Execute a SOQL query, routed to the right API family.
    ///
    /// SOQL mentioning a Tooling-only object (ApexClass, AsyncApexJob,
    /// TraceFlag, ...) is dispatched to the Tooling endpoint; everything
    /// else goes to the Data API. Classification happens once, here:
    /// pagination via [`query_more`] follows continuation URLs verbatim.
    ///
    /// # Security
    ///
    /// User-provided values in the WHERE clause MUST be escaped with
    /// `orgbridge_sf_client::security::soql::escape_string` to prevent
    /// SOQL injection.
    ///
    /// [`query_more`]: Self::query_more
    #[instrument(skip(self))]
    pub async fn query<T: DeserializeOwned>(&self, soql: &str) -> Result<QueryResult<T>> {
        if references_tooling_object(soql) {
            debug!("query references a tooling object, routing to Tooling API");
            return Ok(self.tooling().query(soql).await?);
        }

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
    /// The URL is followed verbatim with no re-classification: Salesforce
    /// already encodes the API family in the continuation URL.
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

use tracing::instrument;

use crate::error::Result;
use crate::soql::AsyncApexJobQuery;

impl super::SalesforceRestClient {
    /// Search `AsyncApexJob` records, returning the raw records.
    ///
    /// `AsyncApexJob` is a Tooling-only object, so the query lands on the
    /// Tooling API via the router.
    #[instrument(skip(self))]
    pub async fn search_async_apex_jobs(
        &self,
        query: &AsyncApexJobQuery,
    ) -> Result<Vec<serde_json::Value>> {
        let result = self.query::<serde_json::Value>(&query.build()).await?;
        Ok(result.records)
    }
}

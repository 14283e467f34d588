//! SOQL construction helpers.

use orgbridge_sf_client::security::soql;

const ASYNC_APEX_JOB_FIELDS: &str = "Id, ApexClassId, Status, JobType, MethodName, \
     NumberOfErrors, JobItemsProcessed, TotalJobItems, CompletedDate, CreatedDate";

/// Builds a SOQL query over `AsyncApexJob` records.
///
/// Filter values are SOQL-escaped, so caller-provided strings cannot
/// break out of the literal. Results are always newest-first.
///
/// # Example
///
/// ```rust
/// use orgbridge_sf_rest::AsyncApexJobQuery;
///
/// let soql = AsyncApexJobQuery::new()
///     .status("Processing")
///     .job_type("BatchApex")
///     .limit(25)
///     .build();
/// assert!(soql.contains("WHERE Status = 'Processing' AND JobType = 'BatchApex'"));
/// assert!(soql.ends_with("LIMIT 25"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct AsyncApexJobQuery {
    status: Option<String>,
    job_type: Option<String>,
    limit: Option<u32>,
}

impl AsyncApexJobQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by job status (`Queued`, `Processing`, `Completed`, ...).
    #[must_use]
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Filter by job type (`BatchApex`, `Future`, `Queueable`, ...).
    #[must_use]
    pub fn job_type(mut self, job_type: impl Into<String>) -> Self {
        self.job_type = Some(job_type.into());
        self
    }

    /// Cap the number of returned records.
    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Render the SOQL query string.
    #[must_use]
    pub fn build(&self) -> String {
        let mut query = format!("SELECT {ASYNC_APEX_JOB_FIELDS} FROM AsyncApexJob");

        let mut conditions = Vec::new();
        if let Some(ref status) = self.status {
            conditions.push(format!("Status = '{}'", soql::escape_string(status)));
        }
        if let Some(ref job_type) = self.job_type {
            conditions.push(format!("JobType = '{}'", soql::escape_string(job_type)));
        }
        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }

        query.push_str(" ORDER BY CreatedDate DESC");
        if let Some(limit) = self.limit {
            query.push_str(&format!(" LIMIT {limit}"));
        }
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unfiltered_query() {
        let soql = AsyncApexJobQuery::new().build();
        assert!(soql.starts_with("SELECT Id, ApexClassId, Status"));
        assert!(soql.contains(" FROM AsyncApexJob ORDER BY CreatedDate DESC"));
        assert!(!soql.contains("WHERE"));
        assert!(!soql.contains("LIMIT"));
    }

    #[test]
    fn test_status_filter_only() {
        let soql = AsyncApexJobQuery::new().status("Failed").build();
        assert!(soql.contains("WHERE Status = 'Failed' ORDER BY CreatedDate DESC"));
    }

    #[test]
    fn test_all_filters_and_limit() {
        let soql = AsyncApexJobQuery::new()
            .status("Processing")
            .job_type("BatchApex")
            .limit(10)
            .build();
        assert!(soql.contains("WHERE Status = 'Processing' AND JobType = 'BatchApex'"));
        assert!(soql.ends_with("ORDER BY CreatedDate DESC LIMIT 10"));
    }

    #[test]
    fn test_filter_values_are_escaped() {
        let soql = AsyncApexJobQuery::new()
            .status("Queued' OR Status != '")
            .build();
        assert!(soql.contains("Status = 'Queued\\' OR Status != \\''"));
    }
}

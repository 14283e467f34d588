//! Tooling API object classification.
//!
//! Some SObjects only exist in the Tooling API; a SOQL query touching one
//! of them must go to the Tooling endpoint or Salesforce rejects it with
//! an invalid-type error. The set below covers the development-time
//! objects this crate works with and is checked against query text with a
//! case-insensitive substring test.

/// SObjects that live in the Tooling API rather than the REST API.
pub const TOOLING_OBJECTS: &[&str] = &[
    "AsyncApexJob",
    "ApexTestQueueItem",
    "ApexTestResult",
    "ApexClass",
    "ApexTrigger",
    "ApexPage",
    "ApexComponent",
    "ApexLog",
    "ApexCodeCoverageAggregate",
    "ApexOrgWideCoverage",
    "SymbolTable",
    "TraceFlag",
];

/// Returns true when the query text mentions a Tooling-only object.
///
/// Deliberately coarse: a case-insensitive substring scan over the whole
/// query, not a FROM-clause parse. A tooling object name appearing
/// anywhere in the query (including inside a string literal) routes the
/// query to the Tooling API. False positives are harmless for the
/// queries this crate issues; false negatives would make Salesforce
/// reject the query outright.
#[must_use]
pub fn references_tooling_object(query: &str) -> bool {
    let query = query.to_lowercase();
    TOOLING_OBJECTS
        .iter()
        .any(|object| query.contains(&object.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_tooling_objects() {
        assert!(references_tooling_object(
            "SELECT Id, Status FROM AsyncApexJob WHERE Status = 'Processing'"
        ));
        assert!(references_tooling_object("SELECT Id FROM ApexClass"));
        assert!(references_tooling_object(
            "SELECT Id FROM TraceFlag WHERE ExpirationDate > 2024-01-01T00:00:00Z"
        ));
    }

    #[test]
    fn test_case_insensitive() {
        assert!(references_tooling_object("select id from asyncapexjob"));
        assert!(references_tooling_object("SELECT Id FROM APEXCLASS"));
    }

    #[test]
    fn test_standard_objects_not_detected() {
        assert!(!references_tooling_object("SELECT Id, Name FROM Account"));
        assert!(!references_tooling_object(
            "SELECT Id FROM Contact WHERE LastName = 'Smith'"
        ));
        assert!(!references_tooling_object("SELECT Id FROM Opportunity"));
    }

    #[test]
    fn test_substring_match_anywhere_in_query() {
        // Coarse by design: a tooling object name inside a literal still
        // routes to the Tooling API.
        assert!(references_tooling_object(
            "SELECT Id FROM Account WHERE Name = 'ApexClass'"
        ));
    }

    #[test]
    fn test_apex_prefix_alone_is_not_a_match() {
        assert!(!references_tooling_object(
            "SELECT Id FROM Account WHERE Name = 'Apex Consulting'"
        ));
    }
}

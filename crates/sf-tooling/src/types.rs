//! Typed records for common Tooling API objects.

use serde::{Deserialize, Serialize};

/// An ApexClass record.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApexClass {
    #[serde(rename = "Id", default)]
    pub id: Option<String>,

    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "Body", default)]
    pub body: Option<String>,

    #[serde(rename = "ApiVersion", default)]
    pub api_version: Option<f64>,

    #[serde(rename = "Status", default)]
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apex_class_deserialize() {
        let json = serde_json::json!({
            "Id": "01pxx0000001aBcAAI",
            "Name": "AccountService",
            "Body": "public class AccountService {}",
            "ApiVersion": 62.0,
            "Status": "Active"
        });
        let class: ApexClass = serde_json::from_value(json).unwrap();
        assert_eq!(class.name, "AccountService");
        assert_eq!(class.status.as_deref(), Some("Active"));
    }

    #[test]
    fn test_apex_class_partial_fields() {
        let json = serde_json::json!({"Name": "Minimal"});
        let class: ApexClass = serde_json::from_value(json).unwrap();
        assert!(class.id.is_none());
        assert!(class.body.is_none());
    }
}

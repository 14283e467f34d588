//! Security utilities for Salesforce API operations.
//!
//! All user-provided values interpolated into SOQL queries MUST be escaped
//! using the functions in this module to prevent injection.
//!
//! ```rust
//! use orgbridge_sf_client::security::soql;
//!
//! let name = soql::escape_string("O'Brien");
//! let query = format!("SELECT Id FROM Account WHERE Name = '{}'", name);
//! ```

/// SOQL escaping utilities for injection prevention.
pub mod soql {
    /// Escape a string value for use in SOQL string literals.
    ///
    /// Escapes single quotes, backslashes, newlines, carriage returns and
    /// tabs.
    ///
    /// # Example
    ///
    /// ```rust
    /// use orgbridge_sf_client::security::soql;
    ///
    /// let safe = soql::escape_string("O'Brien & Co.");
    /// assert_eq!(safe, "O\\'Brien & Co.");
    /// ```
    #[must_use]
    pub fn escape_string(value: &str) -> String {
        let mut escaped = String::with_capacity(value.len() + 16);
        for ch in value.chars() {
            match ch {
                '\'' => escaped.push_str("\\'"),
                '\\' => escaped.push_str("\\\\"),
                '\n' => escaped.push_str("\\n"),
                '\r' => escaped.push_str("\\r"),
                '\t' => escaped.push_str("\\t"),
                _ => escaped.push(ch),
            }
        }
        escaped
    }

    /// Validate that an SObject name contains only safe characters.
    ///
    /// SObject names must start with a letter and contain only
    /// alphanumerics and underscores (covering the `__c` custom suffix).
    #[must_use]
    pub fn is_safe_sobject_name(name: &str) -> bool {
        if name.is_empty() {
            return false;
        }

        let first = name.chars().next().unwrap();
        if !first.is_ascii_alphabetic() {
            return false;
        }

        name.chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
    }
}

#[cfg(test)]
mod tests {
    use super::soql;

    #[test]
    fn test_escape_string() {
        assert_eq!(soql::escape_string("plain"), "plain");
        assert_eq!(soql::escape_string("O'Brien"), "O\\'Brien");
        assert_eq!(soql::escape_string("back\\slash"), "back\\\\slash");
        assert_eq!(soql::escape_string("line\nbreak"), "line\\nbreak");
    }

    #[test]
    fn test_escape_string_injection_attempt() {
        let escaped = soql::escape_string("' OR Name LIKE '%");
        assert_eq!(escaped, "\\' OR Name LIKE \\'%");
    }

    #[test]
    fn test_is_safe_sobject_name() {
        assert!(soql::is_safe_sobject_name("Account"));
        assert!(soql::is_safe_sobject_name("AsyncApexJob"));
        assert!(soql::is_safe_sobject_name("Custom_Object__c"));
        assert!(!soql::is_safe_sobject_name(""));
        assert!(!soql::is_safe_sobject_name("1Account"));
        assert!(!soql::is_safe_sobject_name("Bad'; DROP--"));
    }
}

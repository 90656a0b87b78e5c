//! Outcome of one validation pass.

use serde::{Deserialize, Serialize};

use crate::config;

/// Success, or the first violation found.
///
/// A failed result carries the message of the failing rule and, for
/// per-field failures, the field's name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    field: Option<String>,
    #[serde(default)]
    message: String,
}

impl ValidationResult {
    pub fn success() -> Self {
        Self {
            valid: true,
            field: None,
            message: String::new(),
        }
    }

    /// Result for an absent entity.
    pub fn null_entity() -> Self {
        Self::unattributed(config::NULL_ENTITY)
    }

    /// Generic "value required" result, not tied to a field.
    pub fn required() -> Self {
        Self::unattributed(config::REQUIRED)
    }

    pub fn failure(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            valid: false,
            field: Some(field.into()),
            message: message.into(),
        }
    }

    pub(crate) fn unattributed(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            field: None,
            message: message.into(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Name of the failing field, `None` on success and for entity-level
    /// failures.
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// Error message, empty on success.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::success()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn canonical_results() {
        let ok = ValidationResult::success();
        assert!(ok.is_valid());
        assert_eq!(ok.field(), None);
        assert_eq!(ok.message(), "");

        let null = ValidationResult::null_entity();
        assert!(!null.is_valid());
        assert_eq!(null.message(), "entity is null");

        assert_eq!(ValidationResult::required().message(), "required");
    }

    #[test]
    fn serializes_without_absent_field() {
        let json = serde_json::to_string(&ValidationResult::failure("age", "out of range")).unwrap();
        assert_eq!(
            json,
            r#"{"valid":false,"field":"age","message":"out of range"}"#
        );

        let json = serde_json::to_string(&ValidationResult::success()).unwrap();
        assert_eq!(json, r#"{"valid":true,"message":""}"#);
        assert_eq!(
            serde_json::from_str::<ValidationResult>(&json).unwrap(),
            ValidationResult::success()
        );
    }
}

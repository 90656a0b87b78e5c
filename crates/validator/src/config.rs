//! Validator configuration.

use fieldkit_descriptor::Value;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub(crate) const INVALID: &str = "invalid";
pub(crate) const REQUIRED: &str = "required";
pub(crate) const NULL_ENTITY: &str = "entity is null";
pub(crate) const PATTERN: &str = "invalid format";
pub(crate) const RANGE: &str = "valid range {min}-{max}";
pub(crate) const LENGTH: &str = "length must be between {min} and {max}";

/// Settings applied by an [`EntityValidator`](crate::EntityValidator).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Messages used where neither a rule nor its annotation supplies one.
    pub messages: DefaultMessages,
}

impl ValidatorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a configuration from JSON. Missing keys keep their defaults.
    ///
    /// ```rust,ignore
    /// let config = ValidatorConfig::from_json_str(r#"{"messages": {"required": "必填"}}"#)?;
    /// assert_eq!(config.messages.required, "必填");
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Fallback messages, one per built-in failure kind.
///
/// `range` and `length` are templates: `{min}` and `{max}` are replaced with
/// the rule's bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultMessages {
    pub invalid: String,
    pub required: String,
    pub null_entity: String,
    pub pattern: String,
    pub range: String,
    pub length: String,
}

impl Default for DefaultMessages {
    fn default() -> Self {
        Self {
            invalid: INVALID.to_owned(),
            required: REQUIRED.to_owned(),
            null_entity: NULL_ENTITY.to_owned(),
            pattern: PATTERN.to_owned(),
            range: RANGE.to_owned(),
            length: LENGTH.to_owned(),
        }
    }
}

impl DefaultMessages {
    pub fn range_message(&self, min: &Value, max: &Value) -> String {
        fill_bounds(&self.range, min, max)
    }

    pub fn length_message(&self, min: usize, max: usize) -> String {
        fill_bounds(&self.length, min, max)
    }
}

pub(crate) fn fill_bounds(
    template: &str,
    min: impl std::fmt::Display,
    max: impl std::fmt::Display,
) -> String {
    template
        .replace("{min}", &min.to_string())
        .replace("{max}", &max.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_keys_keep_defaults() {
        let config =
            ValidatorConfig::from_json_str(r#"{"messages": {"required": "必填"}}"#).unwrap();

        assert_eq!(config.messages.required, "必填");
        assert_eq!(config.messages.invalid, INVALID);
        assert_eq!(config.messages.null_entity, NULL_ENTITY);
        assert_eq!(ValidatorConfig::from_json_str("{}").unwrap(), ValidatorConfig::default());
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = ValidatorConfig::from_json_str(r#"{"messages": 3}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn templates_fill_bounds() {
        let messages = DefaultMessages::default();
        assert_eq!(
            messages.range_message(&Value::Int(1), &Value::Int(99)),
            "valid range 1-99"
        );
        assert_eq!(
            messages.length_message(2, 8),
            "length must be between 2 and 8"
        );
    }
}

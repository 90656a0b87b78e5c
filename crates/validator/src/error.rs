//! Errors raised while loading validator configuration.
//!
//! Misuse of the rule and validator API is reported with
//! [`ArgumentError`](fieldkit_descriptor::ArgumentError), shared with the
//! descriptor crate. Rule violations are never errors; they are
//! [`ValidationResult`](crate::ValidationResult) values.

/// Failure to load a [`ValidatorConfig`](crate::config::ValidatorConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid validator configuration: {0}")]
    Json(#[from] serde_json::Error),
}

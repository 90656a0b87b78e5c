//! Regular-expression rules.

use std::borrow::Cow;

use fieldkit_descriptor::{ArgumentError, Value};
use regex::Regex;

use crate::config;
use crate::rule::Rule;

/// Passes when the value's text fully matches a pattern.
///
/// Null values and values rendering as empty text pass; pair the rule with
/// a required rule for mandatory fields.
#[derive(Debug, Clone)]
pub struct PatternRule {
    regex: Regex,
    message: Cow<'static, str>,
}

impl PatternRule {
    /// Compiles `pattern`, anchored so that only full matches pass.
    pub fn new(pattern: &str) -> Result<Self, ArgumentError> {
        let regex = Regex::new(&format!("^(?:{pattern})$")).map_err(|e| {
            ArgumentError::InvalidArgument {
                name: "pattern",
                reason: e.to_string(),
            }
        })?;
        Ok(Self::from_regex(regex))
    }

    /// Wraps an already compiled regex. The regex is used as given, so it
    /// should carry its own anchors.
    pub fn from_regex(regex: Regex) -> Self {
        Self {
            regex,
            message: Cow::Borrowed(config::PATTERN),
        }
    }

    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = message.into();
        self
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

impl Rule for PatternRule {
    fn is_valid(&self, value: &Value) -> bool {
        if value.is_null() {
            return true;
        }
        let text = value.to_string();
        text.is_empty() || self.regex.is_match(&text)
    }

    fn error_message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Value::Null, true)]
    #[case(Value::from(""), true)]
    #[case(Value::from("SHA"), true)]
    #[case(Value::from("sha"), true)]
    #[case(Value::from("SHAX"), false)]
    #[case(Value::from("XSHA"), false)]
    #[case(Value::from("AB1"), false)]
    #[case(Value::from("   "), false)]
    fn full_match_with_null_and_empty_passing(#[case] value: Value, #[case] expected: bool) {
        let rule = PatternRule::new("[a-zA-Z]{3}").unwrap();
        assert_eq!(rule.is_valid(&value), expected);
    }

    #[test]
    fn matches_on_the_rendered_value() {
        let rule = PatternRule::new(r"\d{3,4}").unwrap();
        assert!(rule.is_valid(&Value::Int(123)));
        assert!(!rule.is_valid(&Value::Int(12)));
    }

    #[test]
    fn alternation_is_anchored_as_a_whole() {
        let rule = PatternRule::new("a|b").unwrap();
        assert!(rule.is_valid(&Value::from("a")));
        assert!(!rule.is_valid(&Value::from("ab")));
    }

    #[test]
    fn invalid_patterns_are_argument_errors() {
        assert!(matches!(
            PatternRule::new("(unclosed"),
            Err(ArgumentError::InvalidArgument { name: "pattern", .. })
        ));
    }

    #[test]
    fn message_defaults_and_overrides() {
        let rule = PatternRule::new("x").unwrap();
        assert_eq!(rule.error_message(), "invalid format");
        assert_eq!(rule.with_message("bad format").error_message(), "bad format");
    }
}

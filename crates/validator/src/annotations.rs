//! Validation annotations.
//!
//! These are attached to entity fields at schema-declaration time and turned
//! into rules when an [`EntityValidator`](crate::EntityValidator) is built.
//! Each kind reports a built-in message unless one is set with
//! `with_message`; the validator replaces the built-in message with the
//! matching entry of its [`DefaultMessages`](crate::config::DefaultMessages).

use std::borrow::Cow;

use fieldkit_descriptor::convert;
use fieldkit_descriptor::{Annotation, ArgumentError, ValidationAnnotation, Value, ValueKind};

use crate::config::{self, DefaultMessages};
use crate::rule::Rule;
use crate::rules::{PatternRule, RangeRule};

/// Message to report for a validation annotation, honouring configured
/// defaults for annotations that carry no explicit message.
pub(crate) fn message_for(
    annotation: &dyn Annotation,
    validation: &dyn ValidationAnnotation,
    messages: &DefaultMessages,
) -> String {
    if let Some(required) = annotation.downcast_ref::<Required>() {
        return required.message().unwrap_or(messages.required.as_str()).to_owned();
    }
    if let Some(range) = annotation.downcast_ref::<Range>() {
        return range.message().map_or_else(
            || messages.range_message(range.rule.minimum(), range.rule.maximum()),
            str::to_owned,
        );
    }
    if let Some(pattern) = annotation.downcast_ref::<Pattern>() {
        return pattern.message().unwrap_or(messages.pattern.as_str()).to_owned();
    }
    if let Some(length) = annotation.downcast_ref::<Length>() {
        return length.message().map_or_else(
            || messages.length_message(length.min, length.max),
            str::to_owned,
        );
    }

    match validation.error_message() {
        "" => messages.invalid.clone(),
        message => message.to_owned(),
    }
}

// ============================================================================
// REQUIRED
// ============================================================================

/// The field must hold a value.
///
/// Null fails. Text that is empty or only whitespace fails unless empty
/// strings are allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Required {
    allow_empty_strings: bool,
    message: Option<Cow<'static, str>>,
}

impl Required {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allow_empty_strings(mut self, allow: bool) -> Self {
        self.allow_empty_strings = allow;
        self
    }

    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn allows_empty_strings(&self) -> bool {
        self.allow_empty_strings
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl Annotation for Required {
    fn as_validation(&self) -> Option<&dyn ValidationAnnotation> {
        Some(self)
    }
}

impl ValidationAnnotation for Required {
    fn is_valid(&self, value: &Value) -> bool {
        match value {
            Value::Null => false,
            Value::Text(text) => self.allow_empty_strings || !text.trim().is_empty(),
            _ => true,
        }
    }

    fn error_message(&self) -> &str {
        self.message().unwrap_or(config::REQUIRED)
    }
}

// ============================================================================
// RANGE
// ============================================================================

/// The field's value must lie within inclusive bounds. Values that do not
/// compare with the bounds pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Range {
    rule: RangeRule,
    message: Option<String>,
}

impl Range {
    pub fn new(minimum: impl Into<Value>, maximum: impl Into<Value>) -> Result<Self, ArgumentError> {
        Ok(Self {
            rule: RangeRule::new(minimum, maximum)?,
            message: None,
        })
    }

    /// Parses both bounds from text as values of `kind`.
    ///
    /// ```rust,ignore
    /// let dates = Range::parse(ValueKind::DateTime, "1995-01-01", "2000-12-31")?;
    /// ```
    pub fn parse(kind: ValueKind, minimum: &str, maximum: &str) -> Result<Self, ArgumentError> {
        Self::new(
            convert::change_type(Value::from(minimum), kind)?,
            convert::change_type(Value::from(maximum), kind)?,
        )
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn minimum(&self) -> &Value {
        self.rule.minimum()
    }

    pub fn maximum(&self) -> &Value {
        self.rule.maximum()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl Annotation for Range {
    fn as_validation(&self) -> Option<&dyn ValidationAnnotation> {
        Some(self)
    }
}

impl ValidationAnnotation for Range {
    fn is_valid(&self, value: &Value) -> bool {
        self.rule.is_valid(value)
    }

    fn error_message(&self) -> &str {
        self.message().unwrap_or_else(|| self.rule.error_message())
    }
}

// ============================================================================
// PATTERN
// ============================================================================

/// The field's text must fully match a regular expression. Null and empty
/// values pass.
#[derive(Debug, Clone)]
pub struct Pattern {
    rule: PatternRule,
    message: Option<Cow<'static, str>>,
}

impl Pattern {
    pub fn new(pattern: &str) -> Result<Self, ArgumentError> {
        Ok(Self {
            rule: PatternRule::new(pattern)?,
            message: None,
        })
    }

    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl Annotation for Pattern {
    fn as_validation(&self) -> Option<&dyn ValidationAnnotation> {
        Some(self)
    }
}

impl ValidationAnnotation for Pattern {
    fn is_valid(&self, value: &Value) -> bool {
        self.rule.is_valid(value)
    }

    fn error_message(&self) -> &str {
        self.message().unwrap_or_else(|| self.rule.error_message())
    }
}

// ============================================================================
// LENGTH
// ============================================================================

/// Text length, in characters, must lie within inclusive bounds. Null and
/// non-text values pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Length {
    min: usize,
    max: usize,
    message: String,
    explicit: bool,
}

impl Length {
    pub fn new(min: usize, max: usize) -> Result<Self, ArgumentError> {
        if max < min {
            return Err(ArgumentError::InvalidArgument {
                name: "max",
                reason: format!("{max} is smaller than min {min}"),
            });
        }
        Ok(Self {
            min,
            max,
            message: config::fill_bounds(config::LENGTH, min, max),
            explicit: false,
        })
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self.explicit = true;
        self
    }

    pub fn min(&self) -> usize {
        self.min
    }

    pub fn max(&self) -> usize {
        self.max
    }

    pub fn message(&self) -> Option<&str> {
        self.explicit.then_some(self.message.as_str())
    }
}

impl Annotation for Length {
    fn as_validation(&self) -> Option<&dyn ValidationAnnotation> {
        Some(self)
    }
}

impl ValidationAnnotation for Length {
    fn is_valid(&self, value: &Value) -> bool {
        match value {
            Value::Text(text) => (self.min..=self.max).contains(&text.chars().count()),
            _ => true,
        }
    }

    fn error_message(&self) -> &str {
        &self.message
    }
}

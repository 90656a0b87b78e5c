//! Inclusive range rules.

use std::cmp::Ordering;

use fieldkit_descriptor::{ArgumentError, Value};

use crate::config;
use crate::rule::Rule;

/// Passes when `minimum <= value <= maximum`.
///
/// Values that do not compare with the bounds (null, text against numbers,
/// and so on) pass: range only constrains values it can order.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeRule {
    minimum: Value,
    maximum: Value,
    message: String,
}

impl RangeRule {
    /// Fails when a bound is null, when the bounds do not compare with each
    /// other, or when `maximum` orders before `minimum`.
    pub fn new(minimum: impl Into<Value>, maximum: impl Into<Value>) -> Result<Self, ArgumentError> {
        let minimum = minimum.into();
        let maximum = maximum.into();

        if minimum.is_null() {
            return Err(ArgumentError::MissingArgument { name: "minimum" });
        }
        if maximum.is_null() {
            return Err(ArgumentError::MissingArgument { name: "maximum" });
        }
        match maximum.compare(&minimum) {
            None => Err(ArgumentError::InvalidArgument {
                name: "maximum",
                reason: format!("`{maximum}` does not compare with minimum `{minimum}`"),
            }),
            Some(Ordering::Less) => Err(ArgumentError::InvalidArgument {
                name: "maximum",
                reason: format!("`{maximum}` is smaller than minimum `{minimum}`"),
            }),
            Some(_) => {
                let message = config::fill_bounds(config::RANGE, &minimum, &maximum);
                Ok(Self {
                    minimum,
                    maximum,
                    message,
                })
            }
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn minimum(&self) -> &Value {
        &self.minimum
    }

    pub fn maximum(&self) -> &Value {
        &self.maximum
    }
}

impl Rule for RangeRule {
    fn is_valid(&self, value: &Value) -> bool {
        match (value.compare(&self.minimum), value.compare(&self.maximum)) {
            (Some(low), Some(high)) => low != Ordering::Less && high != Ordering::Greater,
            _ => true,
        }
    }

    fn error_message(&self) -> &str {
        &self.message
    }
}

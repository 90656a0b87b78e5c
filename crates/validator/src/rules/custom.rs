//! Predicate-backed rules.

use std::borrow::Cow;
use std::fmt;

use fieldkit_descriptor::Value;

use crate::config;
use crate::rule::Rule;

type Predicate = Box<dyn Fn(&Value) -> bool + Send + Sync>;

/// A rule that delegates to a predicate over the untyped value.
pub struct CustomRule {
    predicate: Predicate,
    message: Cow<'static, str>,
}

impl CustomRule {
    pub fn new(predicate: impl Fn(&Value) -> bool + Send + Sync + 'static) -> Self {
        Self {
            predicate: Box::new(predicate),
            message: Cow::Borrowed(config::INVALID),
        }
    }

    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = message.into();
        self
    }
}

impl Rule for CustomRule {
    fn is_valid(&self, value: &Value) -> bool {
        (self.predicate)(value)
    }

    fn error_message(&self) -> &str {
        &self.message
    }
}

impl fmt::Debug for CustomRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomRule")
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

//! Rules and rule chains.

use std::fmt;
use std::sync::Arc;

use fieldkit_descriptor::Value;

/// A predicate over one field value, with the message reported when it fails.
pub trait Rule: Send + Sync {
    fn is_valid(&self, value: &Value) -> bool;

    fn error_message(&self) -> &str;
}

/// Ordered rules of one field. Insertion order is evaluation order.
#[derive(Clone, Default)]
pub struct RuleChain {
    rules: Vec<Arc<dyn Rule>>,
}

impl RuleChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a rule and returns the chain for further chaining.
    pub fn add_rule(&mut self, rule: impl Rule + 'static) -> &mut Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Appends a rule shared with other chains.
    pub fn add_shared(&mut self, rule: Arc<dyn Rule>) -> &mut Self {
        self.rules.push(rule);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Rule> {
        self.rules.iter().map(|rule| rule.as_ref())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// First rule `value` fails, in insertion order.
    pub fn first_violation(&self, value: &Value) -> Option<&dyn Rule> {
        self.iter().find(|rule| !rule.is_valid(value))
    }
}

impl fmt::Debug for RuleChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.rules.iter().map(|rule| rule.error_message()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::CustomRule;

    #[test]
    fn first_violation_follows_insertion_order() {
        let mut chain = RuleChain::new();
        chain
            .add_rule(CustomRule::new(|v| !v.is_null()).with_message("required"))
            .add_rule(CustomRule::new(|v| v.as_i64().is_some()).with_message("not an int"))
            .add_rule(CustomRule::new(|_| false).with_message("never"));

        assert_eq!(chain.len(), 3);
        assert_eq!(
            chain.first_violation(&Value::Null).map(Rule::error_message),
            Some("required")
        );
        assert_eq!(
            chain
                .first_violation(&Value::from("x"))
                .map(Rule::error_message),
            Some("not an int")
        );
        assert_eq!(
            chain
                .first_violation(&Value::Int(1))
                .map(Rule::error_message),
            Some("never")
        );
    }

    #[test]
    fn shared_rules_are_not_deduplicated() {
        let rule: Arc<dyn Rule> = Arc::new(CustomRule::new(|_| true));
        let mut chain = RuleChain::new();
        chain.add_shared(rule.clone()).add_shared(rule);

        assert_eq!(chain.len(), 2);
        assert!(chain.first_violation(&Value::Null).is_none());
    }
}

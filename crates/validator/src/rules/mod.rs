//! Built-in rule kinds.
//!
//! - [`CustomRule`]: delegates to a caller-supplied predicate
//! - [`RangeRule`]: inclusive bounds over comparable values
//! - [`PatternRule`]: full-match regular expression over the value's text

mod custom;
mod pattern;
mod range;

pub use custom::CustomRule;
pub use pattern::PatternRule;
pub use range::RangeRule;

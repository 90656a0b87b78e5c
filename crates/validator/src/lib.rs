//! # fieldkit-validator
//!
//! Per-field rule chains over [`fieldkit_descriptor`] entities.
//!
//! An [`EntityValidator`] holds one ordered [`RuleChain`] per field. Chains
//! start with a rule for every validation annotation declared on the field
//! ([`Required`], [`Range`], [`Pattern`], [`Length`] or any custom
//! [`ValidationAnnotation`](fieldkit_descriptor::ValidationAnnotation)) and
//! grow through [`EntityValidator::rules`]. Validation stops at the first
//! failing rule and reports it as a [`ValidationResult`].
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use fieldkit_validator::prelude::*;
//!
//! #[derive(Default)]
//! struct Flight {
//!     city: Option<String>,
//!     age: i32,
//! }
//!
//! impl_entity! {
//!     Flight {
//!         city: Option<String> => [Required::new()],
//!         age: i32 => [Range::new(1, 99)?],
//!     }
//! }
//!
//! let mut validator = EntityValidator::<Flight>::new()?;
//! validator.rules(field!(Flight, city)).add_rule(standard::city_code());
//!
//! let result = validator.check(&Flight { city: Some("SHA".into()), age: 30 });
//! assert!(result.is_valid());
//! ```
//!
//! ## Built-in Rules
//!
//! - [`CustomRule`](rules::CustomRule): caller-supplied predicate
//! - [`RangeRule`](rules::RangeRule): inclusive bounds
//! - [`PatternRule`](rules::PatternRule): full-match regular expression
//! - [`standard`]: ready-made rules for flight-configuration fields

pub mod annotations;
pub mod config;
pub mod error;
pub mod prelude;
pub mod result;
pub mod rule;
pub mod rules;
pub mod standard;
pub mod validator;

pub use annotations::{Length, Pattern, Range, Required};
pub use config::{DefaultMessages, ValidatorConfig};
pub use error::ConfigError;
pub use result::ValidationResult;
pub use rule::{Rule, RuleChain};
pub use validator::EntityValidator;

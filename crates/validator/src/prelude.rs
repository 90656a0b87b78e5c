//! Prelude module for convenient imports.
//!
//! `use fieldkit_validator::prelude::*;` brings in the validator, its rules
//! and annotations, and the descriptor items needed to declare entities.

// ============================================================================
// VALIDATION: Validator, results, configuration
// ============================================================================

pub use crate::config::{DefaultMessages, ValidatorConfig};
pub use crate::error::ConfigError;
pub use crate::result::ValidationResult;
pub use crate::validator::EntityValidator;

// ============================================================================
// RULES: Rule trait, chains, built-in kinds
// ============================================================================

pub use crate::rule::{Rule, RuleChain};
pub use crate::rules::{CustomRule, PatternRule, RangeRule};
pub use crate::standard;

// ============================================================================
// ANNOTATIONS: Declarative field validation
// ============================================================================

pub use crate::annotations::{Length, Pattern, Range, Required};

// ============================================================================
// DESCRIPTOR: Entity declaration
// ============================================================================

pub use fieldkit_descriptor::{
    Annotation, ArgumentError, Column, Description, Entity, FieldSelector, Schema,
    ValidationAnnotation, Value, ValueKind, field, impl_entity,
};

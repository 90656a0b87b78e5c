//! Declarative field metadata.
//!
//! Annotations are attached to a field when its entity schema is declared
//! and are queried later by concrete type. Any annotation can opt into the
//! validation family by returning itself from
//! [`Annotation::as_validation`]; the validator treats every such annotation
//! uniformly.

use std::any::Any;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::error::ArgumentError;
use crate::value::Value;

// ============================================================================
// TRAITS
// ============================================================================

/// Metadata attached to a field at schema-declaration time.
pub trait Annotation: Any + Send + Sync + fmt::Debug {
    /// Returns `Some` for annotations that constrain the field's value.
    fn as_validation(&self) -> Option<&dyn ValidationAnnotation> {
        None
    }
}

impl dyn Annotation {
    /// The annotation as its concrete kind, if it is an `A`.
    pub fn downcast_ref<A: Annotation>(&self) -> Option<&A> {
        let any: &dyn Any = self;
        any.downcast_ref::<A>()
    }

    pub fn is<A: Annotation>(&self) -> bool {
        self.downcast_ref::<A>().is_some()
    }
}

/// The shape shared by every validation annotation.
pub trait ValidationAnnotation: Send + Sync {
    fn is_valid(&self, value: &Value) -> bool;

    /// Message reported when [`is_valid`](Self::is_valid) fails. May be
    /// empty, in which case the validator substitutes its configured default.
    fn error_message(&self) -> &str;
}

// ============================================================================
// CORE KINDS
// ============================================================================

/// Human-readable description of a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description(Cow<'static, str>);

impl Description {
    pub fn new(text: impl Into<Cow<'static, str>>) -> Self {
        Self(text.into())
    }

    pub fn description(&self) -> &str {
        &self.0
    }
}

impl Annotation for Description {}

/// Maps a field to a row column whose name differs from the field name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column(Cow<'static, str>);

impl Column {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Result<Self, ArgumentError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ArgumentError::invalid("name", "column name is blank"));
        }
        Ok(Self(name))
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl Annotation for Column {}

// ============================================================================
// COLLECTION
// ============================================================================

/// Ordered annotations of one field, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct Annotations(Vec<Arc<dyn Annotation>>);

impl Annotations {
    pub(crate) fn push(&mut self, annotation: Arc<dyn Annotation>) {
        self.0.push(annotation);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Annotation>> {
        self.0.iter()
    }

    /// All annotations of kind `A`.
    pub fn of<A: Annotation>(&self) -> impl Iterator<Item = &A> {
        self.0.iter().filter_map(|a| a.downcast_ref::<A>())
    }

    /// First annotation of kind `A` in declaration order.
    pub fn first<A: Annotation>(&self) -> Option<&A> {
        self.of::<A>().next()
    }

    pub fn has<A: Annotation>(&self) -> bool {
        self.first::<A>().is_some()
    }

    /// Annotations in the validation family.
    pub fn validations(&self) -> impl Iterator<Item = &dyn ValidationAnnotation> {
        self.0.iter().filter_map(|a| a.as_validation())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct NonEmpty;

    impl Annotation for NonEmpty {
        fn as_validation(&self) -> Option<&dyn ValidationAnnotation> {
            Some(self)
        }
    }

    impl ValidationAnnotation for NonEmpty {
        fn is_valid(&self, value: &Value) -> bool {
            !value.is_null()
        }

        fn error_message(&self) -> &str {
            "empty"
        }
    }

    fn sample() -> Annotations {
        let mut annotations = Annotations::default();
        annotations.push(Arc::new(Description::new("first")));
        annotations.push(Arc::new(NonEmpty));
        annotations.push(Arc::new(Description::new("second")));
        annotations
    }

    #[test]
    fn filters_by_kind_in_declaration_order() {
        let annotations = sample();

        let texts: Vec<_> = annotations
            .of::<Description>()
            .map(Description::description)
            .collect();
        assert_eq!(texts, ["first", "second"]);
        assert_eq!(
            annotations.first::<Description>().map(Description::description),
            Some("first")
        );
        assert!(!annotations.has::<Column>());
        assert_eq!(annotations.len(), 3);
    }

    #[test]
    fn validations_yield_only_the_validation_family() {
        let annotations = sample();
        let validations: Vec<_> = annotations.validations().collect();

        assert_eq!(validations.len(), 1);
        assert_eq!(validations[0].error_message(), "empty");
        assert!(!validations[0].is_valid(&Value::Null));
    }

    #[test]
    fn column_rejects_blank_names() {
        assert!(Column::new("  ").is_err());
        assert_eq!(Column::new("PersonName").unwrap().name(), "PersonName");
    }
}

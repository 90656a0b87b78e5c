//! Compiled per-field accessors.
//!
//! A [`FieldAccessor`] is produced once per declared field when the owning
//! entity's descriptor is built. Its getter and setter are closures captured
//! at that point, so every later access is a direct call with no lookup.

use std::any::{self, Any};
use std::fmt;

use crate::annotation::{Annotation, Annotations};
use crate::entity::Entity;
use crate::error::ArgumentError;
use crate::value::{FieldType, Value};

pub(crate) type Getter<E> = Box<dyn Fn(&E) -> Value + Send + Sync>;
pub(crate) type Setter<E> = Box<dyn Fn(&mut E, Value) -> Result<(), ArgumentError> + Send + Sync>;

/// Typed access to one named field of `E`.
pub struct FieldAccessor<E> {
    pub(crate) name: &'static str,
    pub(crate) field_type: FieldType,
    pub(crate) annotations: Annotations,
    pub(crate) getter: Option<Getter<E>>,
    pub(crate) setter: Option<Setter<E>>,
}

impl<E> FieldAccessor<E> {
    pub(crate) fn new(
        name: &'static str,
        field_type: FieldType,
        getter: Option<Getter<E>>,
        setter: Option<Setter<E>>,
    ) -> Self {
        Self {
            name,
            field_type,
            annotations: Annotations::default(),
            getter,
            setter,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    pub fn can_read(&self) -> bool {
        self.getter.is_some()
    }

    pub fn can_write(&self) -> bool {
        self.setter.is_some()
    }

    pub fn annotations(&self) -> &Annotations {
        &self.annotations
    }

    /// Current value of the field, or `Null` when the field is write-only.
    pub fn get_value(&self, entity: &E) -> Value {
        self.getter.as_ref().map_or(Value::Null, |get| get(entity))
    }

    /// Converts `value` to the field's declared type and assigns it.
    ///
    /// Read-only fields ignore the write.
    pub fn set_value(&self, entity: &mut E, value: impl Into<Value>) -> Result<(), ArgumentError> {
        match &self.setter {
            Some(set) => set(entity, value.into()),
            None => Ok(()),
        }
    }

    pub fn annotations_of<A: Annotation>(&self) -> impl Iterator<Item = &A> {
        self.annotations.of::<A>()
    }

    pub fn first_annotation<A: Annotation>(&self) -> Option<&A> {
        self.annotations.first::<A>()
    }

    pub fn has_annotation<A: Annotation>(&self) -> bool {
        self.annotations.has::<A>()
    }
}

impl<E> fmt::Debug for FieldAccessor<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldAccessor")
            .field("name", &self.name)
            .field("field_type", &self.field_type)
            .field("annotations", &self.annotations.len())
            .field("can_read", &self.can_read())
            .field("can_write", &self.can_write())
            .finish()
    }
}

// ============================================================================
// TYPE-ERASED ACCESS
// ============================================================================

/// Field access for callers holding only a runtime type handle.
///
/// The entity is passed as `dyn Any` and checked against the accessor's
/// owning type on every call.
pub trait DynFieldAccessor: Send + Sync {
    fn name(&self) -> &'static str;

    fn field_type(&self) -> FieldType;

    fn annotations(&self) -> &Annotations;

    fn can_read(&self) -> bool;

    fn can_write(&self) -> bool;

    fn get_dyn(&self, entity: &dyn Any) -> Result<Value, ArgumentError>;

    fn set_dyn(&self, entity: &mut dyn Any, value: Value) -> Result<(), ArgumentError>;
}

impl<E: Entity> DynFieldAccessor for FieldAccessor<E> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn field_type(&self) -> FieldType {
        self.field_type
    }

    fn annotations(&self) -> &Annotations {
        &self.annotations
    }

    fn can_read(&self) -> bool {
        self.getter.is_some()
    }

    fn can_write(&self) -> bool {
        self.setter.is_some()
    }

    fn get_dyn(&self, entity: &dyn Any) -> Result<Value, ArgumentError> {
        let entity = entity.downcast_ref::<E>().ok_or_else(mismatch::<E>)?;
        Ok(Self::get_value(self, entity))
    }

    fn set_dyn(&self, entity: &mut dyn Any, value: Value) -> Result<(), ArgumentError> {
        let entity = entity.downcast_mut::<E>().ok_or_else(mismatch::<E>)?;
        Self::set_value(self, entity, value)
    }
}

fn mismatch<E>() -> ArgumentError {
    ArgumentError::TypeMismatch {
        expected: any::type_name::<E>(),
    }
}

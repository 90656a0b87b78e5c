//! Entity schema declaration.
//!
//! An entity type lists its fields once, through [`Entity::describe`], and
//! the descriptor compiles that listing into accessors. Most entities are
//! plain structs and use [`impl_entity!`](crate::impl_entity) instead of
//! writing `describe` by hand.

use std::any::Any;
use std::sync::Arc;

use crate::accessor::FieldAccessor;
use crate::annotation::Annotation;
use crate::error::ArgumentError;
use crate::value::{FieldValue, Value};

/// A record type whose fields can be accessed by name.
pub trait Entity: Any + Send + Sync + Sized {
    /// Declares the fields of `Self` in order. Runs once per type, when its
    /// descriptor is first built.
    fn describe(schema: &mut Schema<Self>) -> Result<(), ArgumentError>;
}

/// Field listing collected by [`Entity::describe`].
pub struct Schema<E> {
    fields: Vec<FieldAccessor<E>>,
}

impl<E: Entity> Schema<E> {
    pub(crate) fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Declares a readable and writable field.
    pub fn field<T: FieldValue>(
        &mut self,
        name: &'static str,
        get: impl Fn(&E) -> &T + Send + Sync + 'static,
        get_mut: impl Fn(&mut E) -> &mut T + Send + Sync + 'static,
    ) -> FieldBuilder<'_, E> {
        self.push(FieldAccessor::new(
            name,
            T::FIELD_TYPE,
            Some(Box::new(move |entity: &E| get(entity).to_value())),
            Some(Box::new(move |entity: &mut E, value: Value| {
                *get_mut(entity) = T::from_value(value)?;
                Ok(())
            })),
        ))
    }

    /// Declares a computed field that can be read but not assigned.
    pub fn read_only<T: FieldValue>(
        &mut self,
        name: &'static str,
        get: impl Fn(&E) -> T + Send + Sync + 'static,
    ) -> FieldBuilder<'_, E> {
        self.push(FieldAccessor::new(
            name,
            T::FIELD_TYPE,
            Some(Box::new(move |entity: &E| get(entity).to_value())),
            None,
        ))
    }

    /// Declares a field that can be assigned but not read back.
    pub fn write_only<T: FieldValue>(
        &mut self,
        name: &'static str,
        set: impl Fn(&mut E, T) + Send + Sync + 'static,
    ) -> FieldBuilder<'_, E> {
        self.push(FieldAccessor::new(
            name,
            T::FIELD_TYPE,
            None,
            Some(Box::new(move |entity: &mut E, value: Value| {
                set(entity, T::from_value(value)?);
                Ok(())
            })),
        ))
    }

    fn push(&mut self, accessor: FieldAccessor<E>) -> FieldBuilder<'_, E> {
        self.fields.push(accessor);
        let index = self.fields.len() - 1;
        FieldBuilder {
            accessor: &mut self.fields[index],
        }
    }

    pub(crate) fn into_fields(self) -> Vec<FieldAccessor<E>> {
        self.fields
    }
}

/// Attaches annotations to the field just declared.
pub struct FieldBuilder<'a, E> {
    accessor: &'a mut FieldAccessor<E>,
}

impl<E> FieldBuilder<'_, E> {
    /// Appends an annotation. Annotations keep their declaration order.
    pub fn annotate(self, annotation: impl Annotation) -> Self {
        self.accessor.annotations.push(Arc::new(annotation));
        self
    }
}

/// Implements [`Entity`] for a plain struct, one field per listed member.
///
/// Each member may carry a bracketed list of annotations; the expressions
/// are evaluated inside `describe`, so fallible constructors can use `?`.
///
/// ```rust,ignore
/// struct Person {
///     id: i64,
///     name: Option<String>,
/// }
///
/// fieldkit_descriptor::impl_entity! {
///     Person {
///         id: i64 => [Description::new("identifier")],
///         name: Option<String> => [Column::new("PersonName")?],
///     }
/// }
/// ```
#[macro_export]
macro_rules! impl_entity {
    (
        $entity:ident {
            $( $field:ident : $fty:ty $( => [ $( $annotation:expr ),* $(,)? ] )? ),* $(,)?
        }
    ) => {
        impl $crate::Entity for $entity {
            fn describe(
                schema: &mut $crate::Schema<Self>,
            ) -> ::core::result::Result<(), $crate::ArgumentError> {
                $(
                    schema
                        .field::<$fty>(
                            ::core::stringify!($field),
                            |entity| &entity.$field,
                            |entity| &mut entity.$field,
                        )
                        $( $( .annotate($annotation) )* )?;
                )*
                Ok(())
            }
        }
    };
}

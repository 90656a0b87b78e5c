//! Per-type field descriptors.
//!
//! An [`EntityDescriptor`] holds the compiled accessors of one entity type,
//! keyed by field name in declaration order. It is built once, through the
//! [registry](crate::registry), and never mutated afterwards.

use std::any::{self, Any};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use indexmap::map::Entry;

use crate::accessor::{DynFieldAccessor, FieldAccessor};
use crate::annotation::Column;
use crate::entity::{Entity, Schema};
use crate::error::ArgumentError;
use crate::registry;
use crate::row::Row;
use crate::selector::FieldSelector;
use crate::value::Value;

/// Compiled field accessors of `E`.
pub struct EntityDescriptor<E> {
    entity_name: &'static str,
    fields: IndexMap<&'static str, FieldAccessor<E>>,
    /// Column alias to field name, from [`Column`] annotations.
    aliases: HashMap<String, &'static str>,
}

impl<E: Entity> EntityDescriptor<E> {
    pub(crate) fn build() -> Result<Self, ArgumentError> {
        let entity_name = any::type_name::<E>();
        let mut schema = Schema::new();
        E::describe(&mut schema)?;

        let declared = schema.into_fields();
        let mut fields = IndexMap::with_capacity(declared.len());
        for accessor in declared {
            if accessor.name().trim().is_empty() {
                return Err(ArgumentError::invalid(
                    "name",
                    format!("blank field name on `{entity_name}`"),
                ));
            }
            match fields.entry(accessor.name()) {
                Entry::Occupied(_) => {
                    return Err(ArgumentError::DuplicateField {
                        entity: entity_name,
                        field: accessor.name().to_owned(),
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert(accessor);
                }
            }
        }

        let mut aliases = HashMap::new();
        for accessor in fields.values() {
            for column in accessor.annotations_of::<Column>() {
                if column.name() == accessor.name() {
                    continue;
                }
                if fields.contains_key(column.name())
                    || aliases.insert(column.name().to_owned(), accessor.name()).is_some()
                {
                    return Err(ArgumentError::DuplicateField {
                        entity: entity_name,
                        field: column.name().to_owned(),
                    });
                }
            }
        }

        tracing::debug!(
            entity = entity_name,
            fields = fields.len(),
            aliases = aliases.len(),
            "built entity descriptor"
        );

        Ok(Self {
            entity_name,
            fields,
            aliases,
        })
    }

    /// Descriptor of `E` from the process-wide registry.
    pub fn shared() -> Result<Arc<Self>, ArgumentError> {
        registry::descriptor_of::<E>()
    }

    pub fn entity_name(&self) -> &'static str {
        self.entity_name
    }

    /// Accessors in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldAccessor<E>> {
        self.fields.values()
    }

    pub fn field_names(&self) -> impl Iterator<Item = &'static str> {
        self.fields.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Accessor for the field called `name`, if any.
    pub fn field(&self, name: &str) -> Option<&FieldAccessor<E>> {
        self.fields.get(name)
    }

    /// Accessor for the field a selector names, if any.
    pub fn select(&self, selector: &FieldSelector<E>) -> Option<&FieldAccessor<E>> {
        self.field(selector.name())
    }

    /// Resolves a row column: the field of that name, otherwise the field
    /// whose [`Column`] annotation carries it.
    pub fn column(&self, column: &str) -> Option<&FieldAccessor<E>> {
        self.field(column).or_else(|| {
            self.aliases
                .get(column)
                .and_then(|name| self.fields.get(*name))
        })
    }

    /// Reads a field by field or column name.
    pub fn get_property(&self, entity: &E, name: &str) -> Option<Value> {
        self.column(name).map(|accessor| accessor.get_value(entity))
    }

    /// Writes a field by field or column name. Unknown names are ignored.
    pub fn set_property(
        &self,
        entity: &mut E,
        name: &str,
        value: impl Into<Value>,
    ) -> Result<(), ArgumentError> {
        match self.column(name) {
            Some(accessor) => accessor.set_value(entity, value),
            None => Ok(()),
        }
    }

    /// Builds an entity from a row.
    ///
    /// Starts from `E::default()` and assigns every column that resolves to
    /// a field. `Null` cells and unresolved columns are skipped. An absent
    /// row yields `None`.
    pub fn fill_entity<R>(&self, row: Option<&R>) -> Result<Option<E>, ArgumentError>
    where
        E: Default,
        R: Row + ?Sized,
    {
        let Some(row) = row else {
            return Ok(None);
        };

        let mut entity = E::default();
        for column in row.column_names() {
            let Some(value) = row.get(column) else {
                continue;
            };
            if value.is_null() {
                continue;
            }
            self.set_property(&mut entity, column, value.clone())?;
        }
        Ok(Some(entity))
    }

    /// Copies readable fields into the row columns that resolve to them.
    pub fn fill_row<R>(&self, entity: &E, row: &mut R) -> Result<(), ArgumentError>
    where
        R: Row + ?Sized,
    {
        let columns: Vec<String> = row.column_names().into_iter().map(str::to_owned).collect();
        for column in columns {
            if let Some(accessor) = self.column(&column).filter(|a| a.can_read()) {
                row.set(&column, accessor.get_value(entity))?;
            }
        }
        Ok(())
    }
}

impl<E> fmt::Debug for EntityDescriptor<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityDescriptor")
            .field("entity", &self.entity_name)
            .field("fields", &self.fields.values().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// TYPE-ERASED DESCRIPTOR
// ============================================================================

/// Descriptor view for callers holding only a runtime type handle.
pub trait DynEntityDescriptor: Any + Send + Sync {
    fn entity_name(&self) -> &'static str;

    fn field_names(&self) -> Vec<&'static str>;

    fn field_dyn(&self, name: &str) -> Option<&dyn DynFieldAccessor>;

    fn fields_dyn(&self) -> Vec<&dyn DynFieldAccessor>;
}

impl<E: Entity> DynEntityDescriptor for EntityDescriptor<E> {
    fn entity_name(&self) -> &'static str {
        self.entity_name
    }

    fn field_names(&self) -> Vec<&'static str> {
        self.fields.keys().copied().collect()
    }

    fn field_dyn(&self, name: &str) -> Option<&dyn DynFieldAccessor> {
        self.fields
            .get(name)
            .map(|accessor| accessor as &dyn DynFieldAccessor)
    }

    fn fields_dyn(&self) -> Vec<&dyn DynFieldAccessor> {
        self.fields
            .values()
            .map(|accessor| accessor as &dyn DynFieldAccessor)
            .collect()
    }
}

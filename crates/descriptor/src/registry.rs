//! Registry of built entity descriptors.
//!
//! Each entity type owns one cell in the registry. The map lock is held only
//! to fetch or insert that cell; building happens inside the cell's
//! once-initialisation, so concurrent callers asking for the same type wait
//! for a single build and all receive the same descriptor. Generic and
//! type-erased lookups share the cell.

use std::any::{self, Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, LazyLock, OnceLock};

use dashmap::DashMap;

use crate::descriptor::{DynEntityDescriptor, EntityDescriptor};
use crate::entity::Entity;
use crate::error::ArgumentError;

/// Both views of one built descriptor, sharing a single allocation.
#[derive(Clone)]
pub(crate) struct Published {
    typed: Arc<dyn Any + Send + Sync>,
    erased: Arc<dyn DynEntityDescriptor>,
}

type Build = fn() -> Result<Published, ArgumentError>;
type Cell = Arc<OnceLock<Result<Published, ArgumentError>>>;

fn publish<E: Entity>() -> Result<Published, ArgumentError> {
    let descriptor = Arc::new(EntityDescriptor::<E>::build()?);
    Ok(Published {
        typed: descriptor.clone(),
        erased: descriptor,
    })
}

// ============================================================================
// ENTITY TYPE
// ============================================================================

/// Runtime handle for an entity type.
#[derive(Clone, Copy)]
pub struct EntityType {
    id: TypeId,
    name: &'static str,
    build: Build,
}

impl EntityType {
    pub fn of<E: Entity>() -> Self {
        Self {
            id: TypeId::of::<E>(),
            name: any::type_name::<E>(),
            build: publish::<E>,
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for EntityType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for EntityType {}

impl Hash for EntityType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EntityType").field(&self.name).finish()
    }
}

// ============================================================================
// REGISTRY
// ============================================================================

/// Thread-safe, build-once store of entity descriptors.
///
/// # Examples
///
/// ```rust,ignore
/// let registry = DescriptorRegistry::new();
/// let descriptor = registry.descriptor::<Person>()?;
/// let same = registry.descriptor_dyn(&EntityType::of::<Person>())?;
/// assert_eq!(descriptor.entity_name(), same.entity_name());
/// ```
#[derive(Default)]
pub struct DescriptorRegistry {
    cells: DashMap<TypeId, Cell>,
}

impl DescriptorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Descriptor of `E`, built on first request.
    pub fn descriptor<E: Entity>(&self) -> Result<Arc<EntityDescriptor<E>>, ArgumentError> {
        let published = self.resolve(&EntityType::of::<E>())?;
        Arc::downcast::<EntityDescriptor<E>>(published.typed).map_err(|_| {
            ArgumentError::TypeMismatch {
                expected: any::type_name::<EntityDescriptor<E>>(),
            }
        })
    }

    /// Descriptor of the type behind `entity_type`, built on first request.
    pub fn descriptor_dyn(
        &self,
        entity_type: &EntityType,
    ) -> Result<Arc<dyn DynEntityDescriptor>, ArgumentError> {
        self.resolve(entity_type).map(|published| published.erased)
    }

    /// Whether a descriptor of `E` has been built successfully.
    pub fn contains<E: Entity>(&self) -> bool {
        self.cells
            .get(&TypeId::of::<E>())
            .is_some_and(|cell| matches!(cell.value().get(), Some(Ok(_))))
    }

    /// Number of entity types requested so far.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn resolve(&self, entity_type: &EntityType) -> Result<Published, ArgumentError> {
        let cell: Cell = self.cells.entry(entity_type.id).or_default().value().clone();
        cell.get_or_init(|| {
            let built = (entity_type.build)();
            match &built {
                Ok(_) => tracing::info!(entity = entity_type.name, "registered entity descriptor"),
                Err(error) => tracing::warn!(
                    entity = entity_type.name,
                    %error,
                    "entity descriptor build failed"
                ),
            }
            built
        })
        .clone()
    }
}

impl fmt::Debug for DescriptorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DescriptorRegistry")
            .field("entities", &self.cells.len())
            .finish()
    }
}

// ============================================================================
// PROCESS-WIDE REGISTRY
// ============================================================================

static GLOBAL: LazyLock<DescriptorRegistry> = LazyLock::new(DescriptorRegistry::new);

/// The process-wide registry.
pub fn global() -> &'static DescriptorRegistry {
    &GLOBAL
}

/// Descriptor of `E` from the process-wide registry.
pub fn descriptor_of<E: Entity>() -> Result<Arc<EntityDescriptor<E>>, ArgumentError> {
    global().descriptor::<E>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Schema;

    #[derive(Debug, Default)]
    struct Point {
        x: i32,
    }

    impl Entity for Point {
        fn describe(schema: &mut Schema<Self>) -> Result<(), ArgumentError> {
            schema.field::<i32>("x", |p| &p.x, |p| &mut p.x);
            Ok(())
        }
    }

    #[test]
    fn repeated_requests_return_the_same_descriptor() {
        let registry = DescriptorRegistry::new();
        assert!(registry.is_empty());

        let first = registry.descriptor::<Point>().unwrap();
        let second = registry.descriptor::<Point>().unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert!(registry.contains::<Point>());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn entity_types_compare_by_type() {
        assert_eq!(EntityType::of::<Point>(), EntityType::of::<Point>());
        assert!(EntityType::of::<Point>().name().ends_with("Point"));
    }
}

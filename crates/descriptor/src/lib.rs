//! # fieldkit-descriptor
//!
//! Build-once field descriptors for entity types.
//!
//! An entity declares its fields once through [`Entity::describe`] (usually
//! via [`impl_entity!`]). The first request for the type compiles that
//! declaration into an [`EntityDescriptor`]: one [`FieldAccessor`] per field,
//! holding a getter/setter closure pair and the field's [`Annotations`].
//! Descriptors are cached per type in a [`DescriptorRegistry`] and shared
//! for the rest of the process.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use fieldkit_descriptor::{Description, EntityDescriptor, Value, impl_entity};
//!
//! #[derive(Default)]
//! struct Person {
//!     id: i64,
//!     name: Option<String>,
//! }
//!
//! impl_entity! {
//!     Person {
//!         id: i64 => [Description::new("identifier")],
//!         name: Option<String>,
//!     }
//! }
//!
//! let descriptor = EntityDescriptor::<Person>::shared()?;
//! let mut person = Person::default();
//! descriptor.set_property(&mut person, "name", "Ada")?;
//! assert_eq!(descriptor.get_property(&person, "name"), Some(Value::from("Ada")));
//! ```
//!
//! ## Row Mapping
//!
//! [`EntityDescriptor::fill_entity`] and [`EntityDescriptor::fill_row`] copy
//! values between entities and any [`Row`] implementation, matching columns
//! by field name or by [`Column`] alias.

pub mod accessor;
pub mod annotation;
pub mod convert;
pub mod descriptor;
pub mod entity;
pub mod error;
pub mod registry;
pub mod row;
pub mod selector;
pub mod value;

pub use accessor::{DynFieldAccessor, FieldAccessor};
pub use annotation::{Annotation, Annotations, Column, Description, ValidationAnnotation};
pub use descriptor::{DynEntityDescriptor, EntityDescriptor};
pub use entity::{Entity, FieldBuilder, Schema};
pub use error::ArgumentError;
pub use registry::{DescriptorRegistry, EntityType, descriptor_of};
pub use row::{DataRow, Row};
pub use selector::FieldSelector;
pub use value::{FieldType, FieldValue, Value, ValueKind};

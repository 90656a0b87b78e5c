//! Argument errors raised by descriptor construction and field access.
//!
//! Every failure in this crate is a programmer error surfaced at the point of
//! misuse. Lookups that miss (unknown field names, unknown columns) are not
//! errors and are represented in-band with `Option`.

use crate::value::ValueKind;

/// Misuse of the descriptor or validator API.
///
/// Returned synchronously by the call that was misused and never swallowed
/// inside the crate. The type is `Clone` so a failed descriptor build can be
/// cached and handed to every later caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArgumentError {
    /// A required argument was absent.
    #[error("argument `{name}` is required")]
    MissingArgument { name: &'static str },

    /// An argument was present but unusable.
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    /// A type-erased accessor received an entity of another type.
    #[error("entity is not a `{expected}`")]
    TypeMismatch { expected: &'static str },

    /// A selector expression did not denote a direct field access.
    #[error("`{selector}` is not a direct field selector")]
    NotAFieldSelector { selector: String },

    /// Two fields with the same name were declared on one entity.
    #[error("field `{field}` is declared twice on `{entity}`")]
    DuplicateField { entity: &'static str, field: String },

    /// A value could not be converted to the requested kind.
    #[error("cannot convert {from} to {to}: {reason}")]
    Conversion {
        from: ValueKind,
        to: ValueKind,
        reason: String,
    },

    /// A null value was assigned to a field that cannot hold one.
    #[error("null cannot be assigned to a non-nullable {kind} field")]
    NullValue { kind: ValueKind },
}

impl ArgumentError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }

    pub(crate) fn conversion(from: ValueKind, to: ValueKind, reason: impl Into<String>) -> Self {
        Self::Conversion {
            from,
            to,
            reason: reason.into(),
        }
    }
}

//! Statically-typed field selectors.

use std::borrow::Cow;
use std::fmt;
use std::marker::PhantomData;

use crate::error::ArgumentError;

/// Names one direct field of `E`.
///
/// Built with [`field!`](crate::field), which fails to compile when `E` has
/// no such field, or parsed from text with [`FieldSelector::parse`].
pub struct FieldSelector<E> {
    name: Cow<'static, str>,
    _entity: PhantomData<fn(&E)>,
}

impl<E> FieldSelector<E> {
    #[doc(hidden)]
    pub const fn from_static(name: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
            _entity: PhantomData,
        }
    }

    /// Parses a selector written as a bare field identifier.
    ///
    /// Member paths (`address.city`), calls, indexing and blank input are
    /// rejected with [`ArgumentError::NotAFieldSelector`].
    pub fn parse(text: &str) -> Result<Self, ArgumentError> {
        let trimmed = text.trim();
        if !is_identifier(trimmed) {
            return Err(ArgumentError::NotAFieldSelector {
                selector: text.to_owned(),
            });
        }
        Ok(Self {
            name: Cow::Owned(trimmed.to_owned()),
            _entity: PhantomData,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    chars
        .next()
        .is_some_and(|c| c == '_' || c.is_alphabetic())
        && chars.all(|c| c == '_' || c.is_alphanumeric())
        && text != "_"
}

impl<E> Clone for FieldSelector<E> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E> fmt::Debug for FieldSelector<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FieldSelector").field(&self.name).finish()
    }
}

impl<E> fmt::Display for FieldSelector<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Builds a [`FieldSelector`] for a direct field of an entity struct.
///
/// ```rust,ignore
/// let selector = field!(Person, name);
/// assert_eq!(selector.name(), "name");
/// ```
#[macro_export]
macro_rules! field {
    ($entity:ty, $field:ident) => {{
        let _ = |entity: &$entity| {
            let _ = &entity.$field;
        };
        $crate::FieldSelector::<$entity>::from_static(::core::stringify!($field))
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[allow(dead_code)]
    struct Flight {
        number: String,
    }

    #[test]
    fn macro_names_the_field() {
        let selector = crate::field!(Flight, number);
        assert_eq!(selector.name(), "number");
    }

    #[rstest]
    #[case("city")]
    #[case(" age ")]
    #[case("_private")]
    #[case("départ")]
    fn parse_accepts_identifiers(#[case] text: &str) {
        let selector = FieldSelector::<Flight>::parse(text).unwrap();
        assert_eq!(selector.name(), text.trim());
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("_")]
    #[case("address.city")]
    #[case("name()")]
    #[case("codes[0]")]
    #[case("1st")]
    fn parse_rejects_non_field_expressions(#[case] text: &str) {
        assert_eq!(
            FieldSelector::<Flight>::parse(text).unwrap_err(),
            ArgumentError::NotAFieldSelector {
                selector: text.to_owned()
            }
        );
    }
}

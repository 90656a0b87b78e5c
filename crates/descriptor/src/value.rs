//! Untyped field values.
//!
//! [`Value`] is the boxed form every field takes when it crosses the
//! boundary between a strongly-typed entity and the generic descriptor,
//! row-mapping and validation code. [`FieldValue`] is implemented by each
//! supported field type and performs the explicit conversions in both
//! directions.

use std::cmp::Ordering;
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::convert;
use crate::error::ArgumentError;

// ============================================================================
// VALUE KIND
// ============================================================================

/// Classification of a non-null [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Bool,
    Int,
    Uint,
    Float,
    Text,
    Bytes,
    Date,
    DateTime,
    Uuid,
}

impl ValueKind {
    /// Lowercase name used in messages.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Uint => "uint",
            Self::Float => "float",
            Self::Text => "text",
            Self::Bytes => "bytes",
            Self::Date => "date",
            Self::DateTime => "datetime",
            Self::Uuid => "uuid",
        }
    }

    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Int | Self::Uint | Self::Float)
    }

    pub const fn is_temporal(self) -> bool {
        matches!(self, Self::Date | Self::DateTime)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// FIELD TYPE
// ============================================================================

/// Declared type of a field: its value kind and whether it may hold null.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldType {
    pub kind: ValueKind,
    pub nullable: bool,
}

impl FieldType {
    pub const fn required(kind: ValueKind) -> Self {
        Self {
            kind,
            nullable: false,
        }
    }

    pub const fn nullable(kind: ValueKind) -> Self {
        Self {
            kind,
            nullable: true,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nullable {
            write!(f, "{}?", self.kind)
        } else {
            write!(f, "{}", self.kind)
        }
    }
}

// ============================================================================
// VALUE
// ============================================================================

/// A field value with its type erased.
///
/// `Null` is the neutral "absent" value: the reading of an unset nullable
/// field, of a field without a getter, and of an empty row cell.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Uuid(Uuid),
}

impl Value {
    /// Kind of this value, `None` for `Null`.
    pub const fn kind(&self) -> Option<ValueKind> {
        match self {
            Self::Null => None,
            Self::Bool(_) => Some(ValueKind::Bool),
            Self::Int(_) => Some(ValueKind::Int),
            Self::Uint(_) => Some(ValueKind::Uint),
            Self::Float(_) => Some(ValueKind::Float),
            Self::Text(_) => Some(ValueKind::Text),
            Self::Bytes(_) => Some(ValueKind::Bytes),
            Self::Date(_) => Some(ValueKind::Date),
            Self::DateTime(_) => Some(ValueKind::DateTime),
            Self::Uuid(_) => Some(ValueKind::Uuid),
        }
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Orders two values when they are comparable.
    ///
    /// Numeric kinds compare numerically across `Int`, `Uint` and `Float`.
    /// A `Date` compares with a `DateTime` as midnight of that date. Any
    /// other pairing, and any pairing involving `Null`, yields `None`.
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => Some(a.cmp(b)),
            (Self::Uint(a), Self::Uint(b)) => Some(a.cmp(b)),
            (Self::Float(a), Self::Float(b)) => a.partial_cmp(b),
            (Self::Int(a), Self::Uint(b)) => Some(cmp_int_uint(*a, *b)),
            (Self::Uint(a), Self::Int(b)) => Some(cmp_int_uint(*b, *a).reverse()),
            (Self::Int(a), Self::Float(b)) => (*a as f64).partial_cmp(b),
            (Self::Float(a), Self::Int(b)) => a.partial_cmp(&(*b as f64)),
            (Self::Uint(a), Self::Float(b)) => (*a as f64).partial_cmp(b),
            (Self::Float(a), Self::Uint(b)) => a.partial_cmp(&(*b as f64)),
            (Self::Bool(a), Self::Bool(b)) => Some(a.cmp(b)),
            (Self::Text(a), Self::Text(b)) => Some(a.cmp(b)),
            (Self::Bytes(a), Self::Bytes(b)) => Some(a.cmp(b)),
            (Self::Uuid(a), Self::Uuid(b)) => Some(a.cmp(b)),
            (Self::Date(a), Self::Date(b)) => Some(a.cmp(b)),
            (Self::DateTime(a), Self::DateTime(b)) => Some(a.cmp(b)),
            (Self::Date(a), Self::DateTime(b)) => a.and_hms_opt(0, 0, 0).map(|a| a.cmp(b)),
            (Self::DateTime(a), Self::Date(b)) => b.and_hms_opt(0, 0, 0).map(|b| a.cmp(&b)),
            _ => None,
        }
    }
}

fn cmp_int_uint(signed: i64, unsigned: u64) -> Ordering {
    u64::try_from(signed).map_or(Ordering::Less, |s| s.cmp(&unsigned))
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Uint(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => f.write_str(s),
            Self::Bytes(b) => f.write_str(&hex::encode(b)),
            Self::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Self::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S%.f")),
            Self::Uuid(u) => write!(f, "{u}"),
        }
    }
}

// ============================================================================
// FROM CONVERSIONS
// ============================================================================

macro_rules! value_from {
    ($variant:ident: $($ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Self::$variant(value.into())
                }
            }
        )+
    };
}

value_from!(Int: i8, i16, i32, i64, u8, u16, u32);
value_from!(Uint: u64);
value_from!(Float: f32, f64);
value_from!(Bool: bool);
value_from!(Text: String, &str);
value_from!(Bytes: Vec<u8>);
value_from!(Date: NaiveDate);
value_from!(DateTime: NaiveDateTime);
value_from!(Uuid: Uuid);

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        Self::Uint(value as u64)
    }
}

impl From<isize> for Value {
    fn from(value: isize) -> Self {
        Self::Int(value as i64)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

// ============================================================================
// FIELD VALUE
// ============================================================================

/// A type that can be stored in an entity field.
///
/// `to_value` boxes the field for generic code; `from_value` converts an
/// incoming value to the field's declared kind and unboxes it. Conversion
/// failures are argument errors, never silent defaults.
pub trait FieldValue: Sized + Send + Sync + 'static {
    /// Declared type reported by accessors of fields holding `Self`.
    const FIELD_TYPE: FieldType;

    fn to_value(&self) -> Value;

    fn from_value(value: Value) -> Result<Self, ArgumentError>;
}

/// Converts `value` to `kind`, rejecting `Null` for non-nullable fields.
fn coerce(value: Value, kind: ValueKind) -> Result<Value, ArgumentError> {
    if value.is_null() {
        return Err(ArgumentError::NullValue { kind });
    }
    convert::change_type(value, kind)
}

macro_rules! field_value_int {
    ($variant:ident: $($ty:ty),+ $(,)?) => {
        $(
            impl FieldValue for $ty {
                const FIELD_TYPE: FieldType = FieldType::required(ValueKind::$variant);

                fn to_value(&self) -> Value {
                    Value::from(*self)
                }

                fn from_value(value: Value) -> Result<Self, ArgumentError> {
                    match coerce(value, ValueKind::$variant)? {
                        Value::$variant(n) => <$ty>::try_from(n).map_err(|_| {
                            ArgumentError::conversion(
                                ValueKind::$variant,
                                ValueKind::$variant,
                                format!("{n} is out of range for {}", stringify!($ty)),
                            )
                        }),
                        other => Err(unexpected(&other, ValueKind::$variant)),
                    }
                }
            }
        )+
    };
}

field_value_int!(Int: i8, i16, i32, i64, u8, u16, u32);
field_value_int!(Uint: u64, usize);

fn unexpected(value: &Value, to: ValueKind) -> ArgumentError {
    ArgumentError::conversion(
        value.kind().unwrap_or(to),
        to,
        "conversion produced an unexpected kind",
    )
}

impl FieldValue for f64 {
    const FIELD_TYPE: FieldType = FieldType::required(ValueKind::Float);

    fn to_value(&self) -> Value {
        Value::Float(*self)
    }

    fn from_value(value: Value) -> Result<Self, ArgumentError> {
        match coerce(value, ValueKind::Float)? {
            Value::Float(x) => Ok(x),
            other => Err(unexpected(&other, ValueKind::Float)),
        }
    }
}

impl FieldValue for f32 {
    const FIELD_TYPE: FieldType = FieldType::required(ValueKind::Float);

    fn to_value(&self) -> Value {
        Value::Float(f64::from(*self))
    }

    fn from_value(value: Value) -> Result<Self, ArgumentError> {
        let x = f64::from_value(value)?;
        if x.is_finite() && !(f64::from(f32::MIN)..=f64::from(f32::MAX)).contains(&x) {
            return Err(ArgumentError::conversion(
                ValueKind::Float,
                ValueKind::Float,
                format!("{x} is out of range for f32"),
            ));
        }
        Ok(x as f32)
    }
}

macro_rules! field_value_direct {
    ($($ty:ty => $variant:ident),+ $(,)?) => {
        $(
            impl FieldValue for $ty {
                const FIELD_TYPE: FieldType = FieldType::required(ValueKind::$variant);

                fn to_value(&self) -> Value {
                    Value::$variant(self.clone())
                }

                fn from_value(value: Value) -> Result<Self, ArgumentError> {
                    match coerce(value, ValueKind::$variant)? {
                        Value::$variant(inner) => Ok(inner),
                        other => Err(unexpected(&other, ValueKind::$variant)),
                    }
                }
            }
        )+
    };
}

field_value_direct! {
    bool => Bool,
    String => Text,
    Vec<u8> => Bytes,
    NaiveDate => Date,
    NaiveDateTime => DateTime,
    Uuid => Uuid,
}

impl<T: FieldValue> FieldValue for Option<T> {
    const FIELD_TYPE: FieldType = FieldType::nullable(T::FIELD_TYPE.kind);

    fn to_value(&self) -> Value {
        self.as_ref().map_or(Value::Null, FieldValue::to_value)
    }

    fn from_value(value: Value) -> Result<Self, ArgumentError> {
        if value.is_null() {
            Ok(None)
        } else {
            T::from_value(value).map(Some)
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

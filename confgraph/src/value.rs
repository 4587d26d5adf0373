//! Values and declared types of configuration fields.
//!
//! Entries exchange data with nodes as [`Value`]s. Each field also carries a
//! [`ValueType`] describing its declared Rust type; transformations match on
//! it to decide which entry variant a field becomes.

use std::any::{type_name, TypeId};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A scalar or list value as stored in a hierarchical node.
///
/// # Examples
///
/// ```
/// use confgraph::Value;
///
/// let value: Value = serde_yaml::from_str("42").unwrap();
/// assert_eq!(value, Value::Integer(42));
/// assert_eq!(value.as_f64(), Some(42.0));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Integer(i64),
    /// A floating point number.
    Float(f64),
    /// A string.
    Text(String),
    /// An ordered list of values.
    List(Vec<Value>),
}

impl Value {
    /// Returns the numeric value, if this is an integer or a float.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the string slice, if this is a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the boolean, if this is a boolean value.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => write!(f, "{s}"),
            Self::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
        }
    }
}

/// Broad classification of a declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// `bool`.
    Bool,
    /// Any primitive integer type.
    Integer,
    /// `f32` or `f64`.
    Float,
    /// `String`.
    Text,
    /// A fieldless enumeration, with its variant names in declaration order.
    Enum(&'static [&'static str]),
    /// `Vec<T>`; the element type is the first type argument.
    List,
    /// Anything else. No built-in transformation handles custom types.
    Custom,
}

/// The declared type of a configuration field.
///
/// # Examples
///
/// ```
/// use confgraph::{ConfigValue, ValueKind};
///
/// let ty = <u8 as ConfigValue>::value_type();
/// assert!(ty.is::<u8>());
/// assert_eq!(ty.kind(), ValueKind::Integer);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueType {
    id: TypeId,
    name: &'static str,
    kind: ValueKind,
}

impl ValueType {
    /// Describes the Rust type `T` with the given kind.
    #[must_use]
    pub fn of<T: 'static>(kind: ValueKind) -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
            kind,
        }
    }

    /// Describes a fieldless enumeration `T` with the given variant names.
    #[must_use]
    pub fn enumeration<T: 'static>(variants: &'static [&'static str]) -> Self {
        Self::of::<T>(ValueKind::Enum(variants))
    }

    /// Returns the `TypeId` of the declared type.
    #[must_use]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    /// Returns the Rust name of the declared type.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the kind of the declared type.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        self.kind
    }

    /// Returns `true` if the declared type is exactly `T`.
    #[must_use]
    pub fn is<T: 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }

    /// Returns `true` for integer and float kinds.
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self.kind, ValueKind::Integer | ValueKind::Float)
    }

    /// Returns the variant names of an enumeration, or an empty slice.
    #[must_use]
    pub const fn variants(&self) -> &'static [&'static str] {
        match self.kind {
            ValueKind::Enum(variants) => variants,
            _ => &[],
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A Rust type that can be stored in a configuration field.
///
/// Implemented for `bool`, the primitive integers up to `i64`/`u32`,
/// `f32`, `f64`, `String` and `Vec<T>`. Enumerations implement it by hand:
///
/// ```
/// use confgraph::{ConfigValue, Error, Result, Value, ValueType};
///
/// #[derive(Clone, Copy, Debug, PartialEq)]
/// enum Mode { Fast, Safe }
///
/// impl ConfigValue for Mode {
///     fn value_type() -> ValueType {
///         ValueType::enumeration::<Mode>(&["fast", "safe"])
///     }
///
///     fn to_value(&self) -> Value {
///         Value::Text(match self { Mode::Fast => "fast", Mode::Safe => "safe" }.into())
///     }
///
///     fn from_value(value: Value) -> Result<Self> {
///         match value.as_text() {
///             Some("fast") => Ok(Mode::Fast),
///             Some("safe") => Ok(Mode::Safe),
///             _ => Err(Error::Coercion { expected: "Mode", found: value.to_string() }),
///         }
///     }
/// }
///
/// assert_eq!(Mode::from_value(Mode::Safe.to_value()).unwrap(), Mode::Safe);
/// ```
pub trait ConfigValue: Sized + 'static {
    /// The declared type of fields holding `Self`.
    fn value_type() -> ValueType;

    /// Generic type arguments of `Self` (element type of a list, for instance).
    fn type_arguments() -> Vec<ValueType> {
        Vec::new()
    }

    /// Converts the current value for storage.
    fn to_value(&self) -> Value;

    /// Converts a stored value back.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Coercion`] if the value has the wrong shape or range.
    fn from_value(value: Value) -> Result<Self>;
}

fn coercion<T>(value: &Value) -> Error {
    Error::Coercion {
        expected: type_name::<T>(),
        found: format!("{value:?}"),
    }
}

impl ConfigValue for bool {
    fn value_type() -> ValueType {
        ValueType::of::<Self>(ValueKind::Bool)
    }

    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }

    fn from_value(value: Value) -> Result<Self> {
        value.as_bool().ok_or_else(|| coercion::<Self>(&value))
    }
}

macro_rules! integer_value {
    ($($ty:ty),*) => {
        $(
            impl ConfigValue for $ty {
                fn value_type() -> ValueType {
                    ValueType::of::<Self>(ValueKind::Integer)
                }

                fn to_value(&self) -> Value {
                    Value::Integer(i64::from(*self))
                }

                fn from_value(value: Value) -> Result<Self> {
                    match value {
                        Value::Integer(i) => Self::try_from(i).map_err(|_| coercion::<Self>(&value)),
                        _ => Err(coercion::<Self>(&value)),
                    }
                }
            }
        )*
    };
}

integer_value!(i8, i16, i32, i64, u8, u16, u32);

impl ConfigValue for f64 {
    fn value_type() -> ValueType {
        ValueType::of::<Self>(ValueKind::Float)
    }

    fn to_value(&self) -> Value {
        Value::Float(*self)
    }

    fn from_value(value: Value) -> Result<Self> {
        value.as_f64().ok_or_else(|| coercion::<Self>(&value))
    }
}

impl ConfigValue for f32 {
    fn value_type() -> ValueType {
        ValueType::of::<Self>(ValueKind::Float)
    }

    fn to_value(&self) -> Value {
        Value::Float(f64::from(*self))
    }

    #[allow(clippy::cast_possible_truncation)]
    fn from_value(value: Value) -> Result<Self> {
        value
            .as_f64()
            .map(|f| f as Self)
            .ok_or_else(|| coercion::<Self>(&value))
    }
}

impl ConfigValue for String {
    fn value_type() -> ValueType {
        ValueType::of::<Self>(ValueKind::Text)
    }

    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Text(s) => Ok(s),
            other => Err(coercion::<Self>(&other)),
        }
    }
}

impl<T: ConfigValue> ConfigValue for Vec<T> {
    fn value_type() -> ValueType {
        ValueType::of::<Self>(ValueKind::List)
    }

    fn type_arguments() -> Vec<ValueType> {
        vec![T::value_type()]
    }

    fn to_value(&self) -> Value {
        Value::List(self.iter().map(ConfigValue::to_value).collect())
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::List(items) => items.into_iter().map(T::from_value).collect(),
            other => Err(coercion::<Self>(&other)),
        }
    }
}

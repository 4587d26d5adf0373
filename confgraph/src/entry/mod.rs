//! Entries: leaf configuration values.
//!
//! An [`Entry`] wraps one [`EntryOrigin`] together with the variant chosen for
//! it by the transformation pipeline. Variants are a closed set
//! ([`EntryKind`]); callers query capabilities such as [`Entry::bounds`]
//! instead of inspecting the variant.

use std::fmt;

use crate::error::{Error, Result};
use crate::node::ConfigNode;
use crate::origin::EntryOrigin;
use crate::schema::Formatter;
use crate::value::{Value, ValueType};

#[cfg(test)]
mod proptests;

/// Largest RGB value a color entry without alpha accepts.
pub const MAX_RGB: i64 = 0x00FF_FFFF;

/// The variant of an entry and its constraint metadata.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntryKind {
    /// No constraints beyond the declared type.
    Plain,
    /// A boolean, presented as a toggle or a checkbox.
    Boolean {
        /// Checkbox presentation.
        checkbox: bool,
    },
    /// A number within `min..=max`.
    Bounded {
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },
    /// A number within `min..=max`, edited in `step` increments.
    Slider {
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
        /// Slider increment.
        step: f64,
    },
    /// An RGB(A) color stored as an integer.
    Color {
        /// Whether the top byte carries alpha.
        alpha: bool,
    },
    /// One variant of a fieldless enumeration.
    Enum {
        /// Dropdown presentation instead of cycling.
        dropdown: bool,
    },
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain => write!(f, "plain"),
            Self::Boolean { checkbox: false } => write!(f, "boolean"),
            Self::Boolean { checkbox: true } => write!(f, "checkbox"),
            Self::Bounded { min, max } => write!(f, "bounded {min}..={max}"),
            Self::Slider { min, max, step } => write!(f, "slider {min}..={max} step {step}"),
            Self::Color { alpha: false } => write!(f, "color"),
            Self::Color { alpha: true } => write!(f, "color+alpha"),
            Self::Enum { dropdown: false } => write!(f, "enum"),
            Self::Enum { dropdown: true } => write!(f, "dropdown"),
        }
    }
}

/// A leaf configuration value bound to a field.
///
/// Reading and writing go straight through to the bound field; the entry
/// itself only remembers the default captured when it was created.
#[derive(Clone)]
pub struct Entry {
    origin: EntryOrigin,
    kind: EntryKind,
    default: Value,
}

impl Entry {
    /// Creates an entry of the given kind, capturing the current field value
    /// as its default.
    #[must_use]
    pub fn new(origin: EntryOrigin, kind: EntryKind) -> Self {
        let default = origin.get();
        Self {
            origin,
            kind,
            default,
        }
    }

    /// Creates an unconstrained entry.
    #[must_use]
    pub fn plain(origin: EntryOrigin) -> Self {
        Self::new(origin, EntryKind::Plain)
    }

    /// Creates a boolean entry.
    #[must_use]
    pub fn boolean(origin: EntryOrigin, checkbox: bool) -> Self {
        Self::new(origin, EntryKind::Boolean { checkbox })
    }

    /// Creates a bounded numeric entry.
    #[must_use]
    pub fn bounded(origin: EntryOrigin, min: f64, max: f64) -> Self {
        Self::new(origin, EntryKind::Bounded { min, max })
    }

    /// Creates a slider entry.
    #[must_use]
    pub fn slider(origin: EntryOrigin, min: f64, max: f64, step: f64) -> Self {
        Self::new(origin, EntryKind::Slider { min, max, step })
    }

    /// Creates a color entry.
    #[must_use]
    pub fn color(origin: EntryOrigin, alpha: bool) -> Self {
        Self::new(origin, EntryKind::Color { alpha })
    }

    /// Creates an enumeration entry.
    #[must_use]
    pub fn enumeration(origin: EntryOrigin, dropdown: bool) -> Self {
        Self::new(origin, EntryKind::Enum { dropdown })
    }

    /// Returns the entry identifier (the field identifier).
    #[must_use]
    pub const fn id(&self) -> &'static str {
        self.origin.field_id()
    }

    /// Returns the key used to look up the display name.
    #[must_use]
    pub fn name_key(&self) -> &str {
        self.origin
            .meta()
            .translation_key()
            .unwrap_or_else(|| self.origin.field_id())
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.origin.meta().comment()
    }

    /// Returns `true` if a change only takes effect after a restart.
    #[must_use]
    pub const fn requires_restart(&self) -> bool {
        self.origin.meta().requires_restart()
    }

    /// Returns the value formatter, if any.
    #[must_use]
    pub fn formatter(&self) -> Option<&Formatter> {
        self.origin.meta().formatter()
    }

    /// Formats a value with the entry's formatter, or its plain display form.
    #[must_use]
    pub fn format(&self, value: &Value) -> String {
        self.formatter()
            .map_or_else(|| value.to_string(), |format| format(value))
    }

    /// Returns the variant of this entry.
    #[must_use]
    pub const fn kind(&self) -> EntryKind {
        self.kind
    }

    /// Returns the origin this entry is bound to.
    #[must_use]
    pub const fn origin(&self) -> &EntryOrigin {
        &self.origin
    }

    /// Returns the declared type of the bound field.
    #[must_use]
    pub const fn value_type(&self) -> ValueType {
        self.origin.value_type()
    }

    /// Returns the default value.
    #[must_use]
    pub const fn default_value(&self) -> &Value {
        &self.default
    }

    /// Returns `(min, max)` for bounded and slider entries.
    #[must_use]
    pub const fn bounds(&self) -> Option<(f64, f64)> {
        match self.kind {
            EntryKind::Bounded { min, max } | EntryKind::Slider { min, max, .. } => {
                Some((min, max))
            }
            _ => None,
        }
    }

    /// Returns the slider increment for slider entries.
    #[must_use]
    pub const fn step(&self) -> Option<f64> {
        match self.kind {
            EntryKind::Slider { step, .. } => Some(step),
            _ => None,
        }
    }

    /// Returns the admissible variants of an enumeration entry.
    #[must_use]
    pub const fn variants(&self) -> &'static [&'static str] {
        self.origin.value_type().variants()
    }

    /// Reads the current value from the bound field.
    #[must_use]
    pub fn value(&self) -> Value {
        self.origin.get()
    }

    /// Validates `value` and writes it to the bound field.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the value violates the entry's
    /// constraints, or [`Error::Coercion`] if it does not fit the field type.
    /// The field is left untouched in both cases.
    pub fn set_value(&self, value: Value) -> Result<()> {
        self.validate(&value)?;
        self.origin.set(value)
    }

    /// Restores the default value.
    ///
    /// # Errors
    ///
    /// Same as [`Entry::set_value`].
    pub fn reset(&self) -> Result<()> {
        self.set_value(self.default.clone())
    }

    fn validate(&self, value: &Value) -> Result<()> {
        match self.kind {
            EntryKind::Plain | EntryKind::Boolean { .. } => Ok(()),
            EntryKind::Bounded { min, max } | EntryKind::Slider { min, max, .. } => {
                let number = value.as_f64().ok_or_else(|| self.invalid("expected a number"))?;
                if !number.is_finite() || !(min..=max).contains(&number) {
                    return Err(self.invalid(format!("{value} is not between {min} and {max}")));
                }
                Ok(())
            }
            EntryKind::Color { alpha } => match value {
                Value::Integer(rgb) if alpha || (0..=MAX_RGB).contains(rgb) => Ok(()),
                Value::Integer(rgb) => {
                    Err(self.invalid(format!("{rgb:#x} does not fit an RGB color without alpha")))
                }
                _ => Err(self.invalid("expected an integer color")),
            },
            EntryKind::Enum { .. } => {
                let variants = self.variants();
                match value.as_text() {
                    Some(name) if variants.contains(&name) => Ok(()),
                    _ => Err(self.invalid(format!(
                        "{value} is not one of {}",
                        variants.join(", ")
                    ))),
                }
            }
        }
    }

    fn invalid(&self, message: impl Into<String>) -> Error {
        Error::Validation {
            field: self.id().to_string(),
            message: message.into(),
        }
    }

    /// Loads the value stored in `node`. On failure the current value is
    /// kept and the error is returned for reporting.
    pub(crate) fn apply<N: ConfigNode>(&self, node: &N) -> Result<()> {
        let Some(value) = node.value() else {
            log::warn!("ignoring non-scalar node for entry `{}`", self.id());
            return Err(Error::Node {
                message: format!("entry `{}` expects a scalar or list value", self.id()),
            });
        };
        if value == self.value() {
            return Ok(());
        }
        self.set_value(value).inspect_err(|e| {
            log::warn!("keeping current value of entry `{}`: {e}", self.id());
        })
    }

    /// Stores the current value (and description) into `node`.
    pub(crate) fn fetch<N: ConfigNode>(&self, node: &mut N) -> Result<()> {
        node.set_value(self.value())?;
        if let Some(description) = self.description() {
            node.set_comment(description);
        }
        Ok(())
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("id", &self.id())
            .field("kind", &self.kind)
            .field("default", &self.default)
            .field("origin", &self.origin)
            .finish()
    }
}

/// The entries of one parent, in resolution order.
#[derive(Debug, Clone, Default)]
pub struct EntrySet {
    entries: Vec<Entry>,
}

impl EntrySet {
    pub(crate) fn insert(&mut self, entry: Entry, parent: &str) -> Result<()> {
        if self.get(entry.id()).is_some() {
            return Err(Error::DuplicateIdentifier {
                parent: parent.to_string(),
                id: entry.id().to_string(),
            });
        }
        self.entries.push(entry);
        Ok(())
    }

    /// Returns the entry with the given identifier.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id() == id)
    }

    /// Iterates over the entries in resolution order.
    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a EntrySet {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

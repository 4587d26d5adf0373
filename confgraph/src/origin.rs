//! Discovered configuration fields.

use std::fmt;
use std::rc::Rc;

use crate::error::Result;
use crate::schema::{Annotation, AnnotationKind, BoundField, ClassInfo, ContainerRef, FieldMeta};
use crate::value::{Value, ValueType};

/// Identity of a field bound to its owner.
///
/// Static fields are identified by declaring type and field; instance fields
/// additionally by the instance that owns them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OriginKey {
    class: ClassInfo,
    field: &'static str,
    instance: Option<ContainerRef>,
}

/// A handle to one qualifying field, before it becomes an entry.
///
/// The origin keeps its owning instance alive and reads and writes the field
/// through accessors bound to that instance.
#[derive(Clone)]
pub struct EntryOrigin {
    declaring: ClassInfo,
    instance: Option<ContainerRef>,
    field: &'static str,
    value_type: ValueType,
    type_arguments: Vec<ValueType>,
    meta: FieldMeta,
    getter: Rc<dyn Fn() -> Value>,
    setter: Rc<dyn Fn(Value) -> Result<()>>,
}

impl EntryOrigin {
    pub(crate) fn bind(declaring: ClassInfo, owner: &ContainerRef, field: &BoundField) -> Self {
        Self {
            declaring,
            instance: (!field.is_static).then(|| owner.clone()),
            field: field.id,
            value_type: field.value_type,
            type_arguments: field.type_arguments.clone(),
            meta: field.meta.clone(),
            getter: Rc::clone(&field.get),
            setter: Rc::clone(&field.set),
        }
    }

    /// Returns the deduplication key of this origin.
    #[must_use]
    pub fn key(&self) -> OriginKey {
        OriginKey {
            class: self.declaring,
            field: self.field,
            instance: self.instance.clone(),
        }
    }

    /// Returns the type that declares the field.
    #[must_use]
    pub const fn declaring_type(&self) -> ClassInfo {
        self.declaring
    }

    /// Returns the owning instance, or `None` for a static field.
    #[must_use]
    pub const fn instance(&self) -> Option<&ContainerRef> {
        self.instance.as_ref()
    }

    /// Returns `true` if the field is static.
    #[must_use]
    pub const fn is_static(&self) -> bool {
        self.instance.is_none()
    }

    /// Returns the field identifier.
    #[must_use]
    pub const fn field_id(&self) -> &'static str {
        self.field
    }

    /// Returns the declared type of the field.
    #[must_use]
    pub const fn value_type(&self) -> ValueType {
        self.value_type
    }

    /// Returns the generic type arguments of the declared type.
    #[must_use]
    pub fn type_arguments(&self) -> &[ValueType] {
        &self.type_arguments
    }

    /// Returns the field metadata.
    #[must_use]
    pub const fn meta(&self) -> &FieldMeta {
        &self.meta
    }

    /// Returns the first annotation of the given kind.
    #[must_use]
    pub fn annotation(&self, kind: AnnotationKind) -> Option<&Annotation> {
        self.meta.annotation(kind)
    }

    /// Reads the current value of the field.
    #[must_use]
    pub fn get(&self) -> Value {
        (self.getter)()
    }

    /// Writes a value to the field, running its setter and listeners.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Coercion`] if the value does not fit the
    /// declared type.
    pub fn set(&self, value: Value) -> Result<()> {
        (self.setter)(value)
    }
}

impl fmt::Display for EntryOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "field `{}` of {}", self.field, self.declaring)?;
        if self.is_static() {
            write!(f, " (static)")?;
        }
        Ok(())
    }
}

impl fmt::Debug for EntryOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntryOrigin")
            .field("declaring", &self.declaring)
            .field("instance", &self.instance)
            .field("field", &self.field)
            .field("value_type", &self.value_type)
            .field("type_arguments", &self.type_arguments)
            .field("meta", &self.meta)
            .finish_non_exhaustive()
    }
}

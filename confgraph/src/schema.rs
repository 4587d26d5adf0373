//! Declarative container schemas.
//!
//! A container describes its configuration members once, in
//! [`ConfigContainer::describe`]. The description plays the part of a class
//! declaration: it names the inclusion policy, the value fields with their
//! markers, the container-typed fields, nested classes and inherited classes.
//! The resolution engine (see [`crate::parent`]) binds a description to a
//! live instance and decides which members become entries.
//!
//! # Examples
//!
//! ```
//! use confgraph::schema::{ConfigContainer, Schema};
//!
//! #[derive(Default)]
//! struct Audio {
//!     volume: u8,
//!     muted: bool,
//! }
//!
//! impl ConfigContainer for Audio {
//!     fn describe(schema: &mut Schema<Self>) {
//!         schema.entry("volume", |a| &a.volume, |a| &mut a.volume).bounded(0, 100);
//!         schema.entry("muted", |a| &a.muted, |a| &mut a.muted).checkbox();
//!     }
//! }
//! ```

use std::any::{type_name, TypeId};
use std::cell::RefCell;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::rc::Rc;

use crate::error::Result;
use crate::value::{ConfigValue, Value, ValueType};

/// Shared, mutable handle to a container instance.
pub type Shared<C> = Rc<RefCell<C>>;

/// Wraps a container into a [`Shared`] handle.
#[must_use]
pub fn share<C>(container: C) -> Shared<C> {
    Rc::new(RefCell::new(container))
}

/// A user-defined structure whose members are configuration values.
pub trait ConfigContainer: 'static {
    /// Declares the members of this container type.
    fn describe(schema: &mut Schema<Self>)
    where
        Self: Sized;

    /// Returns the group this container forms, if any.
    ///
    /// Group containers are resolved into their own [`crate::Cluster`];
    /// plain containers contribute directly to the parent they are resolved
    /// into.
    fn group(&self) -> Option<Group> {
        None
    }

    /// Containers created at runtime that are resolved after this one.
    fn transitives(&self) -> Vec<ContainerRef> {
        Vec::new()
    }

    /// Called after one of this container's entries changed its value.
    fn on_update(&mut self, _field: &str) {}
}

/// Identity and description of a group container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    id: String,
    description: Option<String>,
}

impl Group {
    /// Creates a group with the given identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: None,
        }
    }

    /// Attaches a description to the group.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns the group identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the group description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// Which value fields of a class qualify as entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Inclusion {
    /// Only fields declared with [`Schema::entry`] qualify.
    #[default]
    Explicit,
    /// Every value field qualifies unless it is excluded or transient.
    All,
}

/// Marker attached to a value field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Marker {
    /// No marker.
    #[default]
    None,
    /// Explicitly marked as an entry.
    Entry,
    /// Explicitly excluded.
    Exclude,
    /// Marked transitive (only valid on container-typed members).
    Transitive,
}

/// Presentation and constraint metadata attached to a value field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Annotation {
    /// The value must lie within `min..=max`.
    Bounded {
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },
    /// Like `Bounded`, presented as a slider moving in `step` increments.
    Slider {
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
        /// Slider increment.
        step: f64,
    },
    /// An RGB integer, optionally with an alpha channel.
    Color {
        /// Whether the top byte carries alpha.
        alpha: bool,
    },
    /// A boolean presented as a checkbox instead of a toggle.
    Checkbox,
    /// An enumeration presented as a dropdown.
    Dropdown,
}

/// Discriminant of an [`Annotation`], used by transformation filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnnotationKind {
    /// [`Annotation::Bounded`].
    Bounded,
    /// [`Annotation::Slider`].
    Slider,
    /// [`Annotation::Color`].
    Color,
    /// [`Annotation::Checkbox`].
    Checkbox,
    /// [`Annotation::Dropdown`].
    Dropdown,
}

impl Annotation {
    /// Returns the discriminant of this annotation.
    #[must_use]
    pub const fn kind(&self) -> AnnotationKind {
        match self {
            Self::Bounded { .. } => AnnotationKind::Bounded,
            Self::Slider { .. } => AnnotationKind::Slider,
            Self::Color { .. } => AnnotationKind::Color,
            Self::Checkbox => AnnotationKind::Checkbox,
            Self::Dropdown => AnnotationKind::Dropdown,
        }
    }
}

/// Formats a value for display.
pub type Formatter = Rc<dyn Fn(&Value) -> String>;

/// Type-independent metadata of a value field.
#[derive(Clone, Default)]
pub struct FieldMeta {
    pub(crate) comment: Option<String>,
    pub(crate) requires_restart: bool,
    pub(crate) translation_key: Option<String>,
    pub(crate) annotations: Vec<Annotation>,
    pub(crate) formatter: Option<Formatter>,
}

impl FieldMeta {
    /// Returns the first annotation of the given kind.
    #[must_use]
    pub fn annotation(&self, kind: AnnotationKind) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.kind() == kind)
    }

    /// Returns all annotations in declaration order.
    #[must_use]
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Returns the field comment.
    #[must_use]
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Returns `true` if changing the field requires a restart.
    #[must_use]
    pub const fn requires_restart(&self) -> bool {
        self.requires_restart
    }

    /// Returns the explicit translation key.
    #[must_use]
    pub fn translation_key(&self) -> Option<&str> {
        self.translation_key.as_deref()
    }

    /// Returns the value formatter.
    #[must_use]
    pub fn formatter(&self) -> Option<&Formatter> {
        self.formatter.as_ref()
    }
}

impl fmt::Debug for FieldMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldMeta")
            .field("comment", &self.comment)
            .field("requires_restart", &self.requires_restart)
            .field("translation_key", &self.translation_key)
            .field("annotations", &self.annotations)
            .field("formatter", &self.formatter.is_some())
            .finish()
    }
}

/// The declaring type of a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClassInfo {
    id: TypeId,
    name: &'static str,
}

impl ClassInfo {
    /// Describes the type `C`.
    #[must_use]
    pub fn of<C: 'static>() -> Self {
        Self {
            id: TypeId::of::<C>(),
            name: type_name::<C>(),
        }
    }

    /// Returns the `TypeId` of the declaring type.
    #[must_use]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    /// Returns the Rust name of the declaring type.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Display for ClassInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

type Read<C> = Rc<dyn Fn(&C) -> Value>;
type Write<C> = Rc<dyn Fn(&mut C, Value) -> Result<()>>;
type Resolve<C> = Rc<dyn Fn(&C) -> ContainerRef>;

struct ValueField<C> {
    id: &'static str,
    marker: Marker,
    transient: bool,
    is_static: bool,
    value_type: ValueType,
    type_arguments: Vec<ValueType>,
    meta: FieldMeta,
    read: Read<C>,
    write: Write<C>,
    setter: Option<Write<C>>,
    on_change: Option<Rc<dyn Fn(&Value)>>,
}

struct ContainerField<C> {
    id: &'static str,
    transitive: bool,
    is_static: bool,
    resolve: Resolve<C>,
}

/// A class declared inside a container type.
#[derive(Clone)]
pub(crate) struct NestedClass {
    pub(crate) name: &'static str,
    pub(crate) transitive: bool,
    pub(crate) is_static: bool,
    pub(crate) instantiate: Option<fn() -> ContainerRef>,
}

struct ClassSchema<C> {
    info: ClassInfo,
    inclusion: Inclusion,
    fields: Vec<ValueField<C>>,
    containers: Vec<ContainerField<C>>,
    nested: Vec<NestedClass>,
}

impl<C: 'static> ClassSchema<C> {
    fn new<D: 'static>() -> Self {
        Self {
            info: ClassInfo::of::<D>(),
            inclusion: Inclusion::Explicit,
            fields: Vec::new(),
            containers: Vec::new(),
            nested: Vec::new(),
        }
    }

    /// Re-targets every instance accessor through a projection from `P`.
    fn project<P: 'static>(self, get: fn(&P) -> &C, get_mut: fn(&mut P) -> &mut C) -> ClassSchema<P> {
        let fields = self
            .fields
            .into_iter()
            .map(|field| {
                let read = field.read;
                let write = field.write;
                ValueField {
                    id: field.id,
                    marker: field.marker,
                    transient: field.transient,
                    is_static: field.is_static,
                    value_type: field.value_type,
                    type_arguments: field.type_arguments,
                    meta: field.meta,
                    read: Rc::new(move |p: &P| read(get(p))) as Read<P>,
                    write: Rc::new(move |p: &mut P, v: Value| write(get_mut(p), v)) as Write<P>,
                    setter: field.setter.map(|setter| {
                        Rc::new(move |p: &mut P, v: Value| setter(get_mut(p), v)) as Write<P>
                    }),
                    on_change: field.on_change,
                }
            })
            .collect();
        let containers = self
            .containers
            .into_iter()
            .map(|container| {
                let resolve = container.resolve;
                ContainerField {
                    id: container.id,
                    transitive: container.transitive,
                    is_static: container.is_static,
                    resolve: Rc::new(move |p: &P| resolve(get(p))) as Resolve<P>,
                }
            })
            .collect();
        ClassSchema {
            info: self.info,
            inclusion: self.inclusion,
            fields,
            containers,
            nested: self.nested,
        }
    }
}

/// The member declarations of a container type.
///
/// The first class of a schema is always the container's own type. Classes
/// added through [`Schema::extends`] follow it; their members keep their
/// original declaring type.
pub struct Schema<C> {
    classes: Vec<ClassSchema<C>>,
}

impl<C: ConfigContainer> Schema<C> {
    /// Builds the complete schema of `C`.
    #[must_use]
    pub fn of() -> Self {
        let mut schema = Self {
            classes: vec![ClassSchema::new::<C>()],
        };
        C::describe(&mut schema);
        schema
    }

    fn own(&mut self) -> &mut ClassSchema<C> {
        &mut self.classes[0]
    }

    /// Sets the inclusion policy of the container's own class.
    pub fn inclusion(&mut self, inclusion: Inclusion) -> &mut Self {
        self.own().inclusion = inclusion;
        self
    }

    /// Shorthand for `inclusion(Inclusion::All)`.
    pub fn include_all(&mut self) -> &mut Self {
        self.inclusion(Inclusion::All)
    }

    fn push_field<T: ConfigValue>(
        &mut self,
        id: &'static str,
        marker: Marker,
        read: Read<C>,
        write: Write<C>,
        is_static: bool,
    ) -> FieldBuilder<'_, C, T> {
        let fields = &mut self.own().fields;
        fields.push(ValueField {
            id,
            marker,
            transient: false,
            is_static,
            value_type: T::value_type(),
            type_arguments: T::type_arguments(),
            meta: FieldMeta::default(),
            read,
            write,
            setter: None,
            on_change: None,
        });
        let index = fields.len() - 1;
        FieldBuilder {
            field: &mut fields[index],
            _value: PhantomData,
        }
    }

    /// Declares an instance field explicitly marked as an entry.
    pub fn entry<T: ConfigValue>(
        &mut self,
        id: &'static str,
        get: fn(&C) -> &T,
        get_mut: fn(&mut C) -> &mut T,
    ) -> FieldBuilder<'_, C, T> {
        self.instance_field(id, Marker::Entry, get, get_mut)
    }

    /// Declares an unmarked instance field; it qualifies only under
    /// [`Inclusion::All`].
    pub fn field<T: ConfigValue>(
        &mut self,
        id: &'static str,
        get: fn(&C) -> &T,
        get_mut: fn(&mut C) -> &mut T,
    ) -> FieldBuilder<'_, C, T> {
        self.instance_field(id, Marker::None, get, get_mut)
    }

    fn instance_field<T: ConfigValue>(
        &mut self,
        id: &'static str,
        marker: Marker,
        get: fn(&C) -> &T,
        get_mut: fn(&mut C) -> &mut T,
    ) -> FieldBuilder<'_, C, T> {
        let read: Read<C> = Rc::new(move |c: &C| get(c).to_value());
        let write: Write<C> = Rc::new(move |c: &mut C, v: Value| {
            *get_mut(c) = T::from_value(v)?;
            Ok(())
        });
        self.push_field::<T>(id, marker, read, write, false)
    }

    /// Declares a static field explicitly marked as an entry.
    ///
    /// Static fields belong to the declaring type rather than an instance;
    /// they are only resolved when that type is the container's own type.
    pub fn static_entry<T: ConfigValue>(
        &mut self,
        id: &'static str,
        get: fn() -> T,
        set: fn(T),
    ) -> FieldBuilder<'_, C, T> {
        self.class_field(id, Marker::Entry, get, set)
    }

    /// Declares an unmarked static field.
    pub fn static_field<T: ConfigValue>(
        &mut self,
        id: &'static str,
        get: fn() -> T,
        set: fn(T),
    ) -> FieldBuilder<'_, C, T> {
        self.class_field(id, Marker::None, get, set)
    }

    fn class_field<T: ConfigValue>(
        &mut self,
        id: &'static str,
        marker: Marker,
        get: fn() -> T,
        set: fn(T),
    ) -> FieldBuilder<'_, C, T> {
        let read: Read<C> = Rc::new(move |_: &C| get().to_value());
        let write: Write<C> = Rc::new(move |_: &mut C, v: Value| {
            set(T::from_value(v)?);
            Ok(())
        });
        self.push_field::<T>(id, marker, read, write, true)
    }

    /// Declares a container-typed field that is not transitive.
    ///
    /// Such fields are never entries and are not resolved; call
    /// [`ContainerBuilder::transitive`] to resolve them.
    pub fn container<N: ConfigContainer>(
        &mut self,
        id: &'static str,
        get: fn(&C) -> &Shared<N>,
    ) -> ContainerBuilder<'_, C> {
        let resolve: Resolve<C> = Rc::new(move |c: &C| ContainerRef::from(Rc::clone(get(c))));
        self.push_container(id, resolve, false)
    }

    /// Declares a transitive container-typed field.
    pub fn transitive<N: ConfigContainer>(
        &mut self,
        id: &'static str,
        get: fn(&C) -> &Shared<N>,
    ) -> ContainerBuilder<'_, C> {
        self.container(id, get).transitive()
    }

    /// Declares a transitive static container-typed field.
    pub fn transitive_static<N: ConfigContainer>(
        &mut self,
        id: &'static str,
        get: fn() -> Shared<N>,
    ) -> ContainerBuilder<'_, C> {
        let resolve: Resolve<C> = Rc::new(move |_: &C| ContainerRef::from(get()));
        self.push_container(id, resolve, true).transitive()
    }

    fn push_container(
        &mut self,
        id: &'static str,
        resolve: Resolve<C>,
        is_static: bool,
    ) -> ContainerBuilder<'_, C> {
        let containers = &mut self.own().containers;
        containers.push(ContainerField {
            id,
            transitive: false,
            is_static,
            resolve,
        });
        let index = containers.len() - 1;
        ContainerBuilder {
            field: &mut containers[index],
        }
    }

    /// Declares a nested container class. Declaration order matters:
    /// transitive nested classes are resolved last-declared first.
    pub fn nested<N: ConfigContainer + Default>(&mut self) -> NestedBuilder<'_> {
        self.push_nested(type_name::<N>(), Some(instantiate::<N>))
    }

    /// Declares a nested class that is not a config container.
    pub fn nested_type<T: 'static>(&mut self) -> NestedBuilder<'_> {
        self.push_nested(type_name::<T>(), None)
    }

    fn push_nested(
        &mut self,
        name: &'static str,
        instantiate: Option<fn() -> ContainerRef>,
    ) -> NestedBuilder<'_> {
        let nested = &mut self.own().nested;
        nested.push(NestedClass {
            name,
            transitive: false,
            is_static: true,
            instantiate,
        });
        let index = nested.len() - 1;
        NestedBuilder {
            class: &mut nested[index],
        }
    }

    /// Inherits the classes of `B`, reached through the given projection.
    ///
    /// Members of `B` keep `B` as their declaring type. Static members of an
    /// inherited class are not resolved for `C` instances.
    pub fn extends<B: ConfigContainer>(
        &mut self,
        get: fn(&C) -> &B,
        get_mut: fn(&mut C) -> &mut B,
    ) -> &mut Self {
        let base = Schema::<B>::of();
        self.classes
            .extend(base.classes.into_iter().map(|class| class.project(get, get_mut)));
        self
    }

    /// Returns the number of classes (own type plus inherited types).
    #[must_use]
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }
}

fn instantiate<N: ConfigContainer + Default>() -> ContainerRef {
    ContainerRef::new(N::default())
}

/// Modifies a value field declaration.
pub struct FieldBuilder<'a, C, T> {
    field: &'a mut ValueField<C>,
    _value: PhantomData<T>,
}

impl<C: ConfigContainer, T: ConfigValue> FieldBuilder<'_, C, T> {
    /// Marks the field as explicitly excluded.
    pub fn exclude(self) -> Self {
        self.field.marker = Marker::Exclude;
        self
    }

    /// Marks the field as transient; include-all classes skip it.
    pub fn transient(self) -> Self {
        self.field.transient = true;
        self
    }

    /// Marks the field transitive. Value fields cannot be transitive, so
    /// resolving the container fails.
    pub fn transitive(self) -> Self {
        self.field.marker = Marker::Transitive;
        self
    }

    /// Attaches a description.
    pub fn comment(self, comment: impl Into<String>) -> Self {
        self.field.meta.comment = Some(comment.into());
        self
    }

    /// Flags the field as requiring a restart when changed.
    pub fn requires_restart(self) -> Self {
        self.field.meta.requires_restart = true;
        self
    }

    /// Overrides the display-name translation key.
    pub fn translation_key(self, key: impl Into<String>) -> Self {
        self.field.meta.translation_key = Some(key.into());
        self
    }

    /// Constrains a numeric field to `min..=max`.
    pub fn bounded(self, min: impl Into<f64>, max: impl Into<f64>) -> Self {
        self.annotate(Annotation::Bounded {
            min: min.into(),
            max: max.into(),
        })
    }

    /// Constrains a numeric field to `min..=max`, presented as a slider.
    pub fn slider(self, min: impl Into<f64>, max: impl Into<f64>, step: impl Into<f64>) -> Self {
        self.annotate(Annotation::Slider {
            min: min.into(),
            max: max.into(),
            step: step.into(),
        })
    }

    /// Presents an integer field as a color.
    pub fn color(self, alpha: bool) -> Self {
        self.annotate(Annotation::Color { alpha })
    }

    /// Presents a boolean field as a checkbox.
    pub fn checkbox(self) -> Self {
        self.annotate(Annotation::Checkbox)
    }

    /// Presents an enumeration field as a dropdown.
    pub fn dropdown(self) -> Self {
        self.annotate(Annotation::Dropdown)
    }

    /// Attaches an arbitrary annotation.
    pub fn annotate(self, annotation: Annotation) -> Self {
        self.field.meta.annotations.push(annotation);
        self
    }

    /// Routes writes through `setter` instead of assigning the field.
    pub fn setter(self, setter: fn(&mut C, T)) -> Self {
        self.field.setter = Some(Rc::new(move |c: &mut C, v: Value| {
            setter(c, T::from_value(v)?);
            Ok(())
        }));
        self
    }

    /// Calls `callback` with every value successfully written to the field.
    pub fn on_change(self, callback: fn(&T)) -> Self {
        self.field.on_change = Some(Rc::new(move |v: &Value| {
            if let Ok(value) = T::from_value(v.clone()) {
                callback(&value);
            }
        }));
        self
    }

    /// Formats values of this field for display.
    pub fn formatter(self, format: fn(&T) -> String) -> Self {
        self.field.meta.formatter = Some(Rc::new(move |v: &Value| {
            T::from_value(v.clone()).map_or_else(|_| v.to_string(), |value| format(&value))
        }));
        self
    }
}

/// Modifies a container-typed field declaration.
pub struct ContainerBuilder<'a, C> {
    field: &'a mut ContainerField<C>,
}

impl<C> ContainerBuilder<'_, C> {
    /// Marks the field transitive so that it is resolved.
    pub fn transitive(self) -> Self {
        self.field.transitive = true;
        self
    }
}

/// Modifies a nested class declaration.
pub struct NestedBuilder<'a> {
    class: &'a mut NestedClass,
}

impl NestedBuilder<'_> {
    /// Marks the nested class transitive so that it is instantiated and
    /// resolved.
    pub fn transitive(self) -> Self {
        self.class.transitive = true;
        self
    }

    /// Declares the nested class as an inner (non-static) class.
    pub fn inner(self) -> Self {
        self.class.is_static = false;
        self
    }
}

/// A type-erased handle to a container instance.
///
/// Two handles are equal when they point to the same instance.
#[derive(Clone)]
pub struct ContainerRef {
    inner: Rc<dyn Binding>,
}

impl ContainerRef {
    /// Wraps a freshly created container.
    #[must_use]
    pub fn new<C: ConfigContainer>(container: C) -> Self {
        Self::from(share(container))
    }

    /// Returns the Rust name of the container type.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.inner.type_name()
    }

    pub(crate) fn group(&self) -> Option<Group> {
        self.inner.group()
    }

    pub(crate) fn transitives(&self) -> Vec<ContainerRef> {
        self.inner.transitives()
    }

    pub(crate) fn bind(&self) -> Vec<BoundClass> {
        Rc::clone(&self.inner).bind()
    }

    fn address(&self) -> *const () {
        Rc::as_ptr(&self.inner).cast::<()>()
    }
}

impl<C: ConfigContainer> From<Shared<C>> for ContainerRef {
    fn from(handle: Shared<C>) -> Self {
        Self { inner: handle }
    }
}

impl PartialEq for ContainerRef {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.address(), other.address())
    }
}

impl Eq for ContainerRef {}

impl Hash for ContainerRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.address().hash(state);
    }
}

impl fmt::Debug for ContainerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{:p}", self.type_name(), self.address())
    }
}

/// A value field bound to a live instance.
pub(crate) struct BoundField {
    pub(crate) id: &'static str,
    pub(crate) marker: Marker,
    pub(crate) transient: bool,
    pub(crate) is_static: bool,
    pub(crate) value_type: ValueType,
    pub(crate) type_arguments: Vec<ValueType>,
    pub(crate) meta: FieldMeta,
    pub(crate) get: Rc<dyn Fn() -> Value>,
    pub(crate) set: Rc<dyn Fn(Value) -> Result<()>>,
}

/// A container-typed field bound to a live instance.
pub(crate) struct BoundContainer {
    pub(crate) id: &'static str,
    pub(crate) transitive: bool,
    pub(crate) is_static: bool,
    pub(crate) resolve: Box<dyn Fn() -> ContainerRef>,
}

/// One class of a container bound to a live instance.
pub(crate) struct BoundClass {
    pub(crate) info: ClassInfo,
    pub(crate) own: bool,
    pub(crate) inclusion: Inclusion,
    pub(crate) fields: Vec<BoundField>,
    pub(crate) containers: Vec<BoundContainer>,
    pub(crate) nested: Vec<NestedClass>,
}

trait Binding {
    fn type_name(&self) -> &'static str;
    fn group(&self) -> Option<Group>;
    fn transitives(&self) -> Vec<ContainerRef>;
    fn bind(self: Rc<Self>) -> Vec<BoundClass>;
}

impl<C: ConfigContainer> Binding for RefCell<C> {
    fn type_name(&self) -> &'static str {
        type_name::<C>()
    }

    fn group(&self) -> Option<Group> {
        self.borrow().group()
    }

    fn transitives(&self) -> Vec<ContainerRef> {
        self.borrow().transitives()
    }

    fn bind(self: Rc<Self>) -> Vec<BoundClass> {
        Schema::<C>::of()
            .classes
            .into_iter()
            .enumerate()
            .map(|(index, class)| BoundClass {
                info: class.info,
                own: index == 0,
                inclusion: class.inclusion,
                fields: class
                    .fields
                    .into_iter()
                    .map(|field| bind_field(&self, field))
                    .collect(),
                containers: class
                    .containers
                    .into_iter()
                    .map(|container| {
                        let instance = Rc::clone(&self);
                        let resolve = container.resolve;
                        BoundContainer {
                            id: container.id,
                            transitive: container.transitive,
                            is_static: container.is_static,
                            resolve: Box::new(move || resolve(&*instance.borrow())),
                        }
                    })
                    .collect(),
                nested: class.nested,
            })
            .collect()
    }
}

fn bind_field<C: ConfigContainer>(instance: &Shared<C>, field: ValueField<C>) -> BoundField {
    let id = field.id;
    let read = field.read;
    let reader = Rc::clone(instance);
    let assign = field.setter.unwrap_or(field.write);
    let on_change = field.on_change;
    let writer = Rc::clone(instance);
    BoundField {
        id,
        marker: field.marker,
        transient: field.transient,
        is_static: field.is_static,
        value_type: field.value_type,
        type_arguments: field.type_arguments,
        meta: field.meta,
        get: Rc::new(move || read(&*reader.borrow())),
        set: Rc::new(move |value: Value| {
            let mut container = writer.borrow_mut();
            assign(&mut *container, value.clone())?;
            if let Some(callback) = &on_change {
                callback(&value);
            }
            container.on_update(id);
            Ok(())
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Base {
        shared: i32,
    }

    impl ConfigContainer for Base {
        fn describe(schema: &mut Schema<Self>) {
            schema.entry("shared", |b| &b.shared, |b| &mut b.shared);
        }
    }

    #[derive(Default)]
    struct Derived {
        base: Base,
        own: bool,
        updates: Vec<String>,
    }

    impl ConfigContainer for Derived {
        fn describe(schema: &mut Schema<Self>) {
            schema
                .include_all()
                .extends(|d| &d.base, |d| &mut d.base);
            schema
                .field("own", |d| &d.own, |d| &mut d.own)
                .comment("own flag")
                .checkbox();
        }

        fn on_update(&mut self, field: &str) {
            self.updates.push(field.to_string());
        }
    }

    #[test]
    fn test_schema_classes_own_first() {
        let schema = Schema::<Derived>::of();
        assert_eq!(schema.class_count(), 2);
        assert_eq!(schema.classes[0].info, ClassInfo::of::<Derived>());
        assert_eq!(schema.classes[0].inclusion, Inclusion::All);
        assert_eq!(schema.classes[1].info, ClassInfo::of::<Base>());
        assert_eq!(schema.classes[1].inclusion, Inclusion::Explicit);
    }

    #[test]
    fn test_field_metadata_recorded() {
        let schema = Schema::<Derived>::of();
        let field = &schema.classes[0].fields[0];
        assert_eq!(field.id, "own");
        assert_eq!(field.marker, Marker::None);
        assert_eq!(field.meta.comment(), Some("own flag"));
        assert!(field.meta.annotation(AnnotationKind::Checkbox).is_some());
        assert!(field.meta.annotation(AnnotationKind::Bounded).is_none());
    }

    #[test]
    fn test_bound_accessors_go_through_projection() {
        let handle = share(Derived::default());
        let container = ContainerRef::from(Rc::clone(&handle));
        let classes = container.bind();
        let inherited = &classes[1].fields[0];
        assert!(!classes[1].own);

        (inherited.set)(Value::Integer(7)).unwrap();
        assert_eq!(handle.borrow().base.shared, 7);
        assert_eq!((inherited.get)(), Value::Integer(7));
        assert_eq!(handle.borrow().updates, vec!["shared".to_string()]);
    }

    #[test]
    fn test_bound_setter_rejects_wrong_shape() {
        let container = ContainerRef::new(Derived::default());
        let classes = container.bind();
        let own = &classes[0].fields[0];
        assert!((own.set)(Value::Text("yes".into())).is_err());
        assert_eq!((own.get)(), Value::Bool(false));
    }

    #[test]
    fn test_container_ref_identity() {
        let handle = share(Base::default());
        let a = ContainerRef::from(Rc::clone(&handle));
        let b = ContainerRef::from(handle);
        let c = ContainerRef::new(Base::default());
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.type_name().ends_with("Base"));
    }

    #[test]
    fn test_group_builder() {
        let group = Group::new("video").with_description("Video settings");
        assert_eq!(group.id(), "video");
        assert_eq!(group.description(), Some("Video settings"));
    }
}

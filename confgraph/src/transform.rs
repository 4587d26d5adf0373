//! Transformations: rules that turn field origins into entries.
//!
//! A [`Transformation`] pairs a predicate over [`EntryOrigin`]s with a
//! factory producing the [`Entry`]. The registry keeps them in an ordered
//! list and, for each origin, uses the last registered transformation whose
//! predicate matches. Later registrations therefore override earlier ones,
//! which is how [`DataExtension`]s specialize the built-in [`defaults`].
//!
//! # Examples
//!
//! ```
//! use confgraph::transform::Transformation;
//! use confgraph::schema::AnnotationKind;
//! use confgraph::Entry;
//!
//! let checkbox = Transformation::filter()
//!     .by_type::<bool>()
//!     .by_annotation(AnnotationKind::Checkbox)
//!     .transform(|origin| Entry::boolean(origin, true));
//! # let _ = checkbox;
//! ```

use std::fmt;
use std::rc::Rc;

use crate::entry::Entry;
use crate::origin::EntryOrigin;
use crate::schema::{Annotation, AnnotationKind};
use crate::value::ValueKind;

type Predicate = Rc<dyn Fn(&EntryOrigin) -> bool>;
type Factory = Rc<dyn Fn(EntryOrigin) -> Entry>;

/// A rule turning matching origins into entries.
#[derive(Clone)]
pub struct Transformation {
    predicate: Predicate,
    factory: Factory,
}

impl Transformation {
    /// Creates a transformation from a predicate and a factory.
    pub fn new(
        predicate: impl Fn(&EntryOrigin) -> bool + 'static,
        factory: impl Fn(EntryOrigin) -> Entry + 'static,
    ) -> Self {
        Self {
            predicate: Rc::new(predicate),
            factory: Rc::new(factory),
        }
    }

    /// Starts a filter whose conditions must all hold.
    #[must_use]
    pub fn filter() -> Filter {
        Filter::default()
    }

    /// Returns `true` if this transformation handles `origin`.
    #[must_use]
    pub fn matches(&self, origin: &EntryOrigin) -> bool {
        (self.predicate)(origin)
    }

    /// Produces the entry for `origin`.
    #[must_use]
    pub fn apply(&self, origin: EntryOrigin) -> Entry {
        (self.factory)(origin)
    }
}

impl fmt::Debug for Transformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transformation").finish_non_exhaustive()
    }
}

/// Builds the predicate of a [`Transformation`] from conditions that must
/// all hold.
#[derive(Clone, Default)]
pub struct Filter {
    conditions: Vec<Predicate>,
}

impl Filter {
    /// Requires the declared type to be exactly `T`.
    #[must_use]
    pub fn by_type<T: 'static>(self) -> Self {
        self.by_predicate(|origin| origin.value_type().is::<T>())
    }

    /// Requires the declared type's kind to satisfy `test`.
    #[must_use]
    pub fn by_kind(self, test: fn(ValueKind) -> bool) -> Self {
        self.by_predicate(move |origin| test(origin.value_type().kind()))
    }

    /// Requires a numeric (integer or float) declared type.
    #[must_use]
    pub fn numeric(self) -> Self {
        self.by_predicate(|origin| origin.value_type().is_numeric())
    }

    /// Requires the first type argument (the element type of a list) to be `T`.
    #[must_use]
    pub fn by_element_type<T: 'static>(self) -> Self {
        self.by_predicate(|origin| {
            origin
                .type_arguments()
                .first()
                .is_some_and(|arg| arg.is::<T>())
        })
    }

    /// Requires an annotation of the given kind.
    #[must_use]
    pub fn by_annotation(self, kind: AnnotationKind) -> Self {
        self.by_predicate(move |origin| origin.annotation(kind).is_some())
    }

    /// Adds an arbitrary condition.
    #[must_use]
    pub fn by_predicate(mut self, condition: impl Fn(&EntryOrigin) -> bool + 'static) -> Self {
        self.conditions.push(Rc::new(condition));
        self
    }

    /// Returns `true` if every condition holds for `origin`.
    #[must_use]
    pub fn matches(&self, origin: &EntryOrigin) -> bool {
        self.conditions.iter().all(|condition| condition(origin))
    }

    /// Completes the transformation with its entry factory.
    pub fn transform(self, factory: impl Fn(EntryOrigin) -> Entry + 'static) -> Transformation {
        Transformation::new(move |origin| self.matches(origin), factory)
    }
}

/// A provider of additional transformations.
///
/// Extensions are registered on [`crate::ConfigRegistry::builder`]; their
/// transformations are appended after the defaults and after the
/// extensions registered before them.
pub trait DataExtension {
    /// Returns the transformations contributed by this extension.
    fn transformations(&self) -> Vec<Transformation>;
}

/// The built-in transformations, in registration order.
///
/// Every bool, integer, float, string and list field gets at least a plain
/// entry. Booleans, bounded and slider numbers, colors and enumerations are
/// then specialized by the rules that follow. Custom types have no default.
#[must_use]
pub fn defaults() -> Vec<Transformation> {
    vec![
        Transformation::filter()
            .by_kind(|kind| {
                matches!(
                    kind,
                    ValueKind::Bool
                        | ValueKind::Integer
                        | ValueKind::Float
                        | ValueKind::Text
                        | ValueKind::List
                )
            })
            .transform(Entry::plain),
        Transformation::filter()
            .by_kind(|kind| kind == ValueKind::Bool)
            .transform(|origin| Entry::boolean(origin, false)),
        Transformation::filter()
            .by_kind(|kind| kind == ValueKind::Bool)
            .by_annotation(AnnotationKind::Checkbox)
            .transform(|origin| Entry::boolean(origin, true)),
        Transformation::filter()
            .numeric()
            .by_annotation(AnnotationKind::Bounded)
            .transform(|origin| match origin.annotation(AnnotationKind::Bounded).copied() {
                Some(Annotation::Bounded { min, max }) => Entry::bounded(origin, min, max),
                _ => Entry::plain(origin),
            }),
        Transformation::filter()
            .numeric()
            .by_annotation(AnnotationKind::Slider)
            .transform(|origin| match origin.annotation(AnnotationKind::Slider).copied() {
                Some(Annotation::Slider { min, max, step }) => {
                    Entry::slider(origin, min, max, step)
                }
                _ => Entry::plain(origin),
            }),
        Transformation::filter()
            .by_kind(|kind| matches!(kind, ValueKind::Enum(_)))
            .transform(|origin| Entry::enumeration(origin, false)),
        Transformation::filter()
            .by_kind(|kind| matches!(kind, ValueKind::Enum(_)))
            .by_annotation(AnnotationKind::Dropdown)
            .transform(|origin| Entry::enumeration(origin, true)),
        Transformation::filter()
            .by_kind(|kind| kind == ValueKind::Integer)
            .by_annotation(AnnotationKind::Color)
            .transform(|origin| match origin.annotation(AnnotationKind::Color).copied() {
                Some(Annotation::Color { alpha }) => Entry::color(origin, alpha),
                _ => Entry::plain(origin),
            }),
    ]
}

//! Fixture containers covering the inclusion, inheritance and transitive
//! rules of the resolution engine.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use confgraph::schema::{ConfigContainer, Group, Schema};
use confgraph::{share, ContainerRef, Shared};

// =============================================================================
// Plain entries and inclusion policies
// =============================================================================

/// One explicitly marked boolean entry.
#[derive(Default)]
pub struct WithEntry {
    pub value: bool,
}

impl ConfigContainer for WithEntry {
    fn describe(schema: &mut Schema<Self>) {
        schema.entry("value", |c| &c.value, |c| &mut c.value);
    }
}

/// One explicitly marked entry with another identifier.
#[derive(Default)]
pub struct WithOtherEntry {
    pub other: bool,
}

impl ConfigContainer for WithOtherEntry {
    fn describe(schema: &mut Schema<Self>) {
        schema.entry("other", |c| &c.other, |c| &mut c.other);
    }
}

/// One unmarked field under the explicit policy.
#[derive(Default)]
pub struct WithField {
    pub value: bool,
}

impl ConfigContainer for WithField {
    fn describe(schema: &mut Schema<Self>) {
        schema.field("value", |c| &c.value, |c| &mut c.value);
    }
}

/// One unmarked field under the include-all policy.
#[derive(Default)]
pub struct IncludingWithField {
    pub value: bool,
}

impl ConfigContainer for IncludingWithField {
    fn describe(schema: &mut Schema<Self>) {
        schema.include_all();
        schema.field("value", |c| &c.value, |c| &mut c.value);
    }
}

/// An excluded field under the include-all policy.
#[derive(Default)]
pub struct IncludingWithExcluded {
    pub value: bool,
}

impl ConfigContainer for IncludingWithExcluded {
    fn describe(schema: &mut Schema<Self>) {
        schema.include_all();
        schema.field("value", |c| &c.value, |c| &mut c.value).exclude();
    }
}

/// A transient field under the include-all policy.
#[derive(Default)]
pub struct IncludingWithTransient {
    pub value: bool,
}

impl ConfigContainer for IncludingWithTransient {
    fn describe(schema: &mut Schema<Self>) {
        schema.include_all();
        schema.field("value", |c| &c.value, |c| &mut c.value).transient();
    }
}

/// A non-transitive container field under the include-all policy.
pub struct IncludingWithContainer {
    pub inner: Shared<WithEntry>,
}

impl Default for IncludingWithContainer {
    fn default() -> Self {
        Self {
            inner: share(WithEntry::default()),
        }
    }
}

impl ConfigContainer for IncludingWithContainer {
    fn describe(schema: &mut Schema<Self>) {
        schema.include_all();
        schema.container("inner", |c| &c.inner);
    }
}

// =============================================================================
// Groups and transitive fields
// =============================================================================

/// A group holding one integer entry.
#[derive(Default)]
pub struct GroupWithEntry {
    pub number: i32,
}

impl ConfigContainer for GroupWithEntry {
    fn describe(schema: &mut Schema<Self>) {
        schema.entry("number", |g| &g.number, |g| &mut g.number);
    }

    fn group(&self) -> Option<Group> {
        Some(Group::new("group").with_description("A group"))
    }
}

/// A transitive field holding a plain container.
pub struct WithContainerWithEntry {
    pub inner: Shared<WithOtherEntry>,
}

impl Default for WithContainerWithEntry {
    fn default() -> Self {
        Self {
            inner: share(WithOtherEntry::default()),
        }
    }
}

impl ConfigContainer for WithContainerWithEntry {
    fn describe(schema: &mut Schema<Self>) {
        schema.transitive("inner", |c| &c.inner);
    }
}

/// A transitive field holding a group.
pub struct WithGroupWithEntry {
    pub group: Shared<GroupWithEntry>,
}

impl Default for WithGroupWithEntry {
    fn default() -> Self {
        Self {
            group: share(GroupWithEntry::default()),
        }
    }
}

impl ConfigContainer for WithGroupWithEntry {
    fn describe(schema: &mut Schema<Self>) {
        schema.transitive("group", |c| &c.group);
    }
}

/// One explicit boolean entry next to a group field: the basic scenario.
pub struct Scenario {
    pub enabled: bool,
    pub group: Shared<GroupWithEntry>,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            enabled: true,
            group: share(GroupWithEntry { number: 3 }),
        }
    }
}

impl ConfigContainer for Scenario {
    fn describe(schema: &mut Schema<Self>) {
        schema
            .entry("enabled", |s| &s.enabled, |s| &mut s.enabled)
            .comment("Turns the feature on");
        schema.transitive("group", |s| &s.group);
    }
}

/// A value field wrongly marked transitive.
#[derive(Default)]
pub struct WithTransitiveValue {
    pub value: bool,
}

impl ConfigContainer for WithTransitiveValue {
    fn describe(schema: &mut Schema<Self>) {
        schema.field("value", |c| &c.value, |c| &mut c.value).transitive();
    }
}

// =============================================================================
// Inheritance and static members
// =============================================================================

/// Inherits an explicit entry.
#[derive(Default)]
pub struct SubclassOfWithEntry {
    pub base: WithEntry,
}

impl ConfigContainer for SubclassOfWithEntry {
    fn describe(schema: &mut Schema<Self>) {
        schema.extends(|c| &c.base, |c| &mut c.base);
    }
}

/// Inherits a transitive instance field.
#[derive(Default)]
pub struct SubclassOfWithContainerWithEntry {
    pub base: WithContainerWithEntry,
}

impl ConfigContainer for SubclassOfWithContainerWithEntry {
    fn describe(schema: &mut Schema<Self>) {
        schema.extends(|c| &c.base, |c| &mut c.base);
    }
}

thread_local! {
    static STATIC_FLAG: Cell<bool> = const { Cell::new(false) };
    static STATIC_INNER: Shared<WithEntry> = share(WithEntry::default());
}

/// Reads the static flag of [`WithStaticEntry`].
pub fn static_flag() -> bool {
    STATIC_FLAG.with(Cell::get)
}

fn set_static_flag(value: bool) {
    STATIC_FLAG.with(|flag| flag.set(value));
}

/// Declares a static entry.
#[derive(Default)]
pub struct WithStaticEntry;

impl ConfigContainer for WithStaticEntry {
    fn describe(schema: &mut Schema<Self>) {
        schema.static_entry("flag", static_flag, set_static_flag);
    }
}

/// Inherits a static entry.
#[derive(Default)]
pub struct SubclassOfWithStaticEntry {
    pub base: WithStaticEntry,
}

impl ConfigContainer for SubclassOfWithStaticEntry {
    fn describe(schema: &mut Schema<Self>) {
        schema.extends(|c| &c.base, |c| &mut c.base);
    }
}

fn static_inner() -> Shared<WithEntry> {
    STATIC_INNER.with(Rc::clone)
}

/// Declares a static transitive container field.
#[derive(Default)]
pub struct WithStaticContainerWithEntry;

impl ConfigContainer for WithStaticContainerWithEntry {
    fn describe(schema: &mut Schema<Self>) {
        schema.transitive_static("inner", static_inner);
    }
}

/// Inherits a static transitive container field.
#[derive(Default)]
pub struct SubclassOfWithStaticContainerWithEntry {
    pub base: WithStaticContainerWithEntry,
}

impl ConfigContainer for SubclassOfWithStaticContainerWithEntry {
    fn describe(schema: &mut Schema<Self>) {
        schema.extends(|c| &c.base, |c| &mut c.base);
    }
}

// =============================================================================
// Runtime transitives and nested classes
// =============================================================================

/// Registers a plain container at runtime.
#[derive(Default)]
pub struct RegisteringContainerWithEntry;

impl ConfigContainer for RegisteringContainerWithEntry {
    fn describe(_schema: &mut Schema<Self>) {}

    fn transitives(&self) -> Vec<ContainerRef> {
        vec![ContainerRef::new(WithEntry::default())]
    }
}

/// Registers a group at runtime.
#[derive(Default)]
pub struct RegisteringGroupWithEntry;

impl ConfigContainer for RegisteringGroupWithEntry {
    fn describe(_schema: &mut Schema<Self>) {}

    fn transitives(&self) -> Vec<ContainerRef> {
        vec![ContainerRef::new(GroupWithEntry::default())]
    }
}

/// Nests a static container class.
#[derive(Default)]
pub struct NestingStaticContainerWithEntry;

impl ConfigContainer for NestingStaticContainerWithEntry {
    fn describe(schema: &mut Schema<Self>) {
        schema.nested::<WithEntry>().transitive();
    }
}

/// A nested type that is not a container.
pub struct PlainClass;

/// Nests a transitive class that is not a container.
#[derive(Default)]
pub struct NestingStaticClass;

impl ConfigContainer for NestingStaticClass {
    fn describe(schema: &mut Schema<Self>) {
        schema.nested_type::<PlainClass>().transitive();
    }
}

/// Nests a transitive inner (non-static) container class.
#[derive(Default)]
pub struct NestingInnerContainer;

impl ConfigContainer for NestingInnerContainer {
    fn describe(schema: &mut Schema<Self>) {
        schema.nested::<WithEntry>().transitive().inner();
    }
}

/// First nested group, declared first.
#[derive(Default)]
pub struct GroupA {
    pub a: bool,
}

impl ConfigContainer for GroupA {
    fn describe(schema: &mut Schema<Self>) {
        schema.entry("a", |g| &g.a, |g| &mut g.a);
    }

    fn group(&self) -> Option<Group> {
        Some(Group::new("a"))
    }
}

/// Second nested group, declared second.
#[derive(Default)]
pub struct GroupB {
    pub b: bool,
}

impl ConfigContainer for GroupB {
    fn describe(schema: &mut Schema<Self>) {
        schema.entry("b", |g| &g.b, |g| &mut g.b);
    }

    fn group(&self) -> Option<Group> {
        Some(Group::new("b"))
    }
}

/// Nests two transitive groups, A then B.
#[derive(Default)]
pub struct NestingTwoGroups;

impl ConfigContainer for NestingTwoGroups {
    fn describe(schema: &mut Schema<Self>) {
        schema.nested::<GroupA>().transitive();
        schema.nested::<GroupB>().transitive();
    }
}

/// A group without entries.
#[derive(Default)]
pub struct EmptyGroup;

impl ConfigContainer for EmptyGroup {
    fn describe(_schema: &mut Schema<Self>) {}

    fn group(&self) -> Option<Group> {
        Some(Group::new("empty"))
    }
}

// =============================================================================
// Listeners
// =============================================================================

/// Routes writes through a setter that stores the value.
#[derive(Default)]
pub struct SetterListener {
    pub value: bool,
    pub setter_calls: u32,
}

impl ConfigContainer for SetterListener {
    fn describe(schema: &mut Schema<Self>) {
        schema
            .entry("value", |c| &c.value, |c| &mut c.value)
            .setter(|c, value| {
                c.setter_calls += 1;
                c.value = value;
            });
    }
}

/// Routes writes through a setter that ignores them.
#[derive(Default)]
pub struct EmptySetterListener {
    pub value: bool,
}

impl ConfigContainer for EmptySetterListener {
    fn describe(schema: &mut Schema<Self>) {
        schema
            .entry("value", |c| &c.value, |c| &mut c.value)
            .setter(|_, _| {});
    }
}

/// Records every entry update.
#[derive(Default)]
pub struct ContainerListener {
    pub value: bool,
    pub updates: Vec<String>,
}

impl ConfigContainer for ContainerListener {
    fn describe(schema: &mut Schema<Self>) {
        schema.entry("value", |c| &c.value, |c| &mut c.value);
    }

    fn on_update(&mut self, field: &str) {
        self.updates.push(field.to_string());
    }
}

thread_local! {
    static CHANGES: RefCell<Vec<i32>> = const { RefCell::new(Vec::new()) };
}

fn record_change(value: &i32) {
    CHANGES.with(|changes| changes.borrow_mut().push(*value));
}

/// Returns and clears the values seen by [`ChangeListener`].
pub fn take_changes() -> Vec<i32> {
    CHANGES.with(|changes| changes.take())
}

/// Reports every change through an `on_change` callback.
#[derive(Default)]
pub struct ChangeListener {
    pub level: i32,
}

impl ConfigContainer for ChangeListener {
    fn describe(schema: &mut Schema<Self>) {
        schema
            .entry("level", |c| &c.level, |c| &mut c.level)
            .bounded(0, 10)
            .on_change(record_change);
    }
}

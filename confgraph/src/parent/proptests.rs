//! Property-based tests for the apply/fetch protocol.

use super::*;
use crate::schema::{share, ConfigContainer, Schema, Shared};
use crate::value::Value;
use proptest::prelude::*;

#[derive(Default, Clone, Debug, PartialEq)]
struct Profile {
    level: i32,
    enabled: bool,
    name: String,
}

impl ConfigContainer for Profile {
    fn describe(schema: &mut Schema<Self>) {
        schema.include_all();
        schema
            .field("level", |p| &p.level, |p| &mut p.level)
            .bounded(-1000, 1000);
        schema.field("enabled", |p| &p.enabled, |p| &mut p.enabled);
        schema.field("name", |p| &p.name, |p| &mut p.name);
    }
}

fn tree(profile: Profile) -> (Shared<Profile>, Parent) {
    let mut registry = ConfigRegistry::new();
    let mut parent = Parent::new("profile".into());
    let handle = share(profile);
    parent
        .resolve(&mut registry, [ContainerRef::from(handle.clone())])
        .unwrap();
    (handle, parent)
}

fn profile_strategy() -> impl Strategy<Value = Profile> {
    (-1000i32..=1000, any::<bool>(), "[a-z ]{0,12}").prop_map(|(level, enabled, name)| Profile {
        level,
        enabled,
        name,
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 500,
        .. ProptestConfig::default()
    })]

    // Fetching one tree and applying the node to a fresh tree copies every value
    #[test]
    fn fetch_then_apply_copies_values(profile in profile_strategy()) {
        let (_source, source_tree) = tree(profile.clone());
        let mut node = serde_json::Value::Null;
        source_tree.fetch(&mut node).unwrap();

        let (target, target_tree) = tree(Profile::default());
        prop_assert!(target_tree.apply(&node).is_empty());
        prop_assert_eq!(&*target.borrow(), &profile);
    }

    // Applying a node produced by fetch leaves the tree unchanged
    #[test]
    fn fetch_then_apply_is_noop(profile in profile_strategy()) {
        let (handle, parent) = tree(profile.clone());
        let mut node = serde_yaml::Value::Null;
        parent.fetch(&mut node).unwrap();

        prop_assert!(parent.apply(&node).is_empty());
        prop_assert_eq!(&*handle.borrow(), &profile);

        let mut again = serde_yaml::Value::Null;
        parent.fetch(&mut again).unwrap();
        prop_assert_eq!(again, node);
    }

    // Applying an empty node never changes in-memory values
    #[test]
    fn apply_empty_node_preserves_values(profile in profile_strategy()) {
        let (handle, parent) = tree(profile.clone());
        prop_assert!(parent.apply(&serde_yaml::Value::Null).is_empty());
        prop_assert_eq!(&*handle.borrow(), &profile);
    }

    // Out-of-range stored values are reported and ignored
    #[test]
    fn apply_rejects_out_of_range(level in 1001i64..100_000) {
        let (handle, parent) = tree(Profile::default());
        let mut node = serde_json::Value::Null;
        node.child_mut("level").set_value(Value::Integer(level)).unwrap();

        let rejected = parent.apply(&node);
        prop_assert_eq!(rejected.len(), 1);
        prop_assert_eq!(rejected[0].path.as_str(), "level");
        prop_assert_eq!(handle.borrow().level, 0);
    }
}

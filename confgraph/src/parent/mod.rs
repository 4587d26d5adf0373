//! The resolution engine.
//!
//! A [`Parent`] owns the entries and sub-clusters of one tree node. Both the
//! root [`crate::Config`] and every [`Cluster`] are parents; they share the
//! graph walk that turns container instances into entries and clusters, and
//! the apply/fetch protocol that synchronizes the tree with a
//! [`ConfigNode`].
//!
//! Resolving a container happens in four steps:
//!
//! 1. Every qualifying value field of every class (own class first, then
//!    inherited classes) becomes an entry.
//! 2. Per class, transitive container fields are resolved in declaration
//!    order.
//! 3. Per class, transitive nested classes are instantiated and resolved in
//!    reverse declaration order.
//! 4. Containers returned by [`crate::ConfigContainer::transitives`] are
//!    resolved last.
//!
//! Group containers met along the way become clusters; plain containers
//! contribute directly to the parent being resolved.

mod cluster;

pub use cluster::{Cluster, ClusterSet};

use crate::entry::{Entry, EntrySet};
use crate::error::{Error, Result};
use crate::node::ConfigNode;
use crate::origin::EntryOrigin;
use crate::registry::ConfigRegistry;
use crate::schema::{BoundClass, BoundField, ContainerRef, Inclusion, Marker};
use crate::transform::Transformation;

#[cfg(test)]
mod proptests;

/// A value that [`Parent::apply`] could not load.
#[derive(Debug)]
pub struct Rejected {
    /// Dotted path of the entry, relative to the parent `apply` was called on.
    pub path: String,
    /// Why the value was rejected.
    pub error: Error,
}

/// A node of the entry tree: entries plus sub-clusters.
#[derive(Debug)]
pub struct Parent {
    label: String,
    entries: EntrySet,
    clusters: ClusterSet,
}

impl Parent {
    pub(crate) fn new(label: String) -> Self {
        Self {
            label,
            entries: EntrySet::default(),
            clusters: ClusterSet::default(),
        }
    }

    /// Returns the entries of this node.
    #[must_use]
    pub const fn entries(&self) -> &EntrySet {
        &self.entries
    }

    /// Returns the sub-clusters of this node.
    #[must_use]
    pub const fn clusters(&self) -> &ClusterSet {
        &self.clusters
    }

    /// Returns `true` if this node has neither entries nor clusters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.clusters.is_empty()
    }

    /// Finds an entry by dotted path (`"video.fov"`), descending through
    /// clusters.
    #[must_use]
    pub fn find_entry(&self, path: &str) -> Option<&Entry> {
        match path.split_once('.') {
            Some((cluster, rest)) => self.clusters.get(cluster)?.find_entry(rest),
            None => self.entries.get(path),
        }
    }

    /// Resolves containers into this node.
    ///
    /// Group containers become new clusters under this node; every other
    /// container contributes its entries and clusters directly.
    ///
    /// # Errors
    ///
    /// Fails on the first structural problem: a field resolved twice
    /// ([`Error::DuplicateOrigin`]), a field no transformation handles
    /// ([`Error::UnsupportedType`]), a transitive member that is not a
    /// container ([`Error::TypeContractViolation`]), a transitive inner class
    /// ([`Error::StaticRequirement`]), or a colliding identifier
    /// ([`Error::DuplicateIdentifier`]). Entries resolved before the failure
    /// stay registered; the field or group that failed leaves no trace in
    /// the registry.
    pub fn resolve<I>(&mut self, registry: &mut ConfigRegistry, containers: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<ContainerRef>,
    {
        for container in containers {
            let container = container.into();
            match container.group() {
                Some(group) => {
                    self.clusters.ensure_vacant(group.id(), &self.label)?;
                    let cluster = Cluster::resolve(registry, group, &container)?;
                    self.clusters.insert(cluster, &self.label)?;
                }
                None => self.resolve_container(registry, &container)?,
            }
        }
        Ok(())
    }

    pub(crate) fn resolve_container(
        &mut self,
        registry: &mut ConfigRegistry,
        container: &ContainerRef,
    ) -> Result<()> {
        log::debug!("resolving {} into {}", container.type_name(), self.label);
        let classes = container.bind();

        for class in &classes {
            for field in class.fields.iter().filter(|field| qualifies(class, field)) {
                let origin = EntryOrigin::bind(class.info, container, field);
                registry.register_entry_origin(&origin)?;
                let inserted = dispatch(registry.rules(), origin.clone())
                    .and_then(|entry| self.entries.insert(entry, &self.label));
                if inserted.is_err() {
                    registry.forget_entry_origin(&origin);
                }
                inserted?;
            }
        }

        for class in &classes {
            if let Some(field) = class.fields.iter().find(|f| f.marker == Marker::Transitive) {
                return Err(Error::TypeContractViolation {
                    member: format!("field `{}` of {}", field.id, class.info),
                });
            }

            for member in class
                .containers
                .iter()
                .filter(|member| member.transitive && (!member.is_static || class.own))
            {
                log::debug!("resolving transitive field `{}` of {}", member.id, class.info);
                self.resolve(registry, [(member.resolve)()])?;
            }

            for nested in class.nested.iter().rev().filter(|nested| nested.transitive) {
                let Some(instantiate) = nested.instantiate else {
                    return Err(Error::TypeContractViolation {
                        member: format!("class {}", nested.name),
                    });
                };
                if !nested.is_static {
                    return Err(Error::StaticRequirement {
                        member: format!("class {}", nested.name),
                    });
                }
                log::debug!("resolving transitive class {}", nested.name);
                self.resolve(registry, [instantiate()])?;
            }
        }

        self.resolve(registry, container.transitives())
    }

    /// Loads values from `node` into the tree.
    ///
    /// Children missing from `node` (or null) are skipped, so in-memory
    /// values survive. Values an entry rejects are logged, left out and
    /// returned; the entry keeps its current value.
    pub fn apply<N: ConfigNode>(&self, node: &N) -> Vec<Rejected> {
        let mut rejected = Vec::new();
        self.apply_at(node, "", &mut rejected);
        rejected
    }

    fn apply_at<N: ConfigNode>(&self, node: &N, prefix: &str, rejected: &mut Vec<Rejected>) {
        for entry in &self.entries {
            let Some(child) = present(node, entry.id()) else {
                continue;
            };
            if let Err(error) = entry.apply(child) {
                rejected.push(Rejected {
                    path: join(prefix, entry.id()),
                    error,
                });
            }
        }
        for cluster in &self.clusters {
            let Some(child) = present(node, cluster.id()) else {
                continue;
            };
            cluster.apply_at(child, &join(prefix, cluster.id()), rejected);
        }
    }

    /// Stores the current values of the tree into `node`, creating missing
    /// children.
    ///
    /// # Errors
    ///
    /// Returns an error if the node type cannot represent a value.
    pub fn fetch<N: ConfigNode>(&self, node: &mut N) -> Result<()> {
        for entry in &self.entries {
            entry.fetch(node.child_mut(entry.id()))?;
        }
        for cluster in &self.clusters {
            let child = node.child_mut(cluster.id());
            if let Some(description) = cluster.description() {
                child.set_comment(description);
            }
            cluster.fetch(child)?;
        }
        Ok(())
    }
}

fn qualifies(class: &BoundClass, field: &BoundField) -> bool {
    if field.is_static && !class.own {
        return false;
    }
    match field.marker {
        Marker::Entry => true,
        Marker::None => class.inclusion == Inclusion::All && !field.transient,
        Marker::Exclude | Marker::Transitive => false,
    }
}

/// Picks the most recently registered matching transformation.
fn dispatch(rules: &[Transformation], origin: EntryOrigin) -> Result<Entry> {
    match rules.iter().rev().find(|rule| rule.matches(&origin)) {
        Some(rule) => Ok(rule.apply(origin)),
        None => Err(Error::UnsupportedType {
            type_name: origin.value_type().name(),
            origin: origin.to_string(),
        }),
    }
}

fn present<'n, N: ConfigNode>(node: &'n N, key: &str) -> Option<&'n N> {
    node.child(key).filter(|child| !child.is_absent())
}

fn join(prefix: &str, id: &str) -> String {
    if prefix.is_empty() {
        id.to_string()
    } else {
        format!("{prefix}.{id}")
    }
}

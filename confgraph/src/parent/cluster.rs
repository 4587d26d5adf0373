//! Clusters: named sub-groups of the entry tree.

use std::ops::{Deref, DerefMut};

use super::Parent;
use crate::error::{Error, Result};
use crate::registry::ConfigRegistry;
use crate::schema::{ContainerRef, Group};

/// A named, non-root node of the entry tree, created from a group container.
///
/// A cluster may end up empty; it is kept in the tree and callers decide
/// whether to present it.
#[derive(Debug)]
pub struct Cluster {
    group: Group,
    parent: Parent,
}

impl Cluster {
    pub(crate) fn resolve(
        registry: &mut ConfigRegistry,
        group: Group,
        container: &ContainerRef,
    ) -> Result<Self> {
        let mut cluster = Self {
            parent: Parent::new(format!("cluster `{}`", group.id())),
            group,
        };
        cluster.parent.resolve_container(registry, container)?;
        if cluster.is_empty() {
            log::debug!("cluster `{}` is empty", cluster.id());
        }
        Ok(cluster)
    }

    /// Returns the cluster identifier (the group identifier).
    #[must_use]
    pub fn id(&self) -> &str {
        self.group.id()
    }

    /// Returns the cluster description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.group.description()
    }
}

impl Deref for Cluster {
    type Target = Parent;

    fn deref(&self) -> &Parent {
        &self.parent
    }
}

impl DerefMut for Cluster {
    fn deref_mut(&mut self) -> &mut Parent {
        &mut self.parent
    }
}

/// The sub-clusters of one parent, in resolution order.
#[derive(Debug, Default)]
pub struct ClusterSet {
    clusters: Vec<Cluster>,
}

impl ClusterSet {
    pub(crate) fn insert(&mut self, cluster: Cluster, parent: &str) -> Result<()> {
        self.ensure_vacant(cluster.id(), parent)?;
        self.clusters.push(cluster);
        Ok(())
    }

    pub(crate) fn ensure_vacant(&self, id: &str, parent: &str) -> Result<()> {
        if self.get(id).is_some() {
            return Err(Error::DuplicateIdentifier {
                parent: parent.to_string(),
                id: id.to_string(),
            });
        }
        Ok(())
    }

    /// Returns the cluster with the given identifier.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Cluster> {
        self.clusters.iter().find(|c| c.id() == id)
    }

    /// Iterates over the clusters in resolution order.
    pub fn iter(&self) -> std::slice::Iter<'_, Cluster> {
        self.clusters.iter()
    }

    /// Returns the number of clusters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    /// Returns `true` if there are no clusters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }
}

impl<'a> IntoIterator for &'a ClusterSet {
    type Item = &'a Cluster;
    type IntoIter = std::slice::Iter<'a, Cluster>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

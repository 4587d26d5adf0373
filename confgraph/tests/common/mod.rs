//! Common test utilities for integration tests.
//!
//! This module provides an in-memory node with comment support and helpers
//! for building configs from fixture containers.

pub mod containers;

use confgraph::{Config, ConfigNode, ConfigRegistry, ContainerRef, Result, Value};

/// An in-memory hierarchical node that keeps comments and key order.
#[allow(dead_code)]
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MemoryNode {
    value: Option<Value>,
    comment: Option<String>,
    children: Vec<(String, MemoryNode)>,
}

#[allow(dead_code)]
impl MemoryNode {
    /// Creates an empty node.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the comment attached to this node.
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Returns the child keys in insertion order.
    pub fn keys(&self) -> Vec<&str> {
        self.children.iter().map(|(key, _)| key.as_str()).collect()
    }

    /// Follows a dotted path.
    pub fn at(&self, path: &str) -> Option<&Self> {
        path.split('.').try_fold(self, |node, key| node.child(key))
    }

    /// Sets the value at a dotted path, creating intermediate nodes.
    pub fn with(mut self, path: &str, value: Value) -> Self {
        let node = path
            .split('.')
            .fold(&mut self, |node, key| node.child_mut(key));
        node.value = Some(value);
        self
    }
}

impl ConfigNode for MemoryNode {
    fn child(&self, key: &str) -> Option<&Self> {
        self.children
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, node)| node)
    }

    fn child_mut(&mut self, key: &str) -> &mut Self {
        self.value = None;
        let index = match self.children.iter().position(|(k, _)| k == key) {
            Some(index) => index,
            None => {
                self.children.push((key.to_string(), Self::default()));
                self.children.len() - 1
            }
        };
        &mut self.children[index].1
    }

    fn is_absent(&self) -> bool {
        self.value.is_none() && self.children.is_empty()
    }

    fn value(&self) -> Option<Value> {
        if self.children.is_empty() {
            self.value.clone()
        } else {
            None
        }
    }

    fn set_value(&mut self, value: Value) -> Result<()> {
        self.children.clear();
        self.value = Some(value);
        Ok(())
    }

    fn set_comment(&mut self, comment: &str) {
        self.comment = Some(comment.to_string());
    }
}

/// Builds an empty config named `test` and resolves `containers` into it.
#[allow(dead_code)]
pub fn resolve_all<I>(containers: I) -> Result<(ConfigRegistry, Config)>
where
    I: IntoIterator<Item = ContainerRef>,
{
    let mut registry = ConfigRegistry::new();
    let mut config = Config::builder("test").build(&mut registry)?;
    config.resolve(&mut registry, containers)?;
    Ok((registry, config))
}

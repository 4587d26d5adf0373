//! Hierarchical nodes that entry trees synchronize with.
//!
//! A node is either absent (null), a scalar or list, or a mapping of named
//! children. The library never reads or writes files; callers pick a
//! document type and hand its root to [`crate::Parent::apply`] or
//! [`crate::Parent::fetch`]. Adapters are provided for `serde_yaml::Value`
//! and `serde_json::Value`.
//!
//! # Examples
//!
//! ```
//! use confgraph::{ConfigNode, Value};
//!
//! let mut root = serde_yaml::Value::Null;
//! root.child_mut("audio").child_mut("volume").set_value(Value::Integer(7)).unwrap();
//!
//! let volume = root.child("audio").and_then(|a| a.child("volume")).unwrap();
//! assert_eq!(volume.value(), Some(Value::Integer(7)));
//! assert!(root.child("video").is_none());
//! ```

use crate::error::Result;
use crate::value::Value;

/// A node in an external hierarchical document.
pub trait ConfigNode {
    /// Returns the named child, or `None` if it does not exist.
    fn child(&self, key: &str) -> Option<&Self>;

    /// Returns the named child, creating it (and turning `self` into a
    /// mapping) when needed.
    fn child_mut(&mut self, key: &str) -> &mut Self;

    /// Returns `true` if the node holds nothing.
    fn is_absent(&self) -> bool;

    /// Reads the node as a scalar or list value. Mappings and absent nodes
    /// yield `None`.
    fn value(&self) -> Option<Value>;

    /// Replaces the node content with `value`.
    ///
    /// # Errors
    ///
    /// Returns an error if the document type cannot represent the value.
    fn set_value(&mut self, value: Value) -> Result<()>;

    /// Attaches a comment to the node. Document types without comments
    /// ignore it.
    fn set_comment(&mut self, _comment: &str) {}
}

impl ConfigNode for serde_yaml::Value {
    fn child(&self, key: &str) -> Option<&Self> {
        self.get(key)
    }

    fn child_mut(&mut self, key: &str) -> &mut Self {
        if !self.is_mapping() {
            *self = Self::Mapping(serde_yaml::Mapping::new());
        }
        &mut self[key]
    }

    fn is_absent(&self) -> bool {
        self.is_null()
    }

    fn value(&self) -> Option<Value> {
        if self.is_null() || self.is_mapping() {
            return None;
        }
        serde_yaml::from_value(self.clone()).ok()
    }

    fn set_value(&mut self, value: Value) -> Result<()> {
        *self = serde_yaml::to_value(value)?;
        Ok(())
    }
}

impl ConfigNode for serde_json::Value {
    fn child(&self, key: &str) -> Option<&Self> {
        self.get(key)
    }

    fn child_mut(&mut self, key: &str) -> &mut Self {
        if !self.is_object() {
            *self = Self::Object(serde_json::Map::new());
        }
        &mut self[key]
    }

    fn is_absent(&self) -> bool {
        self.is_null()
    }

    fn value(&self) -> Option<Value> {
        if self.is_null() || self.is_object() {
            return None;
        }
        serde_json::from_value(self.clone()).ok()
    }

    fn set_value(&mut self, value: Value) -> Result<()> {
        *self = serde_json::to_value(value)?;
        Ok(())
    }
}

#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # confgraph
//!
//! Schema-driven configuration trees.
//!
//! Containers describe their configuration fields once; confgraph walks a
//! graph of container instances, turns every qualifying field into a typed
//! [`Entry`] through an ordered list of [`Transformation`]s, groups them into
//! [`Cluster`]s, and synchronizes the resulting tree with a hierarchical
//! document through [`ConfigNode`].
//!
//! ## Core Types
//!
//! - [`ConfigContainer`] and [`Schema`]: container declarations
//! - [`Config`], [`Cluster`] and [`Parent`]: the entry tree
//! - [`Entry`] and [`EntryKind`]: leaf values and their variants
//! - [`ConfigRegistry`] and [`Transformation`]: bookkeeping and dispatch
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use confgraph::schema::{ConfigContainer, Group, Schema};
//! use confgraph::{Config, ConfigRegistry, Value};
//!
//! #[derive(Default)]
//! struct Video {
//!     fov: u8,
//! }
//!
//! impl ConfigContainer for Video {
//!     fn describe(schema: &mut Schema<Self>) {
//!         schema.entry("fov", |v| &v.fov, |v| &mut v.fov).bounded(30, 110);
//!     }
//!
//!     fn group(&self) -> Option<Group> {
//!         Some(Group::new("video"))
//!     }
//! }
//!
//! let mut registry = ConfigRegistry::new();
//! let config = Config::builder("demo")
//!     .add(Video { fov: 70 })
//!     .build(&mut registry)
//!     .unwrap();
//!
//! let fov = config.find_entry("video.fov").unwrap();
//! assert_eq!(fov.value(), Value::Integer(70));
//! assert!(fov.set_value(Value::Integer(200)).is_err());
//!
//! let mut document = serde_yaml::Value::Null;
//! config.fetch(&mut document).unwrap();
//! assert_eq!(serde_yaml::to_string(&document).unwrap(), "video:\n  fov: 70\n");
//! ```

pub mod config;
pub mod entry;
pub mod error;
pub mod logging;
pub mod node;
pub mod origin;
pub mod parent;
pub mod registry;
pub mod schema;
pub mod transform;
pub mod value;

// Re-export key types at crate root for convenience
pub use config::{Config, ConfigBuilder, ConfigKey};
pub use entry::{Entry, EntryKind, EntrySet};
pub use error::{Error, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use node::ConfigNode;
pub use origin::{EntryOrigin, OriginKey};
pub use parent::{Cluster, ClusterSet, Parent, Rejected};
pub use registry::{ConfigRegistry, RegistryBuilder};
pub use schema::{share, ConfigContainer, ContainerRef, Group, Schema, Shared};
pub use transform::{DataExtension, Transformation};
pub use value::{ConfigValue, Value, ValueKind, ValueType};

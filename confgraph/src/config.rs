//! Root configs.
//!
//! A [`Config`] is the root [`Parent`] of an entry tree. It belongs to a mod
//! id and, optionally, a branch path for mods with several configs.

use std::fmt;
use std::ops::{Deref, DerefMut};

use crate::error::Result;
use crate::parent::Parent;
use crate::registry::ConfigRegistry;
use crate::schema::ContainerRef;

/// Identity of a config: its mod id plus branch path.
///
/// Displayed as `mod_id` or `mod_id:branch:sub-branch`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConfigKey {
    mod_id: String,
    branch: Vec<String>,
}

impl ConfigKey {
    /// Creates a key for the root config of a mod.
    #[must_use]
    pub fn new(mod_id: impl Into<String>) -> Self {
        Self {
            mod_id: mod_id.into(),
            branch: Vec::new(),
        }
    }

    /// Sets the branch path.
    #[must_use]
    pub fn with_branch<I, S>(mut self, branch: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.branch = branch.into_iter().map(Into::into).collect();
        self
    }

    /// Returns the mod id.
    #[must_use]
    pub fn mod_id(&self) -> &str {
        &self.mod_id
    }

    /// Returns the branch path.
    #[must_use]
    pub fn branch(&self) -> &[String] {
        &self.branch
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mod_id)?;
        for part in &self.branch {
            write!(f, ":{part}")?;
        }
        Ok(())
    }
}

/// The root of an entry tree.
///
/// Dereferences to [`Parent`] for resolution, lookup and synchronization.
#[derive(Debug)]
pub struct Config {
    key: ConfigKey,
    description: Option<String>,
    parent: Parent,
}

impl Config {
    /// Starts building a config for `mod_id`.
    #[must_use]
    pub fn builder(mod_id: impl Into<String>) -> ConfigBuilder {
        ConfigBuilder {
            key: ConfigKey::new(mod_id),
            description: None,
            containers: Vec::new(),
        }
    }

    /// Returns the config key.
    #[must_use]
    pub const fn key(&self) -> &ConfigKey {
        &self.key
    }

    /// Returns the mod id.
    #[must_use]
    pub fn mod_id(&self) -> &str {
        self.key.mod_id()
    }

    /// Returns the config description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Makes this config the main config of its mod id.
    pub fn make_main(&self, registry: &mut ConfigRegistry) {
        registry.set_main_config(&self.key);
    }
}

impl Deref for Config {
    type Target = Parent;

    fn deref(&self) -> &Parent {
        &self.parent
    }
}

impl DerefMut for Config {
    fn deref_mut(&mut self) -> &mut Parent {
        &mut self.parent
    }
}

/// Builder for a [`Config`].
///
/// # Examples
///
/// ```
/// use confgraph::schema::{ConfigContainer, Schema};
/// use confgraph::{Config, ConfigRegistry};
///
/// #[derive(Default)]
/// struct Settings {
///     enabled: bool,
/// }
///
/// impl ConfigContainer for Settings {
///     fn describe(schema: &mut Schema<Self>) {
///         schema.entry("enabled", |s| &s.enabled, |s| &mut s.enabled);
///     }
/// }
///
/// let mut registry = ConfigRegistry::new();
/// let config = Config::builder("demo")
///     .with_branch(["client"])
///     .add(Settings::default())
///     .build(&mut registry)
///     .unwrap();
///
/// assert_eq!(config.key().to_string(), "demo:client");
/// assert_eq!(config.entries().len(), 1);
/// ```
#[derive(Debug)]
pub struct ConfigBuilder {
    key: ConfigKey,
    description: Option<String>,
    containers: Vec<ContainerRef>,
}

impl ConfigBuilder {
    /// Sets the branch path of the config.
    #[must_use]
    pub fn with_branch<I, S>(mut self, branch: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.key = self.key.with_branch(branch);
        self
    }

    /// Sets the config description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds a container to resolve when the config is built.
    #[must_use]
    pub fn add<C: crate::ConfigContainer>(self, container: C) -> Self {
        self.add_shared(ContainerRef::new(container))
    }

    /// Adds an already shared container, keeping the caller's handle valid.
    #[must_use]
    pub fn add_shared(mut self, container: impl Into<ContainerRef>) -> Self {
        self.containers.push(container.into());
        self
    }

    /// Registers the config and resolves its containers in the order they
    /// were added.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::DuplicateConfig`] if the key is taken, or any
    /// error raised by [`Parent::resolve`].
    pub fn build(self, registry: &mut ConfigRegistry) -> Result<Config> {
        registry.register_config(&self.key)?;
        let mut config = Config {
            parent: Parent::new(format!("config `{}`", self.key)),
            key: self.key,
            description: self.description,
        };
        config.parent.resolve(registry, self.containers)?;
        log::debug!(
            "config `{}` resolved: {} entries, {} clusters",
            config.key,
            config.entries().len(),
            config.clusters().len()
        );
        Ok(config)
    }
}

//! Registration bookkeeping shared by every config of an application.
//!
//! The registry is created once by the application and passed by mutable
//! reference to config construction and resolution. It guards against
//! registering the same config or the same field twice, tracks the main
//! config of each mod id, and owns the ordered transformation list.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;

use crate::config::ConfigKey;
use crate::error::{Error, Result};
use crate::origin::{EntryOrigin, OriginKey};
use crate::transform::{self, DataExtension, Transformation};

/// State of the main-config slot of a mod id.
#[derive(Debug, Clone, PartialEq, Eq)]
enum MainSlot {
    Config(ConfigKey),
    Ambiguous,
}

/// Registry of configs, resolved fields and transformations.
///
/// # Examples
///
/// ```
/// use confgraph::{Config, ConfigRegistry};
///
/// let mut registry = ConfigRegistry::new();
/// let config = Config::builder("demo").build(&mut registry).unwrap();
/// assert_eq!(registry.main_config("demo"), Some(config.key()));
/// ```
pub struct ConfigRegistry {
    configs: BTreeSet<ConfigKey>,
    main_configs: BTreeMap<String, MainSlot>,
    origins: HashSet<OriginKey>,
    transformations: Vec<Transformation>,
}

impl ConfigRegistry {
    /// Creates a registry holding only the built-in transformations.
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Starts building a registry with extensions.
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Registers a config.
    ///
    /// The first config of a mod id becomes its main config; registering a
    /// second one leaves the mod without a main config until
    /// [`ConfigRegistry::set_main_config`] is called.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateConfig`] if a config with the same key is
    /// already registered.
    pub fn register_config(&mut self, key: &ConfigKey) -> Result<()> {
        if !self.configs.insert(key.clone()) {
            return Err(Error::DuplicateConfig {
                key: key.to_string(),
            });
        }
        self.main_configs
            .entry(key.mod_id().to_string())
            .and_modify(|slot| {
                log::debug!("mod `{}` has several configs, main config unset", key.mod_id());
                *slot = MainSlot::Ambiguous;
            })
            .or_insert_with(|| MainSlot::Config(key.clone()));
        Ok(())
    }

    /// Makes `key` the main config of its mod id, replacing any previous one.
    pub fn set_main_config(&mut self, key: &ConfigKey) {
        self.main_configs
            .insert(key.mod_id().to_string(), MainSlot::Config(key.clone()));
    }

    /// Returns the main config of a mod id, if it has an unambiguous one.
    #[must_use]
    pub fn main_config(&self, mod_id: &str) -> Option<&ConfigKey> {
        match self.main_configs.get(mod_id)? {
            MainSlot::Config(key) => Some(key),
            MainSlot::Ambiguous => None,
        }
    }

    /// Iterates over every mod id with its main config (`None` when the
    /// mod has several configs and none was chosen), sorted by mod id.
    pub fn main_configs(&self) -> impl Iterator<Item = (&str, Option<&ConfigKey>)> {
        self.main_configs.iter().map(|(mod_id, slot)| {
            let key = match slot {
                MainSlot::Config(key) => Some(key),
                MainSlot::Ambiguous => None,
            };
            (mod_id.as_str(), key)
        })
    }

    /// Iterates over the registered configs, sorted by key.
    pub fn configs(&self) -> impl Iterator<Item = &ConfigKey> {
        self.configs.iter()
    }

    /// Records a field as resolved.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateOrigin`] if the same field (on the same
    /// instance, for instance fields) was already recorded.
    pub fn register_entry_origin(&mut self, origin: &EntryOrigin) -> Result<()> {
        if !self.origins.insert(origin.key()) {
            return Err(Error::DuplicateOrigin {
                origin: origin.to_string(),
            });
        }
        Ok(())
    }

    /// Drops a registration made by [`ConfigRegistry::register_entry_origin`]
    /// whose entry never made it into the tree.
    pub(crate) fn forget_entry_origin(&mut self, origin: &EntryOrigin) {
        self.origins.remove(&origin.key());
    }

    /// Returns a copy of the transformation list in registration order.
    #[must_use]
    pub fn transformations(&self) -> Vec<Transformation> {
        self.transformations.clone()
    }

    pub(crate) fn rules(&self) -> &[Transformation] {
        &self.transformations
    }
}

impl Default for ConfigRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ConfigRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigRegistry")
            .field("configs", &self.configs)
            .field("main_configs", &self.main_configs)
            .field("origins", &self.origins.len())
            .field("transformations", &self.transformations.len())
            .finish()
    }
}

/// Builder for a [`ConfigRegistry`].
#[derive(Default)]
pub struct RegistryBuilder {
    extensions: Vec<Box<dyn DataExtension>>,
    transformations: Vec<Transformation>,
}

impl RegistryBuilder {
    /// Adds an extension. Extensions contribute in the order they are added.
    #[must_use]
    pub fn extension(mut self, extension: impl DataExtension + 'static) -> Self {
        self.extensions.push(Box::new(extension));
        self
    }

    /// Adds a single transformation after all extensions.
    #[must_use]
    pub fn transformation(mut self, transformation: Transformation) -> Self {
        self.transformations.push(transformation);
        self
    }

    /// Builds the registry: built-in transformations first, then each
    /// extension's, then the individually added ones.
    #[must_use]
    pub fn build(self) -> ConfigRegistry {
        let mut transformations = transform::defaults();
        for extension in &self.extensions {
            transformations.extend(extension.transformations());
        }
        transformations.extend(self.transformations);
        log::debug!(
            "registry built with {} extension(s) and {} transformation(s)",
            self.extensions.len(),
            transformations.len()
        );
        ConfigRegistry {
            configs: BTreeSet::new(),
            main_configs: BTreeMap::new(),
            origins: HashSet::new(),
            transformations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::tests::{sample_origins, Sample};
    use crate::entry::Entry;

    struct Loud;

    impl DataExtension for Loud {
        fn transformations(&self) -> Vec<Transformation> {
            vec![Transformation::filter()
                .by_type::<u8>()
                .transform(Entry::plain)]
        }
    }

    #[test]
    fn test_register_config_duplicate() {
        let mut registry = ConfigRegistry::new();
        let key = ConfigKey::new("demo");
        registry.register_config(&key).unwrap();
        let err = registry.register_config(&key).unwrap_err();
        assert_eq!(err.to_string(), "demo already exists");
        assert_eq!(registry.configs().count(), 1);
    }

    #[test]
    fn test_main_config_slot() {
        let mut registry = ConfigRegistry::new();
        let client = ConfigKey::new("demo").with_branch(["client"]);
        let server = ConfigKey::new("demo").with_branch(["server"]);

        registry.register_config(&client).unwrap();
        assert_eq!(registry.main_config("demo"), Some(&client));

        registry.register_config(&server).unwrap();
        assert_eq!(registry.main_config("demo"), None);
        assert_eq!(registry.main_configs().collect::<Vec<_>>(), vec![("demo", None)]);

        registry.set_main_config(&server);
        assert_eq!(registry.main_config("demo"), Some(&server));
        registry.set_main_config(&client);
        assert_eq!(registry.main_config("demo"), Some(&client));
        assert_eq!(registry.main_config("other"), None);
    }

    #[test]
    fn test_register_entry_origin_once() {
        let mut registry = ConfigRegistry::new();
        let (_handle, origins) = sample_origins(Sample::default());
        registry.register_entry_origin(&origins[0]).unwrap();
        registry.register_entry_origin(&origins[1]).unwrap();

        let err = registry.register_entry_origin(&origins[0]).unwrap_err();
        assert!(matches!(err, Error::DuplicateOrigin { .. }));
        assert!(err.to_string().contains("volume"));

        let (_other, fresh) = sample_origins(Sample::default());
        registry.register_entry_origin(&fresh[0]).unwrap();
    }

    #[test]
    fn test_transformations_are_a_copy() {
        let registry = ConfigRegistry::new();
        let mut copy = registry.transformations();
        let count = copy.len();
        copy.clear();
        assert_eq!(registry.transformations().len(), count);
        assert_eq!(count, transform::defaults().len());
    }

    #[test]
    fn test_extensions_appended_after_defaults() {
        let registry = ConfigRegistry::builder().extension(Loud).build();
        assert_eq!(registry.rules().len(), transform::defaults().len() + 1);

        let (_handle, origins) = sample_origins(Sample::default());
        let last = registry.rules().last().unwrap();
        assert!(last.matches(&origins[0]));
        assert!(!last.matches(&origins[1]));
    }
}

//! Error types for the confgraph library.
//!
//! Every structural problem found while resolving a container graph is fatal:
//! resolution aborts with one of these errors and nothing retries. Value
//! problems (`Validation`, `Coercion`) are reported by `Entry::set_value`.

use thiserror::Error;

/// Result type alias for operations that may fail with a confgraph error.
///
/// # Examples
///
/// ```
/// use confgraph::{Error, Result};
///
/// fn example_operation() -> Result<u16> {
///     Ok(8080)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the confgraph library.
#[derive(Debug, Error)]
pub enum Error {
    /// The same config was registered twice.
    #[error("{key} already exists")]
    DuplicateConfig {
        /// The config key (mod id plus branch).
        key: String,
    },

    /// The same field was bound into two entries.
    #[error("{origin} was already resolved")]
    DuplicateOrigin {
        /// Description of the field, its declaring type and its owner.
        origin: String,
    },

    /// No transformation matched a discovered field.
    #[error("no transformation matches {origin} of type {type_name}")]
    UnsupportedType {
        /// Description of the field.
        origin: String,
        /// Declared Rust type of the field.
        type_name: &'static str,
    },

    /// A transitive member is not a config container.
    #[error("Transitive {member} must implement ConfigContainer")]
    TypeContractViolation {
        /// The offending member.
        member: String,
    },

    /// A transitive nested class is not static.
    #[error("Transitive {member} must be static")]
    StaticRequirement {
        /// The offending nested class.
        member: String,
    },

    /// An entry rejected a value.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The entry identifier.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// A value could not be converted to the declared type of a field.
    #[error("cannot coerce {found} into {expected}")]
    Coercion {
        /// The expected Rust type.
        expected: &'static str,
        /// The value that was supplied.
        found: String,
    },

    /// Two children of the same parent share an identifier.
    #[error("duplicate identifier '{id}' in {parent}")]
    DuplicateIdentifier {
        /// The parent that already holds the identifier.
        parent: String,
        /// The colliding identifier.
        id: String,
    },

    /// A node adapter could not translate a value.
    #[error("node error: {message}")]
    Node {
        /// Details about the failure.
        message: String,
    },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML document could not be read or written.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A JSON document could not be read or written.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Check if error reports a double registration (config, origin or identifier).
    ///
    /// # Examples
    ///
    /// ```
    /// use confgraph::Error;
    ///
    /// let err = Error::DuplicateConfig { key: "demo".into() };
    /// assert!(err.is_duplicate());
    /// ```
    #[must_use]
    pub fn is_duplicate(&self) -> bool {
        matches!(
            self,
            Self::DuplicateConfig { .. }
                | Self::DuplicateOrigin { .. }
                | Self::DuplicateIdentifier { .. }
        )
    }

    /// Check if error is a rejected value rather than a schema problem.
    ///
    /// # Examples
    ///
    /// ```
    /// use confgraph::Error;
    ///
    /// let err = Error::Validation { field: "volume".into(), message: "too loud".into() };
    /// assert!(err.is_validation());
    /// ```
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. } | Self::Coercion { .. })
    }
}

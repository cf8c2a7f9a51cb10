//! Builder and configuration for the session engine.

use crate::builder::error::BuildError;
use crate::checkpoint::KeyValueStore;
use crate::effects::SessionEngine;
use crate::rules::{MistakeLimit, SessionRules};
use serde::{Deserialize, Serialize};

/// Namespace used for store keys unless configured otherwise
pub const DEFAULT_NAMESPACE: &str = "connectionsState";

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

/// Engine configuration.
///
/// Serializable so a host can embed it in its own settings file; every
/// field has a default.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Prefix of the store key, `"<namespace>:<puzzle id>"`
    #[serde(default = "default_namespace")]
    pub namespace: String,

    #[serde(default)]
    pub rules: SessionRules,

    /// Fixed RNG seed for reproducible shuffles; entropy when `None`
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            rules: SessionRules::default(),
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Check the configuration (pure).
    pub fn validate(&self) -> Result<(), BuildError> {
        if self.namespace.is_empty() {
            return Err(BuildError::EmptyNamespace);
        }
        if self.namespace.contains(':') {
            return Err(BuildError::NamespaceContainsSeparator(
                self.namespace.clone(),
            ));
        }
        if self.rules.mistake_limit == MistakeLimit::Limited(0) {
            return Err(BuildError::ZeroMistakeLimit);
        }
        Ok(())
    }
}

/// Builder for constructing a session engine with a fluent API.
///
/// # Example
///
/// ```
/// use connections::builder::EngineBuilder;
/// use connections::checkpoint::MemoryStore;
/// use connections::rules::MistakeLimit;
///
/// let engine = EngineBuilder::new()
///     .store(MemoryStore::new())
///     .namespace("daily")
///     .mistake_limit(MistakeLimit::Limited(4))
///     .seed(7)
///     .build()
///     .unwrap();
///
/// assert_eq!(engine.config().namespace, "daily");
/// ```
pub struct EngineBuilder<St: KeyValueStore> {
    store: Option<St>,
    config: EngineConfig,
}

impl<St: KeyValueStore> EngineBuilder<St> {
    /// Create a new builder with the default configuration.
    pub fn new() -> Self {
        Self {
            store: None,
            config: EngineConfig::default(),
        }
    }

    /// Set the persistence store (required).
    pub fn store(mut self, store: St) -> Self {
        self.store = Some(store);
        self
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.config.namespace = namespace.into();
        self
    }

    pub fn mistake_limit(mut self, limit: MistakeLimit) -> Self {
        self.config.rules.mistake_limit = limit;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Build the engine.
    /// Returns an error if the store is missing or the configuration is invalid.
    pub fn build(self) -> Result<SessionEngine<St>, BuildError> {
        let store = self.store.ok_or(BuildError::MissingStore)?;
        self.config.validate()?;
        Ok(SessionEngine::from_parts(store, self.config))
    }
}

impl<St: KeyValueStore> Default for EngineBuilder<St> {
    fn default() -> Self {
        Self::new()
    }
}

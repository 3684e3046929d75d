//! Provider registry, keyed by provider name.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;

use super::provider::Provider;
use super::providers::FranceTv;
use crate::config::Config;
use crate::http_client::TransportError;

/// Set of available providers.
///
/// Registering a provider under a name already in use replaces the previous
/// one. Iteration is in name order.
#[derive(Default, Clone)]
pub struct Registry {
    providers: BTreeMap<&'static str, Arc<dyn Provider>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in provider, configured from `config`.
    pub fn with_defaults(config: &Config) -> Result<Self, TransportError> {
        let mut registry = Self::new();
        registry.register(Arc::new(FranceTv::from_config(config)?));
        Ok(registry)
    }

    /// Add `provider`, returning the one it replaces, if any.
    pub fn register(&mut self, provider: Arc<dyn Provider>) -> Option<Arc<dyn Provider>> {
        let name = provider.name();
        debug!(provider = name, "Registering provider");
        self.providers.insert(name, provider)
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Provider>> {
        self.providers.get(name).cloned()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.providers.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Provider>> {
        self.providers.values()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

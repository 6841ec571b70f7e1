//! Store configuration resolved from command-line flags.

use tracing::warn;

use crate::fields::{Context, DEFAULT_CONTEXTS};
use crate::store::TaskStore;

/// How a fresh store should be set up.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    pub contexts: Vec<Context>,
    pub seed: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            contexts: DEFAULT_CONTEXTS.iter().filter_map(|c| Context::parse(c)).collect(),
            seed: true,
        }
    }
}

impl StoreConfig {
    /// Build a config from raw flag values. An empty context list keeps the defaults.
    pub fn from_flags(contexts: &[String], no_seed: bool) -> Self {
        let mut config = StoreConfig { seed: !no_seed, ..StoreConfig::default() };
        let parsed: Vec<Context> = contexts
            .iter()
            .filter_map(|raw| {
                let context = Context::parse(raw);
                if context.is_none() {
                    warn!(label = %raw, "ignoring blank context label");
                }
                context
            })
            .collect();
        if !parsed.is_empty() {
            config.contexts = parsed;
        }
        config
    }

    pub fn build_store(&self) -> TaskStore {
        let mut store = TaskStore::with_contexts(self.contexts.clone());
        if self.seed {
            store.seed_sample_data();
        }
        store
    }
}

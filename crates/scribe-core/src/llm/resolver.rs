//! Model alias resolution
//!
//! Callers address models by abstract identifiers ("gpt-4o"); each provider
//! profile carries a table translating those into its own namespace
//! (OpenRouter wants "openai/gpt-4o"). Unknown identifiers pass through
//! unchanged, so a direct provider needs no table at all.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-provider mapping from abstract model identifiers to provider ones
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelAliasTable {
    #[serde(flatten)]
    aliases: HashMap<String, String>,
}

impl ModelAliasTable {
    /// Create an empty table (every identifier passes through)
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `(abstract, provider)` identifier pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            aliases: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Add a single alias
    pub fn insert(&mut self, abstract_id: impl Into<String>, provider_id: impl Into<String>) {
        self.aliases.insert(abstract_id.into(), provider_id.into());
    }

    /// Resolve an abstract model identifier for this provider.
    ///
    /// Identifiers without an alias are returned unchanged; resolution
    /// never fails.
    pub fn resolve<'a>(&'a self, model: &'a str) -> &'a str {
        self.aliases.get(model).map(String::as_str).unwrap_or(model)
    }

    /// Whether the table contains no aliases
    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

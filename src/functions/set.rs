//! Grouped discovery output
//!
//! Functions grouped by the provider that exposed them, keyed by
//! provider id. Each key is written exactly once per discovery run.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{anyhow, Result};

use super::function::CallableFunction;

/// Functions grouped by provider id
#[derive(Default)]
pub struct ProviderFunctionSet {
    providers: HashMap<String, Vec<Arc<dyn CallableFunction>>>,
}

impl ProviderFunctionSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a provider's functions. Each provider id is write-once;
    /// repeated inserts are rejected.
    pub fn insert(
        &mut self,
        provider_id: impl Into<String>,
        functions: Vec<Arc<dyn CallableFunction>>,
    ) -> Result<()> {
        let provider_id = provider_id.into();

        if self.providers.contains_key(&provider_id) {
            return Err(anyhow!(
                "functions for provider '{}' already recorded",
                provider_id
            ));
        }

        self.providers.insert(provider_id, functions);
        Ok(())
    }

    /// Get one provider's functions
    pub fn get(&self, provider_id: &str) -> Option<&[Arc<dyn CallableFunction>]> {
        self.providers.get(provider_id).map(Vec::as_slice)
    }

    /// Ids of all providers with an entry
    pub fn provider_ids(&self) -> Vec<&str> {
        self.providers.keys().map(String::as_str).collect()
    }

    /// Iterate over provider groups
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Arc<dyn CallableFunction>])> {
        self.providers
            .iter()
            .map(|(id, functions)| (id.as_str(), functions.as_slice()))
    }

    /// Number of providers with an entry
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Check whether the set has no entries
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Total number of functions across all providers
    pub fn function_count(&self) -> usize {
        self.providers.values().map(Vec::len).sum()
    }
}

impl IntoIterator for ProviderFunctionSet {
    type Item = (String, Vec<Arc<dyn CallableFunction>>);
    type IntoIter = std::collections::hash_map::IntoIter<String, Vec<Arc<dyn CallableFunction>>>;

    fn into_iter(self) -> Self::IntoIter {
        self.providers.into_iter()
    }
}

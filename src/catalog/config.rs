//! Provider catalog model
//!
//! Configuration types for the providers the bridge connects to.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for a single tool provider
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderConfig {
    /// Unique identifier (used to namespace this provider's functions)
    pub id: String,

    /// Human-readable name shown in reports; falls back to the id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// URI of the provider endpoint (e.g., "http://localhost:8005/mcp")
    pub uri: String,

    /// Whether this provider should be contacted
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl ProviderConfig {
    /// Create a new provider configuration
    pub fn new(id: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: None,
            uri: uri.into(),
            enabled: true,
        }
    }

    /// Set the human-readable display name
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Set whether this provider is enabled
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Display name, falling back to the id when none is configured
    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.id)
    }
}

/// The full provider catalog
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderCatalog {
    /// Providers the bridge may connect to
    #[serde(default)]
    pub providers: Vec<ProviderConfig>,

    /// Global timeout for tool invocations in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_timeout_ms: Option<u64>,
}

impl ProviderCatalog {
    /// Create a new empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a provider configuration
    pub fn add_provider(mut self, provider: ProviderConfig) -> Self {
        self.providers.push(provider);
        self
    }

    /// Set the global invocation timeout
    pub fn with_call_timeout(mut self, timeout_ms: u64) -> Self {
        self.call_timeout_ms = Some(timeout_ms);
        self
    }

    /// Get the global invocation timeout as a Duration
    pub fn call_timeout(&self) -> Option<Duration> {
        self.call_timeout_ms.map(Duration::from_millis)
    }

    /// Look up a provider by id
    pub fn provider(&self, id: &str) -> Option<&ProviderConfig> {
        self.providers.iter().find(|p| p.id == id)
    }
}

//! Bridge error types

use std::path::PathBuf;

use thiserror::Error;

use crate::schema::SemanticType;

/// Errors that can occur while discovering or invoking provider tools
#[derive(Error, Debug)]
pub enum BridgeError {
    /// Provider catalog file does not exist
    #[error("provider catalog not found: {}", path.display())]
    ConfigNotFound { path: PathBuf },

    /// Provider catalog is unreadable or structurally invalid
    #[error("failed to parse provider catalog {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    /// Lookup of a provider id absent from the catalog
    #[error("no provider with id '{0}' in the catalog")]
    UnknownProvider(String),

    /// Connecting to a single provider failed
    #[error("failed to connect to provider '{provider}': {source}")]
    ProviderConnect {
        provider: String,
        #[source]
        source: anyhow::Error,
    },

    /// Listing a single provider's tools failed
    #[error("failed to list tools from provider '{provider}': {source}")]
    ToolList {
        provider: String,
        #[source]
        source: anyhow::Error,
    },

    /// A single tool's input schema could not be converted
    #[error("unusable input schema for tool '{tool}': {reason}")]
    SchemaConversion { tool: String, reason: String },

    /// An argument value could not be converted to its declared type
    #[error("cannot coerce argument '{parameter}' to {expected}: {value}")]
    Coercion {
        parameter: String,
        expected: SemanticType,
        value: String,
    },

    /// A remote tool call failed or the provider reported an error
    #[error("tool '{tool}' invocation failed: {source}")]
    ToolInvocation {
        tool: String,
        #[source]
        source: anyhow::Error,
    },

    /// An in-flight operation was aborted by the caller's signal
    #[error("{operation} was cancelled")]
    Cancelled { operation: String },
}

impl BridgeError {
    /// Fatal errors halt startup; everything else is scoped to a single
    /// tool or provider.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            BridgeError::ConfigNotFound { .. } | BridgeError::ConfigParse { .. }
        )
    }
}

/// Result type alias for bridge operations
pub type BridgeResult<T> = Result<T, BridgeError>;

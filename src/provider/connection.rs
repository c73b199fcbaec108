//! Provider connection handle
//!
//! Wraps an rmcp client service over the streamable HTTP transport.

use anyhow::{anyhow, Result};
use rmcp::model::{CallToolRequestParams, CallToolResult, ListToolsResult, Tool};
use rmcp::service::RunningService;
use rmcp::transport::{
    streamable_http_client::StreamableHttpClientTransportConfig, StreamableHttpClientTransport,
};
use rmcp::{RoleClient, ServiceExt};
use serde_json::{Map, Value};

use crate::catalog::{ProviderCatalog, ProviderConfig};
use crate::core::{BridgeError, BridgeResult};

/// The concrete transport type used for HTTP provider connections
pub type HttpClientTransport = StreamableHttpClientTransport<reqwest::Client>;

/// A live connection to a single tool provider
pub struct ProviderConnection {
    /// Unique identifier for this provider
    id: String,

    /// Human-readable name, falling back to the id
    display_name: String,

    /// URI of the provider endpoint
    uri: String,

    /// The underlying rmcp service
    service: RunningService<RoleClient, ()>,
}

impl std::fmt::Debug for ProviderConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConnection")
            .field("id", &self.id)
            .field("uri", &self.uri)
            .finish()
    }
}

impl ProviderConnection {
    /// Connect to the provider described by `config`.
    pub async fn connect(config: &ProviderConfig) -> Result<Self> {
        tracing::info!(
            "[ProviderConnection] Connecting to '{}' at {}",
            config.id,
            config.uri
        );

        let transport_config = StreamableHttpClientTransportConfig::with_uri(config.uri.clone());
        let transport: HttpClientTransport = HttpClientTransport::from_config(transport_config);

        let service = ().serve(transport).await?;

        Ok(Self {
            id: config.id.clone(),
            display_name: config.display_name().to_string(),
            uri: config.uri.clone(),
            service,
        })
    }

    /// Get the provider id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the provider display name
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Get the provider URI
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// List all tools exposed by this provider.
    pub async fn list_tools(&self) -> Result<Vec<Tool>> {
        tracing::debug!("[ProviderConnection] Listing tools from '{}'", self.id);

        let result: ListToolsResult = self.service.list_tools(Default::default()).await?;

        tracing::info!(
            "[ProviderConnection] Got {} tools from '{}'",
            result.tools.len(),
            self.id
        );

        Ok(result.tools)
    }

    /// Call a tool on this provider by its original (un-namespaced) name.
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: Option<Map<String, Value>>,
    ) -> Result<CallToolResult> {
        tracing::info!(
            "[ProviderConnection] Calling tool '{}' on '{}'",
            name,
            self.id
        );
        tracing::debug!("[ProviderConnection] Arguments: {:?}", arguments);

        let result = self
            .service
            .call_tool(CallToolRequestParams {
                meta: None,
                name: name.to_string().into(),
                arguments,
                task: None,
            })
            .await?;

        tracing::debug!("[ProviderConnection] Tool call completed for '{}'", name);

        Ok(result)
    }

    /// Health check - list tools to verify the connection is alive.
    pub async fn health_check(&self) -> Result<()> {
        self.list_tools().await?;
        Ok(())
    }
}

/// Connect to a single catalog entry by provider id.
///
/// Fails with [`BridgeError::UnknownProvider`] when the id is not in the
/// catalog and [`BridgeError::ProviderConnect`] when the connection
/// cannot be established.
pub async fn connect_by_id(catalog: &ProviderCatalog, id: &str) -> BridgeResult<ProviderConnection> {
    let config = catalog
        .provider(id)
        .ok_or_else(|| BridgeError::UnknownProvider(id.to_string()))?;

    if !config.enabled {
        return Err(BridgeError::ProviderConnect {
            provider: id.to_string(),
            source: anyhow!("provider is disabled"),
        });
    }

    ProviderConnection::connect(config)
        .await
        .map_err(|source| BridgeError::ProviderConnect {
            provider: id.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ProviderCatalog;

    #[tokio::test]
    async fn test_connect_by_unknown_id() {
        let catalog = ProviderCatalog::new()
            .add_provider(ProviderConfig::new("github", "http://localhost:8005/mcp"));

        let err = connect_by_id(&catalog, "missing").await.unwrap_err();
        assert!(matches!(err, BridgeError::UnknownProvider(id) if id == "missing"));
    }

    #[tokio::test]
    async fn test_connect_by_id_rejects_disabled() {
        let catalog = ProviderCatalog::new().add_provider(
            ProviderConfig::new("github", "http://localhost:8005/mcp").with_enabled(false),
        );

        let err = connect_by_id(&catalog, "github").await.unwrap_err();
        assert!(matches!(err, BridgeError::ProviderConnect { .. }));
    }

    #[tokio::test]
    #[ignore] // Requires a running MCP server
    async fn test_provider_connection() {
        let config = ProviderConfig::new("test-server", "http://localhost:8005/mcp");

        let connection = ProviderConnection::connect(&config).await.unwrap();
        let tools = connection.list_tools().await.unwrap();
        assert!(!tools.is_empty());
    }
}

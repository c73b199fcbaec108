//! MCP tool adapter
//!
//! Wraps one remote tool as a [`CallableFunction`]: coerce arguments,
//! invoke over the provider connection, extract the textual result.

use std::sync::Arc;
use std::time::Duration;

use anyhow::anyhow;
use async_trait::async_trait;
use rmcp::model::{CallToolResult, Content, RawContent};
use serde_json::{Map, Value};
use tokio_util::sync::CancellationToken;

use crate::core::{BridgeError, BridgeResult};
use crate::provider::ProviderConnection;
use crate::schema::{coerce_argument, ParameterMetadata};

use super::function::CallableFunction;

/// Separator between provider id and tool name in qualified names
const NAMESPACE_SEPARATOR: &str = "__";

/// Build the namespace-qualified name for a provider's tool.
pub fn qualified_name(provider_id: &str, tool_name: &str) -> String {
    format!("{provider_id}{NAMESPACE_SEPARATOR}{tool_name}")
}

/// A single remote tool wrapped as a callable function
pub struct ToolFunction {
    /// Id of the provider this tool belongs to
    provider_id: String,

    /// Connection used to reach the provider
    connection: Arc<ProviderConnection>,

    /// Original tool name, used on the wire
    tool_name: String,

    /// Qualified name exposed to the registry
    exposed_name: String,

    /// Tool description from the provider's catalog
    description: String,

    /// Parameter metadata derived from the tool's input schema
    parameters: Option<Vec<ParameterMetadata>>,

    /// Upper bound on a single remote call, when configured
    call_timeout: Option<Duration>,
}

impl ToolFunction {
    /// Wrap a provider's tool as a callable function.
    pub fn new(
        connection: Arc<ProviderConnection>,
        tool: &rmcp::model::Tool,
        parameters: Option<Vec<ParameterMetadata>>,
        call_timeout: Option<Duration>,
    ) -> Self {
        let provider_id = connection.id().to_string();
        let exposed_name = qualified_name(&provider_id, &tool.name);

        Self {
            provider_id,
            connection,
            tool_name: tool.name.to_string(),
            exposed_name,
            description: tool
                .description
                .as_ref()
                .map(|d| d.to_string())
                .unwrap_or_default(),
            parameters,
            call_timeout,
        }
    }

    /// Get the provider id this function belongs to
    pub fn provider_id(&self) -> &str {
        &self.provider_id
    }

    /// Get the original (un-namespaced) tool name
    pub fn tool_name(&self) -> &str {
        &self.tool_name
    }

    async fn call_with_timeout(
        &self,
        arguments: Map<String, Value>,
    ) -> anyhow::Result<CallToolResult> {
        let call = self.connection.call_tool(&self.tool_name, Some(arguments));

        match self.call_timeout {
            Some(limit) => match tokio::time::timeout(limit, call).await {
                Ok(outcome) => outcome,
                Err(_) => Err(anyhow!("timed out after {limit:?}")),
            },
            None => call.await,
        }
    }
}

/// Drop null arguments and coerce the remainder against the declared
/// parameters. Unknown argument names are forwarded unchanged.
fn prepare_arguments(
    parameters: Option<&[ParameterMetadata]>,
    arguments: Map<String, Value>,
) -> BridgeResult<Map<String, Value>> {
    let mut prepared = Map::new();

    for (name, value) in arguments {
        if value.is_null() {
            continue;
        }

        let value = match parameters.and_then(|params| params.iter().find(|p| p.name == name)) {
            Some(parameter) => coerce_argument(parameter, value)?,
            None => value,
        };

        prepared.insert(name, value);
    }

    Ok(prepared)
}

/// Concatenate the text segments of a tool result, preserving their
/// order. Non-text content kinds are dropped.
fn extract_text(content: &[Content]) -> String {
    content
        .iter()
        .filter_map(|segment| match &segment.raw {
            RawContent::Text(text) => Some(text.text.as_str()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[async_trait]
impl CallableFunction for ToolFunction {
    fn name(&self) -> &str {
        &self.exposed_name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn parameters(&self) -> Option<&[ParameterMetadata]> {
        self.parameters.as_deref()
    }

    async fn invoke(
        &self,
        arguments: Map<String, Value>,
        cancel: &CancellationToken,
    ) -> BridgeResult<String> {
        let arguments = prepare_arguments(self.parameters.as_deref(), arguments)?;

        tracing::info!(
            "[ToolFunction] Invoking '{}' on provider '{}'",
            self.tool_name,
            self.provider_id
        );
        tracing::debug!("[ToolFunction] Arguments: {:?}", arguments);

        let result = tokio::select! {
            _ = cancel.cancelled() => {
                return Err(BridgeError::Cancelled {
                    operation: format!("invocation of tool '{}'", self.tool_name),
                })
            }
            outcome = self.call_with_timeout(arguments) => {
                outcome.map_err(|source| BridgeError::ToolInvocation {
                    tool: self.tool_name.clone(),
                    source,
                })?
            }
        };

        let text = extract_text(&result.content);

        if result.is_error.unwrap_or(false) {
            let cause = if text.is_empty() {
                "tool reported an error".to_string()
            } else {
                text
            };
            return Err(BridgeError::ToolInvocation {
                tool: self.tool_name.clone(),
                source: anyhow!(cause),
            });
        }

        tracing::debug!("[ToolFunction] Tool '{}' completed", self.tool_name);

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SemanticType;
    use serde_json::json;

    fn metadata(name: &str, semantic_type: SemanticType) -> ParameterMetadata {
        ParameterMetadata {
            name: name.to_string(),
            description: None,
            semantic_type,
            required: false,
            nullable: semantic_type.is_primitive(),
        }
    }

    fn arguments(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_qualified_name() {
        assert_eq!(qualified_name("filesystem", "read_file"), "filesystem__read_file");
    }

    #[test]
    fn test_null_arguments_are_dropped() {
        let params = vec![metadata("count", SemanticType::Integer)];
        let prepared = prepare_arguments(
            Some(&params),
            arguments(json!({"count": null, "other": null})),
        )
        .unwrap();

        assert!(prepared.is_empty());
    }

    #[test]
    fn test_known_arguments_are_coerced() {
        let params = vec![metadata("count", SemanticType::Integer)];
        let prepared =
            prepare_arguments(Some(&params), arguments(json!({"count": "5"}))).unwrap();

        assert_eq!(prepared.get("count"), Some(&json!(5)));
    }

    #[test]
    fn test_unknown_arguments_pass_through() {
        let params = vec![metadata("count", SemanticType::Integer)];
        let prepared = prepare_arguments(
            Some(&params),
            arguments(json!({"count": 2, "extra": "verbatim"})),
        )
        .unwrap();

        assert_eq!(prepared.get("extra"), Some(&json!("verbatim")));
    }

    #[test]
    fn test_no_metadata_passes_everything_through() {
        let prepared =
            prepare_arguments(None, arguments(json!({"anything": ["goes"]}))).unwrap();
        assert_eq!(prepared.get("anything"), Some(&json!(["goes"])));
    }

    #[test]
    fn test_coercion_failure_surfaces() {
        let params = vec![metadata("count", SemanticType::Integer)];
        let err =
            prepare_arguments(Some(&params), arguments(json!({"count": "abc"}))).unwrap_err();
        assert!(matches!(err, BridgeError::Coercion { .. }));
    }

    #[test]
    fn test_text_extraction_drops_other_content() {
        let content: Vec<Content> = serde_json::from_value(json!([
            {"type": "text", "text": "A"},
            {"type": "image", "data": "aGVsbG8=", "mimeType": "image/png"},
            {"type": "text", "text": "B"}
        ]))
        .unwrap();

        assert_eq!(extract_text(&content), "A\nB");
    }

    #[test]
    fn test_text_extraction_of_empty_result() {
        assert_eq!(extract_text(&[]), "");
    }
}

//! Callable function trait
//!
//! The local, strongly-typed face of a remote tool. Registries hold
//! trait objects, so backends other than MCP can plug in.

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio_util::sync::CancellationToken;

use crate::core::BridgeResult;
use crate::schema::ParameterMetadata;

/// A remotely backed function the local runtime can invoke
#[async_trait]
pub trait CallableFunction: Send + Sync {
    /// Namespace-qualified function name, unique across providers
    fn name(&self) -> &str;

    /// Human-readable description of what the function does
    fn description(&self) -> &str;

    /// Declared parameters, or `None` when the underlying tool takes no
    /// structured arguments
    fn parameters(&self) -> Option<&[ParameterMetadata]>;

    /// Invoke the remote tool with the given arguments.
    ///
    /// The cancellation token aborts the in-flight call promptly. The
    /// result is the textual portion of the tool's response.
    async fn invoke(
        &self,
        arguments: Map<String, Value>,
        cancel: &CancellationToken,
    ) -> BridgeResult<String>;
}

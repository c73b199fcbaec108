//! Bulk discovery across providers
//!
//! Connects every enabled provider in the catalog, converts each tool's
//! input schema, and wraps the tools as callable functions. Providers
//! are processed as independent concurrent tasks; one provider's failure
//! is recorded in the report and never aborts the batch.

mod report;

pub use report::{DiscoveryReport, ProviderOutcome, ProviderReport};

use std::sync::Arc;

use futures::future::join_all;
use tokio_util::sync::CancellationToken;

use crate::catalog::{ProviderCatalog, ProviderConfig};
use crate::core::BridgeError;
use crate::functions::{CallableFunction, FunctionRegistry, ProviderFunctionSet, ToolFunction};
use crate::provider::ProviderConnection;
use crate::schema::convert_input_schema;

/// Discovery output: the grouped functions plus the per-provider report
pub struct Discovery {
    /// Functions grouped by provider id
    pub functions: ProviderFunctionSet,

    /// What happened to each provider
    pub report: DiscoveryReport,
}

/// Builds callable functions for every provider in a catalog
pub struct Orchestrator {
    catalog: ProviderCatalog,
}

impl Orchestrator {
    /// Create an orchestrator over a loaded catalog
    pub fn new(catalog: ProviderCatalog) -> Self {
        Self { catalog }
    }

    /// Get the catalog this orchestrator works from
    pub fn catalog(&self) -> &ProviderCatalog {
        &self.catalog
    }

    /// Discover all providers' tools and wrap them as functions.
    ///
    /// Always best-effort: per-provider failures land in the report and
    /// never fail the run. Cancelling aborts the remaining connections
    /// without touching already-collected results.
    pub async fn discover(&self, cancel: &CancellationToken) -> Discovery {
        let tasks = self
            .catalog
            .providers
            .iter()
            .map(|config| self.process_provider(config, cancel));

        let results = join_all(tasks).await;

        let mut functions = ProviderFunctionSet::new();
        let mut report = DiscoveryReport::default();

        for (provider_report, provider_functions) in results {
            if provider_report.is_connected() {
                if let Err(error) =
                    functions.insert(provider_report.provider_id.as_str(), provider_functions)
                {
                    tracing::warn!("[Discovery] {}", error);
                }
            }
            report.providers.push(provider_report);
        }

        tracing::info!(
            "[Discovery] Completed: {} providers connected, {} failed, {} functions",
            report.succeeded().len(),
            report.failed().len(),
            functions.function_count()
        );

        Discovery { functions, report }
    }

    /// Discover and hand the functions to a registry, namespaced per
    /// provider id.
    pub async fn discover_into(
        &self,
        registry: &mut FunctionRegistry,
        cancel: &CancellationToken,
    ) -> anyhow::Result<DiscoveryReport> {
        let Discovery { functions, report } = self.discover(cancel).await;

        report.log_summary();
        registry.register_set(functions)?;

        Ok(report)
    }

    async fn process_provider(
        &self,
        config: &ProviderConfig,
        cancel: &CancellationToken,
    ) -> (ProviderReport, Vec<Arc<dyn CallableFunction>>) {
        let report = |outcome: ProviderOutcome| ProviderReport {
            provider_id: config.id.clone(),
            display_name: config.display_name().to_string(),
            outcome,
        };

        if !config.enabled {
            tracing::info!("[Discovery] Skipping disabled provider '{}'", config.id);
            return (report(ProviderOutcome::Disabled), Vec::new());
        }

        if cancel.is_cancelled() {
            return (
                report(ProviderOutcome::Failed(BridgeError::Cancelled {
                    operation: format!("connection to provider '{}'", config.id),
                })),
                Vec::new(),
            );
        }

        let connection = tokio::select! {
            _ = cancel.cancelled() => {
                return (
                    report(ProviderOutcome::Failed(BridgeError::Cancelled {
                        operation: format!("connection to provider '{}'", config.id),
                    })),
                    Vec::new(),
                )
            }
            connected = ProviderConnection::connect(config) => match connected {
                Ok(connection) => Arc::new(connection),
                Err(source) => {
                    let error = BridgeError::ProviderConnect {
                        provider: config.id.clone(),
                        source,
                    };
                    tracing::warn!("[Discovery] {}", error);
                    return (report(ProviderOutcome::Failed(error)), Vec::new());
                }
            }
        };

        let tools = tokio::select! {
            _ = cancel.cancelled() => {
                return (
                    report(ProviderOutcome::Failed(BridgeError::Cancelled {
                        operation: format!("tool listing for provider '{}'", config.id),
                    })),
                    Vec::new(),
                )
            }
            listed = connection.list_tools() => match listed {
                Ok(tools) => tools,
                Err(source) => {
                    let error = BridgeError::ToolList {
                        provider: config.id.clone(),
                        source,
                    };
                    tracing::warn!("[Discovery] {}", error);
                    return (report(ProviderOutcome::Failed(error)), Vec::new());
                }
            }
        };

        let call_timeout = self.catalog.call_timeout();
        let mut functions: Vec<Arc<dyn CallableFunction>> = Vec::with_capacity(tools.len());
        let mut tool_names = Vec::with_capacity(tools.len());
        let mut skipped_tools = Vec::new();

        for tool in &tools {
            match convert_input_schema(&tool.name, tool.input_schema.as_ref()) {
                Ok(parameters) => {
                    let function =
                        ToolFunction::new(connection.clone(), tool, parameters, call_timeout);
                    tool_names.push(tool.name.to_string());
                    functions.push(Arc::new(function));
                }
                Err(error) => {
                    // One bad schema skips that tool, never the provider.
                    tracing::warn!(
                        "[Discovery] Skipping tool '{}' on provider '{}': {}",
                        tool.name,
                        config.id,
                        error
                    );
                    skipped_tools.push(tool.name.to_string());
                }
            }
        }

        tracing::info!(
            "[Discovery] Provider '{}' produced {} functions",
            config.id,
            functions.len()
        );

        (
            report(ProviderOutcome::Connected {
                tools: tool_names,
                skipped_tools,
            }),
            functions,
        )
    }
}

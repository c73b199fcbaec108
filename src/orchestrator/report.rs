//! Discovery report
//!
//! Per-provider outcomes of a discovery run, consumed by operator-facing
//! logging. Failures are recorded here instead of aborting the batch.

use crate::core::BridgeError;

/// Result of processing one provider
#[derive(Debug)]
pub enum ProviderOutcome {
    /// Connected and produced functions
    Connected {
        /// Names of the tools wrapped as functions
        tools: Vec<String>,

        /// Tools skipped because their input schema was unusable
        skipped_tools: Vec<String>,
    },

    /// Provider disabled in the catalog; never contacted
    Disabled,

    /// Connection or listing failed; other providers are unaffected
    Failed(BridgeError),
}

/// Per-provider entry in the discovery report
#[derive(Debug)]
pub struct ProviderReport {
    /// Catalog id of the provider
    pub provider_id: String,

    /// Human-readable provider name
    pub display_name: String,

    /// What happened to this provider
    pub outcome: ProviderOutcome,
}

impl ProviderReport {
    /// Whether this provider produced functions
    pub fn is_connected(&self) -> bool {
        matches!(self.outcome, ProviderOutcome::Connected { .. })
    }
}

/// Outcome of a discovery run across all providers
#[derive(Debug, Default)]
pub struct DiscoveryReport {
    /// One entry per catalog provider, in catalog order
    pub providers: Vec<ProviderReport>,
}

impl DiscoveryReport {
    /// Providers that connected and produced functions
    pub fn succeeded(&self) -> Vec<&ProviderReport> {
        self.providers.iter().filter(|p| p.is_connected()).collect()
    }

    /// Providers whose connection or listing failed
    pub fn failed(&self) -> Vec<&ProviderReport> {
        self.providers
            .iter()
            .filter(|p| matches!(p.outcome, ProviderOutcome::Failed(_)))
            .collect()
    }

    /// Log a one-line summary per provider.
    pub fn log_summary(&self) {
        for report in &self.providers {
            match &report.outcome {
                ProviderOutcome::Connected {
                    tools,
                    skipped_tools,
                } => {
                    tracing::info!(
                        "[Discovery] Provider '{}' ({}): {} tools, {} skipped",
                        report.provider_id,
                        report.display_name,
                        tools.len(),
                        skipped_tools.len()
                    );
                }
                ProviderOutcome::Disabled => {
                    tracing::info!("[Discovery] Provider '{}' is disabled", report.provider_id);
                }
                ProviderOutcome::Failed(error) => {
                    tracing::warn!(
                        "[Discovery] Provider '{}' failed: {}",
                        report.provider_id,
                        error
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    fn connected(id: &str, tools: &[&str]) -> ProviderReport {
        ProviderReport {
            provider_id: id.to_string(),
            display_name: id.to_string(),
            outcome: ProviderOutcome::Connected {
                tools: tools.iter().map(|t| t.to_string()).collect(),
                skipped_tools: Vec::new(),
            },
        }
    }

    fn failed(id: &str) -> ProviderReport {
        ProviderReport {
            provider_id: id.to_string(),
            display_name: id.to_string(),
            outcome: ProviderOutcome::Failed(BridgeError::ProviderConnect {
                provider: id.to_string(),
                source: anyhow!("connection refused"),
            }),
        }
    }

    #[test]
    fn test_partition_of_outcomes() {
        let report = DiscoveryReport {
            providers: vec![
                connected("one", &["alpha"]),
                failed("two"),
                connected("three", &["beta", "gamma"]),
            ],
        };

        let succeeded: Vec<&str> = report
            .succeeded()
            .iter()
            .map(|p| p.provider_id.as_str())
            .collect();
        assert_eq!(succeeded, vec!["one", "three"]);

        let failed: Vec<&str> = report
            .failed()
            .iter()
            .map(|p| p.provider_id.as_str())
            .collect();
        assert_eq!(failed, vec!["two"]);
    }
}

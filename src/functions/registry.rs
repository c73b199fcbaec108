//! Function registry
//!
//! In-memory registry holding callable functions namespaced per
//! provider. This is the hand-off point to the local runtime; the
//! registry has no opinion on how its functions were derived.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use serde_json::{Map, Value};
use tokio_util::sync::CancellationToken;

use super::function::CallableFunction;
use super::set::ProviderFunctionSet;

/// Registry of callable functions, indexed by qualified name
pub struct FunctionRegistry {
    /// Flat index by qualified function name
    functions: HashMap<String, Arc<dyn CallableFunction>>,

    /// Provider id -> qualified names registered under it
    namespaces: HashMap<String, Vec<String>>,
}

impl FunctionRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            functions: HashMap::new(),
            namespaces: HashMap::new(),
        }
    }

    /// Register one provider's functions under its namespace.
    ///
    /// Rejects a namespace that is already registered and any function
    /// name that collides with an existing one; on rejection the
    /// registry is left unchanged.
    pub fn register_namespace(
        &mut self,
        provider_id: &str,
        functions: Vec<Arc<dyn CallableFunction>>,
    ) -> Result<()> {
        if self.namespaces.contains_key(provider_id) {
            return Err(anyhow!("namespace '{}' is already registered", provider_id));
        }

        let mut names = Vec::with_capacity(functions.len());

        for function in &functions {
            let name = function.name();
            if self.functions.contains_key(name) || names.iter().any(|n| n == name) {
                return Err(anyhow!("function name conflict: '{}' already exists", name));
            }
            names.push(name.to_string());
        }

        for function in functions {
            tracing::info!(
                "[FunctionRegistry] Registering function '{}' under namespace '{}'",
                function.name(),
                provider_id
            );
            self.functions.insert(function.name().to_string(), function);
        }

        self.namespaces.insert(provider_id.to_string(), names);

        Ok(())
    }

    /// Register every provider group of a discovery result.
    pub fn register_set(&mut self, set: ProviderFunctionSet) -> Result<()> {
        for (provider_id, functions) in set {
            self.register_namespace(&provider_id, functions)?;
        }
        Ok(())
    }

    /// Get a function by qualified name
    pub fn get(&self, name: &str) -> Option<Arc<dyn CallableFunction>> {
        self.functions.get(name).cloned()
    }

    /// Invoke a registered function by qualified name.
    pub async fn invoke(
        &self,
        name: &str,
        arguments: Map<String, Value>,
        cancel: &CancellationToken,
    ) -> Result<String> {
        let function = self
            .functions
            .get(name)
            .with_context(|| format!("function not found: {name}"))?;

        tracing::info!("[FunctionRegistry] Invoking function '{}'", name);

        let output = function.invoke(arguments, cancel).await?;

        Ok(output)
    }

    /// Qualified names of all registered functions
    pub fn function_names(&self) -> Vec<&str> {
        self.functions.keys().map(String::as_str).collect()
    }

    /// Registered namespace keys (provider ids)
    pub fn namespaces(&self) -> Vec<&str> {
        self.namespaces.keys().map(String::as_str).collect()
    }

    /// Qualified names registered under one namespace
    pub fn namespace_functions(&self, provider_id: &str) -> Option<&[String]> {
        self.namespaces.get(provider_id).map(Vec::as_slice)
    }

    /// Number of registered functions
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::BridgeResult;
    use crate::schema::ParameterMetadata;
    use async_trait::async_trait;

    struct EchoFunction {
        name: String,
    }

    #[async_trait]
    impl CallableFunction for EchoFunction {
        fn name(&self) -> &str {
            &self.name
        }

        fn description(&self) -> &str {
            "echoes its argument"
        }

        fn parameters(&self) -> Option<&[ParameterMetadata]> {
            None
        }

        async fn invoke(
            &self,
            arguments: Map<String, Value>,
            _cancel: &CancellationToken,
        ) -> BridgeResult<String> {
            Ok(arguments
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string())
        }
    }

    fn echo(name: &str) -> Arc<dyn CallableFunction> {
        Arc::new(EchoFunction {
            name: name.to_string(),
        })
    }

    #[test]
    fn test_empty_registry() {
        let registry = FunctionRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
        assert!(registry.get("nonexistent").is_none());
    }

    #[test]
    fn test_namespace_registration() {
        let mut registry = FunctionRegistry::new();
        registry
            .register_namespace("github", vec![echo("github__search"), echo("github__fork")])
            .unwrap();

        assert_eq!(registry.len(), 2);
        assert!(registry.get("github__search").is_some());
        assert_eq!(
            registry.namespace_functions("github").unwrap().len(),
            2
        );

        // A second registration under the same namespace is rejected.
        assert!(registry
            .register_namespace("github", vec![echo("github__other")])
            .is_err());
    }

    #[test]
    fn test_name_conflicts_leave_registry_unchanged() {
        let mut registry = FunctionRegistry::new();
        registry
            .register_namespace("github", vec![echo("github__search")])
            .unwrap();

        let err = registry
            .register_namespace("mirror", vec![echo("mirror__a"), echo("github__search")])
            .unwrap_err();
        assert!(err.to_string().contains("conflict"));

        // Nothing from the failed batch leaked in.
        assert_eq!(registry.len(), 1);
        assert!(registry.get("mirror__a").is_none());
    }

    #[tokio::test]
    async fn test_invoke_by_name() {
        let mut registry = FunctionRegistry::new();
        registry
            .register_namespace("test", vec![echo("test__echo")])
            .unwrap();

        let mut arguments = Map::new();
        arguments.insert("message".to_string(), Value::String("hello".to_string()));

        let cancel = CancellationToken::new();
        let output = registry.invoke("test__echo", arguments, &cancel).await.unwrap();
        assert_eq!(output, "hello");

        let missing = registry.invoke("test__missing", Map::new(), &cancel).await;
        assert!(missing.is_err());
    }
}

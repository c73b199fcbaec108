//! Provider catalog loading
//!
//! Resolves the catalog location (explicit path, then environment, then
//! the default file name) and parses it. Load failures are fatal and are
//! raised before any provider is contacted.

use std::collections::HashSet;
use std::env;
use std::path::{Path, PathBuf};

use crate::core::{BridgeError, BridgeResult};

use super::config::ProviderCatalog;

/// Environment variable consulted when no explicit path is given
pub const CATALOG_PATH_ENV: &str = "MCP_PROVIDERS_PATH";

/// Default catalog file name, relative to the working directory
pub const DEFAULT_CATALOG_PATH: &str = "providers.json";

/// Resolve the catalog path: explicit argument, then environment, then
/// the built-in default.
pub fn resolve_catalog_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }

    env::var(CATALOG_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CATALOG_PATH))
}

/// Load the provider catalog from disk.
pub fn load_catalog(explicit: Option<&Path>) -> BridgeResult<ProviderCatalog> {
    let path = resolve_catalog_path(explicit);

    if !path.exists() {
        return Err(BridgeError::ConfigNotFound { path });
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| BridgeError::ConfigParse {
        path: path.clone(),
        source: e.into(),
    })?;

    let catalog: ProviderCatalog =
        serde_json::from_str(&contents).map_err(|e| BridgeError::ConfigParse {
            path: path.clone(),
            source: e.into(),
        })?;

    validate(&catalog).map_err(|reason| BridgeError::ConfigParse {
        path: path.clone(),
        source: anyhow::anyhow!(reason),
    })?;

    tracing::info!(
        "[Catalog] Loaded {} providers from {}",
        catalog.providers.len(),
        path.display()
    );

    Ok(catalog)
}

fn validate(catalog: &ProviderCatalog) -> Result<(), String> {
    let mut seen = HashSet::new();

    for provider in &catalog.providers {
        if provider.id.is_empty() {
            return Err("provider with an empty id".to_string());
        }
        if !seen.insert(provider.id.as_str()) {
            return Err(format!("duplicate provider id '{}'", provider.id));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_catalog(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_valid_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_catalog(
            &dir,
            "providers.json",
            r#"{"providers": [{"id": "github", "uri": "http://localhost:8005/mcp"}]}"#,
        );

        let catalog = load_catalog(Some(&path)).unwrap();
        assert_eq!(catalog.providers.len(), 1);
        assert_eq!(catalog.providers[0].id, "github");
    }

    #[test]
    fn test_missing_catalog_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nonexistent.json");

        let err = load_catalog(Some(&path)).unwrap_err();
        assert!(matches!(err, BridgeError::ConfigNotFound { .. }));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_malformed_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_catalog(&dir, "providers.json", "{not valid json");

        let err = load_catalog(Some(&path)).unwrap_err();
        assert!(matches!(err, BridgeError::ConfigParse { .. }));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_duplicate_provider_ids() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_catalog(
            &dir,
            "providers.json",
            r#"{"providers": [
                {"id": "github", "uri": "http://localhost:8005/mcp"},
                {"id": "github", "uri": "http://localhost:8006/mcp"}
            ]}"#,
        );

        let err = load_catalog(Some(&path)).unwrap_err();
        assert!(matches!(err, BridgeError::ConfigParse { .. }));
        assert!(err.to_string().contains("duplicate provider id"));
    }

    #[test]
    fn test_path_resolution_precedence() {
        // Explicit path wins over everything.
        let explicit = Path::new("/tmp/explicit.json");
        assert_eq!(resolve_catalog_path(Some(explicit)), explicit);

        // Environment variable wins over the default. Set and unset within
        // a single test to avoid racing parallel tests on process state.
        env::set_var(CATALOG_PATH_ENV, "/tmp/from-env.json");
        assert_eq!(
            resolve_catalog_path(None),
            PathBuf::from("/tmp/from-env.json")
        );
        assert_eq!(resolve_catalog_path(Some(explicit)), explicit);
        env::remove_var(CATALOG_PATH_ENV);

        assert_eq!(resolve_catalog_path(None), PathBuf::from(DEFAULT_CATALOG_PATH));
    }
}

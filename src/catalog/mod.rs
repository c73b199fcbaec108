//! Provider catalog
//!
//! The catalog names the tool providers the bridge may connect to and
//! where to find them. It is loaded once at startup and immutable
//! thereafter.

mod config;
mod loader;

pub use config::{ProviderCatalog, ProviderConfig};
pub use loader::{load_catalog, resolve_catalog_path, CATALOG_PATH_ENV, DEFAULT_CATALOG_PATH};

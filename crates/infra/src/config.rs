//! Configuration for cart persistence and collaborator lookups.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::repository::JsonFileRepository;

/// Default namespaced storage key; the file backend appends `.json`.
pub const DEFAULT_STORAGE_KEY: &str = "storefront.cart";

const DEFAULT_LOOKUP_TIMEOUT_MS: u64 = 5_000;

/// Runtime configuration for the cart core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CartConfig {
    /// Directory holding the persisted cart document.
    pub storage_dir: PathBuf,
    /// Namespace key the cart is stored under.
    pub storage_key: String,
    /// Upper bound on a single stock/catalog lookup. A non-responding
    /// collaborator resolves to a failure instead of hanging the operation.
    pub lookup_timeout_ms: u64,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from("."),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            lookup_timeout_ms: DEFAULT_LOOKUP_TIMEOUT_MS,
        }
    }
}

impl CartConfig {
    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_millis(self.lookup_timeout_ms)
    }

    /// File-backed repository at the configured location.
    pub fn repository(&self) -> JsonFileRepository {
        JsonFileRepository::new(&self.storage_dir, &self.storage_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = CartConfig::default();
        assert_eq!(config.storage_key, "storefront.cart");
        assert_eq!(config.lookup_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn deserializes_with_partial_fields() {
        let config: CartConfig =
            serde_json::from_str(r#"{"lookup_timeout_ms": 250}"#).unwrap();
        assert_eq!(config.lookup_timeout(), Duration::from_millis(250));
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
    }
}

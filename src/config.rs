//! Engine configuration, loadable from TOML.

use std::path::Path;

use serde::Deserialize;

use crate::error::{DynqError, DynqResult};

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// Backend name: "relational" or "document-store".
    pub backend: String,
    pub cache: CacheConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct CacheConfig {
    pub max_entries: usize,
    pub log_evictions: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            backend: "relational".to_string(),
            cache: CacheConfig::default(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 256,
            log_evictions: false,
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(text: &str) -> DynqResult<Self> {
        toml::from_str(text).map_err(|e| DynqError::Config(e.to_string()))
    }

    pub fn from_file(path: impl AsRef<Path>) -> DynqResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}

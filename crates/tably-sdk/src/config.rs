use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tably_recipe::DEFAULT_CHUNK_ROWS;
use tably_store::write_atomic;

use crate::error::{SdkError, SdkResult};

/// Per-repository settings, stored as `config.toml` in the control directory.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepoConfig {
    /// Maximum rows per chunk.
    pub chunk_rows: usize,
    /// View created by `init` and activated initially.
    pub default_view: String,
}

impl Default for RepoConfig {
    fn default() -> Self {
        Self {
            chunk_rows: DEFAULT_CHUNK_ROWS,
            default_view: "main".to_string(),
        }
    }
}

impl RepoConfig {
    /// Load from `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> SdkResult<Self> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };
        let config: Self = toml::from_str(&text).map_err(|e| SdkError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        config.validate(path)?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> SdkResult<()> {
        let text = toml::to_string_pretty(self).map_err(|e| SdkError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        write_atomic(path, text.as_bytes())?;
        Ok(())
    }

    fn validate(&self, path: &Path) -> SdkResult<()> {
        if self.chunk_rows == 0 {
            return Err(SdkError::Config {
                path: path.to_path_buf(),
                reason: "chunk_rows must be at least 1".into(),
            });
        }
        tably_refs::validate_view_name(&self.default_view).map_err(|e| SdkError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

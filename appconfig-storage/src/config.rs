//! Storage layout constants and cache settings
//!
//! The directory and file names are fixed; only the availability threshold
//! can be tuned, through [`StorageConfig`].

use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::Path;
use tokio::fs;

// ===== Storage Layout =====

/// Directory below the app files root that holds the cached config
pub const APPCONFIG_STORAGE_DIR: &str = "appconfig_storage";

/// File name of the cached config blob
pub const APPCONFIG_FILE_NAME: &str = "appconfig";

/// Extension of the sibling file a new blob is staged in before rename
pub const APPCONFIG_TEMP_EXTENSION: &str = "tmp";

// ===== Availability =====

/// Minimum blob size in bytes (exclusive).
/// Anything this size or smaller is treated as an empty or truncated download.
pub const DEFAULT_MIN_CONFIG_SIZE: u64 = 128;

/// Tunable settings for the config cache
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// A cached blob must be strictly larger than this to count as available
    #[serde(default = "default_min_size")]
    pub min_size: u64,
}

fn default_min_size() -> u64 {
    DEFAULT_MIN_CONFIG_SIZE
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            min_size: default_min_size(),
        }
    }
}

impl StorageConfig {
    /// Load settings from a JSON file, falling back to defaults if it is missing
    pub async fn load(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!("Storage config {:?} not found, using defaults", path);
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };

        let config: StorageConfig = serde_json::from_str(&content)
            .map_err(|e| AppError::Config(format!("Failed to parse {:?}: {}", path, e)))?;

        tracing::debug!("Loaded storage config: {:?}", config);

        Ok(config)
    }

    /// Save settings as pretty-printed JSON
    pub async fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(path, content).await?;

        tracing::info!("Storage config saved to {:?}", path);

        Ok(())
    }
}

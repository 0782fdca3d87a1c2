//! App config blob cache
//!
//! Keeps the last downloaded app configuration as a single opaque file at
//! `<files_dir>/appconfig_storage/appconfig`. Bytes are stored as-is, with no
//! framing or encoding.
//!
//! "Available" is derived on every call from the file's size; nothing is
//! cached in memory between calls.

use crate::app::AppContext;
use crate::config::{
    StorageConfig, APPCONFIG_FILE_NAME, APPCONFIG_STORAGE_DIR, APPCONFIG_TEMP_EXTENSION,
};
use crate::error::Result;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// What a write should do with the cached blob
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWrite {
    /// Replace the cached blob with these bytes (may be empty)
    Store(Vec<u8>),
    /// Remove the cached blob
    Clear,
}

impl From<Option<Vec<u8>>> for ConfigWrite {
    fn from(value: Option<Vec<u8>>) -> Self {
        match value {
            Some(data) => ConfigWrite::Store(data),
            None => ConfigWrite::Clear,
        }
    }
}

impl From<Vec<u8>> for ConfigWrite {
    fn from(data: Vec<u8>) -> Self {
        ConfigWrite::Store(data)
    }
}

impl From<&[u8]> for ConfigWrite {
    fn from(data: &[u8]) -> Self {
        ConfigWrite::Store(data.to_vec())
    }
}

impl<const N: usize> From<&[u8; N]> for ConfigWrite {
    fn from(data: &[u8; N]) -> Self {
        ConfigWrite::Store(data.to_vec())
    }
}

/// On-disk cache for the raw app config
#[derive(Debug, Clone)]
pub struct AppConfigStorage {
    config_path: PathBuf,
    min_size: u64,
}

impl AppConfigStorage {
    /// Create a storage bound to the context's files directory
    pub fn new(context: &impl AppContext) -> Self {
        Self::with_config(context, StorageConfig::default())
    }

    /// Create a storage with a custom availability threshold
    pub fn with_config(context: &impl AppContext, config: StorageConfig) -> Self {
        let config_path = context
            .files_dir()
            .join(APPCONFIG_STORAGE_DIR)
            .join(APPCONFIG_FILE_NAME);

        Self {
            config_path,
            min_size: config.min_size,
        }
    }

    /// Whether a cached config exists and is larger than the threshold.
    ///
    /// Never fails: any I/O error reads as "not available".
    pub async fn is_available(&self) -> bool {
        match fs::metadata(&self.config_path).await {
            Ok(meta) => meta.is_file() && meta.len() > self.min_size,
            Err(e) if e.kind() == ErrorKind::NotFound => false,
            Err(e) => {
                tracing::warn!(
                    "Failed to check app config at {:?}: {}",
                    self.config_path,
                    e
                );
                false
            }
        }
    }

    /// Read the cached config, `None` if nothing is stored
    pub async fn read(&self) -> Result<Option<Vec<u8>>> {
        match fs::read(&self.config_path).await {
            Ok(data) => {
                tracing::debug!("Read app config ({} bytes)", data.len());
                Ok(Some(data))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("No app config stored at {:?}", self.config_path);
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Replace or clear the cached config
    pub async fn write(&self, value: impl Into<ConfigWrite>) -> Result<()> {
        match value.into() {
            ConfigWrite::Store(data) => self.store(&data).await,
            ConfigWrite::Clear => self.clear().await,
        }
    }

    /// Delete the cached config and any staged leftover; a missing file is fine
    pub async fn clear(&self) -> Result<()> {
        if remove_if_present(&self.config_path).await? {
            tracing::debug!("Deleted app config at {:?}", self.config_path);
        }

        let temp_path = self.temp_path();
        if remove_if_present(&temp_path).await? {
            tracing::debug!("Deleted stale staging file {:?}", temp_path);
        }

        Ok(())
    }

    async fn store(&self, data: &[u8]) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let temp_path = self.temp_path();
        if let Err(e) = self.stage_and_rename(&temp_path, data).await {
            if let Err(cleanup) = remove_if_present(&temp_path).await {
                tracing::warn!(
                    "Failed to remove staging file {:?}: {}",
                    temp_path,
                    cleanup
                );
            }
            return Err(e);
        }

        tracing::debug!("Wrote app config ({} bytes)", data.len());

        Ok(())
    }

    // Stage next to the target so the rename stays on one filesystem
    async fn stage_and_rename(&self, temp_path: &Path, data: &[u8]) -> Result<()> {
        let mut file = fs::File::create(temp_path).await?;
        file.write_all(data).await?;
        file.sync_all().await?;
        drop(file);

        fs::rename(temp_path, &self.config_path).await?;

        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        self.config_path.with_extension(APPCONFIG_TEMP_EXTENSION)
    }

    /// Path of the cached config file
    pub fn path(&self) -> &Path {
        &self.config_path
    }

    pub fn min_size(&self) -> u64 {
        self.min_size
    }
}

/// Remove a file, reporting whether anything was there
async fn remove_if_present(path: &Path) -> std::io::Result<bool> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

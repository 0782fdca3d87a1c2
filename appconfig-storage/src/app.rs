//! Application context and initialization
//!
//! The config cache never decides where it lives. The host hands it an
//! [`AppContext`] and the cache derives its path from `files_dir()`.

use crate::error::Result;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Supplies the app's private files directory
pub trait AppContext {
    fn files_dir(&self) -> PathBuf;
}

/// Central application state
#[derive(Debug, Clone)]
pub struct AppState {
    pub app_data_dir: PathBuf,
}

impl AppState {
    pub fn new(app_data_dir: PathBuf) -> Self {
        Self { app_data_dir }
    }

    /// Create the app data and files directories, then return the state
    pub fn setup(app_data_dir: &Path) -> Result<Self> {
        tracing::info!("App data directory: {:?}", app_data_dir);

        let state = Self::new(app_data_dir.to_path_buf());
        std::fs::create_dir_all(&state.app_data_dir)?;
        std::fs::create_dir_all(state.files_dir())?;

        tracing::info!("Application directories initialized");

        Ok(state)
    }
}

impl AppContext for AppState {
    fn files_dir(&self) -> PathBuf {
        self.app_data_dir.join("files")
    }
}

/// Install the global tracing subscriber.
///
/// Honors `RUST_LOG`; a subscriber that is already installed is left alone.
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "appconfig_storage=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_files_dir_below_app_data_dir() {
        let state = AppState::new(PathBuf::from("/data/app"));
        assert_eq!(state.files_dir(), PathBuf::from("/data/app/files"));
    }

    #[test]
    fn test_setup_creates_directories() {
        let temp = TempDir::new().unwrap();
        let app_data_dir = temp.path().join("app");

        let state = AppState::setup(&app_data_dir).unwrap();

        assert!(state.app_data_dir.is_dir());
        assert!(state.files_dir().is_dir());
    }

    #[test]
    fn test_init_tracing_twice() {
        init_tracing();
        init_tracing();
    }
}

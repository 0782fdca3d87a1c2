//! appconfig-storage library
//!
//! Persists the downloaded app configuration blob between runs and reports
//! whether a usable cached copy is present.

pub mod app;
pub mod config;
pub mod error;
pub mod storage;

pub use app::{AppContext, AppState};
pub use config::StorageConfig;
pub use error::{AppError, Result};
pub use storage::{AppConfigStorage, ConfigWrite};

//! Storage module
//!
//! Provides the on-disk cache for the raw app configuration blob.

pub mod appconfig_storage;

pub use appconfig_storage::{AppConfigStorage, ConfigWrite};

//! Configuration management for the field-rep calling engine
//!
//! Supports loading configuration from:
//! - TOML files
//! - Environment variables (FIELDCALL_ prefix)
//!
//! Scoring weights, routing sizes and storage timeouts all default to the
//! engine's stock constants; deployments override only what they need.

pub mod engine;
pub mod settings;

pub use engine::{RoutingConfig, ScoringConfig, StorageConfig};
pub use settings::{load_settings, ServerConfig, Settings};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

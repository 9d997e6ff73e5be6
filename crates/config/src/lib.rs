//! Configuration for the estate pricing calculators
//!
//! Supports loading configuration from:
//! - YAML files (process settings and per-project pricing tables)
//! - Environment variables (`ESTATE_PRICING__` prefix)
//! - Runtime updates through `PricingConfigManager`

pub mod constants;
pub mod domain;
pub mod settings;
pub mod telemetry;

pub use domain::{LoanDefaults, PricingConfigManager, PricingDomainConfig, PricingDomainView};
pub use settings::{
    load_settings, ObservabilityConfig, PricingSettings, RuntimeEnvironment, Settings,
};
pub use telemetry::init_tracing;

use estate_pricing_core::PricingError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Environment error: {0}")]
    Environment(String),
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

impl From<PricingError> for ConfigError {
    fn from(err: PricingError) -> Self {
        ConfigError::InvalidValue {
            field: err.field().unwrap_or("pricing").to_string(),
            message: err.to_string(),
        }
    }
}

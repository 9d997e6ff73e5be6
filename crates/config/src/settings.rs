//! Process-level settings
//!
//! Layered with the `config` crate: `config/default`, then `config/{env}`,
//! then `ESTATE_PRICING__*` environment variables.

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants;
use crate::domain::PricingDomainConfig;
use crate::ConfigError;

/// Runtime environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeEnvironment {
    #[default]
    Development,
    Staging,
    Production,
}

impl RuntimeEnvironment {
    /// Staging and production refuse to run without a project
    pub fn is_strict(&self) -> bool {
        matches!(self, Self::Production | Self::Staging)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub environment: RuntimeEnvironment,

    #[serde(default)]
    pub observability: ObservabilityConfig,

    #[serde(default)]
    pub pricing: PricingSettings,
}

/// Observability configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub log_json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
        }
    }
}

/// Where the project pricing tables live
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingSettings {
    #[serde(default = "default_config_dir")]
    pub config_dir: PathBuf,

    /// Falls back to `PRICING_PROJECT_ID` when unset
    #[serde(default)]
    pub project_id: Option<String>,
}

fn default_config_dir() -> PathBuf {
    PathBuf::from("config")
}

impl Default for PricingSettings {
    fn default() -> Self {
        Self {
            config_dir: default_config_dir(),
            project_id: None,
        }
    }
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

impl Settings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let level = self.observability.log_level.to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "observability.log_level".to_string(),
                message: format!(
                    "expected one of {}, got {}",
                    LOG_LEVELS.join(", "),
                    self.observability.log_level
                ),
            });
        }

        if self.environment.is_strict()
            && self
                .pricing
                .project_id
                .as_deref()
                .map_or(true, |id| id.trim().is_empty())
            && std::env::var(constants::env::PROJECT_ID).is_err()
        {
            return Err(ConfigError::MissingField(format!(
                "pricing.project_id (or {}) is required outside development",
                constants::env::PROJECT_ID
            )));
        }

        Ok(())
    }

    /// Load the configured project's pricing tables
    pub fn load_pricing(&self) -> Result<PricingDomainConfig, ConfigError> {
        match self.pricing.project_id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => PricingDomainConfig::load(id, &self.pricing.config_dir),
            _ => PricingDomainConfig::load_from_env(&self.pricing.config_dir),
        }
    }
}

/// Load settings from files and environment
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    builder = builder.add_source(File::with_name("config/default").required(false));

    if let Some(env_name) = env {
        builder =
            builder.add_source(File::with_name(&format!("config/{}", env_name)).required(false));
    }

    builder = builder.add_source(
        Environment::with_prefix(constants::env::SETTINGS_PREFIX)
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;
    let settings: Settings = config.try_deserialize()?;

    settings.validate()?;

    Ok(settings)
}

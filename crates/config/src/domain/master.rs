//! Project pricing configuration
//!
//! Loads and merges hierarchical YAML configuration:
//! - Base defaults (config/base/defaults.yaml)
//! - Project-specific (config/projects/{project}/pricing.yaml)

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::path::Path;

use estate_pricing_core::{
    AreaFactors, GstPolicy, RateSchedule, ReminderDefaults, StampDutyConfig, StampDutyRate,
};

use crate::constants;
use crate::ConfigError;

/// Home-loan estimate defaults for the EMI widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanDefaults {
    #[serde(default = "default_annual_rate_pct")]
    pub annual_rate_pct: f64,
    #[serde(default = "default_tenure_years")]
    pub tenure_years: u32,
    #[serde(default = "default_max_tenure_years")]
    pub max_tenure_years: u32,
}

fn default_annual_rate_pct() -> f64 {
    constants::loan::DEFAULT_ANNUAL_RATE_PCT
}

fn default_tenure_years() -> u32 {
    constants::loan::DEFAULT_TENURE_YEARS
}

fn default_max_tenure_years() -> u32 {
    constants::loan::MAX_TENURE_YEARS
}

impl Default for LoanDefaults {
    fn default() -> Self {
        Self {
            annual_rate_pct: default_annual_rate_pct(),
            tenure_years: default_tenure_years(),
            max_tenure_years: default_max_tenure_years(),
        }
    }
}

/// Complete pricing configuration for one project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingDomainConfig {
    #[serde(default = "default_project_id")]
    pub project_id: String,
    #[serde(default)]
    pub display_name: String,
    /// Charge rates applied to every unit of the project
    #[serde(default)]
    pub rate_schedule: RateSchedule,
    #[serde(default = "default_floor_rise_from")]
    pub floor_rise_from: i32,
    #[serde(default)]
    pub gst: GstPolicy,
    #[serde(default)]
    pub area_factors: AreaFactors,
    #[serde(default)]
    pub stamp_duty: StampDutyConfig,
    #[serde(default)]
    pub reminders: ReminderDefaults,
    #[serde(default)]
    pub loan: LoanDefaults,

    /// Merged raw document, kept for key-path lookups
    #[serde(skip)]
    pub raw_config: Option<JsonValue>,
}

fn default_project_id() -> String {
    "unconfigured".to_string()
}

fn default_floor_rise_from() -> i32 {
    constants::floor_rise::EXEMPT_UP_TO_FLOOR
}

impl Default for PricingDomainConfig {
    fn default() -> Self {
        Self {
            project_id: default_project_id(),
            display_name: "Unconfigured Project".to_string(),
            rate_schedule: RateSchedule::default(),
            floor_rise_from: default_floor_rise_from(),
            gst: GstPolicy::default(),
            area_factors: AreaFactors::default(),
            stamp_duty: StampDutyConfig::default(),
            reminders: ReminderDefaults::default(),
            loan: LoanDefaults::default(),
            raw_config: None,
        }
    }
}

impl PricingDomainConfig {
    /// Load configuration from a directory structure
    ///
    /// Expects:
    /// - config_dir/base/defaults.yaml (optional)
    /// - config_dir/projects/{project_id}/pricing.yaml
    pub fn load(project_id: &str, config_dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();

        let base_path = config_dir.join("base/defaults.yaml");
        let base_config: Option<JsonValue> = if base_path.exists() {
            Some(read_yaml(&base_path, "base")?)
        } else {
            tracing::debug!("No base config found at {:?}", base_path);
            None
        };

        let project_path = config_dir.join(format!("projects/{}/pricing.yaml", project_id));
        if !project_path.exists() {
            return Err(ConfigError::FileNotFound(project_path.display().to_string()));
        }
        let project_config = read_yaml(&project_path, "project")?;

        // Project overrides base
        let merged = match base_config {
            Some(base) => merge_json(base, project_config),
            None => project_config,
        };

        let mut config: PricingDomainConfig = serde_json::from_value(merged.clone())
            .map_err(|e| ConfigError::ParseError(format!("Failed to parse merged config: {}", e)))?;
        if config.project_id == default_project_id() {
            config.project_id = project_id.to_string();
        }
        config.raw_config = Some(merged);
        config.validate()?;

        tracing::info!(
            project_id = %config.project_id,
            stamp_duty_rates = config.stamp_duty.rates.len(),
            gst_default = config.gst.default_rate,
            "Loaded pricing configuration"
        );

        Ok(config)
    }

    /// Load the project named by `PRICING_PROJECT_ID`
    pub fn load_from_env(config_dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let project_id = std::env::var(constants::env::PROJECT_ID).map_err(|_| {
            ConfigError::MissingField(format!(
                "{} environment variable is not set. Set it to the name of a directory \
                 under config/projects/.",
                constants::env::PROJECT_ID
            ))
        })?;

        if project_id.trim().is_empty() {
            return Err(ConfigError::MissingField(format!(
                "{} environment variable is empty",
                constants::env::PROJECT_ID
            )));
        }

        Self::load(project_id.trim(), config_dir)
    }

    /// Load a single self-contained YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }
        let value = read_yaml(path, "pricing")?;
        Self::from_value(value)
    }

    /// Load a single self-contained JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ParseError(format!("Failed to read {:?}: {}", path, e)))?;
        let value: JsonValue = serde_json::from_str(&content)
            .map_err(|e| ConfigError::ParseError(format!("Failed to parse {:?}: {}", path, e)))?;
        Self::from_value(value)
    }

    fn from_value(value: JsonValue) -> Result<Self, ConfigError> {
        let mut config: PricingDomainConfig = serde_json::from_value(value.clone())
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.raw_config = Some(value);
        config.validate()?;
        Ok(config)
    }

    /// Reject tables the calculators cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.rate_schedule.validate()?;
        self.area_factors.validate()?;
        self.stamp_duty.validate()?;

        if self.floor_rise_from < 0 {
            return Err(ConfigError::InvalidValue {
                field: "floor_rise_from".to_string(),
                message: format!("cannot be negative, got {}", self.floor_rise_from),
            });
        }

        self.gst.validate()?;
        self.reminders.validate()?;

        if !self.loan.annual_rate_pct.is_finite() || self.loan.annual_rate_pct < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "loan.annual_rate_pct".to_string(),
                message: format!("must be zero or positive, got {}", self.loan.annual_rate_pct),
            });
        }
        if self.loan.tenure_years == 0 || self.loan.tenure_years > self.loan.max_tenure_years {
            return Err(ConfigError::InvalidValue {
                field: "loan.tenure_years".to_string(),
                message: format!(
                    "must be between 1 and {}, got {}",
                    self.loan.max_tenure_years, self.loan.tenure_years
                ),
            });
        }

        Ok(())
    }

    /// Get a value by dot-notation key path, e.g. "rate_schedule.basic_rate"
    pub fn get_value(&self, key_path: &str) -> Option<JsonValue> {
        let mut current = self.raw_config.as_ref()?;
        for part in key_path.split('.') {
            current = current.get(part)?;
        }
        Some(current.clone())
    }

    pub fn stamp_duty_rate(&self, jurisdiction: &str, property_type: &str) -> Option<&StampDutyRate> {
        self.stamp_duty
            .rates
            .iter()
            .rev()
            .find(|r| r.matches(jurisdiction, property_type))
    }
}

fn read_yaml(path: &Path, what: &str) -> Result<JsonValue, ConfigError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::ParseError(format!("Failed to read {} config: {}", what, e)))?;
    serde_yaml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("Failed to parse {} config: {}", what, e)))
}

/// Deep merge two JSON values (right overrides left)
pub(crate) fn merge_json(left: JsonValue, right: JsonValue) -> JsonValue {
    match (left, right) {
        (JsonValue::Object(mut left_map), JsonValue::Object(right_map)) => {
            for (key, right_val) in right_map {
                let merged_val = if let Some(left_val) = left_map.remove(&key) {
                    merge_json(left_val, right_val)
                } else {
                    right_val
                };
                left_map.insert(key, merged_val);
            }
            JsonValue::Object(left_map)
        }
        (_, right) => right,
    }
}

//! Holds the active pricing configuration and swaps it on reload

use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use estate_pricing_core::ConfigDrivenCalculator;

use super::master::PricingDomainConfig;
use super::views::PricingDomainView;
use crate::ConfigError;

/// Pricing configuration manager
///
/// Readers take an `Arc` snapshot, so a reload never changes a computation
/// that is already running.
#[derive(Debug, Clone)]
pub struct PricingConfigManager {
    config: Arc<RwLock<Arc<PricingDomainConfig>>>,
    config_path: Option<PathBuf>,
}

impl Default for PricingConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl PricingConfigManager {
    /// Create new manager with default config
    pub fn new() -> Self {
        Self::with_config(PricingDomainConfig::default())
    }

    pub fn with_config(config: PricingDomainConfig) -> Self {
        Self {
            config: Arc::new(RwLock::new(Arc::new(config))),
            config_path: None,
        }
    }

    /// Load from a YAML (`.yaml`/`.yml`) or JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref().to_path_buf();
        let config = load_file(&path)?;
        Ok(Self {
            config: Arc::new(RwLock::new(Arc::new(config))),
            config_path: Some(path),
        })
    }

    /// Reload configuration from file; the old snapshot stays if loading fails
    pub fn reload(&self) -> Result<(), ConfigError> {
        let path = self
            .config_path
            .as_ref()
            .ok_or_else(|| ConfigError::FileNotFound("No config path set".to_string()))?;

        let new_config = load_file(path)?;
        tracing::info!(
            project_id = %new_config.project_id,
            path = %path.display(),
            "Reloaded pricing configuration"
        );
        *self.config.write() = Arc::new(new_config);
        Ok(())
    }

    /// Current configuration snapshot
    pub fn get(&self) -> Arc<PricingDomainConfig> {
        Arc::clone(&self.config.read())
    }

    /// Replace the configuration after validating it
    pub fn update(&self, config: PricingDomainConfig) -> Result<(), ConfigError> {
        config.validate()?;
        *self.config.write() = Arc::new(config);
        Ok(())
    }

    pub fn view(&self) -> PricingDomainView {
        PricingDomainView::new(self.get())
    }

    /// Fresh calculator built from the current snapshot
    pub fn calculator(&self) -> Result<ConfigDrivenCalculator, ConfigError> {
        Ok(self.view().calculator()?)
    }
}

fn load_file(path: &Path) -> Result<PricingDomainConfig, ConfigError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => PricingDomainConfig::from_yaml_file(path),
        _ => PricingDomainConfig::from_json_file(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use estate_pricing_core::{PricingCalculator, UnitInput};

    #[test]
    fn test_update_and_snapshot() {
        let manager = PricingConfigManager::new();
        let before = manager.get();

        let mut config = PricingDomainConfig::default();
        config.rate_schedule.basic_rate = 4200.0;
        manager.update(config).unwrap();

        // old snapshot is untouched
        assert_eq!(before.rate_schedule.basic_rate, 0.0);
        assert_eq!(manager.get().rate_schedule.basic_rate, 4200.0);
    }

    #[test]
    fn test_update_rejects_invalid() {
        let manager = PricingConfigManager::new();
        let mut config = PricingDomainConfig::default();
        config.rate_schedule.development = -1.0;
        assert!(manager.update(config).is_err());
        assert_eq!(manager.get().rate_schedule.development, 0.0);
    }

    #[test]
    fn test_reload_without_path() {
        let manager = PricingConfigManager::new();
        assert!(matches!(manager.reload(), Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_calculator_from_current_config() {
        let mut config = PricingDomainConfig::default();
        config.floor_rise_from = 0;
        let manager = PricingConfigManager::with_config(config);
        let sheet = manager
            .calculator()
            .unwrap()
            .build_cost_sheet(
                &UnitInput::sqft(500.0, 3),
                &manager.get().rate_schedule,
                None,
            )
            .unwrap();
        assert_eq!(sheet.chargeable_floors, 3);
    }
}

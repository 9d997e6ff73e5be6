//! Operator-configured charge rates
//!
//! Rates are per square foot except `other_charges`, which is a fixed
//! amount per unit. Missing fields deserialize to zero.

use serde::{Deserialize, Serialize};

use crate::error::{PricingError, Result};

/// Per-area and fixed charge rates used to price a unit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateSchedule {
    /// Basic sale price per sqft
    pub basic_rate: f64,
    /// Development charges per sqft
    pub development: f64,
    /// DG power backup per sqft
    pub dg_backup: f64,
    /// Club house / recreation per sqft
    pub recreation: f64,
    /// Society formation and legal charges per sqft
    pub society_legal: f64,
    /// Floor rise per sqft per chargeable floor
    pub floor_rise: f64,
    /// Fixed amount, independent of area and floor
    pub other_charges: f64,
}

impl RateSchedule {
    /// Field names paired with their values, in cost-sheet order
    pub fn fields(&self) -> [(&'static str, f64); 7] {
        [
            ("basic_rate", self.basic_rate),
            ("development", self.development),
            ("dg_backup", self.dg_backup),
            ("recreation", self.recreation),
            ("society_legal", self.society_legal),
            ("floor_rise", self.floor_rise),
            ("other_charges", self.other_charges),
        ]
    }

    /// All rates must be finite and non-negative
    pub fn validate(&self) -> Result<()> {
        for (field, value) in self.fields() {
            if !value.is_finite() || value < 0.0 {
                return Err(PricingError::invalid_schedule(
                    field,
                    format!("rate must be a non-negative number, got {}", value),
                ));
            }
        }
        Ok(())
    }

    /// Apply per-unit overrides on top of this schedule
    pub fn with_overrides(&self, overrides: &RateOverrides) -> RateSchedule {
        RateSchedule {
            basic_rate: overrides.basic_rate.unwrap_or(self.basic_rate),
            development: overrides.development.unwrap_or(self.development),
            dg_backup: overrides.dg_backup.unwrap_or(self.dg_backup),
            recreation: overrides.recreation.unwrap_or(self.recreation),
            society_legal: overrides.society_legal.unwrap_or(self.society_legal),
            floor_rise: overrides.floor_rise.unwrap_or(self.floor_rise),
            other_charges: overrides.other_charges.unwrap_or(self.other_charges),
        }
    }
}

/// Rate overrides entered for a single unit on the booking form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateOverrides {
    pub basic_rate: Option<f64>,
    pub development: Option<f64>,
    pub dg_backup: Option<f64>,
    pub recreation: Option<f64>,
    pub society_legal: Option<f64>,
    pub floor_rise: Option<f64>,
    pub other_charges: Option<f64>,
}

impl RateOverrides {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_default_to_zero() {
        let schedule: RateSchedule =
            serde_json::from_str(r#"{"basic_rate": 5500.0, "other_charges": 150000}"#).unwrap();
        assert_eq!(schedule.basic_rate, 5500.0);
        assert_eq!(schedule.other_charges, 150_000.0);
        assert_eq!(schedule.development, 0.0);
        assert_eq!(schedule.floor_rise, 0.0);
        assert!(schedule.validate().is_ok());
    }

    #[test]
    fn test_negative_rate_rejected() {
        let schedule = RateSchedule {
            basic_rate: 5000.0,
            recreation: -10.0,
            ..Default::default()
        };
        match schedule.validate() {
            Err(PricingError::InvalidSchedule { field, .. }) => assert_eq!(field, "recreation"),
            other => panic!("expected InvalidSchedule, got {:?}", other),
        }
    }

    #[test]
    fn test_non_finite_rate_rejected() {
        let schedule = RateSchedule {
            floor_rise: f64::INFINITY,
            ..Default::default()
        };
        assert!(schedule.validate().is_err());
    }

    #[test]
    fn test_overrides() {
        let schedule = RateSchedule {
            basic_rate: 5000.0,
            development: 200.0,
            ..Default::default()
        };
        let overrides = RateOverrides {
            basic_rate: Some(5200.0),
            ..Default::default()
        };
        let merged = schedule.with_overrides(&overrides);
        assert_eq!(merged.basic_rate, 5200.0);
        assert_eq!(merged.development, 200.0);
        assert!(!overrides.is_empty());
        assert!(RateOverrides::default().is_empty());
    }
}

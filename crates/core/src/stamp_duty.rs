//! Stamp duty, registration and GST on a property transaction
//!
//! Rates come from an operator-maintained table keyed by jurisdiction and
//! property type. Registration and GST percentages are configuration too.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::defaults;
use crate::error::{PricingError, Result};

/// One row of the stamp-duty table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StampDutyRate {
    pub jurisdiction: String,
    pub property_type: String,
    /// Fraction of property value, e.g. 0.05 for 5%
    pub rate: f64,
}

impl StampDutyRate {
    pub fn new(jurisdiction: impl Into<String>, property_type: impl Into<String>, rate: f64) -> Self {
        Self {
            jurisdiction: jurisdiction.into(),
            property_type: property_type.into(),
            rate,
        }
    }

    /// Same trimmed, case-insensitive match the calculator's lookup uses
    pub fn matches(&self, jurisdiction: &str, property_type: &str) -> bool {
        table_key(&self.jurisdiction, &self.property_type)
            == table_key(jurisdiction, property_type)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StampDutyConfig {
    #[serde(default)]
    pub rates: Vec<StampDutyRate>,
    /// Registration fee as a fraction of property value
    #[serde(default = "default_registration_pct")]
    pub registration_pct: f64,
    /// Upper bound on the registration fee, if the jurisdiction caps it
    #[serde(default)]
    pub registration_fee_cap: Option<f64>,
    /// GST as a fraction of property value
    #[serde(default = "default_gst_pct")]
    pub gst_pct: f64,
}

fn default_registration_pct() -> f64 {
    defaults::stamp_duty::REGISTRATION_PCT
}

fn default_gst_pct() -> f64 {
    defaults::stamp_duty::GST_PCT
}

impl Default for StampDutyConfig {
    fn default() -> Self {
        Self {
            rates: Vec::new(),
            registration_pct: default_registration_pct(),
            registration_fee_cap: None,
            gst_pct: default_gst_pct(),
        }
    }
}

impl StampDutyConfig {
    pub fn with_rate(
        mut self,
        jurisdiction: impl Into<String>,
        property_type: impl Into<String>,
        rate: f64,
    ) -> Self {
        self.rates
            .push(StampDutyRate::new(jurisdiction, property_type, rate));
        self
    }

    pub fn validate(&self) -> Result<()> {
        for entry in &self.rates {
            check_fraction(
                &format!("stamp_duty.{}.{}", entry.jurisdiction, entry.property_type),
                entry.rate,
            )?;
        }
        check_fraction("registration_pct", self.registration_pct)?;
        check_fraction("gst_pct", self.gst_pct)?;
        if let Some(cap) = self.registration_fee_cap {
            if !cap.is_finite() || cap < 0.0 {
                return Err(PricingError::invalid_schedule(
                    "registration_fee_cap",
                    format!("must be a non-negative amount, got {}", cap),
                ));
            }
        }
        Ok(())
    }
}

fn check_fraction(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(PricingError::invalid_schedule(
            field,
            format!("must be a fraction between 0 and 1, got {}", value),
        ));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StampDutyResult {
    pub property_value: f64,
    pub jurisdiction_rate: f64,
    pub stamp_duty: f64,
    pub registration_fee: f64,
    pub gst_amount: f64,
    pub total: f64,
}

fn table_key(jurisdiction: &str, property_type: &str) -> (String, String) {
    (
        jurisdiction.trim().to_lowercase(),
        property_type.trim().to_lowercase(),
    )
}

#[derive(Debug, Clone)]
pub struct StampDutyCalculator {
    rates: HashMap<(String, String), f64>,
    registration_pct: f64,
    registration_fee_cap: Option<f64>,
    gst_pct: f64,
}

impl Default for StampDutyCalculator {
    fn default() -> Self {
        Self::from_validated(StampDutyConfig::default())
    }
}

impl StampDutyCalculator {
    /// Build the lookup table after validating it. Later rows win over
    /// earlier duplicates.
    pub fn new(config: StampDutyConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_validated(config))
    }

    fn from_validated(config: StampDutyConfig) -> Self {
        let rates = config
            .rates
            .iter()
            .map(|r| (table_key(&r.jurisdiction, &r.property_type), r.rate))
            .collect();

        Self {
            rates,
            registration_pct: config.registration_pct,
            registration_fee_cap: config.registration_fee_cap,
            gst_pct: config.gst_pct,
        }
    }

    /// Case-insensitive rate lookup
    pub fn rate_for(&self, jurisdiction: &str, property_type: &str) -> Option<f64> {
        self.rates
            .get(&table_key(jurisdiction, property_type))
            .copied()
    }

    pub fn jurisdictions(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.rates.keys().map(|(j, _)| j.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        names
    }

    pub fn compute(
        &self,
        property_value: f64,
        jurisdiction: &str,
        property_type: &str,
    ) -> Result<StampDutyResult> {
        if !property_value.is_finite() || property_value <= 0.0 {
            return Err(PricingError::invalid_amount(
                "property_value",
                format!("must be greater than zero, got {}", property_value),
            ));
        }

        let jurisdiction_rate = self
            .rate_for(jurisdiction, property_type)
            .ok_or_else(|| {
                tracing::warn!(
                    jurisdiction,
                    property_type,
                    configured = ?self.jurisdictions(),
                    "No stamp-duty rate configured"
                );
                PricingError::UnknownJurisdiction {
                    jurisdiction: jurisdiction.to_string(),
                    property_type: property_type.to_string(),
                }
            })?;

        let stamp_duty = property_value * jurisdiction_rate;
        let mut registration_fee = property_value * self.registration_pct;
        if let Some(cap) = self.registration_fee_cap {
            registration_fee = registration_fee.min(cap);
        }
        let gst_amount = property_value * self.gst_pct;
        let total = stamp_duty + registration_fee + gst_amount;

        tracing::debug!(
            property_value,
            jurisdiction,
            property_type,
            jurisdiction_rate,
            total,
            "Computed stamp duty"
        );

        Ok(StampDutyResult {
            property_value,
            jurisdiction_rate,
            stamp_duty,
            registration_fee,
            gst_amount,
            total,
        })
    }
}

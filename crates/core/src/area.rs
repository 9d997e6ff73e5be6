//! Area unit conversion
//!
//! All conversions go through square feet. Each factor is the number of
//! square feet in one unit, so `sqft = value * factor[from]` and
//! `result = sqft / factor[to]`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{PricingError, Result};
use crate::money::round_dp;

/// Decimal places kept in `AreaConversion::display_value`
pub const DISPLAY_DECIMALS: u32 = 4;

/// Supported area units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AreaUnit {
    #[default]
    Sqft,
    Sqm,
    Sqyard,
    Acre,
    Hectare,
}

impl AreaUnit {
    pub const ALL: [AreaUnit; 5] = [
        AreaUnit::Sqft,
        AreaUnit::Sqm,
        AreaUnit::Sqyard,
        AreaUnit::Acre,
        AreaUnit::Hectare,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sqft => "sqft",
            Self::Sqm => "sqm",
            Self::Sqyard => "sqyard",
            Self::Acre => "acre",
            Self::Hectare => "hectare",
        }
    }
}

impl fmt::Display for AreaUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AreaUnit {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| !matches!(c, '.' | ' ' | '_' | '-'))
            .collect();

        match normalized.as_str() {
            "sqft" | "squarefeet" | "squarefoot" | "ft2" => Ok(Self::Sqft),
            "sqm" | "squaremeter" | "squaremetre" | "m2" => Ok(Self::Sqm),
            "sqyard" | "sqyd" | "squareyard" | "gaj" => Ok(Self::Sqyard),
            "acre" | "acres" => Ok(Self::Acre),
            "hectare" | "hectares" | "ha" => Ok(Self::Hectare),
            _ => Err(PricingError::invalid_unit(
                "area_unit",
                format!("unknown area unit '{}'", s),
            )),
        }
    }
}

/// Square feet per one unit of each area unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaFactors {
    #[serde(default = "default_sqft")]
    pub sqft: f64,
    #[serde(default = "default_sqm")]
    pub sqm: f64,
    #[serde(default = "default_sqyard")]
    pub sqyard: f64,
    #[serde(default = "default_acre")]
    pub acre: f64,
    #[serde(default = "default_hectare")]
    pub hectare: f64,
}

fn default_sqft() -> f64 {
    1.0
}

fn default_sqm() -> f64 {
    10.764
}

fn default_sqyard() -> f64 {
    9.0
}

fn default_acre() -> f64 {
    43_560.0
}

fn default_hectare() -> f64 {
    107_639.0
}

impl Default for AreaFactors {
    fn default() -> Self {
        Self {
            sqft: default_sqft(),
            sqm: default_sqm(),
            sqyard: default_sqyard(),
            acre: default_acre(),
            hectare: default_hectare(),
        }
    }
}

impl AreaFactors {
    pub fn factor(&self, unit: AreaUnit) -> f64 {
        match unit {
            AreaUnit::Sqft => self.sqft,
            AreaUnit::Sqm => self.sqm,
            AreaUnit::Sqyard => self.sqyard,
            AreaUnit::Acre => self.acre,
            AreaUnit::Hectare => self.hectare,
        }
    }

    /// Every factor must be finite and strictly positive
    pub fn validate(&self) -> Result<()> {
        for unit in AreaUnit::ALL {
            let factor = self.factor(unit);
            if !factor.is_finite() || factor <= 0.0 {
                return Err(PricingError::invalid_unit(
                    format!("area_factors.{}", unit),
                    format!("conversion factor must be positive, got {}", factor),
                ));
            }
        }
        Ok(())
    }
}

/// Result of a conversion with both the raw and the display value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AreaConversion {
    /// Unrounded value, use this for chained computation
    pub value: f64,
    /// Value rounded to four decimals for display
    pub display_value: f64,
    pub from: AreaUnit,
    pub to: AreaUnit,
}

/// Converts areas between units using an injected factor table
#[derive(Debug, Clone, Default)]
pub struct AreaConverter {
    factors: AreaFactors,
}

impl AreaConverter {
    pub fn new(factors: AreaFactors) -> Self {
        Self { factors }
    }

    pub fn factors(&self) -> &AreaFactors {
        &self.factors
    }

    /// Convert `value` from one unit to another, unrounded
    pub fn convert(&self, value: f64, from: AreaUnit, to: AreaUnit) -> Result<f64> {
        if !value.is_finite() || value < 0.0 {
            return Err(PricingError::invalid_unit(
                "area_value",
                format!("must be a finite non-negative number, got {}", value),
            ));
        }
        if from == to {
            return Ok(value);
        }

        let from_factor = self.checked_factor(from)?;
        let to_factor = self.checked_factor(to)?;
        Ok(value * from_factor / to_factor)
    }

    /// Convert and also produce the display-rounded value
    pub fn convert_detailed(
        &self,
        value: f64,
        from: AreaUnit,
        to: AreaUnit,
    ) -> Result<AreaConversion> {
        let raw = self.convert(value, from, to)?;
        Ok(AreaConversion {
            value: raw,
            display_value: round_dp(raw, DISPLAY_DECIMALS),
            from,
            to,
        })
    }

    /// Convert using unit names as they arrive from forms
    pub fn convert_named(&self, value: f64, from: &str, to: &str) -> Result<f64> {
        let from: AreaUnit = from.parse()?;
        let to: AreaUnit = to.parse()?;
        self.convert(value, from, to)
    }

    pub fn to_sqft(&self, value: f64, unit: AreaUnit) -> Result<f64> {
        self.convert(value, unit, AreaUnit::Sqft)
    }

    fn checked_factor(&self, unit: AreaUnit) -> Result<f64> {
        let factor = self.factors.factor(unit);
        if !factor.is_finite() || factor <= 0.0 {
            return Err(PricingError::invalid_unit(
                "area_unit",
                format!("no usable conversion factor for {}", unit),
            ));
        }
        Ok(factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqft_to_sqm() {
        let converter = AreaConverter::default();
        let sqm = converter.convert(1000.0, AreaUnit::Sqft, AreaUnit::Sqm).unwrap();
        assert!((sqm - 92.9).abs() < 0.01, "expected ~92.9, got {}", sqm);

        let back = converter.convert(sqm, AreaUnit::Sqm, AreaUnit::Sqft).unwrap();
        assert!((back - 1000.0).abs() / 1000.0 < 1e-3);
    }

    #[test]
    fn test_display_rounding_keeps_raw_value() {
        let converter = AreaConverter::default();
        let conversion = converter
            .convert_detailed(1000.0, AreaUnit::Sqft, AreaUnit::Sqm)
            .unwrap();
        assert_eq!(conversion.display_value, 92.9023);
        assert_ne!(conversion.value, conversion.display_value);
    }

    #[test]
    fn test_large_units() {
        let converter = AreaConverter::default();
        assert_eq!(
            converter.convert(1.0, AreaUnit::Acre, AreaUnit::Sqft).unwrap(),
            43_560.0
        );
        assert_eq!(
            converter.convert(18.0, AreaUnit::Sqft, AreaUnit::Sqyard).unwrap(),
            2.0
        );
        let acres = converter
            .convert(1.0, AreaUnit::Hectare, AreaUnit::Acre)
            .unwrap();
        assert!((acres - 2.471).abs() < 0.001);
    }

    #[test]
    fn test_same_unit_is_identity() {
        let converter = AreaConverter::default();
        assert_eq!(
            converter.convert(123.45, AreaUnit::Sqm, AreaUnit::Sqm).unwrap(),
            123.45
        );
    }

    #[test]
    fn test_rejects_negative_and_nan() {
        let converter = AreaConverter::default();
        assert!(matches!(
            converter.convert(-1.0, AreaUnit::Sqft, AreaUnit::Sqm),
            Err(PricingError::InvalidUnit { .. })
        ));
        assert!(converter
            .convert(f64::NAN, AreaUnit::Sqft, AreaUnit::Sqm)
            .is_err());
        assert_eq!(
            converter.convert(0.0, AreaUnit::Sqft, AreaUnit::Sqm).unwrap(),
            0.0
        );
    }

    #[test]
    fn test_unit_parsing() {
        assert_eq!("sq.ft".parse::<AreaUnit>().unwrap(), AreaUnit::Sqft);
        assert_eq!("SQM".parse::<AreaUnit>().unwrap(), AreaUnit::Sqm);
        assert_eq!("sq yd".parse::<AreaUnit>().unwrap(), AreaUnit::Sqyard);
        assert_eq!("ha".parse::<AreaUnit>().unwrap(), AreaUnit::Hectare);
        assert!(matches!(
            "bigha".parse::<AreaUnit>(),
            Err(PricingError::InvalidUnit { .. })
        ));
    }

    #[test]
    fn test_convert_named_unknown_unit() {
        let converter = AreaConverter::default();
        assert!(converter.convert_named(10.0, "sqft", "cubit").is_err());
        let sqft = converter.convert_named(10.0, "sqm", "sqft").unwrap();
        assert!((sqft - 107.64).abs() < 1e-9);
    }

    #[test]
    fn test_injected_factors() {
        let factors = AreaFactors {
            sqm: 10.7639,
            ..AreaFactors::default()
        };
        let converter = AreaConverter::new(factors);
        let sqft = converter.to_sqft(100.0, AreaUnit::Sqm).unwrap();
        assert!((sqft - 1076.39).abs() < 1e-9);
    }

    #[test]
    fn test_factor_validation() {
        assert!(AreaFactors::default().validate().is_ok());
        let bad = AreaFactors {
            acre: 0.0,
            ..AreaFactors::default()
        };
        assert!(bad.validate().is_err());
    }
}

//! Per-unit cost sheet generation
//!
//! Turns one unit's area and floor plus a `RateSchedule` into an itemized
//! breakdown. GST is charged on the full subtotal, fixed charges included.

use serde::{Deserialize, Serialize};

use crate::area::{AreaConverter, AreaUnit};
use crate::defaults;
use crate::error::{PricingError, Result};
use crate::rate_schedule::{RateOverrides, RateSchedule};

/// Floors up to and including this one carry no floor-rise charge
pub const DEFAULT_FLOOR_RISE_FROM: i32 = defaults::floor_rise::EXEMPT_UP_TO_FLOOR;

/// Physical attributes of the unit being priced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitInput {
    /// Inventory identifier, carried through for display only
    #[serde(default)]
    pub unit_id: Option<String>,
    pub area_value: f64,
    #[serde(default)]
    pub area_unit: AreaUnit,
    #[serde(default)]
    pub floor: i32,
    #[serde(default)]
    pub rate_overrides: RateOverrides,
}

impl UnitInput {
    pub fn new(area_value: f64, area_unit: AreaUnit, floor: i32) -> Self {
        Self {
            unit_id: None,
            area_value,
            area_unit,
            floor,
            rate_overrides: RateOverrides::default(),
        }
    }

    pub fn sqft(area_value: f64, floor: i32) -> Self {
        Self::new(area_value, AreaUnit::Sqft, floor)
    }

    pub fn with_id(mut self, unit_id: impl Into<String>) -> Self {
        self.unit_id = Some(unit_id.into());
        self
    }

    pub fn with_overrides(mut self, overrides: RateOverrides) -> Self {
        self.rate_overrides = overrides;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.area_value.is_finite() || self.area_value <= 0.0 {
            return Err(PricingError::invalid_unit(
                "area_value",
                format!("area must be greater than zero, got {}", self.area_value),
            ));
        }
        if self.floor < 0 {
            return Err(PricingError::invalid_unit(
                "floor",
                format!("floor cannot be negative, got {}", self.floor),
            ));
        }
        Ok(())
    }
}

/// One labelled row of a cost sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostSheetLine {
    pub label: String,
    pub amount: f64,
}

impl CostSheetLine {
    fn new(label: &str, amount: f64) -> Self {
        Self {
            label: label.to_string(),
            amount,
        }
    }

    /// Zero-valued rows render as "included"
    pub fn is_included(&self) -> bool {
        self.amount == 0.0
    }
}

/// Itemized pricing for one unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostSheet {
    #[serde(default)]
    pub unit_id: Option<String>,
    /// Area in square feet the rates were applied to
    pub area_sqft: f64,
    pub chargeable_floors: u32,
    pub lines: Vec<CostSheetLine>,
    pub subtotal: f64,
    pub gst_rate: f64,
    pub gst_amount: f64,
    pub total: f64,
}

impl CostSheet {
    pub fn line(&self, label: &str) -> Option<&CostSheetLine> {
        self.lines.iter().find(|l| l.label == label)
    }
}

pub mod labels {
    pub const BASIC: &str = "Basic Cost";
    pub const DEVELOPMENT: &str = "Development Charges";
    pub const DG_BACKUP: &str = "DG Backup";
    pub const RECREATION: &str = "Recreation / Club House";
    pub const SOCIETY_LEGAL: &str = "Society & Legal Charges";
    pub const FLOOR_RISE: &str = "Floor Rise";
    pub const OTHER: &str = "Other Charges";
}

/// GST rate must be a fraction in [0, 1]
pub fn validate_gst_rate(gst_rate: f64) -> Result<()> {
    if !gst_rate.is_finite() || !(0.0..=1.0).contains(&gst_rate) {
        return Err(PricingError::invalid_schedule(
            "gst_rate",
            format!("must be a fraction between 0 and 1, got {}", gst_rate),
        ));
    }
    Ok(())
}

/// Builds cost sheets. Holds only immutable configuration.
#[derive(Debug, Clone)]
pub struct CostSheetEngine {
    converter: AreaConverter,
    floor_rise_from: i32,
}

impl Default for CostSheetEngine {
    fn default() -> Self {
        Self::new(AreaConverter::default())
    }
}

impl CostSheetEngine {
    pub fn new(converter: AreaConverter) -> Self {
        Self {
            converter,
            floor_rise_from: DEFAULT_FLOOR_RISE_FROM,
        }
    }

    /// Change the last floor exempt from floor rise
    pub fn with_floor_rise_from(mut self, floor: i32) -> Self {
        self.floor_rise_from = floor.max(0);
        self
    }

    pub fn converter(&self) -> &AreaConverter {
        &self.converter
    }

    /// Floors above the exempt threshold; floor 7 is the first chargeable one
    pub fn chargeable_floors(&self, floor: i32) -> u32 {
        (floor - self.floor_rise_from).max(0) as u32
    }

    pub fn build_cost_sheet(
        &self,
        unit: &UnitInput,
        schedule: &RateSchedule,
        gst_rate: f64,
    ) -> Result<CostSheet> {
        unit.validate()?;
        validate_gst_rate(gst_rate)?;

        let rates = if unit.rate_overrides.is_empty() {
            schedule.clone()
        } else {
            schedule.with_overrides(&unit.rate_overrides)
        };
        rates.validate()?;

        let area = self.converter.to_sqft(unit.area_value, unit.area_unit)?;
        let chargeable_floors = self.chargeable_floors(unit.floor);

        let lines = vec![
            CostSheetLine::new(labels::BASIC, rates.basic_rate * area),
            CostSheetLine::new(labels::DEVELOPMENT, rates.development * area),
            CostSheetLine::new(labels::DG_BACKUP, rates.dg_backup * area),
            CostSheetLine::new(labels::RECREATION, rates.recreation * area),
            CostSheetLine::new(labels::SOCIETY_LEGAL, rates.society_legal * area),
            CostSheetLine::new(
                labels::FLOOR_RISE,
                rates.floor_rise * area * chargeable_floors as f64,
            ),
            CostSheetLine::new(labels::OTHER, rates.other_charges),
        ];

        let subtotal: f64 = lines.iter().map(|l| l.amount).sum();
        let gst_amount = subtotal * gst_rate;
        let total = subtotal + gst_amount;

        tracing::debug!(
            unit_id = ?unit.unit_id,
            area_sqft = area,
            floor = unit.floor,
            chargeable_floors,
            subtotal,
            gst_rate,
            total,
            "Built cost sheet"
        );

        Ok(CostSheet {
            unit_id: unit.unit_id.clone(),
            area_sqft: area,
            chargeable_floors,
            lines,
            subtotal,
            gst_rate,
            gst_amount,
            total,
        })
    }
}

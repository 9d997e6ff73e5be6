//! Multi-unit pricing
//!
//! Prices each selected unit independently, sums the per-unit totals and
//! applies the discount once to that sum.

use serde::{Deserialize, Serialize};

use crate::cost_sheet::{CostSheet, CostSheetEngine, UnitInput};
use crate::discount::apply_discount;
use crate::error::{PricingError, Result};
use crate::rate_schedule::RateSchedule;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateCostSheet {
    /// One sheet per selected unit, in selection order
    pub unit_sheets: Vec<CostSheet>,
    /// Sum of every unit's GST-inclusive total
    pub combined_subtotal: f64,
    pub discount_pct: f64,
    pub discount_amount: f64,
    pub grand_total: f64,
}

impl AggregateCostSheet {
    pub fn unit_count(&self) -> usize {
        self.unit_sheets.len()
    }

    pub fn total_area_sqft(&self) -> f64 {
        self.unit_sheets.iter().map(|s| s.area_sqft).sum()
    }

    pub fn total_gst(&self) -> f64 {
        self.unit_sheets.iter().map(|s| s.gst_amount).sum()
    }
}

#[derive(Debug, Clone, Default)]
pub struct MultiUnitAggregator {
    engine: CostSheetEngine,
}

impl MultiUnitAggregator {
    pub fn new(engine: CostSheetEngine) -> Self {
        Self { engine }
    }

    pub fn aggregate(
        &self,
        units: &[UnitInput],
        schedule: &RateSchedule,
        gst_rate: f64,
        discount_pct: f64,
    ) -> Result<AggregateCostSheet> {
        if units.is_empty() {
            return Err(PricingError::EmptySelection);
        }

        let unit_sheets = units
            .iter()
            .map(|unit| self.engine.build_cost_sheet(unit, schedule, gst_rate))
            .collect::<Result<Vec<_>>>()?;

        let combined_subtotal: f64 = unit_sheets.iter().map(|s| s.total).sum();
        let discount = apply_discount(combined_subtotal, discount_pct)?;

        tracing::debug!(
            units = unit_sheets.len(),
            combined_subtotal,
            discount_pct,
            grand_total = discount.final_amount,
            "Aggregated multi-unit cost sheet"
        );

        Ok(AggregateCostSheet {
            unit_sheets,
            combined_subtotal,
            discount_pct,
            discount_amount: discount.discount_amount,
            grand_total: discount.final_amount,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::area::AreaUnit;

    fn schedule() -> RateSchedule {
        RateSchedule {
            basic_rate: 4800.0,
            development: 200.0,
            dg_backup: 40.0,
            recreation: 60.0,
            society_legal: 25.0,
            floor_rise: 20.0,
            other_charges: 75_000.0,
        }
    }

    fn units() -> Vec<UnitInput> {
        vec![
            UnitInput::sqft(950.0, 2).with_id("A-201"),
            UnitInput::sqft(1200.0, 9).with_id("A-902"),
            UnitInput::new(120.0, AreaUnit::Sqm, 14).with_id("B-1401"),
        ]
    }

    #[test]
    fn test_zero_discount_equals_sum_of_units() {
        let aggregator = MultiUnitAggregator::default();
        let engine = CostSheetEngine::default();
        let aggregate = aggregator.aggregate(&units(), &schedule(), 0.18, 0.0).unwrap();

        let independent: f64 = units()
            .iter()
            .map(|u| engine.build_cost_sheet(u, &schedule(), 0.18).unwrap().total)
            .sum();

        assert_eq!(aggregate.combined_subtotal, independent);
        assert_eq!(aggregate.grand_total, independent);
        assert_eq!(aggregate.discount_amount, 0.0);
    }

    #[test]
    fn test_order_preserved() {
        let aggregator = MultiUnitAggregator::default();
        let aggregate = aggregator.aggregate(&units(), &schedule(), 0.05, 0.0).unwrap();
        let ids: Vec<_> = aggregate
            .unit_sheets
            .iter()
            .map(|s| s.unit_id.clone().unwrap())
            .collect();
        assert_eq!(ids, vec!["A-201", "A-902", "B-1401"]);
        assert_eq!(aggregate.unit_count(), 3);
    }

    #[test]
    fn test_discount_applied_once_on_combined_total() {
        let aggregator = MultiUnitAggregator::default();
        let aggregate = aggregator.aggregate(&units(), &schedule(), 0.18, 10.0).unwrap();
        let expected_discount = aggregate.combined_subtotal * 0.1;
        assert!((aggregate.discount_amount - expected_discount).abs() < 1e-6);
        assert!(
            (aggregate.grand_total - (aggregate.combined_subtotal - expected_discount)).abs()
                < 1e-6
        );
    }

    #[test]
    fn test_idempotent() {
        let aggregator = MultiUnitAggregator::default();
        let first = aggregator.aggregate(&units(), &schedule(), 0.12, 3.0).unwrap();
        let second = aggregator.aggregate(&units(), &schedule(), 0.12, 3.0).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_errors() {
        let aggregator = MultiUnitAggregator::default();
        assert_eq!(
            aggregator.aggregate(&[], &schedule(), 0.18, 0.0),
            Err(PricingError::EmptySelection)
        );
        assert!(matches!(
            aggregator.aggregate(&units(), &schedule(), 0.18, 120.0),
            Err(PricingError::InvalidDiscount(_))
        ));

        let mut bad_units = units();
        bad_units.push(UnitInput::sqft(-5.0, 1));
        assert!(matches!(
            aggregator.aggregate(&bad_units, &schedule(), 0.18, 0.0),
            Err(PricingError::InvalidUnit { .. })
        ));
    }
}

//! Pricing calculator trait for cost sheets and financial estimates
//!
//! One interface over every pricing operation the back office exposes.
//! Tables (area factors, stamp-duty rates, GST slabs) are injected through
//! configuration instead of living in module-level constants.
//!
//! # Example
//!
//! ```ignore
//! use estate_pricing_core::traits::PricingCalculator;
//!
//! // Calculator is created from the pricing config view
//! let calc = pricing_view.calculator()?;
//!
//! let sheet = calc.build_cost_sheet(&unit, &schedule, None)?;
//! let loan = calc.compute_emi(5_000_000.0, 8.5, 20)?;
//! ```

use serde::{Deserialize, Serialize};

use crate::aggregate::{AggregateCostSheet, MultiUnitAggregator};
use crate::area::{AreaConversion, AreaConverter, AreaFactors, AreaUnit};
use crate::cost_sheet::{validate_gst_rate, CostSheet, CostSheetEngine, UnitInput};
use crate::defaults;
use crate::demand::{derive_demand, DemandBreakdown};
use crate::discount::{apply_discount, DiscountOutcome};
use crate::error::{PricingError, Result};
use crate::installments::{self, InstallmentPlan, ReminderFrequency};
use crate::loan::{self, AmortizationRow, LoanResult};
use crate::rate_schedule::RateSchedule;
use crate::stamp_duty::{StampDutyCalculator, StampDutyConfig, StampDutyResult};

/// GST slabs offered on the booking form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GstPolicy {
    #[serde(default = "default_allowed_rates")]
    pub allowed_rates: Vec<f64>,
    #[serde(default = "default_gst_rate")]
    pub default_rate: f64,
    /// Reject rates outside `allowed_rates`
    #[serde(default)]
    pub enforce_slabs: bool,
}

fn default_allowed_rates() -> Vec<f64> {
    defaults::gst::SLABS.to_vec()
}

fn default_gst_rate() -> f64 {
    defaults::gst::DEFAULT_RATE
}

impl Default for GstPolicy {
    fn default() -> Self {
        Self {
            allowed_rates: default_allowed_rates(),
            default_rate: default_gst_rate(),
            enforce_slabs: false,
        }
    }
}

impl GstPolicy {
    /// Every rate must be a fraction; an enforced policy must offer its default
    pub fn validate(&self) -> Result<()> {
        for &rate in self.allowed_rates.iter().chain([&self.default_rate]) {
            validate_gst_rate(rate)?;
        }
        if self.enforce_slabs && !self.is_slab(self.default_rate) {
            return Err(PricingError::invalid_schedule(
                "gst.default_rate",
                "default rate must be one of the allowed slabs when slabs are enforced",
            ));
        }
        Ok(())
    }

    fn is_slab(&self, rate: f64) -> bool {
        self.allowed_rates.iter().any(|r| (r - rate).abs() < 1e-9)
    }

    /// Resolve an optional caller rate against the policy
    pub fn resolve(&self, gst_rate: Option<f64>) -> Result<f64> {
        let rate = gst_rate.unwrap_or(self.default_rate);
        validate_gst_rate(rate)?;
        if self.enforce_slabs && !self.is_slab(rate) {
            return Err(PricingError::invalid_schedule(
                "gst_rate",
                format!("{} is not one of the configured GST slabs", rate),
            ));
        }
        Ok(rate)
    }
}

/// Every pricing operation behind one object-safe interface
pub trait PricingCalculator: Send + Sync {
    /// Convert an area between units, keeping the unrounded value
    fn convert_area(&self, value: f64, from: AreaUnit, to: AreaUnit) -> Result<AreaConversion>;

    /// Itemized cost sheet for one unit; `None` uses the default GST rate
    fn build_cost_sheet(
        &self,
        unit: &UnitInput,
        schedule: &RateSchedule,
        gst_rate: Option<f64>,
    ) -> Result<CostSheet>;

    /// Apply a percentage discount exactly once
    fn apply_discount(&self, amount: f64, discount_pct: f64) -> Result<DiscountOutcome> {
        apply_discount(amount, discount_pct)
    }

    /// Price several units and discount their combined total
    fn aggregate(
        &self,
        units: &[UnitInput],
        schedule: &RateSchedule,
        gst_rate: Option<f64>,
        discount_pct: f64,
    ) -> Result<AggregateCostSheet>;

    /// Split an amount into installments that sum exactly
    fn split_installments(&self, total_amount: f64, count: u32) -> Result<InstallmentPlan> {
        installments::split(total_amount, count)
    }

    /// Base + GST demand spread over installments
    fn derive_demand(
        &self,
        base_amount: f64,
        gst_rate: Option<f64>,
        installment_count: u32,
    ) -> Result<DemandBreakdown>;

    /// Reminder offsets in days before the due date; `None` uses configured defaults
    fn reminder_offsets(
        &self,
        frequency: Option<ReminderFrequency>,
        lead_days: Option<u32>,
    ) -> Result<Vec<u32>>;

    fn compute_emi(
        &self,
        principal: f64,
        annual_rate_pct: f64,
        tenure_years: u32,
    ) -> Result<LoanResult> {
        loan::compute_emi(principal, annual_rate_pct, tenure_years)
    }

    fn amortization_schedule(
        &self,
        principal: f64,
        annual_rate_pct: f64,
        tenure_years: u32,
    ) -> Result<Vec<AmortizationRow>> {
        loan::amortization_schedule(principal, annual_rate_pct, tenure_years)
    }

    fn compute_stamp_duty(
        &self,
        property_value: f64,
        jurisdiction: &str,
        property_type: &str,
    ) -> Result<StampDutyResult>;

    fn gst_policy(&self) -> &GstPolicy;
}

/// Reminder defaults used when the caller leaves them unset
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReminderDefaults {
    #[serde(default)]
    pub frequency: ReminderFrequency,
    #[serde(default = "default_lead_days")]
    pub lead_days: u32,
}

fn default_lead_days() -> u32 {
    defaults::reminders::DEFAULT_LEAD_DAYS
}

impl Default for ReminderDefaults {
    fn default() -> Self {
        Self {
            frequency: ReminderFrequency::default(),
            lead_days: default_lead_days(),
        }
    }
}

impl ReminderDefaults {
    pub fn validate(&self) -> Result<()> {
        installments::reminder_offsets(self.frequency, self.lead_days).map(|_| ())
    }
}

/// Config-driven calculator implementation
///
/// Built by the pricing config view from loaded YAML. Holds only immutable
/// tables, so one instance can be shared across threads.
#[derive(Debug, Clone)]
pub struct ConfigDrivenCalculator {
    aggregator: MultiUnitAggregator,
    engine: CostSheetEngine,
    stamp_duty: StampDutyCalculator,
    gst: GstPolicy,
    reminders: ReminderDefaults,
}

impl Default for ConfigDrivenCalculator {
    fn default() -> Self {
        Self::assemble(
            AreaFactors::default(),
            StampDutyCalculator::default(),
            GstPolicy::default(),
            ReminderDefaults::default(),
        )
    }
}

impl ConfigDrivenCalculator {
    /// Validate every injected table, then build the calculator
    pub fn new(
        area_factors: AreaFactors,
        stamp_duty: StampDutyConfig,
        gst: GstPolicy,
        reminders: ReminderDefaults,
    ) -> Result<Self> {
        area_factors.validate()?;
        gst.validate()?;
        reminders.validate()?;
        let stamp_duty = StampDutyCalculator::new(stamp_duty)?;
        Ok(Self::assemble(area_factors, stamp_duty, gst, reminders))
    }

    fn assemble(
        area_factors: AreaFactors,
        stamp_duty: StampDutyCalculator,
        gst: GstPolicy,
        reminders: ReminderDefaults,
    ) -> Self {
        let engine = CostSheetEngine::new(AreaConverter::new(area_factors));
        Self {
            aggregator: MultiUnitAggregator::new(engine.clone()),
            engine,
            stamp_duty,
            gst,
            reminders,
        }
    }

    /// Override the last floor exempt from floor rise
    pub fn with_floor_rise_from(mut self, floor: i32) -> Self {
        self.engine = self.engine.with_floor_rise_from(floor);
        self.aggregator = MultiUnitAggregator::new(self.engine.clone());
        self
    }

    pub fn stamp_duty(&self) -> &StampDutyCalculator {
        &self.stamp_duty
    }
}

impl PricingCalculator for ConfigDrivenCalculator {
    fn convert_area(&self, value: f64, from: AreaUnit, to: AreaUnit) -> Result<AreaConversion> {
        self.engine.converter().convert_detailed(value, from, to)
    }

    fn build_cost_sheet(
        &self,
        unit: &UnitInput,
        schedule: &RateSchedule,
        gst_rate: Option<f64>,
    ) -> Result<CostSheet> {
        let rate = self.gst.resolve(gst_rate)?;
        self.engine.build_cost_sheet(unit, schedule, rate)
    }

    fn aggregate(
        &self,
        units: &[UnitInput],
        schedule: &RateSchedule,
        gst_rate: Option<f64>,
        discount_pct: f64,
    ) -> Result<AggregateCostSheet> {
        let rate = self.gst.resolve(gst_rate)?;
        self.aggregator.aggregate(units, schedule, rate, discount_pct)
    }

    fn derive_demand(
        &self,
        base_amount: f64,
        gst_rate: Option<f64>,
        installment_count: u32,
    ) -> Result<DemandBreakdown> {
        let rate = self.gst.resolve(gst_rate)?;
        derive_demand(base_amount, rate, installment_count)
    }

    fn reminder_offsets(
        &self,
        frequency: Option<ReminderFrequency>,
        lead_days: Option<u32>,
    ) -> Result<Vec<u32>> {
        installments::reminder_offsets(
            frequency.unwrap_or(self.reminders.frequency),
            lead_days.unwrap_or(self.reminders.lead_days),
        )
    }

    fn compute_stamp_duty(
        &self,
        property_value: f64,
        jurisdiction: &str,
        property_type: &str,
    ) -> Result<StampDutyResult> {
        self.stamp_duty
            .compute(property_value, jurisdiction, property_type)
    }

    fn gst_policy(&self) -> &GstPolicy {
        &self.gst
    }
}

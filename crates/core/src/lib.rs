//! Pricing and financial computation core
//!
//! This crate provides the calculators behind the back-office pricing screens:
//! - Area conversion between sqft, sqm, sqyard, acre and hectare
//! - Per-unit cost sheets from an operator-configured rate schedule
//! - Single discount pass over one or many selected units
//! - Installment splitting with an exact-sum guarantee and reminder cadence
//! - Home-loan EMI and amortization
//! - Stamp duty, registration and GST on a transaction
//!
//! Everything here is a pure, synchronous function over value types. No I/O,
//! no shared mutable state.

pub mod aggregate;
pub mod area;
pub mod cost_sheet;
pub mod defaults;
pub mod demand;
pub mod discount;
pub mod error;
pub mod installments;
pub mod loan;
pub mod money;
pub mod rate_schedule;
pub mod stamp_duty;
pub mod traits;

pub use aggregate::{AggregateCostSheet, MultiUnitAggregator};
pub use area::{AreaConversion, AreaConverter, AreaFactors, AreaUnit};
pub use cost_sheet::{CostSheet, CostSheetEngine, CostSheetLine, UnitInput};
pub use demand::{derive_demand, DemandBreakdown, DemandInstallment};
pub use discount::{apply_discount, DiscountOutcome};
pub use error::{PricingError, Result};
pub use installments::{
    reminder_dates, reminder_offsets, split, InstallmentPlan, ReminderFrequency,
};
pub use loan::{amortization_schedule, compute_emi, AmortizationRow, LoanResult};
pub use rate_schedule::{RateOverrides, RateSchedule};
pub use stamp_duty::{StampDutyCalculator, StampDutyConfig, StampDutyRate, StampDutyResult};

pub use rust_decimal::Decimal;

// Trait re-exports
pub use traits::{ConfigDrivenCalculator, GstPolicy, PricingCalculator, ReminderDefaults};

//! Pricing view over project configuration
//!
//! Consumers read pricing configuration through this view, which builds
//! calculators from the loaded tables instead of exposing raw YAML.

use std::sync::Arc;

use estate_pricing_core::{
    compute_emi, ConfigDrivenCalculator, CostSheet, LoanResult, PricingCalculator, PricingError,
    RateSchedule, UnitInput,
};

use super::master::{LoanDefaults, PricingDomainConfig};

/// View used by the cost-sheet, booking and loan screens
#[derive(Debug, Clone)]
pub struct PricingDomainView {
    config: Arc<PricingDomainConfig>,
}

impl PricingDomainView {
    pub fn new(config: Arc<PricingDomainConfig>) -> Self {
        Self { config }
    }

    pub fn project_id(&self) -> &str {
        &self.config.project_id
    }

    pub fn display_name(&self) -> &str {
        if self.config.display_name.is_empty() {
            &self.config.project_id
        } else {
            &self.config.display_name
        }
    }

    /// Project-wide rate schedule
    pub fn rate_schedule(&self) -> &RateSchedule {
        &self.config.rate_schedule
    }

    pub fn gst_slabs(&self) -> &[f64] {
        &self.config.gst.allowed_rates
    }

    pub fn default_gst_rate(&self) -> f64 {
        self.config.gst.default_rate
    }

    pub fn loan_defaults(&self) -> &LoanDefaults {
        &self.config.loan
    }

    /// Calculator with this project's tables injected
    pub fn calculator(&self) -> Result<ConfigDrivenCalculator, PricingError> {
        Ok(ConfigDrivenCalculator::new(
            self.config.area_factors.clone(),
            self.config.stamp_duty.clone(),
            self.config.gst.clone(),
            self.config.reminders,
        )?
        .with_floor_rise_from(self.config.floor_rise_from))
    }

    /// Cost sheet priced with the project's own rate schedule
    pub fn cost_sheet(
        &self,
        unit: &UnitInput,
        gst_rate: Option<f64>,
    ) -> Result<CostSheet, PricingError> {
        self.calculator()?
            .build_cost_sheet(unit, &self.config.rate_schedule, gst_rate)
    }

    /// EMI estimate, filling unset rate and tenure from project defaults
    pub fn estimate_loan(
        &self,
        principal: f64,
        annual_rate_pct: Option<f64>,
        tenure_years: Option<u32>,
    ) -> Result<LoanResult, PricingError> {
        let loan = &self.config.loan;
        let tenure = tenure_years.unwrap_or(loan.tenure_years);
        if tenure > loan.max_tenure_years {
            return Err(PricingError::invalid_loan(
                "tenure_years",
                format!(
                    "tenure cannot exceed {} years, got {}",
                    loan.max_tenure_years, tenure
                ),
            ));
        }
        compute_emi(
            principal,
            annual_rate_pct.unwrap_or(loan.annual_rate_pct),
            tenure,
        )
    }
}

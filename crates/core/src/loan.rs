//! Home-loan EMI estimation
//!
//! Reducing-balance EMI:
//! EMI = P × r × (1 + r)^n / [(1 + r)^n - 1]
//!
//! Where:
//! - P = principal
//! - r = monthly rate (annual_rate_pct / 12 / 100)
//! - n = tenure in months
//!
//! `(1 + r)^n - 1` is evaluated as `expm1(n * ln1p(r))` so tiny positive
//! rates keep their precision. When it is still zero (r = 0, or r too small
//! to register) the EMI is a plain P / n.

use serde::{Deserialize, Serialize};

use crate::defaults;
use crate::error::{PricingError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanResult {
    pub principal: f64,
    pub monthly_rate: f64,
    pub months: u32,
    pub emi: f64,
    pub total_payable: f64,
    pub total_interest: f64,
}

/// One month of an amortization schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    /// 1-based month number
    pub month: u32,
    pub opening_balance: f64,
    pub emi: f64,
    pub interest_component: f64,
    pub principal_component: f64,
    pub closing_balance: f64,
}

pub fn compute_emi(principal: f64, annual_rate_pct: f64, tenure_years: u32) -> Result<LoanResult> {
    let months = tenure_years.checked_mul(12).ok_or_else(|| {
        PricingError::invalid_loan("tenure_years", format!("tenure too long: {}", tenure_years))
    })?;
    compute_emi_for_months(principal, annual_rate_pct, months)
}

pub fn compute_emi_for_months(
    principal: f64,
    annual_rate_pct: f64,
    months: u32,
) -> Result<LoanResult> {
    validate(principal, annual_rate_pct, months)?;

    let monthly_rate = annual_rate_pct / 12.0 / 100.0;
    let growth = (months as f64 * monthly_rate.ln_1p()).exp_m1();
    let emi = if growth == 0.0 {
        principal / months as f64
    } else {
        principal * monthly_rate * (growth + 1.0) / growth
    };

    if !emi.is_finite() {
        return Err(PricingError::invalid_loan(
            "tenure_years",
            "EMI is not representable for this rate and tenure",
        ));
    }

    let total_payable = emi * months as f64;
    let total_interest = total_payable - principal;

    tracing::debug!(principal, annual_rate_pct, months, emi, "Computed EMI");

    Ok(LoanResult {
        principal,
        monthly_rate,
        months,
        emi,
        total_payable,
        total_interest,
    })
}

/// Month-by-month split of each EMI into interest and principal
///
/// The last row repays whatever balance is left, so the schedule always
/// closes at exactly zero.
pub fn amortization_schedule(
    principal: f64,
    annual_rate_pct: f64,
    tenure_years: u32,
) -> Result<Vec<AmortizationRow>> {
    let loan = compute_emi(principal, annual_rate_pct, tenure_years)?;
    let mut rows = Vec::with_capacity(loan.months as usize);
    let mut balance = principal;

    for month in 1..=loan.months {
        let interest = balance * loan.monthly_rate;
        let (principal_component, emi) = if month == loan.months {
            (balance, balance + interest)
        } else {
            (loan.emi - interest, loan.emi)
        };
        let closing = if month == loan.months {
            0.0
        } else {
            balance - principal_component
        };

        rows.push(AmortizationRow {
            month,
            opening_balance: balance,
            emi,
            interest_component: interest,
            principal_component,
            closing_balance: closing,
        });
        balance = closing;
    }

    Ok(rows)
}

fn validate(principal: f64, annual_rate_pct: f64, months: u32) -> Result<()> {
    if !principal.is_finite() || principal <= 0.0 {
        return Err(PricingError::invalid_loan(
            "principal",
            format!("must be greater than zero, got {}", principal),
        ));
    }
    if !annual_rate_pct.is_finite() || annual_rate_pct < 0.0 {
        return Err(PricingError::invalid_loan(
            "annual_rate_pct",
            format!("must be zero or positive, got {}", annual_rate_pct),
        ));
    }
    if months < 1 {
        return Err(PricingError::invalid_loan(
            "tenure_years",
            "tenure must be at least one month",
        ));
    }
    if months > defaults::loan::MAX_TENURE_MONTHS {
        return Err(PricingError::invalid_loan(
            "tenure_years",
            format!(
                "tenure cannot exceed {} months, got {}",
                defaults::loan::MAX_TENURE_MONTHS,
                months
            ),
        ));
    }
    Ok(())
}

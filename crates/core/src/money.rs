//! Exact money arithmetic
//!
//! Amounts cross the API as `f64` rupees. Anything that must sum exactly
//! (installments, split GST) is computed as a `Decimal` rounded to the
//! paisa and converted back only for display.

use rust_decimal::prelude::*;

use crate::error::{PricingError, Result};

/// Paisa precision
pub const MONEY_DECIMALS: u32 = 2;

const MAX_RUPEES: i64 = 90_000_000_000_000;

/// Largest amount accepted where paise must be exact; above it an `f64`
/// can no longer hold every paisa
pub const MAX_AMOUNT: f64 = MAX_RUPEES as f64;

/// Non-negative rupee amount as a paisa-rounded `Decimal`
pub fn to_money(field: &str, amount: f64) -> Result<Decimal> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(PricingError::invalid_amount(
            field,
            format!("must be a finite non-negative amount, got {}", amount),
        ));
    }
    if amount > MAX_AMOUNT {
        return Err(exceeds_max(field, amount));
    }
    let value = Decimal::from_f64(amount).ok_or_else(|| {
        PricingError::invalid_amount(field, format!("{} is not representable", amount))
    })?;
    Ok(round_money(value))
}

/// Reject a computed amount above `MAX_AMOUNT`
pub fn ensure_within_max(field: &str, value: Decimal) -> Result<Decimal> {
    if value > Decimal::from(MAX_RUPEES) {
        return Err(exceeds_max(field, from_money(value)));
    }
    Ok(value)
}

/// Round half away from zero to the paisa
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_DECIMALS, RoundingStrategy::MidpointAwayFromZero)
}

/// Convert back to rupees for the `f64` API
pub fn from_money(value: Decimal) -> f64 {
    // every Decimal lies well inside the f64 range
    value.to_f64().unwrap_or(f64::NAN)
}

pub(crate) fn overflow(field: &str) -> PricingError {
    PricingError::invalid_amount(field, "amount overflows exact arithmetic")
}

fn exceeds_max(field: &str, amount: f64) -> PricingError {
    PricingError::invalid_amount(
        field,
        format!("{} exceeds the largest supported amount {}", amount, MAX_AMOUNT),
    )
}

/// Round to `dp` decimal places for display
pub fn round_dp(value: f64, dp: u32) -> f64 {
    let scale = 10f64.powi(dp as i32);
    (value * scale).round() / scale
}

//! Discount application shared by single- and multi-unit flows
//!
//! Call once per priced amount. Multi-unit flows pass the combined total,
//! never each unit, so a percentage is never compounded.

use serde::{Deserialize, Serialize};

use crate::error::{PricingError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiscountOutcome {
    pub discount_amount: f64,
    pub final_amount: f64,
}

pub fn apply_discount(amount: f64, discount_pct: f64) -> Result<DiscountOutcome> {
    if !amount.is_finite() || amount < 0.0 {
        tracing::warn!(amount, "Rejected discount on an invalid amount");
        return Err(PricingError::invalid_amount(
            "amount",
            format!("must be a finite non-negative amount, got {}", amount),
        ));
    }
    if !discount_pct.is_finite() || !(0.0..=100.0).contains(&discount_pct) {
        tracing::warn!(discount_pct, "Rejected out-of-range discount");
        return Err(PricingError::InvalidDiscount(discount_pct));
    }

    let discount_amount = amount * (discount_pct / 100.0);
    Ok(DiscountOutcome {
        discount_amount,
        final_amount: amount - discount_amount,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_and_zero_discount() {
        let x = 4_567_890.12;
        assert_eq!(
            apply_discount(x, 100.0).unwrap(),
            DiscountOutcome {
                discount_amount: x,
                final_amount: 0.0
            }
        );
        assert_eq!(
            apply_discount(x, 0.0).unwrap(),
            DiscountOutcome {
                discount_amount: 0.0,
                final_amount: x
            }
        );
    }

    #[test]
    fn test_partial_discount() {
        let outcome = apply_discount(2_000_000.0, 2.5).unwrap();
        assert_eq!(outcome.discount_amount, 50_000.0);
        assert_eq!(outcome.final_amount, 1_950_000.0);
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(
            apply_discount(1000.0, 100.5),
            Err(PricingError::InvalidDiscount(100.5))
        );
        assert!(apply_discount(1000.0, -1.0).is_err());
        assert!(apply_discount(1000.0, f64::NAN).is_err());
    }

    #[test]
    fn test_invalid_amount() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, -0.01] {
            assert!(matches!(
                apply_discount(bad, 10.0),
                Err(PricingError::InvalidAmount { .. })
            ));
        }
        assert_eq!(apply_discount(0.0, 10.0).unwrap().final_amount, 0.0);
    }
}

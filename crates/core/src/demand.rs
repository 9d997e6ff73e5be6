//! Demand amounts split into installments with a GST column
//!
//! Every call re-derives the whole chain (GST, total, installments) from the
//! base amount, GST rate and installment count. Callers recompute on each
//! edit instead of patching individual derived fields.

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

use crate::cost_sheet::validate_gst_rate;
use crate::error::{PricingError, Result};
use crate::installments::{plan_for, split_money, InstallmentPlan};
use crate::money::{self, ensure_within_max, from_money, round_money, to_money};

/// One installment of a demand, with its share of base and GST
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandInstallment {
    /// 1-based position in the plan
    pub number: u32,
    pub base_amount: f64,
    pub gst_amount: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandBreakdown {
    pub base_amount: f64,
    pub gst_rate: f64,
    /// GST rounded to the paisa
    pub gst_amount: f64,
    pub total_amount: f64,
    pub plan: InstallmentPlan,
    pub installments: Vec<DemandInstallment>,
}

pub fn derive_demand(
    base_amount: f64,
    gst_rate: f64,
    installment_count: u32,
) -> Result<DemandBreakdown> {
    let base = to_money("base_amount", base_amount)?;
    validate_gst_rate(gst_rate)?;
    if installment_count == 0 {
        return Err(PricingError::InvalidCount(0));
    }

    let rate = Decimal::from_f64(gst_rate).ok_or_else(|| {
        PricingError::invalid_schedule("gst_rate", format!("{} is not representable", gst_rate))
    })?;
    let gst = base
        .checked_mul(rate)
        .map(round_money)
        .ok_or_else(|| money::overflow("gst_amount"))?;
    let total = base
        .checked_add(gst)
        .ok_or_else(|| money::overflow("total_amount"))?;
    let total = ensure_within_max("total_amount", total)?;

    let plan = plan_for(total, installment_count)?;
    let gst_parts = apportion(gst, &plan.amounts, total)?;

    let installments = plan
        .amounts
        .iter()
        .zip(gst_parts)
        .enumerate()
        .map(|(i, (&total, gst))| DemandInstallment {
            number: i as u32 + 1,
            base_amount: from_money(total - gst),
            gst_amount: from_money(gst),
            total: from_money(total),
        })
        .collect();

    tracing::debug!(
        base_amount,
        gst_rate,
        installment_count,
        total = %total,
        "Derived demand breakdown"
    );

    Ok(DemandBreakdown {
        base_amount: from_money(base),
        gst_rate,
        gst_amount: from_money(gst),
        total_amount: from_money(total),
        plan,
        installments,
    })
}

/// Share `amount` across `weights` in proportion, last part takes the residue
fn apportion(amount: Decimal, weights: &[Decimal], weight_total: Decimal) -> Result<Vec<Decimal>> {
    if weights.is_empty() {
        return Ok(Vec::new());
    }
    if weight_total.is_zero() {
        return split_money(amount, weights.len() as u32);
    }

    let mut parts = Vec::with_capacity(weights.len());
    let mut distributed = Decimal::ZERO;
    for weight in &weights[..weights.len() - 1] {
        let share = weight
            .checked_div(weight_total)
            .and_then(|proportion| amount.checked_mul(proportion))
            .map(round_money)
            .ok_or_else(|| money::overflow("gst_amount"))?;
        parts.push(share);
        distributed += share;
    }
    parts.push(amount - distributed);
    Ok(parts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demand_columns_sum_exactly() {
        let demand = derive_demand(1_000_000.0, 0.05, 3).unwrap();
        assert_eq!(demand.gst_amount, 50_000.0);
        assert_eq!(demand.total_amount, 1_050_000.0);
        assert_eq!(demand.installments.len(), 3);

        let paise = |v: f64| to_money("amount", v).unwrap();
        let base_sum: Decimal = demand.installments.iter().map(|i| paise(i.base_amount)).sum();
        let gst_sum: Decimal = demand.installments.iter().map(|i| paise(i.gst_amount)).sum();
        assert_eq!(base_sum, Decimal::new(100_000_000, 2));
        assert_eq!(gst_sum, Decimal::new(5_000_000, 2));

        for installment in &demand.installments {
            assert_eq!(
                paise(installment.base_amount) + paise(installment.gst_amount),
                paise(installment.total)
            );
        }
    }

    #[test]
    fn test_recomputes_from_canonical_inputs() {
        let before = derive_demand(250_000.0, 0.18, 2).unwrap();
        let after = derive_demand(250_000.0, 0.18, 5).unwrap();
        assert_eq!(before.total_amount, after.total_amount);
        assert_eq!(after.plan.count, 5);
        assert_eq!(after.installments[0].total, 59_000.0);
    }

    #[test]
    fn test_zero_gst() {
        let demand = derive_demand(1000.0, 0.0, 4).unwrap();
        assert!(demand.installments.iter().all(|i| i.gst_amount == 0.0));
        assert_eq!(demand.total_amount, 1000.0);
    }

    #[test]
    fn test_zero_amount() {
        let demand = derive_demand(0.0, 0.18, 3).unwrap();
        assert!(demand.installments.iter().all(|i| i.total == 0.0));
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(
            derive_demand(1000.0, 1.5, 2),
            Err(PricingError::InvalidSchedule { .. })
        ));
        assert_eq!(derive_demand(1000.0, 0.18, 0), Err(PricingError::InvalidCount(0)));
        assert!(matches!(
            derive_demand(-5.0, 0.18, 2),
            Err(PricingError::InvalidAmount { .. })
        ));
    }

    #[test]
    fn test_rejects_amounts_beyond_paisa_precision() {
        assert!(matches!(
            derive_demand(8e16, 0.28, 1),
            Err(PricingError::InvalidAmount { .. })
        ));
        // base fits but base plus GST does not
        assert!(matches!(
            derive_demand(money::MAX_AMOUNT, 0.28, 1),
            Err(PricingError::InvalidAmount { .. })
        ));
        assert_eq!(
            derive_demand(1000.0, 0.18, u32::MAX),
            Err(PricingError::InvalidCount(i64::from(u32::MAX)))
        );
    }

    #[test]
    fn test_apportion() {
        let paise = |p: i64| Decimal::new(p, 2);
        assert_eq!(
            apportion(paise(100), &[paise(1), paise(1), paise(1)], paise(3)).unwrap(),
            vec![paise(33), paise(33), paise(34)]
        );
        assert_eq!(
            apportion(paise(10), &[Decimal::ZERO, Decimal::ZERO], Decimal::ZERO).unwrap(),
            vec![paise(5), paise(5)]
        );
        assert!(apportion(paise(10), &[], Decimal::ZERO).unwrap().is_empty());
    }
}

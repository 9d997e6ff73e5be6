//! Installment splitting and reminder cadence
//!
//! Splits are computed in exact decimal paise: the first `count - 1`
//! installments get the per-installment amount rounded down to the paisa
//! and the last one absorbs the residue, so the parts always add back to
//! the total.

use chrono::{Days, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::defaults;
use crate::error::{PricingError, Result};
use crate::money::{self, from_money, to_money, MONEY_DECIMALS};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstallmentPlan {
    pub total_amount: f64,
    pub count: u32,
    pub installments: Vec<f64>,
    /// Same installments as exact decimals; these sum to `total`
    pub amounts: Vec<Decimal>,
    pub total: Decimal,
}

impl InstallmentPlan {
    pub fn first(&self) -> Option<f64> {
        self.installments.first().copied()
    }

    pub fn last(&self) -> Option<f64> {
        self.installments.last().copied()
    }
}

/// Split `total_amount` into `count` installments that sum exactly
pub fn split(total_amount: f64, count: u32) -> Result<InstallmentPlan> {
    check_count(count)?;
    let total = to_money("total_amount", total_amount)?;
    let plan = plan_for(total, count)?;

    tracing::debug!(total_amount, count, "Split amount into installments");
    Ok(plan)
}

/// Plan over an amount that is already paisa-exact
pub(crate) fn plan_for(total: Decimal, count: u32) -> Result<InstallmentPlan> {
    check_count(count)?;
    let amounts = split_money(total, count)?;
    Ok(InstallmentPlan {
        total_amount: from_money(total),
        count,
        installments: amounts.iter().copied().map(from_money).collect(),
        amounts,
        total,
    })
}

fn check_count(count: u32) -> Result<()> {
    if count == 0 || count > defaults::installments::MAX_COUNT {
        return Err(PricingError::InvalidCount(i64::from(count)));
    }
    Ok(())
}

/// Paisa-level split with the residue on the last part
pub(crate) fn split_money(total: Decimal, count: u32) -> Result<Vec<Decimal>> {
    check_count(count)?;
    let base = total
        .checked_div(Decimal::from(count))
        .ok_or_else(|| money::overflow("total_amount"))?
        .round_dp_with_strategy(MONEY_DECIMALS, RoundingStrategy::ToZero);
    let distributed = base
        .checked_mul(Decimal::from(count - 1))
        .ok_or_else(|| money::overflow("total_amount"))?;

    let mut parts = vec![base; count as usize];
    if let Some(last) = parts.last_mut() {
        *last = total - distributed;
    }
    Ok(parts)
}

/// How often reminders repeat before a due date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ReminderFrequency {
    Daily,
    #[default]
    Weekly,
    BiWeekly,
    Monthly,
}

impl ReminderFrequency {
    pub fn interval_days(&self) -> u32 {
        match self {
            Self::Daily => 1,
            Self::Weekly => 7,
            Self::BiWeekly => 14,
            Self::Monthly => 30,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::BiWeekly => "bi-weekly",
            Self::Monthly => "monthly",
        }
    }
}

impl fmt::Display for ReminderFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReminderFrequency {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "bi-weekly" | "biweekly" | "bi_weekly" | "fortnightly" => Ok(Self::BiWeekly),
            "monthly" => Ok(Self::Monthly),
            other => Err(PricingError::invalid_schedule(
                "frequency",
                format!("unknown reminder frequency '{}'", other),
            )),
        }
    }
}

/// Days before the due date on which reminders go out, largest first
///
/// Starts at `lead_days`, steps down by the frequency interval and always
/// ends with 0 (the due date itself).
pub fn reminder_offsets(frequency: ReminderFrequency, lead_days: u32) -> Result<Vec<u32>> {
    if lead_days > defaults::reminders::MAX_LEAD_DAYS {
        return Err(PricingError::invalid_schedule(
            "lead_days",
            format!(
                "reminders cannot start more than {} days ahead, got {}",
                defaults::reminders::MAX_LEAD_DAYS,
                lead_days
            ),
        ));
    }

    let step = frequency.interval_days();
    let mut offsets = Vec::new();
    let mut current = lead_days;
    while current > 0 {
        offsets.push(current);
        current = current.saturating_sub(step);
    }
    offsets.push(0);
    Ok(offsets)
}

/// Reminder offsets applied to a concrete due date, earliest first
pub fn reminder_dates(
    due_date: NaiveDate,
    frequency: ReminderFrequency,
    lead_days: u32,
) -> Result<Vec<NaiveDate>> {
    Ok(reminder_offsets(frequency, lead_days)?
        .into_iter()
        .filter_map(|offset| due_date.checked_sub_days(Days::new(u64::from(offset))))
        .collect())
}

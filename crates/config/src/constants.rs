//! Centralized defaults for pricing configuration
//!
//! Calculator defaults (GST slabs, floor rise, stamp duty, reminders) are
//! owned by `estate_pricing_core::defaults` and re-exported here. Loan
//! estimate defaults and environment names are config-only.

pub use estate_pricing_core::defaults::{floor_rise, gst, reminders, stamp_duty};

/// Home-loan estimate defaults
pub mod loan {
    pub const DEFAULT_ANNUAL_RATE_PCT: f64 = 8.5;
    pub const DEFAULT_TENURE_YEARS: u32 = 20;
    pub const MAX_TENURE_YEARS: u32 = 30;
}

/// Environment variables read by the loaders
pub mod env {
    /// Prefix for settings overrides, e.g. `ESTATE_PRICING__OBSERVABILITY__LOG_LEVEL`
    pub const SETTINGS_PREFIX: &str = "ESTATE_PRICING";

    /// Selects `config/projects/{id}/pricing.yaml`
    pub const PROJECT_ID: &str = "PRICING_PROJECT_ID";
}

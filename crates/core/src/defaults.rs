//! Default numbers used when configuration leaves a field out
//!
//! These are operator defaults, not tax law. The config crate re-exports
//! them so both crates read the same values.

/// GST slabs (fractions of the taxable amount)
pub mod gst {
    pub const SLAB_5: f64 = 0.05;
    pub const SLAB_12: f64 = 0.12;
    pub const SLAB_18: f64 = 0.18;
    pub const SLAB_28: f64 = 0.28;

    /// Rate used when a caller does not pick one
    pub const DEFAULT_RATE: f64 = SLAB_18;

    pub const SLABS: [f64; 4] = [SLAB_5, SLAB_12, SLAB_18, SLAB_28];
}

pub mod floor_rise {
    /// Floors up to and including this one are exempt
    pub const EXEMPT_UP_TO_FLOOR: i32 = 6;
}

/// Stamp duty and registration defaults
pub mod stamp_duty {
    /// Registration fee as a fraction of property value
    pub const REGISTRATION_PCT: f64 = 0.01;

    /// GST on the transaction as a fraction of property value
    pub const GST_PCT: f64 = 0.05;
}

/// Installment plan bounds
pub mod installments {
    /// Fifty years of monthly installments
    pub const MAX_COUNT: u32 = 600;
}

pub mod reminders {
    pub const DEFAULT_LEAD_DAYS: u32 = 7;

    /// Reminders start at most a year before the due date
    pub const MAX_LEAD_DAYS: u32 = 366;
}

pub mod loan {
    /// Longest tenure the EMI and amortization calculators accept
    pub const MAX_TENURE_MONTHS: u32 = 100 * 12;
}

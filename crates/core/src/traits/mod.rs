//! Trait seams for pricing calculators

mod calculator;

pub use calculator::{
    ConfigDrivenCalculator, GstPolicy, PricingCalculator, ReminderDefaults,
};

//! Project pricing configuration
//!
//! Tables live in `config/projects/{project}/pricing.yaml`, layered over
//! `config/base/defaults.yaml`. Access them through `PricingDomainView`
//! or the reloadable `PricingConfigManager`.

mod manager;
mod master;
mod views;

pub use manager::PricingConfigManager;
pub use master::{LoanDefaults, PricingDomainConfig};
pub use views::PricingDomainView;

//! Error types for pricing computations
//!
//! Every variant is a local validation failure raised before any output is
//! produced. None of them are retryable.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PricingError {
    #[error("Invalid unit input '{field}': {message}")]
    InvalidUnit { field: String, message: String },

    #[error("Invalid amount '{field}': {message}")]
    InvalidAmount { field: String, message: String },

    #[error("Invalid rate schedule '{field}': {message}")]
    InvalidSchedule { field: String, message: String },

    #[error("Discount must be between 0 and 100 percent, got {0}")]
    InvalidDiscount(f64),

    #[error("No units selected")]
    EmptySelection,

    #[error("Installment count must be at least 1, got {0}")]
    InvalidCount(i64),

    #[error("Invalid loan input '{field}': {message}")]
    InvalidLoanInput { field: String, message: String },

    #[error("No stamp-duty rate configured for {jurisdiction}/{property_type}")]
    UnknownJurisdiction {
        jurisdiction: String,
        property_type: String,
    },
}

impl PricingError {
    pub fn invalid_unit(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidUnit {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn invalid_amount(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidAmount {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn invalid_schedule(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidSchedule {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn invalid_loan(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidLoanInput {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Field the UI should highlight, when the error points at one
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::InvalidUnit { field, .. }
            | Self::InvalidAmount { field, .. }
            | Self::InvalidSchedule { field, .. }
            | Self::InvalidLoanInput { field, .. } => Some(field),
            Self::InvalidDiscount(_) => Some("discount_pct"),
            Self::InvalidCount(_) => Some("count"),
            Self::UnknownJurisdiction { .. } => Some("jurisdiction"),
            Self::EmptySelection => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, PricingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = PricingError::invalid_unit("area_value", "must be positive");
        assert_eq!(
            err.to_string(),
            "Invalid unit input 'area_value': must be positive"
        );
        assert_eq!(err.field(), Some("area_value"));

        let err = PricingError::UnknownJurisdiction {
            jurisdiction: "goa".to_string(),
            property_type: "commercial".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "No stamp-duty rate configured for goa/commercial"
        );
    }

    #[test]
    fn test_empty_selection_has_no_field() {
        assert_eq!(PricingError::EmptySelection.field(), None);
        assert_eq!(PricingError::InvalidCount(0).field(), Some("count"));
    }
}

//! Billing domain errors

use thiserror::Error;

use core_kernel::TemporalError;

/// Errors that can occur in the billing domain
///
/// Every failure is raised before any balance is touched, so a failed call
/// leaves the ledger exactly as it was.
#[derive(Debug, Error)]
pub enum BillingError {
    /// A local precondition was violated: unknown or duplicate identity,
    /// non-positive amount, malformed cadence
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The target is not in a state that allows the operation: inactive
    /// contract or group, group without eligible children
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// A due date could not be advanced
    #[error("Schedule error: {0}")]
    Schedule(#[from] TemporalError),
}

impl BillingError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        BillingError::InvalidArgument(message.into())
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        BillingError::InvalidState(message.into())
    }

    /// Returns true for precondition violations
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, BillingError::InvalidArgument(_))
    }

    /// Returns true for state violations
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, BillingError::InvalidState(_))
    }
}

/// Rejects amounts that are not strictly positive
pub(crate) fn ensure_positive(amount: i64, what: &str) -> Result<(), BillingError> {
    if amount <= 0 {
        return Err(BillingError::invalid_argument(format!(
            "{} must be positive, got {}",
            what, amount
        )));
    }
    Ok(())
}

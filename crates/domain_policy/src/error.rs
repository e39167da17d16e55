//! Policy domain errors
//!
//! This module defines all error types that can occur within the
//! policy administration domain.

use thiserror::Error;

use domain_billing::BillingError;
use domain_party::PartyError;

/// Errors that can occur in the policy domain
#[derive(Debug, Error)]
pub enum PolicyError {
    /// A request parameter is missing, unknown, duplicated or out of range
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The contract is not in a state that allows the operation
    #[error("Invalid contract state: {0}")]
    InvalidState(String),

    /// Billing engine rejected the operation
    #[error("Billing error: {0}")]
    Billing(#[from] BillingError),

    /// Party data was invalid
    #[error("Party error: {0}")]
    Party(#[from] PartyError),

    /// Configuration could not be loaded or failed validation
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl PolicyError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        PolicyError::InvalidArgument(message.into())
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        PolicyError::InvalidState(message.into())
    }

    /// Returns true for precondition violations, including those raised by
    /// the billing and party domains
    pub fn is_invalid_argument(&self) -> bool {
        match self {
            PolicyError::InvalidArgument(_) | PolicyError::Party(_) => true,
            PolicyError::Billing(inner) => inner.is_invalid_argument(),
            _ => false,
        }
    }

    /// Returns true for state violations, including those raised by the
    /// billing domain
    pub fn is_invalid_state(&self) -> bool {
        match self {
            PolicyError::InvalidState(_) => true,
            PolicyError::Billing(inner) => inner.is_invalid_state(),
            _ => false,
        }
    }
}

impl From<config::ConfigError> for PolicyError {
    fn from(err: config::ConfigError) -> Self {
        PolicyError::Configuration(err.to_string())
    }
}

impl From<validator::ValidationErrors> for PolicyError {
    fn from(err: validator::ValidationErrors) -> Self {
        PolicyError::Configuration(err.to_string())
    }
}

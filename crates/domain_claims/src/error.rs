//! Claims domain errors

use thiserror::Error;

use domain_policy::PolicyError;

/// Errors that can occur in the claims domain
#[derive(Debug, Error)]
pub enum ClaimError {
    #[error("Invalid claim: {0}")]
    InvalidArgument(String),

    #[error("Contract cannot take claims: {0}")]
    InvalidState(String),

    #[error(transparent)]
    Policy(#[from] PolicyError),
}

impl ClaimError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        ClaimError::InvalidArgument(message.into())
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        ClaimError::InvalidState(message.into())
    }

    pub fn is_invalid_argument(&self) -> bool {
        match self {
            ClaimError::InvalidArgument(_) => true,
            ClaimError::Policy(inner) => inner.is_invalid_argument(),
            ClaimError::InvalidState(_) => false,
        }
    }

    pub fn is_invalid_state(&self) -> bool {
        match self {
            ClaimError::InvalidState(_) => true,
            ClaimError::Policy(inner) => inner.is_invalid_state(),
            ClaimError::InvalidArgument(_) => false,
        }
    }
}

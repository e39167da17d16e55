//! Party domain errors
//!
//! This module defines the error types that can occur in the party domain.

use thiserror::Error;

/// Errors that can occur in the party domain
#[derive(Debug, Error)]
pub enum PartyError {
    /// Invalid party or vehicle data provided
    #[error("Invalid party data: {0}")]
    InvalidData(String),
}

impl PartyError {
    /// Creates an InvalidData error with a message
    pub fn invalid(message: impl Into<String>) -> Self {
        PartyError::InvalidData(message.into())
    }
}

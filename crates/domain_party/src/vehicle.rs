//! Insured vehicles

use serde::{Deserialize, Serialize};

use crate::error::PartyError;
use crate::validation::is_valid_license_plate;

/// A vehicle that can be covered by a single-vehicle contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    license_plate: String,
    original_value: i64,
}

impl Vehicle {
    /// Creates a vehicle
    ///
    /// # Errors
    ///
    /// Returns `InvalidData` for a malformed plate or a non-positive value
    pub fn new(license_plate: impl Into<String>, original_value: i64) -> Result<Self, PartyError> {
        let license_plate = license_plate.into();
        if !is_valid_license_plate(&license_plate) {
            return Err(PartyError::invalid(format!("invalid license plate '{}'", license_plate)));
        }
        if original_value <= 0 {
            return Err(PartyError::invalid(format!(
                "vehicle value must be positive, got {}",
                original_value
            )));
        }

        Ok(Self {
            license_plate,
            original_value,
        })
    }

    pub fn license_plate(&self) -> &str {
        &self.license_plate
    }

    pub fn original_value(&self) -> i64 {
        self.original_value
    }
}

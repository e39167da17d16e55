//! Persons
//!
//! A person is either a natural person identified by a birth number or a
//! legal entity identified by a registration number. The legal form is
//! derived from which of the two the identifier validates as.

use serde::{Deserialize, Serialize};

use core_kernel::PartyId;
use crate::error::PartyError;
use crate::validation::{is_valid_birth_number, is_valid_registration_number};

/// Legal form of a person
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LegalForm {
    /// Individual identified by a birth number
    Natural,
    /// Company identified by a registration number
    Legal,
}

impl std::fmt::Display for LegalForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LegalForm::Natural => write!(f, "natural"),
            LegalForm::Legal => write!(f, "legal"),
        }
    }
}

/// A policyholder, beneficiary or insured person
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Unique identifier
    pub id: PartyId,
    /// Birth number or registration number
    national_id: String,
    legal_form: LegalForm,
    /// Total claim payouts received
    paid_out_amount: i64,
}

impl Person {
    /// Creates a person from a birth number or registration number
    ///
    /// # Errors
    ///
    /// Returns `InvalidData` if the identifier is neither
    pub fn new(national_id: impl Into<String>) -> Result<Self, PartyError> {
        let national_id = national_id.into();

        let legal_form = if is_valid_birth_number(&national_id) {
            LegalForm::Natural
        } else if is_valid_registration_number(&national_id) {
            LegalForm::Legal
        } else {
            return Err(PartyError::invalid(format!(
                "'{}' is neither a birth number nor a registration number",
                national_id
            )));
        };

        Ok(Self {
            id: PartyId::new_v7(),
            national_id,
            legal_form,
            paid_out_amount: 0,
        })
    }

    pub fn national_id(&self) -> &str {
        &self.national_id
    }

    pub fn legal_form(&self) -> LegalForm {
        self.legal_form
    }

    pub fn is_natural(&self) -> bool {
        self.legal_form == LegalForm::Natural
    }

    pub fn paid_out_amount(&self) -> i64 {
        self.paid_out_amount
    }

    /// Credits a claim payout to this person
    ///
    /// # Errors
    ///
    /// Returns `InvalidData` if `amount <= 0` or the running total would
    /// overflow; the total is then unchanged
    pub fn payout(&mut self, amount: i64) -> Result<(), PartyError> {
        if amount <= 0 {
            return Err(PartyError::invalid(format!("payout must be positive, got {}", amount)));
        }
        self.paid_out_amount = self.paid_out_amount.checked_add(amount).ok_or_else(|| {
            PartyError::invalid(format!(
                "payout of {} overflows the total of {}",
                amount, self.paid_out_amount
            ))
        })?;
        tracing::debug!(party = %self.id, amount, total = self.paid_out_amount, "Payout credited");
        Ok(())
    }
}

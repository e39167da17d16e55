//! Ledger entries
//!
//! A ledger entry is one contract's billing state: what it owes per cycle,
//! how often it is charged, when the next charge falls due, and the running
//! balance. Positive balances are arrears, negative balances are prepaid
//! credit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::add_months;
use crate::error::{ensure_positive, BillingError};

/// Premium payment cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PremiumFrequency {
    /// Charged every month
    Monthly,
    /// Charged every three months
    Quarterly,
    /// Charged every six months
    SemiAnnual,
    /// Charged once a year
    Annual,
}

impl PremiumFrequency {
    /// Returns the number of months between successive charges
    pub fn months(&self) -> u32 {
        match self {
            PremiumFrequency::Monthly => 1,
            PremiumFrequency::Quarterly => 3,
            PremiumFrequency::SemiAnnual => 6,
            PremiumFrequency::Annual => 12,
        }
    }

    /// Returns the number of charges per year
    pub fn payments_per_year(&self) -> u32 {
        12 / self.months()
    }

    /// Returns the premium collected over a year at this cadence
    pub fn annualize(&self, premium: i64) -> i64 {
        premium.saturating_mul(i64::from(self.payments_per_year()))
    }
}

impl TryFrom<u32> for PremiumFrequency {
    type Error = BillingError;

    fn try_from(months: u32) -> Result<Self, Self::Error> {
        match months {
            1 => Ok(PremiumFrequency::Monthly),
            3 => Ok(PremiumFrequency::Quarterly),
            6 => Ok(PremiumFrequency::SemiAnnual),
            12 => Ok(PremiumFrequency::Annual),
            other => Err(BillingError::invalid_argument(format!(
                "malformed cadence: {} months",
                other
            ))),
        }
    }
}

/// Billing state of a single contract
///
/// # Invariants
///
/// - `premium > 0`
/// - `next_due` never moves backwards
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    premium: i64,
    frequency: PremiumFrequency,
    next_due: DateTime<Utc>,
    outstanding_balance: i64,
}

impl LedgerEntry {
    /// Creates an entry with a zero balance
    ///
    /// # Arguments
    ///
    /// * `premium` - Amount charged per cycle, must be positive
    /// * `frequency` - Charging cadence
    /// * `next_due` - When the first charge falls due
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `premium <= 0`
    pub fn new(
        premium: i64,
        frequency: PremiumFrequency,
        next_due: DateTime<Utc>,
    ) -> Result<Self, BillingError> {
        ensure_positive(premium, "premium")?;

        Ok(Self {
            premium,
            frequency,
            next_due,
            outstanding_balance: 0,
        })
    }

    /// Sets the opening balance
    pub fn with_balance(mut self, outstanding_balance: i64) -> Self {
        self.outstanding_balance = outstanding_balance;
        self
    }

    pub fn premium(&self) -> i64 {
        self.premium
    }

    pub fn frequency(&self) -> PremiumFrequency {
        self.frequency
    }

    pub fn next_due(&self) -> DateTime<Utc> {
        self.next_due
    }

    pub fn outstanding_balance(&self) -> i64 {
        self.outstanding_balance
    }

    /// Returns true if the entry owes money
    pub fn is_in_arrears(&self) -> bool {
        self.outstanding_balance > 0
    }

    /// Changes the premium charged from the next cycle on
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `premium <= 0`
    pub fn set_premium(&mut self, premium: i64) -> Result<(), BillingError> {
        ensure_positive(premium, "premium")?;
        self.premium = premium;
        Ok(())
    }

    /// Changes the cadence used when the due date is next advanced
    pub fn set_frequency(&mut self, frequency: PremiumFrequency) {
        self.frequency = frequency;
    }

    /// Charges one cycle: adds the premium and moves the due date forward
    ///
    /// Nothing changes when either the balance or the due date would leave
    /// its range.
    pub(crate) fn charge_cycle(&mut self) -> Result<(), BillingError> {
        let next_due = add_months(self.next_due, self.frequency.months())?;
        let balance = self
            .outstanding_balance
            .checked_add(self.premium)
            .ok_or_else(|| balance_overflow(self.outstanding_balance, self.premium))?;
        self.outstanding_balance = balance;
        self.next_due = next_due;
        Ok(())
    }

    /// Reduces the balance by `amount`; the result may go negative
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the balance would underflow, leaving it
    /// unchanged
    pub(crate) fn credit(&mut self, amount: i64) -> Result<(), BillingError> {
        self.outstanding_balance = self
            .outstanding_balance
            .checked_sub(amount)
            .ok_or_else(|| balance_overflow(self.outstanding_balance, amount.saturating_neg()))?;
        Ok(())
    }

    pub(crate) fn settle_in_full(&mut self) {
        self.outstanding_balance = 0;
    }
}

fn balance_overflow(balance: i64, change: i64) -> BillingError {
    BillingError::invalid_argument(format!(
        "balance {} cannot absorb a change of {}",
        balance, change
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_new_rejects_non_positive_premium() {
        assert!(LedgerEntry::new(0, PremiumFrequency::Monthly, t0()).is_err());
        assert!(LedgerEntry::new(-5, PremiumFrequency::Monthly, t0()).is_err());
    }

    #[test]
    fn test_charge_cycle_advances_by_cadence() {
        let mut entry = LedgerEntry::new(100, PremiumFrequency::Quarterly, t0()).unwrap();
        entry.charge_cycle().unwrap();

        assert_eq!(entry.outstanding_balance(), 100);
        assert_eq!(entry.next_due(), Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_frequency_from_months() {
        assert_eq!(PremiumFrequency::try_from(6).unwrap(), PremiumFrequency::SemiAnnual);
        assert!(PremiumFrequency::try_from(2).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_payments_per_year() {
        assert_eq!(PremiumFrequency::Monthly.payments_per_year(), 12);
        assert_eq!(PremiumFrequency::Quarterly.payments_per_year(), 4);
        assert_eq!(PremiumFrequency::SemiAnnual.payments_per_year(), 2);
        assert_eq!(PremiumFrequency::Annual.payments_per_year(), 1);
    }

    #[test]
    fn test_balance_overflow_leaves_entry_unchanged() {
        let mut entry = LedgerEntry::new(100, PremiumFrequency::Monthly, t0())
            .unwrap()
            .with_balance(i64::MAX - 50);
        assert!(entry.charge_cycle().unwrap_err().is_invalid_argument());
        assert_eq!(entry.outstanding_balance(), i64::MAX - 50);
        assert_eq!(entry.next_due(), t0());

        let mut entry = entry.with_balance(-10);
        assert!(entry.credit(i64::MAX).unwrap_err().is_invalid_argument());
        assert_eq!(entry.outstanding_balance(), -10);
    }
}

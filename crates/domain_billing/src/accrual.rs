//! Premium accrual
//!
//! Brings a ledger entry's due schedule up to a given instant, charging one
//! premium for every billing cycle that has fallen due.

use chrono::{DateTime, Utc};

use crate::entry::LedgerEntry;
use crate::error::BillingError;

/// Charges every cycle of `entry` that is due at or before `now`
///
/// Each charge adds the premium to the outstanding balance and moves the due
/// date forward by the entry's cadence. When `now` is before the next due
/// date nothing changes. After a successful call `entry.next_due() > now`.
///
/// # Returns
///
/// The number of cycles charged
///
/// # Errors
///
/// - `Schedule` if a due date cannot be represented
/// - `InvalidArgument` if the balance would overflow
///
/// On error the entry is left exactly as it was.
pub fn accrue(entry: &mut LedgerEntry, now: DateTime<Utc>) -> Result<u32, BillingError> {
    let (staged, cycles) = staged_accrual(entry, now)?;
    if cycles > 0 {
        tracing::debug!(
            cycles,
            balance = staged.outstanding_balance(),
            next_due = %staged.next_due(),
            "Accrued premium"
        );
        *entry = staged;
    }
    Ok(cycles)
}

/// Accrues every entry of a group independently
///
/// Either every entry is brought up to `now` or, on error, none is changed.
///
/// # Returns
///
/// The total number of cycles charged across the group
pub fn accrue_group<'a, I>(entries: I, now: DateTime<Utc>) -> Result<u32, BillingError>
where
    I: IntoIterator<Item = &'a mut LedgerEntry>,
{
    let mut targets: Vec<&'a mut LedgerEntry> = entries.into_iter().collect();
    let staged = targets
        .iter()
        .map(|entry| staged_accrual(entry, now))
        .collect::<Result<Vec<_>, _>>()?;

    let mut cycles = 0;
    for (target, (entry, charged)) in targets.iter_mut().zip(staged) {
        if charged > 0 {
            **target = entry;
            cycles += charged;
        }
    }
    Ok(cycles)
}

/// Accrues a copy of `entry`, leaving the original untouched
pub(crate) fn staged_accrual(entry: &LedgerEntry, now: DateTime<Utc>) -> Result<(LedgerEntry, u32), BillingError> {
    let mut staged = entry.clone();
    let mut cycles = 0;
    while staged.next_due() <= now {
        staged.charge_cycle()?;
        cycles += 1;
    }
    Ok((staged, cycles))
}

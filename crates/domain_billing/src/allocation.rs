//! Group payment allocation
//!
//! Distributes one incoming payment across the ledger entries of a group.
//! The payment first clears arrears, then prepays future premiums. Both
//! phases walk the entries in the order given, so the caller's ordering
//! decides who benefits when the payment does not cover everything.
//!
//! # Phases
//!
//! 1. **Debt clearance** - every entry in arrears is settled in turn. The
//!    first entry the remaining amount cannot settle receives what is left
//!    and the phase ends there.
//! 2. **Prepayment** - repeated passes subtract one full premium from each
//!    entry while the amount covers it. The first entry whose premium exceeds
//!    the remainder receives the remainder as partial credit.

use serde::{Deserialize, Serialize};

use crate::entry::LedgerEntry;
use crate::error::{ensure_positive, BillingError};

/// Result of allocating one payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationOutcome {
    /// Amount applied to the entries
    pub consumed: i64,
    /// Amount that could not be applied
    pub unallocated: i64,
}

impl AllocationOutcome {
    /// Returns true if the whole payment was applied
    pub fn is_fully_allocated(&self) -> bool {
        self.unallocated == 0
    }
}

/// Allocates `amount` across `entries`, debt first, then prepayment
///
/// For a non-empty slice the whole amount is always consumed. An empty slice
/// consumes nothing and the amount comes back as `unallocated`. Full
/// prepayment passes are applied in bulk, so the cost does not grow with
/// the size of the amount.
///
/// # Errors
///
/// - `InvalidArgument` if `amount <= 0`
/// - `InvalidArgument` if a balance would overflow; no entry is changed
///
/// # Example
///
/// ```rust,ignore
/// let outcome = allocate(175, &mut [&mut first, &mut second])?;
/// assert_eq!(outcome.consumed, 175);
/// ```
pub fn allocate(amount: i64, entries: &mut [&mut LedgerEntry]) -> Result<AllocationOutcome, BillingError> {
    ensure_positive(amount, "allocation amount")?;

    let mut staged: Vec<LedgerEntry> = entries.iter().map(|entry| (**entry).clone()).collect();
    let mut remaining = amount;
    let mut consumed = clear_debts(&mut remaining, &mut staged)?;
    consumed += prepay(&mut remaining, &mut staged)?;

    for (target, entry) in entries.iter_mut().zip(staged) {
        **target = entry;
    }

    tracing::debug!(
        amount,
        consumed,
        unallocated = remaining,
        entries = entries.len(),
        "Allocated payment"
    );

    Ok(AllocationOutcome {
        consumed,
        unallocated: remaining,
    })
}

fn clear_debts(remaining: &mut i64, entries: &mut [LedgerEntry]) -> Result<i64, BillingError> {
    let mut consumed = 0;

    for entry in entries.iter_mut() {
        if *remaining == 0 {
            break;
        }
        let debt = entry.outstanding_balance();
        if debt <= 0 {
            continue;
        }

        if *remaining >= debt {
            entry.settle_in_full();
            *remaining -= debt;
            consumed += debt;
        } else {
            entry.credit(*remaining)?;
            consumed += *remaining;
            *remaining = 0;
            break;
        }
    }

    Ok(consumed)
}

/// Repeated passes of one premium per entry, in order
///
/// Whole passes are folded into a single credit of `passes * premium` per
/// entry; only the last, partial pass walks the entries one by one.
fn prepay(remaining: &mut i64, entries: &mut [LedgerEntry]) -> Result<i64, BillingError> {
    if entries.is_empty() || *remaining == 0 {
        return Ok(0);
    }
    let mut consumed = 0;

    // A pass total beyond i64 is more than any remaining amount.
    let pass_total = entries
        .iter()
        .try_fold(0i64, |total, entry| total.checked_add(entry.premium()));
    if let Some(pass_total) = pass_total {
        let passes = *remaining / pass_total;
        if passes > 0 {
            for entry in entries.iter_mut() {
                let share = entry
                    .premium()
                    .checked_mul(passes)
                    .ok_or_else(|| BillingError::invalid_argument("prepayment share overflows"))?;
                entry.credit(share)?;
            }
            let bulk = pass_total * passes;
            *remaining -= bulk;
            consumed += bulk;
        }
    }

    for entry in entries.iter_mut() {
        if *remaining == 0 {
            break;
        }
        let step = entry.premium().min(*remaining);
        entry.credit(step)?;
        *remaining -= step;
        consumed += step;
    }

    Ok(consumed)
}

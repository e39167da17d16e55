//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data
//! that maintains domain invariants.

use chrono::{DateTime, Duration, TimeZone, Utc};
use domain_billing::{LedgerEntry, PremiumFrequency};
use proptest::prelude::*;

/// Strategy for generating valid positive amounts
pub fn positive_amount_strategy() -> impl Strategy<Value = i64> {
    1i64..1_000_000i64
}

/// Strategy for generating balances on either side of zero
pub fn balance_strategy() -> impl Strategy<Value = i64> {
    -1_000_000i64..1_000_000i64
}

/// Strategy for generating valid premiums
pub fn premium_strategy() -> impl Strategy<Value = i64> {
    1i64..10_000i64
}

/// Strategy for generating charging frequencies
pub fn frequency_strategy() -> impl Strategy<Value = PremiumFrequency> {
    prop_oneof![
        Just(PremiumFrequency::Monthly),
        Just(PremiumFrequency::Quarterly),
        Just(PremiumFrequency::SemiAnnual),
        Just(PremiumFrequency::Annual),
    ]
}

/// Strategy for generating timestamps between 2000 and 2050
pub fn timestamp_strategy() -> impl Strategy<Value = DateTime<Utc>> {
    let base = Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap();
    (0i64..(50 * 365 * 24 * 60)).prop_map(move |minutes| base + Duration::minutes(minutes))
}

/// Strategy for generating ledger entries
pub fn ledger_entry_strategy() -> impl Strategy<Value = LedgerEntry> {
    (premium_strategy(), frequency_strategy(), timestamp_strategy(), balance_strategy()).prop_map(
        |(premium, frequency, next_due, balance)| {
            LedgerEntry::new(premium, frequency, next_due)
                .unwrap()
                .with_balance(balance)
        },
    )
}

/// Strategy for generating small groups of ledger entries
pub fn ledger_group_strategy(max_len: usize) -> impl Strategy<Value = Vec<LedgerEntry>> {
    prop::collection::vec(ledger_entry_strategy(), 1..=max_len.max(1))
}

//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for ledger state that give
//! more meaningful error messages than standard assertions.

use core_kernel::{ContractId, GroupId};
use domain_billing::{LedgerEntry, PaymentRecord, SettlementLedger};

/// Asserts the outstanding balance of a contract
pub fn assert_balance(ledger: &SettlementLedger, contract: &ContractId, expected: i64) {
    let actual = ledger.balance(contract).expect("contract should exist");
    assert_eq!(
        actual, expected,
        "Balance mismatch for {}: actual={}, expected={}",
        contract, actual, expected
    );
}

/// Asserts the summed balance of a group
pub fn assert_group_balance(ledger: &SettlementLedger, group: &GroupId, expected: i64) {
    let actual = ledger.group_balance(group).expect("group should exist");
    assert_eq!(
        actual, expected,
        "Group balance mismatch for {}: actual={}, expected={}",
        group, actual, expected
    );
}

/// Asserts that an entry is in arrears
pub fn assert_in_arrears(entry: &LedgerEntry) {
    assert!(
        entry.is_in_arrears(),
        "Expected arrears, got balance {}",
        entry.outstanding_balance()
    );
}

/// Asserts that a history is sorted by timestamp
pub fn assert_history_sorted(history: &[PaymentRecord]) {
    for pair in history.windows(2) {
        assert!(
            pair[0].timestamp <= pair[1].timestamp,
            "History out of order: {} after {}",
            pair[1].timestamp,
            pair[0].timestamp
        );
    }
}

/// Asserts the amounts recorded in a history, in order
pub fn assert_history_amounts(history: &[PaymentRecord], expected: &[i64]) {
    let actual: Vec<i64> = history.iter().map(|record| record.amount).collect();
    assert_eq!(actual, expected, "History amounts mismatch");
}

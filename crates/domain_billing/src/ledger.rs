//! Settlement ledger
//!
//! This module provides the orchestrator that owns every contract's ledger
//! entry and payment history for one simulated company, and exposes the
//! batch charge and payment operations on top of the accrual and allocation
//! engines.

use chrono::{DateTime, Utc};
use std::collections::HashMap;

use core_kernel::{ContractId, GroupId, TimeCursor};
use crate::accrual::{accrue, accrue_group, staged_accrual};
use crate::allocation::{allocate, AllocationOutcome};
use crate::entry::LedgerEntry;
use crate::error::{ensure_positive, BillingError};
use crate::payment::{PaymentHistory, PaymentRecord};

/// Billing state of one contract
#[derive(Debug, Clone)]
struct ContractAccount {
    entry: LedgerEntry,
    active: bool,
    history: PaymentHistory,
}

impl ContractAccount {
    fn new(entry: LedgerEntry) -> Self {
        Self {
            entry,
            active: true,
            history: PaymentHistory::new(),
        }
    }
}

/// A master contract and the child accounts it owns
#[derive(Debug, Clone)]
struct GroupAccount {
    active: bool,
    /// Children in insertion order
    children: Vec<(ContractId, ContractAccount)>,
    history: PaymentHistory,
}

impl GroupAccount {
    /// Empty groups report their own flag; otherwise any active child keeps
    /// the group active.
    fn is_active(&self) -> bool {
        if self.children.is_empty() {
            self.active
        } else {
            self.children.iter().any(|(_, child)| child.active)
        }
    }

    fn child(&self, id: &ContractId) -> Option<&ContractAccount> {
        self.children
            .iter()
            .find(|(child_id, _)| child_id == id)
            .map(|(_, account)| account)
    }

    fn child_mut(&mut self, id: &ContractId) -> Option<&mut ContractAccount> {
        self.children
            .iter_mut()
            .find(|(child_id, _)| child_id == id)
            .map(|(_, account)| account)
    }
}

/// The billing ledger of one company
///
/// Owns all contract and group accounts together with the current-time
/// cursor. A contract merged into a group is owned by that group from then
/// on; nothing is ever deleted.
///
/// # Invariants
///
/// - A contract is either top-level or the child of exactly one group
/// - A failed operation leaves every balance and history untouched
#[derive(Debug)]
pub struct SettlementLedger {
    cursor: TimeCursor,
    /// Top-level contract accounts
    accounts: HashMap<ContractId, ContractAccount>,
    /// Registration order of top-level contracts
    account_order: Vec<ContractId>,
    groups: HashMap<GroupId, GroupAccount>,
    group_order: Vec<GroupId>,
    /// Child contract to owning group
    memberships: HashMap<ContractId, GroupId>,
}

impl SettlementLedger {
    /// Creates an empty ledger with the cursor at `now`
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            cursor: TimeCursor::new(now),
            accounts: HashMap::new(),
            account_order: Vec::new(),
            groups: HashMap::new(),
            group_order: Vec::new(),
            memberships: HashMap::new(),
        }
    }

    /// Returns the current time of the ledger
    pub fn current_time(&self) -> DateTime<Utc> {
        self.cursor.now()
    }

    /// Moves the current-time cursor
    pub fn set_current_time(&mut self, now: DateTime<Utc>) {
        self.cursor.set(now);
    }

    /// Registers a contract's ledger entry
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the contract or a group with the same
    /// identity is already registered
    pub fn open_account(&mut self, contract: ContractId, entry: LedgerEntry) -> Result<(), BillingError> {
        if self.contains_contract(&contract) {
            return Err(BillingError::invalid_argument(format!(
                "contract {} is already registered",
                contract
            )));
        }

        tracing::debug!(%contract, premium = entry.premium(), "Opened account");
        self.accounts.insert(contract, ContractAccount::new(entry));
        self.account_order.push(contract);
        Ok(())
    }

    /// Registers an empty, active group
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the group is already registered
    pub fn open_group(&mut self, group: GroupId) -> Result<(), BillingError> {
        if self.contains_group(&group) {
            return Err(BillingError::invalid_argument(format!(
                "group {} is already registered",
                group
            )));
        }

        tracing::debug!(%group, "Opened group");
        self.groups.insert(
            group,
            GroupAccount {
                active: true,
                children: Vec::new(),
                history: PaymentHistory::new(),
            },
        );
        self.group_order.push(group);
        Ok(())
    }

    /// Moves a top-level contract under a group
    ///
    /// The contract keeps its entry and payment history and is appended to
    /// the group's child order.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if either identity is unknown
    /// - `InvalidState` if either is inactive or the contract already
    ///   belongs to a group
    pub fn merge_into_group(&mut self, group: GroupId, contract: ContractId) -> Result<(), BillingError> {
        let group_account = self.group(&group)?;
        if let Some(owner) = self.memberships.get(&contract) {
            return Err(BillingError::invalid_state(format!(
                "contract {} already belongs to group {}",
                contract, owner
            )));
        }
        let account = self.accounts.get(&contract).ok_or_else(|| unknown_contract(&contract))?;

        if !account.active || !group_account.is_active() {
            return Err(BillingError::invalid_state(format!(
                "both {} and {} must be active to merge",
                contract, group
            )));
        }

        let account = self.accounts.remove(&contract).ok_or_else(|| unknown_contract(&contract))?;
        self.account_order.retain(|id| id != &contract);
        self.group_mut(&group)?.children.push((contract, account));
        self.memberships.insert(contract, group);

        tracing::info!(%contract, %group, "Merged contract into group");
        Ok(())
    }

    /// Moves the cursor to `now` and accrues every active contract
    ///
    /// Top-level contracts are accrued when active; for every active group
    /// each child entry is accrued.
    ///
    /// # Returns
    ///
    /// The total number of billing cycles charged
    ///
    /// # Errors
    ///
    /// Returns the first accrual failure; the cursor and every entry are
    /// then left as they were
    pub fn charge_all(&mut self, now: DateTime<Utc>) -> Result<u32, BillingError> {
        let mut cycles = 0;

        let mut staged_accounts = Vec::new();
        for id in &self.account_order {
            if let Some(account) = self.accounts.get(id) {
                if account.active {
                    let (entry, charged) = staged_accrual(&account.entry, now)?;
                    cycles += charged;
                    staged_accounts.push((*id, entry));
                }
            }
        }

        let mut staged_groups = Vec::new();
        for id in &self.group_order {
            if let Some(group) = self.groups.get(id) {
                if group.is_active() {
                    let entries = group
                        .children
                        .iter()
                        .map(|(_, child)| staged_accrual(&child.entry, now))
                        .collect::<Result<Vec<_>, _>>()?;
                    cycles += entries.iter().map(|(_, charged)| charged).sum::<u32>();
                    staged_groups.push((*id, entries));
                }
            }
        }

        self.cursor.set(now);
        for (id, entry) in staged_accounts {
            if let Some(account) = self.accounts.get_mut(&id) {
                account.entry = entry;
            }
        }
        for (id, entries) in staged_groups {
            if let Some(group) = self.groups.get_mut(&id) {
                for ((_, child), (entry, _)) in group.children.iter_mut().zip(entries) {
                    child.entry = entry;
                }
            }
        }

        tracing::info!(%now, cycles, "Charged premiums on all contracts");
        Ok(cycles)
    }

    /// Accrues one contract against the current time
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if the contract is unknown
    /// - `InvalidState` if it is inactive
    pub fn charge_contract(&mut self, contract: ContractId) -> Result<u32, BillingError> {
        let now = self.cursor.now();
        let account = self.account_mut(&contract)?;
        if !account.active {
            return Err(inactive_contract(&contract));
        }
        accrue(&mut account.entry, now)
    }

    /// Accrues every child of a group against the current time
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if the group is unknown
    /// - `InvalidState` if it is inactive
    pub fn charge_group(&mut self, group: GroupId) -> Result<u32, BillingError> {
        let now = self.cursor.now();
        let group_account = self.group_mut(&group)?;
        if !group_account.is_active() {
            return Err(inactive_group(&group));
        }
        accrue_group(group_account.children.iter_mut().map(|(_, child)| &mut child.entry), now)
    }

    /// Pays `amount` against a single contract
    ///
    /// The whole amount is subtracted from the balance, which may go
    /// negative, and recorded at the current time.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if `amount <= 0` or the contract is unknown
    /// - `InvalidState` if the contract is inactive
    pub fn pay_one(&mut self, contract: ContractId, amount: i64) -> Result<(), BillingError> {
        ensure_positive(amount, "payment amount")?;
        let record = PaymentRecord::new(self.cursor.now(), amount)?;
        let account = self.account_mut(&contract)?;
        if !account.active {
            tracing::warn!(%contract, amount, "Rejected payment on inactive contract");
            return Err(inactive_contract(&contract));
        }

        account.entry.credit(amount)?;
        account.history.record(record);

        tracing::info!(%contract, amount, balance = account.entry.outstanding_balance(), "Recorded payment");
        Ok(())
    }

    /// Pays `amount` against a group, allocating it across active children
    ///
    /// One payment record for the consumed amount is added to the group's
    /// history when anything was consumed.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if `amount <= 0` or the group is unknown
    /// - `InvalidState` if the group is inactive or has no children
    pub fn pay_group(&mut self, group: GroupId, amount: i64) -> Result<AllocationOutcome, BillingError> {
        ensure_positive(amount, "payment amount")?;
        let now = self.cursor.now();
        let group_account = self.group_mut(&group)?;
        if !group_account.is_active() {
            tracing::warn!(%group, amount, "Rejected payment on inactive group");
            return Err(inactive_group(&group));
        }
        if group_account.children.is_empty() {
            return Err(BillingError::invalid_state(format!(
                "group {} has no child contracts",
                group
            )));
        }

        let outcome = {
            let mut entries: Vec<&mut LedgerEntry> = group_account
                .children
                .iter_mut()
                .filter(|(_, child)| child.active)
                .map(|(_, child)| &mut child.entry)
                .collect();
            allocate(amount, &mut entries)?
        };

        if outcome.consumed > 0 {
            group_account.history.record(PaymentRecord::new(now, outcome.consumed)?);
        }
        if !outcome.is_fully_allocated() {
            tracing::warn!(%group, unallocated = outcome.unallocated, "Payment not fully allocated");
        }

        tracing::info!(%group, amount, consumed = outcome.consumed, "Recorded group payment");
        Ok(outcome)
    }

    /// Marks a contract inactive; repeating the call is harmless
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the contract is unknown
    pub fn deactivate_contract(&mut self, contract: ContractId) -> Result<(), BillingError> {
        let account = self.account_mut(&contract)?;
        if account.active {
            account.active = false;
            tracing::info!(%contract, "Contract deactivated");
        }
        Ok(())
    }

    /// Marks every child of a group inactive, then the group itself
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the group is unknown
    pub fn deactivate_group(&mut self, group: GroupId) -> Result<(), BillingError> {
        let group_account = self.group_mut(&group)?;
        for (_, child) in group_account.children.iter_mut() {
            child.active = false;
        }
        group_account.active = false;

        tracing::info!(%group, children = group_account.children.len(), "Group deactivated");
        Ok(())
    }

    /// Returns true if the contract is registered, top-level or grouped
    pub fn contains_contract(&self, contract: &ContractId) -> bool {
        self.accounts.contains_key(contract) || self.memberships.contains_key(contract)
    }

    pub fn contains_group(&self, group: &GroupId) -> bool {
        self.groups.contains_key(group)
    }

    pub fn is_contract_active(&self, contract: &ContractId) -> Result<bool, BillingError> {
        Ok(self.account(contract)?.active)
    }

    /// Derived activity of a group; never mutates
    pub fn is_group_active(&self, group: &GroupId) -> Result<bool, BillingError> {
        Ok(self.group(group)?.is_active())
    }

    pub fn entry(&self, contract: &ContractId) -> Result<&LedgerEntry, BillingError> {
        Ok(&self.account(contract)?.entry)
    }

    /// Mutable access for premium and cadence changes
    pub fn entry_mut(&mut self, contract: &ContractId) -> Result<&mut LedgerEntry, BillingError> {
        Ok(&mut self.account_mut(contract)?.entry)
    }

    pub fn balance(&self, contract: &ContractId) -> Result<i64, BillingError> {
        Ok(self.account(contract)?.entry.outstanding_balance())
    }

    /// Sum of the children's balances
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the group is unknown or the sum does not
    /// fit in an `i64`
    pub fn group_balance(&self, group: &GroupId) -> Result<i64, BillingError> {
        self.group(group)?
            .children
            .iter()
            .try_fold(0i64, |total, (_, child)| total.checked_add(child.entry.outstanding_balance()))
            .ok_or_else(|| BillingError::invalid_argument(format!("balance of group {} overflows", group)))
    }

    /// Children of a group in insertion order
    pub fn group_children(&self, group: &GroupId) -> Result<Vec<ContractId>, BillingError> {
        Ok(self.group(group)?.children.iter().map(|(id, _)| *id).collect())
    }

    /// The group owning a contract, if any
    pub fn group_of(&self, contract: &ContractId) -> Option<GroupId> {
        self.memberships.get(contract).copied()
    }

    /// Top-level contracts in registration order
    pub fn top_level_contracts(&self) -> &[ContractId] {
        &self.account_order
    }

    pub fn contract_history(&self, contract: &ContractId) -> Result<&[PaymentRecord], BillingError> {
        Ok(self.account(contract)?.history.records())
    }

    pub fn group_history(&self, group: &GroupId) -> Result<&[PaymentRecord], BillingError> {
        Ok(self.group(group)?.history.records())
    }

    fn account(&self, contract: &ContractId) -> Result<&ContractAccount, BillingError> {
        if let Some(account) = self.accounts.get(contract) {
            return Ok(account);
        }
        self.memberships
            .get(contract)
            .and_then(|group| self.groups.get(group))
            .and_then(|group| group.child(contract))
            .ok_or_else(|| unknown_contract(contract))
    }

    fn account_mut(&mut self, contract: &ContractId) -> Result<&mut ContractAccount, BillingError> {
        if let Some(group) = self.memberships.get(contract) {
            return self
                .groups
                .get_mut(group)
                .and_then(|group| group.child_mut(contract))
                .ok_or_else(|| unknown_contract(contract));
        }
        self.accounts.get_mut(contract).ok_or_else(|| unknown_contract(contract))
    }

    fn group(&self, group: &GroupId) -> Result<&GroupAccount, BillingError> {
        self.groups.get(group).ok_or_else(|| unknown_group(group))
    }

    fn group_mut(&mut self, group: &GroupId) -> Result<&mut GroupAccount, BillingError> {
        self.groups.get_mut(group).ok_or_else(|| unknown_group(group))
    }
}

fn unknown_contract(contract: &ContractId) -> BillingError {
    BillingError::invalid_argument(format!("unknown contract {}", contract))
}

fn unknown_group(group: &GroupId) -> BillingError {
    BillingError::invalid_argument(format!("unknown group {}", group))
}

fn inactive_contract(contract: &ContractId) -> BillingError {
    BillingError::invalid_state(format!("contract {} is inactive", contract))
}

fn inactive_group(group: &GroupId) -> BillingError {
    BillingError::invalid_state(format!("group {} is inactive", group))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::PremiumFrequency;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    fn setup_ledger() -> (SettlementLedger, ContractId) {
        let mut ledger = SettlementLedger::new(t0());
        let contract = ContractId::new();
        let entry = LedgerEntry::new(100, PremiumFrequency::Monthly, t0()).unwrap();
        ledger.open_account(contract, entry).unwrap();
        (ledger, contract)
    }

    #[test]
    fn test_duplicate_account_is_rejected() {
        let (mut ledger, contract) = setup_ledger();
        let entry = LedgerEntry::new(5, PremiumFrequency::Annual, t0()).unwrap();

        let result = ledger.open_account(contract, entry);
        assert!(matches!(result, Err(BillingError::InvalidArgument(_))));
    }

    #[test]
    fn test_duplicate_group_is_rejected() {
        let mut ledger = SettlementLedger::new(t0());
        let group = GroupId::new();
        assert!(!ledger.contains_group(&group));

        ledger.open_group(group).unwrap();

        assert!(ledger.contains_group(&group));
        assert!(ledger.open_group(group).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_merge_moves_account_under_group() {
        let (mut ledger, contract) = setup_ledger();
        let group = GroupId::new();
        ledger.open_group(group).unwrap();

        ledger.merge_into_group(group, contract).unwrap();

        assert!(ledger.top_level_contracts().is_empty());
        assert_eq!(ledger.group_children(&group).unwrap(), vec![contract]);
        assert_eq!(ledger.group_of(&contract), Some(group));
        assert!(ledger.contains_contract(&contract));
    }

    #[test]
    fn test_merge_twice_is_invalid_state() {
        let (mut ledger, contract) = setup_ledger();
        let first = GroupId::new();
        let second = GroupId::new();
        ledger.open_group(first).unwrap();
        ledger.open_group(second).unwrap();
        ledger.merge_into_group(first, contract).unwrap();

        let result = ledger.merge_into_group(second, contract);
        assert!(matches!(result, Err(BillingError::InvalidState(_))));
        assert_eq!(ledger.group_of(&contract), Some(first));
    }

    #[test]
    fn test_failed_payment_leaves_no_trace() {
        let (mut ledger, contract) = setup_ledger();
        ledger.deactivate_contract(contract).unwrap();

        let result = ledger.pay_one(contract, 50);
        assert!(matches!(result, Err(BillingError::InvalidState(_))));
        assert_eq!(ledger.balance(&contract).unwrap(), 0);
        assert!(ledger.contract_history(&contract).unwrap().is_empty());
    }

    #[test]
    fn test_overflowing_payment_is_rejected_without_trace() {
        let (mut ledger, contract) = setup_ledger();
        ledger.pay_one(contract, 10).unwrap();

        let result = ledger.pay_one(contract, i64::MAX);

        assert!(matches!(result, Err(BillingError::InvalidArgument(_))));
        assert_eq!(ledger.balance(&contract).unwrap(), -10);
        assert_eq!(ledger.contract_history(&contract).unwrap().len(), 1);
    }

    #[test]
    fn test_overflowing_charge_changes_nothing() {
        let mut ledger = SettlementLedger::new(t0());
        let healthy = ContractId::new();
        let saturated = ContractId::new();
        ledger
            .open_account(healthy, LedgerEntry::new(100, PremiumFrequency::Monthly, t0()).unwrap())
            .unwrap();
        ledger
            .open_account(
                saturated,
                LedgerEntry::new(100, PremiumFrequency::Monthly, t0())
                    .unwrap()
                    .with_balance(i64::MAX),
            )
            .unwrap();
        let later = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();

        let result = ledger.charge_all(later);

        assert!(matches!(result, Err(BillingError::InvalidArgument(_))));
        assert_eq!(ledger.current_time(), t0());
        assert_eq!(ledger.balance(&healthy).unwrap(), 0);
        assert_eq!(ledger.entry(&healthy).unwrap().next_due(), t0());
    }

    #[test]
    fn test_group_balance_overflow_is_an_error() {
        let mut ledger = SettlementLedger::new(t0());
        let group = GroupId::new();
        ledger.open_group(group).unwrap();
        for _ in 0..2 {
            let contract = ContractId::new();
            let entry = LedgerEntry::new(1, PremiumFrequency::Annual, t0())
                .unwrap()
                .with_balance(i64::MAX);
            ledger.open_account(contract, entry).unwrap();
            ledger.merge_into_group(group, contract).unwrap();
        }

        assert!(ledger.group_balance(&group).unwrap_err().is_invalid_argument());
        assert!(ledger.contains_group(&group));
    }
}

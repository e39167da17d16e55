//! Billing Domain - Premium Accrual and Payment Settlement
//!
//! This crate implements the billing engine of the insurance back-office:
//! it accrues premiums owed by individual contracts and by the children of
//! master (group) contracts, and settles incoming payments against them.
//!
//! # Components
//!
//! - **Ledger entry**: premium, cadence, next due date and running balance
//! - **Payment record**: an immutable timestamped amount, kept in time order
//! - **Accrual**: charges every billing cycle that has fallen due
//! - **Allocation**: spreads one group payment over the children, clearing
//!   arrears first and then prepaying future premiums
//! - **Settlement ledger**: owns all accounts of one company and exposes
//!   "charge all", "pay one" and "pay group"
//!
//! # Time
//!
//! Nothing here reads a wall clock. The ledger carries a time cursor that the
//! caller moves between batches of operations.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_billing::{LedgerEntry, PremiumFrequency, SettlementLedger};
//!
//! let mut ledger = SettlementLedger::new(now);
//! ledger.open_account(contract_id, LedgerEntry::new(100, PremiumFrequency::Monthly, now)?)?;
//! ledger.charge_all(now)?;
//! ledger.pay_one(contract_id, 100)?;
//! ```

pub mod entry;
pub mod payment;
pub mod accrual;
pub mod allocation;
pub mod ledger;
pub mod error;

pub use entry::{LedgerEntry, PremiumFrequency};
pub use payment::{PaymentHistory, PaymentRecord};
pub use accrual::{accrue, accrue_group};
pub use allocation::{allocate, AllocationOutcome};
pub use ledger::SettlementLedger;
pub use error::BillingError;

//! Core Kernel - Foundational types shared by the settlement workspace
//!
//! This crate provides the building blocks used across all domain modules:
//! - Strongly-typed identifiers for contracts, groups and parties
//! - Calendar-month arithmetic and the externally driven billing time cursor

pub mod temporal;
pub mod identifiers;

pub use temporal::{add_months, TemporalError, TimeCursor};
pub use identifiers::{ContractId, GroupId, PartyId};

//! Claims Settlement Domain
//!
//! This crate settles claims against contracts held by an
//! `InsuranceCompany`: payouts are credited to the entitled persons and
//! contracts that can no longer be insured are deactivated.
//!
//! # Claim Outcomes
//!
//! ```text
//! Vehicle: pay coverage to beneficiary or holder -> deactivate on total loss
//! Travel:  split coverage across affected insured persons -> deactivate
//! ```

pub mod settlement;
pub mod error;

pub use settlement::{process_travel_claim, process_vehicle_claim, ClaimPayout, ClaimSettlement};
pub use error::ClaimError;

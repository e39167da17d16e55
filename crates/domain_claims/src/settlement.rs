//! Claim settlement
//!
//! Every claim is validated in full before anything is paid, so a rejected
//! claim leaves the company untouched.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use core_kernel::{ContractId, PartyId};
use domain_policy::underwriting::total_loss_threshold;
use domain_policy::{Contract, InsuranceCompany};

use crate::error::ClaimError;

/// Amount credited to one person
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimPayout {
    pub party: PartyId,
    pub amount: i64,
}

/// Result of a settled claim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimSettlement {
    pub contract: ContractId,
    /// Payouts in the order they were made; zero amounts are not paid
    pub payouts: Vec<ClaimPayout>,
    /// True if the claim deactivated the contract
    pub contract_terminated: bool,
}

impl ClaimSettlement {
    pub fn total_paid(&self) -> i64 {
        self.payouts.iter().map(|payout| payout.amount).sum()
    }
}

/// Settles damage to an insured vehicle
///
/// The full coverage amount goes to the beneficiary, or to the holder when
/// there is none. Damage at or above the total-loss share of the vehicle's
/// value deactivates the contract.
///
/// # Errors
///
/// - `InvalidArgument` if `expected_damages <= 0`, the contract is unknown,
///   or it is not a single-vehicle contract
/// - `InvalidState` if the contract is inactive
pub fn process_vehicle_claim(
    company: &mut InsuranceCompany,
    contract: ContractId,
    expected_damages: i64,
) -> Result<ClaimSettlement, ClaimError> {
    if expected_damages <= 0 {
        return Err(ClaimError::invalid_argument(format!(
            "expected damages must be positive, got {}",
            expected_damages
        )));
    }

    let record = active_contract(company, &contract)?;
    let vehicle = record
        .vehicle()
        .ok_or_else(|| ClaimError::invalid_argument(format!("{} is not a vehicle contract", contract)))?;

    let recipient = record.beneficiary().unwrap_or(record.policy_holder);
    let amount = record.coverage_amount;
    let total_loss = expected_damages >= total_loss_threshold(vehicle, company.config());

    let mut payouts = Vec::with_capacity(1);
    if amount > 0 {
        company.pay_out(&recipient, amount)?;
        payouts.push(ClaimPayout { party: recipient, amount });
    }
    if total_loss {
        company.deactivate_contract(contract)?;
    }

    tracing::info!(%contract, expected_damages, paid = amount, total_loss, "Vehicle claim settled");
    Ok(ClaimSettlement {
        contract,
        payouts,
        contract_terminated: total_loss,
    })
}

/// Settles a travel claim for some of the insured persons
///
/// The coverage amount is split evenly, rounding down, across the affected
/// persons. The contract is always deactivated.
///
/// # Errors
///
/// - `InvalidArgument` if `affected` is empty, repeats a person, names
///   someone not insured under the contract, or the contract is unknown or
///   not a travel contract
/// - `InvalidState` if the contract is inactive
pub fn process_travel_claim(
    company: &mut InsuranceCompany,
    contract: ContractId,
    affected: &[PartyId],
) -> Result<ClaimSettlement, ClaimError> {
    if affected.is_empty() {
        return Err(ClaimError::invalid_argument("affected persons must not be empty"));
    }
    let distinct: HashSet<&PartyId> = affected.iter().collect();
    if distinct.len() != affected.len() {
        return Err(ClaimError::invalid_argument("affected persons must be distinct"));
    }

    let record = active_contract(company, &contract)?;
    if record.is_single_vehicle() {
        return Err(ClaimError::invalid_argument(format!("{} is not a travel contract", contract)));
    }
    let insured = record.insured_persons();
    if let Some(outsider) = affected.iter().find(|party| !insured.contains(*party)) {
        return Err(ClaimError::invalid_argument(format!(
            "{} is not insured under {}",
            outsider, contract
        )));
    }

    let share = record.coverage_amount / affected.len() as i64;

    let mut payouts = Vec::with_capacity(affected.len());
    if share > 0 {
        for party in affected {
            company.pay_out(party, share)?;
            payouts.push(ClaimPayout { party: *party, amount: share });
        }
    }
    company.deactivate_contract(contract)?;

    tracing::info!(%contract, affected = affected.len(), share, "Travel claim settled");
    Ok(ClaimSettlement {
        contract,
        payouts,
        contract_terminated: true,
    })
}

fn active_contract<'a>(company: &'a InsuranceCompany, contract: &ContractId) -> Result<&'a Contract, ClaimError> {
    let record = company
        .contract(contract)
        .ok_or_else(|| ClaimError::invalid_argument(format!("unknown contract {}", contract)))?;
    if !company.is_contract_active(contract)? {
        return Err(ClaimError::invalid_state(format!("contract {} is inactive", contract)));
    }
    Ok(record)
}

//! Contract catalog types
//!
//! Contracts carry what was insured and for whom. Their billing state and
//! active flag live in the company's settlement ledger.

use serde::{Deserialize, Serialize};

use core_kernel::{ContractId, GroupId, PartyId};
use domain_party::Vehicle;

/// What a contract covers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractKind {
    /// One vehicle, paid out to the beneficiary or else the holder
    SingleVehicle {
        vehicle: Vehicle,
        beneficiary: Option<PartyId>,
    },
    /// A fixed set of natural persons
    Travel {
        insured: Vec<PartyId>,
    },
}

/// A billed contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contract {
    pub id: ContractId,
    /// Company-unique contract number
    pub contract_number: String,
    pub policy_holder: PartyId,
    /// Maximum claim payout
    pub coverage_amount: i64,
    pub kind: ContractKind,
}

impl Contract {
    pub fn is_single_vehicle(&self) -> bool {
        matches!(self.kind, ContractKind::SingleVehicle { .. })
    }

    pub fn vehicle(&self) -> Option<&Vehicle> {
        match &self.kind {
            ContractKind::SingleVehicle { vehicle, .. } => Some(vehicle),
            ContractKind::Travel { .. } => None,
        }
    }

    pub fn beneficiary(&self) -> Option<PartyId> {
        match &self.kind {
            ContractKind::SingleVehicle { beneficiary, .. } => *beneficiary,
            ContractKind::Travel { .. } => None,
        }
    }

    pub fn insured_persons(&self) -> &[PartyId] {
        match &self.kind {
            ContractKind::Travel { insured } => insured,
            ContractKind::SingleVehicle { .. } => &[],
        }
    }
}

/// A master vehicle contract grouping single-vehicle contracts of one holder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasterContract {
    pub id: GroupId,
    pub contract_number: String,
    pub policy_holder: PartyId,
    pub beneficiary: Option<PartyId>,
}

/// Reference to either kind of top-level contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContractRef {
    Single(ContractId),
    Master(GroupId),
}

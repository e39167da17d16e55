//! The insurance company orchestrator
//!
//! One `InsuranceCompany` is constructed per simulated company. It owns the
//! persons it deals with, the contract catalog, and the settlement ledger
//! that bills those contracts. Nothing is global: two companies never share
//! state.

use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};

use core_kernel::{ContractId, GroupId, PartyId};
use domain_billing::{AllocationOutcome, LedgerEntry, PremiumFrequency, SettlementLedger};
use domain_party::{LegalForm, Person, Vehicle};

use crate::config::CompanyConfig;
use crate::contract::{Contract, ContractKind, ContractRef, MasterContract};
use crate::error::PolicyError;
use crate::telemetry::init_tracing;
use crate::underwriting::{check_travel_premium, check_vehicle_premium, travel_coverage, vehicle_coverage};

/// An insurance company and everything it has underwritten
#[derive(Debug)]
pub struct InsuranceCompany {
    config: CompanyConfig,
    persons: HashMap<PartyId, Person>,
    contracts: HashMap<ContractId, Contract>,
    masters: HashMap<GroupId, MasterContract>,
    /// Contract numbers in use, single and master alike
    contract_numbers: HashSet<String>,
    /// Creation order of all contracts
    creation_order: Vec<ContractRef>,
    ledger: SettlementLedger,
}

impl InsuranceCompany {
    /// Creates a company whose clock starts at `now`
    pub fn new(now: DateTime<Utc>, config: CompanyConfig) -> Self {
        Self {
            config,
            persons: HashMap::new(),
            contracts: HashMap::new(),
            masters: HashMap::new(),
            contract_numbers: HashSet::new(),
            creation_order: Vec::new(),
            ledger: SettlementLedger::new(now),
        }
    }

    /// Creates a company configured from the environment
    ///
    /// Loads `CompanyConfig::from_env` and installs the tracing subscriber at
    /// the configured log level before the company starts.
    ///
    /// # Errors
    ///
    /// Returns `Configuration` if the environment holds invalid settings
    pub fn from_env(now: DateTime<Utc>) -> Result<Self, PolicyError> {
        let config = CompanyConfig::from_env()?;
        init_tracing(&config.log_level);
        tracing::info!(log_level = %config.log_level, "Company configured from environment");
        Ok(Self::new(now, config))
    }

    pub fn config(&self) -> &CompanyConfig {
        &self.config
    }

    pub fn current_time(&self) -> DateTime<Utc> {
        self.ledger.current_time()
    }

    /// Moves the company clock; nothing is charged until the next batch
    pub fn set_current_time(&mut self, now: DateTime<Utc>) {
        self.ledger.set_current_time(now);
    }

    /// Read access to balances and payment histories
    pub fn ledger(&self) -> &SettlementLedger {
        &self.ledger
    }

    /// Adds a person the company can contract with or pay out to
    pub fn register_person(&mut self, person: Person) -> PartyId {
        let id = person.id;
        self.persons.insert(id, person);
        id
    }

    pub fn person(&self, id: &PartyId) -> Option<&Person> {
        self.persons.get(id)
    }

    pub fn contract(&self, id: &ContractId) -> Option<&Contract> {
        self.contracts.get(id)
    }

    pub fn master(&self, id: &GroupId) -> Option<&MasterContract> {
        self.masters.get(id)
    }

    /// Credits a claim payout to a registered person
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for an unknown person and `Party` for a
    /// non-positive amount
    pub fn pay_out(&mut self, party: &PartyId, amount: i64) -> Result<(), PolicyError> {
        let person = self
            .persons
            .get_mut(party)
            .ok_or_else(|| unknown_person(party))?;
        person.payout(amount)?;
        Ok(())
    }

    /// Underwrites a single vehicle
    ///
    /// The first premium falls due at the current time and is charged
    /// immediately.
    ///
    /// # Arguments
    ///
    /// * `contract_number` - Company-unique, non-empty number
    /// * `beneficiary` - Optional payee for claims, must differ from the holder
    /// * `policy_holder` - Registered person paying the premium
    /// * `premium` - Proposed premium per cycle
    /// * `frequency` - Charging cadence
    /// * `vehicle` - Vehicle to insure
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for a duplicate number, unknown parties, or
    /// a premium below the vehicle minimum
    pub fn insure_vehicle(
        &mut self,
        contract_number: &str,
        beneficiary: Option<PartyId>,
        policy_holder: PartyId,
        premium: i64,
        frequency: PremiumFrequency,
        vehicle: Vehicle,
    ) -> Result<ContractId, PolicyError> {
        self.check_contract_number(contract_number)?;
        self.require_person(&policy_holder)?;
        self.check_beneficiary(beneficiary, &policy_holder)?;
        check_vehicle_premium(premium, frequency, &vehicle, &self.config)?;

        let coverage_amount = vehicle_coverage(&vehicle, &self.config);
        let contract = Contract {
            id: ContractId::new_v7(),
            contract_number: contract_number.to_string(),
            policy_holder,
            coverage_amount,
            kind: ContractKind::SingleVehicle { vehicle, beneficiary },
        };

        let id = self.open_billed_contract(contract, premium, frequency)?;
        tracing::info!(contract = %id, contract_number, premium, coverage_amount, "Vehicle insured");
        Ok(id)
    }

    /// Underwrites a travel contract for a set of natural persons
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for a duplicate number, an empty or
    /// repeated insured set, unknown parties, legal entities among the
    /// insured, or a premium below the per-person minimum
    pub fn insure_persons(
        &mut self,
        contract_number: &str,
        policy_holder: PartyId,
        premium: i64,
        frequency: PremiumFrequency,
        insured: &[PartyId],
    ) -> Result<ContractId, PolicyError> {
        self.check_contract_number(contract_number)?;
        self.require_person(&policy_holder)?;

        if insured.is_empty() {
            return Err(PolicyError::invalid_argument("insured persons must not be empty"));
        }
        let distinct: HashSet<&PartyId> = insured.iter().collect();
        if distinct.len() != insured.len() {
            return Err(PolicyError::invalid_argument("insured persons must be distinct"));
        }
        for party in insured {
            if !self.require_person(party)?.is_natural() {
                return Err(PolicyError::invalid_argument(format!(
                    "insured person {} must be a natural person",
                    party
                )));
            }
        }
        check_travel_premium(premium, frequency, insured.len(), &self.config)?;

        let coverage_amount = travel_coverage(insured.len(), &self.config);
        let contract = Contract {
            id: ContractId::new_v7(),
            contract_number: contract_number.to_string(),
            policy_holder,
            coverage_amount,
            kind: ContractKind::Travel {
                insured: insured.to_vec(),
            },
        };

        let id = self.open_billed_contract(contract, premium, frequency)?;
        tracing::info!(contract = %id, contract_number, premium, insured = insured.len(), "Persons insured");
        Ok(id)
    }

    /// Creates an empty master vehicle contract
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for a duplicate number, unknown parties, a
    /// holder that is not a legal entity, or a beneficiary equal to the holder
    pub fn create_master_vehicle_contract(
        &mut self,
        contract_number: &str,
        beneficiary: Option<PartyId>,
        policy_holder: PartyId,
    ) -> Result<GroupId, PolicyError> {
        self.check_contract_number(contract_number)?;
        if self.require_person(&policy_holder)?.legal_form() != LegalForm::Legal {
            return Err(PolicyError::invalid_argument(
                "master contract holder must be a legal entity",
            ));
        }
        self.check_beneficiary(beneficiary, &policy_holder)?;

        let id = GroupId::new_v7();
        self.ledger.open_group(id)?;
        self.masters.insert(
            id,
            MasterContract {
                id,
                contract_number: contract_number.to_string(),
                policy_holder,
                beneficiary,
            },
        );
        self.contract_numbers.insert(contract_number.to_string());
        self.creation_order.push(ContractRef::Master(id));

        tracing::info!(group = %id, contract_number, "Master contract created");
        Ok(id)
    }

    /// Moves a single-vehicle contract under a master contract
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if either contract is unknown or `single` is not
    ///   a single-vehicle contract
    /// - `InvalidState` if either is inactive, the holders differ, or the
    ///   contract is already grouped
    pub fn move_single_vehicle_contract_to_master(
        &mut self,
        master: GroupId,
        single: ContractId,
    ) -> Result<(), PolicyError> {
        let master_contract = self.masters.get(&master).ok_or_else(|| unknown_master(&master))?;
        let contract = self.contracts.get(&single).ok_or_else(|| unknown_contract(&single))?;
        if !contract.is_single_vehicle() {
            return Err(PolicyError::invalid_argument(format!(
                "{} is not a single-vehicle contract",
                single
            )));
        }

        if !self.ledger.is_contract_active(&single)? || !self.ledger.is_group_active(&master)? {
            return Err(PolicyError::invalid_state("both contracts must be active"));
        }
        if contract.policy_holder != master_contract.policy_holder {
            return Err(PolicyError::invalid_state("contracts must have the same policy holder"));
        }

        self.ledger.merge_into_group(master, single)?;
        Ok(())
    }

    /// Charges every active contract up to the current time
    pub fn charge_premiums_on_contracts(&mut self) -> Result<u32, PolicyError> {
        let now = self.ledger.current_time();
        Ok(self.ledger.charge_all(now)?)
    }

    /// Pays against a single contract
    pub fn pay_contract(&mut self, contract: ContractId, amount: i64) -> Result<(), PolicyError> {
        Ok(self.ledger.pay_one(contract, amount)?)
    }

    /// Pays against a master contract, allocating across its children
    pub fn pay_master(&mut self, master: GroupId, amount: i64) -> Result<AllocationOutcome, PolicyError> {
        Ok(self.ledger.pay_group(master, amount)?)
    }

    pub fn deactivate_contract(&mut self, contract: ContractId) -> Result<(), PolicyError> {
        Ok(self.ledger.deactivate_contract(contract)?)
    }

    /// Deactivates a master contract and all of its children
    pub fn deactivate_master(&mut self, master: GroupId) -> Result<(), PolicyError> {
        Ok(self.ledger.deactivate_group(master)?)
    }

    pub fn is_contract_active(&self, contract: &ContractId) -> Result<bool, PolicyError> {
        Ok(self.ledger.is_contract_active(contract)?)
    }

    pub fn is_master_active(&self, master: &GroupId) -> Result<bool, PolicyError> {
        Ok(self.ledger.is_group_active(master)?)
    }

    /// Changes the premium charged from the contract's next cycle on
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for an unknown contract or a non-positive
    /// premium
    pub fn set_premium(&mut self, contract: ContractId, premium: i64) -> Result<(), PolicyError> {
        self.ledger.entry_mut(&contract)?.set_premium(premium)?;
        tracing::info!(%contract, premium, "Premium changed");
        Ok(())
    }

    /// Changes the cadence used when the contract's due date next advances
    pub fn set_frequency(&mut self, contract: ContractId, frequency: PremiumFrequency) -> Result<(), PolicyError> {
        self.ledger.entry_mut(&contract)?.set_frequency(frequency);
        tracing::info!(%contract, ?frequency, "Premium frequency changed");
        Ok(())
    }

    /// Overrides the coverage amount of a contract
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for an unknown contract or negative amount
    pub fn set_coverage_amount(&mut self, contract: ContractId, coverage_amount: i64) -> Result<(), PolicyError> {
        if coverage_amount < 0 {
            return Err(PolicyError::invalid_argument(format!(
                "coverage amount must not be negative, got {}",
                coverage_amount
            )));
        }
        let record = self
            .contracts
            .get_mut(&contract)
            .ok_or_else(|| unknown_contract(&contract))?;
        record.coverage_amount = coverage_amount;
        Ok(())
    }

    /// Replaces the beneficiary of a single-vehicle contract
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for an unknown contract or person, a travel
    /// contract, or a beneficiary equal to the holder
    pub fn set_beneficiary(&mut self, contract: ContractId, beneficiary: Option<PartyId>) -> Result<(), PolicyError> {
        let holder = self
            .contracts
            .get(&contract)
            .ok_or_else(|| unknown_contract(&contract))?
            .policy_holder;
        self.check_beneficiary(beneficiary, &holder)?;

        match self.contracts.get_mut(&contract).map(|c| &mut c.kind) {
            Some(ContractKind::SingleVehicle { beneficiary: current, .. }) => {
                *current = beneficiary;
                Ok(())
            }
            Some(ContractKind::Travel { .. }) => Err(PolicyError::invalid_argument(
                "travel contracts have no beneficiary",
            )),
            None => Err(unknown_contract(&contract)),
        }
    }

    /// Top-level contracts held by `holder`, in creation order
    ///
    /// Contracts moved under a master contract are listed through the
    /// master only.
    pub fn contracts_of(&self, holder: &PartyId) -> Vec<ContractRef> {
        self.creation_order
            .iter()
            .copied()
            .filter(|reference| match reference {
                ContractRef::Single(id) => {
                    self.ledger.group_of(id).is_none()
                        && self.contracts.get(id).is_some_and(|c| &c.policy_holder == holder)
                }
                ContractRef::Master(id) => self.masters.get(id).is_some_and(|m| &m.policy_holder == holder),
            })
            .collect()
    }

    fn open_billed_contract(
        &mut self,
        contract: Contract,
        premium: i64,
        frequency: PremiumFrequency,
    ) -> Result<ContractId, PolicyError> {
        let id = contract.id;
        let entry = LedgerEntry::new(premium, frequency, self.ledger.current_time())?;
        self.ledger.open_account(id, entry)?;
        self.ledger.charge_contract(id)?;

        self.contract_numbers.insert(contract.contract_number.clone());
        self.contracts.insert(id, contract);
        self.creation_order.push(ContractRef::Single(id));
        Ok(id)
    }

    fn check_contract_number(&self, contract_number: &str) -> Result<(), PolicyError> {
        if contract_number.is_empty() {
            return Err(PolicyError::invalid_argument("contract number must not be empty"));
        }
        if self.contract_numbers.contains(contract_number) {
            return Err(PolicyError::invalid_argument(format!(
                "contract number '{}' already exists",
                contract_number
            )));
        }
        Ok(())
    }

    fn require_person(&self, party: &PartyId) -> Result<&Person, PolicyError> {
        self.persons.get(party).ok_or_else(|| unknown_person(party))
    }

    fn check_beneficiary(&self, beneficiary: Option<PartyId>, holder: &PartyId) -> Result<(), PolicyError> {
        if let Some(beneficiary) = beneficiary {
            self.require_person(&beneficiary)?;
            if &beneficiary == holder {
                return Err(PolicyError::invalid_argument(
                    "beneficiary must differ from the policy holder",
                ));
            }
        }
        Ok(())
    }
}

fn unknown_person(party: &PartyId) -> PolicyError {
    PolicyError::invalid_argument(format!("unknown person {}", party))
}

fn unknown_contract(contract: &ContractId) -> PolicyError {
    PolicyError::invalid_argument(format!("unknown contract {}", contract))
}

fn unknown_master(master: &GroupId) -> PolicyError {
    PolicyError::invalid_argument(format!("unknown master contract {}", master))
}

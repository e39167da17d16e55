//! Contract Administration Domain
//!
//! This crate implements contract administration for the insurance company:
//! underwriting single-vehicle and travel contracts, grouping vehicle
//! contracts under master contracts, and driving premium billing through
//! the settlement ledger of `domain_billing`.
//!
//! # Architecture
//!
//! - **Catalog**: `Contract`, `MasterContract` and their `ContractRef`
//! - **Underwriting**: Minimum premiums and coverage derived from the insured object
//! - **Orchestrator**: `InsuranceCompany` owns persons, contracts and the ledger
//! - **Ambient**: `CompanyConfig` from the environment, `init_tracing` for logging
//!
//! # Contract Lifecycle
//!
//! ```text
//! Created (charged immediately) -> Active -> Inactive
//!                                    \-> moved under Master -> Inactive with Master
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_policy::{CompanyConfig, InsuranceCompany};
//!
//! // or InsuranceCompany::from_env(now)?, which also starts tracing at INSURANCE_LOG_LEVEL
//! let mut company = InsuranceCompany::new(now, CompanyConfig::default());
//! let holder = company.register_person(Person::new("8351068242")?);
//! let contract = company.insure_vehicle("C-1", None, holder, 25, PremiumFrequency::Monthly, vehicle)?;
//!
//! company.pay_contract(contract, 25)?;
//! ```

pub mod config;
pub mod contract;
pub mod underwriting;
pub mod company;
pub mod telemetry;
pub mod error;

pub use config::CompanyConfig;
pub use contract::{Contract, ContractKind, ContractRef, MasterContract};
pub use company::InsuranceCompany;
pub use telemetry::init_tracing;
pub use error::PolicyError;

//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible defaults.
//! These builders allow tests to specify only the relevant fields while using
//! defaults for everything else.

use chrono::{DateTime, Utc};
use core_kernel::PartyId;
use domain_billing::{LedgerEntry, PremiumFrequency};
use domain_party::Person;
use domain_policy::{CompanyConfig, InsuranceCompany};

use crate::fixtures::TemporalFixtures;

/// Builder for ledger entries
pub struct LedgerEntryBuilder {
    premium: i64,
    frequency: PremiumFrequency,
    next_due: DateTime<Utc>,
    balance: i64,
}

impl Default for LedgerEntryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LedgerEntryBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            premium: 100,
            frequency: PremiumFrequency::Monthly,
            next_due: TemporalFixtures::year_start(),
            balance: 0,
        }
    }

    pub fn with_premium(mut self, premium: i64) -> Self {
        self.premium = premium;
        self
    }

    pub fn with_frequency(mut self, frequency: PremiumFrequency) -> Self {
        self.frequency = frequency;
        self
    }

    pub fn with_next_due(mut self, next_due: DateTime<Utc>) -> Self {
        self.next_due = next_due;
        self
    }

    /// Sets the outstanding balance; negative means credit
    pub fn with_balance(mut self, balance: i64) -> Self {
        self.balance = balance;
        self
    }

    /// Builds the entry
    ///
    /// # Panics
    ///
    /// Panics if the premium is not positive
    pub fn build(self) -> LedgerEntry {
        LedgerEntry::new(self.premium, self.frequency, self.next_due)
            .expect("premium must be positive")
            .with_balance(self.balance)
    }
}

/// Builder for a company with a set of registered persons
pub struct CompanyBuilder {
    now: DateTime<Utc>,
    config: CompanyConfig,
    persons: Vec<Person>,
}

impl Default for CompanyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CompanyBuilder {
    /// Creates a new builder starting at the standard company start time
    pub fn new() -> Self {
        Self {
            now: TemporalFixtures::company_start(),
            config: CompanyConfig::default(),
            persons: Vec::new(),
        }
    }

    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    pub fn with_config(mut self, config: CompanyConfig) -> Self {
        self.config = config;
        self
    }

    /// Registers `person` when the company is built
    pub fn with_person(mut self, person: Person) -> Self {
        self.persons.push(person);
        self
    }

    /// Builds the company and returns the ids of the registered persons in
    /// the order they were added
    pub fn build(self) -> (InsuranceCompany, Vec<PartyId>) {
        let mut company = InsuranceCompany::new(self.now, self.config);
        let ids = self
            .persons
            .into_iter()
            .map(|person| company.register_person(person))
            .collect();
        (company, ids)
    }
}

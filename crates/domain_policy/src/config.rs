//! Company configuration
//!
//! Eligibility and claim constants are read from the environment with the
//! `INSURANCE_` prefix, falling back to the defaults below.
//!
//! # Environment Variables
//!
//! * `INSURANCE_VEHICLE_MIN_PREMIUM_PERCENT` - Minimum annual premium as a percentage of vehicle value (default: 2)
//! * `INSURANCE_VEHICLE_COVERAGE_PERCENT` - Coverage as a percentage of vehicle value (default: 50)
//! * `INSURANCE_TRAVEL_MIN_ANNUAL_PREMIUM_PER_PERSON` - Minimum annual travel premium per insured person (default: 5)
//! * `INSURANCE_TRAVEL_COVERAGE_PER_PERSON` - Travel coverage per insured person (default: 10)
//! * `INSURANCE_TOTAL_LOSS_PERCENT` - Damage, as a percentage of vehicle value, that terminates a contract (default: 70)
//! * `INSURANCE_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)

use serde::Deserialize;
use validator::Validate;

use crate::error::PolicyError;

/// Company configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct CompanyConfig {
    #[validate(range(min = 1, max = 100))]
    pub vehicle_min_premium_percent: u32,
    #[validate(range(min = 1, max = 100))]
    pub vehicle_coverage_percent: u32,
    #[validate(range(min = 1))]
    pub travel_min_annual_premium_per_person: i64,
    #[validate(range(min = 1))]
    pub travel_coverage_per_person: i64,
    #[validate(range(min = 1, max = 100))]
    pub total_loss_percent: u32,
    /// Log level
    pub log_level: String,
}

impl Default for CompanyConfig {
    fn default() -> Self {
        Self {
            vehicle_min_premium_percent: 2,
            vehicle_coverage_percent: 50,
            travel_min_annual_premium_per_person: 5,
            travel_coverage_per_person: 10,
            total_loss_percent: 70,
            log_level: "info".to_string(),
        }
    }
}

impl CompanyConfig {
    /// Loads configuration from `.env` and the process environment
    pub fn from_env() -> Result<Self, PolicyError> {
        dotenvy::dotenv().ok();
        Self::from_source(config::Environment::with_prefix("INSURANCE").try_parsing(true))
    }

    /// Loads configuration from an arbitrary source layered over the defaults
    ///
    /// # Errors
    ///
    /// Returns `Configuration` if the source cannot be read or a value is
    /// out of range
    pub fn from_source<S>(source: S) -> Result<Self, PolicyError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let defaults = Self::default();
        let config: CompanyConfig = config::Config::builder()
            .set_default("vehicle_min_premium_percent", i64::from(defaults.vehicle_min_premium_percent))?
            .set_default("vehicle_coverage_percent", i64::from(defaults.vehicle_coverage_percent))?
            .set_default("travel_min_annual_premium_per_person", defaults.travel_min_annual_premium_per_person)?
            .set_default("travel_coverage_per_person", defaults.travel_coverage_per_person)?
            .set_default("total_loss_percent", i64::from(defaults.total_loss_percent))?
            .set_default("log_level", defaults.log_level)?
            .add_source(source)
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Percentage of `value`, rounded down
    pub(crate) fn percent_of(value: i64, percent: u32) -> i64 {
        value.saturating_mul(i64::from(percent)) / 100
    }

    /// Percentage of `value`, rounded up
    pub(crate) fn percent_of_ceil(value: i64, percent: u32) -> i64 {
        let scaled = value.saturating_mul(i64::from(percent));
        scaled / 100 + i64::from(scaled % 100 > 0)
    }
}

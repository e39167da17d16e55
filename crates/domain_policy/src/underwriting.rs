//! Contract eligibility rules
//!
//! Minimum premiums and coverage amounts for new contracts, parameterised by
//! the company configuration.

use domain_billing::PremiumFrequency;
use domain_party::Vehicle;

use crate::config::CompanyConfig;
use crate::error::PolicyError;

/// Smallest annual premium accepted for a vehicle
pub fn vehicle_minimum_annual_premium(vehicle: &Vehicle, config: &CompanyConfig) -> i64 {
    CompanyConfig::percent_of_ceil(vehicle.original_value(), config.vehicle_min_premium_percent)
}

/// Coverage granted for a vehicle
pub fn vehicle_coverage(vehicle: &Vehicle, config: &CompanyConfig) -> i64 {
    CompanyConfig::percent_of(vehicle.original_value(), config.vehicle_coverage_percent)
}

/// Damage at or above which a vehicle counts as a total loss
pub fn total_loss_threshold(vehicle: &Vehicle, config: &CompanyConfig) -> i64 {
    CompanyConfig::percent_of(vehicle.original_value(), config.total_loss_percent)
}

/// Smallest annual premium accepted for a travel contract
pub fn travel_minimum_annual_premium(insured_count: usize, config: &CompanyConfig) -> i64 {
    config
        .travel_min_annual_premium_per_person
        .saturating_mul(insured_count as i64)
}

/// Coverage granted for a travel contract
pub fn travel_coverage(insured_count: usize, config: &CompanyConfig) -> i64 {
    config.travel_coverage_per_person.saturating_mul(insured_count as i64)
}

/// Checks a proposed vehicle premium
///
/// # Errors
///
/// Returns `InvalidArgument` if the premium is not positive or its annual
/// total is below the vehicle minimum
pub fn check_vehicle_premium(
    premium: i64,
    frequency: PremiumFrequency,
    vehicle: &Vehicle,
    config: &CompanyConfig,
) -> Result<(), PolicyError> {
    check_annual_premium(premium, frequency, vehicle_minimum_annual_premium(vehicle, config))
}

/// Checks a proposed travel premium
///
/// # Errors
///
/// Returns `InvalidArgument` if the premium is not positive or its annual
/// total is below the per-person minimum
pub fn check_travel_premium(
    premium: i64,
    frequency: PremiumFrequency,
    insured_count: usize,
    config: &CompanyConfig,
) -> Result<(), PolicyError> {
    check_annual_premium(premium, frequency, travel_minimum_annual_premium(insured_count, config))
}

fn check_annual_premium(premium: i64, frequency: PremiumFrequency, minimum: i64) -> Result<(), PolicyError> {
    if premium <= 0 {
        return Err(PolicyError::invalid_argument(format!(
            "proposed premium must be positive, got {}",
            premium
        )));
    }

    let annual = frequency.annualize(premium);
    if annual < minimum {
        return Err(PolicyError::invalid_argument(format!(
            "annual premium {} is below the minimum of {}",
            annual, minimum
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vehicle_minimum_rounds_up() {
        let config = CompanyConfig::default();
        let vehicle = Vehicle::new("AA111AA", 15_001).unwrap();

        // 2% of 15001 = 300.02
        assert_eq!(vehicle_minimum_annual_premium(&vehicle, &config), 301);
        assert_eq!(vehicle_coverage(&vehicle, &config), 7_500);
    }

    #[test]
    fn test_annual_premium_threshold_is_inclusive() {
        let config = CompanyConfig::default();
        let vehicle = Vehicle::new("AA111AA", 15_000).unwrap();

        assert!(check_vehicle_premium(25, PremiumFrequency::Monthly, &vehicle, &config).is_ok());
        assert!(check_vehicle_premium(24, PremiumFrequency::Monthly, &vehicle, &config).is_err());
    }

    #[test]
    fn test_travel_minimum_scales_with_persons() {
        let config = CompanyConfig::default();

        assert!(check_travel_premium(3, PremiumFrequency::Quarterly, 2, &config).is_ok());
        assert!(check_travel_premium(2, PremiumFrequency::Quarterly, 3, &config).is_err());
        assert_eq!(travel_coverage(3, &config), 30);
    }

    #[test]
    fn test_total_loss_threshold_rounds_down() {
        let config = CompanyConfig::default();

        assert_eq!(total_loss_threshold(&Vehicle::new("AA111AA", 15_000).unwrap(), &config), 10_500);
        assert_eq!(total_loss_threshold(&Vehicle::new("AA111AA", 15_001).unwrap(), &config), 10_500);
    }
}

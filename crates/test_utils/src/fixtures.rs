//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for common entities across the insurance system.
//! These fixtures are designed to be consistent and predictable for unit tests.

use chrono::{DateTime, TimeZone, Utc};
use domain_party::{Person, Vehicle};

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// Company start time (Apr 15, 2025 noon)
    pub fn company_start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 4, 15, 12, 0, 0).unwrap()
    }

    /// Start of a billing year (Jan 1, 2024)
    pub fn year_start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    /// Last day of a 31-day month, for clamping tests
    pub fn month_end() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 31, 0, 0, 0).unwrap()
    }

    /// A timestamp `months` calendar months after `company_start`
    pub fn months_after_start(months: u32) -> DateTime<Utc> {
        core_kernel::add_months(Self::company_start(), months).unwrap()
    }
}

/// Fixture for national identifiers
pub struct IdentifierFixtures;

impl IdentifierFixtures {
    /// Ten-digit birth number, female month offset
    pub const NATURAL_A: &'static str = "8351068242";
    /// Ten-digit birth number from the 2000s
    pub const NATURAL_B: &'static str = "0402114911";
    /// Nine-digit birth number from before 1954
    pub const NATURAL_C: &'static str = "530512123";
    /// Eight-digit registration number
    pub const LEGAL_A: &'static str = "12345678";
    /// Six-digit registration number
    pub const LEGAL_B: &'static str = "123456";
}

/// Fixture for persons
pub struct PartyFixtures;

impl PartyFixtures {
    pub fn natural_a() -> Person {
        Person::new(IdentifierFixtures::NATURAL_A).unwrap()
    }

    pub fn natural_b() -> Person {
        Person::new(IdentifierFixtures::NATURAL_B).unwrap()
    }

    pub fn natural_c() -> Person {
        Person::new(IdentifierFixtures::NATURAL_C).unwrap()
    }

    pub fn legal_a() -> Person {
        Person::new(IdentifierFixtures::LEGAL_A).unwrap()
    }

    pub fn legal_b() -> Person {
        Person::new(IdentifierFixtures::LEGAL_B).unwrap()
    }
}

/// Fixture for vehicles
pub struct VehicleFixtures;

impl VehicleFixtures {
    /// Vehicle worth 15000; minimum annual premium 300, coverage 7500
    pub fn standard() -> Vehicle {
        Vehicle::new("AA111AA", 15_000).unwrap()
    }

    /// Vehicle worth 22000; minimum annual premium 440, coverage 11000
    pub fn expensive() -> Vehicle {
        Vehicle::new("BANAN22", 22_000).unwrap()
    }

    /// Vehicle worth 8000; minimum annual premium 160, coverage 4000
    pub fn cheap() -> Vehicle {
        Vehicle::new("SOMRYBA", 8_000).unwrap()
    }
}

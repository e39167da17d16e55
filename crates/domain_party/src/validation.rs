//! Identifier validation rules
//!
//! # Birth numbers (natural persons)
//!
//! - 9 or 10 digits, laid out as `YYMMDD` followed by a serial suffix
//! - Months 51-62 mark women and are reduced by 50 before checking
//! - 9 digits: only years up to 1953 were issued, so `YY <= 53` means 19YY
//! - 10 digits: the alternating-sign digit sum must be divisible by 11;
//!   `YY <= 53` means 20YY, otherwise 19YY
//! - The encoded date must exist
//!
//! # Registration numbers (legal entities)
//!
//! - 6 or 8 digits
//!
//! # License plates
//!
//! - Exactly 7 characters, uppercase ASCII letters or digits

use chrono::NaiveDate;

/// Last two-digit year that maps into the 1900s for 9-digit numbers and into
/// the 2000s for 10-digit numbers
const CENTURY_PIVOT: u32 = 53;

/// Month offset used for women
const FEMALE_MONTH_OFFSET: u32 = 50;

fn all_digits(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

/// Returns true if `value` is a valid birth number
pub fn is_valid_birth_number(value: &str) -> bool {
    if !(value.len() == 9 || value.len() == 10) || !all_digits(value) {
        return false;
    }

    let digits: Vec<u32> = value.bytes().map(|b| u32::from(b - b'0')).collect();
    let year = digits[0] * 10 + digits[1];
    let mut month = digits[2] * 10 + digits[3];
    let day = digits[4] * 10 + digits[5];

    if (FEMALE_MONTH_OFFSET + 1..=FEMALE_MONTH_OFFSET + 12).contains(&month) {
        month -= FEMALE_MONTH_OFFSET;
    }
    if !(1..=12).contains(&month) {
        return false;
    }

    let full_year = if digits.len() == 9 {
        if year > CENTURY_PIVOT {
            return false;
        }
        1900 + year
    } else {
        let checksum: i32 = digits
            .iter()
            .enumerate()
            .map(|(i, d)| if i % 2 == 0 { *d as i32 } else { -(*d as i32) })
            .sum();
        if checksum % 11 != 0 {
            return false;
        }
        if year <= CENTURY_PIVOT { 2000 + year } else { 1900 + year }
    };

    NaiveDate::from_ymd_opt(full_year as i32, month, day).is_some()
}

/// Returns true if `value` is a valid registration number
pub fn is_valid_registration_number(value: &str) -> bool {
    (value.len() == 6 || value.len() == 8) && all_digits(value)
}

/// Returns true if `value` is a valid license plate
pub fn is_valid_license_plate(value: &str) -> bool {
    value.len() == 7
        && value
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
}

//! Tests for persons, vehicles and identifier validation

use domain_party::validation::{is_valid_birth_number, is_valid_license_plate, is_valid_registration_number};
use domain_party::{LegalForm, PartyError, Person, Vehicle};

mod person_tests {
    use super::*;

    #[test]
    fn test_legal_form_follows_identifier() {
        assert_eq!(Person::new("8351068242").unwrap().legal_form(), LegalForm::Natural);
        assert_eq!(Person::new("0402114911").unwrap().legal_form(), LegalForm::Natural);
        assert_eq!(Person::new("530512123").unwrap().legal_form(), LegalForm::Natural);
        assert_eq!(Person::new("12345678").unwrap().legal_form(), LegalForm::Legal);
        assert_eq!(Person::new("123456").unwrap().legal_form(), LegalForm::Legal);
    }

    #[test]
    fn test_invalid_identifiers() {
        let invalid = [
            "",
            "12345",
            "123456789",
            "12A45678",
            "12345678901",
            "83A1068242",
            "8313068242",
            "8300068242",
            "8351328242",
            "8351008242",
        ];

        for id in invalid {
            let result = Person::new(id);
            assert!(matches!(result, Err(PartyError::InvalidData(_))), "{} should be rejected", id);
        }
    }

    #[test]
    fn test_each_person_gets_own_id() {
        let a = Person::new("123456").unwrap();
        let b = Person::new("123456").unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(a.national_id(), "123456");
    }

    #[test]
    fn test_payout_accumulates() {
        let mut person = Person::new("8351068242").unwrap();
        assert_eq!(person.paid_out_amount(), 0);

        person.payout(500).unwrap();
        person.payout(1000).unwrap();

        assert_eq!(person.paid_out_amount(), 1500);
    }

    #[test]
    fn test_payout_rejects_non_positive() {
        let mut person = Person::new("8351068242").unwrap();

        assert!(person.payout(0).is_err());
        assert!(person.payout(-100).is_err());
        assert_eq!(person.paid_out_amount(), 0);
    }

    #[test]
    fn test_payout_overflow_keeps_total() {
        let mut person = Person::new("8351068242").unwrap();
        person.payout(i64::MAX - 1).unwrap();

        assert!(matches!(person.payout(2), Err(PartyError::InvalidData(_))));
        assert_eq!(person.paid_out_amount(), i64::MAX - 1);

        person.payout(1).unwrap();
        assert_eq!(person.paid_out_amount(), i64::MAX);
    }

    #[test]
    fn test_person_serialization() {
        let person = Person::new("12345678").unwrap();
        let json = serde_json::to_string(&person).unwrap();
        let back: Person = serde_json::from_str(&json).unwrap();
        assert_eq!(person, back);
    }
}

mod vehicle_tests {
    use super::*;

    #[test]
    fn test_valid_vehicle() {
        let vehicle = Vehicle::new("ABC1234", 10_000).unwrap();
        assert_eq!(vehicle.license_plate(), "ABC1234");
        assert_eq!(vehicle.original_value(), 10_000);
    }

    #[test]
    fn test_invalid_plates() {
        for plate in ["", "AB2345", "AB123456", "AB12-34", "ab12345"] {
            assert!(Vehicle::new(plate, 10_000).is_err(), "{} should be rejected", plate);
        }
    }

    #[test]
    fn test_invalid_values() {
        assert!(Vehicle::new("ABC1234", 0).is_err());
        assert!(Vehicle::new("ABC1234", -100).is_err());
    }
}

mod validation_tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_female_month_offset() {
        // 1983-01-06 as a woman
        assert!(is_valid_birth_number("8351068242"));
        // month 63 is outside both ranges
        assert!(!is_valid_birth_number("8363068242"));
    }

    #[test]
    fn test_nonexistent_date_is_rejected() {
        // 1953-02-30
        assert!(!is_valid_birth_number("530230123"));
    }

    proptest! {
        #[test]
        fn registration_numbers_are_never_birth_numbers(n in 0u32..100_000_000u32) {
            let eight = format!("{:08}", n);
            prop_assert!(is_valid_registration_number(&eight));
            prop_assert!(!is_valid_birth_number(&eight));
        }

        #[test]
        fn plates_of_uppercase_and_digits_are_valid(plate in "[A-Z0-9]{7}") {
            prop_assert!(is_valid_license_plate(&plate));
        }
    }
}

//! Comprehensive tests for domain_claims

use core_kernel::{ContractId, PartyId};
use domain_billing::PremiumFrequency;
use domain_claims::{process_travel_claim, process_vehicle_claim, ClaimError, ClaimPayout};
use domain_policy::InsuranceCompany;
use test_utils::{init_test_tracing, CompanyBuilder, PartyFixtures, VehicleFixtures};

fn setup() -> (InsuranceCompany, Vec<PartyId>) {
    init_test_tracing();
    CompanyBuilder::new()
        .with_person(PartyFixtures::natural_a())
        .with_person(PartyFixtures::natural_b())
        .with_person(PartyFixtures::natural_c())
        .with_person(PartyFixtures::legal_a())
        .build()
}

fn paid_out(company: &InsuranceCompany, party: &PartyId) -> i64 {
    company.person(party).unwrap().paid_out_amount()
}

/// Vehicle worth 15000 held by `holder`; coverage 7500
fn insure_standard_vehicle(company: &mut InsuranceCompany, holder: PartyId, beneficiary: Option<PartyId>) -> ContractId {
    company
        .insure_vehicle("V-1", beneficiary, holder, 25, PremiumFrequency::Monthly, VehicleFixtures::standard())
        .unwrap()
}

// ============================================================================
// Vehicle Claim Tests
// ============================================================================

mod vehicle_claim_tests {
    use super::*;

    #[test]
    fn test_holder_receives_coverage_without_beneficiary() {
        let (mut company, ids) = setup();
        let contract = insure_standard_vehicle(&mut company, ids[0], None);

        let settlement = process_vehicle_claim(&mut company, contract, 1_000).unwrap();

        assert_eq!(settlement.payouts, vec![ClaimPayout { party: ids[0], amount: 7_500 }]);
        assert!(!settlement.contract_terminated);
        assert_eq!(paid_out(&company, &ids[0]), 7_500);
        assert!(company.is_contract_active(&contract).unwrap());
    }

    #[test]
    fn test_beneficiary_receives_coverage() {
        let (mut company, ids) = setup();
        let contract = insure_standard_vehicle(&mut company, ids[0], Some(ids[1]));

        process_vehicle_claim(&mut company, contract, 1_000).unwrap();

        assert_eq!(paid_out(&company, &ids[0]), 0);
        assert_eq!(paid_out(&company, &ids[1]), 7_500);
    }

    #[test]
    fn test_total_loss_threshold_is_inclusive() {
        let (mut company, ids) = setup();
        let contract = insure_standard_vehicle(&mut company, ids[0], None);

        let below = process_vehicle_claim(&mut company, contract, 10_499).unwrap();
        assert!(!below.contract_terminated);

        let at = process_vehicle_claim(&mut company, contract, 10_500).unwrap();
        assert!(at.contract_terminated);
        assert!(!company.is_contract_active(&contract).unwrap());
        assert_eq!(paid_out(&company, &ids[0]), 15_000);
    }

    #[test]
    fn test_claim_on_inactive_contract_is_rejected() {
        let (mut company, ids) = setup();
        let contract = insure_standard_vehicle(&mut company, ids[0], None);
        company.deactivate_contract(contract).unwrap();

        let err = process_vehicle_claim(&mut company, contract, 1_000).unwrap_err();

        assert!(matches!(err, ClaimError::InvalidState(_)));
        assert_eq!(paid_out(&company, &ids[0]), 0);
    }

    #[test]
    fn test_invalid_vehicle_claims_are_rejected() {
        let (mut company, ids) = setup();
        let contract = insure_standard_vehicle(&mut company, ids[0], None);
        let travel = company
            .insure_persons("T-1", ids[0], 100, PremiumFrequency::Annual, &[ids[1]])
            .unwrap();

        assert!(process_vehicle_claim(&mut company, contract, 0).unwrap_err().is_invalid_argument());
        assert!(process_vehicle_claim(&mut company, contract, -5).unwrap_err().is_invalid_argument());
        assert!(process_vehicle_claim(&mut company, travel, 100).unwrap_err().is_invalid_argument());
        assert!(process_vehicle_claim(&mut company, ContractId::new(), 100).unwrap_err().is_invalid_argument());
        assert_eq!(paid_out(&company, &ids[0]), 0);
    }

    #[test]
    fn test_zero_coverage_pays_nothing() {
        let (mut company, ids) = setup();
        let contract = insure_standard_vehicle(&mut company, ids[0], None);
        company.set_coverage_amount(contract, 0).unwrap();

        let settlement = process_vehicle_claim(&mut company, contract, 100).unwrap();

        assert!(settlement.payouts.is_empty());
        assert_eq!(settlement.total_paid(), 0);
    }

    #[test]
    fn test_total_loss_of_grouped_contract() {
        let (mut company, ids) = setup();
        let legal = ids[3];
        let master = company.create_master_vehicle_contract("M-1", None, legal).unwrap();
        let first = company
            .insure_vehicle("V-1", None, legal, 25, PremiumFrequency::Monthly, VehicleFixtures::standard())
            .unwrap();
        let second = company
            .insure_vehicle("V-2", None, legal, 20, PremiumFrequency::Monthly, VehicleFixtures::cheap())
            .unwrap();
        company.move_single_vehicle_contract_to_master(master, first).unwrap();
        company.move_single_vehicle_contract_to_master(master, second).unwrap();

        let settlement = process_vehicle_claim(&mut company, first, 15_000).unwrap();

        assert!(settlement.contract_terminated);
        assert!(!company.is_contract_active(&first).unwrap());
        assert!(company.is_master_active(&master).unwrap());
        assert_eq!(paid_out(&company, &legal), 7_500);
    }
}

// ============================================================================
// Travel Claim Tests
// ============================================================================

mod travel_claim_tests {
    use super::*;

    fn insure_trio(company: &mut InsuranceCompany, ids: &[PartyId]) -> ContractId {
        company
            .insure_persons("T-1", ids[3], 15, PremiumFrequency::Annual, &ids[..3])
            .unwrap()
    }

    #[test]
    fn test_coverage_is_split_across_affected() {
        let (mut company, ids) = setup();
        let contract = insure_trio(&mut company, &ids);

        let settlement = process_travel_claim(&mut company, contract, &[ids[0], ids[2]]).unwrap();

        assert_eq!(settlement.total_paid(), 30);
        assert_eq!(paid_out(&company, &ids[0]), 15);
        assert_eq!(paid_out(&company, &ids[1]), 0);
        assert_eq!(paid_out(&company, &ids[2]), 15);
        assert!(settlement.contract_terminated);
        assert!(!company.is_contract_active(&contract).unwrap());
    }

    #[test]
    fn test_split_rounds_down() {
        let (mut company, ids) = setup();
        let contract = insure_trio(&mut company, &ids);
        company.set_coverage_amount(contract, 31).unwrap();

        let settlement = process_travel_claim(&mut company, contract, &[ids[0], ids[1]]).unwrap();

        assert_eq!(settlement.total_paid(), 30);
        assert_eq!(paid_out(&company, &ids[1]), 15);
    }

    #[test]
    fn test_outsider_is_rejected_without_payouts() {
        let (mut company, ids) = setup();
        let contract = company
            .insure_persons("T-1", ids[3], 10, PremiumFrequency::Annual, &[ids[0], ids[1]])
            .unwrap();

        let err = process_travel_claim(&mut company, contract, &[ids[0], ids[2]]).unwrap_err();

        assert!(err.is_invalid_argument());
        assert_eq!(paid_out(&company, &ids[0]), 0);
        assert!(company.is_contract_active(&contract).unwrap());
    }

    #[test]
    fn test_empty_or_repeated_affected_is_rejected() {
        let (mut company, ids) = setup();
        let contract = insure_trio(&mut company, &ids);

        assert!(process_travel_claim(&mut company, contract, &[]).unwrap_err().is_invalid_argument());
        assert!(process_travel_claim(&mut company, contract, &[ids[0], ids[0]])
            .unwrap_err()
            .is_invalid_argument());
    }

    #[test]
    fn test_second_claim_hits_inactive_contract() {
        let (mut company, ids) = setup();
        let contract = insure_trio(&mut company, &ids);
        process_travel_claim(&mut company, contract, &[ids[0]]).unwrap();

        let err = process_travel_claim(&mut company, contract, &[ids[1]]).unwrap_err();

        assert!(err.is_invalid_state());
        assert_eq!(paid_out(&company, &ids[0]), 30);
    }

    #[test]
    fn test_vehicle_contract_is_not_a_travel_contract() {
        let (mut company, ids) = setup();
        let contract = insure_standard_vehicle(&mut company, ids[0], None);

        let err = process_travel_claim(&mut company, contract, &[ids[0]]).unwrap_err();
        assert!(err.is_invalid_argument());
    }
}

// ============================================================================
// Property Tests
// ============================================================================

mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn vehicle_contract_terminates_exactly_on_total_loss(damages in 1i64..20_000i64) {
            let (mut company, ids) = setup();
            let contract = insure_standard_vehicle(&mut company, ids[0], None);

            let settlement = process_vehicle_claim(&mut company, contract, damages).unwrap();

            prop_assert_eq!(settlement.contract_terminated, damages >= 10_500);
            prop_assert_eq!(company.is_contract_active(&contract).unwrap(), damages < 10_500);
            prop_assert_eq!(settlement.total_paid(), 7_500);
        }

        #[test]
        fn travel_payouts_never_exceed_coverage(coverage in 0i64..10_000i64, affected in 1usize..=3usize) {
            let (mut company, ids) = setup();
            let contract = company
                .insure_persons("T-1", ids[3], 15, PremiumFrequency::Annual, &ids[..3])
                .unwrap();
            company.set_coverage_amount(contract, coverage).unwrap();

            let settlement = process_travel_claim(&mut company, contract, &ids[..affected]).unwrap();

            prop_assert!(settlement.total_paid() <= coverage);
            prop_assert!(coverage - settlement.total_paid() < affected as i64);
        }
    }
}

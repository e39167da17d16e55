//! Unit tests for the Identifiers module
//!
//! Tests cover creation, parsing, conversion, ordering and display
//! formatting of the contract, group and party identifiers.

use core_kernel::{ContractId, GroupId, PartyId};
use uuid::Uuid;

mod contract_id_tests {
    use super::*;

    #[test]
    fn test_new_generates_unique_ids() {
        let id1 = ContractId::new();
        let id2 = ContractId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_new_v7_generates_time_ordered_ids() {
        let id1 = ContractId::new_v7();
        std::thread::sleep(std::time::Duration::from_millis(1));
        let id2 = ContractId::new_v7();
        assert!(id1 < id2);
    }

    #[test]
    fn test_from_uuid() {
        let uuid = Uuid::new_v4();
        let id = ContractId::from_uuid(uuid);
        assert_eq!(*id.as_uuid(), uuid);
    }

    #[test]
    fn test_display_format() {
        let id = ContractId::new();
        assert!(id.to_string().starts_with("CTR-"));
    }

    #[test]
    fn test_from_str_with_and_without_prefix() {
        let original = ContractId::new();
        let with_prefix: ContractId = original.to_string().parse().unwrap();
        let bare: ContractId = original.as_uuid().to_string().parse().unwrap();
        assert_eq!(original, with_prefix);
        assert_eq!(original, bare);
    }

    #[test]
    fn test_from_str_rejects_garbage() {
        assert!("CTR-not-a-uuid".parse::<ContractId>().is_err());
    }

    #[test]
    fn test_json_serialization_is_transparent() {
        let id = ContractId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id.as_uuid()));
        let back: ContractId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}

mod group_id_tests {
    use super::*;

    #[test]
    fn test_prefix() {
        assert_eq!(GroupId::prefix(), "GRP");
    }

    #[test]
    fn test_uuid_round_trip() {
        let uuid = Uuid::new_v4();
        let id: GroupId = uuid.into();
        let back: Uuid = id.into();
        assert_eq!(uuid, back);
    }
}

mod party_id_tests {
    use super::*;

    #[test]
    fn test_prefix() {
        assert_eq!(PartyId::prefix(), "PTY");
        assert!(PartyId::default().to_string().starts_with("PTY-"));
    }
}

//! Strongly-typed identifiers for contracts, groups and parties
//!
//! Newtype wrappers around UUIDs keep a group identifier from being passed
//! where a contract identifier is expected. Identifiers are ordered so that
//! listings built from hash maps can be sorted deterministically.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates a new time-ordered identifier (v7)
            pub fn new_v7() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates from an existing UUID
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the underlying UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Returns the identifier prefix for display
            pub fn prefix() -> &'static str {
                $prefix
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}-{}", $prefix, self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                // Strip prefix if present
                let uuid_str = s.strip_prefix(concat!($prefix, "-")).unwrap_or(s);
                Ok(Self(Uuid::parse_str(uuid_str)?))
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Uuid {
                id.0
            }
        }
    };
}

// Contract domain identifiers
define_id!(ContractId, "CTR");
define_id!(GroupId, "GRP");

// Party domain identifiers
define_id!(PartyId, "PTY");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contract_id_display() {
        let id = ContractId::new();
        assert!(id.to_string().starts_with("CTR-"));
    }

    #[test]
    fn test_group_id_parsing() {
        let original = GroupId::new_v7();
        let parsed: GroupId = original.to_string().parse().unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_ids_of_different_kinds_do_not_share_prefix() {
        assert_ne!(ContractId::prefix(), GroupId::prefix());
        assert_ne!(GroupId::prefix(), PartyId::prefix());
    }
}

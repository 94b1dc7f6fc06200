//! # Record Identifiers
//!
//! Newtype wrappers for the identifiers of backend records. They keep a
//! `ContractId` from being passed where a `ShipmentId` is expected.
//!
//! The backend owns identifier generation and its format is not fixed:
//! seeded records use short codes (`BFX-2024-001`), others use UUIDs or
//! plain integers. Identifiers are therefore opaque strings. Deserialization
//! accepts either a JSON string or a JSON integer.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::BfxError;

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an identifier, rejecting empty or whitespace-only input.
            pub fn new(raw: impl Into<String>) -> Result<Self, BfxError> {
                let raw = raw.into();
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    return Err(BfxError::Validation(format!(
                        "{} must not be empty",
                        stringify!($name)
                    )));
                }
                Ok(Self(trimmed.to_string()))
            }

            /// The identifier as sent on the wire.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}:{}", $prefix, self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = BfxError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                match RawId::deserialize(deserializer)? {
                    RawId::Text(s) => Self::new(s).map_err(serde::de::Error::custom),
                    RawId::Number(n) => Ok(Self(n.to_string())),
                }
            }
        }
    };
}

record_id!(
    /// Identifier of a trade contract.
    ContractId,
    "contract"
);

record_id!(
    /// Identifier of a trade document (bill of lading, invoice, certificate).
    DocumentId,
    "document"
);

record_id!(
    /// Identifier of a logistics shipment.
    ShipmentId,
    "shipment"
);

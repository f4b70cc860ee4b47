//! Typed record identifiers
//!
//! Expenses, funding records, and attachments each get their own UUID
//! newtype, so an expense id can never be handed to a funding lookup. The
//! short display form (prefix plus the first eight hex digits) is what users
//! see and type back in.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! entity_id {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Mint a fresh random id
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// The full underlying UUID, for prefix matching against short
            /// forms users type
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $prefix, &self.0.to_string()[..8])
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            /// Accepts a full UUID, with or without the display prefix.
            /// Short display forms are not full UUIDs and fail here; callers
            /// fall back to prefix matching for those.
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.strip_prefix($prefix).unwrap_or(s);
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

entity_id!(ExpenseId, "exp-");
entity_id!(FundingId, "fnd-");
entity_id!(AttachmentId, "att-");

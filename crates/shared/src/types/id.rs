//! Typed IDs for type-safe entity references.
//!
//! Using typed IDs prevents accidentally passing a `TransactionId` where a
//! `RecurringId` is expected. IDs are assigned by the storage backend; the
//! value `0` means "not yet persisted" (mirror occurrences keep it for
//! their whole lifetime).

use serde::{Deserialize, Serialize};

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(
            Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize,
            Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// The "not yet persisted" sentinel.
            pub const UNSET: Self = Self(0);

            /// Creates an ID from a raw storage value.
            #[must_use]
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Returns the inner raw value.
            #[must_use]
            pub const fn into_inner(self) -> i64 {
                self.0
            }

            /// Returns true if this ID has not been assigned by storage yet.
            #[must_use]
            pub const fn is_unset(self) -> bool {
                self.0 == 0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }
    };
}

typed_id!(TransactionId, "Unique identifier for a transaction occurrence.");
typed_id!(RecurringId, "Unique identifier for a recurring definition.");
typed_id!(CategoryId, "Unique identifier for a category.");
typed_id!(AbsenceId, "Unique identifier for an absence record.");
typed_id!(SettingsId, "Unique identifier for the user settings row.");

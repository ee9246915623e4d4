// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

/// The three staff subtypes share one shape and differ only by label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StaffKind {
    Keeper,
    Admin,
    Trainer,
}

impl StaffKind {
    /// Wire label, matching the original payloads.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Keeper => "penjaga",
            Self::Admin => "admin",
            Self::Trainer => "pelatih",
        }
    }
}

/// Resolved role of an account: exactly one of five disjoint subtypes, or
/// `Unknown` when no subtype row exists.
///
/// Resolution probes subtype tables in this declaration order and
/// short-circuits on the first hit. If corrupt data leaves an account with
/// rows in two subtype tables, the higher-priority one wins and the other
/// is never observed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Visitor {
        address: String,
        birth_date: String,
    },
    Veterinarian {
        certification_no: String,
        /// Deduplicated, sorted; empty when the vet has none.
        specialties: Vec<String>,
    },
    Staff {
        kind: StaffKind,
        staff_id: String,
    },
    Unknown,
}

impl Role {
    /// Wire label: `pengunjung`, `dokter`, `staff`, or `unknown`.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Visitor { .. } => "pengunjung",
            Self::Veterinarian { .. } => "dokter",
            Self::Staff { .. } => "staff",
            Self::Unknown => "unknown",
        }
    }
}

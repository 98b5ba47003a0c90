//! Claim status and its single-letter wire code

use std::fmt;

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// Claim status
///
/// On the wire and in the store every status is a one-letter code. Decoding
/// never fails: an unrecognised code becomes [`ClaimStatus::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ClaimStatus {
    /// Decoding fallback, never stored by the lifecycle
    #[default]
    Unknown,
    /// Filed, awaiting processing (or theft review)
    New,
    /// Refused, nothing is paid
    Rejected,
    /// Approved for physical repair
    Repair,
    /// Approved for payment
    Reimbursement,
    /// Theft confirmed by the authorities
    TheftConfirmed,
}

/// Code table, the single source for both directions
const CODES: [(ClaimStatus, &str); 5] = [
    (ClaimStatus::New, "N"),
    (ClaimStatus::Rejected, "J"),
    (ClaimStatus::Repair, "R"),
    (ClaimStatus::Reimbursement, "F"),
    (ClaimStatus::TheftConfirmed, "P"),
];

impl ClaimStatus {
    /// All statuses the lifecycle can store
    pub const KNOWN: [ClaimStatus; 5] = [
        ClaimStatus::New,
        ClaimStatus::Rejected,
        ClaimStatus::Repair,
        ClaimStatus::Reimbursement,
        ClaimStatus::TheftConfirmed,
    ];

    /// Returns the wire code; `Unknown` encodes as the empty string
    pub fn code(&self) -> &'static str {
        CODES
            .iter()
            .find(|(status, _)| status == self)
            .map_or("", |(_, code)| *code)
    }

    /// Decodes a wire code, ignoring case
    pub fn from_code(code: &str) -> Self {
        CODES
            .iter()
            .find(|(_, c)| c.eq_ignore_ascii_case(code))
            .map_or(ClaimStatus::Unknown, |(status, _)| *status)
    }

    /// Returns true for every status other than `Unknown`
    pub fn is_known(&self) -> bool {
        *self != ClaimStatus::Unknown
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ClaimStatus::Unknown => "Unknown",
            ClaimStatus::New => "New",
            ClaimStatus::Rejected => "Rejected",
            ClaimStatus::Repair => "Repair",
            ClaimStatus::Reimbursement => "Reimbursement",
            ClaimStatus::TheftConfirmed => "TheftConfirmed",
        };
        f.write_str(name)
    }
}

impl Serialize for ClaimStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for ClaimStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        Ok(ClaimStatus::from_code(&code))
    }
}

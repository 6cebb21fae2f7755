use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// The lifecycle stage of an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Status {
    Applied,
    Interview,
    Offer,
    Rejected,
    Withdrawn,
}

impl Status {
    /// Every status, in the order the flow diagram stacks them.
    pub const ALL: [Status; 5] = [
        Status::Applied,
        Status::Interview,
        Status::Offer,
        Status::Rejected,
        Status::Withdrawn,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Applied => "Applied",
            Status::Interview => "Interview",
            Status::Offer => "Offer",
            Status::Rejected => "Rejected",
            Status::Withdrawn => "Withdrawn",
        }
    }

    /// Exact, case-sensitive match against the canonical names.
    pub fn parse(raw: &str) -> Option<Status> {
        Status::ALL.into_iter().find(|status| status.as_str() == raw)
    }

    /// Position in `Status::ALL`.
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A status value as it arrives from storage or user input.
///
/// Anything outside the five known statuses is kept verbatim instead of being
/// rejected, so a record with a stray value still loads and still counts
/// toward totals.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordStatus {
    Known(Status),
    Unrecognized(String),
}

impl RecordStatus {
    pub fn known(&self) -> Option<Status> {
        match self {
            RecordStatus::Known(status) => Some(*status),
            RecordStatus::Unrecognized(_) => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            RecordStatus::Known(status) => status.as_str(),
            RecordStatus::Unrecognized(raw) => raw,
        }
    }
}

impl Default for RecordStatus {
    fn default() -> Self {
        RecordStatus::Known(Status::Applied)
    }
}

impl From<Status> for RecordStatus {
    fn from(status: Status) -> Self {
        RecordStatus::Known(status)
    }
}

impl From<&str> for RecordStatus {
    fn from(raw: &str) -> Self {
        match Status::parse(raw) {
            Some(status) => RecordStatus::Known(status),
            None => RecordStatus::Unrecognized(raw.to_string()),
        }
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Plain string on the wire, both for JSON and for bincode snapshots.
impl Serialize for RecordStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RecordStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(RecordStatus::from(raw.as_str()))
    }
}

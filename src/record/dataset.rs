use super::model::ApplicationRecord;
use crate::error::RecordError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A list of records as exchanged with files: either a bare JSON array or an
/// object with a `records` (or `applications`) key.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct RecordSet {
    #[serde(alias = "applications")]
    pub records: Vec<ApplicationRecord>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawRecordSet {
    Bare(Vec<ApplicationRecord>),
    Wrapped(RecordSet),
}

impl RecordSet {
    pub fn new(records: Vec<ApplicationRecord>) -> Self {
        Self { records }
    }

    /// Parse a record set from JSON text.
    pub fn from_json(json: &str) -> Result<Self, RecordError> {
        let raw: RawRecordSet =
            serde_json::from_str(json).map_err(|e| RecordError::Load(e.to_string()))?;
        Ok(match raw {
            RawRecordSet::Bare(records) => Self { records },
            RawRecordSet::Wrapped(set) => set,
        })
    }

    /// Load a record set from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RecordError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| RecordError::Load(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&content)
    }

    pub fn to_json_pretty(&self) -> Result<String, RecordError> {
        serde_json::to_string_pretty(self).map_err(|e| RecordError::Load(e.to_string()))
    }

    pub fn records(&self) -> &[ApplicationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

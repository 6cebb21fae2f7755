use super::RecordStore;
use super::snapshot::Snapshot;
use crate::error::StoreError;
use crate::record::{ApplicationRecord, FieldValue, NewRecord, RecordId};
use async_trait::async_trait;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

/// A record store living in process memory, optionally backed by a snapshot file.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<Snapshot>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store with existing records. Ids are kept; new ids continue
    /// after the highest one.
    pub fn with_records(records: Vec<ApplicationRecord>) -> Self {
        Self {
            state: Mutex::new(Snapshot::from_records(records)),
        }
    }

    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self {
            state: Mutex::new(snapshot),
        }
    }

    /// Loads a store previously written with [`MemoryStore::save`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Ok(Self::from_snapshot(Snapshot::from_file(path)?))
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), StoreError> {
        self.lock()?.save(path)
    }

    /// Copy of every stored record, in insertion order.
    pub fn records(&self) -> Result<Vec<ApplicationRecord>, StoreError> {
        Ok(self.lock()?.records.clone())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Snapshot>, StoreError> {
        self.state
            .lock()
            .map_err(|_| StoreError::Backend("store state is poisoned".to_string()))
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn list_records(&self, owner_id: &str) -> Result<Vec<ApplicationRecord>, StoreError> {
        let state = self.lock()?;
        let mut records: Vec<ApplicationRecord> = state
            .records
            .iter()
            .filter(|record| record.owner_id == owner_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.date_applied.cmp(&a.date_applied));
        Ok(records)
    }

    async fn insert_record(&self, record: NewRecord) -> Result<ApplicationRecord, StoreError> {
        let mut state = self.lock()?;
        state.next_id += 1;
        let record = record.into_record(state.next_id);
        state.records.push(record.clone());
        debug!(id = record.id, "inserted record");
        Ok(record)
    }

    async fn update_field(&self, id: RecordId, value: FieldValue) -> Result<(), StoreError> {
        let mut state = self.lock()?;
        let record = state
            .records
            .iter_mut()
            .find(|record| record.id == id)
            .ok_or(StoreError::NotFound(id))?;
        record.apply(&value);
        debug!(id, field = %value.field(), "updated record");
        Ok(())
    }

    async fn delete_record(&self, id: RecordId) -> Result<(), StoreError> {
        let mut state = self.lock()?;
        let before = state.records.len();
        state.records.retain(|record| record.id != id);
        if state.records.len() == before {
            return Err(StoreError::NotFound(id));
        }
        debug!(id, "deleted record");
        Ok(())
    }
}

//! Storage collaborator seam for application records.
use crate::error::StoreError;
use crate::record::{ApplicationRecord, FieldValue, NewRecord, RecordId};
use async_trait::async_trait;

mod memory;
mod snapshot;

pub use memory::MemoryStore;
pub use snapshot::Snapshot;

/// The external tabular data service holding application records.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// All records of `owner_id`, newest `date_applied` first.
    async fn list_records(&self, owner_id: &str) -> Result<Vec<ApplicationRecord>, StoreError>;

    /// Persists `record` and returns it with its assigned id.
    async fn insert_record(&self, record: NewRecord) -> Result<ApplicationRecord, StoreError>;

    /// Writes one field of an existing record.
    async fn update_field(&self, id: RecordId, value: FieldValue) -> Result<(), StoreError>;

    async fn delete_record(&self, id: RecordId) -> Result<(), StoreError>;
}

//! Common test utilities for building record collections and collaborators.
use async_trait::async_trait;
use chrono::NaiveDate;
use jobflow::error::StoreError;
use jobflow::record::{ApplicationRecord, FieldValue, NewRecord, RecordId, RecordStatus};
use jobflow::store::{MemoryStore, RecordStore};
use std::sync::Mutex;

/// A record with the given id and raw status, dated in March 2024.
#[allow(dead_code)]
pub fn record(id: RecordId, status: &str) -> ApplicationRecord {
    record_on(id, status, 2024, 3, 1)
}

#[allow(dead_code)]
pub fn record_on(id: RecordId, status: &str, year: i32, month: u32, day: u32) -> ApplicationRecord {
    ApplicationRecord {
        id,
        owner_id: "user-1".to_string(),
        company: format!("Company {}", id),
        position: "Engineer".to_string(),
        status: RecordStatus::from(status),
        date_applied: NaiveDate::from_ymd_opt(year, month, day).expect("valid test date"),
        salary: None,
    }
}

/// Records with the given statuses, ids counting up from 1.
#[allow(dead_code)]
pub fn records_with(statuses: &[&str]) -> Vec<ApplicationRecord> {
    statuses
        .iter()
        .enumerate()
        .map(|(i, status)| record(i as RecordId + 1, status))
        .collect()
}

/// Records JSON in the shape the storage service returns.
#[allow(dead_code)]
pub const RECORDS_JSON: &str = r#"[
    {"id": 1, "user_id": "user-1", "company": "Acme", "position": "Engineer", "status": "Applied", "date_applied": "2024-03-02", "salary": 120000},
    {"id": 2, "user_id": "user-1", "company": "Globex", "position": "SRE", "status": "Interview", "date_applied": "2024-03-15", "salary": null},
    {"id": 3, "user_id": "user-1", "company": "Initech", "position": "", "status": "Applied", "dateApplied": "2024-04-01"},
    {"id": 4, "user_id": "user-1", "company": "Hooli", "position": "Backend", "status": "Ghosted", "date_applied": "2024-04-20"}
]"#;

/// A store that refuses writes to selected records, delegating everything else.
#[allow(dead_code)]
pub struct FlakyStore {
    pub inner: MemoryStore,
    pub failing_ids: Mutex<Vec<RecordId>>,
    pub update_calls: Mutex<usize>,
}

#[allow(dead_code)]
impl FlakyStore {
    pub fn new(inner: MemoryStore) -> Self {
        Self {
            inner,
            failing_ids: Mutex::new(Vec::new()),
            update_calls: Mutex::new(0),
        }
    }

    pub fn fail_updates_for(&self, id: RecordId) {
        self.failing_ids.lock().unwrap().push(id);
    }

    pub fn update_calls(&self) -> usize {
        *self.update_calls.lock().unwrap()
    }
}

#[async_trait]
impl RecordStore for FlakyStore {
    async fn list_records(&self, owner_id: &str) -> Result<Vec<ApplicationRecord>, StoreError> {
        self.inner.list_records(owner_id).await
    }

    async fn insert_record(&self, record: NewRecord) -> Result<ApplicationRecord, StoreError> {
        self.inner.insert_record(record).await
    }

    async fn update_field(&self, id: RecordId, value: FieldValue) -> Result<(), StoreError> {
        *self.update_calls.lock().unwrap() += 1;
        if self.failing_ids.lock().unwrap().contains(&id) {
            return Err(StoreError::Backend("write rejected".to_string()));
        }
        self.inner.update_field(id, value).await
    }

    async fn delete_record(&self, id: RecordId) -> Result<(), StoreError> {
        self.inner.delete_record(id).await
    }
}

//! Client-side state for one signed-in user's application list.
//!
//! Edits are applied locally at once and written to the store after a quiet
//! period per (record, field). The flow diagram, its layout and the summary are
//! recomputed explicitly whenever the record collection changes.
use crate::debounce::{DEFAULT_QUIET_PERIOD, KeyedDebouncer};
use crate::error::{RecordError, TrackerError};
use crate::flow::{FlowData, derive_flow};
use crate::layout::{FlowLayout, FlowLayoutEngine};
use crate::record::{ApplicationRecord, Field, FieldValue, NewRecord, RecordId};
use crate::store::RecordStore;
use crate::summary::Summary;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

pub type EditKey = (RecordId, Field);

/// Projections of the current record collection.
#[derive(Debug, Clone)]
pub struct Derived {
    pub flow: FlowData,
    pub layout: FlowLayout,
    pub summary: Summary,
}

impl Derived {
    pub fn compute(engine: &FlowLayoutEngine, records: &[ApplicationRecord]) -> Self {
        let flow = derive_flow(records);
        let layout = engine.layout(&flow);
        let summary = Summary::from_records(records);
        Self {
            flow,
            layout,
            summary,
        }
    }
}

/// Outcome of pushing due edits to the store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlushReport {
    pub written: usize,
    pub failed: Vec<(EditKey, String)>,
    /// The record list was reloaded to settle a failed write.
    pub reloaded: bool,
}

pub struct Tracker<S> {
    store: S,
    owner_id: String,
    records: Vec<ApplicationRecord>,
    pending: KeyedDebouncer<EditKey, FieldValue>,
    engine: FlowLayoutEngine,
    derived: Derived,
}

impl<S: RecordStore> Tracker<S> {
    pub fn new(store: S, owner_id: impl Into<String>) -> Self {
        Self::with_engine(store, owner_id, FlowLayoutEngine::default())
    }

    pub fn with_engine(store: S, owner_id: impl Into<String>, engine: FlowLayoutEngine) -> Self {
        let derived = Derived::compute(&engine, &[]);
        Self {
            store,
            owner_id: owner_id.into(),
            records: Vec::new(),
            pending: KeyedDebouncer::new(DEFAULT_QUIET_PERIOD),
            engine,
            derived,
        }
    }

    /// Overrides the quiet period. Edits already pending are rescheduled, so
    /// their quiet period restarts from now.
    pub fn with_quiet_period(mut self, quiet: Duration) -> Self {
        let mut pending = KeyedDebouncer::new(quiet);
        let now = Instant::now();
        for (key, value) in self.pending.drain() {
            pending.schedule(key, value, now);
        }
        self.pending = pending;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }

    pub fn records(&self) -> &[ApplicationRecord] {
        &self.records
    }

    pub fn record(&self, id: RecordId) -> Option<&ApplicationRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn derived(&self) -> &Derived {
        &self.derived
    }

    pub fn flow(&self) -> &FlowData {
        &self.derived.flow
    }

    pub fn layout(&self) -> &FlowLayout {
        &self.derived.layout
    }

    pub fn summary(&self) -> &Summary {
        &self.derived.summary
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.next_deadline()
    }

    /// Replaces local records with the store's list. On failure the previous
    /// records stay in place.
    pub async fn load(&mut self) -> Result<(), TrackerError> {
        let records = self.store.list_records(&self.owner_id).await?;
        self.replace_records(records);
        Ok(())
    }

    /// Inserts a blank Applied record dated today and appends it locally.
    pub async fn add(&mut self) -> Result<RecordId, TrackerError> {
        let record = self
            .store
            .insert_record(NewRecord::blank(self.owner_id.clone()))
            .await?;
        let id = record.id;
        self.records.push(record);
        self.refresh();
        Ok(id)
    }

    /// Applies an edit locally and schedules its write.
    pub fn edit(&mut self, id: RecordId, value: FieldValue, now: Instant) -> Result<(), TrackerError> {
        let record = self
            .records
            .iter_mut()
            .find(|record| record.id == id)
            .ok_or(RecordError::UnknownRecord(id))?;
        record.apply(&value);
        let key = (id, value.field());
        if self.pending.schedule(key, value, now) {
            debug!(id, field = %key.1, "superseded a pending edit");
        }
        self.refresh();
        Ok(())
    }

    /// Parses raw form input for `field` and applies it like [`edit`](Self::edit).
    pub fn edit_raw(
        &mut self,
        id: RecordId,
        field: Field,
        raw: &str,
        now: Instant,
    ) -> Result<(), TrackerError> {
        let value = field.parse_value(raw)?;
        self.edit(id, value, now)
    }

    /// Writes every edit whose quiet period has elapsed at `now`.
    pub async fn flush_due(&mut self, now: Instant) -> FlushReport {
        let due = self.pending.take_due(now);
        self.write(due).await
    }

    /// Writes every pending edit immediately, e.g. before signing out.
    pub async fn flush_all(&mut self) -> FlushReport {
        let due = self.pending.drain();
        self.write(due).await
    }

    /// Deletes a record from the store, then locally. Pending edits for the
    /// record are dropped.
    pub async fn delete(&mut self, id: RecordId) -> Result<(), TrackerError> {
        self.store.delete_record(id).await?;
        let dropped = self.pending.cancel_where(|(record_id, _)| *record_id == id);
        if dropped > 0 {
            debug!(id, dropped, "cancelled pending edits of a deleted record");
        }
        self.records.retain(|record| record.id != id);
        self.refresh();
        Ok(())
    }

    async fn write(&mut self, due: Vec<(EditKey, FieldValue)>) -> FlushReport {
        let mut report = FlushReport::default();
        for ((id, field), value) in due {
            match self.store.update_field(id, value).await {
                Ok(()) => report.written += 1,
                Err(e) => {
                    warn!(id, %field, error = %e, "failed to write edit");
                    report.failed.push(((id, field), e.to_string()));
                }
            }
        }

        if !report.failed.is_empty() {
            // Local and stored state may have drifted; the store wins.
            match self.store.list_records(&self.owner_id).await {
                Ok(records) => {
                    self.replace_records(records);
                    report.reloaded = true;
                }
                Err(e) => warn!(error = %e, "reload after failed write also failed"),
            }
        }
        report
    }

    /// Installs a fresh list from the store, re-applying edits that are still
    /// waiting for their write so the local view does not jump back.
    fn replace_records(&mut self, mut records: Vec<ApplicationRecord>) {
        for ((id, _), value) in self.pending.iter() {
            if let Some(record) = records.iter_mut().find(|record| record.id == *id) {
                record.apply(value);
            }
        }
        self.records = records;
        self.refresh();
    }

    fn refresh(&mut self) {
        self.derived = Derived::compute(&self.engine, &self.records);
    }
}

//! Tests for the client-side tracker: local edits, debounced writes and reloads.
mod common;
use common::*;
use jobflow::prelude::*;
use jobflow::tracker::FlushReport;
use std::time::{Duration, Instant};
use tokio_test::block_on;

const QUIET: Duration = Duration::from_millis(500);

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

fn loaded_tracker(statuses: &[&str]) -> Tracker<FlakyStore> {
    let store = FlakyStore::new(MemoryStore::with_records(records_with(statuses)));
    let mut tracker = Tracker::new(store, "user-1");
    block_on(tracker.load()).expect("records load");
    tracker
}

#[test]
fn test_load_lists_newest_first_and_derives_views() {
    let store = MemoryStore::with_records(vec![
        record_on(1, "Applied", 2024, 1, 10),
        record_on(2, "Interview", 2024, 5, 2),
        record_on(3, "Offer", 2024, 3, 7),
    ]);
    let mut tracker = Tracker::new(store, "user-1");
    assert!(tracker.layout().is_empty());

    block_on(tracker.load()).expect("records load");

    let ids: Vec<RecordId> = tracker.records().iter().map(|record| record.id).collect();
    assert_eq!(ids, vec![2, 3, 1]);
    assert_eq!(tracker.flow().total, 3);
    assert_eq!(tracker.summary().offers, 1);
    assert!(!tracker.layout().is_empty());
}

#[test]
fn test_load_only_sees_own_records() {
    let mut foreign = record(2, "Offer");
    foreign.owner_id = "user-2".to_string();
    let store = MemoryStore::with_records(vec![record(1, "Applied"), foreign]);
    let mut tracker = Tracker::new(store, "user-1");
    block_on(tracker.load()).expect("records load");
    assert_eq!(tracker.records().len(), 1);
    assert!(tracker.record(2).is_none());
}

#[test]
fn test_edits_apply_locally_before_any_write() {
    let mut tracker = loaded_tracker(&["Applied", "Applied"]);
    let t0 = Instant::now();

    tracker
        .edit_raw(2, Field::Status, "Offer", t0)
        .expect("edit applies");

    assert_eq!(
        tracker.record(2).map(|record| record.status.clone()),
        Some(RecordStatus::Known(Status::Offer))
    );
    assert_eq!(
        tracker
            .flow()
            .node(NodeId::Status(Status::Offer))
            .map(|node| node.count),
        Some(1)
    );
    assert!(tracker.has_pending());
    assert_eq!(tracker.store().update_calls(), 0);
}

#[test]
fn test_rapid_edits_to_one_field_are_written_once() {
    let mut tracker = loaded_tracker(&["Applied", "Applied"]);
    let t0 = Instant::now();

    tracker.edit_raw(1, Field::Company, "A", t0).unwrap();
    tracker.edit_raw(1, Field::Company, "Ac", t0 + ms(100)).unwrap();
    tracker.edit_raw(1, Field::Company, "Acme", t0 + ms(200)).unwrap();
    tracker.edit_raw(2, Field::Salary, "90000", t0 + ms(200)).unwrap();

    // the last keystroke restarted the quiet period
    let early = block_on(tracker.flush_due(t0 + ms(600)));
    assert_eq!(early, FlushReport::default());
    assert_eq!(tracker.next_deadline(), Some(t0 + ms(200) + QUIET));

    let report = block_on(tracker.flush_due(t0 + ms(700)));
    assert_eq!(report.written, 2);
    assert!(report.failed.is_empty());
    assert!(!report.reloaded);
    assert!(!tracker.has_pending());
    assert_eq!(tracker.store().update_calls(), 2);

    let stored = tracker.store().inner.records().unwrap();
    assert_eq!(stored[0].company, "Acme");
    assert_eq!(stored[1].salary, Some(90000.0));
}

#[test]
fn test_new_quiet_period_restarts_pending_edits() {
    let mut tracker = loaded_tracker(&["Applied"]);
    let t0 = Instant::now();
    tracker.edit_raw(1, Field::Company, "Acme", t0).unwrap();

    let mut tracker = tracker.with_quiet_period(ms(50));
    let deadline = tracker.next_deadline().expect("edit is still pending");
    assert!(deadline >= t0 + ms(50));

    let report = block_on(tracker.flush_due(deadline));
    assert_eq!(report.written, 1);
}

#[test]
fn test_edits_to_different_fields_do_not_supersede_each_other() {
    let mut tracker = loaded_tracker(&["Applied"]);
    let t0 = Instant::now();

    tracker.edit_raw(1, Field::Company, "Acme", t0).unwrap();
    tracker.edit_raw(1, Field::Position, "SRE", t0).unwrap();

    let report = block_on(tracker.flush_all());
    assert_eq!(report.written, 2);
    let stored = tracker.store().inner.records().unwrap();
    assert_eq!(stored[0].company, "Acme");
    assert_eq!(stored[0].position, "SRE");
}

#[test]
fn test_failed_write_reloads_and_keeps_other_pending_edits() {
    let mut tracker = loaded_tracker(&["Applied", "Applied"]);
    tracker.store().fail_updates_for(1);
    let t0 = Instant::now();

    tracker.edit_raw(1, Field::Company, "Lost", t0).unwrap();
    tracker.edit_raw(2, Field::Company, "Kept", t0 + ms(1000)).unwrap();

    let report = block_on(tracker.flush_due(t0 + QUIET));
    assert_eq!(report.written, 0);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, (1, Field::Company));
    assert!(report.reloaded);

    // the store wins for the failed edit, the pending one is still shown
    assert_eq!(
        tracker.record(1).map(|record| record.company.as_str()),
        Some("Company 1")
    );
    assert_eq!(
        tracker.record(2).map(|record| record.company.as_str()),
        Some("Kept")
    );
    assert!(tracker.has_pending());

    let report = block_on(tracker.flush_all());
    assert_eq!(report.written, 1);
    let stored = tracker.store().inner.records().unwrap();
    assert_eq!(stored[1].company, "Kept");
}

#[test]
fn test_delete_cancels_pending_edits() {
    let mut tracker = loaded_tracker(&["Applied", "Rejected"]);
    let t0 = Instant::now();

    tracker.edit_raw(1, Field::Position, "Manager", t0).unwrap();
    block_on(tracker.delete(1)).expect("record deletes");

    assert!(!tracker.has_pending());
    assert!(tracker.record(1).is_none());
    assert_eq!(tracker.flow().total, 1);

    let report = block_on(tracker.flush_all());
    assert_eq!(report.written, 0);
    assert_eq!(tracker.store().update_calls(), 0);
    assert_eq!(tracker.store().inner.records().unwrap().len(), 1);
}

#[test]
fn test_delete_of_missing_record_fails() {
    let mut tracker = loaded_tracker(&["Applied"]);
    let err = block_on(tracker.delete(42)).unwrap_err();
    assert!(matches!(
        err,
        TrackerError::Store(StoreError::NotFound(42))
    ));
    assert_eq!(tracker.records().len(), 1);
}

#[test]
fn test_add_appends_blank_applied_record() {
    let mut tracker = loaded_tracker(&["Offer", "Rejected"]);
    let id = block_on(tracker.add()).expect("record is added");

    assert_eq!(id, 3);
    let added = tracker.record(id).expect("added record is local");
    assert_eq!(added.status, RecordStatus::Known(Status::Applied));
    assert_eq!(added.company, "");
    assert_eq!(added.owner_id, "user-1");
    assert_eq!(tracker.flow().total, 3);
    assert_eq!(
        tracker
            .flow()
            .node(NodeId::Status(Status::Applied))
            .map(|node| node.count),
        Some(1)
    );
}

#[test]
fn test_edit_of_unknown_record_is_rejected() {
    let mut tracker = loaded_tracker(&["Applied"]);
    let err = tracker
        .edit(99, FieldValue::Company(Some("Acme".to_string())), Instant::now())
        .unwrap_err();
    assert!(matches!(
        err,
        TrackerError::Record(RecordError::UnknownRecord(99))
    ));
    assert!(!tracker.has_pending());
}

#[test]
fn test_invalid_raw_input_leaves_record_untouched() {
    let mut tracker = loaded_tracker(&["Applied"]);
    let result = tracker.edit_raw(1, Field::Salary, "-5", Instant::now());
    assert!(matches!(
        result,
        Err(TrackerError::Record(RecordError::InvalidValue { .. }))
    ));
    assert_eq!(tracker.record(1).and_then(|record| record.salary), None);
    assert!(!tracker.has_pending());
}

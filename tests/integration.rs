//! End-to-end tests: records file to SVG, sessions, and persisted stores.
mod common;
use common::*;
use jobflow::prelude::*;
use std::time::Instant;
use tokio_test::block_on;

#[test]
fn test_records_json_to_svg() {
    let set = RecordSet::from_json(RECORDS_JSON).expect("records parse");
    let flow = derive_flow(set.records());

    assert_eq!(flow.total, 4);
    assert_eq!(flow.unrecognized, 1);
    assert_eq!(flow.links.len(), 2);

    let engine = FlowLayoutEngine::new(LayoutConfig::default()).expect("default config is valid");
    let layout = engine.layout(&flow);
    let svg = SvgRenderer::default().render(&layout);

    assert!(svg.contains("Total Applications: 4"));
    assert!(svg.contains("Still Applied: 2"));
    assert!(svg.contains("Interview: 1"));
    assert!(!svg.contains("Ghosted"));
    assert_eq!(svg.matches("<path").count(), 2);

    let summary = Summary::from_records(set.records());
    assert_eq!(summary.total, 4);
    assert!(summary
        .distribution
        .iter()
        .any(|share| share.status == RecordStatus::from("Ghosted")));
}

#[test]
fn test_layout_json_is_readable() {
    let flow = derive_flow(&records_with(&["Applied", "Offer"]));
    let layout = FlowLayoutEngine::default().layout(&flow);
    let json = layout.to_json_pretty().expect("layout serializes");
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");

    assert_eq!(value["width"], 800.0);
    assert_eq!(value["nodes"].as_array().map(Vec::len), Some(3));
    assert_eq!(value["links"].as_array().map(Vec::len), Some(2));
    assert_eq!(value["nodes"][0]["node"]["id"], "Total");
}

#[test]
fn test_sign_up_then_sign_in_and_out() {
    block_on(async {
        let auth = AuthService::new(MemoryIdentity::new());
        assert_eq!(auth.check_session().await, None);

        let user = auth
            .sign_up("ada@example.com", "hunter22", "hunter22")
            .await
            .expect("sign up succeeds");
        assert_eq!(user.email, "ada@example.com");
        assert_eq!(auth.check_session().await, Some(user.clone()));

        auth.sign_out().await.expect("sign out succeeds");
        assert_eq!(auth.check_session().await, None);

        let again = auth
            .sign_in("ada@example.com", "hunter22")
            .await
            .expect("sign in succeeds");
        assert_eq!(again, user);
    });
}

#[test]
fn test_auth_errors_surface_as_messages() {
    block_on(async {
        let auth = AuthService::new(MemoryIdentity::new());

        let short = auth.sign_up("ada@example.com", "abc", "abc").await;
        assert_eq!(short, Err(AuthError::PasswordTooShort(6)));
        assert_eq!(auth.check_session().await, None);

        auth.sign_up("ada@example.com", "hunter22", "hunter22")
            .await
            .expect("sign up succeeds");

        let duplicate = auth
            .sign_up("ada@example.com", "hunter22", "hunter22")
            .await
            .unwrap_err();
        assert_eq!(duplicate.to_string(), "User already registered");

        let wrong = auth
            .sign_in("ada@example.com", "wrong-password")
            .await
            .unwrap_err();
        assert_eq!(wrong, AuthError::Provider("Invalid login credentials".to_string()));

        let empty = auth.sign_in("", "").await.unwrap_err();
        assert_eq!(empty.to_string(), "Please fill in all fields");
    });
}

#[test]
fn test_store_survives_save_and_reload() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("store.bin");

    let store = MemoryStore::with_records(records_with(&["Applied", "Interview"]));
    {
        let mut tracker = Tracker::new(store, "user-1");
        block_on(tracker.load()).expect("records load");
        tracker
            .edit_raw(2, Field::Status, "Offer", Instant::now())
            .expect("edit applies");
        let report = block_on(tracker.flush_all());
        assert_eq!(report.written, 1);
        tracker.store().save(&path).expect("store saves");
    }

    let reopened = MemoryStore::from_file(&path).expect("store reloads");
    let mut tracker = Tracker::new(reopened, "user-1");
    block_on(tracker.load()).expect("records load");
    assert_eq!(tracker.summary().offers, 1);

    let id = block_on(tracker.add()).expect("record is added");
    assert_eq!(id, 3);
}

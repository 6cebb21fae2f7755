//! Unit tests for records, summaries, rendering and validation.
mod common;
use chrono::NaiveDate;
use common::*;
use jobflow::auth::{MIN_PASSWORD_LENGTH, validate_sign_in, validate_sign_up};
use jobflow::prelude::*;
use jobflow::render::EMPTY_MESSAGE;
use jobflow::store::Snapshot;

#[test]
fn test_record_status_parsing() {
    assert_eq!(RecordStatus::from("Offer"), RecordStatus::Known(Status::Offer));
    assert_eq!(
        RecordStatus::from("On Hold"),
        RecordStatus::Unrecognized("On Hold".to_string())
    );
    assert_eq!(RecordStatus::default(), RecordStatus::Known(Status::Applied));
    assert_eq!(format!("{}", RecordStatus::from("Withdrawn")), "Withdrawn");
}

#[test]
fn test_records_json_defaults_and_aliases() {
    let set = RecordSet::from_json(
        r#"{"applications": [{"id": 7, "dateApplied": "2024-01-05"}, {"id": 8, "status": "Rejected", "date_applied": "2024-02-01", "salary": 90000}]}"#,
    )
    .expect("records parse");

    assert_eq!(set.len(), 2);
    let first = &set.records()[0];
    assert_eq!(first.status, RecordStatus::Known(Status::Applied));
    assert_eq!(first.company, "");
    assert_eq!(first.salary, None);
    assert_eq!(first.date_applied, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
    assert_eq!(set.records()[1].salary, Some(90000.0));

    let bare = RecordSet::from_json(RECORDS_JSON).expect("bare array parses");
    assert_eq!(bare.len(), 4);
    assert_eq!(bare.records()[0].owner_id, "user-1");
    assert_eq!(
        bare.records()[3].status,
        RecordStatus::Unrecognized("Ghosted".to_string())
    );
}

#[test]
fn test_unknown_status_survives_serialization() {
    let original = record(1, "Ghosted");
    let json = serde_json::to_string(&original).unwrap();
    assert!(json.contains(r#""status":"Ghosted""#));
    let parsed: ApplicationRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, original);
}

#[test]
fn test_field_parse_value() {
    assert_eq!(
        Field::Company.parse_value("").unwrap(),
        FieldValue::Company(None)
    );
    assert_eq!(
        Field::Position.parse_value("SRE").unwrap(),
        FieldValue::Position(Some("SRE".to_string()))
    );
    assert_eq!(
        Field::Status.parse_value("Interview").unwrap(),
        FieldValue::Status(RecordStatus::Known(Status::Interview))
    );
    assert_eq!(
        Field::DateApplied.parse_value("2024-06-30").unwrap(),
        FieldValue::DateApplied(NaiveDate::from_ymd_opt(2024, 6, 30).unwrap())
    );
    assert_eq!(
        Field::Salary.parse_value("").unwrap(),
        FieldValue::Salary(None)
    );
    assert_eq!(
        Field::Salary.parse_value("85000").unwrap(),
        FieldValue::Salary(Some(85000.0))
    );

    let err = Field::Salary.parse_value("-1").unwrap_err();
    assert!(err.to_string().contains("salary"));
    assert!(Field::Salary.parse_value("lots").is_err());
    assert!(Field::DateApplied.parse_value("30/06/2024").is_err());
}

#[test]
fn test_summary_counts_and_timeline() {
    let records = vec![
        record_on(1, "Applied", 2024, 3, 2),
        record_on(2, "Interview", 2024, 3, 15),
        record_on(3, "Applied", 2024, 4, 1),
        record_on(4, "Ghosted", 2024, 1, 20),
    ];
    let summary = Summary::from_records(&records);

    assert_eq!(summary.total, 4);
    assert_eq!(summary.applied, 2);
    assert_eq!(summary.interviews, 1);
    assert_eq!(summary.offers, 0);

    let distribution: Vec<(String, usize)> = summary
        .distribution
        .iter()
        .map(|share| (share.status.to_string(), share.count))
        .collect();
    assert_eq!(
        distribution,
        vec![
            ("Applied".to_string(), 2),
            ("Interview".to_string(), 1),
            ("Ghosted".to_string(), 1),
        ]
    );
    assert!((summary.distribution[0].percent - 50.0).abs() < 1e-9);

    let timeline: Vec<(&str, usize)> = summary
        .timeline
        .iter()
        .map(|month| (month.label.as_str(), month.count))
        .collect();
    assert_eq!(
        timeline,
        vec![("Jan 2024", 1), ("Mar 2024", 2), ("Apr 2024", 1)]
    );
}

#[test]
fn test_summary_of_nothing() {
    let summary = Summary::from_records(&[]);
    assert_eq!(summary.total, 0);
    assert!(summary.distribution.is_empty());
    assert!(summary.timeline.is_empty());
}

#[test]
fn test_svg_placeholder_for_empty_layout() {
    let layout = FlowLayoutEngine::default().layout(&derive_flow(&[]));
    let svg = SvgRenderer::default().render(&layout);
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains(EMPTY_MESSAGE));
    assert!(!svg.contains("<path"));
}

#[test]
fn test_svg_contains_nodes_links_and_labels() {
    let layout =
        FlowLayoutEngine::default().layout(&derive_flow(&records_with(&["Applied", "Applied", "Offer"])));
    let svg = SvgRenderer::default().render(&layout);

    assert_eq!(svg.matches("<path").count(), 2);
    assert_eq!(svg.matches("<linearGradient").count(), 2);
    assert!(svg.contains("Total Applications: 3"));
    assert!(svg.contains("Still Applied: 2"));
    assert!(svg.contains("Offer: 1"));
    assert!(svg.contains("2 applications to Applied"));
    assert!(svg.contains("#93c5fd"));
    assert!(svg.contains("#22c55e"));
    assert!(svg.contains("rotate(-90"));
    assert!(svg.trim_end().ends_with("</svg>"));
}

#[test]
fn test_svg_escapes_palette_colors() {
    let palette = Palette {
        total: r#"red" onload="alert(1)"#.to_string(),
        label: "<blue>".to_string(),
        ..Palette::default()
    };
    let layout = FlowLayoutEngine::default().layout(&derive_flow(&records_with(&["Offer"])));
    let svg = SvgRenderer::new(palette).render(&layout);

    assert!(!svg.contains(r#"onload="alert(1)""#));
    assert!(svg.contains("red&quot; onload=&quot;alert(1)"));
    assert!(!svg.contains("<blue>"));
    assert!(svg.contains("&lt;blue&gt;"));
}

#[test]
fn test_sign_up_validation_order() {
    assert_eq!(validate_sign_up("", "secret", "secret"), Err(AuthError::MissingFields));
    assert_eq!(validate_sign_up("a@b.c", "secret", ""), Err(AuthError::MissingFields));
    assert_eq!(
        validate_sign_up("a@b.c", "abc", "abd"),
        Err(AuthError::PasswordMismatch)
    );
    assert_eq!(
        validate_sign_up("a@b.c", "abc", "abc"),
        Err(AuthError::PasswordTooShort(MIN_PASSWORD_LENGTH))
    );
    assert_eq!(validate_sign_up("a@b.c", "secret", "secret"), Ok(()));

    assert_eq!(
        AuthError::PasswordTooShort(6).to_string(),
        "Password must be at least 6 characters"
    );
    assert_eq!(validate_sign_in("a@b.c", ""), Err(AuthError::MissingFields));
}

#[test]
fn test_snapshot_round_trip_through_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("records.bin");

    let mut records = records_with(&["Applied", "Ghosted", "Offer"]);
    records[2].salary = Some(101_500.0);
    let snapshot = Snapshot::from_records(records);
    assert_eq!(snapshot.next_id, 3);

    snapshot.save(&path).expect("snapshot saves");
    let loaded = Snapshot::from_file(&path).expect("snapshot loads");
    assert_eq!(loaded, snapshot);
}

#[test]
fn test_snapshot_rejects_garbage() {
    let err = Snapshot::from_bytes(&[0xff, 0xff, 0xff]).unwrap_err();
    assert!(matches!(err, StoreError::Snapshot(_)));
}

use crate::record::{Field, RecordId};
use thiserror::Error;

/// Errors raised when a `LayoutConfig` cannot produce geometry that fits the canvas.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Option '{option}' must be positive, got {value}")]
    NotPositive { option: &'static str, value: f64 },

    #[error("Option '{option}' must lie in {min}..={max}, got {value}")]
    OutOfRange {
        option: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Margins leave no drawing area on a {width}x{height} canvas")]
    NoDrawingArea { width: f64, height: f64 },

    #[error(
        "Status column does not fit: {required} units are needed vertically but only {available} are available"
    )]
    StackTooTall { required: f64, available: f64 },

    #[error("Columns overlap: {0}")]
    ColumnsOverlap(String),

    #[error("Failed to parse layout configuration: {0}")]
    Parse(String),
}

/// Errors raised while interpreting user-supplied record data.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordError {
    #[error("Value '{value}' is not valid for field '{field}': {reason}")]
    InvalidValue {
        field: Field,
        value: String,
        reason: String,
    },

    #[error("Record {0} does not exist")]
    UnknownRecord(RecordId),

    #[error("Failed to load records: {0}")]
    Load(String),
}

/// Errors surfaced by the identity collaborator or by local credential checks.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Please fill in all fields")]
    MissingFields,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Password must be at least {0} characters")]
    PasswordTooShort(usize),

    #[error("{0}")]
    Provider(String),
}

/// Errors surfaced by the storage collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Record {0} was not found")]
    NotFound(RecordId),

    #[error("Storage backend failed: {0}")]
    Backend(String),

    #[error("Snapshot error: {0}")]
    Snapshot(String),
}

/// Errors returned by the tracker state layer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrackerError {
    #[error(transparent)]
    Record(#[from] RecordError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the jobflow crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use jobflow::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let records = RecordSet::from_file("path/to/applications.json")?;
//! let engine = FlowLayoutEngine::new(LayoutConfig::from_file("path/to/layout.json")?)?;
//!
//! let layout = engine.layout(&derive_flow(records.records()));
//! println!("{} nodes, {} links", layout.nodes.len(), layout.links.len());
//! # Ok(())
//! # }
//! ```

// Records
pub use crate::record::{
    ApplicationRecord, Field, FieldValue, NewRecord, RecordId, RecordSet, RecordStatus, Status,
};

// Flow derivation, layout and rendering
pub use crate::flow::{FlowData, FlowLink, FlowNode, NodeId, derive_flow};
pub use crate::layout::{
    FlowLayout, FlowLayoutEngine, LayoutConfig, LinkPath, Margin, Point, PositionedLink,
    PositionedNode, Rect,
};
pub use crate::render::{Palette, SvgRenderer};
pub use crate::summary::Summary;

// Collaborators and client state
pub use crate::auth::{AuthService, IdentityProvider, MemoryIdentity, User};
pub use crate::debounce::KeyedDebouncer;
pub use crate::store::{MemoryStore, RecordStore};
pub use crate::tracker::Tracker;

// Error types
pub use crate::error::{AuthError, ConfigError, RecordError, StoreError, TrackerError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

//! # jobflow - Job Application Tracking Core
//!
//! **jobflow** holds the non-UI parts of a job-application tracker: the record
//! model, a two-level flow diagram ("Sankey-style") layout engine, summary
//! aggregates for charts, and the seams to the external identity and storage
//! services.
//!
//! ## Core Workflow
//!
//! 1.  **Load Records**: Read [`ApplicationRecord`](record::ApplicationRecord)s from a
//!     store through the [`RecordStore`](store::RecordStore) trait, or from a JSON file
//!     with [`RecordSet`](record::RecordSet).
//! 2.  **Derive the Flow**: [`derive_flow`](flow::derive_flow) groups records by status
//!     into one "Total" node fanning out to one node per status that has records.
//! 3.  **Lay Out**: [`FlowLayoutEngine`](layout::FlowLayoutEngine) sizes and positions
//!     the nodes proportionally and computes smooth ribbons between them.
//! 4.  **Render**: [`SvgRenderer`](render::SvgRenderer) draws the layout as SVG.
//!
//! [`Tracker`](tracker::Tracker) ties these together for an interactive client:
//! it keeps the local list, debounces field edits per record and field, and
//! recomputes the derived data after every change.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use jobflow::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let records = RecordSet::from_file("applications.json")?;
//!
//!     let flow = derive_flow(records.records());
//!     let engine = FlowLayoutEngine::new(LayoutConfig::default())?;
//!     let layout = engine.layout(&flow);
//!
//!     for positioned in &layout.nodes {
//!         println!(
//!             "{} ({}) at y={:.1}, height={:.1}",
//!             positioned.node.display_name,
//!             positioned.node.count,
//!             positioned.rect.y,
//!             positioned.rect.height
//!         );
//!     }
//!
//!     let svg = SvgRenderer::default().render(&layout);
//!     std::fs::write("flow.svg", svg)?;
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod debounce;
pub mod error;
pub mod flow;
pub mod layout;
pub mod prelude;
pub mod record;
pub mod render;
pub mod store;
pub mod summary;
pub mod tracker;

//! Laboratory work-sheet tracking core.
//!
//! Tracks batches of samples ("sheets") through a fixed six-stage
//! pipeline with per-stage SLA deadlines, and derives progress,
//! compliance, and turnaround KPIs from recorded stage timestamps.
//!
//! # Modules
//!
//! - **`catalog`**: the fixed stage pipeline and its deadlines
//! - **`models`**: domain types — `Sheet`, `Sample`, `StageRecord`
//! - **`registry`**: sheet collection, date-sequenced naming, batch intake
//! - **`recorder`**: start/end stage events, broadcast over a sheet
//! - **`progress`**: completion percentages and elapsed time
//! - **`compliance`**: stage durations vs. deadlines
//! - **`kpi`**: turnaround histogram, per-stage averages, summary figures
//! - **`simulation`**: synthetic timings for demos and fixtures
//!
//! # Architecture
//!
//! Pure domain crate: one owned [`registry::SheetRegistry`] is the only
//! mutable state, mutations are synchronous and all-or-nothing, and
//! every derived figure is recomputed from current state on demand.
//! Presentation (charts, forms, navigation) lives in the consumer.

pub mod catalog;
pub mod compliance;
pub mod kpi;
pub mod models;
pub mod progress;
pub mod recorder;
pub mod registry;
pub mod simulation;

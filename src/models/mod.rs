//! Laboratory tracking domain models.
//!
//! Core data types for the sheet/sample lifecycle: a [`Sheet`] is a
//! batch of [`Sample`]s processed together, and each sample carries one
//! [`StageRecord`] per catalog stage.
//!
//! Model types hold recorded facts only — progress, compliance, and
//! turnaround figures are derived on demand by the calculator modules.

mod sample;
mod sheet;
mod stage;

pub use sample::{Sample, SampleType, ANALYST_UNASSIGNED};
pub use sheet::{date_key, sheet_name, Sheet};
pub use stage::StageRecord;

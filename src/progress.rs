//! Progress and elapsed-time derivation.
//!
//! Pure functions of current state — nothing here is stored back on
//! the models, so progress can never drift from the recorded
//! timestamps it is derived from.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::models::{Sample, Sheet};

/// Whole-hour / whole-minute decomposition of an elapsed duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Elapsed {
    /// Whole hours elapsed.
    pub hours: i64,
    /// Remaining minutes (0..=59).
    pub minutes: i64,
}

impl fmt::Display for Elapsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h {}m", self.hours, self.minutes)
    }
}

/// Completion percentage of one sample (0..=100).
///
/// Completed stages over total stages; a sample with no stages reads 0.
pub fn sample_progress(sample: &Sample) -> f64 {
    if sample.stages.is_empty() {
        return 0.0;
    }
    sample.completed_stage_count() as f64 / sample.stages.len() as f64 * 100.0
}

/// Mean completion percentage over a sheet's samples (0..=100).
///
/// An empty sheet reads 0, not NaN.
pub fn sheet_progress(sheet: &Sheet) -> f64 {
    if sheet.samples.is_empty() {
        return 0.0;
    }
    let sum: f64 = sheet.samples.iter().map(sample_progress).sum();
    sum / sheet.samples.len() as f64
}

/// Elapsed time between two instants, floored to whole minutes and
/// clamped at zero.
pub fn elapsed_time(added_at: DateTime<Utc>, now: DateTime<Utc>) -> Elapsed {
    let total_minutes = (now - added_at).num_minutes().max(0);
    Elapsed {
        hours: total_minutes / 60,
        minutes: total_minutes % 60,
    }
}

//! Sheet model and date-derived naming.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Sample;

/// A named batch of samples processed together.
///
/// Sheets are append-create-once units: samples are never added or
/// removed after creation, only their stage records change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sheet {
    /// Opaque generated identifier.
    pub id: String,
    /// Display name: `<dd>-<mm>-<yyyy>/<n>` with `n` the daily sequence
    /// number.
    pub name: String,
    /// When the sheet was created.
    pub created_at: DateTime<Utc>,
    /// Calendar-day key `<yyyy>-<mm>-<dd>` derived from `created_at`.
    pub date_key: String,
    /// Member samples, in intake order.
    pub samples: Vec<Sample>,
}

impl Sheet {
    /// Number of samples.
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Finds a sample by its (sheet-local) id.
    pub fn sample(&self, id: &str) -> Option<&Sample> {
        self.samples.iter().find(|s| s.id == id)
    }
}

/// Formats the calendar-day key for a timestamp (`<yyyy>-<mm>-<dd>`).
pub fn date_key(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d").to_string()
}

/// Formats a sheet name from its creation date and daily sequence
/// number (`<dd>-<mm>-<yyyy>/<n>`).
pub fn sheet_name(at: DateTime<Utc>, seq: u32) -> String {
    format!("{}/{}", at.format("%d-%m-%Y"), seq)
}

//! Stage record: recorded timing for one stage of one sample.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Recorded start/end timestamps for one stage of one sample.
///
/// `completed` holds iff `end` is set. `start` is first-write-wins:
/// re-registering a start leaves the original timestamp. `end` is
/// last-write-wins and forces `completed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageRecord {
    /// Stage name (matches a catalog entry).
    pub name: String,
    /// When the stage started, if registered.
    pub start: Option<DateTime<Utc>>,
    /// When the stage ended, if registered.
    pub end: Option<DateTime<Utc>>,
    /// Whether the stage is done. Always tracks `end.is_some()`.
    pub completed: bool,
}

impl StageRecord {
    /// Creates an unset record for the named stage.
    pub fn unset(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            start: None,
            end: None,
            completed: false,
        }
    }

    /// Records a start time unless one is already present.
    pub fn record_start(&mut self, at: DateTime<Utc>) {
        if self.start.is_none() {
            self.start = Some(at);
        }
    }

    /// Records an end time, overwriting any previous value, and marks
    /// the stage completed.
    pub fn record_end(&mut self, at: DateTime<Utc>) {
        self.end = Some(at);
        self.completed = true;
    }
}

//! Sheet registry: owns the sheet collection and daily naming counters.
//!
//! The registry is the single mutable root of the system. Sheets are
//! created here from batch intake rows; stage events go through the
//! [`crate::recorder`] functions. Every mutation is synchronous and
//! all-or-nothing.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::catalog::StageCatalog;
use crate::models::{date_key, sheet_name, Sample, SampleType, Sheet, ANALYST_UNASSIGNED};

/// One input row of a batch-creation request.
///
/// String-typed boundary schema: `sample_type` carries the localized
/// label (`"Metálico"` / `"No Metálico"`), `name` and `analyst` may be
/// empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchRow {
    /// Required sample identifier (trimmed; empty rows are dropped).
    pub id: String,
    /// Optional sample name or description.
    pub name: String,
    /// Material type label.
    pub sample_type: String,
    /// Optional assigned analyst.
    pub analyst: String,
}

impl BatchRow {
    /// Creates a row with the required fields.
    pub fn new(id: impl Into<String>, sample_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            sample_type: sample_type.into(),
            ..Self::default()
        }
    }

    /// Sets the sample name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the assigned analyst.
    pub fn with_analyst(mut self, analyst: impl Into<String>) -> Self {
        self.analyst = analyst.into();
        self
    }
}

/// Batch creation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BatchError {
    /// Every row was dropped by validation; no sheet was created.
    #[error("no valid rows in batch")]
    EmptyBatch,
}

/// Owns all sheets (newest first) and the per-calendar-day sheet-name
/// counters.
///
/// Counters are bucketed by date key and never reused within a date
/// once issued; they are only consumed when a sheet is actually
/// created.
#[derive(Debug, Serialize, Deserialize)]
pub struct SheetRegistry {
    catalog: StageCatalog,
    sheets: Vec<Sheet>,
    daily_counters: HashMap<String, u32>,
}

impl SheetRegistry {
    /// Creates an empty registry over the given stage catalog.
    pub fn new(catalog: StageCatalog) -> Self {
        Self {
            catalog,
            sheets: Vec::new(),
            daily_counters: HashMap::new(),
        }
    }

    /// The catalog this registry builds samples against.
    pub fn catalog(&self) -> &StageCatalog {
        &self.catalog
    }

    /// All sheets, newest first.
    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    /// Finds a sheet by id.
    pub fn sheet(&self, id: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.id == id)
    }

    pub(crate) fn sheet_mut(&mut self, id: &str) -> Option<&mut Sheet> {
        self.sheets.iter_mut().find(|s| s.id == id)
    }

    /// Creates a sheet from batch intake rows.
    ///
    /// Rows with an empty (post-trim) id or an unknown type label are
    /// dropped silently — filtering, not failure. If no row survives,
    /// the batch fails with [`BatchError::EmptyBatch`] and the registry
    /// is left untouched (the daily counter is not consumed).
    ///
    /// On success the sheet is named `<dd>-<mm>-<yyyy>/<n>` from the
    /// incremented counter for `created_at`'s date key and prepended to
    /// the sheet list.
    pub fn create_sheet(
        &mut self,
        created_at: DateTime<Utc>,
        rows: &[BatchRow],
    ) -> Result<&Sheet, BatchError> {
        let samples: Vec<Sample> = rows
            .iter()
            .filter_map(|row| self.build_sample(row, created_at))
            .collect();
        if samples.is_empty() {
            return Err(BatchError::EmptyBatch);
        }

        let key = date_key(created_at);
        let seq = self.daily_counters.get(&key).copied().unwrap_or(0) + 1;
        self.daily_counters.insert(key.clone(), seq);

        let sheet = Sheet {
            id: Uuid::new_v4().to_string(),
            name: sheet_name(created_at, seq),
            created_at,
            date_key: key,
            samples,
        };
        self.sheets.insert(0, sheet);
        Ok(&self.sheets[0])
    }

    /// Sheets, optionally filtered to an exact date key. Order
    /// preserved.
    pub fn list_sheets(&self, filter_date_key: Option<&str>) -> Vec<&Sheet> {
        self.sheets
            .iter()
            .filter(|s| filter_date_key.map_or(true, |key| s.date_key == key))
            .collect()
    }

    fn build_sample(&self, row: &BatchRow, added_at: DateTime<Utc>) -> Option<Sample> {
        let id = row.id.trim();
        if id.is_empty() {
            return None;
        }
        let sample_type = SampleType::parse_label(row.sample_type.trim())?;

        let name = row.name.trim();
        let name = if name.is_empty() {
            format!("Sample {id}")
        } else {
            name.to_string()
        };
        let analyst = row.analyst.trim();
        let analyst = if analyst.is_empty() {
            ANALYST_UNASSIGNED.to_string()
        } else {
            analyst.to_string()
        };

        Some(Sample {
            id: id.to_string(),
            name,
            added_at,
            sample_type,
            analyst,
            stages: self.catalog.fresh_records(),
        })
    }
}

impl Default for SheetRegistry {
    /// Empty registry over the standard catalog.
    fn default() -> Self {
        Self::new(StageCatalog::standard())
    }
}

//! Turnaround-time aggregation and operational summary figures.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Turnaround (TAT) | Sum of all stage durations for one sample |
//! | TAT histogram | Sample count per fixed TAT range |
//! | Avg stage duration | Mean measurable duration of one stage |
//! | Summary | Total / completed / in-progress counts, mean TAT |

use serde::{Deserialize, Serialize};

use crate::catalog::StageDefinition;
use crate::compliance::stage_duration_minutes;
use crate::models::{Sample, Sheet};

/// Total minutes a sample spent across all stages.
///
/// Defined only once every stage has both endpoints recorded; a sample
/// mid-pipeline has no turnaround time yet.
pub fn turnaround_minutes(sample: &Sample) -> Option<i64> {
    let mut total = 0;
    for record in &sample.stages {
        total += stage_duration_minutes(record)?;
    }
    Some(total)
}

/// A labelled turnaround-time range in minutes (inclusive bounds,
/// `max: None` = unbounded above).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TatBucket {
    /// Display label, e.g. `"121-240"`.
    pub label: String,
    /// Lower bound (inclusive).
    pub min: i64,
    /// Upper bound (inclusive), or `None` for the open-ended tail.
    pub max: Option<i64>,
}

impl TatBucket {
    /// Creates a bounded bucket.
    pub fn new(label: impl Into<String>, min: i64, max: i64) -> Self {
        Self {
            label: label.into(),
            min,
            max: Some(max),
        }
    }

    /// Creates the open-ended tail bucket.
    pub fn unbounded(label: impl Into<String>, min: i64) -> Self {
        Self {
            label: label.into(),
            min,
            max: None,
        }
    }

    /// Whether a turnaround value falls in this bucket.
    pub fn contains(&self, minutes: i64) -> bool {
        minutes >= self.min && self.max.map_or(true, |max| minutes <= max)
    }
}

/// Sample count for one histogram bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketCount {
    /// Bucket label.
    pub label: String,
    /// Number of samples whose turnaround falls in the bucket.
    pub count: usize,
}

/// The dashboard's standard TAT ranges (minutes).
pub fn default_tat_buckets() -> Vec<TatBucket> {
    vec![
        TatBucket::new("0-120", 0, 120),
        TatBucket::new("121-240", 121, 240),
        TatBucket::new("241-360", 241, 360),
        TatBucket::new("361-480", 361, 480),
        TatBucket::new("481-600", 481, 600),
        TatBucket::unbounded(">600", 601),
    ]
}

/// Buckets samples by turnaround time.
///
/// Each sample with a defined turnaround lands in the first bucket
/// containing it; samples still mid-pipeline are left out entirely, so
/// bucket counts sum to the number of measurable samples.
pub fn histogram<'a, I>(samples: I, buckets: &[TatBucket]) -> Vec<BucketCount>
where
    I: IntoIterator<Item = &'a Sample>,
{
    let mut counts = vec![0usize; buckets.len()];
    for sample in samples {
        if let Some(tat) = turnaround_minutes(sample) {
            if let Some(idx) = buckets.iter().position(|b| b.contains(tat)) {
                counts[idx] += 1;
            }
        }
    }
    buckets
        .iter()
        .zip(counts)
        .map(|(bucket, count)| BucketCount {
            label: bucket.label.clone(),
            count,
        })
        .collect()
}

/// Mean measurable duration (minutes) of one stage across samples.
///
/// `None` when no sample has that stage measured.
pub fn average_stage_duration<'a, I>(samples: I, def: &StageDefinition) -> Option<f64>
where
    I: IntoIterator<Item = &'a Sample>,
{
    let mut total = 0i64;
    let mut measured = 0u32;
    for sample in samples {
        if let Some(minutes) = sample.stage(&def.name).and_then(stage_duration_minutes) {
            total += minutes;
            measured += 1;
        }
    }
    (measured > 0).then(|| total as f64 / f64::from(measured))
}

/// Distinct analysts across all sheets, in first-seen order.
pub fn analysts(sheets: &[Sheet]) -> Vec<String> {
    let mut seen = Vec::new();
    for sample in sheets.iter().flat_map(|sheet| &sheet.samples) {
        if !seen.contains(&sample.analyst) {
            seen.push(sample.analyst.clone());
        }
    }
    seen
}

/// Samples assigned to one analyst, across all sheets.
pub fn samples_for_analyst<'a>(sheets: &'a [Sheet], analyst: &str) -> Vec<&'a Sample> {
    sheets
        .iter()
        .flat_map(|sheet| &sheet.samples)
        .filter(|sample| sample.analyst == analyst)
        .collect()
}

/// Operational summary figures for the dashboard header.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiSummary {
    /// Samples across all sheets.
    pub total_samples: usize,
    /// Samples with every stage completed.
    pub completed_samples: usize,
    /// Samples still somewhere in the pipeline.
    pub in_progress_samples: usize,
    /// Mean turnaround (minutes) over samples with a defined TAT.
    pub avg_turnaround_minutes: Option<f64>,
}

impl KpiSummary {
    /// Computes the summary over a set of sheets.
    pub fn calculate(sheets: &[Sheet]) -> Self {
        let mut total = 0usize;
        let mut completed = 0usize;
        let mut tat_sum = 0i64;
        let mut tat_count = 0u32;

        for sample in sheets.iter().flat_map(|sheet| &sheet.samples) {
            total += 1;
            if sample.is_complete() {
                completed += 1;
            }
            if let Some(tat) = turnaround_minutes(sample) {
                tat_sum += tat;
                tat_count += 1;
            }
        }

        Self {
            total_samples: total,
            completed_samples: completed,
            in_progress_samples: total - completed,
            avg_turnaround_minutes: (tat_count > 0)
                .then(|| tat_sum as f64 / f64::from(tat_count)),
        }
    }
}

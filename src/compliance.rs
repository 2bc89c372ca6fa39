//! SLA compliance evaluation.
//!
//! Compares recorded stage durations against catalog deadlines. A
//! stage without both endpoints recorded is not yet measurable; it is
//! excluded from ratios rather than counted as compliant or
//! non-compliant, so "no data" surfaces as `None` instead of a
//! spurious percentage.

use serde::Serialize;

use crate::catalog::{StageCatalog, StageDefinition};
use crate::models::{Sheet, StageRecord};

/// Recorded duration of a stage in whole minutes, if measurable.
pub fn stage_duration_minutes(record: &StageRecord) -> Option<i64> {
    match (record.start, record.end) {
        (Some(start), Some(end)) => Some((end - start).num_minutes()),
        _ => None,
    }
}

/// Whether a stage met its deadline. `None` until measurable.
pub fn is_compliant(record: &StageRecord, def: &StageDefinition) -> Option<bool> {
    stage_duration_minutes(record).map(|m| m <= i64::from(def.deadline_minutes))
}

/// Percentage (0..=100) of measurable records meeting the deadline.
///
/// `None` when nothing is measurable yet.
pub fn compliance_ratio<'a, I>(records: I, def: &StageDefinition) -> Option<f64>
where
    I: IntoIterator<Item = &'a StageRecord>,
{
    let mut measured = 0u32;
    let mut compliant = 0u32;
    for record in records {
        if let Some(ok) = is_compliant(record, def) {
            measured += 1;
            if ok {
                compliant += 1;
            }
        }
    }
    (measured > 0).then(|| f64::from(compliant) / f64::from(measured) * 100.0)
}

/// Compliance ratio of one stage across a set of sheets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageCompliance {
    /// Stage name.
    pub stage: String,
    /// Ratio in 0..=100, or `None` with no measurable data.
    pub ratio: Option<f64>,
}

/// Per-stage compliance ratios over all samples of the given sheets,
/// in catalog order.
pub fn compliance_by_stage(sheets: &[Sheet], catalog: &StageCatalog) -> Vec<StageCompliance> {
    catalog
        .stages()
        .iter()
        .map(|def| StageCompliance {
            stage: def.name.clone(),
            ratio: compliance_ratio(
                sheets
                    .iter()
                    .flat_map(|sheet| &sheet.samples)
                    .filter_map(|sample| sample.stage(&def.name)),
                def,
            ),
        })
        .collect()
}

/// Pooled compliance percentage over every stage record of every
/// sample in the given sheets.
///
/// Pooled, not averaged per stage and re-averaged — re-averaging would
/// double-weight stages with few measurable records.
pub fn overall_compliance(sheets: &[Sheet], catalog: &StageCatalog) -> Option<f64> {
    let mut measured = 0u32;
    let mut compliant = 0u32;
    for record in sheets
        .iter()
        .flat_map(|sheet| &sheet.samples)
        .flat_map(|sample| &sample.stages)
    {
        let Some(def) = catalog.get(&record.name) else {
            continue;
        };
        if let Some(ok) = is_compliant(record, def) {
            measured += 1;
            if ok {
                compliant += 1;
            }
        }
    }
    (measured > 0).then(|| f64::from(compliant) / f64::from(measured) * 100.0)
}

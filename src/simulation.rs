//! Synthetic stage timings for demos and fixtures.
//!
//! A freshly seeded dashboard has no recorded durations, yet still
//! needs charts to draw. These helpers derive deterministic, plausible
//! timings from the catalog deadlines. They are a stand-in data
//! source only — the evaluators in [`crate::compliance`] and
//! [`crate::kpi`] always operate on whatever the stage records carry.

use chrono::{DateTime, Duration, Utc};

use crate::catalog::{StageCatalog, StageDefinition};
use crate::models::Sheet;

/// Simulated mean duration (minutes) for one stage: the deadline
/// scaled by a small name-derived factor in `0.90..=1.02`.
pub fn simulated_stage_minutes(def: &StageDefinition) -> i64 {
    let seed = def.name.as_bytes().first().copied().unwrap_or(0);
    let factor = 0.9 + f64::from(seed % 5) * 0.03;
    (f64::from(def.deadline_minutes) * factor).round() as i64
}

/// Simulated turnaround (minutes) for the `ordinal`-th sample of a
/// batch: the catalog's total deadline scaled by an ordinal-derived
/// factor in `0.85..=1.09`, so a batch spreads across the histogram
/// ranges and includes some SLA misses.
pub fn simulated_turnaround_minutes(catalog: &StageCatalog, ordinal: usize) -> i64 {
    let factor = 0.85 + (ordinal % 7) as f64 * 0.04;
    (f64::from(catalog.total_deadline_minutes()) * factor).round() as i64
}

/// Stamps every stage of every sample with synthetic start/end times
/// so the real evaluators have data to chew on.
///
/// Stages run back to back from `at`; each sample's stage durations
/// are its deadlines scaled by the same ordinal factor as
/// [`simulated_turnaround_minutes`]. Existing start times are kept
/// (first-write-wins, as with real registration).
pub fn simulate_completed_sheet(sheet: &mut Sheet, catalog: &StageCatalog, at: DateTime<Utc>) {
    for (ordinal, sample) in sheet.samples.iter_mut().enumerate() {
        let factor = 0.85 + (ordinal % 7) as f64 * 0.04;
        let mut cursor = at;
        for record in &mut sample.stages {
            let deadline = catalog.get(&record.name).map_or(0, |d| d.deadline_minutes);
            let minutes = (f64::from(deadline) * factor).round() as i64;
            record.record_start(cursor);
            cursor += Duration::minutes(minutes);
            record.record_end(cursor);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StageCatalog;
    use crate::compliance::overall_compliance;
    use crate::kpi::{default_tat_buckets, histogram, turnaround_minutes};
    use crate::registry::{BatchRow, SheetRegistry};
    use chrono::{TimeZone, Utc};

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 8, 18, 8, 0, 0).unwrap()
    }

    #[test]
    fn test_stage_minutes_deterministic_and_near_deadline() {
        let catalog = StageCatalog::standard();
        for def in catalog.stages() {
            let a = simulated_stage_minutes(def);
            let b = simulated_stage_minutes(def);
            assert_eq!(a, b);
            let deadline = f64::from(def.deadline_minutes);
            assert!(a as f64 >= (deadline * 0.9).floor());
            assert!(a as f64 <= (deadline * 1.02).ceil());
        }
    }

    #[test]
    fn test_turnaround_factors_cycle() {
        let catalog = StageCatalog::standard();
        assert_eq!(simulated_turnaround_minutes(&catalog, 0), 425); // 500 * 0.85
        assert_eq!(simulated_turnaround_minutes(&catalog, 6), 545); // 500 * 1.09
        assert_eq!(
            simulated_turnaround_minutes(&catalog, 7),
            simulated_turnaround_minutes(&catalog, 0)
        );
    }

    #[test]
    fn test_simulated_sheet_feeds_real_evaluators() {
        let mut registry = SheetRegistry::default();
        let rows: Vec<BatchRow> = (1..=14)
            .map(|i| BatchRow::new(i.to_string(), "Metálico"))
            .collect();
        let id = registry.create_sheet(at(), &rows).unwrap().id.clone();

        let catalog = registry.catalog().clone();
        let mut sheets: Vec<Sheet> = registry.sheets().to_vec();
        simulate_completed_sheet(&mut sheets[0], &catalog, at());

        // Every sample fully measured
        assert!(sheets[0].samples.iter().all(|s| s.is_complete()));
        assert!(sheets[0]
            .samples
            .iter()
            .all(|s| turnaround_minutes(s).is_some()));
        assert_eq!(sheets[0].id, id);

        // Factors above 1.0 produce some deadline misses, below keep
        // some stages compliant, so the pooled figure is strictly inside
        // the range.
        let overall = overall_compliance(&sheets, &catalog).unwrap();
        assert!(overall > 0.0 && overall < 100.0);

        // Histogram conserves the sample count
        let counts = histogram(sheets[0].samples.iter(), &default_tat_buckets());
        let total: usize = counts.iter().map(|c| c.count).sum();
        assert_eq!(total, 14);
    }

    #[test]
    fn test_simulation_keeps_existing_starts() {
        let mut registry = SheetRegistry::default();
        registry
            .create_sheet(at(), &[BatchRow::new("1", "Metálico")])
            .unwrap();
        let catalog = registry.catalog().clone();
        let mut sheet = registry.sheets()[0].clone();

        let earlier = at() - chrono::Duration::minutes(30);
        sheet.samples[0].stages[0].record_start(earlier);
        simulate_completed_sheet(&mut sheet, &catalog, at());
        assert_eq!(sheet.samples[0].stages[0].start, Some(earlier));
    }
}

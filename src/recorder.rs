//! Stage timestamp recording.
//!
//! Stage events are registered per sheet and fan out to every member
//! sample: a sheet is one batch physically processed together, so an
//! instrument run timestamps the whole tray at once. Per-sample timing
//! would be a separate operation, not a variant of these.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::registry::SheetRegistry;

/// Stage event registration failure.
///
/// Lookup failures only — the target sheet is not mutated at all when
/// either occurs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegisterError {
    /// No sheet with the given id.
    #[error("sheet not found: {0}")]
    SheetNotFound(String),
    /// Stage name not in the catalog.
    #[error("stage not found: {0}")]
    StageNotFound(String),
}

enum StageEvent {
    Start,
    End,
}

/// Registers a stage start for every sample of a sheet.
///
/// Start times are first-write-wins: samples whose record already
/// carries a start keep it, so re-applying the event is idempotent.
/// A non-empty `analyst` overwrites every sample's analyst (broadcast,
/// not per-sample merge).
pub fn register_start(
    registry: &mut SheetRegistry,
    sheet_id: &str,
    stage_name: &str,
    analyst: Option<&str>,
    at: DateTime<Utc>,
) -> Result<(), RegisterError> {
    apply(registry, sheet_id, stage_name, analyst, at, StageEvent::Start)
}

/// Registers a stage end for every sample of a sheet.
///
/// End times are last-write-wins and force `completed`, regardless of
/// any prior value. Same analyst broadcast as [`register_start`].
pub fn register_end(
    registry: &mut SheetRegistry,
    sheet_id: &str,
    stage_name: &str,
    analyst: Option<&str>,
    at: DateTime<Utc>,
) -> Result<(), RegisterError> {
    apply(registry, sheet_id, stage_name, analyst, at, StageEvent::End)
}

fn apply(
    registry: &mut SheetRegistry,
    sheet_id: &str,
    stage_name: &str,
    analyst: Option<&str>,
    at: DateTime<Utc>,
    event: StageEvent,
) -> Result<(), RegisterError> {
    // Both lookups resolve before anything is touched.
    if !registry.catalog().contains(stage_name) {
        return Err(RegisterError::StageNotFound(stage_name.to_string()));
    }
    let sheet = registry
        .sheet_mut(sheet_id)
        .ok_or_else(|| RegisterError::SheetNotFound(sheet_id.to_string()))?;

    let analyst = analyst.map(str::trim).filter(|a| !a.is_empty());
    for sample in &mut sheet.samples {
        if let Some(name) = analyst {
            sample.analyst = name.to_string();
        }
        if let Some(record) = sample.stage_mut(stage_name) {
            match event {
                StageEvent::Start => record.record_start(at),
                StageEvent::End => record.record_end(at),
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ANALYST_UNASSIGNED;
    use crate::progress::sample_progress;
    use crate::registry::BatchRow;
    use chrono::{TimeZone, Utc};

    fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 8, 18, 9, minute, 0).unwrap()
    }

    fn registry_with_sheet() -> (SheetRegistry, String) {
        let mut registry = SheetRegistry::default();
        let id = registry
            .create_sheet(
                at(0),
                &[
                    BatchRow::new("1", "Metálico"),
                    BatchRow::new("2", "No Metálico"),
                ],
            )
            .unwrap()
            .id
            .clone();
        (registry, id)
    }

    #[test]
    fn test_start_broadcasts_to_all_samples() {
        let (mut registry, id) = registry_with_sheet();
        register_start(&mut registry, &id, "Pesaje", None, at(5)).unwrap();

        let sheet = registry.sheet(&id).unwrap();
        for sample in &sheet.samples {
            let record = sample.stage("Pesaje").unwrap();
            assert_eq!(record.start, Some(at(5)));
            assert!(!record.completed);
        }
    }

    #[test]
    fn test_start_is_idempotent() {
        let (mut registry, id) = registry_with_sheet();
        register_start(&mut registry, &id, "Pesaje", None, at(5)).unwrap();
        register_start(&mut registry, &id, "Pesaje", None, at(40)).unwrap();

        let sheet = registry.sheet(&id).unwrap();
        assert_eq!(sheet.samples[0].stage("Pesaje").unwrap().start, Some(at(5)));
    }

    #[test]
    fn test_end_overwrites_and_completes() {
        let (mut registry, id) = registry_with_sheet();
        register_end(&mut registry, &id, "Ingreso", None, at(10)).unwrap();
        register_end(&mut registry, &id, "Ingreso", None, at(20)).unwrap();

        let sheet = registry.sheet(&id).unwrap();
        for sample in &sheet.samples {
            let record = sample.stage("Ingreso").unwrap();
            assert_eq!(record.end, Some(at(20)));
            assert!(record.completed);
        }
    }

    #[test]
    fn test_end_without_start() {
        let (mut registry, id) = registry_with_sheet();
        register_end(&mut registry, &id, "Lectura", None, at(30)).unwrap();

        let record = registry.sheet(&id).unwrap().samples[0].stage("Lectura").unwrap().clone();
        assert!(record.start.is_none());
        assert!(record.completed);
    }

    #[test]
    fn test_analyst_broadcast() {
        let (mut registry, id) = registry_with_sheet();
        register_start(&mut registry, &id, "Ingreso", Some("Soto"), at(1)).unwrap();
        let sheet = registry.sheet(&id).unwrap();
        assert!(sheet.samples.iter().all(|s| s.analyst == "Soto"));

        // Empty and whitespace-only analysts leave assignments alone
        register_end(&mut registry, &id, "Ingreso", Some("  "), at(2)).unwrap();
        register_end(&mut registry, &id, "Ingreso", None, at(3)).unwrap();
        let sheet = registry.sheet(&id).unwrap();
        assert!(sheet.samples.iter().all(|s| s.analyst == "Soto"));
    }

    #[test]
    fn test_analyst_starts_unassigned() {
        let (registry, id) = registry_with_sheet();
        let sheet = registry.sheet(&id).unwrap();
        assert!(sheet.samples.iter().all(|s| s.analyst == ANALYST_UNASSIGNED));
    }

    #[test]
    fn test_unknown_sheet() {
        let (mut registry, _) = registry_with_sheet();
        let err = register_start(&mut registry, "nope", "Pesaje", None, at(0)).unwrap_err();
        assert_eq!(err, RegisterError::SheetNotFound("nope".into()));
    }

    #[test]
    fn test_unknown_stage_mutates_nothing() {
        let (mut registry, id) = registry_with_sheet();
        let err =
            register_start(&mut registry, &id, "Secado", Some("Soto"), at(0)).unwrap_err();
        assert_eq!(err, RegisterError::StageNotFound("Secado".into()));

        let sheet = registry.sheet(&id).unwrap();
        assert!(sheet.samples.iter().all(|s| s.analyst == ANALYST_UNASSIGNED));
        assert!(sheet
            .samples
            .iter()
            .flat_map(|s| &s.stages)
            .all(|r| r.start.is_none() && r.end.is_none()));
    }

    #[test]
    fn test_progress_only_increases_via_end() {
        let (mut registry, id) = registry_with_sheet();
        let progress_of = |registry: &SheetRegistry| {
            sample_progress(&registry.sheet(&id).unwrap().samples[0])
        };
        let p0 = progress_of(&registry);
        assert!((p0 - 0.0).abs() < 1e-10);

        register_start(&mut registry, &id, "Ingreso", None, at(0)).unwrap();
        assert!((progress_of(&registry) - p0).abs() < 1e-10);

        register_end(&mut registry, &id, "Ingreso", None, at(4)).unwrap();
        let p1 = progress_of(&registry);
        assert!(p1 > p0);

        // Re-ending the same stage never lowers progress
        register_end(&mut registry, &id, "Ingreso", None, at(6)).unwrap();
        assert!((progress_of(&registry) - p1).abs() < 1e-10);
    }
}

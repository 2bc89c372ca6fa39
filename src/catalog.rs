//! Stage catalog: the fixed processing pipeline and its SLA deadlines.
//!
//! Every sample moves through the same ordered sequence of six stages,
//! each with a deadline in minutes. The catalog is process-wide,
//! immutable configuration; its order defines the canonical stage
//! sequence for every sample.

use serde::{Deserialize, Serialize};

use crate::models::StageRecord;

/// A single processing stage and its SLA deadline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageDefinition {
    /// Stage name (unique within the catalog).
    pub name: String,
    /// Maximum allowed duration (minutes) before the stage counts as
    /// non-compliant.
    pub deadline_minutes: u32,
}

impl StageDefinition {
    /// Creates a stage definition.
    pub fn new(name: impl Into<String>, deadline_minutes: u32) -> Self {
        Self {
            name: name.into(),
            deadline_minutes,
        }
    }
}

/// The ordered, fixed set of processing stages.
///
/// Immutable for the process lifetime. Samples carry one [`StageRecord`]
/// per catalog entry, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageCatalog {
    stages: Vec<StageDefinition>,
}

impl StageCatalog {
    /// The standard six-stage laboratory pipeline.
    ///
    /// Deadlines sum to 500 minutes, the published full-sheet SLA.
    pub fn standard() -> Self {
        Self {
            stages: vec![
                StageDefinition::new("Ingreso", 5),
                StageDefinition::new("Pesaje", 70),
                StageDefinition::new("Ataque", 300),
                StageDefinition::new("Lectura", 60),
                StageDefinition::new("Reporte", 60),
                StageDefinition::new("Validación de resultados", 5),
            ],
        }
    }

    /// Stage definitions in pipeline order.
    pub fn stages(&self) -> &[StageDefinition] {
        &self.stages
    }

    /// Number of stages.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Whether the catalog has no stages.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Looks up a stage definition by name.
    pub fn get(&self, name: &str) -> Option<&StageDefinition> {
        self.stages.iter().find(|s| s.name == name)
    }

    /// Whether a stage name exists in the catalog.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Sum of all stage deadlines (minutes).
    pub fn total_deadline_minutes(&self) -> u32 {
        self.stages.iter().map(|s| s.deadline_minutes).sum()
    }

    /// Published SLA label for a full sheet, e.g. `"8h 20m"`.
    pub fn sla_label(&self) -> String {
        let total = self.total_deadline_minutes();
        format!("{}h {}m", total / 60, total % 60)
    }

    /// Fresh, unset stage records in catalog order.
    ///
    /// Each call allocates a new vector so no two samples ever share
    /// records.
    pub fn fresh_records(&self) -> Vec<StageRecord> {
        self.stages
            .iter()
            .map(|s| StageRecord::unset(s.name.clone()))
            .collect()
    }
}

impl Default for StageCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

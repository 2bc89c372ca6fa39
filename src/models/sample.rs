//! Sample model and material-type classification.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::StageRecord;

/// Sentinel analyst marker for samples not yet assigned to anyone.
pub const ANALYST_UNASSIGNED: &str = "—";

/// Sample material classification.
///
/// Exactly two values; the intake boundary uses the localized labels
/// `"Metálico"` / `"No Metálico"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SampleType {
    Metallic,
    NonMetallic,
}

impl SampleType {
    /// Parses a boundary label. Anything other than the two known
    /// labels is rejected.
    pub fn parse_label(label: &str) -> Option<Self> {
        match label {
            "Metálico" => Some(Self::Metallic),
            "No Metálico" => Some(Self::NonMetallic),
            _ => None,
        }
    }

    /// The boundary label for this type.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Metallic => "Metálico",
            Self::NonMetallic => "No Metálico",
        }
    }
}

/// A single specimen tracked through the fixed stage sequence.
///
/// Carries one [`StageRecord`] per catalog stage, in catalog order.
/// The stage vector is an independently owned copy built at creation
/// time; samples never share records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    /// Caller-supplied identifier, unique within the owning sheet only.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// When the sample entered the system.
    pub added_at: DateTime<Utc>,
    /// Material classification.
    pub sample_type: SampleType,
    /// Assigned analyst, or [`ANALYST_UNASSIGNED`].
    pub analyst: String,
    /// Stage records, one per catalog stage, in catalog order.
    pub stages: Vec<StageRecord>,
}

impl Sample {
    /// The record for the named stage.
    pub fn stage(&self, name: &str) -> Option<&StageRecord> {
        self.stages.iter().find(|s| s.name == name)
    }

    /// Mutable record for the named stage.
    pub fn stage_mut(&mut self, name: &str) -> Option<&mut StageRecord> {
        self.stages.iter_mut().find(|s| s.name == name)
    }

    /// Number of completed stages.
    pub fn completed_stage_count(&self) -> usize {
        self.stages.iter().filter(|s| s.completed).count()
    }

    /// Whether every stage is completed.
    pub fn is_complete(&self) -> bool {
        self.stages.iter().all(|s| s.completed)
    }
}

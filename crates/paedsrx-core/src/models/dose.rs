use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::condition::MedicationLine;
use crate::severity::Severity;

/// Which configured bound, if any, changed the weight-scaled dose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum DoseLimit {
    None,
    Minimum,
    Maximum,
}

/// A weight-based dose for one medication. Created fresh per call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DoseResult {
    pub medication: String,
    pub condition: String,
    pub line: MedicationLine,
    /// Kilograms.
    pub patient_weight: f64,
    pub dose_per_kg: f64,
    /// Weight-scaled dose before bounds are applied.
    pub calculated_dose: f64,
    /// Dose after the configured minimum and maximum.
    pub final_dose: f64,
    pub unit: String,
    pub route: String,
    pub frequency: String,
    pub duration: Option<String>,
    pub min_dose: Option<f64>,
    pub max_dose: Option<f64>,
    pub limiting_bound: DoseLimit,
    pub contraindications: Vec<String>,
    pub severity: Option<Severity>,
    pub rationale: String,
}

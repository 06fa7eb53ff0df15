use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::dose::DoseResult;
use super::patient::{PatientRecord, limits};
use crate::error::ClinicalError;
use crate::severity::Severity;

/// Patient facts carried into a treatment plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PatientSummary {
    pub age: Option<u32>,
    pub weight: Option<f64>,
    #[serde(default)]
    pub symptoms: Vec<String>,
}

impl PatientSummary {
    pub fn validate(&self) -> Result<(), ClinicalError> {
        if let Some(age) = self.age {
            limits::AGE_YEARS.check("age", f64::from(age))?;
        }
        if let Some(weight) = self.weight {
            limits::WEIGHT_KG.check("weight", weight)?;
        }
        Ok(())
    }
}

impl From<&PatientRecord> for PatientSummary {
    fn from(record: &PatientRecord) -> Self {
        PatientSummary {
            age: record.age,
            weight: record.weight,
            symptoms: record.symptoms.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MonitoringPlan {
    pub frequency: String,
    pub parameters: Vec<String>,
    pub duration: String,
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FollowUpPlan {
    pub timeline: String,
    pub instructions: Vec<String>,
    pub parent_education: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SafetyNetting {
    pub advice: String,
    pub warning_signs: Vec<String>,
}

/// Which guideline a plan was built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GuidelineProvenance {
    pub id: String,
    pub name: Option<String>,
    pub version: Option<String>,
    pub source: Option<String>,
    pub last_updated: Option<String>,
}

/// A complete treatment plan. Not mutated after construction.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TreatmentPlan {
    pub id: Uuid,
    pub condition: String,
    pub condition_id: String,
    pub severity: Severity,
    pub patient_summary: PatientSummary,
    pub immediate_actions: Vec<String>,
    pub medications: Vec<DoseResult>,
    pub monitoring: MonitoringPlan,
    pub follow_up: FollowUpPlan,
    pub discharge_criteria: Vec<String>,
    pub safety_netting: SafetyNetting,
    pub red_flags: Vec<String>,
    pub clinical_pearls: Vec<String>,
    pub differential_diagnosis: Vec<String>,
    pub guideline: Option<GuidelineProvenance>,
    pub generated_at: jiff::Timestamp,
}

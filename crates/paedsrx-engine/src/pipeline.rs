use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use ts_rs::TS;

use paedsrx_core::models::dose::DoseResult;
use paedsrx_core::models::matching::MatchResult;
use paedsrx_core::models::patient::PatientRecord;
use paedsrx_core::models::plan::{PatientSummary, TreatmentPlan};
use paedsrx_core::{ClinicalError, ErrorKind, Severity};
use paedsrx_knowledge::KnowledgeStore;

use crate::{dosing, matcher, planner};

/// Caller choices for one pipeline run.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PipelineOptions {
    /// Overrides the severity read from the assessment.
    #[serde(default)]
    pub severity: Option<Severity>,
    /// Used when neither a requested nor an assessed severity is available.
    #[serde(default)]
    pub fallback_severity: Severity,
    /// Medications to dose. Empty means every first-line medication of the
    /// matched condition.
    #[serde(default)]
    pub medications: Vec<String>,
}

/// Everything produced for one clinical note.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct PipelineOutcome {
    pub record: PatientRecord,
    pub matches: MatchResult,
    pub doses: Vec<DoseResult>,
    pub plan: TreatmentPlan,
    /// Medications left out of the plan, with the reason.
    pub warnings: Vec<String>,
}

/// Runs extract, match, dose, and assemble against a shared store.
#[derive(Debug, Clone)]
pub struct Pipeline {
    store: Arc<KnowledgeStore>,
}

impl Pipeline {
    pub fn new(store: Arc<KnowledgeStore>) -> Self {
        Pipeline { store }
    }

    pub fn store(&self) -> &KnowledgeStore {
        &self.store
    }

    pub fn run(
        &self,
        note: &str,
        options: &PipelineOptions,
    ) -> Result<PipelineOutcome, ClinicalError> {
        let record = paedsrx_extract::extract(note);

        let matches = matcher::match_conditions(
            &self.store,
            &record.symptoms,
            record.assessment(),
            record.age,
        )?;
        let Some(top) = matches.top_match.as_ref() else {
            return Err(ClinicalError::insufficient(
                "no known condition matches the presented symptoms",
            ));
        };

        let severity = options
            .severity
            .or(top.severity_assessment)
            .unwrap_or(options.fallback_severity);

        let Some(weight) = record.weight else {
            return Err(ClinicalError::insufficient(
                "patient weight is required for dosing",
            ));
        };

        let medications = if options.medications.is_empty() {
            self.store
                .resolve_condition(&top.condition_id)?
                .first_line_medications()
        } else {
            options.medications.clone()
        };

        let mut doses = Vec::with_capacity(medications.len());
        let mut warnings = Vec::new();
        for medication in &medications {
            match dosing::calculate_dose(
                &self.store,
                medication,
                &top.condition_id,
                weight,
                Some(severity),
            ) {
                Ok(dose) => doses.push(dose),
                Err(e) if e.kind() == ErrorKind::InvalidDoseConfig => {
                    warn!(medication = %medication, error = %e, "skipping medication");
                    warnings.push(e.to_string());
                }
                Err(e) => return Err(e),
            }
        }

        let plan = planner::assemble(
            &self.store,
            &top.condition_id,
            severity,
            &PatientSummary::from(&record),
            doses.clone(),
        )?;

        info!(
            condition = %plan.condition_id,
            severity = %severity,
            doses = doses.len(),
            warnings = warnings.len(),
            "pipeline complete"
        );

        Ok(PipelineOutcome {
            record,
            matches,
            doses,
            plan,
            warnings,
        })
    }
}

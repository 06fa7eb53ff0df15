//! Treatment plan assembly.
//!
//! A plan combines the condition entry, the severity branch of the
//! covering guideline's decision tree, and doses computed beforehand.
//! A condition without a guideline still gets a plan built from generic
//! supportive-care defaults; any severity branch field the guideline
//! leaves out falls back to the same defaults.

use tracing::{info, warn};
use uuid::Uuid;

use paedsrx_core::models::dose::DoseResult;
use paedsrx_core::models::guideline::{
    BranchDetail, GuidelineEntry, MonitoringSpec, SeverityBranch,
};
use paedsrx_core::models::plan::{
    FollowUpPlan, GuidelineProvenance, MonitoringPlan, PatientSummary, SafetyNetting,
    TreatmentPlan,
};
use paedsrx_core::{ClinicalError, Severity};
use paedsrx_knowledge::KnowledgeStore;

/// Generic content used when no guideline (or no guideline entry) applies.
pub mod defaults {
    pub const IMMEDIATE_ACTIONS: [&str; 3] = [
        "Supportive care",
        "Monitor symptoms",
        "Ensure adequate hydration",
    ];
    pub const MONITORING_FREQUENCY: &str = "regular";
    pub const MONITORING_PARAMETERS: [&str; 2] = ["vital signs", "symptom progression"];
    pub const MONITORING_DURATION: &str = "until improvement";
    pub const FOLLOW_UP_TIMELINE: &str = "routine";
    pub const FOLLOW_UP_INSTRUCTIONS: [&str; 1] = ["Follow up with primary care provider"];
    pub const DISCHARGE_CRITERIA: [&str; 3] = [
        "Stable vital signs",
        "Improved symptoms",
        "Adequate oral intake",
    ];
    pub const SAFETY_NETTING_ADVICE: &str = "Return if symptoms worsen";
    pub const WARNING_SIGNS: [&str; 3] = [
        "Increased difficulty breathing",
        "High fever",
        "Poor feeding",
    ];
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn or_default(items: &[String], fallback: &[&str]) -> Vec<String> {
    if items.is_empty() {
        owned(fallback)
    } else {
        items.to_vec()
    }
}

/// Build a treatment plan. `doses` are embedded as given.
pub fn assemble(
    store: &KnowledgeStore,
    condition: &str,
    severity: Severity,
    patient: &PatientSummary,
    doses: Vec<DoseResult>,
) -> Result<TreatmentPlan, ClinicalError> {
    patient.validate()?;
    let entry = store.resolve_condition(condition)?;
    let guideline = store.guideline_for(&entry.id);

    let branch = match guideline {
        Some(g) => match g.branch(severity) {
            Some(SeverityBranch::Detailed(detail)) => Some(detail),
            Some(SeverityBranch::Summary(_)) | None => {
                warn!(
                    guideline = %g.id,
                    severity = %severity,
                    "guideline has no detailed branch for severity, using defaults"
                );
                None
            }
        },
        None => {
            info!(condition = %entry.id, "no guideline covers condition, using defaults");
            None
        }
    };

    let plan = TreatmentPlan {
        id: Uuid::new_v4(),
        condition: entry.name.clone(),
        condition_id: entry.id.clone(),
        severity,
        patient_summary: patient.clone(),
        immediate_actions: immediate_actions(branch),
        medications: doses,
        monitoring: monitoring(branch),
        follow_up: follow_up(guideline, branch, severity),
        discharge_criteria: discharge_criteria(branch),
        safety_netting: safety_netting(guideline, branch),
        red_flags: entry.red_flags.clone(),
        clinical_pearls: entry.clinical_pearls.clone(),
        differential_diagnosis: entry.differential_diagnosis.clone(),
        guideline: guideline.map(provenance),
        generated_at: jiff::Timestamp::now(),
    };

    info!(
        plan_id = %plan.id,
        condition = %plan.condition_id,
        severity = %severity,
        medications = plan.medications.len(),
        guideline = plan.guideline.as_ref().map(|g| g.id.as_str()).unwrap_or("none"),
        "treatment plan assembled"
    );
    Ok(plan)
}

fn immediate_actions(branch: Option<&BranchDetail>) -> Vec<String> {
    let actions = branch.map(|b| b.immediate_actions.as_slice()).unwrap_or(&[]);
    or_default(actions, &defaults::IMMEDIATE_ACTIONS)
}

fn monitoring(branch: Option<&BranchDetail>) -> MonitoringPlan {
    let generic = MonitoringPlan {
        frequency: defaults::MONITORING_FREQUENCY.to_string(),
        parameters: owned(&defaults::MONITORING_PARAMETERS),
        duration: defaults::MONITORING_DURATION.to_string(),
        location: None,
    };
    match branch.and_then(|b| b.monitoring.as_ref()) {
        Some(MonitoringSpec::Detailed {
            frequency,
            parameters,
            duration,
            location,
        }) => MonitoringPlan {
            frequency: frequency.clone().unwrap_or(generic.frequency),
            parameters: or_default(parameters, &defaults::MONITORING_PARAMETERS),
            duration: duration.clone().unwrap_or(generic.duration),
            location: location.clone(),
        },
        Some(MonitoringSpec::Summary(_)) | None => generic,
    }
}

fn follow_up(
    guideline: Option<&GuidelineEntry>,
    branch: Option<&BranchDetail>,
    severity: Severity,
) -> FollowUpPlan {
    let timeline = branch
        .and_then(|b| b.follow_up.clone())
        .unwrap_or_else(|| defaults::FOLLOW_UP_TIMELINE.to_string());

    let guideline_follow_up = guideline.and_then(|g| g.follow_up.as_ref());
    let instructions = guideline_follow_up
        .and_then(|f| f.instruction_for(severity))
        .map(|text| vec![text.to_string()])
        .unwrap_or_else(|| owned(&defaults::FOLLOW_UP_INSTRUCTIONS));
    let parent_education = guideline_follow_up
        .map(|f| f.parent_education().to_vec())
        .unwrap_or_default();

    FollowUpPlan {
        timeline,
        instructions,
        parent_education,
    }
}

fn discharge_criteria(branch: Option<&BranchDetail>) -> Vec<String> {
    let criteria = branch.map(|b| b.discharge_criteria.as_slice()).unwrap_or(&[]);
    or_default(criteria, &defaults::DISCHARGE_CRITERIA)
}

fn safety_netting(
    guideline: Option<&GuidelineEntry>,
    branch: Option<&BranchDetail>,
) -> SafetyNetting {
    let advice = branch
        .and_then(|b| b.safety_netting.clone())
        .unwrap_or_else(|| defaults::SAFETY_NETTING_ADVICE.to_string());
    let signs = guideline.map(|g| g.deterioration_signs()).unwrap_or(&[]);
    SafetyNetting {
        advice,
        warning_signs: or_default(signs, &defaults::WARNING_SIGNS),
    }
}

fn provenance(guideline: &GuidelineEntry) -> GuidelineProvenance {
    GuidelineProvenance {
        id: guideline.id.clone(),
        name: guideline.name.clone(),
        version: guideline.version.clone(),
        source: guideline.source.clone(),
        last_updated: guideline.last_updated.clone(),
    }
}

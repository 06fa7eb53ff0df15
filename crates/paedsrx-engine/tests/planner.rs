use paedsrx_core::models::plan::PatientSummary;
use paedsrx_core::{ErrorKind, Severity};
use paedsrx_engine::dosing::calculate_dose;
use paedsrx_engine::planner::{assemble, defaults};
use paedsrx_knowledge::{DirectorySource, KnowledgeStore, StaticSource};

const DATA_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../data");

async fn store() -> KnowledgeStore {
    KnowledgeStore::load(&DirectorySource::new(DATA_DIR))
        .await
        .unwrap()
}

fn child() -> PatientSummary {
    PatientSummary {
        age: Some(3),
        weight: Some(14.2),
        symptoms: vec!["barky cough".to_string(), "stridor".to_string()],
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn moderate_croup_follows_guideline() {
    let store = store().await;
    let dose = calculate_dose(&store, "dexamethasone", "croup", 14.2, Some(Severity::Moderate))
        .unwrap();
    let plan = assemble(&store, "croup", Severity::Moderate, &child(), vec![dose.clone()]).unwrap();

    assert_eq!(plan.condition_id, "croup");
    assert_eq!(plan.condition, "Croup (Laryngotracheobronchitis)");
    assert_eq!(plan.severity, Severity::Moderate);
    assert_eq!(plan.medications, vec![dose]);
    assert_eq!(plan.patient_summary, child());

    assert_eq!(plan.immediate_actions[0], "Oral dexamethasone or prednisolone");
    assert_eq!(plan.monitoring.frequency, "hourly");
    assert_eq!(plan.monitoring.location.as_deref(), Some("emergency department"));
    assert_eq!(plan.follow_up.timeline, "review in 24 hours");
    assert_eq!(plan.follow_up.instructions, strings(&["Review within 24 hours"]));
    assert_eq!(plan.follow_up.parent_education.len(), 2);
    assert_eq!(
        plan.safety_netting.advice,
        "Return if stridor at rest, drooling or difficulty swallowing"
    );
    assert_eq!(
        plan.safety_netting.warning_signs,
        strings(&[
            "Stridor at rest",
            "Increasing recession",
            "Agitation or lethargy",
            "Cyanosis",
        ])
    );

    let guideline = plan.guideline.unwrap();
    assert_eq!(guideline.id, "pediatric_croup_2023");
    assert_eq!(guideline.version.as_deref(), Some("1.0"));
    assert_eq!(
        guideline.source.as_deref(),
        Some("Pediatric Emergency Medicine Society")
    );
}

#[tokio::test]
async fn red_flags_and_pearls_are_copied_verbatim() {
    let store = store().await;
    let plan = assemble(&store, "croup", Severity::Mild, &child(), vec![]).unwrap();
    let croup = store.condition("croup").unwrap();
    assert_eq!(plan.red_flags, croup.red_flags);
    assert_eq!(plan.clinical_pearls, croup.clinical_pearls);
    assert_eq!(plan.differential_diagnosis, croup.differential_diagnosis);
    assert!(!plan.red_flags.is_empty());
}

#[tokio::test]
async fn missing_branch_field_falls_back_to_default() {
    let store = store().await;
    let plan = assemble(&store, "croup", Severity::Severe, &child(), vec![]).unwrap();
    assert_eq!(plan.safety_netting.advice, defaults::SAFETY_NETTING_ADVICE);
    assert_eq!(plan.discharge_criteria, strings(&["Stridor resolved for 12 hours"]));
    assert_eq!(plan.follow_up.timeline, "inpatient");
}

#[tokio::test]
async fn condition_without_guideline_uses_generic_plan() {
    let store = store().await;
    let plan = assemble(&store, "asthma", Severity::Moderate, &child(), vec![]).unwrap();

    assert!(plan.guideline.is_none());
    assert_eq!(plan.immediate_actions, strings(&defaults::IMMEDIATE_ACTIONS));
    assert_eq!(plan.monitoring.frequency, defaults::MONITORING_FREQUENCY);
    assert_eq!(plan.monitoring.parameters, strings(&defaults::MONITORING_PARAMETERS));
    assert_eq!(plan.monitoring.duration, defaults::MONITORING_DURATION);
    assert_eq!(plan.follow_up.timeline, defaults::FOLLOW_UP_TIMELINE);
    assert_eq!(plan.follow_up.instructions, strings(&defaults::FOLLOW_UP_INSTRUCTIONS));
    assert_eq!(plan.discharge_criteria, strings(&defaults::DISCHARGE_CRITERIA));
    assert_eq!(plan.safety_netting.advice, defaults::SAFETY_NETTING_ADVICE);
    assert_eq!(plan.safety_netting.warning_signs, strings(&defaults::WARNING_SIGNS));
}

#[tokio::test]
async fn summary_only_guideline_keeps_provenance() {
    let store = store().await;
    let plan = assemble(&store, "bronchiolitis", Severity::Mild, &child(), vec![]).unwrap();

    assert_eq!(plan.guideline.unwrap().id, "bronchiolitis_2022");
    assert_eq!(plan.immediate_actions, strings(&defaults::IMMEDIATE_ACTIONS));
    assert_eq!(
        plan.follow_up.instructions,
        strings(&["Return if symptoms worsen or fail to improve in 24-48 hours"])
    );
    assert_eq!(plan.safety_netting.warning_signs, strings(&defaults::WARNING_SIGNS));
}

#[tokio::test]
async fn unknown_condition_fails() {
    let store = store().await;
    let err = assemble(&store, "measles", Severity::Mild, &child(), vec![]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ConditionNotFound);
}

#[tokio::test]
async fn invalid_patient_summary_fails() {
    let store = store().await;
    let patient = PatientSummary {
        weight: Some(900.0),
        ..child()
    };
    let err = assemble(&store, "croup", Severity::Mild, &patient, vec![]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidPatientData);
}

#[tokio::test]
async fn every_plan_gets_a_fresh_id() {
    let store = store().await;
    let a = assemble(&store, "croup", Severity::Mild, &child(), vec![]).unwrap();
    let b = assemble(&store, "croup", Severity::Mild, &child(), vec![]).unwrap();
    assert_ne!(a.id, b.id);
}

#[tokio::test]
async fn summary_monitoring_falls_back_to_generic() {
    let conditions = r#"{
        "croup": {
            "name": "Croup",
            "age_groups": ["pediatric"],
            "symptoms": {"primary": ["barky cough"]}
        }
    }"#;
    let guidelines = r#"{
        "croup_local": {
            "conditions": ["croup"],
            "decision_tree": {
                "treatment_algorithm": {
                    "moderate": {
                        "immediate_actions": ["Oral dexamethasone"],
                        "monitoring": "observe closely for four hours"
                    }
                }
            }
        }
    }"#;
    let store = KnowledgeStore::load(&StaticSource::new(conditions, guidelines))
        .await
        .unwrap();
    let plan = assemble(&store, "croup", Severity::Moderate, &child(), vec![]).unwrap();

    assert_eq!(plan.immediate_actions, strings(&["Oral dexamethasone"]));
    assert_eq!(plan.monitoring.frequency, defaults::MONITORING_FREQUENCY);
    assert_eq!(
        plan.monitoring.parameters,
        strings(&defaults::MONITORING_PARAMETERS)
    );
    assert_eq!(plan.monitoring.duration, defaults::MONITORING_DURATION);
    assert!(plan.monitoring.location.is_none());
}

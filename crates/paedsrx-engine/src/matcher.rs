//! Heuristic condition matching.
//!
//! Every condition in the store is scored against the patient's symptoms,
//! the free-text assessment, and age. This is a deterministic ranking aid,
//! not a diagnosis.

use tracing::info;

use paedsrx_core::models::condition::{AgeGroup, ConditionEntry};
use paedsrx_core::models::matching::{ConditionMatch, MatchResult};
use paedsrx_core::{ClinicalError, Severity};
use paedsrx_knowledge::KnowledgeStore;

/// Points per patient symptom found among a condition's primary symptoms.
pub const SYMPTOM_WEIGHT: u32 = 2;
/// Points when the condition's name appears in the assessment.
pub const ASSESSMENT_WEIGHT: u32 = 3;
/// Points when the patient's age group is one the condition lists.
pub const AGE_GROUP_WEIGHT: u32 = 1;

/// Ages below this are pediatric.
pub const ADULT_AGE: u32 = 18;

/// Words signalling each severity, checked most severe first.
const SEVERITY_WORDS: &[(Severity, &[&str])] = &[
    (Severity::Severe, &["life-threatening", "critical", "severe"]),
    (Severity::Moderate, &["moderate"]),
    (Severity::Mild, &["mild"]),
];

/// Score and rank every condition. Zero-scoring conditions are dropped;
/// ties keep the store's ascending-identifier order.
pub fn match_conditions(
    store: &KnowledgeStore,
    symptoms: &[String],
    assessment: &str,
    age: Option<u32>,
) -> Result<MatchResult, ClinicalError> {
    // (as given, comparison form)
    let symptoms: Vec<(&str, String)> = symptoms
        .iter()
        .map(|s| (s.as_str(), s.trim().to_lowercase()))
        .filter(|(_, needle)| !needle.is_empty())
        .collect();
    let assessment = assessment.trim().to_lowercase();

    if symptoms.is_empty() && assessment.is_empty() {
        return Err(ClinicalError::insufficient(
            "no symptoms or assessment to match against",
        ));
    }

    let severity = assess_severity(&assessment);
    let mut matches: Vec<ConditionMatch> = store
        .conditions()
        .values()
        .filter_map(|condition| {
            let (score, matched_symptoms) = score(condition, &symptoms, &assessment, age);
            (score > 0).then(|| ConditionMatch {
                condition_id: condition.id.clone(),
                condition_name: condition.name.clone(),
                confidence_score: score,
                matched_symptoms,
                severity_assessment: severity,
            })
        })
        .collect();

    // sort_by is stable
    matches.sort_by(|a, b| b.confidence_score.cmp(&a.confidence_score));

    info!(
        candidates = matches.len(),
        top = matches.first().map(|m| m.condition_id.as_str()).unwrap_or("none"),
        "conditions matched"
    );
    Ok(MatchResult::from_ranked(matches))
}

/// Score one condition. The assessment and each symptom's comparison form
/// are already lowercased; matched symptoms are reported as given.
fn score(
    condition: &ConditionEntry,
    symptoms: &[(&str, String)],
    assessment: &str,
    age: Option<u32>,
) -> (u32, Vec<String>) {
    let primary: Vec<String> = condition
        .symptoms
        .primary
        .iter()
        .map(|p| p.to_lowercase())
        .collect();

    let matched: Vec<String> = symptoms
        .iter()
        .filter(|(_, needle)| primary.iter().any(|p| p.contains(needle.as_str())))
        .map(|(given, _)| given.to_string())
        .collect();
    let mut score = SYMPTOM_WEIGHT * matched.len() as u32;

    if !assessment.is_empty() && assessment.contains(&condition.name.to_lowercase()) {
        score += ASSESSMENT_WEIGHT;
    }

    if let Some(age) = age {
        let group = if age < ADULT_AGE {
            AgeGroup::Pediatric
        } else {
            AgeGroup::Adult
        };
        if condition.applies_to(group) {
            score += AGE_GROUP_WEIGHT;
        }
    }

    (score, matched)
}

/// The most severe level named in the assessment, if any.
pub fn assess_severity(assessment: &str) -> Option<Severity> {
    let text = assessment.to_lowercase();
    SEVERITY_WORDS
        .iter()
        .find(|(_, words)| words.iter().any(|w| text.contains(w)))
        .map(|(severity, _)| *severity)
}

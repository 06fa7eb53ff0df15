use paedsrx_core::{ErrorKind, Severity};
use paedsrx_engine::matcher::{assess_severity, match_conditions};
use paedsrx_knowledge::{DirectorySource, KnowledgeStore};

const DATA_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../data");

async fn store() -> KnowledgeStore {
    KnowledgeStore::load(&DirectorySource::new(DATA_DIR))
        .await
        .unwrap()
}

fn symptoms(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn croup_symptoms_rank_croup_first() {
    let store = store().await;
    let result = match_conditions(
        &store,
        &symptoms(&["barky cough", "hoarse voice", "stridor"]),
        "",
        Some(3),
    )
    .unwrap();

    let ranked: Vec<(&str, u32)> = result
        .matches
        .iter()
        .map(|m| (m.condition_id.as_str(), m.confidence_score))
        .collect();
    assert_eq!(
        ranked,
        vec![
            ("croup", 7),
            ("bacterial_tracheitis", 5),
            ("asthma", 1),
            ("bronchiolitis", 1),
        ]
    );
    assert_eq!(result.top_match.unwrap().condition_id, "croup");
}

#[tokio::test]
async fn assessment_name_adds_three() {
    let store = store().await;
    let result = match_conditions(
        &store,
        &[],
        "Moderate croup (laryngotracheobronchitis), likely viral",
        None,
    )
    .unwrap();

    assert_eq!(result.matches.len(), 1);
    let top = result.top_match.unwrap();
    assert_eq!(top.condition_id, "croup");
    assert_eq!(top.confidence_score, 3);
    assert_eq!(top.severity_assessment, Some(Severity::Moderate));
}

#[tokio::test]
async fn ties_keep_ascending_identifier_order() {
    let store = store().await;
    let result = match_conditions(&store, &symptoms(&["wheeze"]), "", Some(1)).unwrap();
    let ids: Vec<&str> = result
        .matches
        .iter()
        .map(|m| m.condition_id.as_str())
        .collect();
    assert_eq!(&ids[..2], &["asthma", "bronchiolitis"]);
    assert_eq!(result.matches[0].confidence_score, 3);
    assert_eq!(result.matches[1].confidence_score, 3);
}

#[tokio::test]
async fn adult_age_only_scores_adult_conditions() {
    let store = store().await;
    let result = match_conditions(&store, &symptoms(&["wheeze"]), "", Some(30)).unwrap();
    let top = result.top_match.unwrap();
    assert_eq!(top.condition_id, "asthma");
    assert_eq!(top.confidence_score, 3);
    assert_eq!(result.matches[1].condition_id, "bronchiolitis");
    assert_eq!(result.matches[1].confidence_score, 2);
}

#[tokio::test]
async fn partial_symptom_matches_primary_phrase() {
    let store = store().await;
    let result = match_conditions(&store, &symptoms(&["Cough"]), "", None).unwrap();
    let croup = result
        .matches
        .iter()
        .find(|m| m.condition_id == "croup")
        .unwrap();
    assert_eq!(croup.confidence_score, 2);
    assert_eq!(croup.matched_symptoms, vec!["Cough"]);
}

#[tokio::test]
async fn matched_symptoms_are_reported_as_given() {
    let store = store().await;
    let result = match_conditions(
        &store,
        &symptoms(&["Barky Cough", " HOARSE VOICE ", ""]),
        "",
        None,
    )
    .unwrap();
    let top = result.top_match.unwrap();
    assert_eq!(top.condition_id, "croup");
    assert_eq!(top.confidence_score, 4);
    assert_eq!(top.matched_symptoms, vec!["Barky Cough", " HOARSE VOICE "]);
}

#[tokio::test]
async fn moderate_croup_assessment_ranks_croup_first() {
    let store = store().await;
    let result = match_conditions(
        &store,
        &symptoms(&["barky cough", "hoarse voice", "stridor"]),
        "moderate croup",
        Some(3),
    )
    .unwrap();
    let top = result.top_match.unwrap();
    assert_eq!(top.condition_id, "croup");
    assert_eq!(top.confidence_score, 7);
    assert_eq!(top.severity_assessment, Some(Severity::Moderate));
    assert!(result.matches[1..].iter().all(|m| m.confidence_score < 7));
}

#[tokio::test]
async fn zero_scores_are_excluded() {
    let store = store().await;
    let result = match_conditions(&store, &symptoms(&["rash"]), "", None).unwrap();
    assert!(result.matches.is_empty());
    assert!(result.top_match.is_none());
}

#[tokio::test]
async fn no_symptoms_and_no_assessment_is_insufficient() {
    let store = store().await;
    let err = match_conditions(&store, &symptoms(&["  "]), "   ", Some(4)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InsufficientInput);
    assert!(err.is_recoverable());
}

#[test]
fn most_severe_word_wins() {
    assert_eq!(
        assess_severity("Mild stridor, now severe distress"),
        Some(Severity::Severe)
    );
    assert_eq!(assess_severity("Life-threatening airway"), Some(Severity::Severe));
    assert_eq!(assess_severity("mild croup"), Some(Severity::Mild));
    assert_eq!(assess_severity("viral croup"), None);
}

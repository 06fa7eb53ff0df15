use paedsrx_core::ErrorKind;
use paedsrx_knowledge::store::{load_conditions, load_guidelines};
use paedsrx_knowledge::{DirectorySource, KnowledgeStore, StaticSource};

const DATA_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../data");

const ONE_CONDITION: &str = r#"{
    "croup": {
        "name": "Croup",
        "age_groups": ["pediatric"],
        "symptoms": {"primary": ["barky cough"]},
        "medications": {"first_line": {"dexamethasone": {"dose_mg_per_kg": 0.15}}}
    }
}"#;

#[tokio::test]
async fn loads_bundled_documents() {
    let store = KnowledgeStore::load(&DirectorySource::new(DATA_DIR)).await.unwrap();

    let croup = store.condition("croup").unwrap();
    assert_eq!(croup.id, "croup");
    assert!(croup.find_medication("dexamethasone").is_some());

    let guideline = store.guideline_for("croup").unwrap();
    assert_eq!(guideline.id, "pediatric_croup_2023");
    assert!(store.guideline_for("asthma").is_none());
}

#[tokio::test]
async fn condition_ids_iterate_in_ascending_order() {
    let store = KnowledgeStore::load(&DirectorySource::new(DATA_DIR)).await.unwrap();
    let ids = store.condition_ids();
    let mut sorted = ids.clone();
    sorted.sort();
    assert_eq!(ids, sorted);
}

#[tokio::test]
async fn missing_directory_is_data_unavailable() {
    let source = DirectorySource::new("/nonexistent/paedsrx-data");
    let err = KnowledgeStore::load(&source).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DataUnavailable);
    assert!(!err.is_recoverable());
    assert!(err.to_string().contains("conditions"));
}

#[tokio::test]
async fn invalid_json_is_data_unavailable() {
    let source = StaticSource::new("{not json", "{}");
    let err = load_conditions(&source).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DataUnavailable);
}

#[tokio::test]
async fn non_object_document_is_data_unavailable() {
    let source = StaticSource::new("[]", "{}");
    let err = load_conditions(&source).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DataUnavailable);
}

#[tokio::test]
async fn entry_without_name_names_the_entry() {
    let source = StaticSource::new(r#"{"croup": {"symptoms": {}}}"#, "{}");
    let err = load_conditions(&source).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DataUnavailable);
    assert!(err.to_string().contains("croup"));
}

#[tokio::test]
async fn guideline_without_conditions_is_rejected() {
    let source = StaticSource::new("{}", r#"{"g1": {"name": "Empty", "conditions": []}}"#);
    let err = load_guidelines(&source).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DataUnavailable);
}

#[tokio::test]
async fn condition_covered_twice_is_rejected() {
    let guidelines = r#"{
        "a": {"conditions": ["croup"]},
        "b": {"conditions": ["croup"]}
    }"#;
    let source = StaticSource::new(ONE_CONDITION, guidelines);
    let err = KnowledgeStore::load(&source).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DataUnavailable);
}

#[tokio::test]
async fn resolves_condition_by_display_name() {
    let store = KnowledgeStore::load(&StaticSource::new(ONE_CONDITION, "{}"))
        .await
        .unwrap();
    assert_eq!(store.resolve_condition("CROUP").unwrap().id, "croup");
    assert_eq!(store.resolve_condition("croup").unwrap().name, "Croup");

    let err = store.resolve_condition("measles").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ConditionNotFound);
    assert_eq!(err.context().unwrap()["available_conditions"][0], "croup");
}

#[tokio::test]
async fn repeated_loads_are_identical() {
    let source = DirectorySource::new(DATA_DIR);
    let first = load_conditions(&source).await.unwrap();
    let second = load_conditions(&source).await.unwrap();
    assert_eq!(
        first.keys().collect::<Vec<_>>(),
        second.keys().collect::<Vec<_>>()
    );
}

#[tokio::test]
async fn refresh_leaves_existing_store_untouched() {
    let store = KnowledgeStore::load(&StaticSource::new(ONE_CONDITION, "{}"))
        .await
        .unwrap();
    let refreshed = store
        .refresh(&DirectorySource::new(DATA_DIR))
        .await
        .unwrap();

    assert_eq!(store.conditions().len(), 1);
    assert!(refreshed.conditions().len() > 1);
}

#[tokio::test]
async fn mixed_severity_scale_shapes_parse() {
    let store = KnowledgeStore::load(&DirectorySource::new(DATA_DIR)).await.unwrap();
    let croup = store.condition("croup").unwrap();
    assert!(croup.severity_scales.contains_key("mild"));
    assert!(croup.severity_scales.contains_key("critical"));
}

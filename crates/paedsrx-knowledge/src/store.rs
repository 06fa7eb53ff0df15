use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use tracing::{info, warn};

use paedsrx_core::ClinicalError;
use paedsrx_core::models::condition::ConditionEntry;
use paedsrx_core::models::guideline::GuidelineEntry;

use crate::error::SourceError;
use crate::source::{DocumentKind, KnowledgeSource};

/// The loaded, immutable knowledge store.
///
/// Both maps iterate in ascending identifier order, which is the
/// tie-break order used by condition matching.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeStore {
    conditions: BTreeMap<String, ConditionEntry>,
    guidelines: BTreeMap<String, GuidelineEntry>,
}

impl KnowledgeStore {
    /// Load and validate both documents. Either the full store or an error;
    /// never a partial result.
    pub async fn load<S: KnowledgeSource>(source: &S) -> Result<Self, ClinicalError> {
        let conditions = load_conditions(source).await?;
        let guidelines = load_guidelines(source).await?;
        let store = Self::from_maps(conditions, guidelines)?;
        info!(
            conditions = store.conditions.len(),
            guidelines = store.guidelines.len(),
            "knowledge store loaded"
        );
        Ok(store)
    }

    /// Build a fresh store from the source. `self` is left untouched, so
    /// readers holding the old store keep a consistent view.
    pub async fn refresh<S: KnowledgeSource>(&self, source: &S) -> Result<Self, ClinicalError> {
        info!("refreshing knowledge store");
        Self::load(source).await
    }

    /// Assemble a store from already-parsed maps, running the cross-document
    /// checks. Entry ids are taken from the map keys.
    pub fn from_maps(
        mut conditions: BTreeMap<String, ConditionEntry>,
        mut guidelines: BTreeMap<String, GuidelineEntry>,
    ) -> Result<Self, ClinicalError> {
        for (id, entry) in conditions.iter_mut() {
            entry.id.clone_from(id);
        }
        for (id, entry) in guidelines.iter_mut() {
            entry.id.clone_from(id);
        }

        let mut covering: BTreeMap<&str, &str> = BTreeMap::new();
        for guideline in guidelines.values() {
            for condition_id in &guideline.conditions {
                if !conditions.contains_key(condition_id) {
                    warn!(
                        guideline = %guideline.id,
                        condition = %condition_id,
                        "guideline covers a condition missing from the store"
                    );
                }
                if let Some(previous) = covering.insert(condition_id, &guideline.id) {
                    return Err(SourceError::Shape {
                        document: DocumentKind::Guidelines,
                        reason: format!(
                            "condition '{condition_id}' is covered by both '{previous}' and '{}'",
                            guideline.id
                        ),
                    }
                    .into());
                }
            }
        }

        Ok(KnowledgeStore {
            conditions,
            guidelines,
        })
    }

    pub fn conditions(&self) -> &BTreeMap<String, ConditionEntry> {
        &self.conditions
    }

    pub fn guidelines(&self) -> &BTreeMap<String, GuidelineEntry> {
        &self.guidelines
    }

    pub fn condition(&self, id: &str) -> Option<&ConditionEntry> {
        self.conditions.get(id)
    }

    pub fn condition_ids(&self) -> Vec<String> {
        self.conditions.keys().cloned().collect()
    }

    /// Look a condition up by identifier, falling back to a case-insensitive
    /// match on its display name.
    pub fn resolve_condition(&self, query: &str) -> Result<&ConditionEntry, ClinicalError> {
        let query = query.trim();
        self.conditions
            .get(query)
            .or_else(|| {
                self.conditions
                    .values()
                    .find(|c| c.name.eq_ignore_ascii_case(query))
            })
            .ok_or_else(|| ClinicalError::ConditionNotFound {
                condition: query.to_string(),
                available: self.condition_ids(),
            })
    }

    /// The guideline covering `condition_id`, if any.
    pub fn guideline_for(&self, condition_id: &str) -> Option<&GuidelineEntry> {
        self.guidelines.values().find(|g| g.covers(condition_id))
    }
}

/// Load the conditions document as a map of identifier to entry.
pub async fn load_conditions<S: KnowledgeSource>(
    source: &S,
) -> Result<BTreeMap<String, ConditionEntry>, ClinicalError> {
    let kind = DocumentKind::Conditions;
    let bytes = source.read(kind).await?;
    let mut conditions: BTreeMap<String, ConditionEntry> = parse_document(kind, &bytes)?;

    for (id, entry) in conditions.iter_mut() {
        if entry.name.trim().is_empty() {
            return Err(SourceError::Shape {
                document: kind,
                reason: format!("condition '{id}' has an empty name"),
            }
            .into());
        }
        entry.id.clone_from(id);
    }

    info!(document = %kind, count = conditions.len(), "loaded knowledge document");
    Ok(conditions)
}

/// Load the guidelines document as a map of identifier to entry.
pub async fn load_guidelines<S: KnowledgeSource>(
    source: &S,
) -> Result<BTreeMap<String, GuidelineEntry>, ClinicalError> {
    let kind = DocumentKind::Guidelines;
    let bytes = source.read(kind).await?;
    let mut guidelines: BTreeMap<String, GuidelineEntry> = parse_document(kind, &bytes)?;

    for (id, entry) in guidelines.iter_mut() {
        if entry.conditions.is_empty() {
            return Err(SourceError::Shape {
                document: kind,
                reason: format!("guideline '{id}' covers no conditions"),
            }
            .into());
        }
        entry.id.clone_from(id);
    }

    info!(document = %kind, count = guidelines.len(), "loaded knowledge document");
    Ok(guidelines)
}

/// Parse an object-shaped document, reporting the first entry that does
/// not deserialize.
fn parse_document<T: DeserializeOwned>(
    kind: DocumentKind,
    bytes: &[u8],
) -> Result<BTreeMap<String, T>, SourceError> {
    let value: serde_json::Value =
        serde_json::from_slice(bytes).map_err(|e| SourceError::Malformed {
            document: kind,
            reason: e.to_string(),
        })?;

    let serde_json::Value::Object(object) = value else {
        return Err(SourceError::Shape {
            document: kind,
            reason: "top level must be an object keyed by identifier".to_string(),
        });
    };

    object
        .into_iter()
        .map(|(id, raw)| {
            let entry = serde_json::from_value(raw).map_err(|e| SourceError::Shape {
                document: kind,
                reason: format!("entry '{id}': {e}"),
            })?;
            Ok((id, entry))
        })
        .collect()
}

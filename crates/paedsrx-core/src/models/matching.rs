use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::severity::Severity;

/// One scored candidate condition. Created fresh per matching call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ConditionMatch {
    pub condition_id: String,
    pub condition_name: String,
    pub confidence_score: u32,
    pub matched_symptoms: Vec<String>,
    pub severity_assessment: Option<Severity>,
}

/// Ranked matches, best first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MatchResult {
    pub matches: Vec<ConditionMatch>,
    pub top_match: Option<ConditionMatch>,
}

impl MatchResult {
    /// Build from an already-ranked list.
    pub fn from_ranked(matches: Vec<ConditionMatch>) -> Self {
        let top_match = matches.first().cloned();
        MatchResult { matches, top_match }
    }
}

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::severity::Severity;

/// Monitoring instructions inside a decision-tree branch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MonitoringSpec {
    Detailed {
        #[serde(default)]
        frequency: Option<String>,
        #[serde(default)]
        parameters: Vec<String>,
        #[serde(default)]
        duration: Option<String>,
        #[serde(default)]
        location: Option<String>,
    },
    Summary(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BranchDetail {
    #[serde(default)]
    pub immediate_actions: Vec<String>,
    #[serde(default)]
    pub monitoring: Option<MonitoringSpec>,
    #[serde(default)]
    pub follow_up: Option<String>,
    #[serde(default)]
    pub discharge_criteria: Vec<String>,
    #[serde(default)]
    pub safety_netting: Option<String>,
}

/// One severity branch of a treatment algorithm: either a structured set
/// of actions or a one-line summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeverityBranch {
    Detailed(BranchDetail),
    Summary(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DecisionTree {
    #[serde(default)]
    pub assessment: Option<serde_json::Value>,
    #[serde(default)]
    pub treatment_algorithm: BTreeMap<String, SeverityBranch>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GuidelineMonitoring {
    Detailed {
        #[serde(default)]
        deterioration_signs: Vec<String>,
    },
    Summary(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GuidelineFollowUp {
    Detailed {
        #[serde(default)]
        mild_cases: Option<String>,
        #[serde(default)]
        moderate_cases: Option<String>,
        #[serde(default)]
        severe_cases: Option<String>,
        #[serde(default)]
        parent_education: Vec<String>,
    },
    Summary(String),
}

impl GuidelineFollowUp {
    /// Severity-specific follow-up instruction, if the guideline gives one.
    pub fn instruction_for(&self, severity: Severity) -> Option<&str> {
        match self {
            GuidelineFollowUp::Detailed {
                mild_cases,
                moderate_cases,
                severe_cases,
                ..
            } => match severity {
                Severity::Mild => mild_cases.as_deref(),
                Severity::Moderate => moderate_cases.as_deref(),
                Severity::Severe => severe_cases.as_deref(),
            },
            GuidelineFollowUp::Summary(text) => Some(text.as_str()),
        }
    }

    pub fn parent_education(&self) -> &[String] {
        match self {
            GuidelineFollowUp::Detailed {
                parent_education, ..
            } => parent_education,
            GuidelineFollowUp::Summary(_) => &[],
        }
    }
}

/// A guideline entry from the knowledge store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuidelineEntry {
    /// Map key in the guidelines document; filled in at load time.
    #[serde(skip)]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub last_updated: Option<String>,
    /// Identifiers of the conditions this guideline covers.
    #[serde(default)]
    pub conditions: Vec<String>,
    #[serde(default)]
    pub decision_tree: DecisionTree,
    #[serde(default)]
    pub monitoring: Option<GuidelineMonitoring>,
    #[serde(default)]
    pub follow_up: Option<GuidelineFollowUp>,
}

impl GuidelineEntry {
    pub fn covers(&self, condition_id: &str) -> bool {
        self.conditions.iter().any(|c| c == condition_id)
    }

    pub fn branch(&self, severity: Severity) -> Option<&SeverityBranch> {
        self.decision_tree
            .treatment_algorithm
            .get(severity.as_str())
    }

    pub fn deterioration_signs(&self) -> &[String] {
        match &self.monitoring {
            Some(GuidelineMonitoring::Detailed {
                deterioration_signs,
            }) => deterioration_signs,
            _ => &[],
        }
    }
}

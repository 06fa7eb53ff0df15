use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ClinicalError;

/// Canonical clinical severity levels.
///
/// Some callers still send "critical" or "life-threatening"; those are
/// accepted as aliases for [`Severity::Severe`] when parsing.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Severity {
    Mild,
    #[default]
    Moderate,
    #[serde(alias = "critical", alias = "life-threatening", alias = "life_threatening")]
    Severe,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::Mild, Severity::Moderate, Severity::Severe];

    /// The key used for this level in guideline decision trees.
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Mild => "mild",
            Severity::Moderate => "moderate",
            Severity::Severe => "severe",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = ClinicalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "mild" => Ok(Severity::Mild),
            "moderate" => Ok(Severity::Moderate),
            "severe" => Ok(Severity::Severe),
            "critical" | "life-threatening" => {
                tracing::warn!(severity = s, "legacy severity mapped to severe");
                Ok(Severity::Severe)
            }
            _ => Err(ClinicalError::InvalidSeverity {
                value: s.to_string(),
            }),
        }
    }
}

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Age groups a condition applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeGroup {
    Pediatric,
    Adult,
    Geriatric,
    #[serde(other)]
    Unrecognized,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SymptomProfile {
    #[serde(default)]
    pub primary: Vec<String>,
    #[serde(default)]
    pub secondary: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoreBand {
    pub min: i64,
    pub max: i64,
}

/// Description of one severity level. Data files use either a criteria
/// object or a single descriptive sentence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeverityScale {
    Criteria {
        criteria: Vec<String>,
        #[serde(default)]
        score_range: Option<ScoreBand>,
    },
    Description(String),
}

/// Treatment line a medication is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum MedicationLine {
    FirstLine,
    SecondLine,
    Rescue,
}

/// Dosing configuration for one medication.
///
/// Field names follow the reference data files; the shorter spellings are
/// accepted as aliases.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MedicationDosing {
    #[serde(default, alias = "dose_per_kg")]
    pub dose_mg_per_kg: Option<f64>,
    #[serde(default, alias = "max_dose")]
    pub max_dose_mg: Option<f64>,
    #[serde(default, alias = "min_dose")]
    pub min_dose_mg: Option<f64>,
    #[serde(default)]
    pub route: Option<String>,
    #[serde(default)]
    pub frequency: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub age_restrictions: Option<String>,
    #[serde(default)]
    pub contraindications: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MedicationLines {
    #[serde(default)]
    pub first_line: Option<BTreeMap<String, MedicationDosing>>,
    #[serde(default)]
    pub second_line: Option<BTreeMap<String, MedicationDosing>>,
    #[serde(default)]
    pub rescue: Option<BTreeMap<String, MedicationDosing>>,
}

impl MedicationLines {
    /// Lines in search order: first line, second line, rescue.
    pub fn iter(&self) -> impl Iterator<Item = (MedicationLine, &BTreeMap<String, MedicationDosing>)> {
        [
            (MedicationLine::FirstLine, self.first_line.as_ref()),
            (MedicationLine::SecondLine, self.second_line.as_ref()),
            (MedicationLine::Rescue, self.rescue.as_ref()),
        ]
        .into_iter()
        .filter_map(|(line, meds)| meds.map(|m| (line, m)))
    }
}

/// A condition entry from the knowledge store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConditionEntry {
    /// Map key in the conditions document; filled in at load time.
    #[serde(skip)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icd_codes: Vec<String>,
    #[serde(default)]
    pub age_groups: Vec<AgeGroup>,
    #[serde(default)]
    pub symptoms: SymptomProfile,
    #[serde(default)]
    pub severity_scales: BTreeMap<String, SeverityScale>,
    #[serde(default)]
    pub medications: MedicationLines,
    #[serde(default)]
    pub clinical_pearls: Vec<String>,
    #[serde(default)]
    pub red_flags: Vec<String>,
    #[serde(default)]
    pub differential_diagnosis: Vec<String>,
}

impl ConditionEntry {
    /// Find a medication across all lines, first line first. Exact names
    /// win over case-insensitive matches.
    pub fn find_medication(&self, name: &str) -> Option<(MedicationLine, &str, &MedicationDosing)> {
        let exact = self
            .medications
            .iter()
            .find_map(|(line, meds)| meds.get_key_value(name).map(|(k, d)| (line, k.as_str(), d)));
        exact.or_else(|| {
            self.medications.iter().find_map(|(line, meds)| {
                meds.iter()
                    .find(|(k, _)| k.eq_ignore_ascii_case(name))
                    .map(|(k, d)| (line, k.as_str(), d))
            })
        })
    }

    /// All medication names, in line order.
    pub fn medication_names(&self) -> Vec<String> {
        self.medications
            .iter()
            .flat_map(|(_, meds)| meds.keys().cloned())
            .collect()
    }

    pub fn first_line_medications(&self) -> Vec<String> {
        self.medications
            .first_line
            .as_ref()
            .map(|meds| meds.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn applies_to(&self, group: AgeGroup) -> bool {
        self.age_groups.contains(&group)
    }
}

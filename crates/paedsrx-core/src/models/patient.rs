use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ClinicalError;

/// Inclusive bounds a numeric patient field must satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub const fn new(min: f64, max: f64) -> Self {
        ValueRange { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value.is_finite() && value >= self.min && value <= self.max
    }

    /// Check `value` for `field`, producing `InvalidPatientData` when out of range.
    pub fn check(&self, field: &str, value: f64) -> Result<(), ClinicalError> {
        if self.contains(value) {
            Ok(())
        } else {
            Err(ClinicalError::InvalidPatientData {
                field: field.to_string(),
                value,
                constraint: self.to_string(),
            })
        }
    }
}

impl fmt::Display for ValueRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

/// Accepted ranges for every numeric field of a [`PatientRecord`].
pub mod limits {
    use super::ValueRange;

    pub const AGE_YEARS: ValueRange = ValueRange::new(0.0, 150.0);
    pub const WEIGHT_KG: ValueRange = ValueRange::new(0.5, 500.0);
    pub const HEIGHT_CM: ValueRange = ValueRange::new(20.0, 300.0);
    pub const TEMPERATURE_C: ValueRange = ValueRange::new(25.0, 45.0);
    pub const HEART_RATE_BPM: ValueRange = ValueRange::new(20.0, 300.0);
    pub const RESPIRATORY_RATE: ValueRange = ValueRange::new(4.0, 120.0);
    pub const OXYGEN_SATURATION: ValueRange = ValueRange::new(0.0, 100.0);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Gender {
    Male,
    Female,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VitalSigns {
    /// Degrees Celsius.
    pub temperature: Option<f64>,
    pub heart_rate: Option<u32>,
    pub respiratory_rate: Option<u32>,
    /// Systolic/diastolic, e.g. "100/60".
    pub blood_pressure: Option<String>,
    /// Percent.
    pub oxygen_saturation: Option<f64>,
}

/// Free-text sections of a clinical note. Unmatched sections are `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NoteSections {
    pub presenting_complaint: Option<String>,
    pub history: Option<String>,
    pub examination: Option<String>,
    pub assessment: Option<String>,
    pub plan: Option<String>,
}

/// Structured patient facts extracted from a clinical note.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PatientRecord {
    /// Years.
    pub age: Option<u32>,
    /// Kilograms.
    pub weight: Option<f64>,
    /// Centimetres.
    pub height: Option<f64>,
    pub date_of_birth: Option<jiff::civil::Date>,
    pub gender: Option<Gender>,
    #[serde(default)]
    pub vitals: VitalSigns,
    /// Recognised symptom phrases, deduplicated, in vocabulary order.
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub sections: NoteSections,
}

impl PatientRecord {
    /// Reject any present numeric field that falls outside its range.
    pub fn validate(&self) -> Result<(), ClinicalError> {
        if let Some(age) = self.age {
            limits::AGE_YEARS.check("age", f64::from(age))?;
        }
        if let Some(weight) = self.weight {
            limits::WEIGHT_KG.check("weight", weight)?;
        }
        if let Some(height) = self.height {
            limits::HEIGHT_CM.check("height", height)?;
        }
        if let Some(t) = self.vitals.temperature {
            limits::TEMPERATURE_C.check("temperature", t)?;
        }
        if let Some(hr) = self.vitals.heart_rate {
            limits::HEART_RATE_BPM.check("heart_rate", f64::from(hr))?;
        }
        if let Some(rr) = self.vitals.respiratory_rate {
            limits::RESPIRATORY_RATE.check("respiratory_rate", f64::from(rr))?;
        }
        if let Some(spo2) = self.vitals.oxygen_saturation {
            limits::OXYGEN_SATURATION.check("oxygen_saturation", spo2)?;
        }
        Ok(())
    }

    pub fn assessment(&self) -> &str {
        self.sections.assessment.as_deref().unwrap_or("")
    }
}

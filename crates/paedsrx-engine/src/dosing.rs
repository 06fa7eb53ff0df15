use tracing::info;

use paedsrx_core::models::dose::{DoseLimit, DoseResult};
use paedsrx_core::models::patient::ValueRange;
use paedsrx_core::{ClinicalError, Severity};
use paedsrx_knowledge::KnowledgeStore;

/// Weights accepted for dosing: above zero, at most 500 kg.
const DOSING_WEIGHT_MAX_KG: f64 = 500.0;

const DEFAULT_ROUTE: &str = "oral";
const DEFAULT_FREQUENCY: &str = "daily";
const DOSE_UNIT: &str = "mg";

/// Weight-scaled dose of `medication` for `condition`, held within the
/// configured minimum and maximum.
pub fn calculate_dose(
    store: &KnowledgeStore,
    medication: &str,
    condition: &str,
    weight: f64,
    severity: Option<Severity>,
) -> Result<DoseResult, ClinicalError> {
    let medication = medication.trim();
    let condition = condition.trim();
    if medication.is_empty() {
        return Err(ClinicalError::insufficient("medication name is required"));
    }
    if condition.is_empty() {
        return Err(ClinicalError::insufficient("condition name is required"));
    }
    if !(weight.is_finite() && weight > 0.0 && weight <= DOSING_WEIGHT_MAX_KG) {
        return Err(ClinicalError::InvalidPatientData {
            field: "weight".to_string(),
            value: weight,
            constraint: format!("(0, {DOSING_WEIGHT_MAX_KG}]"),
        });
    }

    let entry = store.resolve_condition(condition)?;
    let Some((line, name, dosing)) = entry.find_medication(medication) else {
        return Err(ClinicalError::MedicationNotFound {
            medication: medication.to_string(),
            condition: entry.id.clone(),
            available: entry.medication_names(),
        });
    };

    let invalid = |reason: String| ClinicalError::InvalidDoseConfig {
        medication: name.to_string(),
        condition: entry.id.clone(),
        reason,
    };

    let dose_per_kg = match dosing.dose_mg_per_kg {
        Some(d) if d.is_finite() && d > 0.0 => d,
        Some(d) => return Err(invalid(format!("dose per kg must be positive, got {d}"))),
        None => return Err(invalid("no dose per kg configured".to_string())),
    };
    if let (Some(min), Some(max)) = (dosing.min_dose_mg, dosing.max_dose_mg) {
        if min > max {
            return Err(invalid(format!(
                "minimum dose {min} mg exceeds maximum dose {max} mg"
            )));
        }
    }

    let calculated_dose = dose_per_kg * weight;
    let (final_dose, limiting_bound) =
        apply_bounds(calculated_dose, dosing.min_dose_mg, dosing.max_dose_mg);

    let rationale = rationale(
        dose_per_kg,
        weight,
        calculated_dose,
        final_dose,
        limiting_bound,
    );

    info!(
        medication = name,
        condition = %entry.id,
        weight,
        final_dose,
        limiting_bound = ?limiting_bound,
        "dose calculated"
    );

    Ok(DoseResult {
        medication: name.to_string(),
        condition: entry.id.clone(),
        line,
        patient_weight: weight,
        dose_per_kg,
        calculated_dose,
        final_dose,
        unit: DOSE_UNIT.to_string(),
        route: dosing
            .route
            .clone()
            .unwrap_or_else(|| DEFAULT_ROUTE.to_string()),
        frequency: dosing
            .frequency
            .clone()
            .unwrap_or_else(|| DEFAULT_FREQUENCY.to_string()),
        duration: dosing.duration.clone(),
        min_dose: dosing.min_dose_mg,
        max_dose: dosing.max_dose_mg,
        limiting_bound,
        contraindications: dosing.contraindications.clone(),
        severity,
        rationale,
    })
}

/// Clamp into `[min, max]`; an absent minimum is zero and an absent
/// maximum is unbounded.
pub fn apply_bounds(dose: f64, min: Option<f64>, max: Option<f64>) -> (f64, DoseLimit) {
    let range = ValueRange::new(min.unwrap_or(0.0), max.unwrap_or(f64::INFINITY));
    if dose > range.max {
        (range.max, DoseLimit::Maximum)
    } else if dose < range.min {
        (range.min, DoseLimit::Minimum)
    } else {
        (dose, DoseLimit::None)
    }
}

fn rationale(
    dose_per_kg: f64,
    weight: f64,
    calculated: f64,
    final_dose: f64,
    limit: DoseLimit,
) -> String {
    let base = format!("{dose_per_kg} mg/kg x {weight} kg = {calculated:.2} mg");
    match limit {
        DoseLimit::None => base,
        DoseLimit::Maximum => format!("{base}, capped at maximum dose of {final_dose} mg"),
        DoseLimit::Minimum => format!("{base}, raised to minimum dose of {final_dose} mg"),
    }
}

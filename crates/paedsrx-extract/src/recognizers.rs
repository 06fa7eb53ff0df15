//! Ordered field recognizers for demographics and vital signs.
//!
//! Each field has a list of pattern variants tried in declaration order.
//! The first variant that yields an in-range value sets the field; a
//! value outside its range is treated as unparsed and the search moves
//! on. Reordering entries changes extraction results.

use std::sync::LazyLock;

use paedsrx_core::models::patient::{Gender, PatientRecord, ValueRange, limits};
use regex::Regex;

/// A field of [`PatientRecord`] filled by pattern recognizers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Age,
    Weight,
    Height,
    DateOfBirth,
    Gender,
    Temperature,
    HeartRate,
    RespiratoryRate,
    BloodPressure,
    OxygenSaturation,
}

impl Field {
    pub const ALL: [Field; 10] = [
        Field::Age,
        Field::Weight,
        Field::Height,
        Field::DateOfBirth,
        Field::Gender,
        Field::Temperature,
        Field::HeartRate,
        Field::RespiratoryRate,
        Field::BloodPressure,
        Field::OxygenSaturation,
    ];
}

/// One (field, pattern, parser) entry. The pattern's first capture group
/// holds the raw value handed to the parser.
pub struct Recognizer {
    pub field: Field,
    pub pattern: &'static str,
    parse: fn(&str, &mut PatientRecord) -> bool,
}

macro_rules! recognizer {
    ($field:ident, $pattern:expr, $parse:expr) => {
        Recognizer {
            field: Field::$field,
            pattern: $pattern,
            parse: $parse,
        }
    };
}

static RECOGNIZERS: &[Recognizer] = &[
    // age
    recognizer!(Age, r"Age:\s*(\d+)\s*years?", parse_age),
    recognizer!(Age, r"(\d+)\s*years?\s*old", parse_age),
    recognizer!(Age, r"\b(\d+)\s*yo\b", parse_age),
    recognizer!(Age, r"\bAge:?\s*(\d+)", parse_age),
    // weight
    recognizer!(Weight, r"Weight:\s*(\d+(?:\.\d+)?)\s*kg", parse_weight),
    recognizer!(Weight, r"(\d+(?:\.\d+)?)\s*kg\b", parse_weight),
    recognizer!(Weight, r"\bWt:?\s*(\d+(?:\.\d+)?)\s*kg", parse_weight),
    // height
    recognizer!(Height, r"Height:\s*(\d+(?:\.\d+)?)\s*cm", parse_height),
    recognizer!(Height, r"(\d+(?:\.\d+)?)\s*cm\b", parse_height),
    recognizer!(Height, r"\bHt:?\s*(\d+(?:\.\d+)?)\s*cm", parse_height),
    // date of birth
    recognizer!(DateOfBirth, r"DOB:\s*(\d{1,2}/\d{1,2}/\d{4})", parse_dob),
    recognizer!(DateOfBirth, r"Date of birth:\s*(\d{1,2}/\d{1,2}/\d{4})", parse_dob),
    recognizer!(DateOfBirth, r"Born:\s*(\d{1,2}/\d{1,2}/\d{4})", parse_dob),
    // gender
    recognizer!(Gender, r"Gender:\s*(male|female|m|f)\b", parse_gender),
    recognizer!(Gender, r"Sex:\s*(male|female|m|f)\b", parse_gender),
    recognizer!(Gender, r"\b(male|female)\b", parse_gender),
    // temperature
    recognizer!(Temperature, r"\bT\s*(\d+(?:\.\d+)?)", parse_temperature),
    recognizer!(Temperature, r"\bTemp:?\s*(\d+(?:\.\d+)?)", parse_temperature),
    recognizer!(Temperature, r"\bTemperature:?\s*(\d+(?:\.\d+)?)", parse_temperature),
    recognizer!(Temperature, r"(\d+(?:\.\d+)?)\s*°\s*C", parse_temperature),
    // heart rate
    recognizer!(HeartRate, r"\bHR:?\s*(\d+)", parse_heart_rate),
    recognizer!(HeartRate, r"Heart rate:?\s*(\d+)", parse_heart_rate),
    recognizer!(HeartRate, r"\bPulse:?\s*(\d+)", parse_heart_rate),
    recognizer!(HeartRate, r"(\d+)\s*bpm\b", parse_heart_rate),
    // respiratory rate
    recognizer!(RespiratoryRate, r"\bRR:?\s*(\d+)", parse_respiratory_rate),
    recognizer!(RespiratoryRate, r"Respiratory rate:?\s*(\d+)", parse_respiratory_rate),
    recognizer!(RespiratoryRate, r"\bResp:?\s*(\d+)", parse_respiratory_rate),
    recognizer!(RespiratoryRate, r"(\d+)\s*breaths/min", parse_respiratory_rate),
    // blood pressure
    recognizer!(BloodPressure, r"\bBP:?\s*(\d+/\d+)", parse_blood_pressure),
    recognizer!(BloodPressure, r"Blood pressure:?\s*(\d+/\d+)", parse_blood_pressure),
    recognizer!(BloodPressure, r"(\d+/\d+)\s*mmHg", parse_blood_pressure),
    // oxygen saturation
    recognizer!(OxygenSaturation, r"O2\s*sat:?\s*(\d+(?:\.\d+)?)\s*%?", parse_spo2),
    recognizer!(OxygenSaturation, r"SpO2:?\s*(\d+(?:\.\d+)?)\s*%?", parse_spo2),
    recognizer!(OxygenSaturation, r"Oxygen saturation:?\s*(\d+(?:\.\d+)?)\s*%?", parse_spo2),
    recognizer!(OxygenSaturation, r"(\d+(?:\.\d+)?)\s*%\s*oxygen", parse_spo2),
];

struct Compiled {
    recognizer: &'static Recognizer,
    regex: Regex,
}

static COMPILED: LazyLock<Vec<Compiled>> = LazyLock::new(|| {
    RECOGNIZERS
        .iter()
        .map(|recognizer| Compiled {
            recognizer,
            regex: Regex::new(&format!("(?i){}", recognizer.pattern))
                .expect("recognizer patterns are valid"),
        })
        .collect()
});

/// Patterns for `field`, in the order they are tried.
pub fn recognizer_order(field: Field) -> Vec<&'static str> {
    RECOGNIZERS
        .iter()
        .filter(|r| r.field == field)
        .map(|r| r.pattern)
        .collect()
}

/// Run every recognizer over `text`, filling `record`. Returns the number
/// of fields that were set.
pub fn apply(text: &str, record: &mut PatientRecord) -> usize {
    let mut filled = 0;
    for field in Field::ALL {
        let hit = COMPILED
            .iter()
            .filter(|c| c.recognizer.field == field)
            .any(|c| {
                c.regex
                    .captures_iter(text)
                    .filter_map(|caps| caps.get(1))
                    .any(|m| (c.recognizer.parse)(m.as_str(), record))
            });
        if hit {
            filled += 1;
        }
    }
    filled
}

fn in_range(range: ValueRange, raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|v| range.contains(*v))
}

fn whole_in_range(range: ValueRange, raw: &str) -> Option<u32> {
    raw.parse::<u32>()
        .ok()
        .filter(|v| range.contains(f64::from(*v)))
}

fn parse_age(raw: &str, record: &mut PatientRecord) -> bool {
    record.age = whole_in_range(limits::AGE_YEARS, raw);
    record.age.is_some()
}

fn parse_weight(raw: &str, record: &mut PatientRecord) -> bool {
    record.weight = in_range(limits::WEIGHT_KG, raw);
    record.weight.is_some()
}

fn parse_height(raw: &str, record: &mut PatientRecord) -> bool {
    record.height = in_range(limits::HEIGHT_CM, raw);
    record.height.is_some()
}

/// Dates are written day/month/year.
fn parse_dob(raw: &str, record: &mut PatientRecord) -> bool {
    record.date_of_birth = day_month_year(raw);
    record.date_of_birth.is_some()
}

fn day_month_year(raw: &str) -> Option<jiff::civil::Date> {
    let mut parts = raw.split('/');
    let day = parts.next()?.parse::<i8>().ok()?;
    let month = parts.next()?.parse::<i8>().ok()?;
    let year = parts.next()?.parse::<i16>().ok()?;
    jiff::civil::Date::new(year, month, day).ok()
}

fn parse_gender(raw: &str, record: &mut PatientRecord) -> bool {
    record.gender = match raw.to_lowercase().as_str() {
        "m" | "male" => Some(Gender::Male),
        "f" | "female" => Some(Gender::Female),
        _ => None,
    };
    record.gender.is_some()
}

fn parse_temperature(raw: &str, record: &mut PatientRecord) -> bool {
    record.vitals.temperature = in_range(limits::TEMPERATURE_C, raw);
    record.vitals.temperature.is_some()
}

fn parse_heart_rate(raw: &str, record: &mut PatientRecord) -> bool {
    record.vitals.heart_rate = whole_in_range(limits::HEART_RATE_BPM, raw);
    record.vitals.heart_rate.is_some()
}

fn parse_respiratory_rate(raw: &str, record: &mut PatientRecord) -> bool {
    record.vitals.respiratory_rate = whole_in_range(limits::RESPIRATORY_RATE, raw);
    record.vitals.respiratory_rate.is_some()
}

/// Both pressures must be plausible and systolic above diastolic.
fn parse_blood_pressure(raw: &str, record: &mut PatientRecord) -> bool {
    let valid = raw
        .split_once('/')
        .and_then(|(s, d)| Some((s.parse::<u32>().ok()?, d.parse::<u32>().ok()?)))
        .is_some_and(|(systolic, diastolic)| {
            (30..=300).contains(&systolic) && (10..=200).contains(&diastolic) && systolic > diastolic
        });
    record.vitals.blood_pressure = valid.then(|| raw.to_string());
    valid
}

fn parse_spo2(raw: &str, record: &mut PatientRecord) -> bool {
    record.vitals.oxygen_saturation = in_range(limits::OXYGEN_SATURATION, raw);
    record.vitals.oxygen_saturation.is_some()
}

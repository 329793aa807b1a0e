//! Field extraction from semi-structured prescription text.
//!
//! Deterministic pattern matching over the fixed prescription template. Each
//! label rule is an independent function returning an optional match; a rule
//! that fails leaves its field at the record default and never blocks the
//! others. Label matching is case-insensitive and only the first occurrence
//! of a label is used.
//!
//! This is a fallback for documents following the template, not a language
//! model: free-form prose outside the template simply goes unmatched.

use std::sync::LazyLock;

use regex::Regex;

use crate::fields::{ClinicalFields, Medicine};

static PATIENT_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Patient:\s*([^,\n]+)").unwrap());
static AGE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)Age:\s*(\d+)").unwrap());
static SEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Sex:\s*(Male|Female|Other)").unwrap());
static DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Date:\s*(\d{4}-\d{2}-\d{2})").unwrap());
static SYMPTOMS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Symptoms:\s*([^\n]+)").unwrap());
static CLINIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)Clinic:\s*([^\n]+)").unwrap());
static RECOMMENDED_TESTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Recommended Tests:\s*([^\n]+)").unwrap());
static ADVICE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)Notes:\s*([^\n]+)").unwrap());
static PRESCRIBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Prescribed by:\s*([^(]+)\s*\(Reg\.?\s*#?\s*([^)]+)\)").unwrap()
});

/// The medication block runs from the "Medication(s):" label to the next
/// "Recommended Tests" or "Notes" label, or the end of the document.
static MEDICATION_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)Medications?:(.+?)(?:Recommended Tests|Notes|$)").unwrap());

/// A medication line must carry every clause, comma-separated in fixed order:
/// ordinal, name, mg/ml dosage, parenthesised form, dash, frequency,
/// duration, `Route:` clause, `Qty:` integer. No partial credit.
static MEDICATION_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(\d+)\.\s*([^\n]+?)\s+(\d+\s*mg|\d+\s*ml)\s*\(([^)]+)\)\s*-\s*([^,]+),\s*([^,]+),\s*Route:\s*([^,]+),\s*Qty:\s*(\d+)",
    )
    .unwrap()
});

/// Numbered lines inside the medication block, matched or not.
static NUMBERED_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^\s*\d+\.").unwrap());

fn first_capture(pattern: &Regex, text: &str) -> Option<String> {
    pattern.captures(text).map(|c| c[1].trim().to_string())
}

/// Splits a comma/semicolon separated list, discarding empty pieces.
fn split_list(raw: &str) -> Vec<String> {
    raw.split([',', ';'])
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}

pub(crate) fn patient_name(text: &str) -> Option<String> {
    first_capture(&PATIENT_NAME, text)
}

pub(crate) fn age(text: &str) -> Option<u32> {
    AGE.captures(text).and_then(|c| c[1].parse().ok())
}

pub(crate) fn sex(text: &str) -> Option<String> {
    // Captured casing is preserved: "female" stays "female".
    SEX.captures(text).map(|c| c[1].to_string())
}

pub(crate) fn date(text: &str) -> Option<String> {
    first_capture(&DATE, text)
}

pub(crate) fn symptoms(text: &str) -> Vec<String> {
    SYMPTOMS
        .captures(text)
        .map(|c| split_list(&c[1]))
        .unwrap_or_default()
}

pub(crate) fn clinic(text: &str) -> Option<String> {
    first_capture(&CLINIC, text)
}

pub(crate) fn recommended_tests(text: &str) -> Vec<String> {
    RECOMMENDED_TESTS
        .captures(text)
        .map(|c| split_list(&c[1]))
        .unwrap_or_default()
}

pub(crate) fn advice(text: &str) -> Option<String> {
    first_capture(&ADVICE, text)
}

pub(crate) fn prescriber(text: &str) -> Option<(String, String)> {
    PRESCRIBER
        .captures(text)
        .map(|c| (c[1].trim().to_string(), c[2].trim().to_string()))
}

pub(crate) fn medicines(text: &str) -> Vec<Medicine> {
    let Some(block) = MEDICATION_BLOCK.captures(text) else {
        return Vec::new();
    };
    let block = &block[1];

    let matched: Vec<Medicine> = MEDICATION_LINE
        .captures_iter(block)
        .map(|c| Medicine {
            name: c[2].trim().to_string(),
            dosage: c[3].trim().to_string(),
            form: c[4].trim().to_string(),
            frequency: c[5].trim().to_string(),
            duration: c[6].trim().to_string(),
            route: c[7].trim().to_string(),
            quantity: c[8].parse().unwrap_or(0),
        })
        .collect();

    let numbered = NUMBERED_LINE.find_iter(block).count();
    if numbered > matched.len() {
        tracing::warn!(
            numbered,
            matched = matched.len(),
            "medication lines with missing clauses were dropped"
        );
    }

    matched
}

/// Extracts a [`ClinicalFields`] record from free-text prescription content.
///
/// Total and deterministic: this never fails, it only under-populates.
/// Unmatched labels leave their fields at the documented defaults.
pub fn extract(raw_text: &str) -> ClinicalFields {
    let (prescriber_name, prescriber_reg) = prescriber(raw_text).unwrap_or_default();

    let fields = ClinicalFields {
        patient_name: patient_name(raw_text).unwrap_or_default(),
        age: age(raw_text).unwrap_or_default(),
        sex: sex(raw_text).unwrap_or_default(),
        date: date(raw_text).unwrap_or_default(),
        symptoms: symptoms(raw_text),
        diagnosis: None,
        medicines: medicines(raw_text),
        recommended_tests: recommended_tests(raw_text),
        advice: advice(raw_text).unwrap_or_default(),
        prescriber_name,
        prescriber_reg,
        clinic: clinic(raw_text).unwrap_or_default(),
    };

    tracing::debug!(
        symptoms = fields.symptoms.len(),
        medicines = fields.medicines.len(),
        tests = fields.recommended_tests.len(),
        "extracted clinical fields"
    );

    fields
}

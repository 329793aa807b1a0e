//! Structured clinical fields extracted from a prescription document.
//!
//! These records are the interchange shape between the extractor, the
//! annotator, and the storage collaborator. Field names are a compatibility
//! surface and must not be renamed without coordinating a storage migration.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A single prescribed medicine.
///
/// Only produced as a complete tuple: a medication line missing any clause
/// yields no `Medicine` at all rather than a partially filled one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct Medicine {
    pub name: String,
    pub dosage: String,
    pub form: String,
    pub frequency: String,
    pub duration: String,
    pub route: String,
    pub quantity: u32,
}

/// The structured record extracted from a free-text prescription.
///
/// Every sequence field is always present (possibly empty) and every scalar
/// field holds its type's default when the source text did not match:
/// empty string for text, `0` for numbers, `None` for `diagnosis`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct ClinicalFields {
    pub patient_name: String,
    pub age: u32,
    /// Male/Female/Other as captured from the document, or empty when unmatched.
    pub sex: String,
    /// `YYYY-MM-DD` token, or empty when unmatched. Treated as opaque text.
    pub date: String,
    pub symptoms: Vec<String>,
    /// Never populated by the pattern-matching extractor; kept for record
    /// shape compatibility with the stored document.
    pub diagnosis: Option<String>,
    pub medicines: Vec<Medicine>,
    pub recommended_tests: Vec<String>,
    pub advice: String,
    pub prescriber_name: String,
    pub prescriber_reg: String,
    pub clinic: String,
}

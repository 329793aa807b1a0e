//! Request and response types for the rxsum REST endpoints.
//!
//! The engine itself is pure; everything envelope-shaped (ids, timestamps)
//! lives here at the API boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use rxsum_core::{ClinicalFields, DisplaySegment, ProvenanceLink};
use rxsum_types::NonEmptyText;

/// Request to extract clinical fields from raw prescription text.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExtractReq {
    /// Raw prescription document. Must not be empty; any other content is
    /// accepted and simply under-populates the result.
    #[schema(value_type = String)]
    pub text: NonEmptyText,
}

/// Extracted clinical fields.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExtractRes {
    pub fields: ClinicalFields,
}

/// Request to generate a provenance-annotated summary for a record.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GenerateSummaryReq {
    pub fields: ClinicalFields,
    /// Identifier of the source prescription document.
    #[schema(value_type = String)]
    pub source_id: NonEmptyText,
}

/// A generated summary envelope: narrative, links, and display segments.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GenerateSummaryRes {
    pub id: Uuid,
    pub patient_name: String,
    pub summary_text: String,
    pub provenance_links: Vec<ProvenanceLink>,
    pub segments: Vec<DisplaySegment>,
    pub generated_at: DateTime<Utc>,
}

/// Request to re-derive display segments from a stored summary.
///
/// The body is exactly the pair the storage collaborator persisted when the
/// summary was generated.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DisplaySummaryReq {
    pub summary_text: String,
    pub provenance_links: Vec<ProvenanceLink>,
}

/// Ordered display segments covering the summary text.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DisplaySummaryRes {
    pub segments: Vec<DisplaySegment>,
}

//! Provenance links tying narrative facts back to their source fields.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Fixed `source_type` for links generated from prescription records.
pub const PRESCRIPTION_SOURCE: &str = "prescription";

/// A record tying one asserted fact in a generated narrative back to the
/// structured field and source document it came from.
///
/// Links are value objects: generated fresh on every annotation run,
/// immutable once created, and emitted in narrative order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProvenanceLink {
    /// Semantic role of the fact, e.g. "symptom", "medicine", "age".
    pub field_name: String,
    /// Stringified field value at generation time.
    pub value: String,
    /// Kind of originating document, currently always
    /// [`PRESCRIPTION_SOURCE`].
    pub source_type: String,
    /// Identifier of the originating document.
    pub source_id: String,
    /// Structural path into the source record. Medicine facts carry an
    /// index-qualified path (`medicines[2].frequency`); symptoms and tests
    /// carry the bare plural field name for all their elements.
    pub source_field: String,
}

/// A rendered narrative plus the links backing every marked-up fact.
///
/// `summary_text` embeds one `[value]{role}` markup span per link, in the
/// same order as `provenance_links`. The pair is persisted verbatim by the
/// storage collaborator and later fed unchanged into reconstruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AnnotatedSummary {
    pub summary_text: String,
    pub provenance_links: Vec<ProvenanceLink>,
}

//! # rxsum Core
//!
//! The provenance-annotated summary engine.
//!
//! Three pure operations over prescription data:
//! - [`extract`] — structured clinical fields from semi-structured
//!   prescription text
//! - [`annotate`] — a human-readable narrative whose every fact carries a
//!   traceable link back to its originating field
//! - [`reconstruct`] — typed display segments re-derived from a previously
//!   rendered narrative and its link list
//!
//! **No API or storage concerns**: HTTP endpoints live in `api-rest`, and
//! persistence of the (summary text, link list) pair belongs to the storage
//! collaborator. Nothing here performs I/O, blocks, or shares mutable state,
//! so all operations are safe to call concurrently.

pub mod annotate;
pub mod extract;
pub mod fields;
pub mod provenance;
pub mod segments;

pub use annotate::annotate;
pub use extract::extract;
pub use fields::{ClinicalFields, Medicine};
pub use provenance::{AnnotatedSummary, PRESCRIPTION_SOURCE, ProvenanceLink};
pub use segments::{DisplaySegment, reconstruct};

/// Summary-engine operations behind an explicit value.
///
/// There is no process-wide instance: construct one at startup and clone it
/// into whatever state needs it (the engine is stateless, so clones are
/// free).
#[derive(Debug, Default, Clone)]
pub struct SummaryService;

impl SummaryService {
    pub fn new() -> Self {
        Self
    }

    /// Extracts structured clinical fields from prescription text.
    ///
    /// Total: unmatched fields take their defaults, no input is rejected.
    pub fn extract(&self, raw_text: &str) -> ClinicalFields {
        extract::extract(raw_text)
    }

    /// Renders the provenance-annotated narrative for an extracted record.
    pub fn annotate(&self, fields: &ClinicalFields, source_id: &str) -> AnnotatedSummary {
        annotate::annotate(fields, source_id)
    }

    /// Re-derives display segments from a stored summary and its links.
    pub fn reconstruct(
        &self,
        summary_text: &str,
        links: &[ProvenanceLink],
    ) -> Vec<DisplaySegment> {
        segments::reconstruct(summary_text, links)
    }
}

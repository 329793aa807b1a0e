//! Reconstruction of display segments from annotated summary text.
//!
//! The round-trip partner of the annotator: re-parses the `[value]{role}`
//! markup a previous run produced and resolves each span against the stored
//! link list.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::provenance::ProvenanceLink;

/// One unit of reconstructed narrative: plain prose, or a fact tied back to
/// its provenance.
///
/// Serialized with an internal `type` tag (`"text"` /
/// `"provenance_link"`), matching the stored display format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DisplaySegment {
    /// Prose between markup spans. Never zero-length.
    Text { content: String },
    /// A `[value]{role}` span, resolved against the link list.
    ProvenanceLink {
        /// The enclosed value, markup stripped.
        content: String,
        /// The enclosed role tag.
        field_type: String,
        /// The first matching link, or `None` when no link resolves.
        provenance: Option<ProvenanceLink>,
    },
}

/// Value must not contain `]`, role must not contain `}`. There is no escape
/// mechanism; values holding those characters corrupt span boundaries.
static MARKUP_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\{([^}]+)\}").unwrap());

/// Re-derives an ordered segment sequence from a rendered summary and its
/// link list.
///
/// Scans left to right for non-overlapping `[value]{role}` spans. Untouched
/// substrings between and around spans become [`DisplaySegment::Text`]
/// entries; zero-length runs are suppressed. Each span resolves to the FIRST
/// link in list order whose `value` equals the span content or whose
/// `field_name` equals the span role. The match is deliberately loose: the
/// generation side does not guarantee uniqueness, so a shared value or role
/// can attach an earlier link than a reader might expect. An unresolved
/// lookup is a soft failure and yields `provenance: None`.
pub fn reconstruct(summary_text: &str, links: &[ProvenanceLink]) -> Vec<DisplaySegment> {
    let mut segments = Vec::new();
    let mut last_end = 0;

    for caps in MARKUP_SPAN.captures_iter(summary_text) {
        let span = caps.get(0).expect("whole-match group is always present");

        if span.start() > last_end {
            segments.push(DisplaySegment::Text {
                content: summary_text[last_end..span.start()].to_string(),
            });
        }

        let content = caps[1].to_string();
        let field_type = caps[2].to_string();
        let provenance = links
            .iter()
            .find(|link| link.value == content || link.field_name == field_type)
            .cloned();
        if provenance.is_none() {
            tracing::debug!(%field_type, "no provenance link resolved for markup span");
        }

        segments.push(DisplaySegment::ProvenanceLink {
            content,
            field_type,
            provenance,
        });
        last_end = span.end();
    }

    if last_end < summary_text.len() {
        segments.push(DisplaySegment::Text {
            content: summary_text[last_end..].to_string(),
        });
    }

    segments
}

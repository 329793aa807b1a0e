//! Narrative rendering with inline provenance markup.
//!
//! Produces a markdown-flavoured summary in which every asserted fact is
//! wrapped as `[value]{role}`, paired one-to-one and in order with a
//! [`ProvenanceLink`]. Section headers use `**bold**` markers; those are
//! cosmetic prose, not part of the markup format.

use crate::fields::ClinicalFields;
use crate::provenance::{AnnotatedSummary, ProvenanceLink, PRESCRIPTION_SOURCE};

/// Accumulates narrative text and its parallel link list.
///
/// Every markup span goes through [`SummaryWriter::fact`], which appends the
/// matching link in the same call, so spans and links cannot drift out of
/// order.
struct SummaryWriter<'a> {
    text: String,
    links: Vec<ProvenanceLink>,
    source_id: &'a str,
}

impl<'a> SummaryWriter<'a> {
    fn new(source_id: &'a str) -> Self {
        Self {
            text: String::new(),
            links: Vec::new(),
            source_id,
        }
    }

    /// Appends plain prose.
    fn prose(&mut self, literal: &str) {
        self.text.push_str(literal);
    }

    /// Appends a `[value]{role}` span and records its provenance link.
    fn fact(&mut self, role: &str, value: &str, source_field: impl Into<String>) {
        if value.contains(']') || value.contains('}') {
            // The markup format has no escaping mechanism; the span will not
            // survive reconstruction intact.
            tracing::warn!(role, value, "markup delimiter inside annotated value");
        }

        self.text.push_str(&format!("[{value}]{{{role}}}"));
        self.links.push(ProvenanceLink {
            field_name: role.to_string(),
            value: value.to_string(),
            source_type: PRESCRIPTION_SOURCE.to_string(),
            source_id: self.source_id.to_string(),
            source_field: source_field.into(),
        });
    }

    fn finish(self) -> AnnotatedSummary {
        AnnotatedSummary {
            summary_text: self.text,
            provenance_links: self.links,
        }
    }
}

/// Renders the provenance-annotated narrative for an extracted record.
///
/// Pure function of its inputs. Sections appear in fixed order: patient
/// block, visit block, symptoms, medications, tests, advice. The patient
/// block is always present; every other block is emitted only when its
/// underlying data is non-empty, and the clinic/date/prescriber fragments of
/// the visit block are each independently optional.
pub fn annotate(fields: &ClinicalFields, source_id: &str) -> AnnotatedSummary {
    let mut writer = SummaryWriter::new(source_id);

    writer.prose("**Patient**: ");
    writer.fact("patient_name", &fields.patient_name, "patient_name");
    writer.prose(", ");
    writer.fact("age", &fields.age.to_string(), "age");
    writer.prose(" years old, ");
    writer.fact("sex", &fields.sex, "sex");
    writer.prose(".\n");

    if !fields.clinic.is_empty() {
        writer.prose("\n**Visit**: ");
        writer.fact("clinic", &fields.clinic, "clinic");
    }
    if !fields.date.is_empty() {
        writer.prose(" on ");
        writer.fact("date", &fields.date, "date");
    }
    if !fields.prescriber_name.is_empty() {
        writer.prose(", attended by ");
        writer.fact("prescriber", &fields.prescriber_name, "prescriber_name");
        writer.prose(".");
    }

    if !fields.symptoms.is_empty() {
        writer.prose("\n\n**Presenting Symptoms**: ");
        for (i, symptom) in fields.symptoms.iter().enumerate() {
            if i > 0 {
                writer.prose(", ");
            }
            writer.fact("symptom", symptom, "symptoms");
        }
        writer.prose(".");
    }

    if !fields.medicines.is_empty() {
        writer.prose("\n\n**Prescribed Medications**:\n");
        for (i, medicine) in fields.medicines.iter().enumerate() {
            writer.prose(&format!("{}. ", i + 1));
            writer.fact("medicine", &medicine.name, format!("medicines[{i}].name"));
            writer.prose(&format!(" {}", medicine.dosage));
            if !medicine.frequency.is_empty() {
                writer.prose(", ");
                writer.fact(
                    "frequency",
                    &medicine.frequency,
                    format!("medicines[{i}].frequency"),
                );
            }
            if !medicine.duration.is_empty() {
                writer.prose(" for ");
                writer.fact(
                    "duration",
                    &medicine.duration,
                    format!("medicines[{i}].duration"),
                );
            }
            writer.prose("\n");
        }
    }

    if !fields.recommended_tests.is_empty() {
        writer.prose("\n**Recommended Tests**: ");
        for (i, test) in fields.recommended_tests.iter().enumerate() {
            if i > 0 {
                writer.prose(", ");
            }
            writer.fact("test", test, "recommended_tests");
        }
        writer.prose(".");
    }

    if !fields.advice.is_empty() {
        writer.prose("\n\n**Clinical Advice**: ");
        writer.fact("advice", &fields.advice, "advice");
    }

    writer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::Medicine;

    fn sample_fields() -> ClinicalFields {
        ClinicalFields {
            patient_name: "Jane Doe".into(),
            age: 34,
            sex: "Female".into(),
            date: "2024-01-15".into(),
            symptoms: vec!["fever".into(), "cough".into()],
            diagnosis: None,
            medicines: vec![Medicine {
                name: "Paracetamol".into(),
                dosage: "500 mg".into(),
                form: "tablet".into(),
                frequency: "Twice daily".into(),
                duration: "5 days".into(),
                route: "Oral".into(),
                quantity: 10,
            }],
            recommended_tests: vec!["CBC".into()],
            advice: "Rest advised".into(),
            prescriber_name: "Dr. Smith".into(),
            prescriber_reg: "12345".into(),
            clinic: "Campus Health Centre".into(),
        }
    }

    #[test]
    fn patient_block_spans_and_stringified_age() {
        let summary = annotate(&sample_fields(), "rx-1");
        assert!(summary.summary_text.contains("[Jane Doe]{patient_name}"));
        assert!(summary.summary_text.contains("[34]{age}"));
        assert!(summary.summary_text.contains("[Female]{sex}"));

        let age_link = summary
            .provenance_links
            .iter()
            .find(|l| l.field_name == "age")
            .unwrap();
        assert_eq!(age_link.value, "34");
        assert_eq!(age_link.source_field, "age");
    }

    #[test]
    fn every_span_has_a_link_in_narrative_order() {
        let summary = annotate(&sample_fields(), "rx-1");
        let roles: Vec<&str> = summary
            .provenance_links
            .iter()
            .map(|l| l.field_name.as_str())
            .collect();
        assert_eq!(
            roles,
            vec![
                "patient_name",
                "age",
                "sex",
                "clinic",
                "date",
                "prescriber",
                "symptom",
                "symptom",
                "medicine",
                "frequency",
                "duration",
                "test",
                "advice",
            ]
        );

        for link in &summary.provenance_links {
            assert_eq!(link.source_type, "prescription");
            assert_eq!(link.source_id, "rx-1");
        }
    }

    #[test]
    fn medicine_paths_are_indexed_symptom_and_test_paths_are_bare() {
        let mut fields = sample_fields();
        fields.medicines.push(Medicine {
            name: "Ibuprofen".into(),
            dosage: "400 mg".into(),
            form: "tablet".into(),
            frequency: "Thrice daily".into(),
            duration: "3 days".into(),
            route: "Oral".into(),
            quantity: 9,
        });
        let summary = annotate(&fields, "rx-1");

        let paths: Vec<&str> = summary
            .provenance_links
            .iter()
            .filter(|l| matches!(l.field_name.as_str(), "medicine" | "frequency" | "duration"))
            .map(|l| l.source_field.as_str())
            .collect();
        assert_eq!(
            paths,
            vec![
                "medicines[0].name",
                "medicines[0].frequency",
                "medicines[0].duration",
                "medicines[1].name",
                "medicines[1].frequency",
                "medicines[1].duration",
            ]
        );

        for link in &summary.provenance_links {
            match link.field_name.as_str() {
                "symptom" => assert_eq!(link.source_field, "symptoms"),
                "test" => assert_eq!(link.source_field, "recommended_tests"),
                _ => {}
            }
        }
    }

    #[test]
    fn empty_sections_are_omitted_entirely() {
        let fields = ClinicalFields {
            patient_name: "Bob".into(),
            age: 20,
            sex: "Male".into(),
            ..ClinicalFields::default()
        };
        let summary = annotate(&fields, "rx-2");
        assert!(!summary.summary_text.contains("**Visit**"));
        assert!(!summary.summary_text.contains("**Presenting Symptoms**"));
        assert!(!summary.summary_text.contains("**Prescribed Medications**"));
        assert!(!summary.summary_text.contains("**Recommended Tests**"));
        assert!(!summary.summary_text.contains("**Clinical Advice**"));
        assert_eq!(summary.provenance_links.len(), 3);
    }

    #[test]
    fn date_without_clinic_renders_without_visit_header() {
        let fields = ClinicalFields {
            patient_name: "Bob".into(),
            age: 20,
            sex: "Male".into(),
            date: "2024-02-02".into(),
            ..ClinicalFields::default()
        };
        let summary = annotate(&fields, "rx-2");
        assert!(!summary.summary_text.contains("**Visit**"));
        assert!(summary.summary_text.contains(" on [2024-02-02]{date}"));
    }

    #[test]
    fn medicine_without_frequency_or_duration_omits_those_spans() {
        let fields = ClinicalFields {
            patient_name: "Bob".into(),
            age: 20,
            sex: "Male".into(),
            medicines: vec![Medicine {
                name: "Aspirin".into(),
                dosage: "75 mg".into(),
                form: "tablet".into(),
                frequency: String::new(),
                duration: String::new(),
                route: "Oral".into(),
                quantity: 28,
            }],
            ..ClinicalFields::default()
        };
        let summary = annotate(&fields, "rx-3");
        assert!(summary.summary_text.contains("1. [Aspirin]{medicine} 75 mg\n"));
        assert!(!summary.summary_text.contains("{frequency}"));
        assert!(!summary.summary_text.contains("{duration}"));

        let roles: Vec<&str> = summary
            .provenance_links
            .iter()
            .map(|l| l.field_name.as_str())
            .collect();
        assert_eq!(roles, vec!["patient_name", "age", "sex", "medicine"]);
    }

    #[test]
    fn annotation_is_deterministic() {
        let fields = sample_fields();
        assert_eq!(annotate(&fields, "rx-1"), annotate(&fields, "rx-1"));
    }
}

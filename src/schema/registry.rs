//! Built-in field catalogue for statutory inspection reports.
//!
//! Covers the fields the audit workflow cares about on LOLER thorough
//! examination certificates and the related compliance / repair /
//! service report formats.

use super::{FieldDefinition, NormalizerKind, Severity};

/// The immutable set of field definitions extraction runs against.
pub struct FieldRegistry {
    fields: Vec<FieldDefinition>,
}

impl FieldRegistry {
    /// The standard inspection-report catalogue.
    pub fn standard() -> Self {
        Self {
            fields: vec![
                field(
                    "job_no",
                    "Job Number",
                    true,
                    Severity::S0,
                    &[
                        r"(?i)\bjob\s*(?:no|number|ref|reference)\.?\s*[:#-]?\s*([A-Z0-9][A-Z0-9/-]*)",
                        r"(?i)\bjob\s*[:#]\s*([A-Z0-9-]+)",
                    ],
                    &["Job No", "Job Number", "Job Ref"],
                    "the job or works order number for this examination",
                    NormalizerKind::Uppercase,
                ),
                field(
                    "asset_no",
                    "Asset Number",
                    true,
                    Severity::S0,
                    &[
                        r"(?i)\b(?:asset|equipment|plant)\s*(?:no|number|id|ref)\.?\s*[:#-]?\s*([A-Z0-9][A-Z0-9/-]*)",
                        r"(?i)\bserial\s*(?:no|number)\.?\s*[:#-]?\s*([A-Z0-9][A-Z0-9/-]*)",
                    ],
                    &["Asset No", "Asset Number", "Equipment No", "Serial No"],
                    "the asset, equipment, or serial number of the item examined",
                    NormalizerKind::Uppercase,
                ),
                field(
                    "date",
                    "Examination Date",
                    true,
                    Severity::S1,
                    &[
                        r"(?i)\bdate\s*of\s*(?:thorough\s*)?(?:examination|inspection|test)\s*[:\-]?\s*(\d{1,2}[./-]\d{1,2}[./-]\d{2,4}|\d{4}[./-]\d{1,2}[./-]\d{1,2})",
                        r"(?i)\bdate\s*[:\-]\s*(\d{1,2}[./-]\d{1,2}[./-]\d{2,4}|\d{4}[./-]\d{1,2}[./-]\d{1,2})",
                    ],
                    &["Date", "Date of Examination", "Examination Date", "Inspection Date"],
                    "the date the examination or inspection was carried out",
                    NormalizerKind::Date,
                ),
                field(
                    "safe_to_use",
                    "Safe To Use",
                    true,
                    Severity::S0,
                    &[
                        r"(?i)\bsafe\s*(?:to|for)\s*(?:use|operate|operation)\s*\??\s*[:\-]?\s*(yes|no|y|n|true|false|1|0)\b",
                    ],
                    &["Safe to use", "Safe for use", "Safe to operate"],
                    "whether the equipment was declared safe to use (yes or no)",
                    NormalizerKind::Boolean,
                ),
                field(
                    "examiner",
                    "Examiner Name",
                    true,
                    Severity::S1,
                    &[
                        r"(?i)\b(?:examiner|engineer|inspector|surveyor)\s*(?:name)?\s*[:\-]\s*([A-Za-z][A-Za-z .'-]+)",
                        r"(?i)\b(?:examined|inspected|tested)\s*by\s*[:\-]?\s*([A-Za-z][A-Za-z .'-]+)",
                    ],
                    &["Examiner", "Engineer Name", "Examined By", "Inspected By"],
                    "the name of the competent person who carried out the examination",
                    NormalizerKind::Name,
                ),
                field(
                    "client_name",
                    "Customer Name",
                    false,
                    Severity::S2,
                    &[
                        r"(?i)\b(?:customer|client|company)\s*(?:name)?\s*[:\-]\s*([A-Za-z0-9][A-Za-z0-9 .,&'-]*)",
                    ],
                    &["Customer Name", "Client Name", "Customer", "Client"],
                    "the customer or client company the report was issued to",
                    NormalizerKind::Name,
                ),
                field(
                    "location",
                    "Site Location",
                    false,
                    Severity::S3,
                    &[r"(?i)\b(?:site|location|premises)\s*[:\-]\s*(.+)"],
                    &["Site", "Location", "Premises", "Site Address"],
                    "the site or premises where the equipment is installed",
                    NormalizerKind::None,
                ),
                field(
                    "next_due",
                    "Next Examination Date",
                    false,
                    Severity::S2,
                    &[
                        r"(?i)\b(?:next|due)\s*(?:examination|inspection|test)?\s*(?:date|due)?\s*[:\-]?\s*(\d{1,2}[./-]\d{1,2}[./-]\d{2,4}|\d{4}[./-]\d{1,2}[./-]\d{1,2})",
                    ],
                    &["Next Examination Date", "Next Inspection", "Due Date", "Next Due"],
                    "the date the next examination falls due",
                    NormalizerKind::Date,
                ),
                field(
                    "defects",
                    "Defects Noted",
                    false,
                    Severity::S2,
                    &[r"(?i)\bdefects?\s*(?:noted|found|identified|observed)?\s*[:\-]\s*(.+)"],
                    &["Defects", "Defects Noted", "Observations"],
                    "any defects or observations recorded on the report",
                    NormalizerKind::None,
                ),
                field(
                    "signature",
                    "Examiner Signature",
                    false,
                    Severity::S3,
                    &[r"(?i)\b(?:signature|signed|digitally\s+signed)\b"],
                    &["Signature", "Signed"],
                    "whether the report carries an examiner signature",
                    NormalizerKind::None,
                ),
            ],
        }
    }

    /// A registry over caller-supplied definitions.
    pub fn from_fields(fields: Vec<FieldDefinition>) -> Self {
        Self { fields }
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.fields.iter()
    }

    pub fn get(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn required_count(&self) -> usize {
        self.fields.iter().filter(|f| f.required).count()
    }
}

/// Built-in definitions carry compiled-in patterns; a failure here is a
/// bug in the table, not a runtime condition.
fn field(
    name: &str,
    display_name: &str,
    required: bool,
    severity: Severity,
    patterns: &[&str],
    fuzzy_labels: &[&str],
    llm_instruction: &str,
    normalizer: NormalizerKind,
) -> FieldDefinition {
    FieldDefinition::new(
        name,
        display_name,
        required,
        severity,
        patterns,
        fuzzy_labels,
        llm_instruction,
        normalizer,
    )
    .expect("built-in field definition must compile")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_registry_builds() {
        let registry = FieldRegistry::standard();
        assert!(!registry.is_empty());
        assert_eq!(registry.required_count(), 5);
    }

    #[test]
    fn standard_registry_field_names_unique() {
        let registry = FieldRegistry::standard();
        let mut names: Vec<&str> = registry.iter().map(|f| f.name.as_str()).collect();
        let before = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), before);
    }

    #[test]
    fn lookup_by_name() {
        let registry = FieldRegistry::standard();
        let field = registry.get("safe_to_use").unwrap();
        assert_eq!(field.display_name, "Safe To Use");
        assert!(field.required);
        assert_eq!(field.severity, Severity::S0);
        assert_eq!(field.normalizer, NormalizerKind::Boolean);
    }

    #[test]
    fn job_no_pattern_matches_typical_line() {
        let registry = FieldRegistry::standard();
        let field = registry.get("job_no").unwrap();
        let caps = field.patterns[0].captures("Job No: 4821").unwrap();
        assert_eq!(caps.get(1).unwrap().as_str(), "4821");
    }

    #[test]
    fn asset_no_pattern_keeps_hyphenated_ids() {
        let registry = FieldRegistry::standard();
        let field = registry.get("asset_no").unwrap();
        let caps = field.patterns[0].captures("Asset No: AB-1234").unwrap();
        assert_eq!(caps.get(1).unwrap().as_str(), "AB-1234");
    }

    #[test]
    fn safe_to_use_pattern_tolerates_question_mark() {
        let registry = FieldRegistry::standard();
        let field = registry.get("safe_to_use").unwrap();
        let caps = field.patterns[0].captures("Safe to use? Yes").unwrap();
        assert_eq!(caps.get(1).unwrap().as_str(), "Yes");
    }

    #[test]
    fn signature_pattern_is_presence_only() {
        let registry = FieldRegistry::standard();
        let field = registry.get("signature").unwrap();
        let caps = field.patterns[0].captures("Digitally signed by the examiner").unwrap();
        assert!(caps.get(1).is_none());
    }

    #[test]
    fn every_field_has_fuzzy_labels() {
        let registry = FieldRegistry::standard();
        for field in registry.iter() {
            assert!(!field.fuzzy_labels.is_empty(), "{} has no labels", field.name);
        }
    }
}

//! OCR misrecognition correction, applied once per document before any
//! extraction runs.
//!
//! The table is fixed and ordered: whole-word form corrections first,
//! then the short glyph-confusion pairs. Every entry is matched with
//! word boundaries and applied in table order, so output is
//! reproducible byte-for-byte.

use std::sync::LazyLock;

use regex::Regex;

/// Ordered (misread, correction) pairs. Longer form-label corrections
/// come before the two-letter confusion pairs.
const OCR_CORRECTIONS: &[(&str, &str)] = &[
    ("Custorner", "Customer"),
    ("custorner", "customer"),
    ("Narne", "Name"),
    ("narne", "name"),
    ("Nurnber", "Number"),
    ("nurnber", "number"),
    ("Exarnination", "Examination"),
    ("exarnination", "examination"),
    ("Exarniner", "Examiner"),
    ("exarniner", "examiner"),
    ("Equiprnent", "Equipment"),
    ("equiprnent", "equipment"),
    ("Signaturc", "Signature"),
    ("ldentification", "Identification"),
    ("lnspection", "Inspection"),
    ("Dale", "Date"),
    ("Jop", "Job"),
    ("Asse1", "Asset"),
    ("Sate", "Safe"),
    ("sate", "safe"),
    // glyph confusions, standalone tokens only
    ("rn", "m"),
    ("cl", "d"),
    ("vv", "w"),
];

static COMPILED: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    OCR_CORRECTIONS
        .iter()
        .map(|&(misread, correction)| {
            let pattern = format!(r"\b{}\b", regex::escape(misread));
            (Regex::new(&pattern).expect("valid correction pattern"), correction)
        })
        .collect()
});

/// Apply the OCR correction table to raw document text.
pub fn correct_ocr_text(text: &str) -> String {
    let mut corrected = text.to_string();
    for (re, replacement) in COMPILED.iter() {
        if re.is_match(&corrected) {
            corrected = re.replace_all(&corrected, *replacement).into_owned();
        }
    }
    corrected
}

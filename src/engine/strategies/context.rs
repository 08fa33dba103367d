//! Context strategy — positional inference around a literal label hit.
//!
//! Looser than the fuzzy strategy: a plain case-insensitive substring
//! match on the label, with the value taken from the same line or,
//! failing that, the line below.

use super::ExtractionStrategy;
use crate::engine::types::{thresholds, ExtractionResult, StrategyKind};
use crate::schema::FieldDefinition;

const SEPARATOR: char = ':';

/// A line reads as a label when a short prefix precedes the separator.
const MAX_LABEL_PREFIX_WORDS: usize = 4;

pub struct ContextStrategy;

impl ExtractionStrategy for ContextStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Context
    }

    fn extract(&self, text: &str, field: &FieldDefinition) -> ExtractionResult {
        let lines: Vec<&str> = text.lines().collect();

        for (idx, line) in lines.iter().enumerate() {
            let lower = line.to_lowercase();

            for label in &field.fuzzy_labels {
                if !lower.contains(&label.to_lowercase()) {
                    continue;
                }

                if let Some((_, after)) = line.split_once(SEPARATOR) {
                    let value = after.trim();
                    if !value.is_empty() {
                        return ExtractionResult {
                            value: Some(value.to_string()),
                            confidence: thresholds::CONTEXT_INLINE,
                            strategy: StrategyKind::Context,
                            evidence: format!("value follows \"{label}\" on the same line"),
                        };
                    }
                }

                if let Some(next) = lines.get(idx + 1) {
                    let candidate = next.trim();
                    if !candidate.is_empty() && !looks_like_label_line(candidate) {
                        return ExtractionResult {
                            value: Some(candidate.to_string()),
                            confidence: thresholds::CONTEXT_NEXT_LINE,
                            strategy: StrategyKind::Context,
                            evidence: format!("line below \"{label}\""),
                        };
                    }
                }
            }
        }
        ExtractionResult::miss(StrategyKind::Context)
    }
}

fn looks_like_label_line(line: &str) -> bool {
    match line.split_once(SEPARATOR) {
        Some((prefix, _)) => {
            let prefix = prefix.trim();
            !prefix.is_empty() && prefix.split_whitespace().count() <= MAX_LABEL_PREFIX_WORDS
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{NormalizerKind, Severity};

    fn examiner_field() -> FieldDefinition {
        FieldDefinition::new(
            "examiner",
            "Examiner Name",
            true,
            Severity::S1,
            &[],
            &["Examiner", "Examined By"],
            "",
            NormalizerKind::Name,
        )
        .unwrap()
    }

    #[test]
    fn inline_value_scores_seventy() {
        let result = ContextStrategy.extract("Examiner: Jane Doe", &examiner_field());
        assert_eq!(result.value.as_deref(), Some("Jane Doe"));
        assert_eq!(result.confidence, thresholds::CONTEXT_INLINE);
    }

    #[test]
    fn label_match_is_case_insensitive_contains() {
        let result = ContextStrategy.extract("Report EXAMINED BY: Jane Doe", &examiner_field());
        assert_eq!(result.value.as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn bare_label_takes_following_line() {
        let result = ContextStrategy.extract("Examiner\nJane Doe", &examiner_field());
        assert_eq!(result.value.as_deref(), Some("Jane Doe"));
        assert_eq!(result.confidence, thresholds::CONTEXT_NEXT_LINE);
    }

    #[test]
    fn empty_inline_value_falls_through_to_next_line() {
        let result = ContextStrategy.extract("Examiner:\nJane Doe", &examiner_field());
        assert_eq!(result.value.as_deref(), Some("Jane Doe"));
        assert_eq!(result.confidence, thresholds::CONTEXT_NEXT_LINE);
    }

    #[test]
    fn next_line_that_is_itself_a_label_is_rejected() {
        let result = ContextStrategy.extract("Examiner\nAsset No: AB-1234", &examiner_field());
        assert!(!result.is_hit());
    }

    #[test]
    fn long_prose_next_line_is_accepted() {
        // A sentence with a colon after many words is not a label line.
        let text = "Examiner\nThe thorough examination was carried out by Jane Doe who noted: none";
        let result = ContextStrategy.extract(text, &examiner_field());
        assert!(result.is_hit());
        assert_eq!(result.confidence, thresholds::CONTEXT_NEXT_LINE);
    }

    #[test]
    fn absent_label_is_a_miss() {
        let result = ContextStrategy.extract("no relevant content", &examiner_field());
        assert!(!result.is_hit());
    }

    #[test]
    fn label_on_last_line_with_no_value_is_a_miss() {
        let result = ContextStrategy.extract("Notes\nExaminer", &examiner_field());
        assert!(!result.is_hit());
    }
}

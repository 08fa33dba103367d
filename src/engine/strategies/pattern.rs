//! Pattern strategy — the field's ordered regexes against the full
//! text, first match wins.

use super::ExtractionStrategy;
use crate::engine::types::{thresholds, ExtractionResult, StrategyKind};
use crate::schema::FieldDefinition;

/// Pattern source strings longer than this score as specific matches.
/// A length proxy, kept as-is: downstream consumers depend on the
/// exact confidence values it produces.
const SPECIFIC_PATTERN_LEN: usize = 50;

/// Longest evidence excerpt carried on a result.
const EVIDENCE_EXCERPT_LEN: usize = 60;

pub struct PatternStrategy;

impl ExtractionStrategy for PatternStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Pattern
    }

    fn extract(&self, text: &str, field: &FieldDefinition) -> ExtractionResult {
        for re in &field.patterns {
            let Some(caps) = re.captures(text) else { continue };
            let whole = caps.get(0).map_or("", |m| m.as_str());

            match caps.get(1) {
                Some(group) => {
                    let value = group.as_str().trim();
                    if value.is_empty() {
                        continue;
                    }
                    let confidence = if re.as_str().len() > SPECIFIC_PATTERN_LEN {
                        thresholds::PATTERN_SPECIFIC
                    } else {
                        thresholds::PATTERN_GENERIC
                    };
                    return ExtractionResult {
                        value: Some(value.to_string()),
                        confidence,
                        strategy: StrategyKind::Pattern,
                        evidence: format!("matched \"{}\"", excerpt(whole)),
                    };
                }
                // Presence-only field: the label alone is the signal.
                None => {
                    return ExtractionResult {
                        value: Some("Present".to_string()),
                        confidence: thresholds::PRESENCE_ONLY,
                        strategy: StrategyKind::Pattern,
                        evidence: format!("label present: \"{}\"", excerpt(whole)),
                    };
                }
            }
        }
        ExtractionResult::miss(StrategyKind::Pattern)
    }
}

fn excerpt(text: &str) -> String {
    if text.chars().count() <= EVIDENCE_EXCERPT_LEN {
        text.to_string()
    } else {
        text.chars().take(EVIDENCE_EXCERPT_LEN).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{NormalizerKind, Severity};

    fn capturing_field() -> FieldDefinition {
        FieldDefinition::new(
            "job_no",
            "Job Number",
            true,
            Severity::S0,
            &[
                r"(?i)\bjob\s*(?:no|number|ref|reference)\.?\s*[:#-]?\s*([A-Z0-9][A-Z0-9/-]*)",
                r"(?i)\bjob\s*[:#]\s*([A-Z0-9-]+)",
            ],
            &["Job No"],
            "",
            NormalizerKind::Uppercase,
        )
        .unwrap()
    }

    fn presence_field() -> FieldDefinition {
        FieldDefinition::new(
            "signature",
            "Examiner Signature",
            false,
            Severity::S3,
            &[r"(?i)\b(?:signature|signed)\b"],
            &["Signature"],
            "",
            NormalizerKind::None,
        )
        .unwrap()
    }

    #[test]
    fn long_pattern_scores_specific() {
        let result = PatternStrategy.extract("Job No: 4821", &capturing_field());
        assert_eq!(result.value.as_deref(), Some("4821"));
        assert_eq!(result.confidence, thresholds::PATTERN_SPECIFIC);
        assert_eq!(result.strategy, StrategyKind::Pattern);
    }

    #[test]
    fn short_pattern_scores_generic() {
        // First pattern requires a no/number token; only the short
        // fallback matches "Job: 77".
        let result = PatternStrategy.extract("Job: 77", &capturing_field());
        assert_eq!(result.value.as_deref(), Some("77"));
        assert_eq!(result.confidence, thresholds::PATTERN_GENERIC);
    }

    #[test]
    fn first_matching_pattern_wins() {
        let result = PatternStrategy.extract("Job No: 4821 and Job: 99", &capturing_field());
        assert_eq!(result.value.as_deref(), Some("4821"));
    }

    #[test]
    fn presence_only_yields_present_at_lower_confidence() {
        let result = PatternStrategy.extract("Signed on behalf of Acme", &presence_field());
        assert_eq!(result.value.as_deref(), Some("Present"));
        assert_eq!(result.confidence, thresholds::PRESENCE_ONLY);
    }

    #[test]
    fn no_match_is_a_miss() {
        let result = PatternStrategy.extract("nothing relevant here", &capturing_field());
        assert!(!result.is_hit());
        assert_eq!(result.confidence, 0.0);
    }

    #[test]
    fn evidence_carries_matched_excerpt() {
        let result = PatternStrategy.extract("Job No: 4821", &capturing_field());
        assert!(result.evidence.contains("Job No: 4821"));
    }
}

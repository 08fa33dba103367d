//! Fuzzy strategy — line-oriented label matching by edit distance.
//!
//! Assumes one field per line; only the first separator on a line
//! splits label from value, so "Time: 10:30" keeps "10:30" intact.

use super::ExtractionStrategy;
use crate::engine::similarity::similarity;
use crate::engine::types::{thresholds, ExtractionResult, StrategyKind};
use crate::schema::FieldDefinition;

const SEPARATOR: char = ':';

pub struct FuzzyStrategy;

impl ExtractionStrategy for FuzzyStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Fuzzy
    }

    fn extract(&self, text: &str, field: &FieldDefinition) -> ExtractionResult {
        for line in text.lines() {
            let Some((label_part, value_part)) = line.split_once(SEPARATOR) else {
                continue;
            };
            let label_part = label_part.trim();
            let value = value_part.trim();
            if label_part.is_empty() || value.is_empty() {
                continue;
            }

            for label in &field.fuzzy_labels {
                let score = similarity(label_part, label);
                if score >= thresholds::FUZZY_ACCEPT {
                    return ExtractionResult {
                        value: Some(value.to_string()),
                        confidence: score.min(thresholds::FUZZY_CAP),
                        strategy: StrategyKind::Fuzzy,
                        evidence: format!(
                            "\"{label_part}\" matched label \"{label}\" at {score:.0}%"
                        ),
                    };
                }
            }
        }
        ExtractionResult::miss(StrategyKind::Fuzzy)
    }
}

//! Ensemble voter — folds per-strategy results into one value and
//! confidence per field.
//!
//! Voting happens on raw strategy output; normalization runs on the
//! winner afterwards. Results must arrive in strategy priority order
//! (pattern, fuzzy, context, llm): ties break toward the first value
//! seen with the maximum count.

use crate::engine::types::{ExtractionResult, FieldExtraction};
use crate::schema::FieldDefinition;

/// Confidence added per agreeing strategy beyond the first.
const AGREEMENT_BOOST_STEP: f32 = 10.0;

/// Ceiling on the total agreement boost.
const AGREEMENT_BOOST_CAP: f32 = 15.0;

/// Pick the winning value and confidence for one field.
pub fn vote(field: &FieldDefinition, results: &[ExtractionResult]) -> FieldExtraction {
    let hits: Vec<&ExtractionResult> = results.iter().filter(|r| r.value.is_some()).collect();

    if hits.is_empty() {
        return FieldExtraction {
            display_name: field.display_name.clone(),
            required: field.required,
            severity: field.severity,
            value: None,
            confidence: 0.0,
            strategy: "none".to_string(),
            evidence: String::new(),
            consensus: None,
        };
    }

    // Tally in first-seen order; the input order carries strategy priority.
    let mut tally: Vec<(&str, u32)> = Vec::new();
    for hit in &hits {
        let value = hit.value.as_deref().unwrap_or_default();
        match tally.iter_mut().find(|(v, _)| *v == value) {
            Some((_, count)) => *count += 1,
            None => tally.push((value, 1)),
        }
    }

    let (winning_value, agreement) = tally
        .iter()
        .copied()
        .fold((tally[0].0, tally[0].1), |(best_v, best_c), (v, c)| {
            if c > best_c {
                (v, c)
            } else {
                (best_v, best_c)
            }
        });

    // Among results carrying the winning value, highest confidence wins;
    // confidence ties keep the earlier (higher-priority) strategy.
    let best = hits
        .iter()
        .copied()
        .filter(|h| h.value.as_deref() == Some(winning_value))
        .reduce(|best, h| if h.confidence > best.confidence { h } else { best })
        .unwrap_or(hits[0]);

    let boost = (AGREEMENT_BOOST_STEP * agreement.saturating_sub(1) as f32)
        .min(AGREEMENT_BOOST_CAP);
    let confidence = (best.confidence + boost).min(100.0);

    let strategy = if agreement > 1 {
        format!("ensemble({agreement} agree)")
    } else {
        best.strategy.as_str().to_string()
    };

    FieldExtraction {
        display_name: field.display_name.clone(),
        required: field.required,
        severity: field.severity,
        value: Some(winning_value.to_string()),
        confidence,
        strategy,
        evidence: best.evidence.clone(),
        consensus: (agreement > 1).then_some(agreement),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::types::StrategyKind;
    use crate::schema::{NormalizerKind, Severity};

    fn test_field() -> FieldDefinition {
        FieldDefinition::new(
            "date",
            "Examination Date",
            true,
            Severity::S1,
            &[],
            &["Date"],
            "",
            NormalizerKind::Date,
        )
        .unwrap()
    }

    fn hit(value: &str, confidence: f32, strategy: StrategyKind) -> ExtractionResult {
        ExtractionResult {
            value: Some(value.to_string()),
            confidence,
            strategy,
            evidence: format!("{strategy} evidence"),
        }
    }

    #[test]
    fn zero_results_yield_none_extraction() {
        let fx = vote(&test_field(), &[]);
        assert!(fx.value.is_none());
        assert_eq!(fx.confidence, 0.0);
        assert_eq!(fx.strategy, "none");
        assert!(fx.consensus.is_none());
    }

    #[test]
    fn all_misses_yield_none_extraction() {
        let results = vec![
            ExtractionResult::miss(StrategyKind::Pattern),
            ExtractionResult::miss(StrategyKind::Fuzzy),
            ExtractionResult::miss(StrategyKind::Context),
        ];
        let fx = vote(&test_field(), &results);
        assert!(fx.value.is_none());
        assert_eq!(fx.strategy, "none");
    }

    #[test]
    fn single_hit_keeps_its_own_strategy_and_confidence() {
        let results = vec![
            hit("2024-01-15", 85.0, StrategyKind::Pattern),
            ExtractionResult::miss(StrategyKind::Fuzzy),
            ExtractionResult::miss(StrategyKind::Context),
        ];
        let fx = vote(&test_field(), &results);
        assert_eq!(fx.value.as_deref(), Some("2024-01-15"));
        assert_eq!(fx.confidence, 85.0);
        assert_eq!(fx.strategy, "pattern");
        assert!(fx.consensus.is_none());
    }

    #[test]
    fn count_tie_breaks_toward_priority_order() {
        // Both values seen once: the pattern strategy's value wins and
        // the confidence stays unboosted.
        let results = vec![
            hit("2024-01-15", 85.0, StrategyKind::Pattern),
            hit("2024-01-16", 75.0, StrategyKind::Fuzzy),
        ];
        let fx = vote(&test_field(), &results);
        assert_eq!(fx.value.as_deref(), Some("2024-01-15"));
        assert_eq!(fx.confidence, 85.0);
        assert_eq!(fx.strategy, "pattern");
    }

    #[test]
    fn two_agreeing_strategies_boost_by_ten() {
        let results = vec![
            hit("JOHN SMITH", 85.0, StrategyKind::Pattern),
            hit("JOHN SMITH", 75.0, StrategyKind::Fuzzy),
        ];
        let fx = vote(&test_field(), &results);
        assert_eq!(fx.value.as_deref(), Some("JOHN SMITH"));
        assert_eq!(fx.confidence, 95.0);
        assert_eq!(fx.strategy, "ensemble(2 agree)");
        assert_eq!(fx.consensus, Some(2));
    }

    #[test]
    fn three_agreeing_strategies_cap_boost_at_fifteen() {
        let results = vec![
            hit("4821", 80.0, StrategyKind::Pattern),
            hit("4821", 78.0, StrategyKind::Fuzzy),
            hit("4821", 70.0, StrategyKind::Context),
        ];
        let fx = vote(&test_field(), &results);
        assert_eq!(fx.confidence, 95.0); // 80 + capped 15
        assert_eq!(fx.strategy, "ensemble(3 agree)");
        assert_eq!(fx.consensus, Some(3));
    }

    #[test]
    fn boosted_confidence_never_exceeds_one_hundred() {
        let results = vec![
            hit("4821", 95.0, StrategyKind::Pattern),
            hit("4821", 80.0, StrategyKind::Fuzzy),
            hit("4821", 70.0, StrategyKind::Context),
        ];
        let fx = vote(&test_field(), &results);
        assert_eq!(fx.confidence, 100.0);
    }

    #[test]
    fn majority_beats_priority() {
        let results = vec![
            hit("2024-01-15", 85.0, StrategyKind::Pattern),
            hit("2024-01-16", 75.0, StrategyKind::Fuzzy),
            hit("2024-01-16", 70.0, StrategyKind::Context),
        ];
        let fx = vote(&test_field(), &results);
        assert_eq!(fx.value.as_deref(), Some("2024-01-16"));
        assert_eq!(fx.confidence, 85.0); // best agreeing (75) + 10
        assert_eq!(fx.strategy, "ensemble(2 agree)");
    }

    #[test]
    fn best_result_carries_its_evidence() {
        let results = vec![
            hit("4821", 70.0, StrategyKind::Context),
            hit("4821", 85.0, StrategyKind::Llm),
        ];
        let fx = vote(&test_field(), &results);
        assert_eq!(fx.evidence, "llm evidence");
    }

    #[test]
    fn confidence_tie_among_winners_keeps_priority_result() {
        let results = vec![
            hit("4821", 80.0, StrategyKind::Pattern),
            hit("4821", 80.0, StrategyKind::Fuzzy),
        ];
        let fx = vote(&test_field(), &results);
        assert_eq!(fx.evidence, "pattern evidence");
    }
}

//! LLM fallback strategy.
//!
//! Runs only when the caller opts in and the deterministic strategies
//! come back empty or below the review threshold. Every provider
//! failure — connection, timeout, malformed JSON, low confidence —
//! collapses to the null result; this strategy never surfaces an error.

use super::ExtractionStrategy;
use crate::engine::types::{thresholds, EngineConfig, ExtractionResult, StrategyKind};
use crate::llm::{parse_field_answer, LlmClient};
use crate::schema::FieldDefinition;

const SYSTEM_PROMPT: &str =
    "You extract single field values from inspection report text. \
     Respond with one JSON object and nothing else.";

pub struct LlmStrategy<'a> {
    client: &'a dyn LlmClient,
    config: &'a EngineConfig,
}

impl<'a> LlmStrategy<'a> {
    pub fn new(client: &'a dyn LlmClient, config: &'a EngineConfig) -> Self {
        Self { client, config }
    }

    fn build_prompt(&self, text: &str, field: &FieldDefinition) -> String {
        let excerpt: String = text.chars().take(self.config.llm_context_chars).collect();
        format!(
            "Find the value of one field in the inspection report below.\n\
             Field: {display}\n\
             Hint: {hint}\n\n\
             Respond with exactly one JSON object:\n\
             {{\"value\": \"<the value>\" or null, \"confidence\": <0-100>, \"evidence\": \"<short quote>\"}}\n\
             Use null and confidence 0 if the field is absent.\n\n\
             REPORT:\n{excerpt}",
            display = field.display_name,
            hint = field.llm_instruction,
        )
    }
}

impl ExtractionStrategy for LlmStrategy<'_> {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Llm
    }

    fn extract(&self, text: &str, field: &FieldDefinition) -> ExtractionResult {
        let prompt = self.build_prompt(text, field);

        let completion =
            match self.client.generate(&self.config.model_name, &prompt, SYSTEM_PROMPT) {
                Ok(completion) => completion,
                Err(e) => {
                    tracing::debug!(field = field.name.as_str(), error = %e, "LLM fallback unavailable");
                    return ExtractionResult::miss(StrategyKind::Llm);
                }
            };

        let Some(answer) = parse_field_answer(&completion) else {
            tracing::debug!(field = field.name.as_str(), "no usable JSON object in LLM response");
            return ExtractionResult::miss(StrategyKind::Llm);
        };

        let Some(value) = answer.value else {
            return ExtractionResult::miss(StrategyKind::Llm);
        };
        let value = value.trim();
        if value.is_empty()
            || value.eq_ignore_ascii_case("null")
            || value.eq_ignore_ascii_case("none")
        {
            return ExtractionResult::miss(StrategyKind::Llm);
        }
        if answer.confidence <= thresholds::LLM_ACCEPT {
            tracing::debug!(
                field = field.name.as_str(),
                confidence = answer.confidence,
                "LLM answer below acceptance threshold"
            );
            return ExtractionResult::miss(StrategyKind::Llm);
        }

        ExtractionResult {
            value: Some(value.to_string()),
            confidence: answer.confidence.clamp(0.0, 100.0),
            strategy: StrategyKind::Llm,
            evidence: answer.evidence,
        }
    }
}

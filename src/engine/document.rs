//! Document processor — drives every registry field through the
//! strategy stack, votes, normalizes, and derives the verdict.
//!
//! Processing is pure over `(text, registry, options)` apart from the
//! optional LLM call; with `use_llm` off, repeated runs produce
//! identical results (excluding the processing duration).

use std::collections::BTreeMap;
use std::time::Instant;

use tracing::debug;

use crate::engine::ensemble;
use crate::engine::normalize::normalize_value;
use crate::engine::preprocess::correct_ocr_text;
use crate::engine::strategies::{deterministic_strategies, ExtractionStrategy, LlmStrategy};
use crate::engine::types::{
    thresholds, round1, DocumentExtractionResult, DocumentType, EngineConfig, ExtractionResult,
    FieldExtraction, ProcessOptions, Verdict,
};
use crate::llm::LlmClient;
use crate::schema::FieldRegistry;

/// Document type sniffing phrases, first match wins.
const DOCUMENT_TYPE_MARKERS: &[(&str, DocumentType)] = &[
    ("loler", DocumentType::Loler),
    ("compliance report", DocumentType::ComplianceReport),
    ("repair report", DocumentType::RepairReport),
    ("service report", DocumentType::ServiceReport),
];

pub struct DocumentProcessor {
    registry: FieldRegistry,
    config: EngineConfig,
    strategies: Vec<Box<dyn ExtractionStrategy>>,
    llm: Option<Box<dyn LlmClient>>,
}

impl DocumentProcessor {
    pub fn new(registry: FieldRegistry, config: EngineConfig) -> Self {
        Self {
            registry,
            config,
            strategies: deterministic_strategies(),
            llm: None,
        }
    }

    /// Attach an LLM client for the fallback strategy. The fallback
    /// still only runs for calls that opt in via `ProcessOptions`.
    pub fn with_llm(mut self, client: Box<dyn LlmClient>) -> Self {
        self.llm = Some(client);
        self
    }

    pub fn registry(&self) -> &FieldRegistry {
        &self.registry
    }

    /// Extract every registry field from one document and derive the
    /// verdict. Never fails: malformed or empty text simply yields
    /// fewer matches and a lower quality score.
    pub fn process_document(
        &self,
        text: &str,
        filename: &str,
        options: &ProcessOptions,
    ) -> DocumentExtractionResult {
        let start = Instant::now();

        let corrected = correct_ocr_text(text);
        let document_type = detect_document_type(&corrected);

        let mut fields: BTreeMap<String, FieldExtraction> = BTreeMap::new();
        let mut extracted_data: BTreeMap<String, String> = BTreeMap::new();

        for field in self.registry.iter() {
            let mut results: Vec<ExtractionResult> = self
                .strategies
                .iter()
                .map(|strategy| strategy.extract(&corrected, field))
                .collect();

            if options.use_llm {
                if let Some(client) = self.llm.as_deref() {
                    let best = results
                        .iter()
                        .filter(|r| r.is_hit())
                        .map(|r| r.confidence)
                        .fold(0.0_f32, f32::max);
                    if !results.iter().any(ExtractionResult::is_hit)
                        || best < thresholds::LLM_TRIGGER
                    {
                        let llm = LlmStrategy::new(client, &self.config);
                        results.push(llm.extract(&corrected, field));
                    }
                }
            }

            let mut extraction = ensemble::vote(field, &results);
            if let Some(raw) = extraction.value.take() {
                extraction.value = Some(normalize_value(&raw, field.normalizer));
            }

            debug!(
                field = field.name.as_str(),
                strategy = extraction.strategy.as_str(),
                confidence = extraction.confidence,
                "field resolved"
            );

            if let Some(value) = &extraction.value {
                extracted_data.insert(field.name.clone(), value.clone());
            }
            fields.insert(field.name.clone(), extraction);
        }

        let required_total = self.registry.required_count();
        let optional_total = self.registry.len() - required_total;
        let required_extracted = fields
            .values()
            .filter(|f| f.required && f.value.is_some())
            .count();
        let optional_extracted = fields
            .values()
            .filter(|f| !f.required && f.value.is_some())
            .count();
        let extracted_count = required_extracted + optional_extracted;

        // Field-name lists stay in registry order.
        let missing_required: Vec<String> = self
            .registry
            .iter()
            .filter(|f| f.required)
            .filter(|f| !fields.get(&f.name).is_some_and(|fx| fx.value.is_some()))
            .map(|f| f.display_name.clone())
            .collect();

        let low_confidence_fields: Vec<String> = self
            .registry
            .iter()
            .filter_map(|f| fields.get(&f.name))
            .filter(|fx| fx.confidence > 0.0 && fx.confidence < thresholds::REVIEW)
            .map(|fx| fx.display_name.clone())
            .collect();

        let quality_score =
            quality_score(required_extracted, required_total, optional_extracted, optional_total);

        let average_confidence = if extracted_count == 0 {
            0.0
        } else {
            round1(
                fields
                    .values()
                    .filter(|f| f.value.is_some())
                    .map(|f| f.confidence)
                    .sum::<f32>()
                    / extracted_count as f32,
            )
        };

        // Required-field absence is a hard gate; everything else routes
        // through the review queue before a pass is granted.
        let verdict = if !missing_required.is_empty() {
            Verdict::Fail
        } else if !low_confidence_fields.is_empty() {
            Verdict::ReviewQueue
        } else if quality_score >= thresholds::PASS_QUALITY {
            Verdict::Pass
        } else {
            Verdict::ReviewQueue
        };

        debug!(
            filename,
            verdict = verdict.as_str(),
            quality_score,
            average_confidence,
            "document processed"
        );

        DocumentExtractionResult {
            filename: filename.to_string(),
            verdict,
            quality_score,
            average_confidence,
            extracted_count,
            total_fields: self.registry.len(),
            required_extracted,
            required_total,
            missing_required,
            low_confidence_fields,
            extracted_data,
            fields,
            document_type,
            extraction_method: options.extraction_method,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }
}

/// Weighted completeness blend: 70% required coverage, 30% optional.
/// An empty optional (or required) side counts as fully covered.
pub fn quality_score(
    required_extracted: usize,
    required_total: usize,
    optional_extracted: usize,
    optional_total: usize,
) -> f32 {
    let required_pct = if required_total == 0 {
        100.0
    } else {
        required_extracted as f32 / required_total as f32 * 100.0
    };
    let optional_pct = if optional_total == 0 {
        100.0
    } else {
        optional_extracted as f32 / optional_total as f32 * 100.0
    };
    round1(0.7 * required_pct + 0.3 * optional_pct)
}

/// Case-insensitive substring sniff over the known report families.
pub fn detect_document_type(text: &str) -> DocumentType {
    let lower = text.to_lowercase();
    for (marker, doc_type) in DOCUMENT_TYPE_MARKERS {
        if lower.contains(marker) {
            return *doc_type;
        }
    }
    DocumentType::Unknown
}

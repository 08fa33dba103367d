//! Core types for the extraction engine.
//!
//! These model the full lifecycle:
//! raw text → strategy results → ensemble vote → field record → document verdict.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::schema::Severity;

/// Confidence thresholds and fixed strategy scores (0–100 scale).
pub mod thresholds {
    /// Fields scoring in (0, REVIEW) land in the review queue.
    pub const REVIEW: f32 = 70.0;

    /// Quality score at or above this passes outright.
    pub const PASS_QUALITY: f32 = 90.0;

    /// Pattern match from a specific (long) pattern.
    pub const PATTERN_SPECIFIC: f32 = 85.0;

    /// Pattern match from a generic pattern.
    pub const PATTERN_GENERIC: f32 = 75.0;

    /// Label present without a captured value.
    pub const PRESENCE_ONLY: f32 = 70.0;

    /// Minimum similarity for a fuzzy label match.
    pub const FUZZY_ACCEPT: f32 = 70.0;

    /// Ceiling on fuzzy-match confidence.
    pub const FUZZY_CAP: f32 = 80.0;

    /// Context hit with the value on the label's own line.
    pub const CONTEXT_INLINE: f32 = 70.0;

    /// Context hit taken from the following line.
    pub const CONTEXT_NEXT_LINE: f32 = 60.0;

    /// Deterministic-strategy confidence below which the LLM fallback fires.
    pub const LLM_TRIGGER: f32 = 70.0;

    /// LLM answers at or below this confidence are discarded.
    pub const LLM_ACCEPT: f32 = 50.0;
}

/// Round to one decimal place, the precision reported downstream.
pub(crate) fn round1(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}

// ═══════════════════════════════════════════
// Strategies
// ═══════════════════════════════════════════

/// The four extraction strategies, in voting priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    Pattern,
    Fuzzy,
    Context,
    Llm,
}

impl StrategyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pattern => "pattern",
            Self::Fuzzy => "fuzzy",
            Self::Context => "context",
            Self::Llm => "llm",
        }
    }
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One strategy's attempt at one field. Ephemeral — consumed by the voter.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    pub value: Option<String>,
    pub confidence: f32,
    pub strategy: StrategyKind,
    pub evidence: String,
}

impl ExtractionResult {
    /// The null result: no candidate, zero confidence.
    pub fn miss(strategy: StrategyKind) -> Self {
        Self {
            value: None,
            confidence: 0.0,
            strategy,
            evidence: String::new(),
        }
    }

    pub fn is_hit(&self) -> bool {
        self.value.is_some()
    }
}

// ═══════════════════════════════════════════
// Field record
// ═══════════════════════════════════════════

/// Final extraction record for one field of one document.
/// Immutable once the document processor has produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldExtraction {
    pub display_name: String,
    pub required: bool,
    pub severity: Severity,
    pub value: Option<String>,
    pub confidence: f32,
    /// "pattern", "fuzzy", "context", "llm", "none", or "ensemble(N agree)".
    pub strategy: String,
    pub evidence: String,
    /// Number of agreeing strategies when consensus occurred.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consensus: Option<u32>,
}

// ═══════════════════════════════════════════
// Document result
// ═══════════════════════════════════════════

/// Document-level outcome of the verdict state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    Pass,
    Fail,
    ReviewQueue,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pass => "PASS",
            Self::Fail => "FAIL",
            Self::ReviewQueue => "REVIEW_QUEUE",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Detected report family, sniffed from the corrected text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentType {
    Loler,
    ComplianceReport,
    RepairReport,
    ServiceReport,
    Unknown,
}

impl DocumentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Loler => "LOLER",
            Self::ComplianceReport => "COMPLIANCE_REPORT",
            Self::RepairReport => "REPAIR_REPORT",
            Self::ServiceReport => "SERVICE_REPORT",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How the caller obtained the raw text. Descriptive metadata only; the
/// engine never branches on it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExtractionMethod {
    #[default]
    EmbeddedText,
    Ocr,
    Hybrid,
}

impl ExtractionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EmbeddedText => "EMBEDDED_TEXT",
            Self::Ocr => "OCR",
            Self::Hybrid => "HYBRID",
        }
    }
}

impl std::fmt::Display for ExtractionMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-call options for the document processor.
#[derive(Debug, Clone, Default)]
pub struct ProcessOptions {
    pub use_llm: bool,
    pub extraction_method: ExtractionMethod,
}

/// Everything the audit workflow needs to know about one document.
/// Produced fresh per call; never mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentExtractionResult {
    pub filename: String,
    pub verdict: Verdict,
    /// Weighted completeness score, 0–100 to one decimal.
    pub quality_score: f32,
    /// Mean confidence over extracted fields, one decimal.
    pub average_confidence: f32,
    pub extracted_count: usize,
    pub total_fields: usize,
    pub required_extracted: usize,
    pub required_total: usize,
    pub missing_required: Vec<String>,
    pub low_confidence_fields: Vec<String>,
    /// Winning values keyed by field name.
    pub extracted_data: BTreeMap<String, String>,
    /// Full per-field records keyed by field name.
    pub fields: BTreeMap<String, FieldExtraction>,
    pub document_type: DocumentType,
    pub extraction_method: ExtractionMethod,
    pub processing_time_ms: u64,
}

// ═══════════════════════════════════════════
// Batch
// ═══════════════════════════════════════════

/// One document queued for batch processing.
#[derive(Debug, Clone)]
pub struct BatchDocument {
    pub text: String,
    pub filename: String,
}

/// Per-run options for the batch processor.
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    pub use_llm: bool,
}

/// Aggregate statistics over one batch run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub batch_id: String,
    pub documents: usize,
    pub passed: usize,
    pub failed: usize,
    pub review_queue: usize,
    pub mean_quality_score: f32,
    pub mean_confidence: f32,
    pub duration_ms: u64,
}

/// Result list plus summary; list order matches input order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchOutcome {
    pub results: Vec<DocumentExtractionResult>,
    pub summary: BatchSummary,
}

// ═══════════════════════════════════════════
// Configuration
// ═══════════════════════════════════════════

/// Deployment knobs for the engine. Fixed strategy scores live in
/// [`thresholds`], not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Model requested from the LLM endpoint.
    pub model_name: String,
    /// Timeout applied to each LLM request.
    pub llm_timeout_secs: u64,
    /// Document prefix sent to the LLM, in characters.
    pub llm_context_chars: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            model_name: "llama3.1:8b".to_string(),
            llm_timeout_secs: 60,
            llm_context_chars: 4000,
        }
    }
}

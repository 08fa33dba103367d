//! Veridoc — multi-strategy field extraction for inspection-report
//! quality auditing.
//!
//! Raw report text goes in; confidence-scored field values and a
//! PASS / FAIL / REVIEW_QUEUE verdict come out. Independent strategies
//! (pattern, fuzzy label, positional context, and an optional LLM
//! fallback) each propose a value per field; an ensemble vote picks
//! the winner and boosts confidence when strategies agree.
//!
//! ```
//! use veridoc::{DocumentProcessor, EngineConfig, FieldRegistry, ProcessOptions, Verdict};
//!
//! let processor = DocumentProcessor::new(FieldRegistry::standard(), EngineConfig::default());
//! let result = processor.process_document(
//!     "Job No: 4821\nSafe to use? Yes",
//!     "cert-4821.txt",
//!     &ProcessOptions::default(),
//! );
//! assert_eq!(result.verdict, Verdict::Fail); // required fields missing
//! ```

pub mod config;
pub mod engine;
pub mod llm;
pub mod schema;

pub use engine::{
    BatchDocument, BatchOptions, BatchOutcome, BatchProcessor, BatchSummary,
    DocumentExtractionResult, DocumentProcessor, DocumentType, EngineConfig, ExtractionMethod,
    FieldExtraction, ProcessOptions, Verdict,
};
pub use llm::{HttpLlmClient, LlmClient, LlmError, MockLlmClient};
pub use schema::{FieldDefinition, FieldRegistry, NormalizerKind, SchemaError, Severity};

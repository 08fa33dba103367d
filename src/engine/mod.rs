//! The extraction engine.
//!
//! Control flow per document:
//! raw text → OCR correction → per-field strategy runs → ensemble vote
//! → winner normalization → verdict. Batches drive this per document
//! and aggregate a summary.

pub mod batch;
pub mod document;
pub mod ensemble;
pub mod normalize;
pub mod preprocess;
pub mod similarity;
pub mod strategies;
pub mod types;

pub use batch::BatchProcessor;
pub use document::{detect_document_type, quality_score, DocumentProcessor};
pub use normalize::normalize_value;
pub use preprocess::correct_ocr_text;
pub use similarity::{edit_distance, similarity};
pub use types::*;

//! Batch processor — drives the document processor over a document
//! set, sequentially, and folds the results into a summary.
//!
//! Result-list order always matches input order; documents are
//! independent of each other.

use std::time::Instant;

use tracing::info;
use uuid::Uuid;

use crate::engine::document::DocumentProcessor;
use crate::engine::types::{
    round1, BatchDocument, BatchOptions, BatchOutcome, BatchSummary, DocumentExtractionResult,
    ProcessOptions, Verdict,
};

pub struct BatchProcessor {
    processor: DocumentProcessor,
}

impl BatchProcessor {
    pub fn new(processor: DocumentProcessor) -> Self {
        Self { processor }
    }

    pub fn processor(&self) -> &DocumentProcessor {
        &self.processor
    }

    /// Process every document in order and aggregate the summary.
    pub fn process_batch(&self, documents: &[BatchDocument], options: &BatchOptions) -> BatchOutcome {
        let start = Instant::now();
        let batch_id = Uuid::new_v4().to_string();
        info!(
            batch_id = batch_id.as_str(),
            documents = documents.len(),
            use_llm = options.use_llm,
            "batch started"
        );

        let per_document = ProcessOptions {
            use_llm: options.use_llm,
            ..Default::default()
        };
        let results: Vec<DocumentExtractionResult> = documents
            .iter()
            .map(|doc| self.processor.process_document(&doc.text, &doc.filename, &per_document))
            .collect();

        let summary = summarize(&batch_id, &results, start.elapsed().as_millis() as u64);
        info!(
            batch_id = batch_id.as_str(),
            passed = summary.passed,
            failed = summary.failed,
            review_queue = summary.review_queue,
            "batch finished"
        );

        BatchOutcome { results, summary }
    }
}

fn summarize(batch_id: &str, results: &[DocumentExtractionResult], duration_ms: u64) -> BatchSummary {
    let mut passed = 0;
    let mut failed = 0;
    let mut review_queue = 0;
    for result in results {
        match result.verdict {
            Verdict::Pass => passed += 1,
            Verdict::Fail => failed += 1,
            Verdict::ReviewQueue => review_queue += 1,
        }
    }

    let count = results.len();
    let mean_quality_score = if count == 0 {
        0.0
    } else {
        round1(results.iter().map(|r| r.quality_score).sum::<f32>() / count as f32)
    };
    let mean_confidence = if count == 0 {
        0.0
    } else {
        round1(results.iter().map(|r| r.average_confidence).sum::<f32>() / count as f32)
    };

    BatchSummary {
        batch_id: batch_id.to_string(),
        documents: count,
        passed,
        failed,
        review_queue,
        mean_quality_score,
        mean_confidence,
        duration_ms,
    }
}

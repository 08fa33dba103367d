//! The field extraction strategies.
//!
//! Each strategy is a pure function over `(text, field)` producing one
//! `ExtractionResult`. They run in a fixed priority order — pattern,
//! fuzzy, context, then the optional LLM fallback — and the ensemble
//! voter relies on that order when breaking ties.

mod context;
mod fuzzy;
mod llm;
mod pattern;

pub use context::ContextStrategy;
pub use fuzzy::FuzzyStrategy;
pub use llm::LlmStrategy;
pub use pattern::PatternStrategy;

use crate::engine::types::{ExtractionResult, StrategyKind};
use crate::schema::FieldDefinition;

/// One extraction approach. Implementations never fail: a strategy that
/// finds nothing returns the null result.
pub trait ExtractionStrategy: Send + Sync {
    /// Which strategy this is, for result labelling and tie-breaking.
    fn kind(&self) -> StrategyKind;

    /// Attempt to extract the field from the (already corrected) text.
    fn extract(&self, text: &str, field: &FieldDefinition) -> ExtractionResult;
}

/// The deterministic strategies, in voting priority order.
pub fn deterministic_strategies() -> Vec<Box<dyn ExtractionStrategy>> {
    vec![
        Box::new(PatternStrategy),
        Box::new(FuzzyStrategy),
        Box::new(ContextStrategy),
    ]
}

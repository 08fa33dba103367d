//! LLM provider boundary — client trait, Ollama-style HTTP transport,
//! and lenient completion parsing.
//!
//! The engine consumes a capability, not a provider: one prompt in,
//! one textual completion out. Endpoint, model, and transport failures
//! all stay behind `LlmClient`.

pub mod client;
pub mod parser;

pub use client::{HttpLlmClient, LlmClient, MockLlmClient};
pub use parser::{parse_field_answer, strip_reasoning_tags, LlmFieldAnswer};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("Cannot reach LLM endpoint at {0}")]
    Connection(String),

    #[error("Request timed out after {0}s")]
    Timeout(u64),

    #[error("HTTP client error: {0}")]
    Http(String),

    #[error("LLM endpoint returned status {status}: {body}")]
    Endpoint { status: u16, body: String },

    #[error("Response parsing error: {0}")]
    ResponseParsing(String),

    #[error("Requested model not available on the endpoint")]
    NoModelAvailable,
}

//! Field schema registry — the static catalogue describing how each
//! auditable field is located, scored, and normalized.
//!
//! Definitions are built once at startup and never mutated; every
//! extraction strategy reads the same `FieldDefinition`.

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod registry;

pub use registry::FieldRegistry;

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Invalid pattern for field '{field}': {source}")]
    InvalidPattern {
        field: String,
        #[source]
        source: Box<regex::Error>,
    },
}

/// Ordinal criticality of a field. S0 is blocking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    S0,
    S1,
    S2,
    S3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::S0 => "S0",
            Self::S1 => "S1",
            Self::S2 => "S2",
            Self::S3 => "S3",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "S0" => Some(Self::S0),
            "S1" => Some(Self::S1),
            "S2" => Some(Self::S2),
            "S3" => Some(Self::S3),
            _ => None,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Canonicalization applied to a field's winning value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalizerKind {
    Date,
    Boolean,
    Name,
    Uppercase,
    None,
}

impl NormalizerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Boolean => "boolean",
            Self::Name => "name",
            Self::Uppercase => "uppercase",
            Self::None => "none",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "date" => Some(Self::Date),
            "boolean" => Some(Self::Boolean),
            "name" => Some(Self::Name),
            "uppercase" => Some(Self::Uppercase),
            "none" => Some(Self::None),
            _ => None,
        }
    }
}

impl std::fmt::Display for NormalizerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How to locate and validate one document field.
///
/// Patterns are tried in order by the pattern strategy; fuzzy labels
/// feed both the fuzzy and context strategies; the LLM instruction is
/// embedded in the fallback prompt.
#[derive(Debug, Clone)]
pub struct FieldDefinition {
    pub name: String,
    pub display_name: String,
    pub required: bool,
    pub severity: Severity,
    pub patterns: Vec<Regex>,
    pub fuzzy_labels: Vec<String>,
    pub llm_instruction: String,
    pub normalizer: NormalizerKind,
}

impl FieldDefinition {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: &str,
        display_name: &str,
        required: bool,
        severity: Severity,
        patterns: &[&str],
        fuzzy_labels: &[&str],
        llm_instruction: &str,
        normalizer: NormalizerKind,
    ) -> Result<Self, SchemaError> {
        let patterns = patterns
            .iter()
            .map(|p| {
                Regex::new(p).map_err(|source| SchemaError::InvalidPattern {
                    field: name.to_string(),
                    source: Box::new(source),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            name: name.to_string(),
            display_name: display_name.to_string(),
            required,
            severity,
            patterns,
            fuzzy_labels: fuzzy_labels.iter().map(|l| l.to_string()).collect(),
            llm_instruction: llm_instruction.to_string(),
            normalizer,
        })
    }
}

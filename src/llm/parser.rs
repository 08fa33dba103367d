//! Lenient parsing of field-answer completions.
//!
//! Models wrap JSON in prose, code fences, or reasoning tags. The
//! parser strips reasoning tags, locates the JSON object wherever it
//! sits, and coerces the payload — any failure yields `None`.

use std::sync::LazyLock;

use regex::Regex;

/// The payload the engine asks the model for.
#[derive(Debug, Clone)]
pub struct LlmFieldAnswer {
    pub value: Option<String>,
    pub confidence: f32,
    pub evidence: String,
}

/// Parse a completion into a field answer, tolerating surrounding text.
pub fn parse_field_answer(completion: &str) -> Option<LlmFieldAnswer> {
    let cleaned = strip_reasoning_tags(completion);
    let block = extract_json_block(&cleaned)?;
    let raw: serde_json::Value = serde_json::from_str(block).ok()?;
    let obj = raw.as_object()?;

    let value = match obj.get("value") {
        Some(serde_json::Value::String(s)) => Some(s.clone()),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    };
    let confidence = obj.get("confidence").and_then(|c| c.as_f64()).unwrap_or(0.0) as f32;
    let evidence = obj
        .get("evidence")
        .and_then(|e| e.as_str())
        .unwrap_or_default()
        .to_string();

    Some(LlmFieldAnswer {
        value,
        confidence,
        evidence,
    })
}

/// Remove `<think>…</think>` reasoning spans some models emit.
pub fn strip_reasoning_tags(raw: &str) -> String {
    static THINK_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(?s)<think>.*?</think>").expect("valid regex"));
    THINK_RE.replace_all(raw, "").trim().to_string()
}

/// Locate a JSON block inside a completion.
/// Tries a ```json fence, then a bare fence, then first-{ to last-}.
fn extract_json_block(response: &str) -> Option<&str> {
    let trimmed = response.trim();

    if let Some(start) = trimmed.find("```json") {
        let after = &trimmed[start + 7..];
        if let Some(end) = after.find("```") {
            return Some(after[..end].trim());
        }
    }

    if let Some(start) = trimmed.find("```") {
        let after = &trimmed[start + 3..];
        if let Some(end) = after.find("```") {
            let block = after[..end].trim();
            if block.starts_with('{') {
                return Some(block);
            }
        }
    }

    match (trimmed.find('{'), trimmed.rfind('}')) {
        (Some(start), Some(end)) if start < end => Some(&trimmed[start..=end]),
        _ => None,
    }
}

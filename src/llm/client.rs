//! LLM clients: the invocation contract, an Ollama-compatible HTTP
//! transport, and a mock for tests.

use serde::{Deserialize, Serialize};

use super::LlmError;

/// LLM invocation contract (allows mocking).
pub trait LlmClient: Send + Sync {
    /// One prompt in, one textual completion out.
    fn generate(&self, model: &str, prompt: &str, system: &str) -> Result<String, LlmError>;

    fn is_model_available(&self, model: &str) -> Result<bool, LlmError>;

    fn list_models(&self) -> Result<Vec<String>, LlmError>;
}

/// HTTP client for an Ollama-compatible inference endpoint.
pub struct HttpLlmClient {
    base_url: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl HttpLlmClient {
    /// Create a client with an explicit request timeout.
    pub fn new(base_url: &str, timeout_secs: u64) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            timeout_secs,
        }
    }

    /// Default local endpoint at localhost:11434 with a 60s timeout.
    pub fn default_local() -> Self {
        Self::new("http://localhost:11434", 60)
    }

    fn map_send_error(&self, e: reqwest::Error) -> LlmError {
        if e.is_connect() {
            LlmError::Connection(self.base_url.clone())
        } else if e.is_timeout() {
            LlmError::Timeout(self.timeout_secs)
        } else {
            LlmError::Http(e.to_string())
        }
    }
}

/// Request body for /api/generate
#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    system: &'a str,
    stream: bool,
}

/// Response body from /api/generate
#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Response body from /api/tags
#[derive(Deserialize)]
struct TagsResponse {
    models: Vec<ModelEntry>,
}

#[derive(Deserialize)]
struct ModelEntry {
    name: String,
}

impl LlmClient for HttpLlmClient {
    fn generate(&self, model: &str, prompt: &str, system: &str) -> Result<String, LlmError> {
        let url = format!("{}/api/generate", self.base_url);
        let body = GenerateRequest {
            model,
            prompt,
            system,
            stream: false,
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(LlmError::Endpoint {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = response
            .json()
            .map_err(|e| LlmError::ResponseParsing(e.to_string()))?;

        Ok(parsed.response)
    }

    fn is_model_available(&self, model: &str) -> Result<bool, LlmError> {
        let models = self.list_models()?;
        Ok(models.iter().any(|m| m.starts_with(model)))
    }

    fn list_models(&self) -> Result<Vec<String>, LlmError> {
        let url = format!("{}/api/tags", self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(LlmError::Endpoint {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: TagsResponse = response
            .json()
            .map_err(|e| LlmError::ResponseParsing(e.to_string()))?;

        Ok(parsed.models.into_iter().map(|m| m.name).collect())
    }
}

/// Mock LLM client for tests — fixed response or forced transport failure.
pub struct MockLlmClient {
    response: Option<String>,
    available_models: Vec<String>,
}

impl MockLlmClient {
    pub fn new(response: &str) -> Self {
        Self {
            response: Some(response.to_string()),
            available_models: vec!["llama3.1:8b".to_string()],
        }
    }

    /// A client whose every call fails at the transport layer.
    pub fn failing() -> Self {
        Self {
            response: None,
            available_models: Vec::new(),
        }
    }

    pub fn with_models(mut self, models: Vec<String>) -> Self {
        self.available_models = models;
        self
    }
}

impl LlmClient for MockLlmClient {
    fn generate(&self, _model: &str, _prompt: &str, _system: &str) -> Result<String, LlmError> {
        match &self.response {
            Some(response) => Ok(response.clone()),
            None => Err(LlmError::Connection("mock endpoint down".to_string())),
        }
    }

    fn is_model_available(&self, model: &str) -> Result<bool, LlmError> {
        Ok(self.available_models.iter().any(|m| m.starts_with(model)))
    }

    fn list_models(&self) -> Result<Vec<String>, LlmError> {
        Ok(self.available_models.clone())
    }
}

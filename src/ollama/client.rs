/// Ollama HTTP client implementation.
///
/// This module provides `OllamaClient` for making synchronous HTTP requests to the Ollama API,
/// along with error types and builder patterns for configuration.
use std::thread;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, warn};

/// Environment variable holding the Ollama base URL.
pub const HOST_ENV_VAR: &str = "OLLAMA_HOST";

/// Base URL used when neither the builder nor `OLLAMA_HOST` provides one.
pub const DEFAULT_HOST: &str = "http://localhost:11434";

/// Errors that can occur when interacting with the Ollama API.
#[derive(Debug, Error)]
pub enum OllamaError {
    /// Network-related errors (connection failures, DNS resolution, etc.)
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// Request or response timeout errors
    #[error("Request timed out")]
    Timeout(#[source] reqwest::Error),

    /// HTTP errors with status code
    #[error("HTTP error: status {status}")]
    Http { status: u16 },

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[source] serde_json::Error),

    /// Ollama API-specific errors
    #[error("Ollama API error: {message}")]
    Api { message: String },

    /// Invalid URL configuration error
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl OllamaError {
    fn from_reqwest(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout(error)
        } else {
            Self::Network(error)
        }
    }
}

/// Builder for constructing `OllamaClient` instances.
///
/// # Examples
///
/// ```
/// use genome::ollama::OllamaClientBuilder;
///
/// let client = OllamaClientBuilder::new()
///     .base_url("http://localhost:11434")
///     .build()
///     .expect("Failed to create client");
/// ```
#[derive(Debug, Default)]
pub struct OllamaClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
}

impl OllamaClientBuilder {
    /// Creates a new `OllamaClientBuilder` with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base URL for the Ollama API.
    ///
    /// # Arguments
    ///
    /// * `url` - The base URL (e.g., "http://localhost:11434")
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the per-request timeout. Defaults to 60 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the `OllamaClient` with the configured settings.
    ///
    /// # Returns
    ///
    /// Returns `Ok(OllamaClient)` if the client was created successfully,
    /// or `Err(OllamaError)` if there was an error (e.g., invalid URL).
    ///
    /// # Environment Variables
    ///
    /// If `base_url()` was not called, this method will check the `OLLAMA_HOST`
    /// environment variable. If not set, it defaults to `http://localhost:11434`.
    pub fn build(self) -> Result<OllamaClient, OllamaError> {
        // Determine base URL: use builder value, then env var, then default
        let base_url = if let Some(url) = self.base_url {
            url
        } else {
            std::env::var(HOST_ENV_VAR).unwrap_or_else(|_| DEFAULT_HOST.to_string())
        };
        let base_url = base_url.trim_end_matches('/').to_string();

        // Validate URL
        reqwest::Url::parse(&base_url)
            .map_err(|e| OllamaError::InvalidUrl(format!("{}: {}", base_url, e)))?;

        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout.unwrap_or(Duration::from_secs(60)))
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(OllamaError::Network)?;

        Ok(OllamaClient { client, base_url })
    }
}

/// Synchronous HTTP client for interacting with the Ollama API.
///
/// This client handles HTTP requests to Ollama with proper timeout and retry handling.
/// It should be constructed using `OllamaClientBuilder`.
pub struct OllamaClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

/// Trait for Ollama API client operations.
///
/// This trait enables mocking in unit tests and provides a clean interface
/// for interacting with the Ollama API.
pub trait OllamaClientTrait: Send + Sync {
    /// Generates a JSON-formatted completion using the Ollama API.
    ///
    /// # Arguments
    ///
    /// * `model` - The name of the model to use (e.g., "llama3.2:3b")
    /// * `prompt` - The prompt text to send to the model
    ///
    /// # Returns
    ///
    /// Returns the generated text as a `String`, or an error if the request fails.
    fn generate(&self, model: &str, prompt: &str) -> Result<String, OllamaError>;
}

impl OllamaClient {
    /// Returns the base URL configured for this client.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Lists available models from the Ollama API, sorted by size (largest first).
    ///
    /// Fetches the `/api/tags` endpoint and returns model names.
    pub fn list_models(&self) -> Result<Vec<String>, OllamaError> {
        let url = format!("{}/api/tags", self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(OllamaError::from_reqwest)?;

        let json = read_json_body(response)?;
        Ok(parse_model_names(&json))
    }

    fn generate_internal(&self, model: &str, prompt: &str) -> Result<String, OllamaError> {
        let url = format!("{}/api/generate", self.base_url);
        let request_body = build_generate_request(model, prompt);

        debug!(model, url = %url, "sending generate request");

        // Wrap the HTTP call with retry logic
        retry_with_backoff(|| {
            let response = self
                .client
                .post(&url)
                .json(&request_body)
                .send()
                .map_err(OllamaError::from_reqwest)?;

            let json = read_json_body(response)?;
            parse_generate_response(&json)
        })
    }
}

impl OllamaClientTrait for OllamaClient {
    fn generate(&self, model: &str, prompt: &str) -> Result<String, OllamaError> {
        self.generate_internal(model, prompt)
    }
}

/// Reads a response body as JSON.
///
/// Only a failure while receiving the body counts as a transport error. An
/// undecodable body is a [`OllamaError::Serialization`] and is never retried.
fn read_json_body(response: reqwest::blocking::Response) -> Result<serde_json::Value, OllamaError> {
    let status = response.status().as_u16();
    let body = response.text().map_err(OllamaError::from_reqwest)?;

    if !(200..300).contains(&status) {
        return Err(status_error(status, &body));
    }

    serde_json::from_str(&body).map_err(OllamaError::Serialization)
}

/// Maps a non-success response to an error.
///
/// A 4xx body carrying an `error` field (e.g. `{"error":"model 'x' not found"}`)
/// becomes [`OllamaError::Api`]. Everything else keeps the status so 5xx
/// responses are still retried by `should_retry`.
fn status_error(status: u16, body: &str) -> OllamaError {
    if (400..500).contains(&status)
        && let Ok(json) = serde_json::from_str::<serde_json::Value>(body)
        && let Some(message) = json.get("error").and_then(|v| v.as_str())
    {
        return OllamaError::Api {
            message: message.to_string(),
        };
    }

    OllamaError::Http { status }
}

/// Request body for `/api/generate`.
///
/// Asks for a single non-streamed JSON answer at temperature 0 so repeated
/// calls on the same text agree.
fn build_generate_request(model: &str, prompt: &str) -> serde_json::Value {
    serde_json::json!({
        "model": model,
        "prompt": prompt,
        "stream": false,
        "format": "json",
        "options": { "temperature": 0 }
    })
}

/// Extracts the `response` field, surfacing an `error` field as an API error.
fn parse_generate_response(json: &serde_json::Value) -> Result<String, OllamaError> {
    if let Some(message) = json.get("error").and_then(|v| v.as_str()) {
        return Err(OllamaError::Api {
            message: message.to_string(),
        });
    }

    json.get("response")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| OllamaError::Api {
            message: "Missing 'response' field in API response".to_string(),
        })
}

fn parse_model_names(json: &serde_json::Value) -> Vec<String> {
    let mut models: Vec<(String, u64)> = json
        .get("models")
        .and_then(|m| m.as_array())
        .map(|models| {
            models
                .iter()
                .filter_map(|model| {
                    let name = model.get("name").and_then(|n| n.as_str())?;
                    let size = model.get("size").and_then(|s| s.as_u64()).unwrap_or(0);
                    Some((name.to_string(), size))
                })
                .collect()
        })
        .unwrap_or_default();

    // Sort by size descending (largest first)
    models.sort_by(|a, b| b.1.cmp(&a.1));

    models.into_iter().map(|(name, _)| name).collect()
}

/// Retries a blocking operation with exponential backoff.
///
/// This function will retry the operation up to 3 times with delays of 1s, 2s, and 4s.
/// It only retries on transient errors (HTTP 5xx and network errors), not on client errors (HTTP 4xx).
pub fn retry_with_backoff<F, T>(f: F) -> Result<T, OllamaError>
where
    F: FnMut() -> Result<T, OllamaError>,
{
    retry_with_delays(f, &[1, 2, 4].map(Duration::from_secs))
}

fn retry_with_delays<F, T>(mut f: F, delays: &[Duration]) -> Result<T, OllamaError>
where
    F: FnMut() -> Result<T, OllamaError>,
{
    // Try the operation first
    let mut last_error = match f() {
        Ok(result) => return Ok(result),
        Err(e) if !should_retry(&e) => return Err(e),
        Err(e) => e,
    };

    for (attempt, &delay) in delays.iter().enumerate() {
        warn!(
            error = %last_error,
            retry = attempt + 1,
            delay_ms = delay.as_millis() as u64,
            "transient Ollama failure, retrying"
        );
        thread::sleep(delay);

        match f() {
            Ok(result) => return Ok(result),
            Err(e) if !should_retry(&e) => return Err(e),
            Err(e) => last_error = e,
        }
    }

    // All retries exhausted
    Err(last_error)
}

/// Determines if an error should be retried.
///
/// Returns `true` for transient errors (HTTP 5xx, network errors, timeouts).
/// Returns `false` for client errors (HTTP 4xx) and other non-retryable errors.
fn should_retry(error: &OllamaError) -> bool {
    match error {
        OllamaError::Network(_) => true,
        OllamaError::Timeout(_) => true,
        OllamaError::Http { status } => (500..600).contains(status),
        OllamaError::Serialization(_) => false,
        OllamaError::Api { .. } => false,
        OllamaError::InvalidUrl(_) => false,
    }
}

/// Ollama HTTP client module.
///
/// This module provides a blocking HTTP client for interacting with the Ollama API,
/// including error handling, retry logic, and timeout configuration.
mod client;

pub use client::{
    DEFAULT_HOST, HOST_ENV_VAR, OllamaClient, OllamaClientBuilder, OllamaClientTrait, OllamaError,
    retry_with_backoff,
};

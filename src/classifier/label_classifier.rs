use thiserror::Error;

use crate::ollama::OllamaError;

/// Errors an adapter reports when it cannot produce a label.
#[derive(Debug, Error)]
pub enum ClassifierError {
    /// The text to classify is empty.
    #[error("cannot classify empty text")]
    EmptyText,

    /// The candidate label set is empty.
    #[error("no candidate labels supplied")]
    NoCandidates,

    /// The model backend could not be reached or refused the request.
    #[error("classifier backend failed: {0}")]
    Backend(#[from] OllamaError),

    /// The backend answered, but no candidate label could be read from it.
    #[error("malformed classifier response: {0}")]
    MalformedResponse(String),
}

/// A candidate label with its relevance score in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedLabel {
    pub label: String,
    pub score: f64,
}

impl RankedLabel {
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// Capability to pick the most relevant label for a text.
///
/// Implementations must be safe to share between threads; the extractor
/// holds them behind an `Arc`.
pub trait LabelClassifier: Send + Sync {
    /// Identifier of the model this classifier is bound to.
    fn model(&self) -> &str;

    /// Ranks every candidate label by relevance to `text`.
    ///
    /// The result contains each candidate exactly once, sorted by descending
    /// score; equal scores keep candidate order.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifierError`] if the text or candidates are empty, or
    /// the backend fails.
    fn rank(&self, text: &str, candidates: &[String]) -> Result<Vec<RankedLabel>, ClassifierError>;

    /// Returns the single best label for `text` (single-label policy).
    ///
    /// # Errors
    ///
    /// As [`LabelClassifier::rank`]; an empty ranking is reported as a
    /// malformed response.
    fn classify(&self, text: &str, candidates: &[String]) -> Result<String, ClassifierError> {
        self.rank(text, candidates)?
            .into_iter()
            .next()
            .map(|ranked| ranked.label)
            .ok_or_else(|| ClassifierError::MalformedResponse("empty ranking".to_string()))
    }
}

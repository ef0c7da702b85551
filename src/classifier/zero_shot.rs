//! Zero-shot classifier backed by an Ollama-compatible LLM.

use std::sync::Arc;

use tracing::debug;

use crate::config::ConfigError;
use crate::ollama::OllamaClientTrait;

use super::label_classifier::{ClassifierError, LabelClassifier, RankedLabel};
use super::normalizer::LabelNormalizer;

/// Prompt template for zero-shot label scoring.
///
/// `{labels}` is replaced with a bullet list of candidates, `{text}` with the
/// document. Kept model-agnostic: plain instructions plus one worked example.
const PROMPT_TEMPLATE: &str = r#"Rate how well each candidate label describes the text below. Return ONLY a JSON object with every candidate label as a key and a relevance score (0.0-1.0) as its value. Do not include any explanatory text.

INSTRUCTIONS:
1. Use the candidate labels exactly as written as JSON keys
2. Score what the text IS, not what it merely mentions
3. Give the single best label the highest score

EXAMPLE:

Candidates:
- comedy
- horror
Text: "The clown tripped over his own shoes and the whole audience roared."
Output: {"comedy": 0.92, "horror": 0.08}

CANDIDATE LABELS:
{labels}

TEXT:
{text}

JSON OUTPUT:"#;

/// Builder for [`OllamaLabelClassifier`].
#[derive(Default)]
pub struct OllamaLabelClassifierBuilder {
    client: Option<Arc<dyn OllamaClientTrait>>,
    model: Option<String>,
}

impl OllamaLabelClassifierBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the Ollama client used for generation.
    pub fn client(mut self, client: Arc<dyn OllamaClientTrait>) -> Self {
        self.client = Some(client);
        self
    }

    /// Sets the model identifier, e.g. `"llama3.2:3b"`.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Builds the classifier.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingClient`] without a client and
    /// [`ConfigError::EmptyModel`] without a non-blank model.
    pub fn build(self) -> Result<OllamaLabelClassifier, ConfigError> {
        let client = self.client.ok_or(ConfigError::MissingClient)?;
        let model = self
            .model
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .ok_or(ConfigError::EmptyModel)?;

        Ok(OllamaLabelClassifier { client, model })
    }
}

/// Ranks candidate labels by asking an LLM for per-label relevance scores.
///
/// The model's JSON answer may be wrapped in prose or a markdown fence. Keys
/// are matched to candidates with [`LabelNormalizer`]; unknown keys are
/// ignored and unmentioned candidates score 0. Scores are clamped to
/// `[0, 1]`.
pub struct OllamaLabelClassifier {
    client: Arc<dyn OllamaClientTrait>,
    model: String,
}

impl OllamaLabelClassifier {
    #[must_use]
    pub fn new(client: Arc<dyn OllamaClientTrait>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

impl LabelClassifier for OllamaLabelClassifier {
    fn model(&self) -> &str {
        &self.model
    }

    fn rank(&self, text: &str, candidates: &[String]) -> Result<Vec<RankedLabel>, ClassifierError> {
        if text.trim().is_empty() {
            return Err(ClassifierError::EmptyText);
        }
        if candidates.is_empty() {
            return Err(ClassifierError::NoCandidates);
        }

        let prompt = render_prompt(text, candidates);
        let response = self.client.generate(&self.model, &prompt)?;
        debug!(model = %self.model, response_len = response.len(), "received classification");

        let json_str = extract_json(&response).ok_or_else(|| {
            ClassifierError::MalformedResponse("no JSON object in model output".to_string())
        })?;

        parse_scores(&json_str, candidates)
    }
}

fn render_prompt(text: &str, candidates: &[String]) -> String {
    let labels = candidates
        .iter()
        .map(|label| format!("- {label}"))
        .collect::<Vec<_>>()
        .join("\n");

    // Labels first: the document text may itself contain "{labels}".
    PROMPT_TEMPLATE
        .replace("{labels}", &labels)
        .replace("{text}", text)
}

/// Extracts the outermost JSON object from model output.
///
/// Handles:
/// - Clean JSON response (no wrapping)
/// - Markdown code block wrapping (```json ... ```)
/// - Explanatory text before/after JSON
fn extract_json(response: &str) -> Option<String> {
    let trimmed = response.trim();

    let start = trimmed.find('{')?;
    let end = trimmed.rfind('}')?;

    if start <= end {
        Some(trimmed[start..=end].to_string())
    } else {
        None
    }
}

/// Turns a model JSON answer into a full ranking of `candidates`.
///
/// Accepts either a score object (`{"comedy": 0.9, ...}`) or a single-label
/// object (`{"label": "comedy"}`).
fn parse_scores(json_str: &str, candidates: &[String]) -> Result<Vec<RankedLabel>, ClassifierError> {
    let value: serde_json::Value = serde_json::from_str(json_str)
        .map_err(|e| ClassifierError::MalformedResponse(format!("invalid JSON: {e}")))?;
    let object = value.as_object().ok_or_else(|| {
        ClassifierError::MalformedResponse("expected a JSON object".to_string())
    })?;

    let mut scores: Vec<Option<f64>> = vec![None; candidates.len()];

    for (key, value) in object {
        let Some(score) = value.as_f64() else {
            continue;
        };
        let Some(index) = candidate_index(key, candidates) else {
            continue;
        };
        let score = score.clamp(0.0, 1.0);
        scores[index] = Some(scores[index].map_or(score, |prev| prev.max(score)));
    }

    if scores.iter().all(Option::is_none)
        && let Some(label) = object.get("label").and_then(|v| v.as_str())
        && let Some(index) = candidate_index(label, candidates)
    {
        scores[index] = Some(1.0);
    }

    if scores.iter().all(Option::is_none) {
        return Err(ClassifierError::MalformedResponse(
            "no candidate label found in model output".to_string(),
        ));
    }

    let mut ranked: Vec<RankedLabel> = candidates
        .iter()
        .zip(scores)
        .map(|(label, score)| RankedLabel::new(label.clone(), score.unwrap_or(0.0)))
        .collect();

    // Stable sort: equal scores keep candidate order.
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));

    Ok(ranked)
}

fn candidate_index(label: &str, candidates: &[String]) -> Option<usize> {
    let matched = LabelNormalizer::match_candidate(label, candidates)?;
    candidates.iter().position(|c| c == matched)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ollama::OllamaError;
    use std::sync::Mutex;

    struct MockOllamaClient {
        response: String,
    }

    impl OllamaClientTrait for MockOllamaClient {
        fn generate(&self, _model: &str, _prompt: &str) -> Result<String, OllamaError> {
            Ok(self.response.clone())
        }
    }

    struct CapturingMock {
        captured: Mutex<Option<(String, String)>>,
    }

    impl OllamaClientTrait for CapturingMock {
        fn generate(&self, model: &str, prompt: &str) -> Result<String, OllamaError> {
            *self.captured.lock().unwrap() = Some((model.to_string(), prompt.to_string()));
            Ok(r#"{"comedy": 0.9}"#.to_string())
        }
    }

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn classifier_with(response: &str) -> OllamaLabelClassifier {
        OllamaLabelClassifier::new(
            Arc::new(MockOllamaClient {
                response: response.to_string(),
            }),
            "test-model",
        )
    }

    #[test]
    fn ranks_candidates_by_score() {
        let classifier = classifier_with(r#"{"horror": 0.2, "comedy": 0.9, "drama": 0.5}"#);
        let ranked = classifier
            .rank("text", &labels(&["drama", "horror", "comedy"]))
            .unwrap();

        let order: Vec<&str> = ranked.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(order, ["comedy", "drama", "horror"]);
        assert_eq!(ranked[0].score, 0.9);
    }

    #[test]
    fn classify_picks_highest_score() {
        let classifier = classifier_with(r#"{"dark": 0.3, "uplifting": 0.8}"#);
        let label = classifier
            .classify("text", &labels(&["dark", "uplifting"]))
            .unwrap();
        assert_eq!(label, "uplifting");
    }

    #[test]
    fn equal_scores_keep_candidate_order() {
        let classifier = classifier_with(r#"{"b": 0.5, "a": 0.5}"#);
        let ranked = classifier.rank("text", &labels(&["a", "b"])).unwrap();
        assert_eq!(ranked[0].label, "a");
    }

    #[test]
    fn unmentioned_candidates_score_zero_and_unknown_keys_are_ignored() {
        let classifier = classifier_with(r#"{"comedy": 0.7, "western": 0.99}"#);
        let ranked = classifier
            .rank("text", &labels(&["horror", "comedy"]))
            .unwrap();

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0], RankedLabel::new("comedy", 0.7));
        assert_eq!(ranked[1], RankedLabel::new("horror", 0.0));
    }

    #[test]
    fn keys_match_candidates_after_normalization() {
        let classifier = classifier_with(r#"{"Science_Fiction": 0.8, "MYSTERY": 0.4}"#);
        let ranked = classifier
            .rank("text", &labels(&["mystery", "science fiction"]))
            .unwrap();
        assert_eq!(ranked[0].label, "science fiction");
    }

    #[test]
    fn scores_are_clamped() {
        let classifier = classifier_with(r#"{"a": 1.7, "b": -0.4}"#);
        let ranked = classifier.rank("text", &labels(&["a", "b"])).unwrap();
        assert_eq!(ranked[0], RankedLabel::new("a", 1.0));
        assert_eq!(ranked[1], RankedLabel::new("b", 0.0));
    }

    #[test]
    fn extracts_json_from_markdown_and_prose() {
        let classifier = classifier_with(
            "Here is my answer:\n```json\n{\"tense\": 0.85, \"eerie\": 0.6}\n```\nHope that helps!",
        );
        let label = classifier
            .classify("text", &labels(&["eerie", "tense"]))
            .unwrap();
        assert_eq!(label, "tense");
    }

    #[test]
    fn accepts_single_label_object() {
        let classifier = classifier_with(r#"{"label": "Mystery"}"#);
        let label = classifier
            .classify("text", &labels(&["romance", "mystery"]))
            .unwrap();
        assert_eq!(label, "mystery");
    }

    #[test]
    fn response_without_json_is_malformed() {
        let classifier = classifier_with("I think it's a comedy.");
        let err = classifier.classify("text", &labels(&["comedy"])).unwrap_err();
        assert!(matches!(err, ClassifierError::MalformedResponse(_)));
    }

    #[test]
    fn response_without_any_candidate_is_malformed() {
        let classifier = classifier_with(r#"{"western": 0.9, "comedy": "high"}"#);
        let err = classifier.classify("text", &labels(&["comedy"])).unwrap_err();
        assert!(matches!(err, ClassifierError::MalformedResponse(_)));
    }

    #[test]
    fn non_object_json_is_malformed() {
        assert!(matches!(
            parse_scores("[1, 2]", &labels(&["a"])),
            Err(ClassifierError::MalformedResponse(_))
        ));
        assert!(matches!(
            parse_scores("{not json}", &labels(&["a"])),
            Err(ClassifierError::MalformedResponse(_))
        ));
    }

    #[test]
    fn empty_text_fails_before_calling_backend() {
        let classifier = classifier_with(r#"{"a": 1.0}"#);
        let err = classifier.rank("   ", &labels(&["a"])).unwrap_err();
        assert!(matches!(err, ClassifierError::EmptyText));
    }

    #[test]
    fn empty_candidates_fail() {
        let classifier = classifier_with(r#"{"a": 1.0}"#);
        let err = classifier.rank("text", &[]).unwrap_err();
        assert!(matches!(err, ClassifierError::NoCandidates));
    }

    #[test]
    fn backend_error_propagates() {
        struct FailingMockClient;

        impl OllamaClientTrait for FailingMockClient {
            fn generate(&self, _model: &str, _prompt: &str) -> Result<String, OllamaError> {
                Err(OllamaError::Http { status: 500 })
            }
        }

        let classifier = OllamaLabelClassifier::new(Arc::new(FailingMockClient), "m");
        let err = classifier.classify("text", &labels(&["a"])).unwrap_err();
        assert!(matches!(
            err,
            ClassifierError::Backend(OllamaError::Http { status: 500 })
        ));
    }

    #[test]
    fn prompt_lists_candidates_and_text_and_uses_bound_model() {
        let mock = Arc::new(CapturingMock {
            captured: Mutex::new(None),
        });
        let classifier = OllamaLabelClassifier::new(mock.clone(), "gemma3:4b");

        classifier
            .classify("A clown slipped.", &labels(&["comedy", "horror"]))
            .unwrap();

        let captured = mock.captured.lock().unwrap();
        let (model, prompt) = captured.as_ref().unwrap();
        assert_eq!(model, "gemma3:4b");
        assert!(prompt.contains("- comedy\n- horror"));
        assert!(prompt.contains("A clown slipped."));
        assert!(!prompt.contains("{labels}"));
    }

    #[test]
    fn text_containing_placeholder_is_not_expanded() {
        let prompt = render_prompt("see {labels} here", &labels(&["a"]));
        assert!(prompt.contains("see {labels} here"));
    }

    #[test]
    fn builder_requires_client_and_model() {
        let missing_client = OllamaLabelClassifierBuilder::new().model("m").build();
        let err = missing_client.err().unwrap();
        assert!(matches!(err, ConfigError::MissingClient));
        assert!(err.to_string().contains("Ollama client"));

        let client: Arc<dyn OllamaClientTrait> = Arc::new(MockOllamaClient {
            response: String::new(),
        });
        let blank_model = OllamaLabelClassifierBuilder::new()
            .client(client.clone())
            .model("  ")
            .build();
        assert!(matches!(blank_model, Err(ConfigError::EmptyModel)));

        let classifier = OllamaLabelClassifierBuilder::new()
            .client(client)
            .model("llama3.2:3b")
            .build()
            .unwrap();
        assert_eq!(classifier.model(), "llama3.2:3b");
    }
}

//! Story genome extraction.
//!
//! [`TagExtractor`] combines two classifier calls (genre, mood) with the
//! heuristic detectors (perspective, humor, pacing) into one
//! [`TaggingResult`]. Extraction is all-or-nothing: any classifier failure
//! aborts the call and no partial result is returned.
//!
//! # Examples
//!
//! ```no_run
//! use std::sync::Arc;
//! use genome::classifier::OllamaLabelClassifier;
//! use genome::config::GenomeConfig;
//! use genome::extractor::TagExtractorBuilder;
//! use genome::ollama::OllamaClientBuilder;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = GenomeConfig::default();
//! let client = OllamaClientBuilder::new().build()?;
//! let classifier = OllamaLabelClassifier::new(Arc::new(client), config.default_model());
//!
//! let extractor = TagExtractorBuilder::new()
//!     .config(config)
//!     .classifier(Arc::new(classifier))
//!     .build()?;
//!
//! let result = extractor.extract("I slipped on a banana peel. It was hilarious.")?;
//! println!("{}", serde_json::to_string_pretty(&result)?);
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use crate::classifier::{ClassifierError, LabelClassifier};
use crate::config::{ConfigError, GenomeConfig};
use crate::detectors::{analyze_pacing, detect_humor, detect_perspective};
use crate::lexical::tokenize;
use crate::models::TaggingResult;

/// Classification axis, used to report which classifier call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Genre,
    Mood,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Genre => write!(f, "genre"),
            Self::Mood => write!(f, "mood"),
        }
    }
}

/// Errors that abort an extraction.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The input is empty or whitespace-only.
    #[error("Input text cannot be empty")]
    InvalidInput,

    /// The classifier could not produce a valid label for one axis.
    #[error("{axis} classification unavailable: {source}")]
    ClassificationUnavailable {
        axis: Axis,
        #[source]
        source: ClassifierError,
    },
}

/// Builder for [`TagExtractor`].
#[derive(Default)]
pub struct TagExtractorBuilder {
    config: Option<GenomeConfig>,
    classifier: Option<Arc<dyn LabelClassifier>>,
}

impl TagExtractorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the configuration. Defaults to [`GenomeConfig::default`].
    pub fn config(mut self, config: GenomeConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets the classifier used for the genre and mood axes.
    pub fn classifier(mut self, classifier: Arc<dyn LabelClassifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    /// Builds the extractor.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingClassifier`] if no classifier was set,
    /// or the validation error of an invalid configuration.
    pub fn build(self) -> Result<TagExtractor, ConfigError> {
        let classifier = self.classifier.ok_or(ConfigError::MissingClassifier)?;
        let config = self.config.unwrap_or_default();
        config.validate()?;

        Ok(TagExtractor { config, classifier })
    }
}

/// Extracts a story genome from narrative text.
///
/// Holds only immutable state; a single instance may be shared across
/// threads as long as its classifier is. The configuration is validated on
/// construction, so the perspective table always has a fallback category.
pub struct TagExtractor {
    config: GenomeConfig,
    classifier: Arc<dyn LabelClassifier>,
}

impl TagExtractor {
    /// Creates an extractor from a configuration and classifier.
    ///
    /// # Errors
    ///
    /// Returns the validation error of an invalid configuration.
    pub fn new(config: GenomeConfig, classifier: Arc<dyn LabelClassifier>) -> Result<Self, ConfigError> {
        TagExtractorBuilder::new()
            .config(config)
            .classifier(classifier)
            .build()
    }

    pub fn config(&self) -> &GenomeConfig {
        &self.config
    }

    /// Identifier of the model the classifier is bound to.
    pub fn model(&self) -> &str {
        self.classifier.model()
    }

    /// Extracts every signal from `text`.
    ///
    /// Genre is classified before mood. Each detector does its own lexical
    /// analysis of the trimmed text.
    ///
    /// # Errors
    ///
    /// - [`ExtractError::InvalidInput`] if `text` is blank; the classifier is
    ///   not called.
    /// - [`ExtractError::ClassificationUnavailable`] if either classifier
    ///   call fails or returns a label outside its taxonomy.
    pub fn extract(&self, text: &str) -> Result<TaggingResult, ExtractError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ExtractError::InvalidInput);
        }

        info!(chars = text.chars().count(), model = self.model(), "extracting story genome");

        let genre = self.classify(Axis::Genre, text, self.config.genres())?;
        let mood = self.classify(Axis::Mood, text, self.config.moods())?;

        let lowered = text.to_lowercase();

        let tokens = tokenize(&lowered);
        let perspective = detect_perspective(&tokens, self.config.perspectives())
            .map(|category| category.name().to_string())
            .unwrap_or_default();

        let humor = detect_humor(&lowered, self.config.humor()).map(|style| style.name().to_string());

        let pacing = analyze_pacing(text);

        debug!(
            %perspective,
            humor = humor.as_deref().unwrap_or("none"),
            words = pacing.word_count,
            sentences = pacing.sentence_count,
            pace = %pacing.pace_bucket,
            "detectors finished"
        );

        Ok(TaggingResult::new(genre, mood, perspective, humor, &pacing))
    }

    fn classify(&self, axis: Axis, text: &str, candidates: &[String]) -> Result<String, ExtractError> {
        let unavailable = |source: ClassifierError| ExtractError::ClassificationUnavailable { axis, source };

        let label = self.classifier.classify(text, candidates).map_err(unavailable)?;

        if !candidates.contains(&label) {
            return Err(unavailable(ClassifierError::MalformedResponse(format!(
                "label '{label}' is not a {axis} candidate"
            ))));
        }

        debug!(%axis, candidates = candidates.len(), %label, "classified");
        Ok(label)
    }
}

//! Zero-shot label classification.
//!
//! The extractor only depends on the [`LabelClassifier`] capability: given a
//! text and a candidate label set, rank the candidates and pick the best one.
//! [`OllamaLabelClassifier`] is the production implementation, prompting an
//! Ollama-compatible model for per-label relevance scores. Tests supply their
//! own deterministic implementations.
//!
//! # Examples
//!
//! ```no_run
//! use std::sync::Arc;
//! use genome::classifier::{LabelClassifier, OllamaLabelClassifierBuilder};
//! use genome::ollama::OllamaClientBuilder;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = OllamaClientBuilder::new()
//!     .base_url("http://localhost:11434")
//!     .build()?;
//!
//! let classifier = OllamaLabelClassifierBuilder::new()
//!     .client(Arc::new(client))
//!     .model("llama3.2:3b")
//!     .build()?;
//!
//! let labels = vec!["comedy".to_string(), "horror".to_string()];
//! let ranked = classifier.rank("The clown tripped over his shoes.", &labels)?;
//! for entry in &ranked {
//!     println!("{}: {:.2}", entry.label, entry.score);
//! }
//! # Ok(())
//! # }
//! ```

mod label_classifier;
mod normalizer;
mod zero_shot;

pub use label_classifier::{ClassifierError, LabelClassifier, RankedLabel};
pub use normalizer::LabelNormalizer;
pub use zero_shot::{OllamaLabelClassifier, OllamaLabelClassifierBuilder};

pub mod classifier;
pub mod config;
pub mod detectors;
pub mod extractor;
pub mod lexical;
pub mod models;
pub mod ollama;

pub use classifier::{ClassifierError, LabelClassifier, OllamaLabelClassifier, RankedLabel};
pub use config::{Category, ConfigError, GenomeConfig};
pub use extractor::{Axis, ExtractError, TagExtractor, TagExtractorBuilder};
pub use models::{PaceBucket, PacingMetrics, TaggingResult};
pub use ollama::{OllamaClient, OllamaClientBuilder, OllamaClientTrait, OllamaError};

//! Immutable extractor configuration.
//!
//! A [`GenomeConfig`] holds the genre and mood taxonomies, the humor lexicon,
//! the perspective pronoun sets and the default classification model. It is
//! validated once at construction and never mutated afterwards, so a single
//! instance can be shared by any number of extractors.
//!
//! Humor styles and perspective categories are stored as ordered lists: the
//! declaration order is the iteration order, which the detectors rely on for
//! first-match and tie-break decisions.
//!
//! # Examples
//!
//! ```
//! use genome::config::GenomeConfig;
//!
//! let config = GenomeConfig::from_toml_str(r#"
//!     genres = ["noir", "western"]
//!
//!     [[humor]]
//!     style = "dry"
//!     keywords = ["Deadpan"]
//! "#)?;
//!
//! assert_eq!(config.genres(), ["noir", "western"]);
//! assert_eq!(config.humor()[0].terms(), ["deadpan"]);
//! // Tables not present in the file keep their built-in values.
//! assert_eq!(config.perspectives()[0].name(), "first_person");
//! # Ok::<(), genome::config::ConfigError>(())
//! ```

mod defaults;
mod file;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::lexical::tokenize;

pub use file::ConfigFile;

/// Environment variable naming a configuration file.
pub const CONFIG_ENV_VAR: &str = "GENOME_CONFIG";

/// Errors raised while building or loading a [`GenomeConfig`].
///
/// Any of these is fatal: no extractor can be constructed from an invalid
/// configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A label taxonomy has no entries.
    #[error("{axis} taxonomy cannot be empty")]
    EmptyTaxonomy { axis: &'static str },

    /// A taxonomy entry is empty after trimming.
    #[error("{axis} taxonomy contains a blank label")]
    BlankLabel { axis: &'static str },

    /// The same label appears twice in one taxonomy.
    #[error("{axis} taxonomy contains duplicate label '{label}'")]
    DuplicateLabel { axis: &'static str, label: String },

    /// A lexicon or pronoun table has no categories.
    #[error("{table} must define at least one category")]
    EmptyCategories { table: &'static str },

    /// A category name is empty after trimming.
    #[error("{table} contains a category with a blank name")]
    BlankCategory { table: &'static str },

    /// The same category name appears twice in one table.
    #[error("{table} contains duplicate category '{name}'")]
    DuplicateCategory { table: &'static str, name: String },

    /// A category has no usable terms.
    #[error("{table} category '{name}' has no terms")]
    EmptyCategory { table: &'static str, name: String },

    /// A pronoun that can never match a single word token.
    #[error("perspective '{category}' pronoun '{pronoun}' must be a single word")]
    InvalidPronoun { category: String, pronoun: String },

    /// The default model identifier is blank.
    #[error("default model identifier cannot be empty")]
    EmptyModel,

    /// An extractor was built without a classifier.
    #[error("a classifier must be supplied before building the extractor")]
    MissingClassifier,

    /// A label classifier was built without an Ollama client.
    #[error("an Ollama client must be supplied before building the label classifier")]
    MissingClient,

    /// The configuration file could not be read.
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for this schema.
    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// A named set of lowercase terms: a humor style and its keywords, or a
/// perspective and its pronouns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    name: String,
    terms: Vec<String>,
}

impl Category {
    /// Creates a category. Terms are trimmed, lowercased and deduplicated;
    /// blank terms are dropped.
    pub fn new<N, I, T>(name: N, terms: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let terms = terms
            .into_iter()
            .map(|t| t.as_ref().trim().to_lowercase())
            .filter(|t| !t.is_empty() && seen.insert(t.clone()))
            .collect();

        Self {
            name: name.into().trim().to_string(),
            terms,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }
}

/// Validated, read-only configuration for the tag extractor.
#[derive(Debug, Clone, PartialEq)]
pub struct GenomeConfig {
    genres: Vec<String>,
    moods: Vec<String>,
    humor: Vec<Category>,
    perspectives: Vec<Category>,
    default_model: String,
}

impl GenomeConfig {
    /// Builds and validates a configuration.
    ///
    /// Labels and the model identifier are trimmed; category terms are
    /// normalized by [`Category::new`].
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if any taxonomy or table is empty, contains
    /// blank or duplicate entries, or the model identifier is blank.
    pub fn new(
        genres: Vec<String>,
        moods: Vec<String>,
        humor: Vec<Category>,
        perspectives: Vec<Category>,
        default_model: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            genres: trim_all(genres),
            moods: trim_all(moods),
            humor,
            perspectives,
            default_model: default_model.into().trim().to_string(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Parses a TOML document, filling absent tables from the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and any validation
    /// error for the merged result.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(source).map_err(ConfigError::Parse)?;
        file.into_config()
    }

    /// Loads a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file cannot be read, otherwise
    /// as [`GenomeConfig::from_toml_str`].
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loading configuration file");
        Self::from_toml_str(&source)
    }

    /// Resolves the configuration for this process.
    ///
    /// Resolution order:
    /// 1. `explicit` path, when given
    /// 2. the file named by `GENOME_CONFIG`
    /// 3. `{config_dir}/genome/config.toml`, when it exists
    /// 4. built-in defaults
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a named file is missing or invalid.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        if let Ok(path) = std::env::var(CONFIG_ENV_VAR)
            && !path.trim().is_empty()
        {
            return Self::load(Path::new(&path));
        }

        if let Some(path) = default_config_path()
            && path.is_file()
        {
            return Self::load(&path);
        }

        debug!("no configuration file found, using built-in defaults");
        Ok(Self::default())
    }

    /// Checks every invariant of the configuration.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant as a [`ConfigError`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_taxonomy("genre", &self.genres)?;
        validate_taxonomy("mood", &self.moods)?;
        validate_categories("humor lexicon", &self.humor)?;
        validate_categories("perspective pronouns", &self.perspectives)?;

        for category in &self.perspectives {
            for pronoun in category.terms() {
                if tokenize(pronoun) != [pronoun.as_str()] {
                    return Err(ConfigError::InvalidPronoun {
                        category: category.name().to_string(),
                        pronoun: pronoun.clone(),
                    });
                }
            }
        }

        if self.default_model.is_empty() {
            return Err(ConfigError::EmptyModel);
        }

        Ok(())
    }

    /// Candidate labels for genre classification.
    pub fn genres(&self) -> &[String] {
        &self.genres
    }

    /// Candidate labels for mood classification.
    pub fn moods(&self) -> &[String] {
        &self.moods
    }

    /// Humor styles in declaration order.
    pub fn humor(&self) -> &[Category] {
        &self.humor
    }

    /// Perspective categories in declaration order.
    pub fn perspectives(&self) -> &[Category] {
        &self.perspectives
    }

    /// Identifier of the classification model adapters should bind to.
    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    /// Returns a copy bound to a different default model.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyModel`] if `model` is blank.
    pub fn with_default_model(mut self, model: impl Into<String>) -> Result<Self, ConfigError> {
        let model = model.into().trim().to_string();
        if model.is_empty() {
            return Err(ConfigError::EmptyModel);
        }
        self.default_model = model;
        Ok(self)
    }
}

impl Default for GenomeConfig {
    fn default() -> Self {
        Self {
            genres: defaults::GENRES.iter().map(|s| (*s).to_string()).collect(),
            moods: defaults::MOODS.iter().map(|s| (*s).to_string()).collect(),
            humor: to_categories(defaults::HUMOR),
            perspectives: to_categories(defaults::PERSPECTIVES),
            default_model: defaults::DEFAULT_MODEL.to_string(),
        }
    }
}

/// Returns `{config_dir}/genome/config.toml`, if the platform has a config dir.
///
/// - Linux: `~/.config`
/// - macOS: `~/Library/Application Support`
/// - Windows: `C:\Users\<user>\AppData\Roaming`
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("genome").join("config.toml"))
}

fn to_categories(table: &[(&str, &[&str])]) -> Vec<Category> {
    table
        .iter()
        .map(|(name, terms)| Category::new(*name, terms.iter()))
        .collect()
}

fn trim_all(labels: Vec<String>) -> Vec<String> {
    labels.into_iter().map(|l| l.trim().to_string()).collect()
}

fn validate_taxonomy(axis: &'static str, labels: &[String]) -> Result<(), ConfigError> {
    if labels.is_empty() {
        return Err(ConfigError::EmptyTaxonomy { axis });
    }

    let mut seen = HashSet::new();
    for label in labels {
        if label.is_empty() {
            return Err(ConfigError::BlankLabel { axis });
        }
        if !seen.insert(label.as_str()) {
            return Err(ConfigError::DuplicateLabel {
                axis,
                label: label.clone(),
            });
        }
    }

    Ok(())
}

fn validate_categories(table: &'static str, categories: &[Category]) -> Result<(), ConfigError> {
    if categories.is_empty() {
        return Err(ConfigError::EmptyCategories { table });
    }

    let mut seen = HashSet::new();
    for category in categories {
        if category.name().is_empty() {
            return Err(ConfigError::BlankCategory { table });
        }
        if !seen.insert(category.name()) {
            return Err(ConfigError::DuplicateCategory {
                table,
                name: category.name().to_string(),
            });
        }
        if category.terms().is_empty() {
            return Err(ConfigError::EmptyCategory {
                table,
                name: category.name().to_string(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn minimal(genres: &[&str]) -> Result<GenomeConfig, ConfigError> {
        GenomeConfig::new(
            labels(genres),
            labels(&["calm"]),
            vec![Category::new("dry", ["deadpan"])],
            vec![Category::new("first_person", ["i"])],
            "test-model",
        )
    }

    #[test]
    fn default_config_is_valid() {
        let config = GenomeConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.default_model(), "llama3.2:3b");
    }

    #[test]
    fn default_tables_keep_declaration_order() {
        let config = GenomeConfig::default();
        let humor: Vec<&str> = config.humor().iter().map(Category::name).collect();
        assert_eq!(humor, ["slapstick", "sarcastic", "dry", "absurd"]);

        let perspectives: Vec<&str> = config.perspectives().iter().map(Category::name).collect();
        assert_eq!(perspectives, ["first_person", "second_person", "third_person"]);
    }

    #[test]
    fn category_normalizes_terms() {
        let category = Category::new(" sarcastic ", ["Yeah Right", "  ", "yeah right", "OH GREAT"]);
        assert_eq!(category.name(), "sarcastic");
        assert_eq!(category.terms(), ["yeah right", "oh great"]);
    }

    #[test]
    fn rejects_empty_taxonomy() {
        let err = minimal(&[]).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyTaxonomy { axis: "genre" }));
        assert_eq!(err.to_string(), "genre taxonomy cannot be empty");
    }

    #[test]
    fn rejects_duplicate_label() {
        let err = minimal(&["noir", " noir "]).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateLabel { axis: "genre", ref label } if label == "noir"));
    }

    #[test]
    fn rejects_blank_label() {
        let err = minimal(&["noir", "   "]).unwrap_err();
        assert!(matches!(err, ConfigError::BlankLabel { axis: "genre" }));
    }

    #[test]
    fn rejects_empty_humor_lexicon() {
        let err = GenomeConfig::new(
            labels(&["noir"]),
            labels(&["calm"]),
            vec![],
            vec![Category::new("first_person", ["i"])],
            "m",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::EmptyCategories { table: "humor lexicon" }));
    }

    #[test]
    fn rejects_category_without_terms() {
        let err = GenomeConfig::new(
            labels(&["noir"]),
            labels(&["calm"]),
            vec![Category::new("dry", ["  "])],
            vec![Category::new("first_person", ["i"])],
            "m",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::EmptyCategory { ref name, .. } if name == "dry"));
    }

    #[test]
    fn rejects_duplicate_category() {
        let err = GenomeConfig::new(
            labels(&["noir"]),
            labels(&["calm"]),
            vec![Category::new("dry", ["deadpan"])],
            vec![
                Category::new("first_person", ["i"]),
                Category::new("first_person", ["we"]),
            ],
            "m",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateCategory { table: "perspective pronouns", .. }));
    }

    #[test]
    fn rejects_multi_word_pronoun() {
        let err = GenomeConfig::new(
            labels(&["noir"]),
            labels(&["calm"]),
            vec![Category::new("dry", ["deadpan"])],
            vec![Category::new("first_person", ["i", "my own"])],
            "m",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPronoun { ref pronoun, .. } if pronoun == "my own"));
    }

    #[test]
    fn overlapping_categories_are_permitted() {
        let config = GenomeConfig::new(
            labels(&["noir"]),
            labels(&["calm"]),
            vec![
                Category::new("dry", ["deadpan", "oh great"]),
                Category::new("sarcastic", ["oh great"]),
            ],
            vec![
                Category::new("first_person", ["i", "we"]),
                Category::new("plural", ["we", "they"]),
            ],
            "m",
        );
        assert!(config.is_ok());
    }

    #[test]
    fn rejects_blank_model() {
        let err = minimal(&["noir"]).unwrap().with_default_model("  ").unwrap_err();
        assert!(matches!(err, ConfigError::EmptyModel));
    }

    #[test]
    fn with_default_model_overrides_model() {
        let config = GenomeConfig::default().with_default_model("gemma3:4b").unwrap();
        assert_eq!(config.default_model(), "gemma3:4b");
    }

    #[test]
    fn from_toml_str_replaces_only_present_tables() {
        let config = GenomeConfig::from_toml_str(
            r#"
            model = "phi4"
            moods = ["gloomy", "sunny"]

            [[perspective]]
            name = "collective"
            pronouns = ["We", "us"]
            "#,
        )
        .unwrap();

        assert_eq!(config.default_model(), "phi4");
        assert_eq!(config.moods(), ["gloomy", "sunny"]);
        assert_eq!(config.perspectives().len(), 1);
        assert_eq!(config.perspectives()[0].terms(), ["we", "us"]);
        assert_eq!(config.genres(), GenomeConfig::default().genres());
        assert_eq!(config.humor(), GenomeConfig::default().humor());
    }

    #[test]
    fn from_toml_str_validates_merged_result() {
        let err = GenomeConfig::from_toml_str("genres = []").unwrap_err();
        assert!(matches!(err, ConfigError::EmptyTaxonomy { axis: "genre" }));
    }

    #[test]
    fn from_toml_str_rejects_malformed_toml() {
        let err = GenomeConfig::from_toml_str("genres = [").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn from_toml_str_rejects_unknown_keys() {
        let err = GenomeConfig::from_toml_str("genre = [\"noir\"]").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "genres = [\"noir\", \"western\"]").unwrap();

        let config = GenomeConfig::load(file.path()).unwrap();
        assert_eq!(config.genres(), ["noir", "western"]);
    }

    #[test]
    fn load_reports_missing_file() {
        let err = GenomeConfig::load(Path::new("/nonexistent/genome.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("/nonexistent/genome.toml"));
    }

    #[test]
    #[serial]
    fn resolve_prefers_explicit_path_over_env_var() {
        let mut explicit = tempfile::NamedTempFile::new().unwrap();
        writeln!(explicit, "genres = [\"explicit\"]").unwrap();
        let mut from_env = tempfile::NamedTempFile::new().unwrap();
        writeln!(from_env, "genres = [\"env\"]").unwrap();

        unsafe {
            std::env::set_var(CONFIG_ENV_VAR, from_env.path());
        }

        let config = GenomeConfig::resolve(Some(explicit.path())).unwrap();
        assert_eq!(config.genres(), ["explicit"]);

        let config = GenomeConfig::resolve(None).unwrap();
        assert_eq!(config.genres(), ["env"]);

        unsafe {
            std::env::remove_var(CONFIG_ENV_VAR);
        }
    }

    #[test]
    #[serial]
    fn resolve_fails_when_env_var_names_missing_file() {
        unsafe {
            std::env::set_var(CONFIG_ENV_VAR, "/nonexistent/genome.toml");
        }

        let result = GenomeConfig::resolve(None);
        assert!(matches!(result, Err(ConfigError::Read { .. })));

        unsafe {
            std::env::remove_var(CONFIG_ENV_VAR);
        }
    }

    #[test]
    fn default_config_path_ends_with_genome_config_toml() {
        if let Some(path) = default_config_path() {
            assert!(path.ends_with("genome/config.toml"));
        }
    }
}

//! On-disk TOML representation of [`GenomeConfig`].
//!
//! ```toml
//! model = "llama3.2:3b"
//! genres = ["fantasy", "mystery"]
//! moods = ["uplifting", "dark"]
//!
//! [[humor]]
//! style = "sarcastic"
//! keywords = ["yeah right", "oh great"]
//!
//! [[perspective]]
//! name = "first_person"
//! pronouns = ["i", "me", "we"]
//! ```
//!
//! Arrays of tables keep the declaration order that the detectors use for
//! tie-breaking. Every key is optional; absent keys keep their defaults.

use serde::{Deserialize, Serialize};

use super::{Category, ConfigError, GenomeConfig};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genres: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moods: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub humor: Option<Vec<HumorEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub perspective: Option<Vec<PerspectiveEntry>>,
}

/// One `[[humor]]` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HumorEntry {
    pub style: String,
    pub keywords: Vec<String>,
}

/// One `[[perspective]]` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PerspectiveEntry {
    pub name: String,
    pub pronouns: Vec<String>,
}

impl ConfigFile {
    /// Merges the file over the built-in defaults and validates the result.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the merged configuration is invalid.
    pub fn into_config(self) -> Result<GenomeConfig, ConfigError> {
        let defaults = GenomeConfig::default();

        let humor = match self.humor {
            Some(entries) => entries
                .into_iter()
                .map(|e| Category::new(e.style, e.keywords))
                .collect(),
            None => defaults.humor,
        };
        let perspectives = match self.perspective {
            Some(entries) => entries
                .into_iter()
                .map(|e| Category::new(e.name, e.pronouns))
                .collect(),
            None => defaults.perspectives,
        };

        GenomeConfig::new(
            self.genres.unwrap_or(defaults.genres),
            self.moods.unwrap_or(defaults.moods),
            humor,
            perspectives,
            self.model.unwrap_or(defaults.default_model),
        )
    }

    /// Renders the file as a TOML document.
    ///
    /// # Errors
    ///
    /// Returns the serializer error if the document cannot be rendered.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

impl From<&GenomeConfig> for ConfigFile {
    fn from(config: &GenomeConfig) -> Self {
        Self {
            model: Some(config.default_model.clone()),
            genres: Some(config.genres.clone()),
            moods: Some(config.moods.clone()),
            humor: Some(
                config
                    .humor
                    .iter()
                    .map(|c| HumorEntry {
                        style: c.name.clone(),
                        keywords: c.terms.clone(),
                    })
                    .collect(),
            ),
            perspective: Some(
                config
                    .perspectives
                    .iter()
                    .map(|c| PerspectiveEntry {
                        name: c.name.clone(),
                        pronouns: c.terms.clone(),
                    })
                    .collect(),
            ),
        }
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;

/// Three-way summary of narrative speed derived from average sentence length.
///
/// Intervals are inclusive-lower, exclusive-upper in words per sentence:
/// `[0, 10)` is rapid, `[10, 20)` is moderate, `[20, inf)` is leisurely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaceBucket {
    /// Short, punchy sentences.
    Rapid,
    /// Mid-length sentences.
    Moderate,
    /// Long, flowing sentences.
    Leisurely,
}

impl PaceBucket {
    /// Lower bound (inclusive) of the `Moderate` bucket.
    pub const MODERATE_FROM: f64 = 10.0;
    /// Lower bound (inclusive) of the `Leisurely` bucket.
    pub const LEISURELY_FROM: f64 = 20.0;

    /// Buckets an average sentence length.
    #[must_use]
    pub fn from_avg_sentence_length(avg: f64) -> Self {
        if avg >= Self::LEISURELY_FROM {
            Self::Leisurely
        } else if avg >= Self::MODERATE_FROM {
            Self::Moderate
        } else {
            Self::Rapid
        }
    }

    /// Returns the lowercase label used in serialized output.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rapid => "rapid",
            Self::Moderate => "moderate",
            Self::Leisurely => "leisurely",
        }
    }
}

impl fmt::Display for PaceBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

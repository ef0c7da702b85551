use serde::{Deserialize, Serialize};

use super::{PaceBucket, PacingMetrics};

/// The story genome: every signal extracted from one document.
///
/// Field order is the serialized order. `humor` serializes as `null` when no
/// humor style matched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaggingResult {
    genre: String,
    mood: String,
    perspective: String,
    humor: Option<String>,
    pacing: PacingSummary,
    stats: TextStats,
}

/// Pacing block of a [`TaggingResult`]; counts live in [`TextStats`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PacingSummary {
    pub avg_sentence_length: f64,
    pub std_sentence_length: f64,
    pub reading_time_minutes: f64,
    pub pace_bucket: PaceBucket,
}

/// Raw counts and dispersion of a [`TaggingResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStats {
    pub word_count: usize,
    pub sentence_count: usize,
    pub avg_sentence_length: f64,
    pub std_sentence_length: f64,
}

impl TaggingResult {
    /// Assembles a result from the individual signals.
    #[must_use]
    pub fn new(
        genre: String,
        mood: String,
        perspective: String,
        humor: Option<String>,
        pacing: &PacingMetrics,
    ) -> Self {
        Self {
            genre,
            mood,
            perspective,
            humor,
            pacing: PacingSummary {
                avg_sentence_length: pacing.avg_sentence_length,
                std_sentence_length: pacing.std_sentence_length,
                reading_time_minutes: pacing.reading_time_minutes,
                pace_bucket: pacing.pace_bucket,
            },
            stats: TextStats {
                word_count: pacing.word_count,
                sentence_count: pacing.sentence_count,
                avg_sentence_length: pacing.avg_sentence_length,
                std_sentence_length: pacing.std_sentence_length,
            },
        }
    }

    pub fn genre(&self) -> &str {
        &self.genre
    }

    pub fn mood(&self) -> &str {
        &self.mood
    }

    pub fn perspective(&self) -> &str {
        &self.perspective
    }

    pub fn humor(&self) -> Option<&str> {
        self.humor.as_deref()
    }

    pub fn pacing(&self) -> &PacingSummary {
        &self.pacing
    }

    pub fn stats(&self) -> &TextStats {
        &self.stats
    }
}

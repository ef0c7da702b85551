use serde::{Deserialize, Serialize};

use super::PaceBucket;

/// Pacing statistics computed for one document.
///
/// Produced by [`crate::detectors::compute_pacing`]. `sentence_count` is at
/// least 1 for any non-blank document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PacingMetrics {
    pub word_count: usize,
    pub sentence_count: usize,
    pub avg_sentence_length: f64,
    /// Population standard deviation of per-sentence word counts.
    pub std_sentence_length: f64,
    /// Minutes at a fixed reading speed, rounded to 2 decimal places.
    pub reading_time_minutes: f64,
    pub pace_bucket: PaceBucket,
}

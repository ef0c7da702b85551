use crate::lexical::{split_sentences, tokenize};
use crate::models::{PaceBucket, PacingMetrics};

/// Reading speed used for the reading-time estimate.
pub const READING_WORDS_PER_MINUTE: f64 = 180.0;

/// Splits `text` into sentences and computes its pacing.
///
/// # Examples
///
/// ```
/// use genome::detectors::analyze_pacing;
/// use genome::models::PaceBucket;
///
/// let pacing = analyze_pacing("Run. Run now! Do not stop running.");
/// assert_eq!(pacing.sentence_count, 3);
/// assert_eq!(pacing.word_count, 7);
/// assert_eq!(pacing.pace_bucket, PaceBucket::Rapid);
/// ```
#[must_use]
pub fn analyze_pacing(text: &str) -> PacingMetrics {
    compute_pacing(&split_sentences(text))
}

/// Computes pacing metrics from a list of sentences.
///
/// Each sentence is tokenized on its own and the word count is the sum of the
/// per-sentence counts. The standard deviation is the population standard
/// deviation and is 0 for a single sentence.
///
/// An empty sentence list is counted as one empty sentence so the average
/// stays defined; non-blank text never produces an empty list.
#[must_use]
pub fn compute_pacing<S: AsRef<str>>(sentences: &[S]) -> PacingMetrics {
    let lengths: Vec<usize> = sentences
        .iter()
        .map(|s| tokenize(s.as_ref()).len())
        .collect();

    let word_count: usize = lengths.iter().sum();
    let sentence_count = lengths.len().max(1);
    let avg_sentence_length = word_count as f64 / sentence_count as f64;

    let std_sentence_length = if lengths.len() <= 1 {
        0.0
    } else {
        let variance = lengths
            .iter()
            .map(|&len| {
                let diff = len as f64 - avg_sentence_length;
                diff * diff
            })
            .sum::<f64>()
            / lengths.len() as f64;
        variance.sqrt()
    };

    PacingMetrics {
        word_count,
        sentence_count,
        avg_sentence_length,
        std_sentence_length,
        reading_time_minutes: round2(word_count as f64 / READING_WORDS_PER_MINUTE),
        pace_bucket: PaceBucket::from_avg_sentence_length(avg_sentence_length),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

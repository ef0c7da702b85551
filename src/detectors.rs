//! Heuristic signal detectors.
//!
//! Each detector is a pure function over text (or tokens) and a slice of the
//! read-only configuration. Detectors never fail: finding no evidence is a
//! normal result (the fallback perspective, no humor style).

mod humor;
mod pacing;
mod perspective;

pub use humor::detect_humor;
pub use pacing::{READING_WORDS_PER_MINUTE, analyze_pacing, compute_pacing};
pub use perspective::{detect_perspective, perspective_counts};

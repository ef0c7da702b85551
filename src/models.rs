mod pace_bucket;
mod pacing;
mod tagging_result;

pub use pace_bucket::PaceBucket;
pub use pacing::PacingMetrics;
pub use tagging_result::{PacingSummary, TaggingResult, TextStats};

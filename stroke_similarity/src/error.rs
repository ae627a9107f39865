use thiserror::Error;

use super::config::MAX_SAMPLE_COUNT;

#[derive(Debug, Error)]
pub enum SimilarityError {
    // Raised when a drawing is built, so scoring itself never sees NaN
    #[error("point {index} has a non-finite coordinate")]
    NonFiniteCoordinate { index: usize },

    #[error("sample count must be between 2 and {max}, got {0}", max = MAX_SAMPLE_COUNT)]
    InvalidSampleCount(usize),

    #[error("linear score mapping needs a positive, finite max distance, got {0}")]
    InvalidMaxDistance(f32),

    #[error("similarity score must be within 0..=1, got {0}")]
    ScoreOutOfRange(f32),

    #[error("malformed scorer config")]
    Config(#[source] serde_json::Error),

    #[error("malformed drawing input")]
    Input(#[source] serde_json::Error),
}

use serde_derive::{Deserialize, Serialize};

use super::error::SimilarityError;

const DEFAULT_SAMPLE_COUNT: usize = 64;
pub const MAX_SAMPLE_COUNT: usize = 1 << 16;

/// How drawings are placed in a common frame before their points are compared.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Normalization {
    /// Each drawing is centered on its own centroid and scaled by the larger
    /// side of its own bounding box. Only the shape counts.
    Shape,
    /// Both drawings share one origin and one scale, taken from their union.
    /// Relative placement counts; moving or scaling both together does not.
    Joint,
    /// Raw coordinates; distances are in input units.
    Absolute,
}

impl Default for Normalization {
    fn default() -> Self {
        Normalization::Shape
    }
}

/// How per-point distances are folded into one raw distance.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    Mean,
    RootMeanSquare,
}

impl Default for Aggregation {
    fn default() -> Self {
        Aggregation::RootMeanSquare
    }
}

/// Maps a raw distance onto the 0..=1 score range. Both variants decrease monotonically.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ScoreMapping {
    /// `1 / (1 + d)`
    Reciprocal,
    /// `1 - d / max_distance`, clamped at 0
    Linear { max_distance: f32 },
}

impl Default for ScoreMapping {
    fn default() -> Self {
        ScoreMapping::Reciprocal
    }
}

impl ScoreMapping {
    pub fn apply(self, distance: f32) -> f32 {
        let res = match self {
            ScoreMapping::Reciprocal => 1.0 / (1.0 + distance),
            ScoreMapping::Linear { max_distance } => 1.0 - distance / max_distance,
        };
        res.max(0.0).min(1.0)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct ScorerConfig {
    /// Number of points each drawing is resampled to
    pub sample_count: usize,
    pub normalization: Normalization,
    pub aggregation: Aggregation,
    pub mapping: ScoreMapping,
    /// Also compare against the second drawing traced backwards, keep the better result
    pub direction_invariant: bool,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        ScorerConfig {
            sample_count: DEFAULT_SAMPLE_COUNT,
            normalization: Normalization::default(),
            aggregation: Aggregation::default(),
            mapping: ScoreMapping::default(),
            direction_invariant: false,
        }
    }
}

impl ScorerConfig {
    pub fn from_json(json: &str) -> Result<ScorerConfig, SimilarityError> {
        let config: ScorerConfig = serde_json::from_str(json).map_err(SimilarityError::Config)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SimilarityError> {
        if self.sample_count < 2 || self.sample_count > MAX_SAMPLE_COUNT {
            return Err(SimilarityError::InvalidSampleCount(self.sample_count));
        }
        if let ScoreMapping::Linear { max_distance } = self.mapping {
            if !max_distance.is_finite() || max_distance <= 0.0 {
                return Err(SimilarityError::InvalidMaxDistance(max_distance));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_is_default() {
        let config = ScorerConfig::from_json("{}").unwrap();
        assert_eq!(config, ScorerConfig::default());
    }

    #[test]
    fn test_partial_json() {
        let json = "{\"sample_count\":32,\"normalization\":\"joint\",\"mapping\":{\"linear\":{\"max_distance\":0.5}}}";
        let config = ScorerConfig::from_json(json).unwrap();
        assert_eq!(config.sample_count, 32);
        assert_eq!(config.normalization, Normalization::Joint);
        assert_eq!(config.aggregation, Aggregation::RootMeanSquare);
        assert_eq!(config.mapping, ScoreMapping::Linear { max_distance: 0.5 });
        assert!(!config.direction_invariant);
    }

    #[test]
    fn test_invalid_values() {
        match ScorerConfig::from_json("{\"sample_count\":1}") {
            Err(SimilarityError::InvalidSampleCount(1)) => (),
            other => panic!("Expected invalid sample count, got {:?}", other),
        }
        match ScorerConfig::from_json("{\"sample_count\":18446744073709551615}") {
            Err(SimilarityError::InvalidSampleCount(_)) => (),
            other => panic!("Expected invalid sample count, got {:?}", other),
        }
        let largest = format!("{{\"sample_count\":{}}}", MAX_SAMPLE_COUNT);
        assert_eq!(ScorerConfig::from_json(&largest).unwrap().sample_count, MAX_SAMPLE_COUNT);
        match ScorerConfig::from_json("{\"mapping\":{\"linear\":{\"max_distance\":0.0}}}") {
            Err(SimilarityError::InvalidMaxDistance(_)) => (),
            other => panic!("Expected invalid max distance, got {:?}", other),
        }
        match ScorerConfig::from_json("{\"normalization\":\"sideways\"}") {
            Err(SimilarityError::Config(_)) => (),
            other => panic!("Expected config parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_mappings() {
        assert_eq!(ScoreMapping::Reciprocal.apply(0.0), 1.0);
        assert_eq!(ScoreMapping::Reciprocal.apply(1.0), 0.5);
        let linear = ScoreMapping::Linear { max_distance: 2.0 };
        assert_eq!(linear.apply(0.0), 1.0);
        assert_eq!(linear.apply(1.0), 0.5);
        assert_eq!(linear.apply(5.0), 0.0);
    }
}

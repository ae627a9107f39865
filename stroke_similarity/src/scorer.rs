use super::analyzed_drawing::*;
use super::config::*;
use super::entities::*;
use super::error::SimilarityError;
use super::match_collector::*;
use super::*;

/// Compares freehand drawings by their geometry.
///
/// Both drawings are resampled to the same number of points, evenly spaced
/// along their paths, placed in a common frame (see [`Normalization`]) and
/// compared point by point. The aggregated distance is mapped onto `0..=1`.
/// Scoring is pure and the scorer holds no mutable state, so one instance
/// can serve any number of threads.
#[derive(Debug, Clone, Default)]
pub struct StrokeSimilarityScorer {
    config: ScorerConfig,
}

impl StrokeSimilarityScorer {
    pub fn new(config: ScorerConfig) -> Result<StrokeSimilarityScorer, SimilarityError> {
        config.validate()?;
        Ok(StrokeSimilarityScorer { config: config })
    }

    pub fn config(&self) -> &ScorerConfig {
        &self.config
    }

    /// Similarity of two drawings.
    ///
    /// An empty drawing has no shape to compare, so if either side is empty
    /// the result is [`SimilarityScore::NONE`]. Any non-empty drawing scores
    /// [`SimilarityScore::IDENTICAL`] against itself, and the result does not
    /// depend on argument order.
    pub fn score(&self, a: &Drawing, b: &Drawing) -> SimilarityScore {
        match self.distance(a, b) {
            Some(distance) => {
                // apply() already lands in 0..=1
                let res = SimilarityScore(self.config.mapping.apply(distance));
                tracing::trace!(distance, score = res.value(), "scored drawings");
                res
            }
            None => {
                tracing::debug!(a_len = a.len(), b_len = b.len(), "empty drawing, returning sentinel score");
                SimilarityScore::NONE
            }
        }
    }

    /// Raw aggregated distance between the two normalized drawings, before
    /// it is mapped to a score. None if either drawing is empty.
    pub fn distance(&self, a: &Drawing, b: &Drawing) -> Option<f32> {
        let sample_count = self.config.sample_count;
        let an_a = AnalyzedDrawing::from_points(a.points(), sample_count)?;
        let an_b = AnalyzedDrawing::from_points(b.points(), sample_count)?;
        tracing::trace!(a_length = an_a.path_length, b_length = an_b.path_length, "analyzed drawings");

        let (norm_a, norm_b) = self.normalize(&an_a, &an_b);
        let mut res = self.aggregate(&norm_a, &norm_b, false);
        if self.config.direction_invariant {
            res = res.min(self.aggregate(&norm_a, &norm_b, true));
        }
        Some(res as f32)
    }

    /// Scores `candidate` against every template and returns the best `limit`
    /// matches, highest score first. A label appears at most once.
    #[tracing::instrument(level = "debug", skip_all, fields(templates = templates.len(), limit = limit))]
    pub fn rank(&self, candidate: &Drawing, templates: &[Template], limit: usize) -> Vec<Match> {
        let mut res: Vec<Match> = Vec::with_capacity(limit);
        if limit == 0 {
            return res;
        }
        let mut collector = MatchCollector::new(&mut res, limit);
        for template in templates {
            let score = self.score(candidate, &template.drawing);
            collector.file_match(Match {
                label: template.label.clone(),
                score: score,
            });
        }
        res
    }

    fn normalize(&self, a: &AnalyzedDrawing, b: &AnalyzedDrawing) -> (Vec<Sample>, Vec<Sample>) {
        match self.config.normalization {
            Normalization::Shape => (
                a.normalized(a.centroid, a.bounds.larger_side()),
                b.normalized(b.centroid, b.bounds.larger_side()),
            ),
            Normalization::Joint => {
                let origin = midpoint(a.centroid, b.centroid);
                let scale = a.bounds.union(&b.bounds).larger_side();
                (a.normalized(origin, scale), b.normalized(origin, scale))
            }
            Normalization::Absolute => (a.normalized(Sample::ORIGIN, 1.0), b.normalized(Sample::ORIGIN, 1.0)),
        }
    }

    // Folds the per-sample distances, pairing a[i] with b[i], or with b[n-1-i] when reversed.
    // Terms are summed as t(i) + t(n-1-i) pairs, then the middle one. Swapping a and b
    // turns t(i) into t(n-1-i) in the reversed case, so the sum comes out bit for bit the same.
    fn aggregate(&self, a: &[Sample], b: &[Sample], reversed: bool) -> f64 {
        let n = a.len().min(b.len());
        if n == 0 {
            return 0f64;
        }
        let term = |i: usize| {
            let pb = if reversed { b[n - 1 - i] } else { b[i] };
            let d = dist(a[i], pb);
            match self.config.aggregation {
                Aggregation::Mean => d,
                Aggregation::RootMeanSquare => d * d,
            }
        };
        let mut sum = 0f64;
        for i in 0..n / 2 {
            sum += term(i) + term(n - 1 - i);
        }
        if n % 2 == 1 {
            sum += term(n / 2);
        }
        let mean = sum / n as f64;
        match self.config.aggregation {
            Aggregation::Mean => mean,
            Aggregation::RootMeanSquare => mean.sqrt(),
        }
    }
}

use std::time::{Duration, Instant};

use super::error::SimilarityError;
use super::*;

/// Accumulates the points of a drawing while it is being captured, along with
/// the time spent drawing.
///
/// This is the capture-side state of a canvas without any of the view: whatever
/// handles pointer input feeds points in, and comparisons work on immutable
/// [`Drawing`] snapshots taken from it.
#[derive(Debug, Default)]
pub struct DrawingRecorder {
    points: Vec<Point>,
    time_spent: Duration,
    stroke_started: Option<Instant>,
}

impl DrawingRecorder {
    pub fn new() -> DrawingRecorder {
        DrawingRecorder::default()
    }

    // A second begin while a stroke is open keeps the earlier start
    pub fn begin_stroke(&mut self, at: Instant) {
        if self.stroke_started.is_none() {
            self.stroke_started = Some(at);
        }
    }

    pub fn end_stroke(&mut self, at: Instant) {
        if let Some(started) = self.stroke_started.take() {
            self.time_spent += at.saturating_duration_since(started);
        }
    }

    pub fn add_point(&mut self, pt: Point) -> Result<(), SimilarityError> {
        if !pt.is_finite() {
            return Err(SimilarityError::NonFiniteCoordinate {
                index: self.points.len(),
            });
        }
        self.points.push(pt);
        Ok(())
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn is_drawing(&self) -> bool {
        self.stroke_started.is_some()
    }

    /// Total time of completed strokes. A stroke still open is not counted.
    pub fn time_spent_drawing(&self) -> Duration {
        self.time_spent
    }

    pub fn snapshot(&self) -> Drawing {
        Drawing {
            points: self.points.as_slice().into(),
        }
    }

    pub fn reset(&mut self) {
        self.points.clear();
        self.time_spent = Duration::default();
        self.stroke_started = None;
    }

    pub fn similarity_to(&self, other: &DrawingRecorder, scorer: &StrokeSimilarityScorer) -> SimilarityScore {
        scorer.score(&self.snapshot(), &other.snapshot())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(recorder: &mut DrawingRecorder, json: &str) {
        let points: Vec<Vec<f32>> = serde_json::from_str(json).unwrap();
        for pt in &points {
            recorder.add_point(Point::new(pt[0], pt[1])).unwrap();
        }
    }

    #[test]
    fn test_time_spent_drawing() {
        let start = Instant::now();
        let mut recorder = DrawingRecorder::new();
        recorder.begin_stroke(start);
        recorder.begin_stroke(start + Duration::from_millis(100));
        assert!(recorder.is_drawing());
        recorder.end_stroke(start + Duration::from_millis(250));
        // Unmatched end is ignored
        recorder.end_stroke(start + Duration::from_millis(900));
        recorder.begin_stroke(start + Duration::from_millis(1000));
        recorder.end_stroke(start + Duration::from_millis(1500));
        assert!(!recorder.is_drawing());
        assert_eq!(recorder.time_spent_drawing(), Duration::from_millis(750));
        // End before start counts as nothing
        recorder.begin_stroke(start + Duration::from_millis(2000));
        recorder.end_stroke(start + Duration::from_millis(1900));
        assert_eq!(recorder.time_spent_drawing(), Duration::from_millis(750));
    }

    #[test]
    fn test_snapshot_and_reset() {
        let mut recorder = DrawingRecorder::new();
        record(&mut recorder, "[[0,0],[1,0],[2,0]]");
        let snapshot = recorder.snapshot();
        recorder.begin_stroke(Instant::now());
        recorder.reset();
        assert!(recorder.points().is_empty());
        assert!(!recorder.is_drawing());
        assert_eq!(recorder.time_spent_drawing(), Duration::default());
        // The snapshot outlives the reset
        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot.points()[2], Point::new(2.0, 0.0));
    }

    #[test]
    fn test_rejects_non_finite() {
        let mut recorder = DrawingRecorder::new();
        record(&mut recorder, "[[0,0]]");
        match recorder.add_point(Point::new(1.0, f32::INFINITY)) {
            Err(SimilarityError::NonFiniteCoordinate { index: 1 }) => (),
            other => panic!("Expected non-finite coordinate error, got {:?}", other),
        }
        assert_eq!(recorder.points().len(), 1);
    }

    #[test]
    fn test_similarity_to() {
        let scorer = StrokeSimilarityScorer::default();
        let mut a = DrawingRecorder::new();
        let mut b = DrawingRecorder::new();
        record(&mut a, "[[0,0],[1,0],[2,0]]");
        record(&mut b, "[[0,0],[1,0],[2,0]]");
        assert_eq!(a.similarity_to(&b, &scorer), SimilarityScore::IDENTICAL);
        b.reset();
        record(&mut b, "[[0,0],[0,1],[0,2]]");
        assert!(a.similarity_to(&b, &scorer) < SimilarityScore::IDENTICAL);
        b.reset();
        assert_eq!(a.similarity_to(&b, &scorer), SimilarityScore::NONE);
    }
}

extern crate serde_derive;
extern crate wasm_bindgen;

mod analyzed_drawing;
mod config;
mod entities;
mod error;
mod match_collector;
mod recorder;
mod scorer;

use serde_derive::{Deserialize, Serialize};
use std::convert::TryFrom;
use std::fmt;
use std::sync::Arc;
use wasm_bindgen::prelude::*;

pub use config::{Aggregation, Normalization, ScoreMapping, ScorerConfig, MAX_SAMPLE_COUNT};
pub use error::SimilarityError;
pub use recorder::DrawingRecorder;
pub use scorer::StrokeSimilarityScorer;

// JS entry point: both arguments are arrays of [x, y] arrays.
// Malformed input scores 0 so the page never sees an exception.
#[wasm_bindgen]
pub fn similarity(a: &JsValue, b: &JsValue) -> f32 {
    let drawings = drawing_from_js(a).and_then(|a| Ok((a, drawing_from_js(b)?)));
    match drawings {
        Ok((a, b)) => compute_similarity(&a, &b).value(),
        Err(err) => {
            tracing::error!(%err, "rejected drawing input");
            SimilarityScore::NONE.value()
        }
    }
}

#[allow(deprecated)]
fn drawing_from_js(input: &JsValue) -> Result<Drawing, SimilarityError> {
    input.into_serde().map_err(SimilarityError::Input)
}

/// A sampled 2D coordinate. Serialized as `[x, y]`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(from = "[f32; 2]", into = "[f32; 2]")]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Point {
        Point { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<[f32; 2]> for Point {
    fn from([x, y]: [f32; 2]) -> Self {
        Point { x, y }
    }
}

impl From<Point> for [f32; 2] {
    fn from(pt: Point) -> Self {
        [pt.x, pt.y]
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Point { x, y }
    }
}

/// An immutable snapshot of one freehand drawing: its points in the order they were captured.
///
/// Cloning is cheap and the snapshot can be shared across threads. All coordinates are finite.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(try_from = "Vec<Point>", into = "Vec<Point>")]
pub struct Drawing {
    points: Arc<[Point]>,
}

impl Drawing {
    pub fn new(points: Vec<Point>) -> Result<Drawing, SimilarityError> {
        if let Some(index) = points.iter().position(|pt| !pt.is_finite()) {
            return Err(SimilarityError::NonFiniteCoordinate { index });
        }
        Ok(Drawing {
            points: points.into(),
        })
    }

    pub fn empty() -> Drawing {
        Drawing {
            points: Arc::from(Vec::new()),
        }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl Default for Drawing {
    fn default() -> Self {
        Drawing::empty()
    }
}

impl TryFrom<Vec<Point>> for Drawing {
    type Error = SimilarityError;

    fn try_from(points: Vec<Point>) -> Result<Self, Self::Error> {
        Drawing::new(points)
    }
}

impl From<Drawing> for Vec<Point> {
    fn from(drawing: Drawing) -> Self {
        drawing.points.to_vec()
    }
}

/// How alike two drawings are: 0 means nothing in common, 1 means identical.
///
/// Always within `0..=1`; deserializing anything else fails.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, PartialOrd)]
#[serde(try_from = "f32", into = "f32")]
pub struct SimilarityScore(f32);

impl SimilarityScore {
    pub const NONE: SimilarityScore = SimilarityScore(0.0);
    pub const IDENTICAL: SimilarityScore = SimilarityScore(1.0);

    pub fn value(self) -> f32 {
        self.0
    }
}

impl TryFrom<f32> for SimilarityScore {
    type Error = SimilarityError;

    // NaN fails the range check too
    fn try_from(value: f32) -> Result<Self, Self::Error> {
        if (0.0..=1.0).contains(&value) {
            Ok(SimilarityScore(value))
        } else {
            Err(SimilarityError::ScoreOutOfRange(value))
        }
    }
}

impl From<SimilarityScore> for f32 {
    fn from(score: SimilarityScore) -> Self {
        score.0
    }
}

impl fmt::Display for SimilarityScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}", self.0)
    }
}

/// A labelled drawing a candidate can be ranked against.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Template {
    pub label: String,
    pub drawing: Drawing,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Match {
    pub label: String,
    pub score: SimilarityScore,
}

thread_local!(static SCORER: StrokeSimilarityScorer = StrokeSimilarityScorer::default());

/// Scores two drawings with the default configuration.
///
/// If either drawing is empty the result is [`SimilarityScore::NONE`].
pub fn compute_similarity(a: &Drawing, b: &Drawing) -> SimilarityScore {
    SCORER.with(|scorer| scorer.score(a, b))
}

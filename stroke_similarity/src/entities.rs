use super::Point;

// Working coordinate for the geometry pipeline. Input points are f32, but sums
// and squares of large f32 coordinates overflow, so everything past the input runs in f64.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
}

impl Sample {
    pub const ORIGIN: Sample = Sample { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Sample {
        Sample { x, y }
    }
}

impl From<Point> for Sample {
    fn from(pt: Point) -> Self {
        Sample {
            x: pt.x as f64,
            y: pt.y as f64,
        }
    }
}

// Axis-aligned bounding box of a drawing's raw points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl BoundingBox {
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            left: self.left.min(other.left),
            top: self.top.min(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
        }
    }

    // Length of the larger side; a straight line still gets a usable scale this way
    pub fn larger_side(&self) -> f64 {
        f64::max(self.right - self.left, self.bottom - self.top)
    }
}

// One drawing, resampled and ready to be compared
pub struct AnalyzedDrawing {
    // Evenly spaced along the path, first and last raw points included
    pub samples: Vec<Sample>,
    // Mean of the samples, so it does not depend on how densely the input was captured
    pub centroid: Sample,
    pub bounds: BoundingBox,
    pub path_length: f64,
}

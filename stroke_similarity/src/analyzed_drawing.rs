use super::entities::*;
use super::Point;

impl AnalyzedDrawing {
    // Returns None for an empty drawing: there is no path to resample.
    pub fn from_points(points: &[Point], sample_count: usize) -> Option<AnalyzedDrawing> {
        let points: Vec<Sample> = points.iter().map(|pt| Sample::from(*pt)).collect();
        let bounds = get_bounding_box(&points)?;
        let samples = resample(&points, sample_count);
        let centroid = centroid(&samples);
        Some(AnalyzedDrawing {
            samples: samples,
            centroid: centroid,
            bounds: bounds,
            path_length: path_length(&points),
        })
    }

    // Samples moved so `origin` lands on 0,0 and divided by `scale`.
    // A zero scale (single point, or all points coincident) leaves the size alone.
    pub fn normalized(&self, origin: Sample, scale: f64) -> Vec<Sample> {
        let scale = if scale > 0.0 { scale } else { 1.0 };
        self.samples
            .iter()
            .map(|s| Sample::new((s.x - origin.x) / scale, (s.y - origin.y) / scale))
            .collect()
    }
}

// Gets distance between two samples
pub fn dist(a: Sample, b: Sample) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt()
}

pub fn midpoint(a: Sample, b: Sample) -> Sample {
    Sample::new((a.x + b.x) / 2f64, (a.y + b.y) / 2f64)
}

fn lerp(a: Sample, b: Sample, t: f64) -> Sample {
    Sample::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
}

// Total length of the polyline through the samples, in order
pub fn path_length(points: &[Sample]) -> f64 {
    points.windows(2).map(|w| dist(w[0], w[1])).sum()
}

fn centroid(points: &[Sample]) -> Sample {
    if points.is_empty() {
        return Sample::ORIGIN;
    }
    let mut x = 0f64;
    let mut y = 0f64;
    for s in points {
        x += s.x;
        y += s.y;
    }
    let n = points.len() as f64;
    Sample::new(x / n, y / n)
}

fn get_bounding_box(points: &[Sample]) -> Option<BoundingBox> {
    let first = points.first()?;
    let mut res = BoundingBox {
        left: first.x,
        top: first.y,
        right: first.x,
        bottom: first.y,
    };
    for s in &points[1..] {
        if s.x < res.left { res.left = s.x; }
        if s.x > res.right { res.right = s.x; }
        if s.y < res.top { res.top = s.y; }
        if s.y > res.bottom { res.bottom = s.y; }
    }
    Some(res)
}

// Resamples the path into n samples spaced evenly along its arc length.
// First and last points are always kept as they are. A path with zero length
// (one point, or every point on the same spot) becomes n copies of its first point.
pub fn resample(points: &[Sample], n: usize) -> Vec<Sample> {
    let mut res: Vec<Sample> = Vec::with_capacity(n);
    let first = match points.first() {
        Some(s) => *s,
        None => return res,
    };
    let last = points[points.len() - 1];
    let total = path_length(points);
    if n < 2 || total <= 0f64 {
        res.resize(n, first);
        return res;
    }

    let interval = total / (n - 1) as f64;
    res.push(first);

    // seg_end is the index of the point closing the current segment;
    // walked is the path length up to the segment's start.
    let mut seg_end = 1;
    let mut walked = 0f64;
    for k in 1..n - 1 {
        let target = interval * k as f64;
        loop {
            let seg_start_pt = points[seg_end - 1];
            let seg_end_pt = points[seg_end];
            let seg_length = dist(seg_start_pt, seg_end_pt);
            // Rounding may leave the last targets a hair beyond the final segment
            if walked + seg_length >= target || seg_end == points.len() - 1 {
                let t = if seg_length > 0f64 {
                    ((target - walked) / seg_length).max(0.0).min(1.0)
                } else {
                    0f64
                };
                res.push(lerp(seg_start_pt, seg_end_pt, t));
                break;
            }
            walked += seg_length;
            seg_end += 1;
        }
    }

    res.push(last);
    res
}

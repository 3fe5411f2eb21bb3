//! Ordered, closed control-point sequence.
//!
//! The first and last points are adjacent; every spacing computation wraps
//! around. A contour never holds fewer than three points: construction
//! rejects degenerate input and resampling refuses removals that would break
//! the invariant.
use serde::Serialize;

/// Closed polyline of real-valued control points, at least three.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Contour {
    points: Vec<[f32; 2]>,
}

/// Why an initial contour was rejected.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ContourError {
    TooFewPoints { found: usize },
    NonFinitePoint { index: usize },
}

impl std::fmt::Display for ContourError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContourError::TooFewPoints { found } => {
                write!(f, "contour needs at least 3 points, got {found}")
            }
            ContourError::NonFinitePoint { index } => {
                write!(f, "contour point {index} is not finite")
            }
        }
    }
}

impl std::error::Error for ContourError {}

#[inline]
fn distance(a: [f32; 2], b: [f32; 2]) -> f32 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    (dx * dx + dy * dy).sqrt()
}

impl Contour {
    /// Validate and take ownership of an ordered point sequence.
    pub fn new(points: Vec<[f32; 2]>) -> Result<Self, ContourError> {
        if points.len() < 3 {
            return Err(ContourError::TooFewPoints {
                found: points.len(),
            });
        }
        for (index, p) in points.iter().enumerate() {
            if !(p[0].is_finite() && p[1].is_finite()) {
                return Err(ContourError::NonFinitePoint { index });
            }
        }
        Ok(Self { points })
    }

    /// Control points in traversal order.
    pub fn points(&self) -> &[[f32; 2]] {
        &self.points
    }

    /// Number of control points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false: the ≥ 3 invariant holds by construction.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Consume the contour, returning its points.
    pub fn into_points(self) -> Vec<[f32; 2]> {
        self.points
    }

    pub(crate) fn set_points(&mut self, points: Vec<[f32; 2]>) {
        debug_assert!(points.len() >= 3);
        self.points = points;
    }

    /// Mean adjacent spacing over the closed loop.
    pub fn mean_spacing(&self) -> f32 {
        let n = self.points.len();
        let total: f32 = (0..n)
            .map(|i| distance(self.points[i], self.points[(i + 1) % n]))
            .sum();
        total / n as f32
    }

    /// Keep the discretization stable: split spacings above
    /// `max_factor × mean`, merge spacings below `min_factor × mean`.
    ///
    /// Splitting and merging shift the mean, so the rebuild repeats until a
    /// round changes nothing (with a generous cap against pathological
    /// input). The point count never drops below 3.
    pub fn resample(&mut self, min_factor: f32, max_factor: f32) {
        let max_rounds = (self.points.len() + 8) * 2;
        for _ in 0..max_rounds {
            if !self.resample_round(min_factor, max_factor) {
                break;
            }
        }
    }

    fn resample_round(&mut self, min_factor: f32, max_factor: f32) -> bool {
        let mean = self.mean_spacing();
        if mean <= f32::EPSILON {
            return false;
        }
        let max_spacing = max_factor * mean;
        let min_spacing = min_factor * mean;
        let n = self.points.len();

        // Split phase: insert a midpoint into every over-long edge.
        let mut split = Vec::with_capacity(n + 4);
        for i in 0..n {
            let a = self.points[i];
            let b = self.points[(i + 1) % n];
            split.push(a);
            if distance(a, b) > max_spacing {
                split.push([(a[0] + b[0]) * 0.5, (a[1] + b[1]) * 0.5]);
            }
        }

        // Merge phase: drop the successor of an under-short edge while the
        // minimum point count allows it.
        let mut merged: Vec<[f32; 2]> = Vec::with_capacity(split.len());
        let mut removed = 0usize;
        for &p in &split {
            match merged.last() {
                Some(&last)
                    if distance(last, p) < min_spacing && split.len() - removed > 3 =>
                {
                    removed += 1;
                }
                _ => merged.push(p),
            }
        }
        // The wrap-around edge: the final point may sit too close to the
        // first one.
        if merged.len() > 3 {
            let first = merged[0];
            let last = *merged.last().unwrap();
            if distance(last, first) < min_spacing {
                merged.pop();
            }
        }

        let changed = merged.len() != n || merged != self.points;
        if changed {
            self.points = merged;
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::{Contour, ContourError};

    fn square(side: f32) -> Vec<[f32; 2]> {
        vec![
            [0.0, 0.0],
            [side, 0.0],
            [side, side],
            [0.0, side],
        ]
    }

    #[test]
    fn rejects_two_points() {
        let err = Contour::new(vec![[0.0, 0.0], [1.0, 1.0]]).unwrap_err();
        assert_eq!(err, ContourError::TooFewPoints { found: 2 });
    }

    #[test]
    fn rejects_non_finite_point() {
        let mut pts = square(4.0);
        pts[2] = [f32::NAN, 1.0];
        let err = Contour::new(pts).unwrap_err();
        assert_eq!(err, ContourError::NonFinitePoint { index: 2 });
    }

    #[test]
    fn mean_spacing_of_square() {
        let contour = Contour::new(square(4.0)).unwrap();
        assert!((contour.mean_spacing() - 4.0).abs() < 1e-5);
    }

    #[test]
    fn resample_splits_long_edges() {
        let mut contour = Contour::new(vec![
            [0.0, 0.0],
            [1.0, 0.0],
            [2.0, 0.0],
            [3.0, 0.0],
            [3.0, 12.0],
        ])
        .unwrap();
        contour.resample(0.25, 2.0);
        let mean = contour.mean_spacing();
        let pts = contour.points();
        let n = pts.len();
        for i in 0..n {
            let a = pts[i];
            let b = pts[(i + 1) % n];
            let d = ((a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2)).sqrt();
            assert!(d <= 2.0 * mean + 1e-4, "edge {i} too long: {d} vs mean {mean}");
            assert!(d >= 0.25 * mean - 1e-4, "edge {i} too short: {d} vs mean {mean}");
        }
    }

    #[test]
    fn resample_never_drops_below_three() {
        let mut contour = Contour::new(vec![
            [0.0, 0.0],
            [0.01, 0.0],
            [100.0, 0.0],
            [100.0, 0.01],
        ])
        .unwrap();
        contour.resample(0.5, 10.0);
        assert!(contour.len() >= 3);
    }
}

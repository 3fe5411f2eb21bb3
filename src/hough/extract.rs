//! Peak extraction with non-maximum suppression in parameter space.
//!
//! Cells at or above `max_vote × relative_threshold` become peak candidates.
//! Candidates are visited strongest-first; exact ties are broken by the
//! earlier linear bin index so extraction is deterministic. A candidate
//! within the configured Chebyshev bin radius of an already-accepted peak is
//! suppressed, collapsing near-duplicate detections of one physical shape.
use super::options::PeakParams;
use super::space::AccumulatorSpace;
use nalgebra::Vector3;
use serde::Serialize;

/// Parameters of one detected shape.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum ShapeParams {
    /// Line in normal form: `x·cos θ + y·sin θ = ρ`.
    Line {
        rho: f32,
        theta: f32,
        /// Homogeneous line coefficients `a x + b y + c = 0`.
        line: Vector3<f32>,
    },
    Circle {
        cx: f32,
        cy: f32,
        radius: f32,
    },
    Ellipse {
        cx: f32,
        cy: f32,
        semi_major: f32,
        semi_minor: f32,
        /// Rotation of the major axis in [0, π).
        rotation: f32,
    },
}

/// One shape recovered from a surviving accumulator peak.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedShape {
    pub params: ShapeParams,
    /// Vote count of the winning cell.
    pub score: u32,
}

/// A surviving accumulator cell, prior to parameter mapping.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Peak {
    pub bins: [usize; 3],
    pub score: u32,
}

/// Collect thresholded, non-maximum-suppressed peaks from `space`.
///
/// An accumulator with no qualifying cell yields an empty list; that is a
/// normal outcome, not an error.
pub(crate) fn find_peaks(space: &AccumulatorSpace, peaks: &PeakParams) -> Vec<Peak> {
    let max_vote = space.max_vote();
    if max_vote == 0 {
        return Vec::new();
    }
    let threshold = (max_vote as f32) * peaks.relative_threshold;

    let mut candidates: Vec<(usize, u32)> = (0..space.len())
        .filter_map(|idx| {
            let score = space.at_linear(idx);
            (score > 0 && score as f32 >= threshold).then_some((idx, score))
        })
        .collect();
    // Strongest first; equal scores keep ascending linear index order.
    candidates.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    let radius = peaks.nms_radius;
    let mut accepted: Vec<Peak> = Vec::new();
    for (idx, score) in candidates {
        if accepted.len() >= peaks.max_shapes {
            break;
        }
        let bins = space.unravel(idx);
        let suppressed = accepted.iter().any(|peak| {
            bins.iter()
                .zip(&peak.bins)
                .all(|(&a, &b)| a.abs_diff(b) <= radius)
        });
        if !suppressed {
            accepted.push(Peak { bins, score });
        }
    }
    accepted
}

//! Normal-form line voting.
//!
//! Lines are parametrized as `x·cos θ + y·sin θ = ρ` with θ sampled across
//! [0, π), which keeps every orientation representable without unbounded
//! slopes. Each edge pixel votes once per angle sample; ρ spans
//! `[-diag, diag]` so lines through any image corner stay in range.
use super::extract::{DetectedShape, Peak, ShapeParams};
use super::options::LineParams;
use super::space::{AccumulatorSpace, Axis};
use crate::edgemap::EdgeMap;
use nalgebra::Vector3;

/// Build the (θ, ρ) accumulator for `edges`.
pub(crate) fn vote_lines(edges: &EdgeMap, params: &LineParams) -> AccumulatorSpace {
    let w = edges.width() as f32;
    let h = edges.height() as f32;
    let diag = (w * w + h * h).sqrt();

    let theta_step = std::f32::consts::PI / params.theta_steps as f32;
    let rho_bins = ((2.0 * diag) / params.rho_bin_px).ceil().max(1.0) as usize;
    let mut space = AccumulatorSpace::new([
        Axis::new(0.0, theta_step, params.theta_steps),
        Axis::new(-diag, params.rho_bin_px, rho_bins),
        Axis::degenerate(),
    ]);

    // Angle tables at bin centers, so a peak maps back to the angle it was
    // voted under.
    let tables: Vec<(f32, f32, f32)> = (0..params.theta_steps)
        .map(|t| {
            let theta = space.axes()[0].center(t);
            (theta, theta.cos(), theta.sin())
        })
        .collect();

    for px in edges.pixels() {
        let x = px.x as f32;
        let y = px.y as f32;
        for &(theta, cos_t, sin_t) in &tables {
            let rho = x * cos_t + y * sin_t;
            space.vote([theta, rho, 0.0]);
        }
    }
    space
}

/// Map surviving peaks back to line parameters.
pub(crate) fn shapes_from_peaks(space: &AccumulatorSpace, peaks: &[Peak]) -> Vec<DetectedShape> {
    peaks
        .iter()
        .map(|peak| {
            let theta = space.axes()[0].center(peak.bins[0]);
            let rho = space.axes()[1].center(peak.bins[1]);
            DetectedShape {
                params: ShapeParams::Line {
                    rho,
                    theta,
                    line: Vector3::new(theta.cos(), theta.sin(), -rho),
                },
                score: peak.score,
            }
        })
        .collect()
}

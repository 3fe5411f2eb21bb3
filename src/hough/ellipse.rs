//! Two-stage ellipse voting.
//!
//! A full (cx, cy, a, b, φ) accumulator is a 5D array nobody can afford, so
//! the search is split:
//!
//! 1. **Centers** – two boundary points with antiparallel gradients sit
//!    symmetrically about the ellipse center, so the midpoint of their chord
//!    votes in a 2D center space.
//! 2. **Axes** – for each accepted center, a bounded (a, b, φ) space is voted
//!    by the pixels consistent with that center: rotating a pixel's offset
//!    into the candidate frame fixes `b` analytically for every (a, φ), one
//!    vote per valid combination.
//!
//! Both stages run over fixed discretizations, keeping memory and runtime
//! predictable regardless of image content.
use super::extract::{find_peaks, DetectedShape, Peak, ShapeParams};
use super::options::{EllipseParams, PeakParams};
use super::space::{AccumulatorSpace, Axis};
use crate::angle::opposition;
use crate::edgemap::EdgeMap;

/// Stage one: vote chord midpoints of antiparallel-gradient pixel pairs.
pub(crate) fn vote_centers(edges: &EdgeMap, params: &EllipseParams) -> AccumulatorSpace {
    let center_bins_x = (edges.width() as f32 / params.center_bin_px).ceil().max(1.0) as usize;
    let center_bins_y = (edges.height() as f32 / params.center_bin_px).ceil().max(1.0) as usize;
    let mut space = AccumulatorSpace::new([
        Axis::new(0.0, params.center_bin_px, center_bins_x),
        Axis::new(0.0, params.center_bin_px, center_bins_y),
        Axis::degenerate(),
    ]);

    let tol = params.pair_orientation_tol_deg.to_radians();
    let min_chord = 2.0 * params.min_axis;
    let max_chord = 2.0 * params.max_axis;

    let pixels = edges.pixels();
    let mut i = 0;
    while i < pixels.len() {
        let a = &pixels[i];
        let mut j = i + params.pair_stride;
        while j < pixels.len() {
            let b = &pixels[j];
            j += params.pair_stride;
            if opposition(a.orientation, b.orientation) > tol {
                continue;
            }
            let dx = a.x as f32 - b.x as f32;
            let dy = a.y as f32 - b.y as f32;
            let chord = (dx * dx + dy * dy).sqrt();
            if chord < min_chord || chord > max_chord {
                continue;
            }
            let mx = (a.x as f32 + b.x as f32) * 0.5;
            let my = (a.y as f32 + b.y as f32) * 0.5;
            space.vote([mx, my, 0.0]);
        }
        i += params.pair_stride;
    }
    space
}

/// Stage two: vote the bounded (a, b, φ) space for one candidate center.
fn vote_axes(edges: &EdgeMap, center: [f32; 2], params: &EllipseParams) -> AccumulatorSpace {
    let axis_bins = ((params.max_axis - params.min_axis) / params.axis_step)
        .ceil()
        .max(1.0) as usize;
    let rot_step = std::f32::consts::PI / params.rotation_steps as f32;
    let mut space = AccumulatorSpace::new([
        Axis::new(params.min_axis, params.axis_step, axis_bins),
        Axis::new(params.min_axis, params.axis_step, axis_bins),
        Axis::new(0.0, rot_step, params.rotation_steps),
    ]);

    let reach = params.max_axis + params.axis_step;
    for px in edges.pixels() {
        let dx = px.x as f32 - center[0];
        let dy = px.y as f32 - center[1];
        let rho = (dx * dx + dy * dy).sqrt();
        if rho > reach || rho < params.min_axis - params.axis_step {
            continue;
        }
        for rot_bin in 0..params.rotation_steps {
            let phi = space.axes()[2].center(rot_bin);
            let (sin_p, cos_p) = phi.sin_cos();
            let u = dx * cos_p + dy * sin_p;
            let v = -dx * sin_p + dy * cos_p;
            for a_bin in 0..axis_bins {
                let a = space.axes()[0].center(a_bin);
                let ratio = u / a;
                let rest = 1.0 - ratio * ratio;
                if rest <= 1e-4 {
                    continue;
                }
                let b = v.abs() / rest.sqrt();
                // Canonical form keeps b ≤ a; the transposed solution is
                // voted under the perpendicular rotation bin instead.
                if b <= a {
                    space.vote([a, b, phi]);
                }
            }
        }
    }
    space
}

/// Full two-stage detection: accepted center peaks, then the best axis tuple
/// per center. Returns the stage-one space alongside the shapes so callers
/// can inspect the vote landscape.
pub(crate) fn detect(
    edges: &EdgeMap,
    params: &EllipseParams,
    peaks: &PeakParams,
) -> (AccumulatorSpace, Vec<DetectedShape>) {
    let centers = vote_centers(edges, params);
    let center_peaks = find_peaks(&centers, peaks);

    let mut shapes = Vec::with_capacity(center_peaks.len());
    for peak in &center_peaks {
        let center = [
            centers.axes()[0].center(peak.bins[0]),
            centers.axes()[1].center(peak.bins[1]),
        ];
        let axes_space = vote_axes(edges, center, params);
        let Some(best) = find_peaks(&axes_space, peaks).into_iter().next() else {
            continue;
        };
        shapes.push(shape_from_axes(&axes_space, center, &best));
    }
    (centers, shapes)
}

fn shape_from_axes(space: &AccumulatorSpace, center: [f32; 2], peak: &Peak) -> DetectedShape {
    DetectedShape {
        params: ShapeParams::Ellipse {
            cx: center[0],
            cy: center[1],
            semi_major: space.axes()[0].center(peak.bins[0]),
            semi_minor: space.axes()[1].center(peak.bins[1]),
            rotation: space.axes()[2].center(peak.bins[2]),
        },
        score: peak.score,
    }
}

//! Shape voting over a discretized parameter space.
//!
//! Overview
//! - Each shape family has a dedicated voting strategy behind one entry
//!   point: lines vote over (θ, ρ) in normal form, circles vote only along
//!   ±gradient rays, ellipses run a two-stage center-then-axes search.
//! - Votes land in an [`AccumulatorSpace`] owned by the run; out-of-range
//!   votes are dropped per vote.
//! - Peak extraction thresholds cells relative to the strongest vote and
//!   applies non-maximum suppression in bin space, with a deterministic
//!   tie-break on equal scores.
//!
//! Modules
//! - [`options`] – per-family parameter ranges, bin sizes, peak knobs.
//! - [`space`] – the binned vote array and its axes.
//! - `line`, `circle`, `ellipse` – the per-family voting strategies.
//! - `extract` – peak selection and the [`DetectedShape`] result type.
//!
//! An accumulator with no qualifying cell yields an empty shape list, a
//! normal outcome, not an error. Configuration problems are rejected before
//! any vote is cast.
mod circle;
mod ellipse;
mod extract;
mod line;
pub mod options;
pub mod space;

pub use extract::{DetectedShape, ShapeParams};
pub use options::{
    CircleParams, EllipseParams, HoughConfigError, HoughParams, LineParams, PeakParams, ShapeKind,
};
pub use space::{AccumulatorSpace, Axis};

use crate::edgemap::EdgeMap;
use log::debug;
use serde::Serialize;
use std::time::Instant;

/// Result of one voting run.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeDetection {
    /// Surviving shapes, strongest first.
    pub shapes: Vec<DetectedShape>,
    /// Highest vote count seen in the accumulator.
    pub max_vote: u32,
    /// Wall-clock cost of voting plus extraction.
    pub latency_ms: f64,
}

/// Build the accumulator for the configured shape kind without extracting
/// peaks.
///
/// For ellipses this is the stage-one center space; the axis search runs
/// per accepted center inside [`detect_shapes`].
pub fn accumulate(
    edges: &EdgeMap,
    params: &HoughParams,
) -> Result<AccumulatorSpace, HoughConfigError> {
    params.validate()?;
    Ok(match params.kind {
        ShapeKind::Line => line::vote_lines(edges, &params.line),
        ShapeKind::Circle => circle::vote_circles(edges, &params.circle),
        ShapeKind::Ellipse => ellipse::vote_centers(edges, &params.ellipse),
    })
}

/// Vote, extract peaks, and map them back to shape parameters.
pub fn detect_shapes(
    edges: &EdgeMap,
    params: &HoughParams,
) -> Result<ShapeDetection, HoughConfigError> {
    params.validate()?;
    let start = Instant::now();

    let (max_vote, shapes) = match params.kind {
        ShapeKind::Line => {
            let space = line::vote_lines(edges, &params.line);
            let peaks = extract::find_peaks(&space, &params.peaks);
            (space.max_vote(), line::shapes_from_peaks(&space, &peaks))
        }
        ShapeKind::Circle => {
            let space = circle::vote_circles(edges, &params.circle);
            let peaks = extract::find_peaks(&space, &params.peaks);
            (space.max_vote(), circle::shapes_from_peaks(&space, &peaks))
        }
        ShapeKind::Ellipse => {
            let (centers, shapes) = ellipse::detect(edges, &params.ellipse, &params.peaks);
            (centers.max_vote(), shapes)
        }
    };

    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    debug!(
        "hough: kind={:?} edges={} max_vote={} shapes={} latency_ms={:.3}",
        params.kind,
        edges.pixels().len(),
        max_vote,
        shapes.len(),
        latency_ms
    );

    Ok(ShapeDetection {
        shapes,
        max_vote,
        latency_ms,
    })
}

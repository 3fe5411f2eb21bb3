//! Greedy contour evolution.
//!
//! Each pass relocates every control point to the energy-minimizing position
//! inside its candidate window. All relocations read the contour as it stood
//! at the start of the pass and are applied together at the end
//! (synchronous/Jacobi update), so the per-point search is order-independent
//! and parallelizes freely within a pass; passes themselves are serialized.
//!
//! A point keeps its current position unless a candidate is strictly better;
//! among equal improvements the first in row-major scan order wins. Both
//! rules make a pass deterministic, and together they guarantee that a
//! converged contour re-enters evolution as an immediate fixed point.
use super::contour::Contour;
use super::energy::EnergyField;
use super::options::{SnakeConfigError, SnakeParams};
use log::debug;
use serde::Serialize;
use std::time::Instant;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// How an evolution run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// A pass moved at most the configured number of points.
    Converged,
    /// The iteration budget ran out; the contour is the best found so far.
    IterationLimit,
}

/// Final contour with run statistics.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnakeResult {
    pub contour: Contour,
    pub termination: Termination,
    /// Number of passes executed.
    pub iterations: usize,
    /// Points relocated by the final pass.
    pub moved_last_pass: usize,
    /// Wall-clock cost of the run.
    pub latency_ms: f64,
}

/// Evolve `contour` over `field` until convergence or budget exhaustion.
///
/// The caller hands over ownership of the initial contour and receives the
/// final one; nothing is shared during the run. Hitting the iteration cap is
/// a tagged outcome, not an error.
pub fn evolve(
    contour: Contour,
    field: &EnergyField,
    params: &SnakeParams,
) -> Result<SnakeResult, SnakeConfigError> {
    params.validate()?;
    let start = Instant::now();

    let mut contour = contour;
    let mut termination = Termination::IterationLimit;
    let mut iterations = 0;
    let mut moved_last_pass = 0;

    for _ in 0..params.max_iterations {
        let (new_points, moved) = pass(contour.points(), field, params);
        contour.set_points(new_points);
        iterations += 1;
        moved_last_pass = moved;
        debug!("snake: pass={} moved={}", iterations, moved);

        if moved <= params.moved_threshold {
            termination = Termination::Converged;
            break;
        }
        // Keep the discretization stable while the contour grows or shrinks.
        // A converging pass leaves geometry untouched, so the returned
        // contour is always in a resampled state.
        contour.resample(params.min_spacing_factor, params.max_spacing_factor);
    }

    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    debug!(
        "snake: {:?} after {} passes, moved_last={} latency_ms={:.3}",
        termination, iterations, moved_last_pass, latency_ms
    );

    Ok(SnakeResult {
        contour,
        termination,
        iterations,
        moved_last_pass,
        latency_ms,
    })
}

fn mean_spacing(points: &[[f32; 2]]) -> f32 {
    let n = points.len();
    let total: f32 = (0..n)
        .map(|i| {
            let a = points[i];
            let b = points[(i + 1) % n];
            ((a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2)).sqrt()
        })
        .sum();
    total / n as f32
}

/// One synchronous pass: relocate every point against the frozen snapshot.
fn pass(points: &[[f32; 2]], field: &EnergyField, params: &SnakeParams) -> (Vec<[f32; 2]>, usize) {
    let mean = mean_spacing(points);

    #[cfg(feature = "parallel")]
    let new_points: Vec<[f32; 2]> = (0..points.len())
        .into_par_iter()
        .map(|i| relocate(i, points, mean, field, params))
        .collect();
    #[cfg(not(feature = "parallel"))]
    let new_points: Vec<[f32; 2]> = (0..points.len())
        .map(|i| relocate(i, points, mean, field, params))
        .collect();

    let moved = new_points
        .iter()
        .zip(points)
        .filter(|(new, old)| new != old)
        .count();
    (new_points, moved)
}

/// Pick the energy-minimizing candidate position for point `i`.
fn relocate(
    i: usize,
    points: &[[f32; 2]],
    mean: f32,
    field: &EnergyField,
    params: &SnakeParams,
) -> [f32; 2] {
    let n = points.len();
    let cur = points[i];
    let prev = points[(i + n - 1) % n];
    let next = points[(i + 1) % n];

    let max_x = (field.width() - 1) as f32;
    let max_y = (field.height() - 1) as f32;
    let r = params.search_radius as i32;

    // Raw terms per candidate, gathered first so each can be normalized by
    // its own maximum over the window.
    let mut candidates: Vec<([f32; 2], f32, f32, f32)> =
        Vec::with_capacity(((2 * r + 1) * (2 * r + 1)) as usize);
    let mut incumbent = 0usize;
    for dy in -r..=r {
        for dx in -r..=r {
            let pos = [cur[0] + dx as f32, cur[1] + dy as f32];
            let is_current = dx == 0 && dy == 0;
            let inside = pos[0] >= 0.0 && pos[0] <= max_x && pos[1] >= 0.0 && pos[1] <= max_y;
            if !is_current && !inside {
                continue;
            }
            if is_current {
                incumbent = candidates.len();
            }

            let d_prev = {
                let dx = pos[0] - prev[0];
                let dy = pos[1] - prev[1];
                (dx * dx + dy * dy).sqrt()
            };
            let continuity = (d_prev - mean) * (d_prev - mean);
            let cx = prev[0] - 2.0 * pos[0] + next[0];
            let cy = prev[1] - 2.0 * pos[1] + next[1];
            let curvature = cx * cx + cy * cy;
            let external = field.sample(pos);
            candidates.push((pos, continuity, curvature, external));
        }
    }

    let max_cont = candidates.iter().fold(0.0f32, |m, c| m.max(c.1));
    let max_curv = candidates.iter().fold(0.0f32, |m, c| m.max(c.2));
    let max_ext = candidates.iter().fold(0.0f32, |m, c| m.max(c.3));

    let energy = |c: &([f32; 2], f32, f32, f32)| -> f32 {
        let mut e = 0.0;
        if max_cont > f32::EPSILON {
            e += params.alpha * (c.1 / max_cont);
        }
        if max_curv > f32::EPSILON {
            e += params.beta * (c.2 / max_curv);
        }
        if max_ext > f32::EPSILON {
            e -= params.gamma * (c.3 / max_ext);
        }
        e
    };

    let mut best = incumbent;
    let mut best_energy = energy(&candidates[incumbent]);
    for (idx, candidate) in candidates.iter().enumerate() {
        let e = energy(candidate);
        if e < best_energy {
            best = idx;
            best_energy = e;
        }
    }
    candidates[best].0
}

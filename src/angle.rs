//! Angle utilities used by the voting engines.

use std::f32::consts::PI;

/// Normalizes an angle into the range [0, π).
///
/// Line orientations are ambiguous modulo π, so the line accumulator and the
/// ellipse rotation axis both work in this range.
#[inline]
pub fn normalize_half_pi(angle: f32) -> f32 {
    let norm = angle.rem_euclid(PI);
    if norm >= PI - 1e-6 {
        0.0
    } else {
        norm
    }
}

/// Normalizes an angle into the range [0, 2π).
#[inline]
pub fn normalize_two_pi(angle: f32) -> f32 {
    let norm = angle.rem_euclid(2.0 * PI);
    if norm >= 2.0 * PI - 1e-6 {
        0.0
    } else {
        norm
    }
}

/// How far two orientations are from being exactly antiparallel.
///
/// Returns a value in [0, π]: zero when `a` and `b` point in opposite
/// directions, π when they coincide. Used to pair edge pixels lying on
/// opposite sides of an ellipse.
#[inline]
pub fn opposition(a: f32, b: f32) -> f32 {
    let diff = normalize_two_pi(a - b);
    (diff - PI).abs()
}

//! Parameter types configuring the greedy contour evolver.

use serde::Deserialize;

/// Parameters controlling one evolution run.
///
/// The three weights are comparable across images because every energy term
/// is normalized by its own maximum over the candidate window before
/// weighting.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct SnakeParams {
    /// Weight of the continuity term (even point spacing).
    pub alpha: f32,
    /// Weight of the curvature term (bend penalty).
    pub beta: f32,
    /// Weight of the external term (attraction to high gradient).
    pub gamma: f32,
    /// Half-width of the square candidate window around each point, in
    /// pixels. A radius of 2 scans a 5×5 window.
    pub search_radius: usize,
    /// Iteration budget; exceeding it ends the run as `IterationLimit`.
    pub max_iterations: usize,
    /// A pass moving at most this many points ends the run as `Converged`.
    pub moved_threshold: usize,
    /// Adjacent spacing below `min_spacing_factor × mean` removes a point
    /// during resampling. Must lie in (0, 1).
    pub min_spacing_factor: f32,
    /// Adjacent spacing above `max_spacing_factor × mean` inserts a midpoint
    /// during resampling. Must exceed 1.
    pub max_spacing_factor: f32,
}

impl Default for SnakeParams {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            beta: 1.0,
            gamma: 1.2,
            search_radius: 2,
            max_iterations: 100,
            moved_threshold: 0,
            min_spacing_factor: 0.25,
            max_spacing_factor: 2.0,
        }
    }
}

/// Reasons an evolution configuration is rejected before the first pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SnakeConfigError {
    InvalidWeight {
        name: &'static str,
        value: f32,
    },
    AllWeightsZero,
    ZeroSearchRadius,
    ZeroIterationBudget,
    InvalidSpacingBounds {
        min_factor: f32,
        max_factor: f32,
    },
}

impl std::fmt::Display for SnakeConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnakeConfigError::InvalidWeight { name, value } => {
                write!(f, "{name} must be finite and non-negative, got {value}")
            }
            SnakeConfigError::AllWeightsZero => {
                write!(f, "at least one energy weight must be positive")
            }
            SnakeConfigError::ZeroSearchRadius => {
                write!(f, "search_radius must be at least 1")
            }
            SnakeConfigError::ZeroIterationBudget => {
                write!(f, "max_iterations must be at least 1")
            }
            SnakeConfigError::InvalidSpacingBounds {
                min_factor,
                max_factor,
            } => write!(
                f,
                "spacing factors must satisfy 0 < min < 1 < max (got min={min_factor}, max={max_factor})"
            ),
        }
    }
}

impl std::error::Error for SnakeConfigError {}

impl SnakeParams {
    /// Fail-fast validation, never silently corrected.
    pub fn validate(&self) -> Result<(), SnakeConfigError> {
        for (name, value) in [
            ("alpha", self.alpha),
            ("beta", self.beta),
            ("gamma", self.gamma),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(SnakeConfigError::InvalidWeight { name, value });
            }
        }
        if self.alpha == 0.0 && self.beta == 0.0 && self.gamma == 0.0 {
            return Err(SnakeConfigError::AllWeightsZero);
        }
        if self.search_radius == 0 {
            return Err(SnakeConfigError::ZeroSearchRadius);
        }
        if self.max_iterations == 0 {
            return Err(SnakeConfigError::ZeroIterationBudget);
        }
        if !(self.min_spacing_factor > 0.0
            && self.min_spacing_factor < 1.0
            && self.max_spacing_factor > 1.0
            && self.max_spacing_factor.is_finite())
        {
            return Err(SnakeConfigError::InvalidSpacingBounds {
                min_factor: self.min_spacing_factor,
                max_factor: self.max_spacing_factor,
            });
        }
        Ok(())
    }
}

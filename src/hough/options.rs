//! Parameter types configuring the voting engine.
//!
//! Each shape family carries its own range/bin configuration; peak selection
//! shares one set of knobs across families. Defaults aim for images in the
//! few-hundred-pixel range. Validation happens once per run, before any vote
//! is cast, and is never silently corrected.

use serde::Deserialize;

/// Shape family to vote for. Closed set: each variant has a dedicated voting
/// strategy behind the common [`crate::hough::accumulate`] entry point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Line,
    Circle,
    Ellipse,
}

/// Voting-wide parameters covering every shape family.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct HoughParams {
    /// Shape family this run votes for.
    pub kind: ShapeKind,
    pub line: LineParams,
    pub circle: CircleParams,
    pub ellipse: EllipseParams,
    pub peaks: PeakParams,
}

impl Default for HoughParams {
    fn default() -> Self {
        Self {
            kind: ShapeKind::Line,
            line: LineParams::default(),
            circle: CircleParams::default(),
            ellipse: EllipseParams::default(),
            peaks: PeakParams::default(),
        }
    }
}

/// Normal-form line accumulator configuration.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct LineParams {
    /// Number of angle samples across [0, π).
    pub theta_steps: usize,
    /// Offset (ρ) bin width in pixels.
    pub rho_bin_px: f32,
}

impl Default for LineParams {
    fn default() -> Self {
        Self {
            theta_steps: 180,
            rho_bin_px: 1.0,
        }
    }
}

/// Gradient-directed circle accumulator configuration.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct CircleParams {
    /// Smallest candidate radius in pixels.
    pub min_radius: f32,
    /// Largest candidate radius in pixels.
    pub max_radius: f32,
    /// Radius bin width in pixels.
    pub radius_step: f32,
    /// Center bin width in pixels, shared by both center axes.
    pub center_bin_px: f32,
}

impl Default for CircleParams {
    fn default() -> Self {
        Self {
            min_radius: 10.0,
            max_radius: 60.0,
            radius_step: 1.0,
            center_bin_px: 1.0,
        }
    }
}

/// Two-stage ellipse accumulator configuration.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct EllipseParams {
    /// Smallest candidate semi-axis in pixels.
    pub min_axis: f32,
    /// Largest candidate semi-axis in pixels.
    pub max_axis: f32,
    /// Semi-axis bin width in pixels.
    pub axis_step: f32,
    /// Number of rotation samples across [0, π).
    pub rotation_steps: usize,
    /// Center bin width in pixels for the stage-one center vote.
    pub center_bin_px: f32,
    /// Orientation tolerance (degrees) for treating two gradients as
    /// antiparallel when pairing chord endpoints.
    pub pair_orientation_tol_deg: f32,
    /// Subsampling stride over the edge pixel list during pairing; bounds the
    /// quadratic pair count on dense edge maps.
    pub pair_stride: usize,
}

impl Default for EllipseParams {
    fn default() -> Self {
        Self {
            min_axis: 5.0,
            max_axis: 50.0,
            axis_step: 1.0,
            rotation_steps: 18,
            center_bin_px: 2.0,
            pair_orientation_tol_deg: 10.0,
            pair_stride: 1,
        }
    }
}

/// Peak selection shared by every shape family.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct PeakParams {
    /// A cell qualifies as a peak when its count reaches
    /// `max_vote × relative_threshold`. Must lie in (0, 1].
    pub relative_threshold: f32,
    /// Chebyshev suppression radius in bins: a qualifying cell within this
    /// distance of a stronger peak is discarded.
    pub nms_radius: usize,
    /// Upper bound on returned shapes per run.
    pub max_shapes: usize,
}

impl Default for PeakParams {
    fn default() -> Self {
        Self {
            relative_threshold: 0.5,
            nms_radius: 2,
            max_shapes: 16,
        }
    }
}

/// Reasons a voting configuration is rejected before any vote is cast.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HoughConfigError {
    NonPositiveBinSize {
        name: &'static str,
        value: f32,
    },
    EmptySampling {
        name: &'static str,
    },
    InvalidRange {
        name: &'static str,
        min: f32,
        max: f32,
    },
    InvalidThreshold {
        value: f32,
    },
}

impl std::fmt::Display for HoughConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HoughConfigError::NonPositiveBinSize { name, value } => {
                write!(f, "{name} must be positive, got {value}")
            }
            HoughConfigError::EmptySampling { name } => {
                write!(f, "{name} must be at least 1")
            }
            HoughConfigError::InvalidRange { name, min, max } => {
                write!(f, "{name} range is empty ({min} ≥ {max})")
            }
            HoughConfigError::InvalidThreshold { value } => {
                write!(f, "relative_threshold must lie in (0, 1], got {value}")
            }
        }
    }
}

impl std::error::Error for HoughConfigError {}

fn check_positive(name: &'static str, value: f32) -> Result<(), HoughConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(HoughConfigError::NonPositiveBinSize { name, value })
    }
}

impl HoughParams {
    /// Fail-fast validation of the parameters the active shape kind uses.
    pub fn validate(&self) -> Result<(), HoughConfigError> {
        if !(self.peaks.relative_threshold > 0.0 && self.peaks.relative_threshold <= 1.0) {
            return Err(HoughConfigError::InvalidThreshold {
                value: self.peaks.relative_threshold,
            });
        }
        if self.peaks.max_shapes == 0 {
            return Err(HoughConfigError::EmptySampling { name: "max_shapes" });
        }
        match self.kind {
            ShapeKind::Line => {
                if self.line.theta_steps == 0 {
                    return Err(HoughConfigError::EmptySampling {
                        name: "theta_steps",
                    });
                }
                check_positive("rho_bin_px", self.line.rho_bin_px)
            }
            ShapeKind::Circle => {
                check_positive("radius_step", self.circle.radius_step)?;
                check_positive("center_bin_px", self.circle.center_bin_px)?;
                if !(self.circle.min_radius < self.circle.max_radius)
                    || self.circle.min_radius < 0.0
                {
                    return Err(HoughConfigError::InvalidRange {
                        name: "radius",
                        min: self.circle.min_radius,
                        max: self.circle.max_radius,
                    });
                }
                Ok(())
            }
            ShapeKind::Ellipse => {
                check_positive("axis_step", self.ellipse.axis_step)?;
                check_positive("center_bin_px", self.ellipse.center_bin_px)?;
                check_positive(
                    "pair_orientation_tol_deg",
                    self.ellipse.pair_orientation_tol_deg,
                )?;
                if self.ellipse.rotation_steps == 0 {
                    return Err(HoughConfigError::EmptySampling {
                        name: "rotation_steps",
                    });
                }
                if self.ellipse.pair_stride == 0 {
                    return Err(HoughConfigError::EmptySampling { name: "pair_stride" });
                }
                if !(self.ellipse.min_axis < self.ellipse.max_axis) || self.ellipse.min_axis <= 0.0
                {
                    return Err(HoughConfigError::InvalidRange {
                        name: "axis",
                        min: self.ellipse.min_axis,
                        max: self.ellipse.max_axis,
                    });
                }
                Ok(())
            }
        }
    }
}

#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod chain;
pub mod config;
pub mod edgemap;
pub mod hough;
pub mod snake;

// Utility modules shared by both pipelines.
pub mod angle;
pub mod image;

// --- High-level re-exports -------------------------------------------------

// Voting pipeline: accumulate + extract behind one entry point.
pub use crate::hough::{
    accumulate, detect_shapes, AccumulatorSpace, DetectedShape, HoughConfigError, HoughParams,
    ShapeDetection, ShapeKind, ShapeParams,
};

// Evolution pipeline: contour in, converged contour + chain code out.
pub use crate::chain::{decode, encode, measure, ChainCode, ChainCodeError, ChainEncoding};
pub use crate::snake::{
    evolve, Contour, ContourError, EnergyField, SnakeConfigError, SnakeParams, SnakeResult,
    Termination,
};

pub use crate::edgemap::{EdgeMap, EdgeMapError, EdgePixel};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use shape_detector::prelude::*;
///
/// # fn main() {
/// let edges = EdgeMap::new(64, 64, Vec::new()).expect("valid dimensions");
/// let detection = detect_shapes(&edges, &HoughParams::default()).expect("valid params");
/// println!("shapes={}", detection.shapes.len());
/// # }
/// ```
pub mod prelude {
    pub use crate::chain::{encode, ChainEncoding};
    pub use crate::edgemap::{EdgeMap, EdgePixel};
    pub use crate::hough::{detect_shapes, HoughParams, ShapeKind};
    pub use crate::snake::{evolve, Contour, EnergyField, SnakeParams};
}

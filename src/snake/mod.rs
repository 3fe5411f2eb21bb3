//! Greedy active contour ("snake") evolution.
//!
//! Overview
//! - The caller supplies an initial closed [`Contour`] (≥ 3 points) and an
//!   [`EnergyField`] built once from the edge map's gradient magnitude.
//! - [`evolve`] runs synchronous passes that relocate every point to the
//!   locally energy-minimizing position in its window, resampling between
//!   passes to keep spacing stable.
//! - The run ends `Converged` when a pass moves at most the configured
//!   number of points, or `IterationLimit` when the budget runs out; both
//!   are normal outcomes carrying the final contour.
//!
//! Modules
//! - [`contour`] – the closed point sequence and its resampling rules.
//! - [`energy`] – the normalized external-energy field.
//! - [`options`] – evolution parameters and their validation.
//! - `evolve` – the per-pass minimization.
pub mod contour;
pub mod energy;
mod evolve;
pub mod options;

pub use contour::{Contour, ContourError};
pub use energy::EnergyField;
pub use evolve::{evolve, SnakeResult, Termination};
pub use options::{SnakeConfigError, SnakeParams};

//! Edge-map input consumed by both the voting and the evolution pipelines.
//!
//! The edge detector itself lives outside this crate; callers hand over its
//! output as a sparse list of edge pixels carrying gradient magnitude and
//! orientation. Construction validates the data once, after which the map is
//! immutable and may be shared read-only across parallel workers.
use crate::angle::normalize_two_pi;
use crate::image::ImageF32;
use serde::Serialize;

/// A single edge pixel reported by the upstream edge detector.
#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgePixel {
    /// X coordinate in pixels
    pub x: u32,
    /// Y coordinate in pixels
    pub y: u32,
    /// Gradient magnitude at (x, y), non-negative
    pub magnitude: f32,
    /// Gradient orientation in radians, normalized to [0, 2π)
    pub orientation: f32,
}

/// Validation failures raised while constructing an [`EdgeMap`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EdgeMapError {
    EmptyDimensions {
        width: usize,
        height: usize,
    },
    PixelOutOfBounds {
        x: u32,
        y: u32,
        width: usize,
        height: usize,
    },
    InvalidMagnitude {
        x: u32,
        y: u32,
        magnitude: f32,
    },
    BufferSizeMismatch {
        expected: usize,
        got: usize,
    },
}

impl std::fmt::Display for EdgeMapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EdgeMapError::EmptyDimensions { width, height } => {
                write!(f, "edge map dimensions must be positive ({width}×{height})")
            }
            EdgeMapError::PixelOutOfBounds {
                x,
                y,
                width,
                height,
            } => {
                write!(f, "edge pixel ({x}, {y}) outside {width}×{height} image")
            }
            EdgeMapError::InvalidMagnitude { x, y, magnitude } => {
                write!(
                    f,
                    "edge pixel ({x}, {y}) has invalid magnitude {magnitude}"
                )
            }
            EdgeMapError::BufferSizeMismatch { expected, got } => {
                write!(f, "dense buffer holds {got} elements, expected {expected}")
            }
        }
    }
}

impl std::error::Error for EdgeMapError {}

/// Binary edge mask with per-pixel gradient magnitude and orientation.
///
/// Holds both the sparse pixel list (driving the vote loops) and a dense
/// magnitude plane (driving the snake's energy field).
#[derive(Clone, Debug)]
pub struct EdgeMap {
    width: usize,
    height: usize,
    pixels: Vec<EdgePixel>,
    magnitude: ImageF32,
}

impl EdgeMap {
    /// Build an edge map from a sparse pixel list.
    ///
    /// Orientations are folded into [0, 2π); out-of-bounds pixels and
    /// non-finite or negative magnitudes are rejected.
    pub fn new(width: usize, height: usize, pixels: Vec<EdgePixel>) -> Result<Self, EdgeMapError> {
        if width == 0 || height == 0 {
            return Err(EdgeMapError::EmptyDimensions { width, height });
        }

        let mut magnitude = ImageF32::new(width, height);
        let mut normalized = Vec::with_capacity(pixels.len());
        for px in pixels {
            if px.x as usize >= width || px.y as usize >= height {
                return Err(EdgeMapError::PixelOutOfBounds {
                    x: px.x,
                    y: px.y,
                    width,
                    height,
                });
            }
            if !px.magnitude.is_finite() || px.magnitude < 0.0 {
                return Err(EdgeMapError::InvalidMagnitude {
                    x: px.x,
                    y: px.y,
                    magnitude: px.magnitude,
                });
            }
            magnitude.set(px.x as usize, px.y as usize, px.magnitude);
            normalized.push(EdgePixel {
                orientation: normalize_two_pi(px.orientation),
                ..px
            });
        }

        Ok(Self {
            width,
            height,
            pixels: normalized,
            magnitude,
        })
    }

    /// Build an edge map from dense row-major buffers (`mask != 0` marks an
    /// edge pixel). Buffer lengths must equal `width * height`.
    pub fn from_dense(
        width: usize,
        height: usize,
        mask: &[u8],
        magnitude: &[f32],
        orientation: &[f32],
    ) -> Result<Self, EdgeMapError> {
        if width == 0 || height == 0 {
            return Err(EdgeMapError::EmptyDimensions { width, height });
        }
        let expected = width * height;
        for buffer in [mask.len(), magnitude.len(), orientation.len()] {
            if buffer != expected {
                return Err(EdgeMapError::BufferSizeMismatch {
                    expected,
                    got: buffer,
                });
            }
        }

        let mut pixels = Vec::new();
        for y in 0..height {
            for x in 0..width {
                let idx = y * width + x;
                if mask[idx] == 0 {
                    continue;
                }
                pixels.push(EdgePixel {
                    x: x as u32,
                    y: y as u32,
                    magnitude: magnitude[idx],
                    orientation: orientation[idx],
                });
            }
        }
        Self::new(width, height, pixels)
    }

    /// Image width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    /// Edge pixels in row-major discovery order.
    pub fn pixels(&self) -> &[EdgePixel] {
        &self.pixels
    }

    /// Dense gradient-magnitude plane, zero off-edge.
    pub fn magnitude(&self) -> &ImageF32 {
        &self.magnitude
    }
}

#[cfg(test)]
mod tests {
    use super::{EdgeMap, EdgeMapError, EdgePixel};

    fn pixel(x: u32, y: u32) -> EdgePixel {
        EdgePixel {
            x,
            y,
            magnitude: 1.0,
            orientation: 0.0,
        }
    }

    #[test]
    fn rejects_out_of_bounds_pixel() {
        let err = EdgeMap::new(4, 4, vec![pixel(4, 0)]).unwrap_err();
        assert!(matches!(err, EdgeMapError::PixelOutOfBounds { x: 4, .. }));
    }

    #[test]
    fn rejects_negative_magnitude() {
        let err = EdgeMap::new(
            4,
            4,
            vec![EdgePixel {
                magnitude: -1.0,
                ..pixel(1, 1)
            }],
        )
        .unwrap_err();
        assert!(matches!(err, EdgeMapError::InvalidMagnitude { .. }));
    }

    #[test]
    fn folds_orientation_into_two_pi() {
        let map = EdgeMap::new(
            4,
            4,
            vec![EdgePixel {
                orientation: -std::f32::consts::FRAC_PI_2,
                ..pixel(2, 2)
            }],
        )
        .unwrap();
        let ori = map.pixels()[0].orientation;
        assert!((ori - 1.5 * std::f32::consts::PI).abs() < 1e-4);
    }

    #[test]
    fn dense_construction_rejects_short_buffers() {
        let err = EdgeMap::from_dense(3, 3, &[0u8; 9], &[0.0; 8], &[0.0; 9]).unwrap_err();
        assert_eq!(
            err,
            EdgeMapError::BufferSizeMismatch {
                expected: 9,
                got: 8
            }
        );
    }

    #[test]
    fn dense_construction_matches_sparse() {
        let mut mask = vec![0u8; 9];
        let mut mag = vec![0.0f32; 9];
        let ori = vec![0.0f32; 9];
        mask[4] = 1;
        mag[4] = 2.5;
        let map = EdgeMap::from_dense(3, 3, &mask, &mag, &ori).unwrap();
        assert_eq!(map.pixels().len(), 1);
        assert_eq!(map.magnitude().get(1, 1), 2.5);
    }
}

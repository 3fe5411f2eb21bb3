//! External energy field derived from the edge map.
//!
//! The field is the gradient-magnitude plane scaled to [0, 1], computed once
//! per run and read-only afterwards; the evolver treats high values as
//! attractive. Sharing it across parallel workers needs no locking.
use crate::edgemap::EdgeMap;
use crate::image::ImageF32;

/// Dense scalar field over the image, values in [0, 1].
#[derive(Clone, Debug)]
pub struct EnergyField {
    grid: ImageF32,
}

impl EnergyField {
    /// Normalize the edge map's gradient magnitude into [0, 1].
    ///
    /// An edge map with no gradient response yields an all-zero field; the
    /// evolver then runs on the internal terms alone.
    pub fn from_edge_map(edges: &EdgeMap) -> Self {
        let mag = edges.magnitude();
        let peak = mag.max_value();
        let mut grid = ImageF32::new(mag.w, mag.h);
        if peak > 0.0 {
            for (dst, &src) in grid.data.iter_mut().zip(&mag.data) {
                *dst = (src / peak).clamp(0.0, 1.0);
            }
        }
        Self { grid }
    }

    /// Field width in pixels
    pub fn width(&self) -> usize {
        self.grid.w
    }

    /// Field height in pixels
    pub fn height(&self) -> usize {
        self.grid.h
    }

    /// Sample at a real-valued position: rounded to the nearest pixel,
    /// clamped to the field bounds.
    #[inline]
    pub fn sample(&self, pos: [f32; 2]) -> f32 {
        let x = (pos[0].round().max(0.0) as usize).min(self.grid.w - 1);
        let y = (pos[1].round().max(0.0) as usize).min(self.grid.h - 1);
        self.grid.get(x, y)
    }
}

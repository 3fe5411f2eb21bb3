//! 8-direction chain-code encoding with perimeter and area measurements.
//!
//! Direction convention (fixed): code 0 = east, increasing counter-clockwise
//! in 45° steps when the image is viewed with the y axis pointing up. Offsets
//! are stored in row/column coordinates (y grows downward), so code 2
//! ("north") is `(0, -1)`:
//!
//! ```text
//! code:   0       1        2       3        4       5        6       7
//! step: (1,0)  (1,-1)   (0,-1) (-1,-1)   (-1,0) (-1,1)    (0,1)   (1,1)
//! ```
//!
//! Perimeter uses the standard chain-code estimate (cardinal steps count 1,
//! diagonal steps √2). Area accumulates signed trapezoid contributions in the
//! y-up frame, so a counter-clockwise traversal yields positive area. A chain
//! whose steps do not return to the start pixel is a caller error, never
//! silently corrected.
use crate::snake::contour::Contour;
use serde::Serialize;

/// Unit step per direction code, in row/column coordinates.
pub const DIRECTIONS: [[i32; 2]; 8] = [
    [1, 0],
    [1, -1],
    [0, -1],
    [-1, -1],
    [-1, 0],
    [-1, 1],
    [0, 1],
    [1, 1],
];

/// Direction codes of one boundary traversal, anchored at a start pixel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainCode {
    /// First pixel of the traversal.
    pub start: [i32; 2],
    /// Compass moves in {0..7}, one per step.
    pub codes: Vec<u8>,
}

/// Chain code paired with the measurements derived from it.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainEncoding {
    pub chain: ChainCode,
    /// Step-length sum: 1 per cardinal move, √2 per diagonal move.
    pub perimeter: f32,
    /// Signed enclosed area; positive for counter-clockwise traversals.
    pub area: f32,
}

/// Precondition violations raised by encoding or measurement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ChainCodeError {
    /// Every contour point rounded to the same pixel.
    DegenerateContour,
    /// The steps do not return to the start pixel; `gap` is the leftover
    /// offset.
    OpenLoop { gap: [i32; 2] },
    /// A code outside {0..7}.
    InvalidCode { index: usize, code: u8 },
}

impl std::fmt::Display for ChainCodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChainCodeError::DegenerateContour => {
                write!(f, "contour collapses to a single pixel")
            }
            ChainCodeError::OpenLoop { gap } => {
                write!(
                    f,
                    "chain code does not close (leftover offset {}, {})",
                    gap[0], gap[1]
                )
            }
            ChainCodeError::InvalidCode { index, code } => {
                write!(f, "chain code {code} at step {index} is outside 0..8")
            }
        }
    }
}

impl std::error::Error for ChainCodeError {}

#[inline]
fn code_for(dx: i32, dy: i32) -> u8 {
    debug_assert!((dx, dy) != (0, 0) && dx.abs() <= 1 && dy.abs() <= 1);
    match (dx, dy) {
        (1, 0) => 0,
        (1, -1) => 1,
        (0, -1) => 2,
        (-1, -1) => 3,
        (-1, 0) => 4,
        (-1, 1) => 5,
        (0, 1) => 6,
        _ => 7,
    }
}

/// Serialize a contour as a closed chain code and measure it.
///
/// Points are rounded to the pixel grid in traversal order; consecutive
/// pixels are joined by 8-connected unit steps, and the loop closes from the
/// last pixel back to the first.
pub fn encode(contour: &Contour) -> Result<ChainEncoding, ChainCodeError> {
    // Round onto the grid, collapsing runs that land on one pixel.
    let mut pixels: Vec<[i32; 2]> = Vec::with_capacity(contour.len());
    for p in contour.points() {
        let px = [p[0].round() as i32, p[1].round() as i32];
        if pixels.last() != Some(&px) {
            pixels.push(px);
        }
    }
    while pixels.len() > 1 && pixels.first() == pixels.last() {
        pixels.pop();
    }
    if pixels.len() < 2 {
        return Err(ChainCodeError::DegenerateContour);
    }

    let start = pixels[0];
    let mut codes = Vec::new();
    let mut cursor = start;
    for target_idx in 1..=pixels.len() {
        let target = pixels[target_idx % pixels.len()];
        while cursor != target {
            let dx = (target[0] - cursor[0]).signum();
            let dy = (target[1] - cursor[1]).signum();
            codes.push(code_for(dx, dy));
            cursor = [cursor[0] + dx, cursor[1] + dy];
        }
    }

    let chain = ChainCode { start, codes };
    let (perimeter, area) = measure(&chain)?;
    Ok(ChainEncoding {
        chain,
        perimeter,
        area,
    })
}

/// Perimeter and signed area of a closed chain code.
///
/// Fails on codes outside {0..7} and on chains that do not return to their
/// start pixel; both are caller errors on externally supplied chains.
pub fn measure(chain: &ChainCode) -> Result<(f32, f32), ChainCodeError> {
    let mut gap = [0i64, 0i64];
    for (index, &code) in chain.codes.iter().enumerate() {
        if code >= 8 {
            return Err(ChainCodeError::InvalidCode { index, code });
        }
        gap[0] += DIRECTIONS[code as usize][0] as i64;
        gap[1] += DIRECTIONS[code as usize][1] as i64;
    }
    if gap != [0, 0] {
        return Err(ChainCodeError::OpenLoop {
            gap: [gap[0] as i32, gap[1] as i32],
        });
    }

    let mut perimeter = 0.0f32;
    let mut acc = 0i64;
    let mut cursor = chain.start;
    for &code in &chain.codes {
        let [dx, dy] = DIRECTIONS[code as usize];
        perimeter += if code % 2 == 0 {
            1.0
        } else {
            std::f32::consts::SQRT_2
        };
        // Trapezoid contribution in the y-up frame: x·dY − Y·dx with Y = −y.
        acc += cursor[1] as i64 * dx as i64 - cursor[0] as i64 * dy as i64;
        cursor = [cursor[0] + dx, cursor[1] + dy];
    }
    Ok((perimeter, acc as f32 / 2.0))
}

/// Expand a chain code back into the visited pixel sequence, including both
/// the start pixel and the terminal pixel (equal to the start for a closed
/// chain).
pub fn decode(chain: &ChainCode) -> Vec<[i32; 2]> {
    let mut pixels = Vec::with_capacity(chain.codes.len() + 1);
    let mut cursor = chain.start;
    pixels.push(cursor);
    for &code in &chain.codes {
        let [dx, dy] = DIRECTIONS[(code % 8) as usize];
        cursor = [cursor[0] + dx, cursor[1] + dy];
        pixels.push(cursor);
    }
    pixels
}

//! Two-dimensional Hilbert curve codec.
//!
//! A block of `B = 4^k` bits fills a `2^k x 2^k` grid. Each level of the curve
//! splits a cell into four quadrants visited in a U shape; the quadrant is
//! rotated or reflected so consecutive cells stay adjacent.

use super::{CodecError, CodecResult, Dimension, Point, SpatialCodec, DEFAULT_MAX_BLOCK_SIZE};
use tracing::debug;

/// Number of cells in the base (first-order) curve.
pub const BASE_BLOCK_SIZE: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct N2 {
    block_size: usize,
    side: usize,
}

impl N2 {
    /// Build a codec with the default block size limit.
    pub fn new(block_size: usize) -> CodecResult<Self> {
        Self::with_limit(block_size, DEFAULT_MAX_BLOCK_SIZE)
    }

    /// Build a codec, rejecting blocks larger than `max_block_size`.
    pub fn with_limit(block_size: usize, max_block_size: usize) -> CodecResult<Self> {
        let side = grid_side(block_size).ok_or_else(|| {
            CodecError::block_size("N2", block_size, "must be a power of 4 and at least 4")
        })?;
        if block_size > max_block_size {
            return Err(CodecError::block_size(
                "N2",
                block_size,
                format!("exceeds the maximum of {max_block_size}"),
            ));
        }
        debug!(block_size, side, "configured N2 codec");
        Ok(Self { block_size, side })
    }
}

/// Side length of the grid for a power-of-4 block size.
fn grid_side(block_size: usize) -> Option<usize> {
    if block_size < BASE_BLOCK_SIZE || !block_size.is_power_of_two() {
        return None;
    }
    // power of 4 <=> power of 2 with an even exponent
    let exp = block_size.trailing_zeros();
    (exp % 2 == 0).then(|| 1usize << (exp / 2))
}

/// Curves of odd order are transposed so the first step is always along x.
fn is_transposed(side: usize) -> bool {
    side.trailing_zeros() % 2 == 1
}

/// Reflect and transpose a quadrant so its entry and exit line up.
fn rotate(s: usize, x: &mut usize, y: &mut usize, rx: usize, ry: usize) {
    if ry == 0 {
        if rx == 1 {
            *x = s - 1 - *x;
            *y = s - 1 - *y;
        }
        std::mem::swap(x, y);
    }
}

impl SpatialCodec for N2 {
    fn dimension(&self) -> Dimension {
        Dimension::Two
    }

    fn block_size(&self) -> usize {
        self.block_size
    }

    fn side(&self) -> u32 {
        self.side as u32
    }

    fn point_at(&self, index: usize) -> Point {
        let (mut x, mut y) = (0usize, 0usize);
        let mut t = index;
        let mut s = 1;
        while s < self.side {
            let rx = 1 & (t >> 1);
            let ry = 1 & (t ^ rx);
            rotate(s, &mut x, &mut y, rx, ry);
            x += s * rx;
            y += s * ry;
            t >>= 2;
            s <<= 1;
        }
        if is_transposed(self.side) {
            std::mem::swap(&mut x, &mut y);
        }
        debug!(index, x, y, "resolved N2 coordinate");
        Point::N2(x as u32, y as u32)
    }

    fn decode(&self, point: &Point) -> CodecResult<usize> {
        let (x, y) = match *point {
            Point::N2(x, y) => (x as usize, y as usize),
            Point::N3(..) => {
                return Err(CodecError::DimensionMismatch {
                    expected: 2,
                    got: 3,
                })
            }
        };
        if x >= self.side || y >= self.side {
            return Err(CodecError::OutOfBounds {
                point: point.to_string(),
                side: self.side as u32,
            });
        }

        let (mut x, mut y) = if is_transposed(self.side) {
            (y, x)
        } else {
            (x, y)
        };
        let mut d = 0;
        let mut s = self.side >> 1;
        while s > 0 {
            let rx = usize::from(x & s > 0);
            let ry = usize::from(y & s > 0);
            d += s * s * ((3 * rx) ^ ry);
            rotate(self.side, &mut x, &mut y, rx, ry);
            s >>= 1;
        }
        debug!(%point, index = d, "resolved N2 bit index");
        Ok(d)
    }
}

//! Three-dimensional codec over the first-order Hilbert curve.
//!
//! The first-order 3D curve visits the corners of the unit cube in Gray code
//! order, so one block holds exactly eight bits. Higher orders are not
//! supported.

use super::{CodecError, CodecResult, Dimension, Point, SpatialCodec};
use tracing::debug;

pub const BASE_BLOCK_SIZE: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct N3;

impl N3 {
    pub fn new(block_size: usize) -> CodecResult<Self> {
        if block_size != BASE_BLOCK_SIZE {
            return Err(CodecError::block_size(
                "N3",
                block_size,
                "only first-order (8-bit) curves are supported",
            ));
        }
        debug!(block_size, "configured N3 codec");
        Ok(Self)
    }
}

impl SpatialCodec for N3 {
    fn dimension(&self) -> Dimension {
        Dimension::Three
    }

    fn block_size(&self) -> usize {
        BASE_BLOCK_SIZE
    }

    fn side(&self) -> u32 {
        2
    }

    fn point_at(&self, index: usize) -> Point {
        let gray = (index ^ (index >> 1)) as u32;
        let point = Point::N3(1 & (gray >> 2), 1 & (gray >> 1), 1 & gray);
        debug!(index, %point, "resolved N3 coordinate");
        point
    }

    fn decode(&self, point: &Point) -> CodecResult<usize> {
        let (x, y, z) = match *point {
            Point::N3(x, y, z) => (x, y, z),
            Point::N2(..) => {
                return Err(CodecError::DimensionMismatch {
                    expected: 3,
                    got: 2,
                })
            }
        };
        if point.max_coordinate() > 1 {
            return Err(CodecError::OutOfBounds {
                point: point.to_string(),
                side: 2,
            });
        }

        // inverse Gray code
        let mut index = ((x << 2) | (y << 1) | z) as usize;
        index ^= index >> 1;
        index ^= index >> 2;
        debug!(%point, index, "resolved N3 bit index");
        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_base_block_size() {
        assert!(N3::new(8).is_ok());
        for bad in [0, 1, 4, 16, 64] {
            assert!(matches!(
                N3::new(bad),
                Err(CodecError::InvalidBlockSize { .. })
            ));
        }
    }

    #[test]
    fn test_gray_code_walk() {
        assert_eq!(
            N3.curve(),
            vec![
                Point::N3(0, 0, 0),
                Point::N3(0, 0, 1),
                Point::N3(0, 1, 1),
                Point::N3(0, 1, 0),
                Point::N3(1, 1, 0),
                Point::N3(1, 1, 1),
                Point::N3(1, 0, 1),
                Point::N3(1, 0, 0),
            ]
        );
    }

    #[test]
    fn test_decode_inverts_encode() {
        for i in 0..8 {
            assert_eq!(N3.decode(&N3.point_at(i)).unwrap(), i);
        }
    }

    #[test]
    fn test_decode_rejects_bad_points() {
        assert!(matches!(
            N3.decode(&Point::N3(2, 0, 0)),
            Err(CodecError::OutOfBounds { side: 2, .. })
        ));
        assert!(matches!(
            N3.decode(&Point::N2(0, 0)),
            Err(CodecError::DimensionMismatch { expected: 3, got: 2 })
        ));
    }

    #[test]
    fn test_stream_roundtrip_ascii() {
        let stream = N3.stream_encode(b"h");
        assert_eq!(stream.len(), b'h'.count_ones() as usize);
        assert_eq!(N3.stream_decode(&stream, 1).unwrap(), b"h".to_vec());
    }
}

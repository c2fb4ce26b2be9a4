//! Spatial codec: maps the set bits of a data block onto a Hilbert curve.
//!
//! A block of `B` bits is laid along a space-filling curve with `B` cells.
//! Encoding emits the curve coordinate of every set bit; decoding walks the
//! coordinates back to bit indices and reassembles the block.
//!
//! # Example
//!
//! ```rust
//! use scodec::codec::{build_codec, Dimension, SpatialCodec};
//!
//! let codec = build_codec(Dimension::Two, 16, 4096).unwrap();
//! let stream = codec.stream_encode(&[0x81]);
//! let bytes = codec.stream_decode(&stream, 1).unwrap();
//! assert_eq!(bytes, vec![0x81]);
//! ```

mod error;
pub mod frame;
pub mod n2;
pub mod n3;
pub mod payload;

pub use error::{CodecError, CodecResult};
pub use frame::{decode_frames, encode_frames, FrameSet};
pub use n2::N2;
pub use n3::N3;
pub use payload::Payload;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info};

/// Largest block a codec accepts unless configured otherwise (a 64x64 grid).
pub const DEFAULT_MAX_BLOCK_SIZE: usize = 4096;

/// Number of axes of the curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Dimension {
    Two,
    Three,
}

impl Dimension {
    pub fn axes(self) -> u8 {
        match self {
            Self::Two => 2,
            Self::Three => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Two => "N2",
            Self::Three => "N3",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for Dimension {
    type Error = CodecError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(Self::Two),
            3 => Ok(Self::Three),
            other => Err(CodecError::UnsupportedDimension(other.to_string())),
        }
    }
}

impl From<Dimension> for u8 {
    fn from(dimension: Dimension) -> Self {
        dimension.axes()
    }
}

impl FromStr for Dimension {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "2" | "n2" | "2d" => Ok(Self::Two),
            "3" | "n3" | "3d" => Ok(Self::Three),
            other => Err(CodecError::UnsupportedDimension(other.to_string())),
        }
    }
}

/// A coordinate on the curve. Serializes as a plain JSON array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Point {
    N2(u32, u32),
    N3(u32, u32, u32),
}

impl Point {
    pub fn axes(&self) -> u8 {
        match self {
            Self::N2(..) => 2,
            Self::N3(..) => 3,
        }
    }

    pub fn max_coordinate(&self) -> u32 {
        match *self {
            Self::N2(x, y) => x.max(y),
            Self::N3(x, y, z) => x.max(y).max(z),
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::N2(x, y) => write!(f, "({x}, {y})"),
            Self::N3(x, y, z) => write!(f, "({x}, {y}, {z})"),
        }
    }
}

/// A Hilbert-curve codec over one block of bits.
///
/// Implementors provide the curve mapping; the stream operations are shared.
pub trait SpatialCodec: Send + Sync + fmt::Debug {
    fn dimension(&self) -> Dimension;

    /// Number of bits (and curve cells) per block.
    fn block_size(&self) -> usize;

    /// Cells along each axis.
    fn side(&self) -> u32;

    /// Curve coordinate of a bit index. `index` must be below `block_size()`.
    fn point_at(&self, index: usize) -> Point;

    /// Bit index of a curve coordinate.
    fn decode(&self, point: &Point) -> CodecResult<usize>;

    /// Range-checked form of [`SpatialCodec::point_at`].
    fn encode(&self, index: usize) -> CodecResult<Point> {
        if index >= self.block_size() {
            return Err(CodecError::IndexOutOfRange {
                index,
                block_size: self.block_size(),
            });
        }
        Ok(self.point_at(index))
    }

    /// Every cell of the block in curve order.
    fn curve(&self) -> Vec<Point> {
        (0..self.block_size()).map(|i| self.point_at(i)).collect()
    }

    /// Encode a big-endian payload. Bits at or above `block_size()` are dropped.
    fn stream_encode(&self, bytes: &[u8]) -> Vec<Point> {
        let bit_len = bytes.len() * 8;
        let limit = bit_len.min(self.block_size());
        let dropped = (limit..bit_len).filter(|&i| payload::bit_at(bytes, i)).count();
        if dropped > 0 {
            debug!(
                dropped,
                block_size = self.block_size(),
                "payload exceeds block, masking high bits"
            );
        }

        let stream: Vec<Point> = (0..limit)
            .filter(|&i| payload::bit_at(bytes, i))
            .map(|i| self.point_at(i))
            .collect();
        info!(codec = %self.dimension(), points = stream.len(), "encoded stream");
        stream
    }

    /// Decode a stream into `byte_len` big-endian bytes, at most one block's worth.
    fn stream_decode(&self, stream: &[Point], byte_len: usize) -> CodecResult<Vec<u8>> {
        let max = self.block_size().div_ceil(8);
        if byte_len > max {
            return Err(CodecError::InvalidByteLength { byte_len, max });
        }
        let mut out = vec![0u8; byte_len];
        for point in stream {
            let bit = self.decode(point)?;
            payload::set_bit(&mut out, bit)?;
        }
        info!(codec = %self.dimension(), points = stream.len(), byte_len, "decoded stream");
        Ok(out)
    }
}

/// Build the codec for a dimension.
pub fn build_codec(
    dimension: Dimension,
    block_size: usize,
    max_block_size: usize,
) -> CodecResult<Box<dyn SpatialCodec>> {
    match dimension {
        Dimension::Two => Ok(Box::new(N2::with_limit(block_size, max_block_size)?)),
        Dimension::Three => Ok(Box::new(N3::new(block_size)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_parsing() {
        assert_eq!("2".parse::<Dimension>().unwrap(), Dimension::Two);
        assert_eq!("N3".parse::<Dimension>().unwrap(), Dimension::Three);
        assert_eq!(" 3d ".parse::<Dimension>().unwrap(), Dimension::Three);
        assert!(matches!(
            "4".parse::<Dimension>(),
            Err(CodecError::UnsupportedDimension(_))
        ));
        assert!(Dimension::try_from(1u8).is_err());
    }

    #[test]
    fn test_dimension_serde_as_number() {
        let json = serde_json::to_string(&Dimension::Three).unwrap();
        assert_eq!(json, "3");
        let dim: Dimension = serde_json::from_str("2").unwrap();
        assert_eq!(dim, Dimension::Two);
        assert!(serde_json::from_str::<Dimension>("5").is_err());
    }

    #[test]
    fn test_point_serde_as_array() {
        assert_eq!(serde_json::to_string(&Point::N2(1, 2)).unwrap(), "[1,2]");
        let p: Point = serde_json::from_str("[0,1,1]").unwrap();
        assert_eq!(p, Point::N3(0, 1, 1));
        assert_eq!(p.to_string(), "(0, 1, 1)");
    }

    #[test]
    fn test_build_codec_dispatch() {
        let codec = build_codec(Dimension::Two, 64, DEFAULT_MAX_BLOCK_SIZE).unwrap();
        assert_eq!(codec.dimension(), Dimension::Two);
        assert_eq!(codec.side(), 8);

        let codec = build_codec(Dimension::Three, 8, DEFAULT_MAX_BLOCK_SIZE).unwrap();
        assert_eq!(codec.dimension(), Dimension::Three);
        assert_eq!(codec.side(), 2);

        assert!(build_codec(Dimension::Three, 64, DEFAULT_MAX_BLOCK_SIZE).is_err());
    }

    #[test]
    fn test_stream_encode_masks_high_bits() {
        let codec = N2::new(4).unwrap();
        // 0x1f: bit 4 is outside a 4-bit block
        let stream = codec.stream_encode(&[0x1f]);
        assert_eq!(stream, codec.curve());
        assert_eq!(codec.stream_decode(&stream, 1).unwrap(), vec![0x0f]);
    }

    #[test]
    fn test_stream_decode_overflow() {
        let codec = N2::new(16).unwrap();
        let stream = codec.stream_encode(&[0x80, 0x00]);
        assert!(matches!(
            codec.stream_decode(&stream, 1),
            Err(CodecError::PayloadOverflow { bit: 15, byte_len: 1 })
        ));
    }

    #[test]
    fn test_stream_decode_byte_len_bounded_by_block() {
        let codec = N2::new(16).unwrap();
        assert_eq!(codec.stream_decode(&[], 2).unwrap(), vec![0, 0]);
        assert_eq!(
            codec.stream_decode(&[], usize::MAX),
            Err(CodecError::InvalidByteLength {
                byte_len: usize::MAX,
                max: 2
            })
        );
    }

    #[test]
    fn test_encode_range_check() {
        let codec = N2::new(16).unwrap();
        assert!(codec.encode(15).is_ok());
        assert!(codec.encode(16).is_err());
    }

    #[test]
    fn test_empty_payload() {
        let codec = N3::new(8).unwrap();
        assert!(codec.stream_encode(&[]).is_empty());
        assert_eq!(codec.stream_decode(&[], 1).unwrap(), vec![0]);
    }
}

//! Codec error types.

use thiserror::Error;

/// Errors raised while building a codec or encoding/decoding a stream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Only 2D and 3D curves exist.
    #[error("Unsupported dimension: {0} (expected 2 or 3)")]
    UnsupportedDimension(String),

    /// Block size is not valid for the requested curve.
    #[error("Invalid block size {size} for {dimension}: {reason}")]
    InvalidBlockSize {
        dimension: &'static str,
        size: usize,
        reason: String,
    },

    /// A coordinate lies outside the curve's grid.
    #[error("Coordinate {point} is outside the {side}x{side} grid")]
    OutOfBounds { point: String, side: u32 },

    #[error("Bit index {index} is outside a {block_size}-bit block")]
    IndexOutOfRange { index: usize, block_size: usize },

    /// A point with the wrong number of axes was given to a codec.
    #[error("Expected a {expected}D point, got {got}D")]
    DimensionMismatch { expected: u8, got: u8 },

    /// Payload text could not be parsed as hex or a bit array.
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// A decoded bit does not fit in the requested output length.
    #[error("Bit {bit} does not fit in {byte_len} byte(s)")]
    PayloadOverflow { bit: usize, byte_len: usize },

    /// Frame counts run from 1 to [`MAX_FRAMES`](super::frame::MAX_FRAMES).
    #[error("Invalid frame count {0} (expected 1 to {max})", max = super::frame::MAX_FRAMES)]
    InvalidFrameCount(usize),

    /// The requested output is longer than the decoded bits can fill.
    #[error("Output length of {byte_len} byte(s) exceeds the {max} the stream can hold")]
    InvalidByteLength { byte_len: usize, max: usize },
}

impl CodecError {
    pub fn block_size(dimension: &'static str, size: usize, reason: impl Into<String>) -> Self {
        Self::InvalidBlockSize {
            dimension,
            size,
            reason: reason.into(),
        }
    }

    pub fn payload(message: impl Into<String>) -> Self {
        Self::InvalidPayload(message.into())
    }
}

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CodecError::block_size("N2", 5, "must be a power of 4");
        assert_eq!(
            err.to_string(),
            "Invalid block size 5 for N2: must be a power of 4"
        );

        let err = CodecError::OutOfBounds {
            point: "(4, 0)".to_string(),
            side: 4,
        };
        assert_eq!(err.to_string(), "Coordinate (4, 0) is outside the 4x4 grid");

        let err = CodecError::PayloadOverflow { bit: 9, byte_len: 1 };
        assert_eq!(err.to_string(), "Bit 9 does not fit in 1 byte(s)");

        let err = CodecError::InvalidFrameCount(0);
        assert_eq!(err.to_string(), "Invalid frame count 0 (expected 1 to 65536)");
    }
}

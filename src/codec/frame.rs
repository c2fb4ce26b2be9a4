//! Multi-block framing.
//!
//! A payload longer than one block is cut into frames of `block_size` bits,
//! lowest bits first: frame `f` carries payload bits `[f*B, (f+1)*B)`.

use super::{payload, CodecError, CodecResult, Payload, Point, SpatialCodec};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Upper bound on the frames a single encode may produce.
pub const MAX_FRAMES: usize = 65_536;

/// Encoded frames of a payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameSet {
    pub block_size: usize,
    pub frames: Vec<Vec<Point>>,
    /// Set when the requested frame count could not hold every set bit.
    pub truncated: bool,
}

impl FrameSet {
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn point_count(&self) -> usize {
        self.frames.iter().map(Vec::len).sum()
    }
}

/// Split `payload` into frames and encode each one.
///
/// With `frames = None` the count is the smallest that holds the payload (at
/// least one). A smaller explicit count drops the excess high bits. Counts
/// above [`MAX_FRAMES`] are rejected, including the default one.
pub fn encode_frames(
    codec: &dyn SpatialCodec,
    payload: &Payload,
    frames: Option<usize>,
) -> CodecResult<FrameSet> {
    let block = codec.block_size();
    let needed = payload.bit_len().div_ceil(block).max(1);
    let count = match frames {
        Some(n) => n,
        None => needed,
    };
    let capacity = match count.checked_mul(block) {
        Some(capacity) if (1..=MAX_FRAMES).contains(&count) => capacity,
        _ => return Err(CodecError::InvalidFrameCount(count)),
    };
    let truncated = (capacity..payload.bit_len()).any(|i| payload.bit(i));
    if truncated {
        warn!(
            requested = count,
            needed, "payload does not fit the requested frames, dropping high bits"
        );
    }

    let encoded = (0..count)
        .map(|f| {
            (0..block)
                .filter(|&i| payload.bit(f * block + i))
                .map(|i| codec.point_at(i))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    info!(
        codec = %codec.dimension(),
        frames = count,
        truncated,
        "encoded frames"
    );
    Ok(FrameSet {
        block_size: block,
        frames: encoded,
        truncated,
    })
}

/// Reassemble frames into a big-endian byte string.
///
/// `byte_len` defaults to enough bytes for every frame and may not exceed it.
pub fn decode_frames(
    codec: &dyn SpatialCodec,
    frames: &[Vec<Point>],
    byte_len: Option<usize>,
) -> CodecResult<Vec<u8>> {
    let block = codec.block_size();
    let max = frames.len().saturating_mul(block).div_ceil(8);
    let byte_len = byte_len.unwrap_or(max);
    if byte_len > max {
        return Err(CodecError::InvalidByteLength { byte_len, max });
    }
    let mut out = vec![0u8; byte_len];
    for (f, frame) in frames.iter().enumerate() {
        for point in frame {
            let bit = f * block + codec.decode(point)?;
            payload::set_bit(&mut out, bit)?;
        }
    }
    info!(codec = %codec.dimension(), frames = frames.len(), byte_len, "decoded frames");
    Ok(out)
}

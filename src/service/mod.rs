//! Service layer for codec operations.
//!
//! Handlers (REST and CLI) translate their input into request DTOs and call
//! into `CodecService`, which fills in configured defaults, runs the codec and
//! keeps operation counters.
//!
//! ```text
//! REST API ─┐
//!           ├──> CodecService ──> SpatialCodec (N2 / N3)
//! CLI      ─┘
//! ```

use crate::codec::{
    build_codec, decode_frames, encode_frames, CodecError, Dimension, Payload, Point,
    SpatialCodec,
};
use crate::config::CodecConfig;
use crate::render::{render_svg, svg_document, RenderOptions};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

// ========== Error Types ==========

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// The request is well-formed JSON but does not describe an operation
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Convenient Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

// ========== Request/Response DTOs ==========

/// Encode a payload. Exactly one of `hex` or `text` must be set.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct EncodeRequest {
    #[serde(default)]
    pub dimension: Option<Dimension>,
    #[serde(default)]
    pub block_size: Option<usize>,
    #[serde(default)]
    pub frames: Option<usize>,
    /// Hex string or `0b`-prefixed bit array
    #[serde(default)]
    pub hex: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodeResult {
    pub dimension: Dimension,
    pub block_size: usize,
    pub payload_hex: String,
    pub byte_len: usize,
    pub frames: Vec<Vec<Point>>,
    pub point_count: usize,
    pub truncated: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DecodeRequest {
    #[serde(default)]
    pub dimension: Option<Dimension>,
    #[serde(default)]
    pub block_size: Option<usize>,
    pub frames: Vec<Vec<Point>>,
    /// Output length; defaults to the bytes spanned by every frame
    #[serde(default)]
    pub byte_len: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeResult {
    pub hex: String,
    /// The decoded bytes as UTF-8, when they are valid UTF-8
    pub text: Option<String>,
    pub byte_len: usize,
}

/// Plot a block. `points` wins over a payload; with neither only the curve is drawn.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RenderRequest {
    #[serde(default)]
    pub dimension: Option<Dimension>,
    #[serde(default)]
    pub block_size: Option<usize>,
    #[serde(default)]
    pub hex: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub points: Option<Vec<Point>>,
}

/// Operation counters since the service was created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecMetrics {
    pub encodes: u64,
    pub decodes: u64,
    pub renders: u64,
    pub failures: u64,
}

#[derive(Debug, Default)]
struct Counters {
    encodes: AtomicU64,
    decodes: AtomicU64,
    renders: AtomicU64,
    failures: AtomicU64,
}

// ========== Service Implementation ==========

/// Codec service shared by every front end. Cheap to clone.
#[derive(Debug, Clone)]
pub struct CodecService {
    defaults: Arc<CodecConfig>,
    render: RenderOptions,
    counters: Arc<Counters>,
}

impl CodecService {
    pub fn new(defaults: CodecConfig, render: RenderOptions) -> Self {
        Self {
            defaults: Arc::new(defaults),
            render,
            counters: Arc::new(Counters::default()),
        }
    }

    pub fn defaults(&self) -> &CodecConfig {
        &self.defaults
    }

    /// Encode a payload into one or more frames.
    pub fn encode(&self, req: EncodeRequest) -> ServiceResult<EncodeResult> {
        let result = self.do_encode(req);
        self.record(&self.counters.encodes, &result);
        result
    }

    fn do_encode(&self, req: EncodeRequest) -> ServiceResult<EncodeResult> {
        let codec = self.codec_for(req.dimension, req.block_size)?;
        let payload = Self::payload(req.hex.as_deref(), req.text.as_deref())?.ok_or_else(|| {
            ServiceError::InvalidRequest("provide one of 'hex' or 'text'".to_string())
        })?;
        let set = encode_frames(codec.as_ref(), &payload, req.frames)?;

        Ok(EncodeResult {
            dimension: codec.dimension(),
            block_size: codec.block_size(),
            payload_hex: payload.to_hex(),
            byte_len: payload.as_bytes().len(),
            point_count: set.point_count(),
            truncated: set.truncated,
            frames: set.frames,
        })
    }

    /// Reassemble bytes from encoded frames.
    pub fn decode(&self, req: DecodeRequest) -> ServiceResult<DecodeResult> {
        let result = self.do_decode(req);
        self.record(&self.counters.decodes, &result);
        result
    }

    fn do_decode(&self, req: DecodeRequest) -> ServiceResult<DecodeResult> {
        let codec = self.codec_for(req.dimension, req.block_size)?;
        let bytes = decode_frames(codec.as_ref(), &req.frames, req.byte_len)?;
        let text = String::from_utf8(bytes.clone()).ok();

        Ok(DecodeResult {
            hex: hex::encode(&bytes),
            text,
            byte_len: bytes.len(),
        })
    }

    /// Render one block as a standalone SVG document.
    pub fn render(&self, req: RenderRequest) -> ServiceResult<String> {
        let result = self.do_render(req);
        self.record(&self.counters.renders, &result);
        result
    }

    fn do_render(&self, req: RenderRequest) -> ServiceResult<String> {
        let codec = self.codec_for(req.dimension, req.block_size)?;
        let stream = match (req.points, Self::payload(req.hex.as_deref(), req.text.as_deref())?) {
            (Some(points), _) => {
                // reject points that are not on this block's curve
                for point in &points {
                    codec.decode(point)?;
                }
                points
            }
            (None, Some(payload)) => codec.stream_encode(payload.as_bytes()),
            (None, None) => Vec::new(),
        };
        Ok(svg_document(&render_svg(
            codec.as_ref(),
            &stream,
            &self.render,
        )))
    }

    pub fn metrics(&self) -> CodecMetrics {
        CodecMetrics {
            encodes: self.counters.encodes.load(Ordering::Relaxed),
            decodes: self.counters.decodes.load(Ordering::Relaxed),
            renders: self.counters.renders.load(Ordering::Relaxed),
            failures: self.counters.failures.load(Ordering::Relaxed),
        }
    }

    /// Build the codec for a request, falling back to configured defaults.
    ///
    /// A dimension other than the configured one falls back to that
    /// dimension's own default block size.
    pub fn codec_for(
        &self,
        dimension: Option<Dimension>,
        block_size: Option<usize>,
    ) -> ServiceResult<Box<dyn SpatialCodec>> {
        let dimension = dimension.unwrap_or(self.defaults.default_dimension);
        let block_size = block_size.unwrap_or(if dimension == self.defaults.default_dimension {
            self.defaults.default_block_size
        } else {
            default_block_size(dimension)
        });
        debug!(%dimension, block_size, "building codec");
        Ok(build_codec(
            dimension,
            block_size,
            self.defaults.max_block_size,
        )?)
    }

    fn payload(hex: Option<&str>, text: Option<&str>) -> ServiceResult<Option<Payload>> {
        match (hex, text) {
            (Some(_), Some(_)) => Err(ServiceError::InvalidRequest(
                "'hex' and 'text' are mutually exclusive".to_string(),
            )),
            (Some(hex), None) => Ok(Some(Payload::parse(hex)?)),
            (None, Some(text)) => Ok(Some(Payload::from_text(text))),
            (None, None) => Ok(None),
        }
    }

    fn record<T>(&self, counter: &AtomicU64, result: &ServiceResult<T>) {
        match result {
            Ok(_) => {
                counter.fetch_add(1, Ordering::Relaxed);
            }
            Err(e) => {
                warn!(error = %e, "codec operation failed");
                self.counters.failures.fetch_add(1, Ordering::Relaxed);
            }
        }
    }
}

/// Block size used when a request names a dimension but no size.
pub fn default_block_size(dimension: Dimension) -> usize {
    match dimension {
        Dimension::Two => 64,
        Dimension::Three => crate::codec::n3::BASE_BLOCK_SIZE,
    }
}

// ========== Tests ==========

//! Spatial Codec Library
//!
//! Encodes blocks of data as coordinates on Hilbert space-filling curves and
//! serves the control panel components used to drive it.
//!
//! # Modules
//!
//! - `codec`: N2/N3 Hilbert curve codecs, payload parsing and framing
//! - `components`: TextPanel and ControlInputForm render trees
//! - `render`: SVG visualizer for encoded blocks
//! - `service`: Business logic layer shared by the HTTP and CLI front ends
//! - `config`: Configuration management with TOML support
//! - `error`: Unified error handling
//! - `logging`: Tracing subscriber setup
//! - `rest_api`: HTTP handlers (when `rest-api` feature is enabled)

pub mod codec;
pub mod components;
pub mod config;
pub mod error;
pub mod logging;
pub mod render;
pub mod service;

#[cfg(feature = "rest-api")]
pub mod rest_api;

// Re-export commonly used types for convenience
pub use codec::{build_codec, CodecError, CodecResult, Dimension, Payload, Point, SpatialCodec};
pub use components::{ControlInputForm, Node, TextPanel};
pub use error::{AppError, AppResult};
pub use service::{
    CodecMetrics, CodecService, DecodeRequest, DecodeResult, EncodeRequest, EncodeResult,
    RenderRequest, ServiceError, ServiceResult,
};

// Re-export config types
pub use config::{Config, ConfigError, ConfigLoader, ConfigResult};

#[cfg(feature = "rest-api")]
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
#[cfg(feature = "rest-api")]
use serde_json::json;
use thiserror::Error;

use crate::codec::CodecError;
use crate::config::ConfigError;
use crate::service::ServiceError;

/// A specialized `Result` type for application entry points and handlers.
pub type AppResult<T> = Result<T, AppError>;

/// Unified application error type.
///
/// Lower layers keep their own error enums; this type is what the HTTP
/// handlers and the binary surface to the outside world.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("The request payload is invalid: {0}")]
    InvalidPayload(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("An I/O error occurred: {0}")]
    Io(#[from] std::io::Error),

    #[error("A serialization/deserialization error occurred: {0}")]
    Serde(#[from] serde_json::Error),
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Codec(e) => Self::Codec(e),
            ServiceError::InvalidRequest(msg) => Self::InvalidPayload(msg),
        }
    }
}

impl AppError {
    /// Stable machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Codec(CodecError::UnsupportedDimension(_)) => "UnsupportedDimension",
            Self::Codec(CodecError::InvalidBlockSize { .. }) => "InvalidBlockSize",
            Self::Codec(CodecError::OutOfBounds { .. }) => "OutOfBounds",
            Self::Codec(CodecError::IndexOutOfRange { .. }) => "IndexOutOfRange",
            Self::Codec(CodecError::DimensionMismatch { .. }) => "DimensionMismatch",
            Self::Codec(CodecError::InvalidPayload(_)) => "InvalidPayload",
            Self::Codec(CodecError::PayloadOverflow { .. }) => "PayloadOverflow",
            Self::Codec(CodecError::InvalidFrameCount(_)) => "InvalidFrameCount",
            Self::Codec(CodecError::InvalidByteLength { .. }) => "InvalidByteLength",
            Self::InvalidPayload(_) => "InvalidRequest",
            Self::Config(_) => "ConfigError",
            Self::Io(_) => "IoError",
            Self::Serde(_) => "DeserializationError",
        }
    }

    #[cfg(feature = "rest-api")]
    fn status(&self) -> StatusCode {
        match self {
            Self::Codec(_) | Self::InvalidPayload(_) | Self::Serde(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            Self::Config(_) | Self::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Allows Axum to convert `AppError` into an HTTP response.
#[cfg(feature = "rest-api")]
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = axum::Json(json!({
            "status": "error",
            "error": { "type": self.kind(), "message": self.to_string() }
        }));
        (self.status(), body).into_response()
    }
}

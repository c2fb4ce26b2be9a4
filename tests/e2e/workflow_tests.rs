//! Workflow tests: a payload goes through encode, render and decode the way
//! the CLI and the HTTP handlers chain the service calls.

use crate::common::default_service;
use pretty_assertions::assert_eq;
use scodec::codec::{Dimension, Point};
use scodec::config::CodecConfig;
use scodec::render::RenderOptions;
use scodec::service::{CodecService, DecodeRequest, EncodeRequest, RenderRequest, ServiceError};
use scodec::CodecError;

fn round_trip(service: &CodecService, req: EncodeRequest) -> (Vec<Vec<Point>>, Vec<u8>) {
    let encoded = service.encode(req).expect("encode failed");
    let decoded = service
        .decode(DecodeRequest {
            dimension: Some(encoded.dimension),
            block_size: Some(encoded.block_size),
            frames: encoded.frames.clone(),
            byte_len: Some(encoded.byte_len),
        })
        .expect("decode failed");
    (
        encoded.frames,
        hex::decode(decoded.hex).expect("service returned invalid hex"),
    )
}

#[test]
fn test_text_round_trip_on_default_codec() {
    let service = default_service();
    let (frames, bytes) = round_trip(
        &service,
        EncodeRequest {
            text: Some("Spatial codec!".to_string()),
            ..Default::default()
        },
    );
    // 14 bytes over 64-bit blocks
    assert_eq!(frames.len(), 2);
    assert_eq!(bytes, b"Spatial codec!".to_vec());
}

#[test]
fn test_hex_round_trip_on_n3() {
    let service = default_service();
    let (frames, bytes) = round_trip(
        &service,
        EncodeRequest {
            dimension: Some(Dimension::Three),
            hex: Some("0xDEAD_BEEF".to_string()),
            ..Default::default()
        },
    );
    assert_eq!(frames.len(), 4);
    assert!(frames.iter().flatten().all(|p| matches!(p, Point::N3(..))));
    assert_eq!(bytes, vec![0xde, 0xad, 0xbe, 0xef]);
}

#[test]
fn test_truncated_encode_reports_and_loses_high_bits() {
    let service = default_service();
    let encoded = service
        .encode(EncodeRequest {
            block_size: Some(4),
            frames: Some(1),
            hex: Some("f3".to_string()),
            ..Default::default()
        })
        .unwrap();
    assert!(encoded.truncated);

    let decoded = service
        .decode(DecodeRequest {
            block_size: Some(4),
            frames: encoded.frames,
            byte_len: Some(1),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(decoded.hex, "03");
}

#[test]
fn test_render_then_decode_same_points() {
    let service = default_service();
    let stream = vec![Point::N2(0, 0), Point::N2(3, 0)];
    let svg = service
        .render(RenderRequest {
            block_size: Some(16),
            points: Some(stream.clone()),
            ..Default::default()
        })
        .unwrap();
    assert!(svg.starts_with("<?xml"));
    assert_eq!(svg.matches("<circle").count(), 2);

    let decoded = service
        .decode(DecodeRequest {
            block_size: Some(16),
            frames: vec![stream],
            ..Default::default()
        })
        .unwrap();
    // cells 0 and 15 of the 4x4 curve
    assert_eq!(decoded.hex, "8001");
}

#[test]
fn test_configured_defaults_apply() {
    let service = CodecService::new(
        CodecConfig {
            default_dimension: Dimension::Three,
            default_block_size: 8,
            max_block_size: 4096,
        },
        RenderOptions::default(),
    );
    let encoded = service
        .encode(EncodeRequest {
            text: Some("A".to_string()),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(encoded.dimension, Dimension::Three);
    assert_eq!(encoded.block_size, 8);
    assert_eq!(encoded.point_count, 2);
}

#[test]
fn test_failures_are_counted_separately() {
    let service = default_service();
    let err = service
        .decode(DecodeRequest {
            block_size: Some(16),
            frames: vec![vec![Point::N2(9, 9)]],
            ..Default::default()
        })
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Codec(CodecError::OutOfBounds { .. })
    ));

    let err = service.encode(EncodeRequest::default()).unwrap_err();
    assert!(matches!(err, ServiceError::InvalidRequest(_)));

    let metrics = service.metrics();
    assert_eq!(metrics.failures, 2);
    assert_eq!(metrics.encodes + metrics.decodes + metrics.renders, 0);
}

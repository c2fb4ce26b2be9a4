//! End-to-end tests for scodec.
//!
//! Workflow tests drive the codec service the way the front ends do. HTTP
//! tests start a real server on an ephemeral port.

pub mod workflow_tests;

#[cfg(feature = "rest-api")]
pub mod http_tests;

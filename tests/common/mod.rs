//! Shared test utilities for scodec integration tests.
//!
//! - Service construction with default or custom codec settings
//! - A test server bound to an ephemeral port
//! - JSON assertion helpers

#![allow(dead_code)]

use scodec::config::{CodecConfig, UiConfig};
use scodec::render::RenderOptions;
use scodec::service::CodecService;
use serde_json::Value;

/// Service with the built-in defaults (N2, 64-bit blocks).
pub fn default_service() -> CodecService {
    CodecService::new(CodecConfig::default(), RenderOptions::default())
}

/// UI settings with a recognisable display text.
pub fn test_ui() -> UiConfig {
    UiConfig {
        title: "scodec test".to_string(),
        display_text: "integration <panel>".to_string(),
    }
}

/// Assert that a JSON value contains specific fields with expected values.
///
/// # Example
/// ```ignore
/// let actual = json!({"status": "error", "error": {"type": "X", "message": "m"}});
/// assert_json_contains(&actual, &json!({"error": {"type": "X"}}));
/// ```
pub fn assert_json_contains(actual: &Value, expected: &Value) {
    match (actual, expected) {
        (Value::Object(actual_map), Value::Object(expected_map)) => {
            for (key, expected_value) in expected_map {
                let actual_value = actual_map
                    .get(key)
                    .unwrap_or_else(|| panic!("Expected key '{}' not found in {}", key, actual));
                assert_json_contains(actual_value, expected_value);
            }
        }
        _ => assert_eq!(actual, expected, "JSON values differ"),
    }
}

#[cfg(feature = "rest-api")]
pub mod server {
    use super::*;
    use scodec::rest_api::{build_router, RestContext};
    use std::time::Duration;
    use tokio::net::TcpListener;

    /// A running server and the service behind it.
    pub struct TestServer {
        pub base_url: String,
        pub service: CodecService,
    }

    impl TestServer {
        pub fn url(&self, path: &str) -> String {
            format!("{}{}", self.base_url, path)
        }
    }

    /// Start a server on 127.0.0.1 with an OS-assigned port.
    pub async fn start() -> TestServer {
        let service = default_service();
        let app = build_router(RestContext::new(service.clone(), test_ui()));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to get address");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server failed");
        });

        // Give server time to start
        tokio::time::sleep(Duration::from_millis(50)).await;

        TestServer {
            base_url: format!("http://{}", addr),
            service,
        }
    }
}

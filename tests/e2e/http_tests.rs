//! HTTP tests: the served page, the component endpoints and the codec JSON API.

use crate::common::{assert_json_contains, server};
use reqwest::StatusCode;
use scodec::service::CodecMetrics;
use serde_json::{json, Value};

#[tokio::test]
async fn test_health() {
    let srv = server::start().await;
    let body = reqwest::get(srv.url("/health")).await.unwrap().text().await.unwrap();
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn test_index_serves_both_components() {
    let srv = server::start().await;
    let resp = reqwest::get(srv.url("/")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("text/html"));

    let html = resp.text().await.unwrap();
    assert!(html.contains("<title>scodec test</title>"));
    assert!(html.contains("<h3>First Component</h3>integration &lt;panel&gt;"));
    assert_eq!(html.matches("<input type=\"text\"").count(), 3);
    assert_eq!(html.matches("<button").count(), 1);
}

#[tokio::test]
async fn test_form_activation_has_no_effect() {
    let srv = server::start().await;
    let client = reqwest::Client::new();
    let before = srv.service.metrics();

    // a browser submitting the form would post to the page itself
    let resp = client
        .post(srv.url("/"))
        .header("content-type", "application/x-www-form-urlencoded")
        .body("dimensions=2&frames=1&bitarray=ff")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);

    let metrics: CodecMetrics = client
        .get(srv.url("/codec/metrics"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(metrics, before);
    assert_eq!(metrics, CodecMetrics::default());
}

#[tokio::test]
async fn test_text_panel_endpoint_formats() {
    let srv = server::start().await;
    let client = reqwest::Client::new();

    let html = client
        .get(srv.url("/components/text-panel?text=a%20%26%20b"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(
        html,
        r#"<div class="comptext"><h3>First Component</h3>a &amp; b<div>Text from Element</div></div>"#
    );

    let tree: Value = client
        .get(srv.url("/components/text-panel?text=a%20%26%20b&format=json"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(tree["children"][1]["value"], "a & b");
}

#[tokio::test]
async fn test_control_form_endpoint_is_stable() {
    let srv = server::start().await;
    let first = reqwest::get(srv.url("/components/control-form"))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    let second = reqwest::get(srv.url("/components/control-form"))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(first, second);
    assert!(first.contains("<label for=\"bitarray\">Hex code</label>"));
}

#[tokio::test]
async fn test_encode_decode_over_http() {
    let srv = server::start().await;
    let client = reqwest::Client::new();

    let encoded: Value = client
        .post(srv.url("/codec/encode"))
        .json(&json!({"dimension": 3, "text": "hi"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_json_contains(
        &encoded,
        &json!({"dimension": 3, "block_size": 8, "payload_hex": "6869", "truncated": false}),
    );
    assert_eq!(encoded["frames"].as_array().unwrap().len(), 2);

    let decoded: Value = client
        .post(srv.url("/codec/decode"))
        .json(&json!({
            "dimension": 3,
            "frames": encoded["frames"],
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_json_contains(&decoded, &json!({"hex": "6869", "text": "hi", "byte_len": 2}));

    let metrics = srv.service.metrics();
    assert_eq!(metrics.encodes, 1);
    assert_eq!(metrics.decodes, 1);
}

#[tokio::test]
async fn test_codec_errors_are_json() {
    let srv = server::start().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(srv.url("/codec/encode"))
        .json(&json!({"block_size": 12, "hex": "ff"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = resp.json().await.unwrap();
    assert_json_contains(
        &body,
        &json!({"status": "error", "error": {"type": "InvalidBlockSize"}}),
    );

    let resp = client
        .post(srv.url("/codec/decode"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = resp.json().await.unwrap();
    assert_json_contains(&body, &json!({"error": {"type": "InvalidRequest"}}));
}

#[tokio::test]
async fn test_render_returns_svg() {
    let srv = server::start().await;
    let resp = reqwest::Client::new()
        .post(srv.url("/codec/render"))
        .json(&json!({"dimension": 2, "block_size": 16, "hex": "0x8001"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get("content-type").unwrap(),
        "image/svg+xml"
    );
    let svg = resp.text().await.unwrap();
    assert!(svg.contains("<polyline"));
    assert_eq!(svg.matches("<circle").count(), 2);
}

#[tokio::test]
async fn test_oversized_counts_are_rejected() {
    let srv = server::start().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(srv.url("/codec/encode"))
        .header("content-type", "application/json")
        .body(r#"{"text":"a","frames":18446744073709551615}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = resp.json().await.unwrap();
    assert_json_contains(&body, &json!({"error": {"type": "InvalidFrameCount"}}));

    let resp = client
        .post(srv.url("/codec/decode"))
        .header("content-type", "application/json")
        .body(r#"{"frames":[],"byte_len":18446744073709551615}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = resp.json().await.unwrap();
    assert_json_contains(&body, &json!({"error": {"type": "InvalidByteLength"}}));

    // the server is still up and counted both failures
    assert_eq!(srv.service.metrics().failures, 2);
}

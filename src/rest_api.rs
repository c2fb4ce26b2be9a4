#![allow(clippy::missing_errors_doc)]
//! HTTP front end: serves the control page, the individual components and a
//! JSON surface over the codec service.
//!
//! The control form on `/` is inert: the page has no POST route, so
//! activating the form never reaches the codec.

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::header,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    components::{control_page, ControlInputForm, Node, TextPanel},
    config::UiConfig,
    error::{AppError, AppResult},
    service::{
        CodecMetrics, CodecService, DecodeRequest, DecodeResult, EncodeRequest, EncodeResult,
        RenderRequest,
    },
};

#[derive(Clone)]
pub struct RestContext {
    pub service: CodecService,
    pub ui: Arc<UiConfig>,
}

impl RestContext {
    pub fn new(service: CodecService, ui: UiConfig) -> Self {
        Self {
            service,
            ui: Arc::new(ui),
        }
    }
}

// ---------- Query DTOs ----------
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentFormat {
    #[default]
    Html,
    Json,
}

#[derive(Debug, Default, Deserialize)]
pub struct TextPanelParams {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub format: ComponentFormat,
}

#[derive(Debug, Default, Deserialize)]
pub struct FormatParams {
    #[serde(default)]
    pub format: ComponentFormat,
}

// ---------- Router Builder ----------
pub fn build_router(ctx: RestContext) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/components/text-panel", get(text_panel))
        .route("/components/control-form", get(control_form))
        .route("/codec/encode", post(encode))
        .route("/codec/decode", post(decode))
        .route("/codec/render", post(render))
        .route("/codec/metrics", get(metrics))
        .with_state(ctx)
}

// ---------- Handlers ----------
async fn health() -> &'static str {
    "ok"
}

async fn index(State(ctx): State<RestContext>) -> Html<String> {
    Html(control_page(&ctx.ui.title, &ctx.ui.display_text))
}

fn component_response(node: Node, format: ComponentFormat) -> Response {
    match format {
        ComponentFormat::Html => Html(node.to_html()).into_response(),
        ComponentFormat::Json => Json(node).into_response(),
    }
}

async fn text_panel(Query(params): Query<TextPanelParams>) -> Response {
    component_response(TextPanel::new(params.text).render(), params.format)
}

async fn control_form(Query(params): Query<FormatParams>) -> Response {
    component_response(ControlInputForm::new().render(), params.format)
}

fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    body.map(|Json(value)| value)
        .map_err(|rejection| AppError::InvalidPayload(rejection.body_text()))
}

async fn encode(
    State(ctx): State<RestContext>,
    body: Result<Json<EncodeRequest>, JsonRejection>,
) -> AppResult<Json<EncodeResult>> {
    let req = json_body(body)?;
    Ok(Json(ctx.service.encode(req)?))
}

async fn decode(
    State(ctx): State<RestContext>,
    body: Result<Json<DecodeRequest>, JsonRejection>,
) -> AppResult<Json<DecodeResult>> {
    let req = json_body(body)?;
    Ok(Json(ctx.service.decode(req)?))
}

async fn render(
    State(ctx): State<RestContext>,
    body: Result<Json<RenderRequest>, JsonRejection>,
) -> AppResult<Response> {
    let req = json_body(body)?;
    let svg = ctx.service.render(req)?;
    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg).into_response())
}

async fn metrics(State(ctx): State<RestContext>) -> Json<CodecMetrics> {
    Json(ctx.service.metrics())
}

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use briefly::image2text::OcrEngine;
use briefly::process::{extract_image_text, process_text, summarize_extracted, PipelineError, SummaryReport};
use briefly::summarize::{Summarizer, SummaryLength};
use briefly::upload::{decode_base64_payload, image_from_bytes};
use serde::{Deserialize, Serialize};
use tower_http::limit::RequestBodyLimitLayer;

pub const DEFAULT_BODY_LIMIT: usize = 10 * 1024 * 1024;

#[derive(Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: String,
    pub data: Option<T>,
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: "success".to_string(),
            data: Some(data),
            message: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            data: None,
            message: Some(message.into()),
        }
    }
}

pub struct AppState<O, S> {
    pub ocr: O,
    pub summarizer: S,
}

impl<O, S> AppState<O, S> {
    pub fn new(ocr: O, summarizer: S) -> Self {
        Self { ocr, summarizer }
    }
}

#[derive(Deserialize)]
pub struct TextRequest {
    pub text: String,
    pub length: Option<String>,
}

#[derive(Deserialize)]
pub struct ImageRequest {
    /// Base64 PNG/JPEG, optionally as a `data:` URL.
    pub image: String,
    pub length: Option<String>,
}

type ReportResponse = (StatusCode, Json<ApiResponse<SummaryReport>>);

pub fn router<O, S>(state: AppState<O, S>, body_limit: usize) -> Router
where
    O: OcrEngine + 'static,
    S: Summarizer + 'static,
{
    Router::new()
        .route("/ping", get(|| async { "pong" }))
        .route("/health", get(|| async { "healthy" }))
        .route("/summarize/text", post(handle_text::<O, S>))
        .route("/summarize/image", post(handle_image::<O, S>))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(body_limit))
        .with_state(Arc::new(state))
}

fn length_from(label: Option<&str>) -> SummaryLength {
    label.map(SummaryLength::from).unwrap_or_default()
}

fn report_ok(report: SummaryReport) -> ReportResponse {
    (StatusCode::OK, Json(ApiResponse::success(report)))
}

fn bad_request(message: impl Into<String>) -> ReportResponse {
    let message = message.into();
    log::warn!("Rejected request: {}", message);
    (StatusCode::BAD_REQUEST, Json(ApiResponse::error(message)))
}

fn rejected(rejection: JsonRejection) -> ReportResponse {
    // oversized bodies keep their 413
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        let message = rejection.body_text();
        log::warn!("Rejected request: {}", message);
        return (StatusCode::PAYLOAD_TOO_LARGE, Json(ApiResponse::error(message)));
    }
    bad_request(rejection.body_text())
}

fn report_err(err: anyhow::Error) -> ReportResponse {
    if err.downcast_ref::<PipelineError>().is_some() {
        return bad_request(err.to_string());
    }
    log::error!("Summarization failed: {:#}", err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiResponse::error(format!("{:#}", err))),
    )
}

async fn handle_text<O, S>(
    State(state): State<Arc<AppState<O, S>>>,
    payload: Result<Json<TextRequest>, JsonRejection>,
) -> ReportResponse
where
    O: OcrEngine + 'static,
    S: Summarizer + 'static,
{
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejected(rejection),
    };
    let length = length_from(payload.length.as_deref());
    log::info!("Summarizing {} bytes of text ({})", payload.text.len(), length);

    match process_text(&state.summarizer, &payload.text, length).await {
        Ok(report) => report_ok(report),
        Err(err) => report_err(err),
    }
}

async fn handle_image<O, S>(
    State(state): State<Arc<AppState<O, S>>>,
    payload: Result<Json<ImageRequest>, JsonRejection>,
) -> ReportResponse
where
    O: OcrEngine + 'static,
    S: Summarizer + 'static,
{
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejected(rejection),
    };
    let length = length_from(payload.length.as_deref());

    let bytes = match decode_base64_payload(&payload.image) {
        Ok(bytes) => bytes,
        Err(err) => return bad_request(err.to_string()),
    };
    log::info!("Successfully decoded {} bytes of image data ({})", bytes.len(), length);

    let image = match image_from_bytes(&bytes) {
        Ok(image) => image,
        Err(err) => return bad_request(err.to_string()),
    };

    // OCR engines block, keep them off the async workers
    let ocr_state = state.clone();
    let extracted = match tokio::task::spawn_blocking(move || extract_image_text(&ocr_state.ocr, &image)).await {
        Ok(Ok(text)) => text,
        Ok(Err(err)) => return report_err(err),
        Err(err) => return report_err(anyhow::anyhow!("OCR task failed: {}", err)),
    };

    match summarize_extracted(&state.summarizer, extracted, length).await {
        Ok(report) => report_ok(report),
        Err(err) => report_err(err),
    }
}

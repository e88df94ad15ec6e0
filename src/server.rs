use crate::config::Config;
use crate::engine::OcrEngine;
use crate::engines;
use crate::error::OcrError;
use crate::extract::{self, ExtractedRecord};
use crate::preprocessing::Pipeline;
use axum::{
    body::Bytes,
    extract::{
        multipart::{Field, MultipartError},
        DefaultBodyLimit, Multipart, State,
    },
    http::{HeaderValue, Method, StatusCode},
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Room for multipart boundaries and part headers on top of the two images
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Image formats decoded before preprocessing
const SUPPORTED_FORMATS: &[&str] = &[
    "image/png",
    "image/jpeg",
    "image/gif",
    "image/bmp",
    "image/webp",
    "image/tiff",
];

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<dyn OcrEngine>,
    pub pipeline: Pipeline,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(engine: Arc<dyn OcrEngine>, config: Config) -> Self {
        Self {
            engine,
            pipeline: Pipeline::new(config.preprocess),
            config: Arc::new(config),
        }
    }
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Server info response
#[derive(Serialize)]
pub struct InfoResponse {
    pub version: String,
    pub engine: String,
    pub engine_description: String,
    pub supported_formats: Vec<String>,
    pub supported_languages: Vec<String>,
    pub preprocess: String,
    pub max_file_size_bytes: usize,
}

/// Run the HTTP server
pub async fn run(config: Config) -> anyhow::Result<()> {
    let engine = engines::create(&config)?;
    let addr = format!("{}:{}", config.host, config.port);
    let state = AppState::new(engine, config);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, router(state)).await?;

    Ok(())
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    let body_limit = state.config.max_file_size * 2 + MULTIPART_OVERHEAD;
    let cors = cors_layer(&state.config.cors_origins);

    Router::new()
        .route("/api/ocr", post(handle_ocr))
        .route("/health", get(handle_health))
        .route("/info", get(handle_info))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Ignoring invalid CORS origin {:?}: {}", origin, e);
                None
            }
        })
        .collect();

    layer.allow_origin(origins)
}

/// Handle card OCR requests: multipart fields `front` and `back`
async fn handle_ocr(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ExtractedRecord>, OcrError> {
    let start = Instant::now();
    let max = state.config.max_file_size;

    let mut front: Option<Bytes> = None;
    let mut back: Option<Bytes> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| {
            if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                return OcrError::RequestTooLarge { max };
            }
            OcrError::InvalidRequest(format!("Failed to parse multipart: {}", e))
        })?
    {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            "front" => front = Some(read_image(field, "front", max).await?),
            "back" => back = Some(read_image(field, "back", max).await?),
            _ => {
                // Ignore unknown fields
            }
        }
    }

    let (front, back) = match (front, back) {
        (Some(front), Some(back)) => (front, back),
        _ => return Err(OcrError::MissingImage),
    };

    let (front_text, back_text) = futures::future::try_join(
        recognize_side(&state, "front", front),
        recognize_side(&state, "back", back),
    )
    .await?;

    let record = extract::extract(&front_text, &back_text);

    tracing::info!(
        "Extracted card fields in {}ms: {:?}",
        start.elapsed().as_millis(),
        record
    );

    Ok(Json(record))
}

/// Read one image field, stopping as soon as it grows past `max` bytes
async fn read_image(
    mut field: Field<'_>,
    side: &'static str,
    max: usize,
) -> Result<Bytes, OcrError> {
    if let Some(mime) = field.content_type() {
        if !SUPPORTED_FORMATS.contains(&mime) {
            tracing::warn!("Received {} image with content type: {}", side, mime);
        }
    }

    let mut data = Vec::new();
    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|e| field_error(e, side, max))?
    {
        if data.len() + chunk.len() > max {
            return Err(OcrError::ImageTooLarge { side, max });
        }
        data.extend_from_slice(&chunk);
    }

    Ok(Bytes::from(data))
}

fn field_error(err: MultipartError, side: &'static str, max: usize) -> OcrError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return OcrError::ImageTooLarge { side, max };
    }
    OcrError::InvalidRequest(format!("Failed to read {} image: {}", side, err))
}

/// Decode, preprocess and recognize one card side on the blocking pool
async fn recognize_side(
    state: &AppState,
    side: &'static str,
    data: Bytes,
) -> Result<String, OcrError> {
    let engine = Arc::clone(&state.engine);
    let pipeline = state.pipeline;

    tokio::task::spawn_blocking(move || -> Result<String, OcrError> {
        let image = image::load_from_memory(&data).map_err(|e| OcrError::InvalidImage {
            side,
            reason: e.to_string(),
        })?;

        let prepared = pipeline.process(image)?;
        tracing::debug!(
            "Preprocessed {} image with preset '{}' in {}ms",
            side,
            prepared.preset,
            prepared.total_time_ms
        );

        let result = engine.recognize(&prepared.image)?;
        tracing::debug!(
            "Recognized {} chars on {} side (confidence: {:?})",
            result.text.len(),
            side,
            result.confidence
        );

        Ok(result.text)
    })
    .await
    .map_err(|e| OcrError::Internal(format!("OCR task for {} image failed: {}", side, e)))?
}

/// Handle health check requests
async fn handle_health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Handle info requests
async fn handle_info(State(state): State<AppState>) -> impl IntoResponse {
    Json(InfoResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
        engine: state.engine.name().to_string(),
        engine_description: state.engine.description().to_string(),
        supported_formats: SUPPORTED_FORMATS.iter().map(|f| f.to_string()).collect(),
        supported_languages: state.engine.supported_languages(),
        preprocess: state.pipeline.preset().to_string(),
        max_file_size_bytes: state.config.max_file_size,
    })
}

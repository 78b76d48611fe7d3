// File: src/server.rs
//! HTTP surface: health check plus word and sentence translation.

use crate::core::translator::Translator;
use crate::core::types::Direction;
use crate::error::ApiError;
use axum::{
    body::Bytes,
    extract::State,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;
use std::any::Any;
use std::future::Future;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tracing::{debug, error, info};

#[derive(Clone)]
pub struct AppState {
    pub translator: Arc<Translator>,
}

impl AppState {
    pub fn new(translator: Translator) -> Self {
        Self {
            translator: Arc::new(translator),
        }
    }
}

/// A validated translation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslateRequest {
    /// Trimmed, never empty.
    pub text: String,
    pub direction: Direction,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct TranslationResponse {
    pub text: String,
    pub primary_translation: String,
    pub alternative_translations: Vec<String>,
    pub direction: Direction,
}

/// Validates a raw JSON body: `{"text": string, "to_bangla": bool?}`.
pub fn parse_request(body: &[u8]) -> Result<TranslateRequest, ApiError> {
    let missing_text = || ApiError::Validation("Missing required field: text".to_string());

    let value: Value = serde_json::from_slice(body).map_err(|_| missing_text())?;
    let object = value.as_object().ok_or_else(missing_text)?;

    let text = match object.get("text") {
        None => return Err(missing_text()),
        Some(Value::String(text)) => text.trim(),
        Some(_) => {
            return Err(ApiError::Validation(
                "Field 'text' must be a string".to_string(),
            ))
        }
    };
    if text.is_empty() {
        return Err(ApiError::Validation("Empty text provided".to_string()));
    }

    // An explicit null is falsy, as in the published service.
    let to_bangla = match object.get("to_bangla") {
        None => true,
        Some(Value::Null) => false,
        Some(Value::Bool(flag)) => *flag,
        Some(_) => {
            return Err(ApiError::Validation(
                "Field 'to_bangla' must be a boolean".to_string(),
            ))
        }
    };

    Ok(TranslateRequest {
        text: text.to_string(),
        direction: Direction::from_to_bangla(to_bangla),
    })
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods(AnyOrigin)
        .allow_headers(AnyOrigin);

    Router::new()
        .route("/health", get(health_check))
        .route("/translate/word", post(translate_word))
        .route("/translate/sentence", post(translate_sentence))
        .layer(cors)
        .with_state(state)
}

/// Serves until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        info!("Translation service listening on http://{}", addr);
    }
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        message: "Translation service is running",
    })
}

async fn translate_word(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let request = parse_request(&body)?;
    debug!("word request '{}' ({})", request.text, request.direction);

    let translations = guarded(|| {
        state
            .translator
            .translate_word(&request.text, request.direction)
    })?;

    let mut translations = translations.into_iter();
    let primary_translation = translations.next().unwrap_or_default();
    Ok(Json(TranslationResponse {
        text: request.text,
        primary_translation,
        alternative_translations: translations.collect(),
        direction: request.direction,
    }))
}

async fn translate_sentence(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let request = parse_request(&body)?;
    debug!("sentence request '{}' ({})", request.text, request.direction);

    let result = guarded(|| {
        state
            .translator
            .translate_sentence(&request.text, request.direction)
    })?;

    Ok(Json(TranslationResponse {
        text: request.text,
        primary_translation: result.primary,
        alternative_translations: result.alternatives,
        direction: request.direction,
    }))
}

/// Runs a translation so that a panic fails only the current request.
fn guarded<T>(f: impl FnOnce() -> T) -> Result<T, ApiError> {
    catch_unwind(AssertUnwindSafe(f)).map_err(|payload| {
        let reason = panic_message(payload.as_ref());
        error!("Translation panicked: {}", reason);
        ApiError::Internal(format!("Translation failed: {}", reason))
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown error".to_string()
    }
}

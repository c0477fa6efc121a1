use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::{error, info};
use serde::{Deserialize, Serialize};

use super::AppState;

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    /// The text command to classify. Defaults to empty when absent so that a
    /// missing field and an empty one take the same rejection path.
    #[serde(default)]
    pub command: String,
}

// Wire field names are the contract the existing mobile client expects.
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    #[serde(rename = "intencion")]
    pub intent: String,
    #[serde(rename = "confianza")]
    pub confidence: f32,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// `POST /predict` — classify one text command.
///
/// The body is parsed from raw bytes rather than through the `Json`
/// extractor: a body that does not deserialize (malformed JSON, or a JSON
/// value that is not an object) is an internal error on this endpoint, not a
/// client error, and must not be short-circuited by the framework.
pub async fn predict(State(state): State<AppState>, body: Bytes) -> Response {
    let request: PredictRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            error!("Failed to parse request body: {}", e);
            return internal_error(e.to_string());
        }
    };

    if request.command.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "No text provided".to_string(),
            }),
        )
            .into_response();
    }

    match state.predictor.predict(&request.command) {
        Ok(prediction) => {
            info!(
                "Command: '{}' -> intent: {} ({:.2}%)",
                request.command,
                prediction.intent,
                prediction.confidence * 100.0
            );
            (
                StatusCode::OK,
                Json(PredictResponse {
                    intent: prediction.intent,
                    confidence: prediction.confidence,
                }),
            )
                .into_response()
        }
        Err(e) => {
            error!("Prediction failed for command '{}': {}", request.command, e);
            internal_error(e.to_string())
        }
    }
}

/// `GET /health`
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

fn internal_error(message: String) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse { error: message }),
    )
        .into_response()
}

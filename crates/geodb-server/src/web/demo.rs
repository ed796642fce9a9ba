//! Demo-data passthrough: serves a static JSON file as-is.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use tracing::error;

use super::AppState;

pub async fn files(State(state): State<AppState>) -> Response {
    let read = async {
        let data = tokio::fs::read_to_string(&state.demo_data).await?;
        let value: Value = serde_json::from_str(&data)?;
        Ok::<_, anyhow::Error>(value)
    };

    match read.await {
        Ok(value) => Json(value).into_response(),
        Err(e) => {
            error!(path = %state.demo_data.display(), "Error reading file: {e:#}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Failed to read file",
                    "message": e.to_string(),
                })),
            )
                .into_response()
        }
    }
}

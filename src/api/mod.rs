use std::sync::Arc;

use axum::{Router, extract::State, http::StatusCode, response::Json, routing::post};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::weather::AsosQuery;
use crate::web::AppState;

/// Body of `POST /api/v0`, identical for success and failure
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ItemsPayload {
    pub items: Value,
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/v0", post(post_weather))
}

async fn post_weather(
    State(state): State<Arc<AppState>>,
) -> Result<(StatusCode, Json<ItemsPayload>), (StatusCode, String)> {
    let response = state
        .asos
        .fetch_daily(&AsosQuery::default())
        .await
        .map_err(|e| {
            tracing::error!("ASOS request failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?;

    let payload = ItemsPayload {
        items: response.items(),
    };

    if response.is_success() {
        return Ok((StatusCode::OK, Json(payload)));
    }

    match response.result_code() {
        Some(code) => tracing::warn!(
            "ASOS reported result code {} ({})",
            code,
            response.result_message().unwrap_or("no message")
        ),
        None => tracing::warn!("ASOS response has no result header"),
    }
    Ok((StatusCode::INTERNAL_SERVER_ERROR, Json(payload)))
}

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;

use crate::client::SearchClient;
use crate::dashboard;
use crate::error::SearchError;

use super::models::{DashboardResponse, HealthResponse, SearchRequest};

pub async fn dashboard_handler(
    State(client): State<Arc<SearchClient>>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<DashboardResponse>, (StatusCode, String)> {
    let start = Instant::now();

    if request.query.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Query cannot be empty".to_string()));
    }

    let dashboard = dashboard::search_all(&client, &request.query).await;

    Ok(Json(DashboardResponse {
        query: dashboard.query,
        web: dashboard.web,
        images: dashboard.images,
        videos: dashboard.videos,
        processing_time_ms: start.elapsed().as_millis(),
    }))
}

/// Raw upstream body for a single mode.
pub async fn mode_search_handler(
    State(client): State<Arc<SearchClient>>,
    Path(mode): Path<String>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<Value>, (StatusCode, String)> {
    client
        .fetch_by_name(&request.query, &mode)
        .await
        .map(Json)
        .map_err(|e| (status_for(&e), e.to_string()))
}

pub async fn health_handler(State(client): State<Arc<SearchClient>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        cached_entries: client.cached_entries(),
    })
}

fn status_for(err: &SearchError) -> StatusCode {
    match err {
        SearchError::InvalidMode(_) | SearchError::EmptyQuery => StatusCode::BAD_REQUEST,
        SearchError::RequestFailed { .. } | SearchError::DecodeError(_) => StatusCode::BAD_GATEWAY,
    }
}

use serde::{Deserialize, Serialize};

use crate::dashboard::{ImagesPanel, VideosPanel, WebPanel};

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub query: String,
    pub web: WebPanel,
    pub images: ImagesPanel,
    pub videos: VideosPanel,
    pub processing_time_ms: u128,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub cached_entries: usize,
}

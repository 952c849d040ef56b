//! Panel view-models for the three dashboard tabs.
//!
//! Each mode's outcome is turned into a panel independently. A failed fetch
//! never fails the dashboard: the panel carries an informational message and
//! the error text instead, the same way for every mode.

use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::client::SearchClient;
use crate::data_models::{ImageItem, ImagesResult, VideoItem, VideosResult, WebResult, read_view};
use crate::error::SearchError;
use crate::mode::Mode;
use crate::video_id::{extract_youtube_id, thumbnail_url};

pub const NO_WEB_RESULTS: &str = "No web results.";
pub const NO_IMAGES: &str = "No images found.";
pub const NO_VIDEOS: &str = "No videos found.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelState {
    Ok,
    Empty,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Panel<T> {
    pub state: PanelState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(flatten)]
    pub content: T,
}

impl<T: Default> Panel<T> {
    fn ready(content: T) -> Self {
        Panel {
            state: PanelState::Ok,
            info: None,
            error: None,
            content,
        }
    }

    fn empty(info: &str) -> Self {
        Panel {
            state: PanelState::Empty,
            info: Some(info.to_string()),
            error: None,
            content: T::default(),
        }
    }

    fn failed(mode: Mode, info: &str, err: &SearchError) -> Self {
        warn!(mode = %mode, error = %err, "search failed, showing empty panel");
        Panel {
            state: PanelState::Error,
            info: Some(info.to_string()),
            error: Some(err.to_string()),
            content: T::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WebContent {
    pub paragraphs: Vec<String>,
    pub sources: Vec<SourceCard>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceCard {
    pub index: usize,
    pub title: String,
    pub url: Option<String>,
    pub snippet: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImagesContent {
    pub images: Vec<ImageItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VideosContent {
    pub videos: Vec<VideoItem>,
}

pub type WebPanel = Panel<WebContent>;
pub type ImagesPanel = Panel<ImagesContent>;
pub type VideosPanel = Panel<VideosContent>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub query: String,
    pub web: WebPanel,
    pub images: ImagesPanel,
    pub videos: VideosPanel,
}

pub fn web_panel(outcome: Result<Value, SearchError>) -> WebPanel {
    let web = match outcome.and_then(|body| read_view::<WebResult>(&body)) {
        Ok(web) => web,
        Err(e) => return Panel::failed(Mode::Web, NO_WEB_RESULTS, &e),
    };

    let paragraphs: Vec<String> = web
        .message
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect();

    let sources: Vec<SourceCard> = web
        .sources
        .into_iter()
        .enumerate()
        .map(|(i, source)| {
            let thumbnail = source
                .metadata
                .url
                .as_deref()
                .and_then(extract_youtube_id)
                .map(thumbnail_url);
            SourceCard {
                index: i + 1,
                title: source
                    .metadata
                    .title
                    .unwrap_or_else(|| "Untitled".to_string()),
                url: source.metadata.url,
                snippet: source.page_content,
                thumbnail,
            }
        })
        .collect();

    if paragraphs.is_empty() && sources.is_empty() {
        return Panel::empty(NO_WEB_RESULTS);
    }
    Panel::ready(WebContent {
        paragraphs,
        sources,
    })
}

pub fn images_panel(outcome: Result<Value, SearchError>) -> ImagesPanel {
    match outcome.and_then(|body| read_view::<ImagesResult>(&body)) {
        Ok(ImagesResult { images }) => {
            if images.is_empty() {
                Panel::empty(NO_IMAGES)
            } else {
                Panel::ready(ImagesContent { images })
            }
        }
        Err(e) => Panel::failed(Mode::Images, NO_IMAGES, &e),
    }
}

pub fn videos_panel(outcome: Result<Value, SearchError>) -> VideosPanel {
    match outcome.and_then(|body| read_view::<VideosResult>(&body)) {
        Ok(VideosResult { videos }) => {
            if videos.is_empty() {
                Panel::empty(NO_VIDEOS)
            } else {
                Panel::ready(VideosContent { videos })
            }
        }
        Err(e) => Panel::failed(Mode::Videos, NO_VIDEOS, &e),
    }
}

/// Runs the three mode searches for `query` and builds every panel.
pub async fn search_all(client: &SearchClient, query: &str) -> Dashboard {
    let (web, images, videos) = futures::join!(
        client.fetch(query, Mode::Web),
        client.fetch(query, Mode::Images),
        client.fetch(query, Mode::Videos)
    );

    let dashboard = Dashboard {
        query: query.to_string(),
        web: web_panel(web),
        images: images_panel(images),
        videos: videos_panel(videos),
    };
    info!(
        query = %query,
        web = ?dashboard.web.state,
        images = dashboard.images.content.images.len(),
        videos = dashboard.videos.content.videos.len(),
        "dashboard search completed"
    );
    dashboard
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request_failed() -> SearchError {
        SearchError::RequestFailed {
            status: Some(500),
            message: "internal error".into(),
        }
    }

    #[test]
    fn test_web_panel_with_youtube_source() {
        let panel = web_panel(Ok(json!({
            "message": "First paragraph.\n\nSecond paragraph.",
            "sources": [
                {"metadata": {"title": "A", "url": "https://youtu.be/XYZ"}, "pageContent": "hi"}
            ]
        })));

        assert_eq!(panel.state, PanelState::Ok);
        assert_eq!(
            panel.content.paragraphs,
            vec!["First paragraph.".to_string(), "Second paragraph.".to_string()]
        );
        let card = &panel.content.sources[0];
        assert_eq!(card.index, 1);
        assert_eq!(card.title, "A");
        assert_eq!(card.snippet, "hi");
        assert_eq!(
            card.thumbnail.as_deref(),
            Some("https://img.youtube.com/vi/XYZ/hqdefault.jpg")
        );
    }

    #[test]
    fn test_web_panel_source_without_video() {
        let panel = web_panel(Ok(json!({
            "message": "",
            "sources": [
                {"metadata": {"title": "B", "url": "https://example.com"}, "pageContent": "hi"}
            ]
        })));

        assert_eq!(panel.state, PanelState::Ok);
        assert!(panel.content.paragraphs.is_empty());
        assert_eq!(panel.content.sources[0].thumbnail, None);
        assert_eq!(
            panel.content.sources[0].url.as_deref(),
            Some("https://example.com")
        );
    }

    #[test]
    fn test_web_panel_empty_body() {
        let panel = web_panel(Ok(json!({})));
        assert_eq!(panel.state, PanelState::Empty);
        assert_eq!(panel.info.as_deref(), Some(NO_WEB_RESULTS));
    }

    #[test]
    fn test_images_panel_empty_list_is_informational() {
        let panel = images_panel(Ok(json!({"images": []})));
        assert_eq!(panel.state, PanelState::Empty);
        assert_eq!(panel.info.as_deref(), Some(NO_IMAGES));
        assert!(panel.error.is_none());
        assert!(panel.content.images.is_empty());
    }

    #[test]
    fn test_images_panel_with_items() {
        let panel = images_panel(Ok(json!({
            "images": [{"img_src": "https://i/1.png", "title": "One", "url": "https://p/1"}]
        })));
        assert_eq!(panel.state, PanelState::Ok);
        assert_eq!(panel.content.images[0].title, "One");
    }

    #[test]
    fn test_videos_panel_keeps_iframe() {
        let panel = videos_panel(Ok(json!({
            "videos": [
                {"img_src": "t1", "title": "V1", "url": "https://v/1", "iframe_src": "https://embed/1"},
                {"img_src": "t2", "title": "V2", "url": "https://v/2"}
            ]
        })));
        assert_eq!(panel.state, PanelState::Ok);
        assert_eq!(
            panel.content.videos[0].iframe_src.as_deref(),
            Some("https://embed/1")
        );
        assert_eq!(panel.content.videos[1].iframe_src, None);
    }

    #[test]
    fn test_failures_are_handled_the_same_for_every_mode() {
        let web = web_panel(Err(request_failed()));
        let images = images_panel(Err(request_failed()));
        let videos = videos_panel(Err(request_failed()));

        for (state, error) in [
            (web.state, web.error),
            (images.state, images.error),
            (videos.state, videos.error),
        ] {
            assert_eq!(state, PanelState::Error);
            assert_eq!(
                error.as_deref(),
                Some("Upstream request failed with status 500: internal error")
            );
        }
        assert_eq!(images.info.as_deref(), Some(NO_IMAGES));
        assert_eq!(videos.info.as_deref(), Some(NO_VIDEOS));
    }

    #[test]
    fn test_images_panel_keeps_items_with_null_fields() {
        let panel = images_panel(Ok(json!({
            "images": [
                {"img_src": "a.png", "title": "Good", "url": "https://a"},
                {"img_src": "b.png", "title": null, "url": "https://b"}
            ]
        })));
        assert_eq!(panel.state, PanelState::Ok);
        assert_eq!(panel.content.images.len(), 2);
        assert_eq!(panel.content.images[0].title, "Good");
        assert_eq!(panel.content.images[1].title, "");
    }

    #[test]
    fn test_web_panel_keeps_answer_when_source_has_null_content() {
        let panel = web_panel(Ok(json!({
            "message": "Answer.",
            "sources": [{"pageContent": null, "metadata": {"title": null, "url": "https://a"}}]
        })));
        assert_eq!(panel.state, PanelState::Ok);
        assert_eq!(panel.content.paragraphs, vec!["Answer.".to_string()]);
        assert_eq!(panel.content.sources[0].snippet, "");
        assert_eq!(panel.content.sources[0].title, "Untitled");
    }

    #[test]
    fn test_videos_panel_drops_only_the_malformed_item() {
        let panel = videos_panel(Ok(json!({
            "videos": [
                {"img_src": "t1", "title": ["bad"], "url": "https://v/1"},
                {"img_src": "t2", "title": "V2", "url": "https://v/2"}
            ]
        })));
        assert_eq!(panel.state, PanelState::Ok);
        assert_eq!(panel.content.videos.len(), 1);
        assert_eq!(panel.content.videos[0].title, "V2");
    }

    #[test]
    fn test_malformed_body_is_an_error_not_empty() {
        let images = images_panel(Ok(json!({"images": "nope"})));
        assert_eq!(images.state, PanelState::Error);
        assert_eq!(images.info.as_deref(), Some(NO_IMAGES));
        assert!(images.error.as_deref().is_some_and(|e| e.starts_with("Failed to decode")));

        let web = web_panel(Ok(json!({"message": 7})));
        assert_eq!(web.state, PanelState::Error);
        assert_eq!(web.info.as_deref(), Some(NO_WEB_RESULTS));
    }

    #[test]
    fn test_panel_serializes_flat() {
        let panel = images_panel(Ok(json!({"images": []})));
        assert_eq!(
            serde_json::to_value(&panel).unwrap(),
            json!({"state": "empty", "info": "No images found.", "images": []})
        );
    }
}

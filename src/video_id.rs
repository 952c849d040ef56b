use once_cell::sync::Lazy;
use regex::Regex;

static YOUTUBE_PATTERNS: Lazy<[Regex; 2]> = Lazy::new(|| {
    [
        Regex::new(r"youtu\.be/([^?&]+)").expect("valid regex"),
        Regex::new(r"youtube\.com/watch\?v=([^?&]+)").expect("valid regex"),
    ]
});

/// Pulls the video id out of a YouTube share or watch URL.
pub fn extract_youtube_id(url: &str) -> Option<&str> {
    YOUTUBE_PATTERNS
        .iter()
        .find_map(|pattern| pattern.captures(url))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

pub fn thumbnail_url(video_id: &str) -> String {
    format!("https://img.youtube.com/vi/{video_id}/hqdefault.jpg")
}

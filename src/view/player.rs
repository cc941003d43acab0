//! Embedded player links and small display helpers.

use crate::domain::Video;

const EMBED_BASE: &str = "https://www.youtube.com/embed/";
const WATCH_BASE: &str = "https://www.youtube.com/watch?v=";
const THUMBNAIL_BASE: &str = "https://img.youtube.com/vi/";

/// Embed URL that autoplays from `start_time` seconds
pub fn embed_url(video_id: &str, start_time: u32) -> String {
    format!(
        "{}{}?autoplay=1&rel=0&start={}",
        EMBED_BASE, video_id, start_time
    )
}

/// Public watch page for a video
pub fn watch_url(video_id: &str) -> String {
    format!("{}{}", WATCH_BASE, video_id)
}

/// The record's thumbnail, or the player's default still
pub fn thumbnail_url(video: &Video) -> String {
    video
        .thumbnail_url
        .clone()
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| format!("{}{}/maxresdefault.jpg", THUMBNAIL_BASE, video.video_id))
}

/// Format seconds as `M:SS`
pub fn format_time(total_seconds: u32) -> String {
    format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
}

/// `S{season} E{episode}`, `E{episode}`, or nothing
pub fn episode_badge(video: &Video) -> Option<String> {
    match (video.season, video.episode) {
        (Some(season), Some(episode)) => Some(format!("S{} E{}", season, episode)),
        (None, Some(episode)) => Some(format!("E{}", episode)),
        _ => None,
    }
}

//! Video and reading overlays.
//!
//! At most one of each kind is open. Opening another replaces the current
//! one; page scroll stays locked while either is open.

use serde::Serialize;
use tracing::debug;

use crate::domain::{Channel, Reading, Video};
use crate::view::{embed_url, watch_url};

/// An open video player
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoModal {
    pub video_id: String,
    pub title: String,
    pub channel: Channel,
    pub description: Option<String>,
    /// Seconds into the video where playback starts
    pub start_time: u32,
    pub embed_url: String,
    pub watch_url: String,
}

impl VideoModal {
    pub fn new(video: &Video, start_time: u32) -> Self {
        Self {
            video_id: video.video_id.clone(),
            title: video.title.clone(),
            channel: video.channel,
            description: video.synopsis.clone(),
            start_time,
            embed_url: embed_url(&video.video_id, start_time),
            watch_url: watch_url(&video.video_id),
        }
    }
}

/// An open reading
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadingModal {
    pub reading_id: String,
    pub title: String,
    pub content: String,
    /// Link back to the video the reading was written from
    pub source_url: Option<String>,
    pub link_text: String,
}

impl ReadingModal {
    pub fn new(reading: &Reading) -> Self {
        Self {
            reading_id: reading.id.clone(),
            title: reading.title.clone(),
            content: reading.content.clone(),
            source_url: reading.video_id.as_deref().map(watch_url),
            link_text: reading.link_label().to_string(),
        }
    }
}

/// Tracks which overlays are open
#[derive(Debug, Clone, Default)]
pub struct ModalCoordinator {
    video: Option<VideoModal>,
    reading: Option<ReadingModal>,
}

impl ModalCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Play a video from `start_time`, replacing any open player
    pub fn open_video(&mut self, video: &Video, start_time: u32) -> &VideoModal {
        debug!(video_id = %video.video_id, start_time, "opening video");
        self.video.insert(VideoModal::new(video, start_time))
    }

    /// Show a reading, replacing any open reading
    pub fn open_reading(&mut self, reading: &Reading) -> &ReadingModal {
        debug!(reading_id = %reading.id, "opening reading");
        self.reading.insert(ReadingModal::new(reading))
    }

    /// Close the player; its embed is dropped so playback stops
    pub fn close_video(&mut self) -> bool {
        self.video.take().is_some()
    }

    pub fn close_reading(&mut self) -> bool {
        self.reading.take().is_some()
    }

    pub fn close_all(&mut self) {
        self.video = None;
        self.reading = None;
    }

    pub fn video(&self) -> Option<&VideoModal> {
        self.video.as_ref()
    }

    pub fn reading(&self) -> Option<&ReadingModal> {
        self.reading.as_ref()
    }

    /// Whether page scroll is locked behind an overlay
    pub fn scroll_locked(&self) -> bool {
        self.video.is_some() || self.reading.is_some()
    }
}

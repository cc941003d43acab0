//! View-model structs for each tab.
//!
//! These are plain data: whatever draws the page (HTML templates, the
//! terminal printer in `cli`) consumes them without touching the catalog.

use serde::Serialize;

use super::player::{embed_url, episode_badge, format_time, thumbnail_url, watch_url};
use crate::domain::{Category, Channel, Reading, Video};
use crate::library::catalog::Readings;
use crate::library::filter::SubjectHit;
use crate::library::seasons::{SeasonGroup, SeasonKey};

/// A playable video card
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoCard {
    pub video_id: String,
    pub title: String,
    pub channel: Channel,
    /// "S2 E7"-style label
    pub badge: Option<String>,
    pub game_title: Option<String>,
    pub synopsis: Option<String>,
    pub thumbnail_url: String,
    pub embed_url: String,
    pub watch_url: String,
    /// Reading written from this video, if any
    pub related_reading: Option<String>,
}

impl VideoCard {
    pub fn new(video: &Video, readings: Option<&Readings>) -> Self {
        Self {
            video_id: video.video_id.clone(),
            title: video.title.clone(),
            channel: video.channel,
            badge: episode_badge(video),
            game_title: video.game_title.clone(),
            synopsis: video.synopsis.clone(),
            thumbnail_url: thumbnail_url(video),
            embed_url: embed_url(&video.video_id, 0),
            watch_url: watch_url(&video.video_id),
            related_reading: related_reading(&video.video_id, readings),
        }
    }
}

/// One season's filmstrip
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonSection {
    #[serde(skip)]
    pub key: SeasonKey,
    pub heading: String,
    pub episode_count: usize,
    pub cards: Vec<VideoCard>,
}

impl SeasonSection {
    pub fn new(group: &SeasonGroup<'_>, readings: Option<&Readings>) -> Self {
        Self {
            key: group.key,
            heading: group.key.heading(),
            episode_count: group.videos.len(),
            cards: group
                .videos
                .iter()
                .map(|v| VideoCard::new(v, readings))
                .collect(),
        }
    }
}

/// Main tab: featured latest episode plus season sections
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MainView {
    pub latest: Option<VideoCard>,
    pub sections: Vec<SeasonSection>,
    pub categories: Vec<Category>,
}

impl MainView {
    pub fn contains_video(&self, video_id: &str) -> bool {
        self.sections
            .iter()
            .flat_map(|s| &s.cards)
            .any(|c| c.video_id == video_id)
    }

    /// Number of cards across all sections
    pub fn card_count(&self) -> usize {
        self.sections.iter().map(|s| s.cards.len()).sum()
    }
}

/// A consulting search row, deep-linked to its start time
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsultingRow {
    pub video_id: String,
    pub video_title: String,
    pub subject_title: Option<String>,
    pub start_time: u32,
    pub display_time: String,
    pub embed_url: String,
    pub watch_url: String,
    pub related_reading: Option<String>,
}

impl ConsultingRow {
    pub fn new(hit: &SubjectHit<'_>, readings: Option<&Readings>) -> Self {
        let start_time = hit.start_time();
        Self {
            video_id: hit.video.video_id.clone(),
            video_title: hit.video.title.clone(),
            subject_title: hit.subject.map(|s| s.title.clone()),
            start_time,
            display_time: format_time(start_time),
            embed_url: embed_url(&hit.video.video_id, start_time),
            watch_url: watch_url(&hit.video.video_id),
            related_reading: related_reading(&hit.video.video_id, readings),
        }
    }
}

/// Consulting tab
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsultingView {
    pub rows: Vec<ConsultingRow>,
    pub categories: Vec<Category>,
}

impl ConsultingView {
    pub fn contains_video(&self, video_id: &str) -> bool {
        self.rows.iter().any(|r| r.video_id == video_id)
    }
}

/// An insight card
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadingCard {
    pub id: String,
    pub title: String,
    /// Reading type as written in the catalog
    pub kind: String,
    pub description: String,
    pub video_id: Option<String>,
    pub source_url: Option<String>,
    pub link_text: String,
}

impl ReadingCard {
    pub fn new(reading: &Reading) -> Self {
        Self {
            id: reading.id.clone(),
            title: reading.title.clone(),
            kind: reading.kind.label().to_string(),
            description: reading.description.clone(),
            video_id: reading.video_id.clone(),
            source_url: reading.video_id.as_deref().map(watch_url),
            link_text: reading.link_label().to_string(),
        }
    }
}

/// Insights tab
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightsView {
    pub cards: Vec<ReadingCard>,
    pub categories: Vec<Category>,
}

impl InsightsView {
    pub fn contains_reading(&self, id: &str) -> bool {
        self.cards.iter().any(|c| c.id == id)
    }
}

fn related_reading(video_id: &str, readings: Option<&Readings>) -> Option<String> {
    readings
        .and_then(|r| r.find_for_video(video_id))
        .map(|r| r.id.clone())
}

//! Videos and their timestamped subjects.

use serde::{Deserialize, Deserializer, Serialize};

use super::category::Category;

/// Which channel a video belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// Primary episodic content
    Main,

    /// Client-engagement recordings
    Consulting,
}

impl Channel {
    /// Human-readable channel name shown next to the player
    pub fn display_name(&self) -> &'static str {
        match self {
            Channel::Main => "Games Over Coffee",
            Channel::Consulting => "Games Over Coffee Consulting",
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Channel::Main => write!(f, "main"),
            Channel::Consulting => write!(f, "consulting"),
        }
    }
}

/// A video record from `data/videos.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    /// Player identifier, unique within the catalog
    pub video_id: String,

    /// Channel partition
    pub channel: Channel,

    pub title: String,

    /// Season number; `0` in the catalog counts as missing
    #[serde(
        default,
        deserialize_with = "nonzero",
        skip_serializing_if = "Option::is_none"
    )]
    pub season: Option<u32>,

    #[serde(
        default,
        deserialize_with = "nonzero",
        skip_serializing_if = "Option::is_none"
    )]
    pub episode: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synopsis: Option<String>,

    /// Category tags, compared case-insensitively
    #[serde(default)]
    pub tags: Vec<Category>,

    /// Timestamped chapters within the video
    #[serde(default)]
    pub subjects: Vec<Subject>,
}

impl Video {
    /// Create a video with only the required fields set
    pub fn new(video_id: impl Into<String>, channel: Channel, title: impl Into<String>) -> Self {
        Self {
            video_id: video_id.into(),
            channel,
            title: title.into(),
            season: None,
            episode: None,
            thumbnail_url: None,
            game_title: None,
            synopsis: None,
            tags: Vec::new(),
            subjects: Vec::new(),
        }
    }

    /// Set season and episode numbers
    pub fn with_episode(mut self, season: Option<u32>, episode: Option<u32>) -> Self {
        self.season = season;
        self.episode = episode;
        self
    }

    /// Add a tag
    pub fn with_tag(mut self, tag: impl Into<Category>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Add a subject
    pub fn with_subject(mut self, subject: Subject) -> Self {
        self.subjects.push(subject);
        self
    }

    /// Set the synopsis
    pub fn with_synopsis(mut self, synopsis: impl Into<String>) -> Self {
        self.synopsis = Some(synopsis.into());
        self
    }

    /// Whether the video carries the given tag
    pub fn has_tag(&self, category: &Category) -> bool {
        self.tags.iter().any(|t| t == category)
    }
}

fn nonzero<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u32>::deserialize(deserializer)?.filter(|n| *n != 0))
}

/// A chapter within a video
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub title: String,

    /// Seconds into the video
    pub start_time: u32,

    /// Extra search terms for this chapter
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl Subject {
    /// Create a subject
    pub fn new(
        title: impl Into<String>,
        start_time: u32,
        keywords: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            title: title.into(),
            start_time,
            keywords: keywords.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether a lower-cased needle occurs in the title or any keyword
    pub fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.keywords.iter().any(|k| k.to_lowercase().contains(needle))
    }
}

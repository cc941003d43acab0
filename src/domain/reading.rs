//! Written insights linked back to videos.

use serde::{Deserialize, Serialize};

use super::category::Category;

/// Label for the source link when a reading does not provide one
pub const DEFAULT_LINK_TEXT: &str = "View Source Video";

/// A reading record from `data/readings.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reading {
    /// Unique identifier
    pub id: String,

    /// Reading type (e.g. "Article"), compared case-insensitively
    #[serde(rename = "type")]
    pub kind: Category,

    pub title: String,

    #[serde(default)]
    pub description: String,

    /// Full body markup
    #[serde(default)]
    pub content: String,

    /// Video this reading was written from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_id: Option<String>,

    /// Custom label for the source link
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_text: Option<String>,
}

impl Reading {
    /// Create a reading with only the required fields set
    pub fn new(id: impl Into<String>, kind: impl Into<Category>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            title: title.into(),
            description: String::new(),
            content: String::new(),
            video_id: None,
            link_text: None,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the body
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Link the reading to a video
    pub fn with_video(mut self, video_id: impl Into<String>) -> Self {
        self.video_id = Some(video_id.into());
        self
    }

    /// Label for the link back to the source video
    pub fn link_label(&self) -> &str {
        self.link_text
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(DEFAULT_LINK_TEXT)
    }

    /// Whether this reading references the given video
    pub fn references(&self, video_id: &str) -> bool {
        self.video_id.as_deref() == Some(video_id)
    }
}

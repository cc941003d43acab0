//! Loaded catalog collections.
//!
//! Each collection keeps records in catalog order and indexes them by their
//! natural identifiers. Construction validates the identifier invariants, so
//! a collection that exists is always well-formed.

use std::collections::HashMap;

use crate::adapters::LoadFailure;
use crate::domain::{Channel, Reading, Video};

/// All videos from `data/videos.json`
#[derive(Debug, Clone, Default)]
pub struct Videos {
    items: Vec<Video>,
    by_id: HashMap<String, usize>,
}

impl Videos {
    /// Parse a JSON array of video records
    pub fn parse(bytes: &[u8]) -> Result<Self, LoadFailure> {
        let items: Vec<Video> =
            serde_json::from_slice(bytes).map_err(|e| LoadFailure::Malformed(e.to_string()))?;
        Self::from_records(items)
    }

    /// Build the collection, rejecting blank or duplicate ids
    pub fn from_records(items: Vec<Video>) -> Result<Self, LoadFailure> {
        let mut by_id = HashMap::with_capacity(items.len());

        for (idx, video) in items.iter().enumerate() {
            if video.video_id.trim().is_empty() {
                return Err(LoadFailure::Invalid(format!(
                    "video at index {} has an empty videoId",
                    idx
                )));
            }
            if by_id.insert(video.video_id.clone(), idx).is_some() {
                return Err(LoadFailure::Invalid(format!(
                    "duplicate videoId: {}",
                    video.video_id
                )));
            }
        }

        Ok(Self { items, by_id })
    }

    /// Every video, in catalog order
    pub fn all(&self) -> &[Video] {
        &self.items
    }

    /// Look up a video by id
    pub fn get(&self, video_id: &str) -> Option<&Video> {
        self.by_id.get(video_id).map(|&idx| &self.items[idx])
    }

    /// Videos on one channel, in catalog order
    pub fn channel(&self, channel: Channel) -> Vec<&Video> {
        self.items.iter().filter(|v| v.channel == channel).collect()
    }

    /// Main-channel episodes
    pub fn main(&self) -> Vec<&Video> {
        self.channel(Channel::Main)
    }

    /// Consulting clips
    pub fn consulting(&self) -> Vec<&Video> {
        self.channel(Channel::Consulting)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// All readings from `data/readings.json`
#[derive(Debug, Clone, Default)]
pub struct Readings {
    items: Vec<Reading>,
    by_id: HashMap<String, usize>,
    /// videoId -> indexes of readings that reference it, in catalog order
    by_video: HashMap<String, Vec<usize>>,
}

impl Readings {
    /// Parse a JSON array of reading records
    pub fn parse(bytes: &[u8]) -> Result<Self, LoadFailure> {
        let items: Vec<Reading> =
            serde_json::from_slice(bytes).map_err(|e| LoadFailure::Malformed(e.to_string()))?;
        Self::from_records(items)
    }

    /// Build the collection, rejecting blank or duplicate ids
    pub fn from_records(items: Vec<Reading>) -> Result<Self, LoadFailure> {
        let mut by_id = HashMap::with_capacity(items.len());
        let mut by_video: HashMap<String, Vec<usize>> = HashMap::new();

        for (idx, reading) in items.iter().enumerate() {
            if reading.id.trim().is_empty() {
                return Err(LoadFailure::Invalid(format!(
                    "reading at index {} has an empty id",
                    idx
                )));
            }
            if by_id.insert(reading.id.clone(), idx).is_some() {
                return Err(LoadFailure::Invalid(format!(
                    "duplicate reading id: {}",
                    reading.id
                )));
            }
            if let Some(video_id) = &reading.video_id {
                by_video.entry(video_id.clone()).or_default().push(idx);
            }
        }

        Ok(Self {
            items,
            by_id,
            by_video,
        })
    }

    /// Every reading, in catalog order
    pub fn all(&self) -> &[Reading] {
        &self.items
    }

    /// Look up a reading by id
    pub fn get(&self, id: &str) -> Option<&Reading> {
        self.by_id.get(id).map(|&idx| &self.items[idx])
    }

    /// First reading (catalog order) that references a video
    pub fn find_for_video(&self, video_id: &str) -> Option<&Reading> {
        self.by_video
            .get(video_id)
            .and_then(|idxs| idxs.first())
            .map(|&idx| &self.items[idx])
    }

    /// Every reading that references a video
    pub fn for_video(&self, video_id: &str) -> Vec<&Reading> {
        self.by_video
            .get(video_id)
            .map(|idxs| idxs.iter().map(|&idx| &self.items[idx]).collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

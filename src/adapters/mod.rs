//! Sources for the two catalog resources.
//!
//! The site is static: both catalogs are plain JSON files reached by a
//! relative path. A source decides where those paths resolve, either
//! against a base URL over HTTP or against a directory on disk.

pub mod file;
pub mod http;

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use file::FileSource;
pub use http::HttpSource;

/// The catalog resources the site reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    /// `data/videos.json`
    Videos,

    /// `data/readings.json`
    Readings,
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Resource::Videos => write!(f, "videos"),
            Resource::Readings => write!(f, "readings"),
        }
    }
}

/// Relative paths of each resource under the site root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourcePaths {
    pub videos: String,
    pub readings: String,
}

impl Default for ResourcePaths {
    fn default() -> Self {
        Self {
            videos: "data/videos.json".to_string(),
            readings: "data/readings.json".to_string(),
        }
    }
}

impl ResourcePaths {
    /// Relative path for a resource
    pub fn path(&self, resource: Resource) -> &str {
        match resource {
            Resource::Videos => &self.videos,
            Resource::Readings => &self.readings,
        }
    }
}

/// Why a resource could not be turned into a collection
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadFailure {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("timed out after {0:?}")]
    TimedOut(Duration),

    #[error("malformed payload: {0}")]
    Malformed(String),

    #[error("invalid record: {0}")]
    Invalid(String),
}

/// Trait for catalog sources
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Human-readable source name
    fn name(&self) -> &str;

    /// Fetch the raw bytes of a resource
    async fn fetch(&self, resource: Resource) -> Result<Vec<u8>, LoadFailure>;
}

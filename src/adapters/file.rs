//! Directory source: reads the catalogs from a checked-out site tree.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use super::{CatalogSource, LoadFailure, Resource, ResourcePaths};

/// Catalog source backed by a local directory
pub struct FileSource {
    /// Site root directory
    root: PathBuf,
    /// Resource paths relative to the root
    paths: ResourcePaths,
}

impl FileSource {
    /// Create a source rooted at `root`
    pub fn new(root: impl Into<PathBuf>, paths: ResourcePaths) -> Self {
        Self {
            root: root.into(),
            paths,
        }
    }

    /// Site root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path of a resource
    pub fn path_for(&self, resource: Resource) -> PathBuf {
        self.root.join(self.paths.path(resource))
    }
}

#[async_trait]
impl CatalogSource for FileSource {
    fn name(&self) -> &str {
        "file"
    }

    async fn fetch(&self, resource: Resource) -> Result<Vec<u8>, LoadFailure> {
        let path = self.path_for(resource);
        debug!(path = %path.display(), "reading {}", resource);

        fs::read(&path)
            .await
            .map_err(|e| LoadFailure::Transport(format!("{}: {}", path.display(), e)))
    }
}

//! HTTP source: resolves resource paths against the site's base URL.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Url;
use tracing::debug;

use super::{CatalogSource, LoadFailure, Resource, ResourcePaths};

/// Catalog source that fetches over HTTP
pub struct HttpSource {
    /// Site root; always ends with a slash so relative joins stay below it
    base_url: Url,
    /// Resource paths relative to the site root
    paths: ResourcePaths,
    /// HTTP client
    client: reqwest::Client,
}

impl HttpSource {
    /// Create a source rooted at `base_url`
    pub fn new(base_url: &str, paths: ResourcePaths) -> Result<Self> {
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };

        let base_url = Url::parse(&normalized)
            .with_context(|| format!("Invalid base URL: {}", base_url))?;

        Ok(Self {
            base_url,
            paths,
            client: reqwest::Client::new(),
        })
    }

    /// Full URL of a resource
    pub fn url_for(&self, resource: Resource) -> Result<Url, LoadFailure> {
        self.base_url
            .join(self.paths.path(resource))
            .map_err(|e| LoadFailure::Transport(e.to_string()))
    }
}

#[async_trait]
impl CatalogSource for HttpSource {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch(&self, resource: Resource) -> Result<Vec<u8>, LoadFailure> {
        let url = self.url_for(resource)?;
        debug!(%url, "fetching {}", resource);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| LoadFailure::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadFailure::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| LoadFailure::Transport(e.to_string()))?;

        Ok(body.to_vec())
    }
}

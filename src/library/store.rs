//! Session-wide catalog store.
//!
//! Each resource has one cache slot that moves `Empty -> Loading -> Ready`.
//! While a load is in flight every caller awaits the same shared future, so
//! a resource is requested at most once no matter how many views ask for it.
//! A failed load puts the slot back to `Empty`; the next request retries.
//!
//! Loads are driven by a spawned task, so a load whose caller went away
//! (the user switched tabs) still completes and fills the cache.
//!
//! Must be used from within a Tokio runtime.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use futures::future::{BoxFuture, FutureExt, Shared};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::catalog::{Readings, Videos};
use crate::adapters::{CatalogSource, LoadFailure, Resource};
use crate::domain::{Reading, Video};

/// Default time allowed for fetching one resource
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors from loading a catalog
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    #[error("{resource} unavailable: {cause}")]
    DataUnavailable {
        resource: Resource,
        cause: LoadFailure,
    },
}

impl CatalogError {
    /// Resource whose load failed
    pub fn resource(&self) -> Resource {
        match self {
            CatalogError::DataUnavailable { resource, .. } => *resource,
        }
    }
}

/// Observable state of a resource slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// Never requested, or the last attempt failed
    NotLoaded,
    Loading,
    Ready,
}

type SharedLoad<T> = Shared<BoxFuture<'static, Result<Arc<T>, CatalogError>>>;

enum Slot<T> {
    Empty,
    Loading(SharedLoad<T>),
    Ready(Arc<T>),
}

impl<T> Slot<T> {
    fn status(&self) -> LoadStatus {
        match self {
            Slot::Empty => LoadStatus::NotLoaded,
            Slot::Loading(_) => LoadStatus::Loading,
            Slot::Ready(_) => LoadStatus::Ready,
        }
    }

    fn ready(&self) -> Option<Arc<T>> {
        match self {
            Slot::Ready(collection) => Some(Arc::clone(collection)),
            _ => None,
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Holds the videos and readings fetched this session
pub struct CatalogStore {
    source: Arc<dyn CatalogSource>,
    timeout: Duration,
    videos: Arc<Mutex<Slot<Videos>>>,
    readings: Arc<Mutex<Slot<Readings>>>,
}

impl CatalogStore {
    /// Create a store reading from `source`
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self {
            source,
            timeout: DEFAULT_FETCH_TIMEOUT,
            videos: Arc::new(Mutex::new(Slot::Empty)),
            readings: Arc::new(Mutex::new(Slot::Empty)),
        }
    }

    /// Set the per-resource fetch timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Name of the underlying source
    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// Load the video catalog (cached after the first success)
    pub async fn load_videos(&self) -> Result<Arc<Videos>, CatalogError> {
        self.load(&self.videos, Resource::Videos, Videos::parse).await
    }

    /// Load the reading catalog (cached after the first success)
    pub async fn load_readings(&self) -> Result<Arc<Readings>, CatalogError> {
        self.load(&self.readings, Resource::Readings, Readings::parse).await
    }

    /// Start loading a resource in the background without waiting on it
    pub fn prefetch(&self, resource: Resource) {
        match resource {
            Resource::Videos => {
                let _ = self.start(&self.videos, resource, Videos::parse);
            }
            Resource::Readings => {
                let _ = self.start(&self.readings, resource, Readings::parse);
            }
        }
    }

    /// Current state of a resource slot
    pub fn status(&self, resource: Resource) -> LoadStatus {
        match resource {
            Resource::Videos => lock(&self.videos).status(),
            Resource::Readings => lock(&self.readings).status(),
        }
    }

    /// Videos, if already loaded
    pub fn cached_videos(&self) -> Option<Arc<Videos>> {
        lock(&self.videos).ready()
    }

    /// Readings, if already loaded
    pub fn cached_readings(&self) -> Option<Arc<Readings>> {
        lock(&self.readings).ready()
    }

    /// Look up a loaded video by id
    pub fn find_video_by_id(&self, video_id: &str) -> Option<Video> {
        self.cached_videos()?.get(video_id).cloned()
    }

    /// Look up a loaded reading by id
    pub fn find_reading_by_id(&self, id: &str) -> Option<Reading> {
        self.cached_readings()?.get(id).cloned()
    }

    /// First loaded reading that references a video.
    ///
    /// `None` is the ordinary answer for most videos, and also the answer
    /// while readings have not been loaded yet.
    pub fn find_reading_for_video(&self, video_id: &str) -> Option<Reading> {
        let Some(readings) = self.cached_readings() else {
            debug!(video_id, "reading lookup before readings were loaded");
            return None;
        };
        readings.find_for_video(video_id).cloned()
    }

    async fn load<T>(
        &self,
        slot: &Arc<Mutex<Slot<T>>>,
        resource: Resource,
        parse: fn(&[u8]) -> Result<T, LoadFailure>,
    ) -> Result<Arc<T>, CatalogError>
    where
        T: Send + Sync + 'static,
    {
        match self.start(slot, resource, parse) {
            Ok(collection) => Ok(collection),
            Err(pending) => pending.await,
        }
    }

    /// Return the cached collection, or the shared in-flight load
    fn start<T>(
        &self,
        slot: &Arc<Mutex<Slot<T>>>,
        resource: Resource,
        parse: fn(&[u8]) -> Result<T, LoadFailure>,
    ) -> Result<Arc<T>, SharedLoad<T>>
    where
        T: Send + Sync + 'static,
    {
        let mut guard = lock(slot);
        if let Slot::Ready(collection) = &*guard {
            debug!(%resource, "catalog cache hit");
            return Ok(Arc::clone(collection));
        }
        if let Slot::Loading(pending) = &*guard {
            debug!(%resource, "joining in-flight load");
            return Err(pending.clone());
        }

        let pending = fetch_collection(
            Arc::clone(&self.source),
            Arc::clone(slot),
            resource,
            self.timeout,
            parse,
        )
        .boxed()
        .shared();

        *guard = Slot::Loading(pending.clone());
        tokio::spawn(pending.clone());
        Err(pending)
    }
}

/// Fetch, parse and publish one resource into its slot
async fn fetch_collection<T>(
    source: Arc<dyn CatalogSource>,
    slot: Arc<Mutex<Slot<T>>>,
    resource: Resource,
    timeout: Duration,
    parse: fn(&[u8]) -> Result<T, LoadFailure>,
) -> Result<Arc<T>, CatalogError>
where
    T: Send + Sync + 'static,
{
    debug!(%resource, source = source.name(), "loading catalog");

    let result = match tokio::time::timeout(timeout, source.fetch(resource)).await {
        Ok(fetched) => fetched,
        Err(_) => Err(LoadFailure::TimedOut(timeout)),
    }
    .and_then(|bytes| parse(&bytes))
    .map(Arc::new)
    .map_err(|cause| CatalogError::DataUnavailable { resource, cause });

    let mut guard = lock(&slot);
    match &result {
        Ok(collection) => {
            info!(%resource, "catalog loaded");
            *guard = Slot::Ready(Arc::clone(collection));
        }
        Err(e) => {
            warn!(%resource, error = %e, "catalog load failed");
            *guard = Slot::Empty;
        }
    }

    result
}

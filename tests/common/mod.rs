//! Shared fixtures for integration tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use goc::{CatalogSource, CatalogStore, LoadFailure, Resource};

pub const VIDEOS: &str = r#"[
    {"videoId": "m1", "channel": "main", "title": "Pilot", "season": 1, "episode": 1,
     "gameTitle": "Stardew Valley", "tags": ["Cozy"]},
    {"videoId": "m2", "channel": "main", "title": "Night Shift", "season": 2, "episode": 3,
     "tags": ["Horror", "cozy"]},
    {"videoId": "m3", "channel": "main", "title": "Bonus Round"},
    {"videoId": "vidA", "channel": "consulting", "title": "Studio Review A",
     "tags": ["Economy"],
     "subjects": [{"title": "Balancing", "startTime": 30, "keywords": ["economy"]}]},
    {"videoId": "vidB", "channel": "consulting", "title": "Studio Review B",
     "tags": ["UX"],
     "subjects": [{"title": "Tutorial pacing", "startTime": 75, "keywords": ["onboarding"]}]}
]"#;

pub const READINGS: &str = r#"[
    {"id": "r1", "type": "Article", "title": "Sinks and Faucets",
     "description": "Economy design", "content": "<p>Gold in, gold out.</p>", "videoId": "vidA"},
    {"id": "r2", "type": "Video Essay", "title": "Why Night Shift Works",
     "description": "", "content": "<p>Dread.</p>", "videoId": "m2", "linkText": "Watch the episode"},
    {"id": "r3", "type": "article", "title": "First Ten Minutes",
     "description": "Onboarding", "content": "<p>Hook early.</p>"}
]"#;

/// In-memory source that counts requests per resource
pub struct MockSource {
    responses: Mutex<HashMap<Resource, Result<Vec<u8>, LoadFailure>>>,
    requests: Mutex<HashMap<Resource, usize>>,
    total: AtomicUsize,
    delay: Duration,
    delays: HashMap<Resource, Duration>,
}

impl MockSource {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(HashMap::new()),
            requests: Mutex::new(HashMap::new()),
            total: AtomicUsize::new(0),
            delay: Duration::ZERO,
            delays: HashMap::new(),
        }
    }

    /// Site with the standard fixtures
    pub fn site() -> Self {
        Self::new()
            .respond(Resource::Videos, Ok(VIDEOS.as_bytes().to_vec()))
            .respond(Resource::Readings, Ok(READINGS.as_bytes().to_vec()))
    }

    pub fn respond(self, resource: Resource, response: Result<Vec<u8>, LoadFailure>) -> Self {
        self.set(resource, response);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Delay only one resource
    pub fn with_resource_delay(mut self, resource: Resource, delay: Duration) -> Self {
        self.delays.insert(resource, delay);
        self
    }

    /// Change a response after the source is shared
    pub fn set(&self, resource: Resource, response: Result<Vec<u8>, LoadFailure>) {
        self.responses.lock().unwrap().insert(resource, response);
    }

    pub fn requests(&self, resource: Resource) -> usize {
        self.requests.lock().unwrap().get(&resource).copied().unwrap_or(0)
    }

    pub fn total_requests(&self) -> usize {
        self.total.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogSource for MockSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch(&self, resource: Resource) -> Result<Vec<u8>, LoadFailure> {
        *self.requests.lock().unwrap().entry(resource).or_insert(0) += 1;
        self.total.fetch_add(1, Ordering::SeqCst);

        let delay = self.delays.get(&resource).copied().unwrap_or(self.delay);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        self.responses
            .lock()
            .unwrap()
            .get(&resource)
            .cloned()
            .unwrap_or(Err(LoadFailure::Status(404)))
    }
}

/// Store over a shared mock, keeping a handle to the mock
pub fn store_with(source: MockSource) -> (Arc<MockSource>, CatalogStore) {
    let source = Arc::new(source);
    let store = CatalogStore::new(source.clone());
    (source, store)
}

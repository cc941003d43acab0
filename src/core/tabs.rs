//! Tab controller.
//!
//! Exactly one of `Main`, `Consulting` and `Insights` is active; the initial
//! tab is `Main`. All view state for the session (per-tab filters, scroll
//! memory, the pending navigation target) lives here and only changes through
//! controller methods.
//!
//! Entering a tab is two-phase: [`TabController::select`] switches state
//! synchronously and reports whether a fetch is needed, then
//! [`TabController::refresh`] awaits the catalog and renders. [`TabController::open`]
//! does both.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::scroll::{ScrollDirective, ScrollMemory};
use crate::adapters::Resource;
use crate::domain::Category;
use crate::library::catalog::{Readings, Videos};
use crate::library::filter::Filter;
use crate::library::store::{CatalogError, CatalogStore, LoadStatus};
use crate::view::{self, TabView};

/// Top-level content view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    Main,
    Consulting,
    Insights,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Main, Tab::Consulting, Tab::Insights];

    /// Collection the tab cannot render without
    pub fn resource(&self) -> Resource {
        match self {
            Tab::Main | Tab::Consulting => Resource::Videos,
            Tab::Insights => Resource::Readings,
        }
    }

    fn index(&self) -> usize {
        match self {
            Tab::Main => 0,
            Tab::Consulting => 1,
            Tab::Insights => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tab::Main => "main",
            Tab::Consulting => "consulting",
            Tab::Insights => "insights",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Tab {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "main" | "videos" => Ok(Tab::Main),
            "consulting" => Ok(Tab::Consulting),
            "insights" | "readings" => Ok(Tab::Insights),
            _ => anyhow::bail!("Unknown tab: {}", s),
        }
    }
}

/// What happens to a tab's filters when it is entered again
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterPolicy {
    /// Every entry starts from category `all` and an empty query
    #[default]
    Reset,

    /// A tab visited earlier this session keeps its filters
    Preserve,
}

impl std::str::FromStr for FilterPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "reset" => Ok(FilterPolicy::Reset),
            "preserve" => Ok(FilterPolicy::Preserve),
            _ => anyhow::bail!("Unknown filter policy: {}", s),
        }
    }
}

/// An item a transition should bring into view
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NavTarget {
    Video(String),
    Reading(String),
}

/// Result of the synchronous half of a tab switch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub tab: Tab,

    /// The tab's collection is not loaded yet; call `refresh`
    pub needs_fetch: bool,
}

/// What the active tab is showing
#[derive(Debug, Clone, PartialEq)]
pub enum Panel {
    Loading,

    /// Loaded, but the tab's partition has no items
    Empty,

    Failed(CatalogError),

    Ready(TabView),
}

impl Panel {
    /// Placeholder text for the non-ready states
    pub fn placeholder(&self, tab: Tab) -> Option<&'static str> {
        match self {
            Panel::Loading => Some(view::loading_message(tab)),
            Panel::Empty => Some(view::empty_message(tab)),
            Panel::Failed(_) => Some(view::failure_message(tab)),
            Panel::Ready(_) => None,
        }
    }
}

/// Owns the session's navigation state
pub struct TabController {
    store: Arc<CatalogStore>,
    policy: FilterPolicy,
    active: Tab,
    filters: [Filter; 3],
    visited: HashSet<Tab>,
    scroll: ScrollMemory,
    offset: u32,
    target: Option<NavTarget>,
    directive: ScrollDirective,
    panel: Panel,
}

impl TabController {
    /// Controller on the `Main` tab, nothing loaded yet
    pub fn new(store: Arc<CatalogStore>) -> Self {
        Self {
            store,
            policy: FilterPolicy::default(),
            active: Tab::Main,
            filters: Default::default(),
            visited: HashSet::new(),
            scroll: ScrollMemory::new(),
            offset: 0,
            target: None,
            directive: ScrollDirective::Top,
            panel: Panel::Loading,
        }
    }

    pub fn with_policy(mut self, policy: FilterPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Enter the initial tab
    pub async fn start(&mut self) -> &Panel {
        self.open(Tab::Main, None).await
    }

    /// Switch to `tab` and load whatever it needs
    pub async fn open(&mut self, tab: Tab, target: Option<NavTarget>) -> &Panel {
        self.select(tab, target);
        self.refresh().await
    }

    /// Switch state to `tab` without waiting on the network.
    ///
    /// Saves the scroll offset of the tab being left, applies the filter
    /// policy and, when the collection is already cached, renders right away.
    pub fn select(&mut self, tab: Tab, target: Option<NavTarget>) -> Transition {
        let leaving = self.active;
        self.scroll.record(leaving, self.offset);

        let keep_filters = self.policy == FilterPolicy::Preserve && self.visited.contains(&tab);
        if !keep_filters {
            self.filters[tab.index()] = Filter::new();
        }
        self.visited.insert(tab);

        self.active = tab;
        self.target = target;
        self.offset = match tab {
            Tab::Main => 0,
            _ => self.scroll.restore(tab),
        };

        let needs_fetch = self.store.status(tab.resource()) != LoadStatus::Ready;
        debug!(from = %leaving, to = %tab, needs_fetch, "tab selected");

        if needs_fetch {
            self.panel = Panel::Loading;
        } else {
            self.rerender();
        }
        self.settle_scroll();

        Transition { tab, needs_fetch }
    }

    /// Load the active tab's collection and render it.
    ///
    /// Video tabs render as soon as videos arrive. Readings are only needed
    /// for related-reading links, so they load in the background and are
    /// linked in by [`TabController::link_readings`].
    pub async fn refresh(&mut self) -> &Panel {
        let tab = self.active;
        self.panel = match tab {
            Tab::Main | Tab::Consulting => {
                self.store.prefetch(Resource::Readings);
                match self.store.load_videos().await {
                    Ok(videos) => {
                        let readings = self.store.cached_readings();
                        render(tab, Some(&*videos), readings.as_deref(), self.filter())
                    }
                    Err(e) => Panel::Failed(e),
                }
            }
            Tab::Insights => match self.store.load_readings().await {
                Ok(readings) => render(tab, None, Some(&*readings), self.filter()),
                Err(e) => Panel::Failed(e),
            },
        };
        self.settle_scroll();
        &self.panel
    }

    /// Whether a video tab is still waiting on readings for its links
    pub fn links_pending(&self) -> bool {
        self.active.resource() == Resource::Videos
            && self.store.status(Resource::Readings) != LoadStatus::Ready
    }

    /// Wait for readings and re-render a video tab with its related links.
    ///
    /// A reading failure leaves the view as it is.
    pub async fn link_readings(&mut self) -> &Panel {
        if self.active.resource() != Resource::Videos {
            return &self.panel;
        }
        match self.store.load_readings().await {
            Ok(_) => {
                self.rerender();
                self.settle_scroll();
            }
            Err(e) => {
                warn!(tab = %self.active, error = %e, "rendering without related readings");
            }
        }
        &self.panel
    }

    /// Select a category on the active tab
    pub fn set_category(&mut self, category: impl Into<Category>) {
        let category = category.into();
        debug!(tab = %self.active, %category, "category selected");
        self.filter_mut().category = category;
        self.rerender();
    }

    /// Set the search query on the active tab
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.filter_mut().query = query.into();
        self.rerender();
    }

    /// Back to category `all` and an empty query
    pub fn clear_filters(&mut self) {
        *self.filter_mut() = Filter::new();
        self.rerender();
    }

    /// Track the active tab's current scroll offset
    pub fn record_scroll(&mut self, offset: u32) {
        self.offset = offset;
    }

    pub fn active(&self) -> Tab {
        self.active
    }

    pub fn policy(&self) -> FilterPolicy {
        self.policy
    }

    /// Filter of the active tab
    pub fn filter(&self) -> &Filter {
        &self.filters[self.active.index()]
    }

    pub fn panel(&self) -> &Panel {
        &self.panel
    }

    pub fn scroll_directive(&self) -> &ScrollDirective {
        &self.directive
    }

    /// Pending navigation target, if it is on screen
    pub fn highlighted(&self) -> Option<&NavTarget> {
        match &self.directive {
            ScrollDirective::Item(target) => Some(target),
            _ => None,
        }
    }

    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    fn filter_mut(&mut self) -> &mut Filter {
        &mut self.filters[self.active.index()]
    }

    /// Re-render from cached collections; no-op while the tab is loading
    fn rerender(&mut self) {
        let videos = self.store.cached_videos();
        let readings = self.store.cached_readings();

        let loaded = match self.active.resource() {
            Resource::Videos => videos.is_some(),
            Resource::Readings => readings.is_some(),
        };
        if loaded {
            self.panel = render(
                self.active,
                videos.as_deref(),
                readings.as_deref(),
                self.filter(),
            );
        }
    }

    fn settle_scroll(&mut self) {
        self.directive = match self.active {
            Tab::Main => ScrollDirective::Top,
            _ => match (&self.target, &self.panel) {
                (Some(target), Panel::Ready(view)) if shows(view, target) => {
                    ScrollDirective::Item(target.clone())
                }
                _ => ScrollDirective::Offset(self.offset),
            },
        };
    }
}

/// Build a tab's panel from loaded collections
fn render(
    tab: Tab,
    videos: Option<&Videos>,
    readings: Option<&Readings>,
    filter: &Filter,
) -> Panel {
    match (tab, videos, readings) {
        (Tab::Main, Some(videos), _) if videos.main().is_empty() => Panel::Empty,
        (Tab::Main, Some(videos), readings) => {
            Panel::Ready(TabView::Main(view::main_view(videos, readings, filter)))
        }
        (Tab::Consulting, Some(videos), _) if videos.consulting().is_empty() => Panel::Empty,
        (Tab::Consulting, Some(videos), readings) => {
            Panel::Ready(TabView::Consulting(view::consulting_view(videos, readings, filter)))
        }
        (Tab::Insights, _, Some(readings)) if readings.is_empty() => Panel::Empty,
        (Tab::Insights, _, Some(readings)) => {
            Panel::Ready(TabView::Insights(view::insights_view(readings, filter)))
        }
        _ => Panel::Loading,
    }
}

fn shows(view: &TabView, target: &NavTarget) -> bool {
    match (view, target) {
        (TabView::Consulting(view), NavTarget::Video(id)) => view.contains_video(id),
        (TabView::Insights(view), NavTarget::Reading(id)) => view.contains_reading(id),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{CatalogSource, LoadFailure};
    use async_trait::async_trait;

    const VIDEOS: &str = r#"[
        {"videoId": "m1", "channel": "main", "title": "Pilot", "season": 1, "episode": 1, "tags": ["Cozy"]},
        {"videoId": "m2", "channel": "main", "title": "Finale", "season": 1, "episode": 2, "tags": ["Horror"]},
        {"videoId": "c1", "channel": "consulting", "title": "Economy Review",
         "subjects": [{"title": "Balancing", "startTime": 30, "keywords": ["economy"]}]},
        {"videoId": "c2", "channel": "consulting", "title": "Onboarding"}
    ]"#;

    const READINGS: &str = r#"[
        {"id": "r1", "type": "Article", "title": "Sinks", "description": "", "content": "", "videoId": "c1"},
        {"id": "r2", "type": "Video Essay", "title": "Dread", "description": "", "content": ""}
    ]"#;

    struct StaticSource {
        videos: Option<&'static str>,
        readings: Option<&'static str>,
    }

    #[async_trait]
    impl CatalogSource for StaticSource {
        fn name(&self) -> &str {
            "static"
        }

        async fn fetch(&self, resource: Resource) -> Result<Vec<u8>, LoadFailure> {
            let body = match resource {
                Resource::Videos => self.videos,
                Resource::Readings => self.readings,
            };
            body.map(|b| b.as_bytes().to_vec())
                .ok_or(LoadFailure::Status(404))
        }
    }

    fn controller(videos: Option<&'static str>, readings: Option<&'static str>) -> TabController {
        let store = CatalogStore::new(Arc::new(StaticSource { videos, readings }));
        TabController::new(Arc::new(store))
    }

    #[tokio::test]
    async fn test_starts_on_main() {
        let mut tabs = controller(Some(VIDEOS), Some(READINGS));
        assert_eq!(tabs.active(), Tab::Main);
        assert_eq!(tabs.panel(), &Panel::Loading);

        let panel = tabs.start().await;
        assert!(matches!(panel, Panel::Ready(TabView::Main(_))));
        assert_eq!(tabs.scroll_directive(), &ScrollDirective::Top);
    }

    #[tokio::test]
    async fn test_select_cached_tab_renders_without_fetch() {
        let mut tabs = controller(Some(VIDEOS), Some(READINGS));
        tabs.start().await;

        let transition = tabs.select(Tab::Consulting, None);
        assert!(!transition.needs_fetch);
        assert!(matches!(tabs.panel(), Panel::Ready(TabView::Consulting(_))));
    }

    #[tokio::test]
    async fn test_reset_policy_clears_filters_on_reentry() {
        let mut tabs = controller(Some(VIDEOS), Some(READINGS));
        tabs.open(Tab::Consulting, None).await;
        tabs.set_query("econ");
        assert_eq!(tabs.filter().query, "econ");

        tabs.open(Tab::Main, None).await;
        tabs.open(Tab::Consulting, None).await;
        assert!(tabs.filter().is_passthrough());
    }

    #[tokio::test]
    async fn test_preserve_policy_keeps_filters_on_reentry() {
        let mut tabs = controller(Some(VIDEOS), Some(READINGS)).with_policy(FilterPolicy::Preserve);
        tabs.open(Tab::Insights, None).await;
        tabs.set_category("article");

        tabs.open(Tab::Main, None).await;
        assert!(tabs.filter().is_passthrough());

        tabs.open(Tab::Insights, None).await;
        assert_eq!(tabs.filter().category, Category::new("Article"));
        match tabs.panel() {
            Panel::Ready(TabView::Insights(view)) => assert_eq!(view.cards.len(), 1),
            other => panic!("unexpected panel: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_scroll_restored_except_on_main() {
        let mut tabs = controller(Some(VIDEOS), Some(READINGS));
        tabs.start().await;
        tabs.record_scroll(900);

        tabs.open(Tab::Insights, None).await;
        assert_eq!(tabs.scroll_directive(), &ScrollDirective::Offset(0));
        tabs.record_scroll(240);

        tabs.open(Tab::Main, None).await;
        assert_eq!(tabs.scroll_directive(), &ScrollDirective::Top);

        tabs.open(Tab::Insights, None).await;
        assert_eq!(tabs.scroll_directive(), &ScrollDirective::Offset(240));
    }

    #[tokio::test]
    async fn test_navigation_target_wins_over_saved_offset() {
        let mut tabs = controller(Some(VIDEOS), Some(READINGS));
        tabs.open(Tab::Insights, None).await;
        tabs.record_scroll(500);
        tabs.open(Tab::Main, None).await;

        tabs.open(Tab::Insights, Some(NavTarget::Reading("r2".into()))).await;
        assert_eq!(
            tabs.scroll_directive(),
            &ScrollDirective::Item(NavTarget::Reading("r2".into()))
        );
        assert!(tabs.highlighted().is_some());

        // Unknown targets fall back to the saved offset
        tabs.open(Tab::Insights, Some(NavTarget::Reading("nope".into()))).await;
        assert_eq!(tabs.scroll_directive(), &ScrollDirective::Offset(500));
    }

    #[tokio::test]
    async fn test_failure_is_local_to_tab() {
        let mut tabs = controller(Some(VIDEOS), None);

        let panel = tabs.open(Tab::Insights, None).await;
        assert!(matches!(panel, Panel::Failed(_)));
        assert_eq!(
            panel.placeholder(Tab::Insights),
            Some("Failed to load insights. Please try again later.")
        );

        // Videos still render, just without related readings
        tabs.open(Tab::Consulting, None).await;
        match tabs.link_readings().await {
            Panel::Ready(TabView::Consulting(view)) => {
                assert_eq!(view.rows.len(), 2);
                assert!(view.rows.iter().all(|r| r.related_reading.is_none()));
            }
            other => panic!("unexpected panel: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_partition() {
        let mut tabs = controller(Some("[]"), Some("[]"));
        let panel = tabs.start().await;
        assert_eq!(panel, &Panel::Empty);
        assert_eq!(
            panel.placeholder(Tab::Main),
            Some("No videos found for this channel yet.")
        );
    }

    #[test]
    fn test_tab_parse() {
        assert_eq!("Consulting".parse::<Tab>().unwrap(), Tab::Consulting);
        assert_eq!("readings".parse::<Tab>().unwrap(), Tab::Insights);
        assert!("shop".parse::<Tab>().is_err());
        assert_eq!("preserve".parse::<FilterPolicy>().unwrap(), FilterPolicy::Preserve);
    }
}

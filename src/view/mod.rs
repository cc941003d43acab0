//! Render layer: pure functions from loaded collections to view-models.
//!
//! Nothing here fetches or mutates; it sits strictly downstream of the
//! filter engine.

pub mod cards;
pub mod player;

use serde::Serialize;

pub use cards::{
    ConsultingRow, ConsultingView, InsightsView, MainView, ReadingCard, SeasonSection, VideoCard,
};
pub use player::{embed_url, episode_badge, format_time, thumbnail_url, watch_url};

use crate::core::Tab;
use crate::domain::Category;
use crate::library::catalog::{Readings, Videos};
use crate::library::filter::{self, Filter};
use crate::library::seasons::{group_by_season, latest_episode};

/// Rendered content of one tab
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "tab", rename_all = "snake_case")]
pub enum TabView {
    Main(MainView),
    Consulting(ConsultingView),
    Insights(InsightsView),
}

impl TabView {
    /// Selectable categories for the tab, `all` first
    pub fn categories(&self) -> &[Category] {
        match self {
            TabView::Main(view) => &view.categories,
            TabView::Consulting(view) => &view.categories,
            TabView::Insights(view) => &view.categories,
        }
    }

    /// Whether the filters left nothing to show
    pub fn is_empty(&self) -> bool {
        match self {
            TabView::Main(view) => view.card_count() == 0,
            TabView::Consulting(view) => view.rows.is_empty(),
            TabView::Insights(view) => view.cards.is_empty(),
        }
    }
}

/// Season-grouped main channel
pub fn main_view(videos: &Videos, readings: Option<&Readings>, filter: &Filter) -> MainView {
    let main = videos.main();
    let filtered = filter::apply(main.iter().copied(), filter);

    MainView {
        latest: latest_episode(main.iter().copied()).map(|v| VideoCard::new(v, readings)),
        sections: group_by_season(filtered)
            .iter()
            .map(|group| SeasonSection::new(group, readings))
            .collect(),
        categories: filter::category_options(main.iter().copied()),
    }
}

/// Consulting rows for the current filter
pub fn consulting_view(
    videos: &Videos,
    readings: Option<&Readings>,
    filter: &Filter,
) -> ConsultingView {
    let consulting = videos.consulting();

    ConsultingView {
        rows: filter::consulting_hits(consulting.iter().copied(), filter)
            .iter()
            .map(|hit| ConsultingRow::new(hit, readings))
            .collect(),
        categories: filter::category_options(consulting.iter().copied()),
    }
}

/// Insight cards for the current filter
pub fn insights_view(readings: &Readings, filter: &Filter) -> InsightsView {
    InsightsView {
        cards: filter::apply(readings.all(), filter)
            .into_iter()
            .map(ReadingCard::new)
            .collect(),
        categories: filter::category_options(readings.all()),
    }
}

/// Placeholder while a tab's catalog is loading
pub fn loading_message(tab: Tab) -> &'static str {
    match tab {
        Tab::Main => "Loading videos...",
        Tab::Consulting => "Loading consulting data...",
        Tab::Insights => "Loading insights...",
    }
}

/// Placeholder when a tab's catalog loaded but has nothing in it
pub fn empty_message(tab: Tab) -> &'static str {
    match tab {
        Tab::Main => "No videos found for this channel yet.",
        Tab::Consulting => "No consulting videos found yet.",
        Tab::Insights => "No insights published yet.",
    }
}

/// Placeholder when a tab's catalog failed to load
pub fn failure_message(tab: Tab) -> &'static str {
    match tab {
        Tab::Main => "Failed to load videos. Please try again later.",
        Tab::Consulting => "Failed to load consulting data. Please try again later.",
        Tab::Insights => "Failed to load insights. Please try again later.",
    }
}

/// Shown when a loaded catalog has items but none pass the filter
pub const NO_RESULTS: &str = "No results match the current filters.";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Channel, Reading, Subject, Video};

    fn catalog() -> Videos {
        Videos::from_records(vec![
            Video::new("m1", Channel::Main, "Pilot")
                .with_episode(Some(1), Some(1))
                .with_tag("Cozy"),
            Video::new("m2", Channel::Main, "Finale")
                .with_episode(Some(2), Some(8))
                .with_tag("Roguelike"),
            Video::new("m3", Channel::Main, "Bonus"),
            Video::new("c1", Channel::Consulting, "Economy Review")
                .with_subject(Subject::new("Balancing", 30, ["economy"])),
        ])
        .unwrap()
    }

    #[test]
    fn test_main_view_groups_and_features_latest() {
        let view = main_view(&catalog(), None, &Filter::new());

        let headings: Vec<&str> = view.sections.iter().map(|s| s.heading.as_str()).collect();
        assert_eq!(headings, vec!["Season 2", "Season 1", "Unsorted Episodes"]);
        assert_eq!(view.latest.as_ref().unwrap().video_id, "m2");
        assert_eq!(view.card_count(), 3);
        assert!(!view.contains_video("c1"));
    }

    #[test]
    fn test_main_view_filter_keeps_latest_and_options() {
        let view = main_view(&catalog(), None, &Filter::new().with_category("cozy"));

        assert_eq!(view.card_count(), 1);
        assert!(view.contains_video("m1"));
        // The featured episode and the category list come from the full channel
        assert_eq!(view.latest.as_ref().unwrap().video_id, "m2");
        assert_eq!(view.categories.len(), 3);
    }

    #[test]
    fn test_season_zero_is_unsorted() {
        let videos = Videos::parse(
            br#"[{"videoId": "z", "channel": "main", "title": "Special",
                  "season": 0, "episode": 0},
                 {"videoId": "p", "channel": "main", "title": "Pilot",
                  "season": 1, "episode": 1}]"#,
        )
        .unwrap();

        let view = main_view(&videos, None, &Filter::new());
        let headings: Vec<&str> = view.sections.iter().map(|s| s.heading.as_str()).collect();
        assert_eq!(headings, vec!["Season 1", "Unsorted Episodes"]);
        assert_eq!(view.sections[1].cards[0].badge, None);
        assert_eq!(view.latest.as_ref().unwrap().video_id, "p");
    }

    #[test]
    fn test_consulting_view_only_consulting_channel() {
        let view = consulting_view(&catalog(), None, &Filter::new());
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.rows[0].video_id, "c1");
        assert_eq!(view.rows[0].display_time, "0:00");
    }

    #[test]
    fn test_insights_view() {
        let readings = Readings::from_records(vec![
            Reading::new("r1", "Article", "One"),
            Reading::new("r2", "Video Essay", "Two"),
        ])
        .unwrap();

        let view = insights_view(&readings, &Filter::new().with_category("video essay"));
        assert_eq!(view.cards.len(), 1);
        assert!(view.contains_reading("r2"));
        assert_eq!(view.categories.len(), 3);
    }

    #[test]
    fn test_messages_are_distinct_per_state() {
        for tab in Tab::ALL {
            assert_ne!(loading_message(tab), empty_message(tab));
            assert_ne!(empty_message(tab), failure_message(tab));
        }
    }
}

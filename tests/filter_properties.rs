//! Filter Engine Property Tests
//!
//! Soundness, identity and monotonic narrowing. Generated catalogs and
//! queries cover the general case; the fixture catalogs pin known examples.

mod common;

use goc::library::filter::{self, Searchable};
use goc::library::group_by_season;
use goc::{Category, Channel, Filter, Reading, Readings, Subject, Video, Videos};
use proptest::prelude::*;
use proptest::test_runner::Config;

const QUERIES: &[&str] = &[
    "", "   ", "e", "ECON", "econ", "gold", "night", "review", "pacing", "hook", "zzz", " shift",
];

fn fixtures() -> (Videos, Readings) {
    (
        Videos::parse(common::VIDEOS.as_bytes()).unwrap(),
        Readings::parse(common::READINGS.as_bytes()).unwrap(),
    )
}

fn video_ids<'a>(items: &[&'a Video]) -> Vec<&'a str> {
    items.iter().map(|v| v.video_id.as_str()).collect()
}

fn reading_ids<'a>(items: &[&'a Reading]) -> Vec<&'a str> {
    items.iter().map(|r| r.id.as_str()).collect()
}

/// Every item of `part` is one of the items of `whole`
fn is_subset<T>(part: &[&T], whole: &[&T]) -> bool {
    part.iter().all(|p| whole.iter().any(|w| std::ptr::eq(*p, *w)))
}

fn video_text(video: &Video) -> Vec<String> {
    let mut text = vec![video.title.to_lowercase()];
    for subject in &video.subjects {
        text.push(subject.title.to_lowercase());
        text.extend(subject.keywords.iter().map(|k| k.to_lowercase()));
    }
    text
}

#[test]
fn test_text_filter_soundness() {
    let (videos, readings) = fixtures();

    for query in QUERIES.iter().filter(|q| !q.trim().is_empty()) {
        let needle = query.to_lowercase();

        for video in filter::by_text(videos.all(), query) {
            assert!(
                video_text(video).iter().any(|t| t.contains(&needle)),
                "{} matched {:?} without containing it",
                video.video_id,
                query
            );
        }

        for reading in filter::by_text(readings.all(), query) {
            let fields = [&reading.title, &reading.description, &reading.content];
            assert!(
                fields.iter().any(|f| f.to_lowercase().contains(&needle)),
                "{} matched {:?} without containing it",
                reading.id,
                query
            );
        }
    }
}

#[test]
fn test_text_filter_is_complete() {
    let (videos, _) = fixtures();

    for query in QUERIES.iter().filter(|q| !q.trim().is_empty()) {
        let needle = query.to_lowercase();
        let expected: Vec<&str> = videos
            .all()
            .iter()
            .filter(|v| video_text(v).iter().any(|t| t.contains(&needle)))
            .map(|v| v.video_id.as_str())
            .collect();
        let actual: Vec<&str> = filter::by_text(videos.all(), query)
            .iter()
            .map(|v| v.video_id.as_str())
            .collect();
        assert_eq!(actual, expected, "query {:?}", query);
    }
}

#[test]
fn test_all_category_is_identity() {
    let (videos, readings) = fixtures();

    let kept = filter::by_category(videos.all(), &Category::all());
    assert_eq!(kept.len(), videos.len());
    assert!(kept.iter().zip(videos.all()).all(|(a, b)| std::ptr::eq(*a, b)));

    let kept = filter::by_category(readings.all(), &Category::new("ALL"));
    assert_eq!(kept.len(), readings.len());
    assert!(kept.iter().zip(readings.all()).all(|(a, b)| std::ptr::eq(*a, b)));
}

#[test]
fn test_blank_query_is_identity() {
    let (videos, _) = fixtures();
    for query in ["", " ", "\t"] {
        assert_eq!(filter::by_text(videos.all(), query).len(), videos.len());
    }
}

#[test]
fn test_text_after_category_narrows() {
    let (videos, readings) = fixtures();

    for category in filter::category_options(videos.all()) {
        let by_category = filter::by_category(videos.all(), &category);
        for query in QUERIES {
            let filter = Filter::new().with_category(category.clone()).with_query(*query);
            let both = filter::apply(videos.all(), &filter);
            assert!(both.len() <= by_category.len());
            assert!(both.iter().all(|v| by_category.iter().any(|c| std::ptr::eq(*c, *v))));
            assert!(both.iter().all(|v| v.in_category(&category)));
        }
    }

    for category in filter::category_options(readings.all()) {
        let by_category = filter::by_category(readings.all(), &category);
        for query in QUERIES {
            let filter = Filter::new().with_category(category.clone()).with_query(*query);
            let both = filter::apply(readings.all(), &filter);
            assert!(both.iter().all(|r| by_category.iter().any(|c| std::ptr::eq(*c, *r))));
        }
    }
}

#[test]
fn test_filtering_is_deterministic() {
    let (videos, _) = fixtures();
    let filter = Filter::new().with_category("cozy").with_query("i");

    let first = video_ids(&filter::apply(videos.all(), &filter));
    let second = video_ids(&filter::apply(videos.all(), &filter));
    assert_eq!(first, second);
    assert_eq!(first, vec!["m1", "m2"]);
}

#[test]
fn test_season_grouping_orders() {
    let videos = Videos::parse(
        br#"[{"videoId": "s1", "channel": "main", "title": "a", "season": 1},
             {"videoId": "s2", "channel": "main", "title": "b", "season": 2},
             {"videoId": "u", "channel": "main", "title": "c"},
             {"videoId": "s3", "channel": "main", "title": "d", "season": 3},
             {"videoId": "e5", "channel": "main", "title": "e", "season": 4, "episode": 5},
             {"videoId": "e2", "channel": "main", "title": "f", "season": 4, "episode": 2},
             {"videoId": "e0", "channel": "main", "title": "g", "season": 4},
             {"videoId": "e3", "channel": "main", "title": "h", "season": 4, "episode": 3}]"#,
    )
    .unwrap();

    let groups = group_by_season(videos.all());
    let headings: Vec<String> = groups.iter().map(|g| g.key.heading()).collect();
    assert_eq!(
        headings,
        vec!["Season 4", "Season 3", "Season 2", "Season 1", "Unsorted Episodes"]
    );

    let season_four: Vec<&str> = groups[0].videos.iter().map(|v| v.video_id.as_str()).collect();
    assert_eq!(season_four, vec!["e0", "e2", "e3", "e5"]);
}

fn reading_text(reading: &Reading) -> [String; 3] {
    [
        reading.title.to_lowercase(),
        reading.description.to_lowercase(),
        reading.content.to_lowercase(),
    ]
}

fn arb_text() -> impl Strategy<Value = String> {
    "[a-zA-Z ]{0,12}"
}

fn arb_query() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-eA-E]{1,2}",
        "[a-zA-Z ]{0,4}",
        "[ \t]{0,3}",
    ]
}

fn arb_tag() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["Cozy", "cozy", "COZY", "Horror", "horror", "Economy", "UX", "ux"])
        .prop_map(String::from)
}

fn arb_kind() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["Article", "article", "Video Essay", "VIDEO ESSAY", "Interview"])
        .prop_map(String::from)
}

fn arb_category() -> impl Strategy<Value = Category> {
    prop::sample::select(vec![
        "all", "ALL", "cozy", "Horror", "economy", "ux", "Article", "video essay", "missing",
    ])
    .prop_map(Category::new)
}

fn arb_subject() -> impl Strategy<Value = Subject> {
    (arb_text(), 0u32..3600, prop::collection::vec(arb_text(), 0..3))
        .prop_map(|(title, start, keywords)| Subject::new(title, start, keywords))
}

fn arb_videos() -> impl Strategy<Value = Videos> {
    let record = (
        any::<bool>(),
        arb_text(),
        prop::collection::vec(arb_tag(), 0..3),
        prop::collection::vec(arb_subject(), 0..3),
    );
    prop::collection::vec(record, 0..12).prop_map(|records| {
        let items = records
            .into_iter()
            .enumerate()
            .map(|(i, (main, title, tags, subjects))| {
                let channel = if main { Channel::Main } else { Channel::Consulting };
                let mut video = Video::new(format!("v{}", i), channel, title);
                video.tags = tags.into_iter().map(Category::new).collect();
                video.subjects = subjects;
                video
            })
            .collect();
        Videos::from_records(items).expect("generated ids are unique")
    })
}

fn arb_readings() -> impl Strategy<Value = Readings> {
    let record = (arb_kind(), arb_text(), arb_text(), arb_text());
    prop::collection::vec(record, 0..12).prop_map(|records| {
        let items = records
            .into_iter()
            .enumerate()
            .map(|(i, (kind, title, description, content))| {
                Reading::new(format!("r{}", i), kind, title)
                    .with_description(description)
                    .with_content(content)
            })
            .collect();
        Readings::from_records(items).expect("generated ids are unique")
    })
}

proptest! {
    #![proptest_config(Config::with_cases(128))]

    #[test]
    fn text_filter_keeps_exactly_the_matching_videos(videos in arb_videos(), query in arb_query()) {
        let needle = query.to_lowercase();
        let expected: Vec<&str> = videos
            .all()
            .iter()
            .filter(|v| {
                query.trim().is_empty() || video_text(v).iter().any(|t| t.contains(&needle))
            })
            .map(|v| v.video_id.as_str())
            .collect();
        prop_assert_eq!(video_ids(&filter::by_text(videos.all(), &query)), expected);
    }

    #[test]
    fn text_filter_keeps_exactly_the_matching_readings(
        readings in arb_readings(),
        query in arb_query()
    ) {
        let needle = query.to_lowercase();
        let expected: Vec<&str> = readings
            .all()
            .iter()
            .filter(|r| {
                query.trim().is_empty() || reading_text(r).iter().any(|t| t.contains(&needle))
            })
            .map(|r| r.id.as_str())
            .collect();
        prop_assert_eq!(reading_ids(&filter::by_text(readings.all(), &query)), expected);
    }

    #[test]
    fn all_category_and_blank_query_keep_everything(
        videos in arb_videos(),
        readings in arb_readings(),
        blank in "[ \t]{0,4}"
    ) {
        let kept = filter::apply(videos.all(), &Filter::new().with_query(blank.clone()));
        prop_assert_eq!(kept.len(), videos.len());
        prop_assert!(kept.iter().zip(videos.all()).all(|(a, b)| std::ptr::eq(*a, b)));

        let kept = filter::apply(readings.all(), &Filter::new().with_query(blank));
        prop_assert_eq!(kept.len(), readings.len());
        prop_assert!(kept.iter().zip(readings.all()).all(|(a, b)| std::ptr::eq(*a, b)));
    }

    #[test]
    fn category_keeps_only_members(
        videos in arb_videos(),
        readings in arb_readings(),
        category in arb_category()
    ) {
        for video in filter::by_category(videos.all(), &category) {
            prop_assert!(category.is_all() || video.tags.contains(&category));
        }
        for reading in filter::by_category(readings.all(), &category) {
            prop_assert!(category.is_all() || reading.kind == category);
        }
    }

    #[test]
    fn text_after_category_narrows(
        videos in arb_videos(),
        readings in arb_readings(),
        category in arb_category(),
        query in arb_query()
    ) {
        let filter = Filter::new().with_category(category.clone()).with_query(query.clone());

        let both = filter::apply(videos.all(), &filter);
        prop_assert!(is_subset(&both, &filter::by_category(videos.all(), &category)));
        prop_assert!(is_subset(&both, &filter::by_text(videos.all(), &query)));

        let both = filter::apply(readings.all(), &filter);
        prop_assert!(is_subset(&both, &filter::by_category(readings.all(), &category)));
        prop_assert!(is_subset(&both, &filter::by_text(readings.all(), &query)));
    }

    #[test]
    fn longer_query_never_widens(
        videos in arb_videos(),
        readings in arb_readings(),
        query in arb_query(),
        extra in "[a-zA-Z]{1,3}"
    ) {
        let longer = format!("{}{}", query, extra);

        let narrow = filter::by_text(videos.all(), &longer);
        prop_assert!(is_subset(&narrow, &filter::by_text(videos.all(), &query)));

        let narrow = filter::by_text(readings.all(), &longer);
        prop_assert!(is_subset(&narrow, &filter::by_text(readings.all(), &query)));
    }

    #[test]
    fn filtering_is_deterministic(
        videos in arb_videos(),
        category in arb_category(),
        query in arb_query()
    ) {
        let filter = Filter::new().with_category(category).with_query(query);
        prop_assert_eq!(
            video_ids(&filter::apply(videos.all(), &filter)),
            video_ids(&filter::apply(videos.all(), &filter))
        );
    }
}

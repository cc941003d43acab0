//! Category and free-text filtering.
//!
//! Everything here is a pure function of its inputs: the same collection and
//! filter always produce the same items in the same (catalog) order.

use crate::domain::{Category, Reading, Subject, Video};

/// Selected category plus free-text query for one view
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    /// Selected category; `all` passes everything
    pub category: Category,

    /// Raw query as typed
    pub query: String,
}

impl Filter {
    /// Filter that passes everything through
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a category
    pub fn with_category(mut self, category: impl Into<Category>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the free-text query
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Lower-cased query, or `None` when the query is blank
    pub fn needle(&self) -> Option<String> {
        needle(&self.query)
    }

    /// Whether this filter keeps every item
    pub fn is_passthrough(&self) -> bool {
        self.category.is_all() && self.needle().is_none()
    }
}

/// Something the filter engine can narrow
pub trait Searchable {
    /// Categories this item belongs to
    fn categories(&self) -> Vec<&Category>;

    /// Whether a lower-cased needle occurs in the item's searchable text
    fn matches_text(&self, needle: &str) -> bool;

    /// Whether the item belongs to a category
    fn in_category(&self, category: &Category) -> bool {
        category.is_all() || self.categories().into_iter().any(|c| c == category)
    }
}

impl Searchable for Video {
    fn categories(&self) -> Vec<&Category> {
        self.tags.iter().collect()
    }

    fn matches_text(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.subjects.iter().any(|s| s.matches(needle))
    }
}

impl Searchable for Reading {
    fn categories(&self) -> Vec<&Category> {
        vec![&self.kind]
    }

    fn matches_text(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self.content.to_lowercase().contains(needle)
    }
}

fn needle(query: &str) -> Option<String> {
    if query.trim().is_empty() {
        None
    } else {
        Some(query.to_lowercase())
    }
}

/// Keep items in the selected category
pub fn by_category<'a, T, I>(items: I, category: &Category) -> Vec<&'a T>
where
    T: Searchable + 'a,
    I: IntoIterator<Item = &'a T>,
{
    items.into_iter().filter(|item| item.in_category(category)).collect()
}

/// Keep items whose text contains the query (case-insensitive)
pub fn by_text<'a, T, I>(items: I, query: &str) -> Vec<&'a T>
where
    T: Searchable + 'a,
    I: IntoIterator<Item = &'a T>,
{
    match needle(query) {
        None => items.into_iter().collect(),
        Some(needle) => items
            .into_iter()
            .filter(|item| item.matches_text(&needle))
            .collect(),
    }
}

/// Category first, then text, on the narrowed set
pub fn apply<'a, T, I>(items: I, filter: &Filter) -> Vec<&'a T>
where
    T: Searchable + 'a,
    I: IntoIterator<Item = &'a T>,
{
    by_text(by_category(items, &filter.category), &filter.query)
}

/// Selectable categories: `all`, then each distinct category in first-seen order
pub fn category_options<'a, T, I>(items: I) -> Vec<Category>
where
    T: Searchable + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut options = vec![Category::all()];
    for item in items {
        for category in item.categories() {
            if !options.contains(category) {
                options.push(category.clone());
            }
        }
    }
    options
}

/// One consulting search row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubjectHit<'a> {
    pub video: &'a Video,

    /// The matching chapter, if the row points into the video
    pub subject: Option<&'a Subject>,
}

impl SubjectHit<'_> {
    /// Seconds into the video where playback should start
    pub fn start_time(&self) -> u32 {
        self.subject.map(|s| s.start_time).unwrap_or(0)
    }
}

/// Consulting rows: one per matching subject when a query is set.
///
/// Without a query every video yields a single row at 0:00. With a query,
/// each matching subject is its own row carrying its start time; a video
/// that matches only by title yields one row at 0:00.
pub fn consulting_hits<'a, I>(videos: I, filter: &Filter) -> Vec<SubjectHit<'a>>
where
    I: IntoIterator<Item = &'a Video>,
{
    let in_category = by_category(videos, &filter.category);

    let Some(needle) = filter.needle() else {
        return in_category
            .into_iter()
            .map(|video| SubjectHit { video, subject: None })
            .collect();
    };

    let mut hits = Vec::new();
    for video in in_category {
        let before = hits.len();
        hits.extend(
            video
                .subjects
                .iter()
                .filter(|s| s.matches(&needle))
                .map(|subject| SubjectHit {
                    video,
                    subject: Some(subject),
                }),
        );

        if hits.len() == before && video.title.to_lowercase().contains(&needle) {
            hits.push(SubjectHit { video, subject: None });
        }
    }
    hits
}

//! Season grouping for the main-channel view.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::domain::Video;

/// A season bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeasonKey {
    Numbered(u32),

    /// Videos without a season number
    Unsorted,
}

impl SeasonKey {
    /// Bucket for a video
    pub fn of(video: &Video) -> Self {
        video.season.map(SeasonKey::Numbered).unwrap_or(SeasonKey::Unsorted)
    }

    /// Section heading
    pub fn heading(&self) -> String {
        match self {
            SeasonKey::Numbered(n) => format!("Season {}", n),
            SeasonKey::Unsorted => "Unsorted Episodes".to_string(),
        }
    }
}

/// Display order: newest numbered season first, `Unsorted` always last
impl Ord for SeasonKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SeasonKey::Numbered(a), SeasonKey::Numbered(b)) => b.cmp(a),
            (SeasonKey::Numbered(_), SeasonKey::Unsorted) => Ordering::Less,
            (SeasonKey::Unsorted, SeasonKey::Numbered(_)) => Ordering::Greater,
            (SeasonKey::Unsorted, SeasonKey::Unsorted) => Ordering::Equal,
        }
    }
}

impl PartialOrd for SeasonKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Videos of one season, ordered by episode
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonGroup<'a> {
    pub key: SeasonKey,
    pub videos: Vec<&'a Video>,
}

/// Group videos by season in display order.
///
/// Within a season videos are sorted ascending by episode, with a missing
/// episode ordered as episode 0. The sort is stable, so ties keep catalog
/// order.
pub fn group_by_season<'a, I>(videos: I) -> Vec<SeasonGroup<'a>>
where
    I: IntoIterator<Item = &'a Video>,
{
    let mut buckets: BTreeMap<SeasonKey, Vec<&'a Video>> = BTreeMap::new();
    for video in videos {
        buckets.entry(SeasonKey::of(video)).or_default().push(video);
    }

    buckets
        .into_iter()
        .map(|(key, mut videos)| {
            videos.sort_by_key(|v| v.episode.unwrap_or(0));
            SeasonGroup { key, videos }
        })
        .collect()
}

/// The most recent episode: highest season, then highest episode.
///
/// Missing season or episode numbers rank below any present number. Among
/// exact ties the earliest video in catalog order wins.
pub fn latest_episode<'a, I>(videos: I) -> Option<&'a Video>
where
    I: IntoIterator<Item = &'a Video>,
{
    videos.into_iter().fold(None, |best: Option<&'a Video>, video| match best {
        Some(current) if (video.season, video.episode) <= (current.season, current.episode) => {
            Some(current)
        }
        _ => Some(video),
    })
}

//! The session's content library.
//!
//! Holds the two catalogs once fetched and answers every question the views
//! ask of them.
//!
//! # Layout
//!
//! ```text
//! CatalogStore              # one cache slot per resource, shared in-flight loads
//! ├── Videos                # data/videos.json, indexed by videoId
//! │   ├── main()            # derived partition, catalog order
//! │   └── consulting()
//! └── Readings              # data/readings.json, indexed by id and videoId
//!
//! filter::apply             # category, then text
//! filter::consulting_hits   # one row per matching subject
//! seasons::group_by_season  # newest season first, Unsorted last
//! ```

pub mod catalog;
pub mod filter;
pub mod seasons;
pub mod store;

pub use catalog::{Readings, Videos};
pub use filter::{Filter, Searchable, SubjectHit};
pub use seasons::{group_by_season, latest_episode, SeasonGroup, SeasonKey};
pub use store::{CatalogError, CatalogStore, LoadStatus, DEFAULT_FETCH_TIMEOUT};

//! goc - content catalog for the Games Over Coffee site
//!
//! Loads the site's two static catalogs (videos and readings), filters and
//! searches them, and drives the three-tab browsing surface as plain
//! view-models that any renderer can draw.
//!
//! # Architecture
//!
//! Data flows one way:
//! - A `CatalogSource` fetches `data/videos.json` and `data/readings.json`
//! - The `CatalogStore` caches each collection once per session, sharing
//!   in-flight loads between callers
//! - The filter engine narrows a collection by category, then by text
//! - The render layer turns filtered collections into view-models
//! - The `TabController` owns all navigation state and ties it together
//!
//! # Modules
//!
//! - `adapters`: Catalog sources (HTTP, local directory)
//! - `domain`: Records (Video, Subject, Reading, Category)
//! - `library`: Catalog store, filter engine, season grouping
//! - `core`: Tab controller, scroll memory, modal coordinator
//! - `view`: View-models and player links
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Consulting rows mentioning "econ", deep-linked to each subject
//! goc --data-dir ./site consulting --query econ
//!
//! # Articles only
//! goc insights --type Article
//!
//! # Interactive session
//! goc browse
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod library;
pub mod view;

// Re-export main types at crate root for convenience
pub use adapters::{CatalogSource, FileSource, HttpSource, LoadFailure, Resource, ResourcePaths};
pub use crate::core::{
    FilterPolicy, ModalCoordinator, NavTarget, Panel, ScrollDirective, Tab, TabController,
};
pub use domain::{Category, Channel, Reading, Subject, Video};
pub use library::{CatalogError, CatalogStore, Filter, LoadStatus, Readings, Videos};
pub use view::TabView;

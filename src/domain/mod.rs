//! Domain types for the content catalog.
//!
//! This module contains the records read from the two JSON catalogs:
//! - Video: episodes and consulting clips, with timestamped subjects
//! - Reading: written insights cross-referenced to a video
//! - Category: case-insensitive tag/type labels

pub mod category;
pub mod reading;
pub mod video;

// Re-export commonly used types
pub use category::{Category, ALL};
pub use reading::{Reading, DEFAULT_LINK_TEXT};
pub use video::{Channel, Subject, Video};

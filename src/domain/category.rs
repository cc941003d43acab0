//! Case-insensitive category labels.
//!
//! Video tags and reading types are both categories. The lower-cased key is
//! computed once at ingestion and used for every comparison; the label keeps
//! the author's spelling for display.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Sentinel category that passes every item through a filter
pub const ALL: &str = "all";

/// A normalized category (tag or reading type)
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Category {
    /// Display label as written in the catalog (trimmed)
    label: String,

    /// Lower-cased comparison key
    key: String,
}

impl Category {
    /// Create a category from a raw label
    pub fn new(label: impl Into<String>) -> Self {
        let label = label.into().trim().to_string();
        let key = label.to_lowercase();
        Self { label, key }
    }

    /// The sentinel "all" category
    pub fn all() -> Self {
        Self::new(ALL)
    }

    /// Whether this is the pass-everything sentinel
    pub fn is_all(&self) -> bool {
        self.key == ALL
    }

    /// Lower-cased comparison key
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Label as written in the catalog
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Case-insensitive comparison against a raw string
    pub fn matches(&self, other: &str) -> bool {
        self.key == other.trim().to_lowercase()
    }
}

impl Default for Category {
    fn default() -> Self {
        Self::all()
    }
}

impl PartialEq for Category {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Hash for Category {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl From<String> for Category {
    fn from(label: String) -> Self {
        Self::new(label)
    }
}

impl From<&str> for Category {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.label
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label)
    }
}

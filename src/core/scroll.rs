//! Per-tab scroll memory.

use std::collections::HashMap;

use super::tabs::{NavTarget, Tab};

/// Where the view should scroll after a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrollDirective {
    Top,

    /// Restore a saved offset
    Offset(u32),

    /// Bring a specific item into view and highlight it
    Item(NavTarget),
}

/// Last offset seen on each tab before the user left it
#[derive(Debug, Clone, Default)]
pub struct ScrollMemory {
    offsets: HashMap<Tab, u32>,
}

impl ScrollMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember the offset a tab was left at
    pub fn record(&mut self, tab: Tab, offset: u32) {
        self.offsets.insert(tab, offset);
    }

    /// Offset to restore on re-entry (0 for a tab never left)
    pub fn restore(&self, tab: Tab) -> u32 {
        self.offsets.get(&tab).copied().unwrap_or(0)
    }
}

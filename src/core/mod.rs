//! Session state for the browsing surface.
//!
//! This module contains:
//! - TabController: the Main/Consulting/Insights state machine
//! - ScrollMemory: per-tab scroll offsets
//! - ModalCoordinator: open video and reading overlays

pub mod modal;
pub mod scroll;
pub mod tabs;

pub use modal::{ModalCoordinator, ReadingModal, VideoModal};
pub use scroll::{ScrollDirective, ScrollMemory};
pub use tabs::{FilterPolicy, NavTarget, Panel, Tab, TabController, Transition};

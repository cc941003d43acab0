//! Command-line interface for goc.
//!
//! Provides one-shot commands for each tab, detail views for a single video
//! or reading, and an interactive browsing session.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use crate::config::{self, Overrides, ResolvedConfig};
use crate::core::{FilterPolicy, ModalCoordinator, Panel, Tab, TabController};
use crate::view;

pub mod browse;
pub mod print;

/// goc - Games Over Coffee catalog browser
#[derive(Parser, Debug)]
#[command(name = "goc")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Site base URL (wins over --data-dir)
    #[arg(long, global = true, env = "GOC_BASE_URL")]
    pub base_url: Option<String>,

    /// Site root directory holding data/*.json
    #[arg(long, global = true, env = "GOC_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Fetch timeout in seconds
    #[arg(long, global = true, env = "GOC_FETCH_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Print view-models as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Main channel, grouped by season
    Main {
        /// Category (tag) to show
        #[arg(short, long)]
        category: Option<String>,

        /// Search query
        #[arg(short, long)]
        query: Option<String>,
    },

    /// Consulting videos, one row per matching subject
    Consulting {
        /// Category (tag) to show
        #[arg(short, long)]
        category: Option<String>,

        /// Search query
        #[arg(short, long)]
        query: Option<String>,
    },

    /// Written insights
    Insights {
        /// Reading type to show (e.g. "Article")
        #[arg(short = 't', long = "type")]
        kind: Option<String>,

        /// Search query
        #[arg(short, long)]
        query: Option<String>,
    },

    /// Show one video and its related reading
    Video {
        /// Video ID
        video_id: String,

        /// Start playback at this many seconds
        #[arg(short, long, default_value = "0")]
        start: u32,
    },

    /// Show one reading
    Reading {
        /// Reading ID
        id: String,
    },

    /// List the selectable categories of a tab
    Categories {
        #[arg(value_enum)]
        tab: TabArg,
    },

    /// Browse interactively (commands on stdin)
    Browse {
        /// Whether tabs keep their filters when revisited
        #[arg(long, value_enum)]
        policy: Option<PolicyArg>,
    },

    /// Show resolved configuration (debug)
    Config,
}

/// Tab for CLI (maps to Tab)
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TabArg {
    Main,
    Consulting,
    Insights,
}

impl From<TabArg> for Tab {
    fn from(t: TabArg) -> Self {
        match t {
            TabArg::Main => Tab::Main,
            TabArg::Consulting => Tab::Consulting,
            TabArg::Insights => Tab::Insights,
        }
    }
}

/// Filter policy for CLI (maps to FilterPolicy)
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PolicyArg {
    /// Clear filters on every tab entry
    Reset,

    /// Keep a visited tab's filters
    Preserve,
}

impl From<PolicyArg> for FilterPolicy {
    fn from(p: PolicyArg) -> Self {
        match p {
            PolicyArg::Reset => FilterPolicy::Reset,
            PolicyArg::Preserve => FilterPolicy::Preserve,
        }
    }
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            base_url: self.base_url.clone(),
            data_dir: self.data_dir.clone(),
            timeout_seconds: self.timeout,
        }
    }

    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        let cfg = config::config()?.clone().with_overrides(&self.overrides())?;
        let json = self.json;

        match self.command {
            Commands::Main { category, query } => {
                show_tab(&cfg, Tab::Main, category, query, json).await
            }
            Commands::Consulting { category, query } => {
                show_tab(&cfg, Tab::Consulting, category, query, json).await
            }
            Commands::Insights { kind, query } => {
                show_tab(&cfg, Tab::Insights, kind, query, json).await
            }
            Commands::Video { video_id, start } => {
                show_video(&cfg, &video_id, start, json).await
            }
            Commands::Reading { id } => {
                show_reading(&cfg, &id, json).await
            }
            Commands::Categories { tab } => {
                list_categories(&cfg, tab.into(), json).await
            }
            Commands::Browse { policy } => {
                browse_session(&cfg, policy, json).await
            }
            Commands::Config => {
                show_config(&cfg)
            }
        }
    }
}

fn controller(cfg: &ResolvedConfig) -> Result<TabController> {
    let store = Arc::new(cfg.build_store()?);
    Ok(TabController::new(store).with_policy(cfg.filter_policy))
}

/// Open a tab, narrow it and print it
async fn show_tab(
    cfg: &ResolvedConfig,
    tab: Tab,
    category: Option<String>,
    query: Option<String>,
    json: bool,
) -> Result<()> {
    let mut tabs = controller(cfg)?;
    tabs.open(tab, None).await;
    tabs.link_readings().await;

    if let Some(category) = category {
        tabs.set_category(category);
    }
    if let Some(query) = query {
        tabs.set_query(query);
    }

    if let Panel::Failed(e) = tabs.panel() {
        return Err(anyhow::Error::new(e.clone()).context(view::failure_message(tab)));
    }
    print::panel(tab, tabs.panel(), json)
}

/// Show one video the way its player overlay would
async fn show_video(cfg: &ResolvedConfig, video_id: &str, start: u32, json: bool) -> Result<()> {
    let store = cfg.build_store()?;
    let (videos, readings) = tokio::join!(store.load_videos(), store.load_readings());
    let videos = videos.context(view::failure_message(Tab::Main))?;

    let video = videos
        .get(video_id)
        .with_context(|| format!("Video not found: {}", video_id))?;
    let related = readings
        .ok()
        .and_then(|r| r.find_for_video(video_id).map(|r| r.id.clone()));

    let mut modals = ModalCoordinator::new();
    let modal = modals.open_video(video, start);

    if json {
        print::json(modal)
    } else {
        print::video_modal(modal, related.as_deref());
        Ok(())
    }
}

/// Show one reading the way its overlay would
async fn show_reading(cfg: &ResolvedConfig, id: &str, json: bool) -> Result<()> {
    let store = cfg.build_store()?;
    let readings = store
        .load_readings()
        .await
        .context(view::failure_message(Tab::Insights))?;

    let reading = readings
        .get(id)
        .with_context(|| format!("Reading not found: {}", id))?;

    let mut modals = ModalCoordinator::new();
    let modal = modals.open_reading(reading);

    if json {
        print::json(modal)
    } else {
        print::reading_modal(modal);
        Ok(())
    }
}

/// List a tab's categories
async fn list_categories(cfg: &ResolvedConfig, tab: Tab, json: bool) -> Result<()> {
    let mut tabs = controller(cfg)?;

    match tabs.open(tab, None).await {
        Panel::Ready(view) if json => print::json(&view.categories()),
        Panel::Ready(view) => {
            print::categories(view.categories());
            Ok(())
        }
        Panel::Failed(e) => {
            Err(anyhow::Error::new(e.clone()).context(view::failure_message(tab)))
        }
        other => {
            println!("{}", other.placeholder(tab).unwrap_or_default());
            Ok(())
        }
    }
}

async fn browse_session(cfg: &ResolvedConfig, policy: Option<PolicyArg>, json: bool) -> Result<()> {
    let mut tabs = controller(cfg)?;
    if let Some(policy) = policy {
        tabs = tabs.with_policy(policy.into());
    }
    browse::Session::new(tabs, json).run().await
}

/// Show the resolved configuration (for debugging)
fn show_config(cfg: &ResolvedConfig) -> Result<()> {
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("  goc Configuration");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();
    println!(
        "Config file: {}",
        cfg.config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none - using defaults)".to_string())
    );
    println!();
    println!("Source:");
    println!("  Location: {}", cfg.source);
    println!("  Videos:   {}", cfg.paths.videos);
    println!("  Readings: {}", cfg.paths.readings);
    println!();
    println!("Fetch timeout: {}s", cfg.fetch_timeout.as_secs());
    println!("Tab filter policy: {:?}", cfg.filter_policy);

    Ok(())
}

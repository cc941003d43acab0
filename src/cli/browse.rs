//! Interactive browsing session on stdin.
//!
//! Drives one tab controller and one modal coordinator, printing the
//! current view after every command.

use std::str::FromStr;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use super::print;
use crate::core::{ModalCoordinator, NavTarget, Tab, TabController};
use crate::domain::Channel;
use crate::library::CatalogStore;

const HELP: &str = "\
Commands:
  tab <main|consulting|insights>   switch tab
  category <name>                  select a category (all to reset)
  search [query]                   set the search query (empty clears it)
  clear                            reset category and query
  scroll <offset>                  record the current scroll offset
  goto reading <id>                open Insights at a reading
  goto video <id>                  open a video's tab at that video
  play <videoId> [seconds]         open the video player
  read <id>                        open a reading
  close [video|reading]            close overlays (both by default)
  help                             show this help
  quit                             leave";

/// Which overlay `close` targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseTarget {
    Video,
    Reading,
    All,
}

/// One line of input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    Tab(Tab),
    Category(String),
    Search(String),
    Clear,
    Scroll(u32),
    Goto(NavTarget),
    Play { video_id: String, start: u32 },
    Read(String),
    Close(CloseTarget),
    Help,
    Quit,
}

impl FromStr for BrowseCommand {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim_start();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        match word.to_lowercase().as_str() {
            "tab" => Ok(BrowseCommand::Tab(rest.parse()?)),
            "category" | "cat" => {
                if rest.is_empty() {
                    anyhow::bail!("Usage: category <name>");
                }
                Ok(BrowseCommand::Category(rest.to_string()))
            }
            "search" | "find" => Ok(BrowseCommand::Search(rest.to_string())),
            "clear" => Ok(BrowseCommand::Clear),
            "scroll" => {
                let offset = rest
                    .parse()
                    .with_context(|| format!("Invalid scroll offset: {}", rest))?;
                Ok(BrowseCommand::Scroll(offset))
            }
            "goto" => match rest.split_once(char::is_whitespace) {
                Some(("reading", id)) => {
                    Ok(BrowseCommand::Goto(NavTarget::Reading(id.trim().to_string())))
                }
                Some(("video", id)) => {
                    Ok(BrowseCommand::Goto(NavTarget::Video(id.trim().to_string())))
                }
                _ => anyhow::bail!("Usage: goto <reading|video> <id>"),
            },
            "play" => {
                let mut parts = rest.split_whitespace();
                let video_id = parts.next().context("Usage: play <videoId> [seconds]")?;
                let start = match parts.next() {
                    Some(s) => s.parse().with_context(|| format!("Invalid start time: {}", s))?,
                    None => 0,
                };
                Ok(BrowseCommand::Play {
                    video_id: video_id.to_string(),
                    start,
                })
            }
            "read" => {
                if rest.is_empty() {
                    anyhow::bail!("Usage: read <id>");
                }
                Ok(BrowseCommand::Read(rest.to_string()))
            }
            "close" => match rest {
                "" => Ok(BrowseCommand::Close(CloseTarget::All)),
                "video" => Ok(BrowseCommand::Close(CloseTarget::Video)),
                "reading" => Ok(BrowseCommand::Close(CloseTarget::Reading)),
                other => anyhow::bail!("Unknown overlay: {}", other),
            },
            "help" | "?" => Ok(BrowseCommand::Help),
            "quit" | "exit" | "q" => Ok(BrowseCommand::Quit),
            _ => anyhow::bail!("Unknown command: {} (try 'help')", word),
        }
    }
}

/// A browsing session
pub struct Session {
    tabs: TabController,
    modals: ModalCoordinator,
    json: bool,
}

impl Session {
    pub fn new(tabs: TabController, json: bool) -> Self {
        Self {
            tabs,
            modals: ModalCoordinator::new(),
            json,
        }
    }

    fn store(&self) -> &CatalogStore {
        self.tabs.store()
    }

    /// Run until `quit` or end of input
    pub async fn run(mut self) -> Result<()> {
        debug!(
            source = self.store().source_name(),
            policy = ?self.tabs.policy(),
            "starting browse session"
        );
        let panel = self.tabs.start().await;
        print::panel(Tab::Main, panel, self.json)?;
        self.show_links().await?;

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }

            match line.parse::<BrowseCommand>() {
                Ok(BrowseCommand::Quit) => break,
                Ok(command) => {
                    if let Err(e) = self.apply(command).await {
                        println!("{:#}", e);
                    }
                }
                Err(e) => println!("{:#}", e),
            }
        }

        Ok(())
    }

    /// Apply one command and print the result
    pub async fn apply(&mut self, command: BrowseCommand) -> Result<()> {
        debug!(?command, "browse command");

        match command {
            BrowseCommand::Tab(tab) => {
                self.tabs.open(tab, None).await;
                self.show()?;
                self.show_links().await
            }
            BrowseCommand::Category(category) => {
                self.tabs.set_category(category);
                self.show()
            }
            BrowseCommand::Search(query) => {
                self.tabs.set_query(query);
                self.show()
            }
            BrowseCommand::Clear => {
                self.tabs.clear_filters();
                self.show()
            }
            BrowseCommand::Scroll(offset) => {
                self.tabs.record_scroll(offset);
                Ok(())
            }
            BrowseCommand::Goto(target) => {
                let tab = self.tab_for(&target).await?;
                self.tabs.open(tab, Some(target)).await;
                self.show()?;
                if let Some(target) = self.tabs.highlighted() {
                    println!("-> {:?}", target);
                }
                self.show_links().await
            }
            BrowseCommand::Play { video_id, start } => {
                self.store().load_videos().await?;
                let video = self
                    .store()
                    .find_video_by_id(&video_id)
                    .with_context(|| format!("Video not found: {}", video_id))?;
                let related = match self.store().load_readings().await {
                    Ok(readings) => readings.find_for_video(&video_id).map(|r| r.id.clone()),
                    Err(_) => None,
                };
                let modal = self.modals.open_video(&video, start);

                if self.json {
                    print::json(modal)
                } else {
                    print::video_modal(modal, related.as_deref());
                    Ok(())
                }
            }
            BrowseCommand::Read(id) => {
                self.store().load_readings().await?;
                let reading = self
                    .store()
                    .find_reading_by_id(&id)
                    .with_context(|| format!("Reading not found: {}", id))?;
                let modal = self.modals.open_reading(&reading);

                if self.json {
                    print::json(modal)
                } else {
                    print::reading_modal(modal);
                    Ok(())
                }
            }
            BrowseCommand::Close(target) => {
                match target {
                    CloseTarget::Video => {
                        self.modals.close_video();
                    }
                    CloseTarget::Reading => {
                        self.modals.close_reading();
                    }
                    CloseTarget::All => self.modals.close_all(),
                }
                self.show()
            }
            BrowseCommand::Help => {
                println!("{}", HELP);
                Ok(())
            }
            BrowseCommand::Quit => Ok(()),
        }
    }

    /// Tab that lists a navigation target
    async fn tab_for(&self, target: &NavTarget) -> Result<Tab> {
        match target {
            NavTarget::Reading(_) => Ok(Tab::Insights),
            NavTarget::Video(id) => {
                let videos = self.store().load_videos().await?;
                let video = videos
                    .get(id)
                    .with_context(|| format!("Video not found: {}", id))?;
                Ok(match video.channel {
                    Channel::Main => Tab::Main,
                    Channel::Consulting => Tab::Consulting,
                })
            }
        }
    }

    /// Reprint a video tab once its related readings arrive
    async fn show_links(&mut self) -> Result<()> {
        if !self.tabs.links_pending() {
            return Ok(());
        }
        self.tabs.link_readings().await;
        if self.tabs.links_pending() {
            return Ok(());
        }
        self.show()
    }

    fn show(&self) -> Result<()> {
        if self.modals.scroll_locked() {
            debug!("overlay open; page scroll locked");
        }
        print::panel(self.tabs.active(), self.tabs.panel(), self.json)
    }
}

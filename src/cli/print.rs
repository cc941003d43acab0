//! Terminal rendering of view-models.

use anyhow::Result;
use serde::Serialize;

use crate::core::{Panel, ReadingModal, Tab, VideoModal};
use crate::domain::Category;
use crate::view::{ConsultingView, InsightsView, MainView, TabView, VideoCard, NO_RESULTS};

/// Print a value as pretty JSON
pub fn json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print whatever the active tab is showing
pub fn panel(tab: Tab, panel: &Panel, as_json: bool) -> Result<()> {
    match panel {
        Panel::Ready(view) if as_json => json(view),
        Panel::Ready(view) => {
            tab_view(view);
            Ok(())
        }
        other => {
            if let Some(message) = other.placeholder(tab) {
                println!("{}", message);
            }
            if let Panel::Failed(e) = other {
                eprintln!("  ({})", e);
            }
            Ok(())
        }
    }
}

pub fn tab_view(view: &TabView) {
    if view.is_empty() {
        println!("{}", NO_RESULTS);
    } else {
        match view {
            TabView::Main(view) => main_view(view),
            TabView::Consulting(view) => consulting_view(view),
            TabView::Insights(view) => insights_view(view),
        }
    }
    println!();
    categories(view.categories());
}

fn latest(card: &VideoCard) {
    println!(
        "Latest episode: {} [{}]",
        card.title,
        card.badge.as_deref().unwrap_or("-")
    );
    println!("  {}", card.watch_url);
    println!();
}

fn main_view(view: &MainView) {
    if let Some(card) = &view.latest {
        latest(card);
    }

    for section in &view.sections {
        println!("{} ({} episodes)", section.heading, section.episode_count);
        println!("{}", "-".repeat(80));
        for card in &section.cards {
            println!(
                "{:<10} {:<16} {:<50}",
                card.badge.as_deref().unwrap_or("-"),
                card.video_id,
                truncate(&card.title, 50)
            );
        }
        println!();
    }
}

fn consulting_view(view: &ConsultingView) {
    println!("{:<8} {:<16} {:<28} {:<28}", "TIME", "VIDEO", "SUBJECT", "TITLE");
    println!("{}", "-".repeat(80));

    for row in &view.rows {
        println!(
            "{:<8} {:<16} {:<28} {:<28}",
            row.display_time,
            row.video_id,
            truncate(row.subject_title.as_deref().unwrap_or("-"), 28),
            truncate(&row.video_title, 28)
        );
    }
}

fn insights_view(view: &InsightsView) {
    println!("{:<18} {:<14} {:<46}", "ID", "TYPE", "TITLE");
    println!("{}", "-".repeat(80));

    for card in &view.cards {
        println!(
            "{:<18} {:<14} {:<46}",
            card.id,
            truncate(&card.kind, 14),
            truncate(&card.title, 46)
        );
    }
}

pub fn categories(options: &[Category]) {
    let labels: Vec<&str> = options.iter().map(|c| c.label()).collect();
    println!("Categories: {}", labels.join(", "));
}

pub fn video_modal(modal: &VideoModal, related: Option<&str>) {
    println!("{} ({})", modal.title, modal.channel.display_name());
    if let Some(ref description) = modal.description {
        println!("  {}", description);
    }
    println!("  Player: {}", modal.embed_url);
    println!("  Watch:  {}", modal.watch_url);
    if let Some(id) = related {
        println!("  Related reading: {}", id);
    }
}

pub fn reading_modal(modal: &ReadingModal) {
    println!("{}", modal.title);
    println!("{}", "=".repeat(modal.title.chars().count().min(80)));
    println!("{}", modal.content);
    if let Some(ref url) = modal.source_url {
        println!();
        println!("{}: {}", modal.link_text, url);
    }
}

/// Shorten to `max` characters, marking the cut
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let kept: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_is_char_safe() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("Économie du jeu vidéo", 10), "Économi...");
    }
}

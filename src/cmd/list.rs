use anyhow::{bail, Result};
use futures::StreamExt;

use replay_catalog::{Config, MatchRequest, Provider};

use super::provider;

pub async fn cmd_list(
    config: &Config,
    provider_name: &str,
    show: Option<String>,
    title: Option<String>,
    pitch: Option<String>,
    json: bool,
) -> Result<()> {
    let provider = provider(config, provider_name)?;

    let criteria = if show.is_none() && title.is_none() && pitch.is_none() {
        config.watch.clone()
    } else {
        vec![MatchRequest {
            show: show.unwrap_or_default(),
            title: title.unwrap_or_default(),
            pitch: pitch.unwrap_or_default(),
            ..MatchRequest::default()
        }]
    };
    if criteria.is_empty() {
        bail!("Nothing to look for: pass --show, --title or --pitch, or add [[watch]] entries to the config");
    }

    eprintln!("📋 Listing {} catalog ({} criteria)", provider.name(), criteria.len());

    let mut shows = provider.list_shows(criteria);
    while let Some(show) = shows.next().await {
        if json {
            println!("{}", serde_json::to_string(&show)?);
        } else {
            let episode = if show.episode.is_empty() {
                show.air_date.format("%Y-%m-%d").to_string()
            } else {
                format!("S{}E{}", show.season, show.episode)
            };
            let title = if show.title.is_empty() {
                String::new()
            } else {
                format!(": {}", show.title)
            };
            println!("  {} {} {}{}", show.id, show.show, episode, title);
        }
    }

    match shows.finish().await {
        Ok(summary) => {
            eprintln!(
                "✅ {} of {} catalog entries matched",
                summary.matched, summary.considered
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("❌ Listing failed: {e}");
            Err(e.into())
        }
    }
}

use anyhow::Result;

use replay_catalog::{Config, Provider, Show};

use super::provider;

pub async fn cmd_url(config: &Config, provider_name: &str, id: &str) -> Result<()> {
    let provider = provider(config, provider_name)?;

    eprintln!("📡 Fetching stream info for: {id}");
    let mut show = Show {
        id: id.to_string(),
        provider: provider.name().to_string(),
        ..Show::default()
    };
    let url = provider.get_stream_url(&mut show).await?;

    if !show.thumbnail_url.is_empty() {
        eprintln!("🖼  Thumbnail: {}", show.thumbnail_url);
    }
    println!("{url}");
    Ok(())
}

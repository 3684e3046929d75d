use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};

use replay_catalog::{Config, Provider, ProviderExt, Show};

use super::provider;

/// Show fields given on the command line.
pub struct PathArgs {
    pub show: String,
    pub title: String,
    pub season: String,
    pub episode: String,
    pub id: String,
    pub date: Option<String>,
}

pub fn cmd_path(config: &Config, provider_name: &str, args: PathArgs) -> Result<()> {
    let provider = provider(config, provider_name)?;

    let air_date = match args.date.as_deref() {
        Some(date) => NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .with_context(|| format!("Invalid date (expected YYYY-MM-DD): {date}"))?
            .and_time(chrono::NaiveTime::MIN)
            .and_utc(),
        None => Utc::now(),
    };

    let show = Show {
        id: args.id,
        show: args.show,
        title: args.title,
        season: args.season,
        episode: args.episode,
        air_date,
        provider: provider.name().to_string(),
        ..Show::default()
    };

    println!("{}", provider.matcher_path(&show).display());
    Ok(())
}

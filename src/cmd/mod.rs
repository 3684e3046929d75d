mod list;
mod path;
mod resolve;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use replay_catalog::{Config, Provider, Registry};

pub use list::cmd_list;
pub use path::{cmd_path, PathArgs};
pub use resolve::cmd_url;

/// Load `path` if given, else the default configuration file.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

fn registry(config: &Config) -> Result<Registry> {
    Registry::with_defaults(config).context("failed to set up providers")
}

fn provider(config: &Config, name: &str) -> Result<Arc<dyn Provider>> {
    let registry = registry(config)?;
    registry.get(&name.to_lowercase()).with_context(|| {
        format!(
            "Unknown provider: {name}. Available: {}",
            registry.names().join(", ")
        )
    })
}

pub fn cmd_providers(config: &Config) -> Result<()> {
    for name in registry(config)?.names() {
        println!("{name}");
    }
    Ok(())
}

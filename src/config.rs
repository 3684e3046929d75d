//! Configuration loaded from `~/.config/replay-catalog/config.toml`.
//!
//! Every key is optional; a missing file means built-in defaults.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use url::Url;

use crate::catalog::providers::francetv;
use crate::catalog::MatchRequest;

/// Top-level configuration file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Settings for the default HTTP getter.
    pub http: HttpConfig,
    /// France Télévisions endpoints and stream selection.
    pub francetv: FranceTvConfig,
    /// Shows to look for when no criteria are given on the command line.
    pub watch: Vec<MatchRequest>,
}

/// `[http]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub user_agent: String,
    pub connect_timeout_secs: u64,
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("replay-catalog/{}", crate::VERSION),
            connect_timeout_secs: 10,
            timeout_secs: 30,
        }
    }
}

/// `[francetv]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FranceTvConfig {
    /// Listing endpoint; `{limit}` is replaced by `catalog_limit`.
    pub catalog_url: String,
    /// Detail endpoint; the show identifier is appended as-is.
    pub detail_url: String,
    pub catalog_limit: usize,
    /// Rendition format picked by detail resolution.
    pub stream_format: String,
}

impl Default for FranceTvConfig {
    fn default() -> Self {
        Self {
            catalog_url: francetv::CATALOG_URL.to_string(),
            detail_url: francetv::DETAIL_URL.to_string(),
            catalog_limit: francetv::CATALOG_LIMIT,
            stream_format: francetv::STREAM_FORMAT.to_string(),
        }
    }
}

impl Config {
    /// Load the configuration from its default location.
    ///
    /// Returns defaults if the file doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, parsed or validated.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path())
    }

    /// Load the configuration from `path`, falling back to defaults when absent.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;

        Self::from_toml(&content).with_context(|| format!("invalid config in {}", path.display()))
    }

    /// Parse and validate a TOML document.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check endpoints and limits before any provider is built from them.
    pub fn validate(&self) -> Result<()> {
        let ftv = &self.francetv;

        if !ftv.catalog_url.contains("{limit}") {
            bail!("francetv.catalog_url must contain a {{limit}} placeholder");
        }
        Url::parse(&ftv.catalog_url.replace("{limit}", "1"))
            .with_context(|| format!("francetv.catalog_url is not a URL: {}", ftv.catalog_url))?;
        Url::parse(&ftv.detail_url)
            .with_context(|| format!("francetv.detail_url is not a URL: {}", ftv.detail_url))?;

        if ftv.catalog_limit == 0 {
            bail!("francetv.catalog_limit must be greater than zero");
        }
        if ftv.stream_format.trim().is_empty() {
            bail!("francetv.stream_format must not be empty");
        }
        Ok(())
    }
}

/// Return the path to the config file.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("replay-catalog")
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_empty_config() {
        let config = Config::from_toml("").unwrap();
        assert!(config.watch.is_empty());
        assert_eq!(config.francetv.catalog_limit, 3000);
        assert_eq!(config.francetv.stream_format, "hls_v5_os");
        assert_eq!(config.http.timeout_secs, 30);
    }

    #[test]
    fn parse_watch_list() {
        let toml_str = r#"
[[watch]]
show = "le journal"
provider = "francetv"
destination = "news"

[[watch]]
title = "pilote"
"#;
        let config = Config::from_toml(toml_str).unwrap();
        assert_eq!(config.watch.len(), 2);
        assert_eq!(config.watch[0].show, "le journal");
        assert_eq!(config.watch[0].destination, "news");
        assert_eq!(config.watch[1].title, "pilote");
        assert!(config.watch[1].provider.is_empty());
    }

    #[test]
    fn parse_overrides() {
        let toml_str = r#"
[http]
user_agent = "custom/2.0"

[francetv]
catalog_limit = 50
stream_format = "hls_v1"
"#;
        let config = Config::from_toml(toml_str).unwrap();
        assert_eq!(config.http.user_agent, "custom/2.0");
        assert_eq!(config.http.connect_timeout_secs, 10);
        assert_eq!(config.francetv.catalog_limit, 50);
        assert_eq!(config.francetv.stream_format, "hls_v1");
        assert_eq!(config.francetv.detail_url, francetv::DETAIL_URL);
    }

    #[test]
    fn reject_catalog_url_without_limit() {
        let toml_str = r#"
[francetv]
catalog_url = "http://example.com/liste"
"#;
        assert!(Config::from_toml(toml_str).is_err());
    }

    #[test]
    fn reject_zero_limit() {
        let toml_str = "[francetv]\ncatalog_limit = 0\n";
        assert!(Config::from_toml(toml_str).is_err());
    }

    #[test]
    fn reject_bad_detail_url() {
        let toml_str = "[francetv]\ndetail_url = \"not a url\"\n";
        assert!(Config::from_toml(toml_str).is_err());
    }

    #[test]
    fn missing_file_gives_defaults() {
        let config = Config::load_from(Path::new("/nonexistent/replay-catalog/config.toml")).unwrap();
        assert_eq!(config.francetv.catalog_url, francetv::CATALOG_URL);
    }
}

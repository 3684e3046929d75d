//! Catalog provider trait and common types.
//!
//! A [`Provider`] knows how to enumerate the on-demand catalog of one
//! broadcaster, how to turn a catalog entry into a playable stream URL, and
//! how to name the file a show is saved to.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::matcher::MatchRequest;
use super::stream::ShowStream;
use crate::http_client::TransportError;

/// Errors reported by providers.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("can't decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("no {format} stream offered for show {id}")]
    NoStreamFormat { id: String, format: String },

    #[error("listing task ended abnormally: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Provider-agnostic description of one on-demand show.
///
/// Catalog listings fill the descriptive fields only. `stream_url` stays empty
/// and `detailed` false until [`Provider::resolve_details`] succeeds, after
/// which they never change again.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Show {
    /// Provider-specific identifier, never empty for a listed show.
    pub id: String,
    /// Series name.
    pub show: String,
    /// Episode title.
    pub title: String,
    /// Season label as published (may be empty).
    pub season: String,
    /// Episode label as published (may be empty).
    pub episode: String,
    /// Synopsis.
    pub pitch: String,
    pub category: String,
    pub channel: String,
    pub air_date: DateTime<Utc>,
    pub duration: Duration,
    /// Set once the detail fetch has completed.
    pub detailed: bool,
    /// Always `false` for now; DRM detection is not implemented.
    pub drm: bool,
    /// Playable stream URL, empty until resolved.
    pub stream_url: String,
    pub thumbnail_url: String,
    /// Name of the provider that listed this show.
    pub provider: String,
    /// Human-viewable page for the show.
    pub show_url: String,
}

impl Show {
    /// Record the outcome of a successful detail fetch.
    ///
    /// Only ever moves `detailed` from `false` to `true`.
    pub fn mark_resolved(&mut self, stream_url: String, thumbnail_url: String) {
        self.stream_url = stream_url;
        self.thumbnail_url = thumbnail_url;
        self.detailed = true;
    }
}

/// Trait for catalog providers.
///
/// Implementors talk to one broadcaster's web services and hand out
/// normalized [`Show`] records.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Short lowercase provider name (e.g., `"francetv"`).
    fn name(&self) -> &'static str;

    /// Enumerate the catalog, yielding the shows matched by `criteria` in
    /// catalog order.
    ///
    /// Listing runs on its own Tokio task. Fetch or decode failures end the
    /// stream early and are reported by [`ShowStream::finish`], never as items.
    ///
    /// # Panics
    ///
    /// Must be called from within a Tokio runtime.
    fn list_shows(&self, criteria: Vec<MatchRequest>) -> ShowStream;

    /// Fetch the details of `show` and record its stream URL.
    ///
    /// Returns immediately when the show is already detailed. On error the
    /// show is left untouched, so the call can be retried.
    async fn resolve_details(&self, show: &mut Show) -> Result<(), ProviderError>;

    /// Return the stream URL of `show`, resolving details first if needed.
    async fn get_stream_url(&self, show: &mut Show) -> Result<String, ProviderError> {
        if show.stream_url.is_empty() {
            self.resolve_details(show).await?;
        }
        Ok(show.stream_url.clone())
    }

    /// Relative path the show is saved to.
    ///
    /// Pure: no network access and no mutation.
    fn build_path(&self, show: &Show) -> PathBuf;
}

/// Operations derived from [`Provider`], available on every provider.
///
/// The blanket implementation below is the only one possible, so providers
/// cannot give `matcher_path` a meaning of its own.
pub trait ProviderExt: Provider {
    /// Path used to detect a show that was already downloaded.
    ///
    /// Always equal to [`Provider::build_path`].
    fn matcher_path(&self, show: &Show) -> PathBuf {
        self.build_path(show)
    }
}

impl<P: Provider + ?Sized> ProviderExt for P {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_resolved() {
        let mut show = Show {
            id: "abc".to_string(),
            thumbnail_url: "http://img/small.jpg".to_string(),
            ..Show::default()
        };
        assert!(!show.detailed);

        show.mark_resolved(
            "http://cdn/master.m3u8".to_string(),
            "https://img/large.jpg".to_string(),
        );

        assert!(show.detailed);
        assert_eq!(show.stream_url, "http://cdn/master.m3u8");
        assert_eq!(show.thumbnail_url, "https://img/large.jpg");
    }

    #[test]
    fn test_show_serializes_to_json() {
        let show = Show {
            id: "abc".to_string(),
            show: "Le Journal".to_string(),
            provider: "francetv".to_string(),
            ..Show::default()
        };
        let json = serde_json::to_value(&show).unwrap();
        assert_eq!(json["id"], "abc");
        assert_eq!(json["show"], "Le Journal");
        assert_eq!(json["detailed"], false);
        assert_eq!(json["stream_url"], "");
    }
}

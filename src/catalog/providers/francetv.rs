//! France Télévisions (Pluzz) replay catalog provider

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::DateTime;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use tracing::{debug, info, instrument, warn};

use crate::catalog::matcher::{is_show_match, MatchRequest};
use crate::catalog::naming::{file_name_cleaner, format_2_digits, path_name_cleaner, MEDIA_EXTENSION};
use crate::catalog::provider::{Provider, ProviderError, Show};
use crate::catalog::stream::{ListingSummary, ShowStream};
use crate::config::Config;
use crate::http_client::{Getter, HttpGetter, TransportError};

pub const PROVIDER_NAME: &str = "francetv";

/// Most recent replays, `{limit}` entries at most.
pub const CATALOG_URL: &str =
    "http://pluzz.webservices.francetelevisions.fr/pluzz/liste/type/replay/nb/{limit}/debut/0";
/// Show details and video links; the show identifier is appended.
pub const DETAIL_URL: &str =
    "http://webservices.francetelevisions.fr/tools/getInfosOeuvre/v2/?catalogue=Pluzz&idDiffusion=";
pub const CATALOG_LIMIT: usize = 3000;
/// HLS v5 rendition, the one playable without DRM.
pub const STREAM_FORMAT: &str = "hls_v5_os";

pub struct FranceTv {
    getter: Arc<dyn Getter>,
    catalog_url: String,
    detail_url: String,
    catalog_limit: usize,
    stream_format: String,
}

/// Builder for [`FranceTv`]; unset options keep the public service defaults.
pub struct FranceTvBuilder {
    getter: Option<Arc<dyn Getter>>,
    catalog_url: String,
    detail_url: String,
    catalog_limit: usize,
    stream_format: String,
}

impl FranceTvBuilder {
    /// Inject the getter used for every request instead of a default HTTP client.
    #[must_use]
    pub fn getter(mut self, getter: Arc<dyn Getter>) -> Self {
        self.getter = Some(getter);
        self
    }

    #[must_use]
    pub fn catalog_url(mut self, url: impl Into<String>) -> Self {
        self.catalog_url = url.into();
        self
    }

    #[must_use]
    pub fn detail_url(mut self, url: impl Into<String>) -> Self {
        self.detail_url = url.into();
        self
    }

    #[must_use]
    pub fn catalog_limit(mut self, limit: usize) -> Self {
        self.catalog_limit = limit;
        self
    }

    #[must_use]
    pub fn stream_format(mut self, format: impl Into<String>) -> Self {
        self.stream_format = format.into();
        self
    }

    pub fn build(self) -> Result<FranceTv, TransportError> {
        let getter = match self.getter {
            Some(getter) => getter,
            None => Arc::new(HttpGetter::new()?),
        };

        Ok(FranceTv {
            getter,
            catalog_url: self.catalog_url,
            detail_url: self.detail_url,
            catalog_limit: self.catalog_limit,
            stream_format: self.stream_format,
        })
    }
}

impl FranceTv {
    /// Provider for the public France Télévisions services.
    pub fn new() -> Result<Self, TransportError> {
        Self::builder().build()
    }

    pub fn builder() -> FranceTvBuilder {
        FranceTvBuilder {
            getter: None,
            catalog_url: CATALOG_URL.to_string(),
            detail_url: DETAIL_URL.to_string(),
            catalog_limit: CATALOG_LIMIT,
            stream_format: STREAM_FORMAT.to_string(),
        }
    }

    /// Provider wired from the `[http]` and `[francetv]` configuration sections.
    pub fn from_config(config: &Config) -> Result<Self, TransportError> {
        let getter = HttpGetter::with_config(&config.http)?;
        let ftv = &config.francetv;

        Self::builder()
            .getter(Arc::new(getter))
            .catalog_url(&ftv.catalog_url)
            .detail_url(&ftv.detail_url)
            .catalog_limit(ftv.catalog_limit)
            .stream_format(&ftv.stream_format)
            .build()
    }

    fn listing_url(&self) -> String {
        self.catalog_url
            .replace("{limit}", &self.catalog_limit.to_string())
    }

    /// IDs are URL-safe, so they are appended without escaping.
    fn info_url(&self, id: &str) -> String {
        format!("{}{id}", self.detail_url)
    }
}

async fn fetch_catalog(getter: &dyn Getter, url: &str) -> Result<PluzzList, ProviderError> {
    let body = getter.get(url).await?;
    Ok(serde_json::from_slice(&body)?)
}

#[async_trait]
impl Provider for FranceTv {
    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    fn list_shows(&self, criteria: Vec<MatchRequest>) -> ShowStream {
        let getter = Arc::clone(&self.getter);
        let url = self.listing_url();

        ShowStream::spawn(move |sender| async move {
            // The whole catalog must decode before anything is emitted
            let catalog = match fetch_catalog(getter.as_ref(), &url).await {
                Ok(catalog) => catalog,
                Err(e) => {
                    warn!(provider = PROVIDER_NAME, error = %e, "Can't load catalog");
                    return Err(e);
                }
            };

            let mut summary = ListingSummary::default();
            for emission in catalog.reponse.emissions {
                summary.considered += 1;

                let Some(show) = emission.into_show() else {
                    debug!("Skipping catalog entry without identifier");
                    continue;
                };
                if !is_show_match(&criteria, &show) {
                    continue;
                }

                debug!(id = %show.id, show = %show.show, "Catalog entry matches");
                if !sender.emit(show).await {
                    debug!("Consumer went away, stopping catalog listing");
                    break;
                }
                summary.matched += 1;
            }

            info!(
                provider = PROVIDER_NAME,
                considered = summary.considered,
                matched = summary.matched,
                "Catalog listing done"
            );
            Ok(summary)
        })
    }

    #[instrument(skip(self, show), fields(id = %show.id))]
    async fn resolve_details(&self, show: &mut Show) -> Result<(), ProviderError> {
        if show.detailed {
            return Ok(());
        }

        let body = self.getter.get(&self.info_url(&show.id)).await?;
        let info: InfoOeuvre = serde_json::from_slice(&body)?;

        let stream_url = info
            .videos
            .into_iter()
            .find(|v| v.format == self.stream_format)
            .map(|v| v.url)
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| ProviderError::NoStreamFormat {
                id: show.id.clone(),
                format: self.stream_format.clone(),
            })?;

        debug!(stream_url = %stream_url, "Stream resolved");
        show.mark_resolved(stream_url, info.image_secure);
        Ok(())
    }

    /// Plex-compatible layout:
    ///   `Show/Season NN/Show - sNNeMM - Episode title.mp4`
    /// Shows without episode numbering are filed by air date instead.
    fn build_path(&self, show: &Show) -> PathBuf {
        let show_dir = path_name_cleaner(&show.show);

        let season_dir = if show.season.is_empty() {
            format!("Season {}", show.air_date.format("%Y"))
        } else {
            format!("Season {}", format_2_digits(&show.season))
        };

        let series = file_name_cleaner(&show.show);
        let mut file_name = if show.episode.is_empty() {
            format!("{series} - {}", show.air_date.format("%Y-%m-%d"))
        } else {
            format!(
                "{series} - s{}e{}",
                format_2_digits(&show.season),
                format_2_digits(&show.episode)
            )
        };

        let title = file_name_cleaner(&show.title);
        let untitled = title.is_empty() || show.title == show.show;
        if show.episode.is_empty() && untitled {
            // Daily shows need the ID to tell same-day broadcasts apart
            file_name.push_str(" - ");
            file_name.push_str(&show.id);
        } else if !untitled {
            file_name.push_str(" - ");
            file_name.push_str(&title);
        }
        file_name.push('.');
        file_name.push_str(MEDIA_EXTENSION);

        [show_dir, season_dir, file_name].iter().collect()
    }
}

// Serde structures for Pluzz API responses

#[derive(Debug, Deserialize)]
struct PluzzList {
    #[serde(default)]
    reponse: PluzzReponse,
}

#[derive(Debug, Default, Deserialize)]
struct PluzzReponse {
    #[serde(default)]
    emissions: Vec<Emission>,
}

#[derive(Debug, Deserialize)]
struct Emission {
    #[serde(default, deserialize_with = "lenient_string")]
    id_diffusion: String,
    #[serde(default, deserialize_with = "lenient_string")]
    titre: String,
    #[serde(default, deserialize_with = "lenient_string")]
    soustitre: String,
    #[serde(default, deserialize_with = "lenient_string")]
    saison: String,
    #[serde(default, deserialize_with = "lenient_string")]
    episode: String,
    #[serde(default, deserialize_with = "lenient_string")]
    accroche: String,
    #[serde(default, deserialize_with = "lenient_string")]
    chaine_id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    rubrique: String,
    #[serde(default, deserialize_with = "lenient_string")]
    oas_sitepage: String,
    #[serde(default, deserialize_with = "lenient_string")]
    image_large: String,
    /// Unix seconds, UTC.
    #[serde(default, deserialize_with = "lenient_seconds")]
    ts_diffusion_utc: i64,
    /// Seconds, or `HH:MM:SS`.
    #[serde(default, deserialize_with = "lenient_seconds")]
    duree_reelle: i64,
}

impl Emission {
    /// Map a catalog entry to a [`Show`]; entries without identifier are dropped.
    fn into_show(self) -> Option<Show> {
        let id = self.id_diffusion.trim().to_string();
        if id.is_empty() {
            return None;
        }

        Some(Show {
            id,
            show: self.titre.trim().to_string(),
            title: self.soustitre.trim().to_string(),
            season: self.saison.trim().to_string(),
            episode: self.episode.trim().to_string(),
            pitch: self.accroche.trim().to_string(),
            category: self.rubrique.trim().to_string(),
            channel: self.chaine_id,
            air_date: DateTime::from_timestamp(self.ts_diffusion_utc, 0).unwrap_or_default(),
            duration: Duration::from_secs(self.duree_reelle.max(0).unsigned_abs()),
            detailed: false,
            drm: false,
            stream_url: String::new(),
            thumbnail_url: self.image_large,
            provider: PROVIDER_NAME.to_string(),
            show_url: self.oas_sitepage,
        })
    }
}

#[derive(Debug, Deserialize)]
struct InfoOeuvre {
    #[serde(default)]
    image_secure: String,
    #[serde(default)]
    videos: Vec<InfoVideo>,
}

#[derive(Debug, Deserialize)]
struct InfoVideo {
    #[serde(default)]
    format: String,
    #[serde(default)]
    url: String,
}

/// The service sends labels as strings, numbers or `null` depending on the entry.
/// Booleans (seen as `false` for missing labels) read as empty.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
        Flag(bool),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Text(s)) => s,
        Some(Raw::Int(n)) => n.to_string(),
        Some(Raw::Float(f)) => f.to_string(),
        Some(Raw::Flag(_)) | None => String::new(),
    })
}

/// Integer seconds, given as a number, a numeric string or `[HH:]MM:SS`.
/// Fractional seconds are dropped.
fn lenient_seconds<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Float(f64),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Int(n)) => Ok(n),
        Some(Raw::Float(f)) => whole_seconds(f).map_err(D::Error::custom),
        Some(Raw::Text(s)) => parse_seconds(&s).map_err(D::Error::custom),
        None => Ok(0),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn whole_seconds(value: f64) -> Result<i64, String> {
    let whole = value.trunc();
    if !whole.is_finite() || whole < i64::MIN as f64 || whole >= i64::MAX as f64 {
        return Err(format!("invalid duration or timestamp: {value}"));
    }
    Ok(whole as i64)
}

fn parse_seconds(text: &str) -> Result<i64, String> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(0);
    }

    text.split(':').try_fold(0i64, |total, part| {
        part.trim()
            .parse::<i64>()
            .ok()
            .and_then(|n| total.checked_mul(60)?.checked_add(n))
            .ok_or_else(|| format!("invalid duration or timestamp: {text:?}"))
    })
}

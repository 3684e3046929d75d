//! `replay-catalog` - Broadcaster replay catalogs as a stream of shows
//!
//! # Features
//!
//! - **Catalog listing**: matched shows streamed in catalog order, cancellable at any point
//! - **Lazy resolution**: stream URLs fetched only for the shows you ask about
//! - **Stable naming**: one Plex-compatible path per show, for saving and duplicate detection
//!
//! # Example
//!
//! ```rust,no_run
//! use futures::StreamExt;
//! use replay_catalog::{FranceTv, MatchRequest, Provider, ProviderExt};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let provider = FranceTv::new()?;
//!     let mut shows = provider.list_shows(vec![MatchRequest::show("journal")]);
//!     while let Some(mut show) = shows.next().await {
//!         let url = provider.get_stream_url(&mut show).await?;
//!         println!("{} -> {url}", provider.build_path(&show).display());
//!     }
//!     shows.finish().await?;
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod http_client;

pub use catalog::providers::FranceTv;
pub use catalog::{
    is_show_match, ListingSummary, MatchRequest, Provider, ProviderError, ProviderExt, Registry,
    Show, ShowStream,
};
pub use config::Config;
pub use http_client::{Getter, HttpGetter, TransportError};

/// Version of replay-catalog
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! On-demand catalog adapters
//!
//! Each [`Provider`] lists one broadcaster's replay catalog, filters it
//! against [`MatchRequest`]s, resolves stream URLs on demand and names the
//! file a show is saved to.

pub mod matcher;
pub mod naming;
pub mod provider;
pub mod providers;
pub mod registry;
pub mod stream;

pub use matcher::{is_show_match, MatchRequest};
pub use provider::{Provider, ProviderError, ProviderExt, Show};
pub use registry::Registry;
pub use stream::{ListingSummary, ShowSender, ShowStream};

//! Video search provider abstraction
//!
//! The engine only needs an ordered list of `(id, title)` candidates for a query. Each
//! provider hides its own network, auth and response format details behind this trait.

use crate::{error::AppResult, models::Candidate};

pub mod youtube;

pub use youtube::YouTubeProvider;

/// Trait for content search providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait SearchProvider: Send + Sync {
    /// Searches for up to `max_results` items matching `query`, in provider ranking order
    async fn search(&self, query: &str, max_results: u32) -> AppResult<Vec<Candidate>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

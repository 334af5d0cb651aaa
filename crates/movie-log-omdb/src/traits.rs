use async_trait::async_trait;
use movie_log_models::{MovieDetail, SearchResultItem};

use crate::error::SourceError;

/// A remote movie database: free-text search plus per-identifier detail
/// lookup. `OmdbClient` is the real implementation; tests substitute their
/// own.
#[async_trait]
pub trait MovieSource: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<SearchResultItem>, SourceError>;

    async fn detail(&self, imdb_id: &str) -> Result<MovieDetail, SourceError>;
}

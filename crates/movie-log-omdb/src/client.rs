use std::time::Duration;

use async_trait::async_trait;
use movie_log_models::{MovieDetail, SearchResultItem};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::api;
use crate::error::SourceError;
use crate::traits::MovieSource;

pub const OMDB_BASE_URL: &str = "https://www.omdbapi.com/";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the OMDb HTTP API. The key and base URL are injected; the base
/// URL is swappable so tests can point at a local server.
#[derive(Clone)]
pub struct OmdbClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OmdbClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, SourceError> {
        Self::with_base_url(api_key, OMDB_BASE_URL)
    }

    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, SourceError> {
        let client = Client::builder()
            .user_agent(concat!("popcorn/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into(),
        })
    }

    /// Execute a GET against the API and decode the JSON envelope. The api
    /// key is appended to whatever parameters the caller passes.
    async fn get<T: DeserializeOwned>(&self, params: &[(&str, &str)]) -> Result<T, SourceError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("apikey", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Movie database returned {}: {}", status, body);
            return Err(SourceError::Status(status));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| SourceError::Decode(e.to_string()))
    }

    pub async fn search(&self, query: &str) -> Result<Vec<SearchResultItem>, SourceError> {
        debug!("Searching movie database for {:?}", query);
        let envelope: api::SearchEnvelope = self.get(&[("s", query)]).await?;
        api::search_results(envelope)
    }

    pub async fn detail(&self, imdb_id: &str) -> Result<MovieDetail, SourceError> {
        debug!("Fetching movie detail for {}", imdb_id);
        let envelope: api::DetailEnvelope = self.get(&[("i", imdb_id)]).await?;
        api::movie_detail(envelope)
    }
}

#[async_trait]
impl MovieSource for OmdbClient {
    async fn search(&self, query: &str) -> Result<Vec<SearchResultItem>, SourceError> {
        self.search(query).await
    }

    async fn detail(&self, imdb_id: &str) -> Result<MovieDetail, SourceError> {
        self.detail(imdb_id).await
    }
}

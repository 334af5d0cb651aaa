use async_trait::async_trait;
use chrono::Utc;
use movie_log_models::{MovieDetail, SearchResultItem, WatchedEntry};
use movie_log_omdb::{MovieSource, SourceError};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

pub(crate) fn result_item(imdb_id: &str, title: &str) -> SearchResultItem {
    SearchResultItem {
        imdb_id: imdb_id.to_string(),
        title: title.to_string(),
        year: "2010".to_string(),
        poster: "https://example.com/poster.jpg".to_string(),
    }
}

pub(crate) fn movie_detail(imdb_id: &str, title: &str, runtime: &str) -> MovieDetail {
    MovieDetail {
        imdb_id: imdb_id.to_string(),
        title: title.to_string(),
        year: "2010".to_string(),
        poster: "https://example.com/poster.jpg".to_string(),
        runtime: runtime.to_string(),
        imdb_rating: Some(8.8),
        plot: "A thief who steals corporate secrets.".to_string(),
        released: "16 Jul 2010".to_string(),
        actors: "Leonardo DiCaprio".to_string(),
        director: "Christopher Nolan".to_string(),
        genre: "Sci-Fi".to_string(),
    }
}

pub(crate) fn watched_entry(imdb_id: &str, user_rating: u8) -> WatchedEntry {
    WatchedEntry {
        imdb_id: imdb_id.to_string(),
        title: format!("Movie {}", imdb_id),
        year: "2010".to_string(),
        poster: "https://example.com/poster.jpg".to_string(),
        runtime_min: Some(148),
        imdb_rating: Some(8.8),
        user_rating,
        rating_decisions: 1,
        date_added: Utc::now(),
    }
}

pub(crate) enum SearchScript {
    Hits(Vec<SearchResultItem>),
    SlowHits(Duration, Vec<SearchResultItem>),
    NotFound,
    Broken,
}

pub(crate) enum DetailScript {
    Found(MovieDetail),
    Broken,
}

/// Scripted stand-in for the remote movie database, keyed by the exact query
/// or identifier. Unscripted lookups answer "not found". Calls are recorded
/// so tests can assert that no request was made at all.
#[derive(Default)]
pub(crate) struct FakeSource {
    searches: HashMap<String, SearchScript>,
    details: HashMap<String, DetailScript>,
    pub search_calls: Mutex<Vec<String>>,
    pub detail_calls: Mutex<Vec<String>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, query: &str, script: SearchScript) -> Self {
        self.searches.insert(query.to_string(), script);
        self
    }

    pub fn with_detail(mut self, imdb_id: &str, script: DetailScript) -> Self {
        self.details.insert(imdb_id.to_string(), script);
        self
    }

    pub fn search_call_count(&self) -> usize {
        self.search_calls.lock().unwrap().len()
    }
}

#[async_trait]
impl MovieSource for FakeSource {
    async fn search(&self, query: &str) -> Result<Vec<SearchResultItem>, SourceError> {
        self.search_calls.lock().unwrap().push(query.to_string());
        match self.searches.get(query) {
            Some(SearchScript::Hits(items)) => Ok(items.clone()),
            Some(SearchScript::SlowHits(delay, items)) => {
                tokio::time::sleep(*delay).await;
                Ok(items.clone())
            }
            Some(SearchScript::NotFound) | None => {
                Err(SourceError::NotFound("Movie not found!".to_string()))
            }
            Some(SearchScript::Broken) => Err(SourceError::Decode("scripted failure".to_string())),
        }
    }

    async fn detail(&self, imdb_id: &str) -> Result<MovieDetail, SourceError> {
        self.detail_calls.lock().unwrap().push(imdb_id.to_string());
        match self.details.get(imdb_id) {
            Some(DetailScript::Found(detail)) => Ok(detail.clone()),
            Some(DetailScript::Broken) => Err(SourceError::Decode("scripted failure".to_string())),
            None => Err(SourceError::NotFound("Incorrect IMDb ID.".to_string())),
        }
    }
}

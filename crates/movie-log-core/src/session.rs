use anyhow::Result;
use movie_log_models::WatchedEntry;
use movie_log_omdb::MovieSource;
use std::sync::Arc;
use tokio::sync::watch;

use crate::detail::DetailSession;
use crate::search::{SearchController, SearchState};
use crate::watched::WatchedStore;

/// Top-level coordinator tying the three pieces together: the search
/// controller, the detail view, and the watched list.
pub struct AppSession {
    search: SearchController,
    detail: DetailSession,
    watched: WatchedStore,
}

impl AppSession {
    pub fn new(source: Arc<dyn MovieSource>, watched: WatchedStore) -> Self {
        Self {
            search: SearchController::new(Arc::clone(&source)),
            detail: DetailSession::new(source),
            watched,
        }
    }

    /// A query change supersedes whatever the user was looking at: the open
    /// detail view closes before the new search starts.
    pub fn set_query(&mut self, query: &str) {
        self.detail.close();
        self.search.set_query(query);
    }

    pub fn subscribe_search(&self) -> watch::Receiver<SearchState> {
        self.search.subscribe()
    }

    pub fn search_state(&self) -> SearchState {
        self.search.state()
    }

    /// Select a movie from the results. Selecting the already-selected one
    /// toggles the view closed instead.
    pub async fn select(&mut self, imdb_id: &str) {
        if self.detail.selected_id() == Some(imdb_id) {
            self.detail.close();
            return;
        }

        self.detail.open(imdb_id, &self.watched).await;
    }

    pub fn close_detail(&mut self) {
        self.detail.close();
    }

    pub fn detail(&self) -> &DetailSession {
        &self.detail
    }

    pub fn detail_mut(&mut self) -> &mut DetailSession {
        &mut self.detail
    }

    pub fn add_to_watched(&mut self) -> Result<WatchedEntry> {
        self.detail.add_to_watched(&mut self.watched)
    }

    pub fn watched(&self) -> &WatchedStore {
        &self.watched
    }

    pub fn watched_mut(&mut self) -> &mut WatchedStore {
        &mut self.watched
    }
}

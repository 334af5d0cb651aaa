use anyhow::{anyhow, bail, ensure, Result};
use chrono::Utc;
use movie_log_models::{MovieDetail, WatchedEntry};
use movie_log_omdb::MovieSource;
use std::sync::Arc;
use tracing::warn;

use crate::watched::WatchedStore;

pub const DETAIL_FAILED: &str = "Something went wrong while fetching the movie details.";

/// Lifecycle of the detail pane for one selected identifier. `Idle` means no
/// selection; closing or selecting anew returns here.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DetailState {
    #[default]
    Idle,
    Loading {
        imdb_id: String,
    },
    Loaded {
        detail: MovieDetail,
    },
    Failed {
        imdb_id: String,
        message: String,
    },
}

/// The detail/rating view: fetches one movie's full record on selection and
/// collects a 1-10 rating. When the identifier is already on the watched
/// list the stored rating is shown read-only instead.
pub struct DetailSession {
    source: Arc<dyn MovieSource>,
    state: DetailState,
    user_rating: Option<u8>,
    rating_decisions: u32,
    watched_rating: Option<u8>,
}

impl DetailSession {
    pub fn new(source: Arc<dyn MovieSource>) -> Self {
        Self {
            source,
            state: DetailState::Idle,
            user_rating: None,
            rating_decisions: 0,
            watched_rating: None,
        }
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        !matches!(self.state, DetailState::Idle)
    }

    pub fn selected_id(&self) -> Option<&str> {
        match &self.state {
            DetailState::Idle => None,
            DetailState::Loading { imdb_id } | DetailState::Failed { imdb_id, .. } => Some(imdb_id),
            DetailState::Loaded { detail } => Some(&detail.imdb_id),
        }
    }

    /// Rating stored on the watched list for the selected movie, when it is
    /// already there. Presence of this puts the view in read-only mode.
    pub fn watched_rating(&self) -> Option<u8> {
        self.watched_rating
    }

    pub fn user_rating(&self) -> Option<u8> {
        self.user_rating
    }

    pub fn rating_decisions(&self) -> u32 {
        self.rating_decisions
    }

    /// Select a movie and fetch its detail record. A fetch failure is
    /// surfaced the same way search failures are: a fixed message in the
    /// state, the cause in the log.
    pub async fn open(&mut self, imdb_id: &str, watched: &WatchedStore) {
        self.close();
        self.watched_rating = watched.user_rating(imdb_id);
        self.state = DetailState::Loading {
            imdb_id: imdb_id.to_string(),
        };

        match self.source.detail(imdb_id).await {
            Ok(detail) => self.state = DetailState::Loaded { detail },
            Err(err) => {
                warn!("Detail fetch for {} failed: {}", imdb_id, err);
                self.state = DetailState::Failed {
                    imdb_id: imdb_id.to_string(),
                    message: DETAIL_FAILED.to_string(),
                };
            }
        }
    }

    pub fn close(&mut self) {
        self.state = DetailState::Idle;
        self.user_rating = None;
        self.rating_decisions = 0;
        self.watched_rating = None;
    }

    /// Pick (or adjust) the rating for the selected movie. Every adjustment
    /// is counted; the count is stored with the entry.
    pub fn set_rating(&mut self, rating: u8) -> Result<()> {
        ensure!((1..=10).contains(&rating), "Rating must be between 1 and 10");
        ensure!(
            self.watched_rating.is_none(),
            "This movie is already rated on the watched list"
        );
        ensure!(self.is_open(), "No movie selected");

        self.user_rating = Some(rating);
        self.rating_decisions += 1;
        Ok(())
    }

    /// Confirm the add: build a watched entry from the loaded detail plus
    /// the chosen rating, append it, and close the view.
    pub fn add_to_watched(&mut self, watched: &mut WatchedStore) -> Result<WatchedEntry> {
        let DetailState::Loaded { detail } = &self.state else {
            bail!("No movie detail loaded");
        };
        ensure!(
            self.watched_rating.is_none(),
            "{} is already on the watched list",
            detail.imdb_id
        );
        let rating = self
            .user_rating
            .ok_or_else(|| anyhow!("No rating chosen yet"))?;

        let entry = entry_from_detail(detail, rating, self.rating_decisions);
        watched.add(entry.clone())?;
        self.close();

        Ok(entry)
    }
}

/// Leading integer of the free-text runtime field: "148 min" -> Some(148).
/// "N/A" and anything else unparsable becomes None rather than a bogus
/// number.
pub fn runtime_minutes(runtime: &str) -> Option<u32> {
    runtime.split_whitespace().next()?.parse().ok()
}

pub fn entry_from_detail(detail: &MovieDetail, user_rating: u8, rating_decisions: u32) -> WatchedEntry {
    WatchedEntry {
        imdb_id: detail.imdb_id.clone(),
        title: detail.title.clone(),
        year: detail.year.clone(),
        poster: detail.poster.clone(),
        runtime_min: runtime_minutes(&detail.runtime),
        imdb_rating: detail.imdb_rating,
        user_rating,
        rating_decisions,
        date_added: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::WatchedStorage;
    use crate::testutil::{movie_detail, watched_entry, DetailScript, FakeSource};

    fn empty_store(dir: &tempfile::TempDir) -> WatchedStore {
        WatchedStore::open(WatchedStorage::new(dir.path().join("watched.json"))).unwrap()
    }

    fn inception_source() -> Arc<FakeSource> {
        Arc::new(FakeSource::new().with_detail(
            "tt1375666",
            DetailScript::Found(movie_detail("tt1375666", "Inception", "148 min")),
        ))
    }

    #[test]
    fn test_runtime_minutes() {
        assert_eq!(runtime_minutes("148 min"), Some(148));
        assert_eq!(runtime_minutes("N/A"), None);
        assert_eq!(runtime_minutes(""), None);
        assert_eq!(runtime_minutes("min 148"), None);
    }

    #[tokio::test]
    async fn test_open_loads_the_detail_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = empty_store(&dir);
        let mut session = DetailSession::new(inception_source());

        session.open("tt1375666", &store).await;

        let DetailState::Loaded { detail } = session.state() else {
            panic!("expected a loaded detail, got {:?}", session.state());
        };
        assert_eq!(detail.title, "Inception");
        assert_eq!(session.selected_id(), Some("tt1375666"));
        assert_eq!(session.watched_rating(), None);
    }

    #[tokio::test]
    async fn test_open_failure_is_surfaced_in_the_state() {
        let dir = tempfile::tempdir().unwrap();
        let store = empty_store(&dir);
        let source = Arc::new(FakeSource::new().with_detail("tt1375666", DetailScript::Broken));
        let mut session = DetailSession::new(source);

        session.open("tt1375666", &store).await;

        assert_eq!(
            session.state(),
            &DetailState::Failed {
                imdb_id: "tt1375666".to_string(),
                message: DETAIL_FAILED.to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_rate_and_add_builds_the_watched_entry() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = empty_store(&dir);
        let mut session = DetailSession::new(inception_source());

        session.open("tt1375666", &store).await;
        session.set_rating(8).unwrap();
        session.set_rating(10).unwrap();
        let entry = session.add_to_watched(&mut store).unwrap();

        assert_eq!(entry.imdb_id, "tt1375666");
        assert_eq!(entry.runtime_min, Some(148));
        assert_eq!(entry.imdb_rating, Some(8.8));
        assert_eq!(entry.user_rating, 10);
        assert_eq!(entry.rating_decisions, 2);

        // Confirming the add closes the view and lands the entry in the store.
        assert!(!session.is_open());
        assert!(store.is_watched("tt1375666"));
    }

    #[tokio::test]
    async fn test_unparsable_runtime_defaults_to_none() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = empty_store(&dir);
        let source = Arc::new(FakeSource::new().with_detail(
            "tt0000001",
            DetailScript::Found(movie_detail("tt0000001", "Unrated", "N/A")),
        ));
        let mut session = DetailSession::new(source);

        session.open("tt0000001", &store).await;
        session.set_rating(5).unwrap();
        let entry = session.add_to_watched(&mut store).unwrap();

        assert_eq!(entry.runtime_min, None);
    }

    #[tokio::test]
    async fn test_already_watched_is_read_only() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = empty_store(&dir);
        store.add(watched_entry("tt1375666", 9)).unwrap();
        let mut session = DetailSession::new(inception_source());

        session.open("tt1375666", &store).await;

        assert_eq!(session.watched_rating(), Some(9));
        assert!(session.set_rating(10).is_err());
        assert!(session.add_to_watched(&mut store).is_err());
        assert_eq!(store.user_rating("tt1375666"), Some(9));
    }

    #[tokio::test]
    async fn test_add_without_a_rating_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = empty_store(&dir);
        let mut session = DetailSession::new(inception_source());

        session.open("tt1375666", &store).await;

        assert!(session.add_to_watched(&mut store).is_err());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_close_resets_rating_state() {
        let dir = tempfile::tempdir().unwrap();
        let store = empty_store(&dir);
        let mut session = DetailSession::new(inception_source());

        session.open("tt1375666", &store).await;
        session.set_rating(7).unwrap();
        session.close();

        assert_eq!(session.state(), &DetailState::Idle);
        assert_eq!(session.user_rating(), None);
        assert_eq!(session.rating_decisions(), 0);
    }
}

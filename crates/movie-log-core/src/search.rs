use movie_log_models::SearchResultItem;
use movie_log_omdb::MovieSource;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::warn;

/// Queries shorter than this never hit the network; they reset the result
/// set instead.
pub const MIN_QUERY_LEN: usize = 3;

pub const MOVIE_NOT_FOUND: &str = "Movie not found";
pub const SEARCH_FAILED: &str = "Something went wrong while fetching the movies.";

/// Snapshot of the search lifecycle, published through a watch channel on
/// every transition.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    pub query: String,
    pub results: Vec<SearchResultItem>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Owns the query string and the derived result set. Each query change
/// supersedes the previous request: the in-flight task is aborted, and a
/// generation check keeps a response that already completed from being
/// applied late. At most one non-superseded response ever reaches the state;
/// ordering is "last query wins" by cancellation, not by response arrival.
pub struct SearchController {
    source: Arc<dyn MovieSource>,
    state: Arc<watch::Sender<SearchState>>,
    generation: Arc<AtomicU64>,
    inflight: Option<JoinHandle<()>>,
}

impl SearchController {
    pub fn new(source: Arc<dyn MovieSource>) -> Self {
        let (tx, _rx) = watch::channel(SearchState::default());
        Self {
            source,
            state: Arc::new(tx),
            generation: Arc::new(AtomicU64::new(0)),
            inflight: None,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> SearchState {
        self.state.borrow().clone()
    }

    /// Replace the active query, cancelling whatever request is still in
    /// flight for the previous one. Cancellation is never surfaced as an
    /// error.
    pub fn set_query(&mut self, query: &str) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(handle) = self.inflight.take() {
            handle.abort();
        }

        if query.chars().count() < MIN_QUERY_LEN {
            self.state.send_replace(SearchState {
                query: query.to_string(),
                ..SearchState::default()
            });
            return;
        }

        self.state.send_replace(SearchState {
            query: query.to_string(),
            loading: true,
            ..SearchState::default()
        });

        let source = Arc::clone(&self.source);
        let state = Arc::clone(&self.state);
        let current = Arc::clone(&self.generation);
        let query = query.to_string();

        self.inflight = Some(tokio::spawn(async move {
            let outcome = source.search(&query).await;

            // Superseded while the response was on the wire.
            if current.load(Ordering::SeqCst) != generation {
                return;
            }

            let next = match outcome {
                Ok(results) => SearchState {
                    query,
                    results,
                    loading: false,
                    error: None,
                },
                Err(err) if err.is_not_found() => SearchState {
                    query,
                    results: Vec::new(),
                    loading: false,
                    error: Some(MOVIE_NOT_FOUND.to_string()),
                },
                Err(err) => {
                    warn!("Search failed: {}", err);
                    SearchState {
                        query,
                        results: Vec::new(),
                        loading: false,
                        error: Some(SEARCH_FAILED.to_string()),
                    }
                }
            };
            state.send_replace(next);
        }));
    }
}

impl Drop for SearchController {
    fn drop(&mut self) {
        if let Some(handle) = self.inflight.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{result_item, FakeSource, SearchScript};
    use std::time::Duration;

    fn controller_with(source: FakeSource) -> (SearchController, Arc<FakeSource>) {
        let source = Arc::new(source);
        (SearchController::new(source.clone()), source)
    }

    async fn settled(controller: &SearchController) -> SearchState {
        let mut rx = controller.subscribe();
        let state = rx.wait_for(|state| !state.loading).await.unwrap().clone();
        state
    }

    #[tokio::test]
    async fn test_short_query_clears_results_without_a_request() {
        let (mut controller, source) = controller_with(
            FakeSource::new().with_search("in", SearchScript::Hits(vec![result_item("tt1", "In")])),
        );

        controller.set_query("in");

        let state = controller.state();
        assert_eq!(state.results, Vec::new());
        assert_eq!(state.error, None);
        assert!(!state.loading);
        assert_eq!(source.search_call_count(), 0);
    }

    #[tokio::test]
    async fn test_query_applies_results() {
        let (mut controller, _source) = controller_with(FakeSource::new().with_search(
            "Inception",
            SearchScript::Hits(vec![result_item("tt1375666", "Inception")]),
        ));

        controller.set_query("Inception");
        assert!(controller.state().loading);

        let state = settled(&controller).await;
        assert_eq!(state.results.len(), 1);
        assert_eq!(state.results[0].imdb_id, "tt1375666");
        assert_eq!(state.error, None);
    }

    #[tokio::test]
    async fn test_no_matches_sets_the_not_found_message() {
        let (mut controller, _source) = controller_with(
            FakeSource::new().with_search("zzzzzz", SearchScript::NotFound),
        );

        controller.set_query("zzzzzz");

        let state = settled(&controller).await;
        assert_eq!(state.error.as_deref(), Some(MOVIE_NOT_FOUND));
        assert_eq!(state.results, Vec::new());
    }

    #[tokio::test]
    async fn test_transport_failure_sets_the_fixed_message() {
        let (mut controller, _source) = controller_with(
            FakeSource::new().with_search("Inception", SearchScript::Broken),
        );

        controller.set_query("Inception");

        let state = settled(&controller).await;
        assert_eq!(state.error.as_deref(), Some(SEARCH_FAILED));
    }

    #[tokio::test]
    async fn test_last_query_wins_over_a_slower_predecessor() {
        let (mut controller, _source) = controller_with(
            FakeSource::new()
                .with_search(
                    "slow movie",
                    SearchScript::SlowHits(
                        Duration::from_millis(200),
                        vec![result_item("tt0000001", "Slow Movie")],
                    ),
                )
                .with_search(
                    "fast movie",
                    SearchScript::Hits(vec![result_item("tt0000002", "Fast Movie")]),
                ),
        );

        controller.set_query("slow movie");
        tokio::time::sleep(Duration::from_millis(50)).await;
        controller.set_query("fast movie");

        let state = settled(&controller).await;
        assert_eq!(state.results[0].imdb_id, "tt0000002");

        // Give the superseded request's deadline time to pass; its response
        // must never show up.
        tokio::time::sleep(Duration::from_millis(300)).await;
        let state = controller.state();
        assert_eq!(state.results[0].imdb_id, "tt0000002");
        assert_eq!(state.query, "fast movie");
    }

    #[tokio::test]
    async fn test_cancellation_is_not_surfaced_as_an_error() {
        let (mut controller, source) = controller_with(FakeSource::new().with_search(
            "slow movie",
            SearchScript::SlowHits(
                Duration::from_millis(200),
                vec![result_item("tt0000001", "Slow Movie")],
            ),
        ));

        controller.set_query("slow movie");
        tokio::time::sleep(Duration::from_millis(50)).await;
        controller.set_query("no");

        tokio::time::sleep(Duration::from_millis(300)).await;
        let state = controller.state();
        assert_eq!(state.query, "no");
        assert_eq!(state.results, Vec::new());
        assert_eq!(state.error, None);
        assert_eq!(source.search_call_count(), 1);
    }

    #[tokio::test]
    async fn test_drop_aborts_the_inflight_request() {
        let (mut controller, _source) = controller_with(FakeSource::new().with_search(
            "slow movie",
            SearchScript::SlowHits(
                Duration::from_millis(200),
                vec![result_item("tt0000001", "Slow Movie")],
            ),
        ));

        controller.set_query("slow movie");
        let mut rx = controller.subscribe();
        drop(controller);

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert!(rx.borrow_and_update().loading);
    }
}

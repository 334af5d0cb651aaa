pub mod detail;
pub mod search;
pub mod session;
pub mod storage;
pub mod watched;

#[cfg(test)]
pub(crate) mod testutil;

pub use detail::{entry_from_detail, runtime_minutes, DetailSession, DetailState};
pub use search::{SearchController, SearchState, MIN_QUERY_LEN};
pub use session::AppSession;
pub use storage::WatchedStorage;
pub use watched::{WatchedStore, WatchedSummary};

pub mod detail;
pub mod search;
pub mod watched;

pub use detail::MovieDetail;
pub use search::SearchResultItem;
pub use watched::WatchedEntry;

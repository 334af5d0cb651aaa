use serde::{Deserialize, Serialize};

/// One row of a search result set. Immutable once produced; lives only as
/// long as the result set it came from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResultItem {
    pub imdb_id: String,
    pub title: String,
    pub year: String, // Free-text from the API ("2010", "2011-2019")
    pub poster: String,
}

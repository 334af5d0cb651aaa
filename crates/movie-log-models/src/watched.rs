use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A rated movie on the watched list. The list as a whole is the unit of
/// persistence; `imdb_id` is unique within it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchedEntry {
    pub imdb_id: String,
    pub title: String,
    pub year: String,
    pub poster: String,
    pub runtime_min: Option<u32>, // Parsed from the free-text runtime; None when unparsable
    pub imdb_rating: Option<f64>,
    pub user_rating: u8, // 1-10
    #[serde(default)]
    pub rating_decisions: u32, // How many times the rating was adjusted before adding
    pub date_added: DateTime<Utc>,
}

use serde::{Deserialize, Serialize};

/// Full record for a single movie, fetched fresh per selection and never
/// cached across selections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetail {
    pub imdb_id: String,
    pub title: String,
    pub year: String,
    pub poster: String,
    pub runtime: String, // Free-text, e.g. "148 min" or "N/A"
    pub imdb_rating: Option<f64>, // 0-10, None when the API reports "N/A"
    pub plot: String,
    pub released: String,
    pub actors: String,
    pub director: String,
    pub genre: String,
}

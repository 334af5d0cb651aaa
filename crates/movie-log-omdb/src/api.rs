use movie_log_models::{MovieDetail, SearchResultItem};
use serde::Deserialize;

use crate::error::SourceError;

/// Envelope of a search response. The API signals "no matches" in-band with
/// `Response: "False"` and a 200 status, so `Search` has to default to empty.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchEnvelope {
    #[serde(rename = "Search", default)]
    search: Vec<SearchRecord>,
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Error")]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchRecord {
    #[serde(rename = "imdbID")]
    imdb_id: String,
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Year", default)]
    year: String,
    #[serde(rename = "Poster", default)]
    poster: String,
}

/// Detail responses reuse the same `Response`/`Error` convention. Text
/// fields may carry the literal "N/A" instead of being absent.
#[derive(Debug, Deserialize)]
pub(crate) struct DetailEnvelope {
    #[serde(rename = "imdbID", default)]
    imdb_id: String,
    #[serde(rename = "Title", default)]
    title: String,
    #[serde(rename = "Year", default)]
    year: String,
    #[serde(rename = "Poster", default)]
    poster: String,
    #[serde(rename = "Runtime", default)]
    runtime: String,
    #[serde(rename = "imdbRating", default)]
    imdb_rating: String,
    #[serde(rename = "Plot", default)]
    plot: String,
    #[serde(rename = "Released", default)]
    released: String,
    #[serde(rename = "Actors", default)]
    actors: String,
    #[serde(rename = "Director", default)]
    director: String,
    #[serde(rename = "Genre", default)]
    genre: String,
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Error")]
    error: Option<String>,
}

fn in_band_error(response: &str, error: Option<String>) -> Option<SourceError> {
    if response == "True" {
        return None;
    }
    Some(SourceError::NotFound(
        error.unwrap_or_else(|| "Movie not found!".to_string()),
    ))
}

/// "8.8" -> Some(8.8); "N/A", empty, or garbage -> None.
fn numeric_or_none(text: &str) -> Option<f64> {
    match text {
        "" | "N/A" => None,
        other => other.parse().ok(),
    }
}

pub(crate) fn search_results(envelope: SearchEnvelope) -> Result<Vec<SearchResultItem>, SourceError> {
    if let Some(err) = in_band_error(&envelope.response, envelope.error) {
        return Err(err);
    }

    Ok(envelope
        .search
        .into_iter()
        .map(|record| SearchResultItem {
            imdb_id: record.imdb_id,
            title: record.title,
            year: record.year,
            poster: record.poster,
        })
        .collect())
}

pub(crate) fn movie_detail(envelope: DetailEnvelope) -> Result<MovieDetail, SourceError> {
    if let Some(err) = in_band_error(&envelope.response, envelope.error) {
        return Err(err);
    }

    Ok(MovieDetail {
        imdb_id: envelope.imdb_id,
        title: envelope.title,
        year: envelope.year,
        poster: envelope.poster,
        runtime: envelope.runtime,
        imdb_rating: numeric_or_none(&envelope.imdb_rating),
        plot: envelope.plot,
        released: envelope.released,
        actors: envelope.actors,
        director: envelope.director,
        genre: envelope.genre,
    })
}

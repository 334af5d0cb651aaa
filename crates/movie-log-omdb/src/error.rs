use thiserror::Error;

/// Failure kinds of the movie database. A non-2xx status and an in-band
/// `Response: "False"` are distinct: the first is a transport problem, the
/// second a well-formed "no such movie" answer.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected status: {0}")]
    Status(reqwest::StatusCode),

    #[error("{0}")]
    NotFound(String),

    #[error("malformed response: {0}")]
    Decode(String),
}

impl SourceError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

use thiserror::Error;

use crate::notes::NotesError;

/// Failures of the catalog fetch-and-assemble layer.
///
/// All of these abort the enclosing fan-out as a whole: a single failing
/// season or episode fails the entire catalog call, never a partial result.
/// Retries, timeouts and backoff are the transport's business, not ours.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("http error {status} for {url}")]
    Http {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("could not determine season id from {href} for season {number}")]
    SeasonRef { number: u32, href: String },

    #[error("show notes extraction failed: {0}")]
    Notes(#[from] NotesError),

    #[error("episode task failed: {0}")]
    Task(String),
}

//! Shared error taxonomy.
//!
//! Three kinds cover everything that can go wrong end to end:
//! - `InvalidInput`: a precondition on caller-supplied data was violated
//!   (empty forecast window, malformed or out-of-range coordinates).
//! - `FetchFailure`: an upstream collaborator (forecast / geocoding) could
//!   not supply data. Propagated with its message, never retried here.
//! - `NotFound`: a lookup completed but produced no results.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdvisorError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("upstream fetch failed: {0}")]
    FetchFailure(String),

    #[error("not found: {0}")]
    NotFound(String),
}

impl From<reqwest::Error> for AdvisorError {
    fn from(err: reqwest::Error) -> Self {
        Self::FetchFailure(err.to_string())
    }
}

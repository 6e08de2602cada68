//! Error types for the lookup service boundary.
//!
//! The three variants map the failure classes the executor absorbs: the
//! request could not complete, the service answered with a non-success
//! status, or the body did not match the expected shape. All of them are
//! logged at the worker and leave the overlay state untouched.

use thiserror::Error;

/// Errors that can occur while querying the lookup service.
#[derive(Error, Debug)]
pub enum SearchError {
    /// The request could not complete (connect, DNS, timeout).
    #[error("search request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The service was reachable but answered with a non-success status.
    #[error("search service returned {status}: {message}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// Response body, best effort.
        message: String,
    },

    /// The response body did not match the expected shape.
    #[error("malformed search payload: {0}")]
    Payload(#[source] reqwest::Error),
}

/// Type alias for Result with SearchError.
pub type SearchResult<T> = Result<T, SearchError>;

impl SearchError {
    /// Check if this error is a non-success status from the service.
    pub fn is_status(&self) -> bool {
        matches!(self, Self::Status { .. })
    }
}

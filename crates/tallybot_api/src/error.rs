//! Errors from the ledger service boundary.

use thiserror::Error;

/// A failed ledger service call.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The service could not be reached.
    #[error("connection to the ledger service failed: {0}")]
    Connection(String),

    /// The service refused the request for user-level reasons: unknown or
    /// ambiguous user, insufficient funds, bad input. The message is fit to
    /// show to the user.
    #[error("{0}")]
    User(String),

    /// The service answered in an unexpected way.
    #[error("ledger service error (status {status}): {message}")]
    Service {
        /// HTTP-style status code of the response.
        status: u16,
        /// Error detail from the response body, when one was decodable.
        message: String,
    },
}

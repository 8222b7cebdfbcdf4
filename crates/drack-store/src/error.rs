//! Record store error types.

/// Errors raised while talking to the record store.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    /// The HTTP request could not be sent or its body not read.
    #[error("Record store request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("Record store returned {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Error message reported by the server.
        message: String,
    },

    /// Superuser authentication failed.
    #[error("Record store authentication failed: {0}")]
    Auth(String),

    /// A record could not be decoded into a balance.
    #[error("Malformed record {record}: {reason}")]
    Decode {
        /// Record identifier.
        record: String,
        /// What was wrong with it.
        reason: String,
    },

    /// The configured URL cannot be used.
    #[error("Invalid record store URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Result type for record store operations.
pub type StoreResult<T> = Result<T, StoreError>;

//! Error types for data fetching.

/// Result type alias for fetch operations.
pub type Result<T> = std::result::Result<T, FetchError>;

/// Errors a fetcher implementation can report.
///
/// These surface to schema consumers as the `error` field of a view data
/// result, never as a panic or an escaping error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FetchError {
    /// The request could not be sent or the connection failed.
    #[error("request failed: {0}")]
    Request(String),

    /// The server answered with an error status.
    #[error("HTTP status {status}{}", message.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
    Status {
        /// The HTTP status code.
        status: u16,
        /// Optional message from the response body.
        message: Option<String>,
    },

    /// The response body could not be decoded.
    #[error("invalid response body: {0}")]
    Body(String),

    /// The URL was not valid.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The named object is not known to the record fetcher.
    #[error("unknown object '{0}'")]
    UnknownObject(String),
}

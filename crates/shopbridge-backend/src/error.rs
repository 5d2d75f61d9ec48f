//! Backend client error types.

/// Errors that can occur when calling the marketplace backend.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// HTTP request failed (connection, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with a non-success status.
    #[error("backend error: {status} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the response body, or the status line.
        message: String,
    },

    /// Invalid client configuration.
    #[error("configuration error: {0}")]
    Configuration(String),
}

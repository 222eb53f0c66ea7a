// ── Collaborator error taxonomy ──
//
// Failure modes a directory or listener implementation may surface.
// Transport-agnostic on purpose: this crate defines contracts, so the
// variants describe *what went wrong* without naming an HTTP library.

use thiserror::Error as ThisError;

/// Unified error type for collaborator implementations.
#[derive(Debug, ThisError)]
#[non_exhaustive]
pub enum Error {
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    #[error("Cannot reach the platform: {reason}")]
    Connection { reason: String },

    #[error("Rate limited -- retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Platform API error: {message}")]
    Api {
        message: String,
        /// HTTP status code, when the transport has one.
        status: Option<u16>,
    },

    #[error("Malformed platform response: {message}")]
    Deserialization { message: String },
}

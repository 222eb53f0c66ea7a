// ── Core error types ──
//
// User-facing errors from scoutbridge-core. These are NOT API-specific --
// consumers never see HTTP status codes or JSON parse failures directly.
// The `From<scoutbridge_api::Error>` impl translates collaborator errors
// into domain-appropriate variants.

use thiserror::Error;

use crate::host::HostError;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CoreError {
    // ── Upstream platform errors ─────────────────────────────────────
    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Cannot reach the platform: {reason}")]
    ConnectionFailed { reason: String },

    #[error("Platform API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if the transport had one).
        status: Option<u16>,
    },

    // ── Host runtime errors ──────────────────────────────────────────
    #[error("Host runtime error: {0}")]
    Host(#[from] HostError),

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Conversion from collaborator errors ──────────────────────────────

impl From<scoutbridge_api::Error> for CoreError {
    fn from(err: scoutbridge_api::Error) -> Self {
        match err {
            scoutbridge_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            scoutbridge_api::Error::Connection { reason } => {
                CoreError::ConnectionFailed { reason }
            }
            scoutbridge_api::Error::RateLimited { retry_after_secs } => CoreError::Api {
                message: format!("Rate limited -- retry after {retry_after_secs}s"),
                status: Some(429),
            },
            scoutbridge_api::Error::Api { message, status } => CoreError::Api { message, status },
            scoutbridge_api::Error::Deserialization { message } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
            other => CoreError::Internal(other.to_string()),
        }
    }
}

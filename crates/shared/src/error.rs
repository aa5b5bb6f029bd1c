//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Fallback message shown when the backend returns no usable message.
pub const GENERIC_MESSAGE: &str = "Something went wrong. Please try again.";

/// Application error types.
///
/// These classify everything the panel can hit while talking to the
/// backend: wire statuses, transport failures, and client-side
/// validation. None of them are fatal to a page.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AppError {
    /// Authentication failed (401-class, including a failed password probe).
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    /// Access denied (403-class).
    #[error("Access denied: {0}")]
    Forbidden(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error (client-side or 400/422-class).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Conflict (duplicate entry, or a mutation already in flight).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Transport failure: DNS, connection refused, timeout.
    #[error("Network error: {0}")]
    Network(String),

    /// Any other non-success response from the backend.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status the backend answered with.
        status: u16,
        /// Message from the error envelope, or the generic fallback.
        message: String,
    },

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the error code for logging and machine handling.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Conflict(_) => "CONFLICT",
            Self::Network(_) => "NETWORK_ERROR",
            Self::Api { .. } => "API_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Maps an HTTP status and envelope message into an error variant.
    ///
    /// Blank messages are replaced with [`GENERIC_MESSAGE`] so the UI
    /// never renders an empty banner.
    #[must_use]
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            GENERIC_MESSAGE.to_string()
        } else {
            message
        };

        match status {
            401 => Self::Unauthorized(message),
            403 => Self::Forbidden(message),
            404 => Self::NotFound(message),
            400 | 422 => Self::Validation(message),
            409 => Self::Conflict(message),
            _ => Self::Api { status, message },
        }
    }

    /// Whether this error is a 401/403-class denial.
    ///
    /// Optional enrichment paths swallow these and degrade instead of
    /// surfacing an error to the user.
    #[must_use]
    pub const fn is_permission_denied(&self) -> bool {
        matches!(self, Self::Unauthorized(_) | Self::Forbidden(_))
    }

    /// Returns the message suitable for a UI banner.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Unauthorized(msg)
            | Self::Forbidden(msg)
            | Self::NotFound(msg)
            | Self::Validation(msg)
            | Self::Conflict(msg)
            | Self::Network(msg)
            | Self::Internal(msg) => msg,
            Self::Api { message, .. } => message,
        }
    }
}

//! Error types for the confirmation gate.

use thiserror::Error;

use crate::confirm::types::ConfirmStage;

/// Errors that can occur during confirmation gate operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GateError {
    /// Attempted an invalid stage transition.
    #[error("Invalid stage transition from {from} to {to}")]
    InvalidTransition {
        /// The current stage.
        from: ConfirmStage,
        /// The attempted target stage.
        to: ConfirmStage,
    },

    /// A non-empty password is required before confirming.
    #[error("Password is required")]
    PasswordRequired,
}

impl GateError {
    /// Returns the error code for surfacing to the UI layer.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::PasswordRequired => "PASSWORD_REQUIRED",
        }
    }
}

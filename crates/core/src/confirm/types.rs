//! Confirmation dialog stages.
//!
//! This module defines the stages a destructive-action confirmation
//! moves through between opening the dialog and completing the action.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stage of a password-confirmed destructive action.
///
/// A confirmation progresses through these stages. The valid
/// transitions are:
/// - Idle → PasswordEntered (type password)
/// - PasswordEntered → PasswordEntered (retype)
/// - PasswordEntered → Verifying (confirm)
/// - Verifying → Mutating (password correct)
/// - Verifying → Idle (password wrong)
/// - Mutating → Done (action finished)
/// - any → Idle (cancel)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfirmStage {
    /// Dialog is open and no usable password has been entered.
    #[default]
    Idle,
    /// A non-empty password is staged, waiting for the confirm click.
    PasswordEntered,
    /// The password is being checked against the backend.
    Verifying,
    /// Verification succeeded and the destructive action is running.
    Mutating,
    /// The action completed.
    Done,
}

impl ConfirmStage {
    /// Returns the string representation of the stage.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::PasswordEntered => "password_entered",
            Self::Verifying => "verifying",
            Self::Mutating => "mutating",
            Self::Done => "done",
        }
    }

    /// Parses a stage from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "idle" => Some(Self::Idle),
            "password_entered" => Some(Self::PasswordEntered),
            "verifying" => Some(Self::Verifying),
            "mutating" => Some(Self::Mutating),
            "done" => Some(Self::Done),
            _ => None,
        }
    }

    /// Returns true while a backend call is in flight.
    ///
    /// The dialog disables its buttons and shows a spinner while busy.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Verifying | Self::Mutating)
    }

    /// Returns true if the stage accepts password input.
    #[must_use]
    pub fn accepts_password(&self) -> bool {
        matches!(self, Self::Idle | Self::PasswordEntered)
    }
}

impl fmt::Display for ConfirmStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

//! Confirmation gate state machine.
//!
//! This module implements the stage transitions for password-confirmed
//! destructive actions. The gate owns the typed password and guarantees
//! it is wiped as soon as the verification outcome is known.

use std::mem;

use crate::confirm::error::GateError;
use crate::confirm::types::ConfirmStage;

/// Field error shown when password verification fails.
pub const INCORRECT_PASSWORD_MESSAGE: &str = "Incorrect password. Please try again.";

/// State of one destructive-action confirmation dialog.
///
/// The gate validates every stage transition and refuses to hand out
/// a password outside the confirm step, so a mutation can only run
/// after a successful verification. The stored password is overwritten
/// with zeroes before being dropped.
#[derive(Debug)]
pub struct ConfirmGate {
    stage: ConfirmStage,
    password: String,
    field_error: Option<&'static str>,
}

impl ConfirmGate {
    /// Creates a gate in the `Idle` stage with no password staged.
    #[must_use]
    pub fn new() -> Self {
        Self {
            stage: ConfirmStage::Idle,
            password: String::new(),
            field_error: None,
        }
    }

    /// Returns the current stage.
    #[must_use]
    pub fn stage(&self) -> ConfirmStage {
        self.stage
    }

    /// Returns true if a password is currently staged.
    #[must_use]
    pub fn has_password(&self) -> bool {
        !self.password.is_empty()
    }

    /// Returns the field error to show under the password input, if any.
    #[must_use]
    pub fn field_error(&self) -> Option<&'static str> {
        self.field_error
    }

    /// Stages the password typed into the dialog.
    ///
    /// Clears any previous field error. Replacing an already staged
    /// password wipes the old one first.
    ///
    /// # Returns
    /// * `Err(GateError::PasswordRequired)` if the password is blank
    /// * `Err(GateError::InvalidTransition)` while a call is in flight
    pub fn enter_password(&mut self, password: impl Into<String>) -> Result<(), GateError> {
        if !self.stage.accepts_password() {
            return Err(GateError::InvalidTransition {
                from: self.stage,
                to: ConfirmStage::PasswordEntered,
            });
        }

        let password = password.into();
        if password.trim().is_empty() {
            return Err(GateError::PasswordRequired);
        }

        self.scrub_password();
        self.password = password;
        self.field_error = None;
        self.stage = ConfirmStage::PasswordEntered;
        Ok(())
    }

    /// Starts verification, handing out the staged password for the
    /// credential check.
    ///
    /// # Returns
    /// * `Ok(password)` and moves to `Verifying`
    /// * `Err(GateError::PasswordRequired)` if confirm was clicked with
    ///   nothing staged
    /// * `Err(GateError::InvalidTransition)` from any other stage
    pub fn begin_verify(&mut self) -> Result<String, GateError> {
        match self.stage {
            ConfirmStage::PasswordEntered => {
                self.stage = ConfirmStage::Verifying;
                Ok(self.password.clone())
            }
            ConfirmStage::Idle => Err(GateError::PasswordRequired),
            from => Err(GateError::InvalidTransition {
                from,
                to: ConfirmStage::Verifying,
            }),
        }
    }

    /// Records a successful verification and unlocks the mutation.
    ///
    /// The staged password is wiped; the caller already holds the copy
    /// returned by [`Self::begin_verify`] if the mutation needs it.
    pub fn verified(&mut self) -> Result<(), GateError> {
        match self.stage {
            ConfirmStage::Verifying => {
                self.scrub_password();
                self.stage = ConfirmStage::Mutating;
                Ok(())
            }
            from => Err(GateError::InvalidTransition {
                from,
                to: ConfirmStage::Mutating,
            }),
        }
    }

    /// Records a failed verification.
    ///
    /// Returns to `Idle`, wipes the staged password, and sets the
    /// field error to [`INCORRECT_PASSWORD_MESSAGE`]. The user must
    /// retype before confirming again.
    pub fn verification_failed(&mut self) -> Result<(), GateError> {
        match self.stage {
            ConfirmStage::Verifying => {
                self.scrub_password();
                self.field_error = Some(INCORRECT_PASSWORD_MESSAGE);
                self.stage = ConfirmStage::Idle;
                Ok(())
            }
            from => Err(GateError::InvalidTransition {
                from,
                to: ConfirmStage::Idle,
            }),
        }
    }

    /// Records that the unlocked mutation finished.
    pub fn mutation_done(&mut self) -> Result<(), GateError> {
        match self.stage {
            ConfirmStage::Mutating => {
                self.stage = ConfirmStage::Done;
                Ok(())
            }
            from => Err(GateError::InvalidTransition {
                from,
                to: ConfirmStage::Done,
            }),
        }
    }

    /// Cancels the confirmation from any stage.
    ///
    /// Wipes the staged password and field error immediately and
    /// returns to `Idle`.
    pub fn cancel(&mut self) {
        self.scrub_password();
        self.field_error = None;
        self.stage = ConfirmStage::Idle;
    }

    /// Checks if a stage transition is valid.
    ///
    /// Valid transitions:
    /// - Idle | PasswordEntered → PasswordEntered (type/retype)
    /// - PasswordEntered → Verifying (confirm)
    /// - Verifying → Mutating (password correct)
    /// - Mutating → Done (action finished)
    /// - any → Idle (cancel or failed verification)
    #[must_use]
    pub fn is_valid_transition(from: ConfirmStage, to: ConfirmStage) -> bool {
        matches!(
            (from, to),
            (
                ConfirmStage::Idle | ConfirmStage::PasswordEntered,
                ConfirmStage::PasswordEntered
            ) | (ConfirmStage::PasswordEntered, ConfirmStage::Verifying)
                | (ConfirmStage::Verifying, ConfirmStage::Mutating)
                | (ConfirmStage::Mutating, ConfirmStage::Done)
                | (_, ConfirmStage::Idle)
        )
    }

    /// Overwrites the staged password with zeroes, then drops it.
    fn scrub_password(&mut self) {
        let mut bytes = mem::take(&mut self.password).into_bytes();
        for byte in &mut bytes {
            *byte = 0;
        }
        drop(bytes);
    }
}

impl Default for ConfirmGate {
    fn default() -> Self {
        Self::new()
    }
}

//! The verify-then-mutate flow behind destructive actions.
//!
//! Wrong password and failed mutation are different outcomes on
//! purpose: the first never reaches the backend mutation at all, the
//! second happened after the password checked out.

use std::future::Future;

use finboard_core::confirm::{ConfirmGate, ConfirmStage, GateError};
use finboard_shared::error::{AppError, AppResult};

use crate::api::CredentialProbe;

/// How a confirmed mutation ended.
#[derive(Debug, PartialEq)]
pub enum ConfirmOutcome<T> {
    /// Password verified and the mutation succeeded.
    Done(T),
    /// The password did not verify. The mutation was never invoked and
    /// the modal shows the field error.
    IncorrectPassword,
    /// The password verified but the mutation itself failed.
    MutationFailed(AppError),
}

impl<T> ConfirmOutcome<T> {
    /// Whether the mutation ran and succeeded.
    #[must_use]
    pub const fn is_done(&self) -> bool {
        matches!(self, Self::Done(_))
    }
}

/// Drives one destructive action through password re-verification.
///
/// One instance per confirm modal. The password enters through
/// [`enter_password`](Self::enter_password) and lives inside the gate;
/// [`execute`](Self::execute) verifies it against the probe and only
/// then hands it to the mutation as the confirmation token.
pub struct VerifyThenMutate<'a, P> {
    probe: &'a P,
    gate: ConfirmGate,
}

impl<'a, P: CredentialProbe> VerifyThenMutate<'a, P> {
    /// Creates an idle flow over the given probe.
    #[must_use]
    pub fn new(probe: &'a P) -> Self {
        Self {
            probe,
            gate: ConfirmGate::new(),
        }
    }

    /// Stores the password typed into the modal.
    pub fn enter_password(&mut self, password: impl Into<String>) -> Result<(), GateError> {
        self.gate.enter_password(password)
    }

    /// Current stage, for rendering the modal.
    #[must_use]
    pub fn stage(&self) -> ConfirmStage {
        self.gate.stage()
    }

    /// The field error to show under the password input, if any.
    #[must_use]
    pub fn field_error(&self) -> Option<&'static str> {
        self.gate.field_error()
    }

    /// Read access to the underlying gate.
    #[must_use]
    pub const fn gate(&self) -> &ConfirmGate {
        &self.gate
    }

    /// Verifies the password, then runs the mutation with it.
    ///
    /// On a failed probe the gate returns to idle with the incorrect
    /// password field error and the mutation is never invoked. On a
    /// failed mutation the gate stays where it was; the caller dismisses
    /// the modal with [`cancel`](Self::cancel).
    pub async fn execute<F, Fut, T>(&mut self, mutation: F) -> ConfirmOutcome<T>
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = AppResult<T>>,
    {
        let password = match self.gate.begin_verify() {
            Ok(password) => password,
            Err(err) => return ConfirmOutcome::MutationFailed(gate_error(&err)),
        };

        match self.probe.verify_password(&password).await {
            Ok(()) => {
                if let Err(err) = self.gate.verified() {
                    return ConfirmOutcome::MutationFailed(gate_error(&err));
                }
            }
            // Any probe failure reads as a wrong password.
            Err(_) => {
                return match self.gate.verification_failed() {
                    Ok(()) => ConfirmOutcome::IncorrectPassword,
                    Err(err) => ConfirmOutcome::MutationFailed(gate_error(&err)),
                };
            }
        }

        match mutation(password).await {
            Ok(value) => match self.gate.mutation_done() {
                Ok(()) => ConfirmOutcome::Done(value),
                Err(err) => ConfirmOutcome::MutationFailed(gate_error(&err)),
            },
            Err(err) => ConfirmOutcome::MutationFailed(err),
        }
    }

    /// Dismisses the modal: stage back to idle, password wiped.
    ///
    /// Does not abort a mutation already handed to the network; its
    /// response is ignored by whoever awaited it.
    pub fn cancel(&mut self) {
        self.gate.cancel();
    }
}

fn gate_error(err: &GateError) -> AppError {
    match err {
        GateError::PasswordRequired => AppError::Validation(err.to_string()),
        GateError::InvalidTransition { .. } => AppError::Conflict(err.to_string()),
    }
}

//! Password re-verification gate for destructive actions.
//!
//! Destructive mutations (deleting a user, rejecting an expense) must
//! not fire on a single click. This module models the confirmation
//! dialog as a small state machine: the actor re-enters their account
//! password, the password is checked against the backend, and only a
//! successful check unlocks the mutation.
//!
//! # Modules
//!
//! - `types` - Confirmation stages (ConfirmStage)
//! - `error` - Gate-specific error types
//! - `service` - Stage transition logic and password handling

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use error::GateError;
pub use service::{ConfirmGate, INCORRECT_PASSWORD_MESSAGE};
pub use types::ConfirmStage;

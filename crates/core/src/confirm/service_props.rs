//! Property-based tests for the confirmation gate.
//!
//! These drive the gate with arbitrary operation sequences and verify
//! the safety invariants: only valid stage transitions ever happen, a
//! mutation can only be unlocked from a successful verification, and
//! the password never survives a flow exit.

use proptest::prelude::*;

use crate::confirm::service::{ConfirmGate, INCORRECT_PASSWORD_MESSAGE};
use crate::confirm::types::ConfirmStage;

// ============================================================================
// Strategies
// ============================================================================

/// One user- or backend-driven gate event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GateOp {
    EnterPassword,
    EnterBlank,
    BeginVerify,
    Verified,
    VerificationFailed,
    MutationDone,
    Cancel,
}

fn arb_op() -> impl Strategy<Value = GateOp> {
    prop::sample::select(vec![
        GateOp::EnterPassword,
        GateOp::EnterBlank,
        GateOp::BeginVerify,
        GateOp::Verified,
        GateOp::VerificationFailed,
        GateOp::MutationDone,
        GateOp::Cancel,
    ])
}

fn arb_ops() -> impl Strategy<Value = Vec<GateOp>> {
    prop::collection::vec(arb_op(), 0..=40)
}

/// Applies one op, returning whether the gate accepted it.
fn apply(gate: &mut ConfirmGate, op: GateOp) -> bool {
    match op {
        GateOp::EnterPassword => gate.enter_password("hunter2").is_ok(),
        GateOp::EnterBlank => gate.enter_password("   ").is_ok(),
        GateOp::BeginVerify => gate.begin_verify().is_ok(),
        GateOp::Verified => gate.verified().is_ok(),
        GateOp::VerificationFailed => gate.verification_failed().is_ok(),
        GateOp::MutationDone => gate.mutation_done().is_ok(),
        GateOp::Cancel => {
            gate.cancel();
            true
        }
    }
}

// ============================================================================
// Safety invariants
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_accepted_ops_follow_valid_transitions(ops in arb_ops()) {
        let mut gate = ConfirmGate::new();
        for op in ops {
            let before = gate.stage();
            let accepted = apply(&mut gate, op);
            let after = gate.stage();

            if accepted && before != after {
                prop_assert!(
                    ConfirmGate::is_valid_transition(before, after),
                    "op {:?} moved gate {} -> {}",
                    op,
                    before,
                    after
                );
            }
            if !accepted {
                prop_assert_eq!(after, before);
            }
        }
    }

    #[test]
    fn prop_mutating_only_entered_via_verified(ops in arb_ops()) {
        let mut gate = ConfirmGate::new();
        for op in ops {
            let before = gate.stage();
            apply(&mut gate, op);

            if gate.stage() == ConfirmStage::Mutating && before != ConfirmStage::Mutating {
                prop_assert_eq!(op, GateOp::Verified);
                prop_assert_eq!(before, ConfirmStage::Verifying);
            }
        }
    }

    #[test]
    fn prop_password_never_survives_flow_exit(ops in arb_ops()) {
        let mut gate = ConfirmGate::new();
        for op in ops {
            apply(&mut gate, op);

            // The password may only be held while staged or in flight
            // to the credential check.
            if !matches!(
                gate.stage(),
                ConfirmStage::PasswordEntered | ConfirmStage::Verifying
            ) {
                prop_assert!(!gate.has_password());
            }
        }
    }

    #[test]
    fn prop_cancel_always_resets(ops in arb_ops()) {
        let mut gate = ConfirmGate::new();
        for op in ops {
            apply(&mut gate, op);
        }

        gate.cancel();
        prop_assert_eq!(gate.stage(), ConfirmStage::Idle);
        prop_assert!(!gate.has_password());
        prop_assert!(gate.field_error().is_none());
    }

    #[test]
    fn prop_field_error_only_after_failed_verification(ops in arb_ops()) {
        let mut gate = ConfirmGate::new();
        let mut last_failure = false;
        for op in ops {
            let accepted = apply(&mut gate, op);
            if accepted {
                match op {
                    GateOp::VerificationFailed => last_failure = true,
                    GateOp::EnterPassword | GateOp::Cancel => last_failure = false,
                    _ => {}
                }
            }

            if gate.field_error().is_some() {
                prop_assert!(last_failure);
                prop_assert_eq!(gate.field_error(), Some(INCORRECT_PASSWORD_MESSAGE));
            }
        }
    }
}

// ============================================================================
// Edge cases
// ============================================================================

mod edge_case_tests {
    use super::*;

    #[test]
    fn test_repeated_wrong_password_rounds() {
        let mut gate = ConfirmGate::new();
        for _ in 0..20 {
            gate.enter_password("still-wrong").unwrap();
            gate.begin_verify().unwrap();
            gate.verification_failed().unwrap();
            assert_eq!(gate.stage(), ConfirmStage::Idle);
            assert!(!gate.has_password());
        }
        assert_eq!(gate.field_error(), Some(INCORRECT_PASSWORD_MESSAGE));
    }

    #[test]
    fn test_second_flow_after_done() {
        let mut gate = ConfirmGate::new();
        gate.enter_password("hunter2").unwrap();
        gate.begin_verify().unwrap();
        gate.verified().unwrap();
        gate.mutation_done().unwrap();

        // Reopening the dialog resets, then a fresh flow runs cleanly.
        gate.cancel();
        gate.enter_password("hunter2").unwrap();
        gate.begin_verify().unwrap();
        gate.verified().unwrap();
        gate.mutation_done().unwrap();
        assert_eq!(gate.stage(), ConfirmStage::Done);
    }

    #[test]
    fn test_long_password_is_wiped_on_cancel() {
        let mut gate = ConfirmGate::new();
        gate.enter_password("x".repeat(4096)).unwrap();
        gate.cancel();
        assert!(!gate.has_password());
    }
}

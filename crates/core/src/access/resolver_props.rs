//! Property-based tests for access scope resolution.
//!
//! These cover the visibility guarantees the list pages rely on:
//! admins are never filtered, restricted scopes never exceed their
//! inputs, unknown roles collapse to the actor, and hierarchy
//! traversal is total on arbitrary (even cyclic) manager graphs.

use std::collections::{BTreeMap, BTreeSet};

use proptest::prelude::*;

use finboard_shared::types::UserId;

use crate::access::hierarchy::UserHierarchy;
use crate::access::resolver::AccessScopeResolver;
use crate::access::types::{Actor, Role, UserRecord};

/// Strategy for generating random Role values.
fn arb_role() -> impl Strategy<Value = Role> {
    prop_oneof![
        Just(Role::SuperAdmin),
        Just(Role::Admin),
        Just(Role::FinanceAdmin),
        Just(Role::FinanceManager),
        Just(Role::Manager),
        Just(Role::Accountant),
        Just(Role::Employee),
    ]
}

/// Strategy for a user snapshot with arbitrary manager edges.
///
/// Manager references are drawn from the same id pool, so
/// self-references and cycles occur regularly; `None` managers produce
/// roots.
fn arb_org() -> impl Strategy<Value = Vec<UserRecord>> {
    prop::collection::vec((arb_role(), any::<Option<prop::sample::Index>>()), 1..=30).prop_map(
        |specs| {
            let count = specs.len();
            specs
                .into_iter()
                .enumerate()
                .map(|(i, (role, manager))| {
                    let id = (i + 1) as i64;
                    let manager_id = manager
                        .map(|index| UserId::from_raw((index.index(count) + 1) as i64));
                    UserRecord {
                        id: UserId::from_raw(id),
                        full_name: format!("User {id}"),
                        email: format!("user{id}@example.com"),
                        username: format!("user{id}"),
                        phone: None,
                        role: Some(role),
                        raw_role: role.as_str().to_string(),
                        is_active: true,
                        department: None,
                        manager_id,
                    }
                })
                .collect()
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // =========================================================================
    // Admin visibility: no filtering ever
    // =========================================================================

    /// Admin actors resolve to an unrestricted scope covering every id
    #[test]
    fn prop_admin_sees_all_ids(users in arb_org()) {
        let actor = Actor::from_parts(UserId::from_raw(1), "admin", None);
        let scope = AccessScopeResolver::resolve(&actor, &users);

        prop_assert!(scope.is_unrestricted());
        for user in &users {
            prop_assert!(scope.permits(user.id));
        }
    }

    // =========================================================================
    // Restricted scopes never exceed their inputs
    // =========================================================================

    /// Managing scope is a subset of {actor} plus the fetched subordinates,
    /// and always contains the actor
    #[test]
    fn prop_managing_scope_bounded_by_subordinates(
        users in arb_org(),
        actor_id in 1i64..100
    ) {
        let actor = Actor::from_parts(UserId::from_raw(actor_id), "finance_manager", None);
        let scope = AccessScopeResolver::resolve_from_subordinates(&actor, &users);

        prop_assert!(scope.permits(actor.id));
        prop_assert!(!scope.is_unrestricted());

        let allowed: BTreeSet<UserId> = std::iter::once(actor.id)
            .chain(users.iter().map(|u| u.id))
            .collect();
        for &id in scope.visible_ids() {
            prop_assert!(allowed.contains(&id), "id {} outside input", id);
        }
    }

    /// Snapshot resolution never widens beyond the snapshot for managing roles
    #[test]
    fn prop_snapshot_scope_bounded_by_snapshot(
        users in arb_org(),
        actor_id in 1i64..100
    ) {
        let actor = Actor::from_parts(UserId::from_raw(actor_id), "manager", None);
        let scope = AccessScopeResolver::resolve(&actor, &users);

        let allowed: BTreeSet<UserId> = std::iter::once(actor.id)
            .chain(users.iter().map(|u| u.id))
            .collect();
        for &id in scope.visible_ids() {
            prop_assert!(allowed.contains(&id));
        }
    }

    // =========================================================================
    // Fail-safe behavior for unknown roles
    // =========================================================================

    /// Unrecognized role strings resolve to exactly the actor's own id
    #[test]
    fn prop_unknown_role_resolves_to_actor_only(
        users in arb_org(),
        role in "[a-z]{1,12}"
    ) {
        prop_assume!(Role::parse(&role).is_none());

        let actor = Actor::from_parts(UserId::from_raw(1), &role, None);
        let scope = AccessScopeResolver::resolve(&actor, &users);

        prop_assert!(!scope.is_unrestricted());
        prop_assert_eq!(scope.len(), 1);
        prop_assert!(scope.permits(UserId::from_raw(1)));
    }

    /// Every resolved scope contains the actor's own id
    #[test]
    fn prop_actor_always_in_own_scope(
        users in arb_org(),
        role in arb_role(),
        actor_id in 1i64..100,
        manager_id in proptest::option::of(1i64..100)
    ) {
        let actor = Actor {
            id: UserId::from_raw(actor_id),
            role: Some(role),
            manager_id: manager_id.map(UserId::from_raw),
        };
        let scope = AccessScopeResolver::resolve(&actor, &users);
        prop_assert!(scope.permits(actor.id));
    }

    // =========================================================================
    // Hierarchy traversal is total
    // =========================================================================

    /// Walking the tree yields each user exactly once, cycles included
    #[test]
    fn prop_walk_yields_each_user_exactly_once(users in arb_org()) {
        let hierarchy = UserHierarchy::build(&users);
        let walked: Vec<UserId> = hierarchy.walk().map(|(_, id)| id).collect();

        let unique: BTreeSet<UserId> = walked.iter().copied().collect();
        let expected: BTreeSet<UserId> = users.iter().map(|u| u.id).collect();

        prop_assert_eq!(walked.len(), expected.len());
        prop_assert_eq!(unique, expected);
    }

    /// No user ever renders under more than one parent
    #[test]
    fn prop_each_user_under_at_most_one_parent(users in arb_org()) {
        let hierarchy = UserHierarchy::build(&users);

        let mut appearances: BTreeMap<UserId, usize> = BTreeMap::new();
        for user in &users {
            for &child in hierarchy.children_of(user.id) {
                *appearances.entry(child).or_default() += 1;
            }
        }
        for (id, count) in appearances {
            prop_assert!(count <= 1, "user {} appears under {} parents", id, count);
        }
    }
}

// =========================================================================
// Unit tests for edge cases
// =========================================================================

#[cfg(test)]
mod edge_case_tests {
    use super::*;

    fn chain_user(id: i64, manager: Option<i64>) -> UserRecord {
        UserRecord {
            id: UserId::from_raw(id),
            full_name: format!("User {id}"),
            email: format!("user{id}@example.com"),
            username: format!("user{id}"),
            phone: None,
            role: Some(Role::Employee),
            raw_role: "employee".to_string(),
            is_active: true,
            department: None,
            manager_id: manager.map(UserId::from_raw),
        }
    }

    #[test]
    fn test_long_chain_walks_with_increasing_depth() {
        let users: Vec<UserRecord> = (1..=500)
            .map(|id| chain_user(id, (id > 1).then(|| id - 1)))
            .collect();

        let hierarchy = UserHierarchy::build(&users);
        let walked: Vec<(usize, UserId)> = hierarchy.walk().collect();

        assert_eq!(walked.len(), 500);
        for (i, &(depth, id)) in walked.iter().enumerate() {
            assert_eq!(depth, i);
            assert_eq!(id, UserId::from_raw((i + 1) as i64));
        }
    }

    #[test]
    fn test_single_giant_cycle_is_fully_rendered() {
        // Every user's manager is the next one; the last points back to
        // the first. No roots exist until promotion kicks in.
        let count: i64 = 50;
        let users: Vec<UserRecord> = (1..=count)
            .map(|id| chain_user(id, Some(if id == count { 1 } else { id + 1 })))
            .collect();

        let hierarchy = UserHierarchy::build(&users);
        assert_eq!(hierarchy.roots().len(), 1);
        assert_eq!(hierarchy.walk().count(), 50);
    }

    #[test]
    fn test_resolution_ignores_actor_self_edge() {
        let users = vec![chain_user(1, Some(1))];
        let actor = Actor::from_parts(UserId::from_raw(1), "finance_manager", None);
        let scope = AccessScopeResolver::resolve(&actor, &users);
        assert_eq!(scope.len(), 1);
        assert!(scope.permits(UserId::from_raw(1)));
    }
}

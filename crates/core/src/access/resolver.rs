//! Scope resolution rules per role.
//!
//! One pure function per input shape, replacing the per-page role
//! checks the panel used to copy around. Resolution is total: every
//! input maps to a scope, and anything unrecognized maps to the most
//! restrictive one.

use std::collections::{BTreeMap, BTreeSet};

use finboard_shared::types::UserId;

use crate::access::hierarchy::UserHierarchy;
use crate::access::types::{AccessScope, Actor, Role, UserRecord};

/// Stateless resolver for role-based visibility scopes.
pub struct AccessScopeResolver;

impl AccessScopeResolver {
    /// Resolves the actor's scope from a full user snapshot.
    ///
    /// Rules by role:
    /// - admin / super_admin: every id, no filtering
    /// - finance_admin / finance_manager / manager: the actor plus every
    ///   accountant or employee whose manager chain leads to the actor
    /// - accountant: the actor plus employee peers under the actor's own
    ///   manager (shared-sales visibility)
    /// - employee: the actor plus their manager
    /// - anything else: the actor only
    ///
    /// # Arguments
    /// * `actor` - The signed-in user
    /// * `users` - The user list as fetched, in any order
    #[must_use]
    pub fn resolve(actor: &Actor, users: &[UserRecord]) -> AccessScope {
        match actor.role {
            Some(role) if role.is_admin() => {
                AccessScope::unrestricted(users.iter().map(|u| u.id))
            }
            Some(role) if role.is_managing() => {
                let hierarchy = UserHierarchy::build(users);
                let roles = role_index(users);

                let mut visible = BTreeSet::from([actor.id]);
                for (_, id) in hierarchy.walk_from(actor.id) {
                    if id == actor.id {
                        continue;
                    }
                    if roles
                        .get(&id)
                        .copied()
                        .flatten()
                        .is_some_and(|r| r.is_subordinate_rank())
                    {
                        visible.insert(id);
                    }
                }
                AccessScope::restricted(visible)
            }
            Some(Role::Accountant) => {
                let mut visible = BTreeSet::from([actor.id]);
                if let Some(manager) = actor.manager_id {
                    let hierarchy = UserHierarchy::build(users);
                    let roles = role_index(users);
                    for &peer in hierarchy.children_of(manager) {
                        if roles.get(&peer).copied().flatten() == Some(Role::Employee) {
                            visible.insert(peer);
                        }
                    }
                }
                AccessScope::restricted(visible)
            }
            Some(Role::Employee) => {
                let mut visible = BTreeSet::from([actor.id]);
                if let Some(manager) = actor.manager_id {
                    visible.insert(manager);
                }
                AccessScope::restricted(visible)
            }
            _ => AccessScope::only(actor.id),
        }
    }

    /// Resolves a managing actor's scope from a fetched subordinate list.
    ///
    /// This is the service path: the backend already answered
    /// `subordinates(actor)`, and the scope is the actor plus every
    /// returned user of subordinate rank. Subordinates who are
    /// themselves managers are excluded.
    ///
    /// Non-managing actors resolve to their own id only; admins get an
    /// unrestricted scope over whatever was given.
    #[must_use]
    pub fn resolve_from_subordinates(actor: &Actor, subordinates: &[UserRecord]) -> AccessScope {
        match actor.role {
            Some(role) if role.is_admin() => AccessScope::unrestricted(
                std::iter::once(actor.id).chain(subordinates.iter().map(|u| u.id)),
            ),
            Some(role) if role.is_managing() => {
                let mut visible = BTreeSet::from([actor.id]);
                for sub in subordinates {
                    if sub.role.is_some_and(|r| r.is_subordinate_rank()) {
                        visible.insert(sub.id);
                    }
                }
                AccessScope::restricted(visible)
            }
            _ => AccessScope::only(actor.id),
        }
    }

    /// Resolves an accountant's scope from their manager's reports.
    ///
    /// `peers` is the result of fetching the actor's own manager's
    /// subordinates; employees among them share sales visibility with
    /// the actor. Everyone else resolves to their own id only.
    #[must_use]
    pub fn resolve_from_peers(actor: &Actor, peers: &[UserRecord]) -> AccessScope {
        match actor.role {
            Some(Role::Accountant) => {
                let mut visible = BTreeSet::from([actor.id]);
                for peer in peers {
                    if peer.role == Some(Role::Employee) {
                        visible.insert(peer.id);
                    }
                }
                AccessScope::restricted(visible)
            }
            _ => AccessScope::only(actor.id),
        }
    }
}

fn role_index(users: &[UserRecord]) -> BTreeMap<UserId, Option<Role>> {
    users.iter().map(|u| (u.id, u.role)).collect()
}

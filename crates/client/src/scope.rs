//! Scope resolution against the live directory.
//!
//! The core resolver is pure; this service does the fetching. Policy on
//! failure is uniform: any directory error degrades the scope to the
//! actor alone. A denied or broken lookup must never widen what the
//! actor can see.

use std::sync::Arc;

use tracing::warn;

use finboard_core::access::{AccessScope, AccessScopeResolver, Actor, Role, UserHierarchy};
use finboard_shared::error::AppError;

use crate::api::DirectoryApi;

/// A resolved scope plus the org tree it was derived from.
///
/// The hierarchy covers exactly the users fetched during resolution and
/// is empty for roles that resolve without a fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeResolution {
    /// The actor's visibility scope.
    pub scope: AccessScope,
    /// Manager tree over the fetched users, for tree rendering.
    pub hierarchy: UserHierarchy,
}

impl ScopeResolution {
    fn fetchless(scope: AccessScope) -> Self {
        Self {
            scope,
            hierarchy: UserHierarchy::build(&[]),
        }
    }
}

/// Fetches directory data and resolves visibility scopes per role.
pub struct ScopeService<D> {
    directory: Arc<D>,
}

impl<D: DirectoryApi> ScopeService<D> {
    /// Creates the service over a shared directory port.
    #[must_use]
    pub fn new(directory: Arc<D>) -> Self {
        Self { directory }
    }

    /// Resolves the actor's scope, fetching whatever their role needs.
    ///
    /// - admin family: the full user list, unrestricted scope
    /// - managing family: the actor's subordinates
    /// - accountant: the manager's reports, for employee-peer visibility
    /// - employee and unknown roles: no fetch at all
    ///
    /// Never fails. The result is advisory for the UI; the backend
    /// enforces access on every call regardless.
    pub async fn resolve(&self, actor: &Actor) -> ScopeResolution {
        match actor.role {
            Some(role) if role.is_admin() => match self.directory.list_users().await {
                Ok(users) => ScopeResolution {
                    scope: AccessScopeResolver::resolve(actor, &users),
                    hierarchy: UserHierarchy::build(&users),
                },
                Err(err) => Self::degrade(actor, &err),
            },
            Some(role) if role.is_managing() => {
                match self.directory.subordinates(actor.id).await {
                    Ok(subordinates) => ScopeResolution {
                        scope: AccessScopeResolver::resolve_from_subordinates(actor, &subordinates),
                        hierarchy: UserHierarchy::build(&subordinates),
                    },
                    Err(err) => Self::degrade(actor, &err),
                }
            }
            Some(Role::Accountant) => match actor.manager_id {
                Some(manager) => match self.directory.subordinates(manager).await {
                    Ok(peers) => ScopeResolution {
                        scope: AccessScopeResolver::resolve_from_peers(actor, &peers),
                        hierarchy: UserHierarchy::build(&peers),
                    },
                    Err(err) => Self::degrade(actor, &err),
                },
                None => ScopeResolution::fetchless(AccessScope::only(actor.id)),
            },
            _ => ScopeResolution::fetchless(AccessScopeResolver::resolve(actor, &[])),
        }
    }

    /// Fail-closed fallback for a failed directory fetch.
    fn degrade(actor: &Actor, err: &AppError) -> ScopeResolution {
        warn!(
            actor_id = actor.id.into_inner(),
            error_code = err.error_code(),
            error = %err,
            "directory fetch failed; scope degraded to the actor alone"
        );
        ScopeResolution::fetchless(AccessScope::only(actor.id))
    }
}

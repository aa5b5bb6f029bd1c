//! Access domain types for role-based visibility.
//!
//! This module defines the roles the panel recognises, the actor and
//! user snapshots consumed from the backend, and the resolved
//! visibility scope.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use finboard_shared::auth::SessionUser;
use finboard_shared::types::UserId;

/// User role as assigned by the backend.
///
/// Role names arrive as raw strings on the wire; anything that fails to
/// parse is treated as an unknown role and resolves to the most
/// restrictive scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Full access, including user administration.
    SuperAdmin,
    /// Full access to all records.
    Admin,
    /// Manages finance staff and their records.
    FinanceAdmin,
    /// Manages accountants and employees in their chain.
    FinanceManager,
    /// Manages accountants and employees in their chain.
    Manager,
    /// Handles bookkeeping; sees employee peers under the same manager.
    Accountant,
    /// Sees own records plus the manager's.
    Employee,
}

impl Role {
    /// Parse a role from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "super_admin" => Some(Self::SuperAdmin),
            "admin" => Some(Self::Admin),
            "finance_admin" => Some(Self::FinanceAdmin),
            "finance_manager" => Some(Self::FinanceManager),
            "manager" => Some(Self::Manager),
            "accountant" => Some(Self::Accountant),
            "employee" => Some(Self::Employee),
            _ => None,
        }
    }

    /// Returns the string representation of the role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "super_admin",
            Self::Admin => "admin",
            Self::FinanceAdmin => "finance_admin",
            Self::FinanceManager => "finance_manager",
            Self::Manager => "manager",
            Self::Accountant => "accountant",
            Self::Employee => "employee",
        }
    }

    /// Whether this role sees everything, with no filtering.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Self::SuperAdmin | Self::Admin)
    }

    /// Whether this role manages a chain of subordinates.
    #[must_use]
    pub const fn is_managing(&self) -> bool {
        matches!(self, Self::FinanceAdmin | Self::FinanceManager | Self::Manager)
    }

    /// Whether this role counts as a managed subordinate.
    ///
    /// Only accountants and employees appear in a manager's scope; a
    /// subordinate who is themselves a manager does not.
    #[must_use]
    pub const fn is_subordinate_rank(&self) -> bool {
        matches!(self, Self::Accountant | Self::Employee)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The signed-in user performing an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    /// The actor's user id.
    pub id: UserId,
    /// Parsed role; `None` when the backend sent something unrecognized.
    pub role: Option<Role>,
    /// The actor's own manager, if any.
    pub manager_id: Option<UserId>,
}

impl Actor {
    /// Builds an actor from raw session fields.
    ///
    /// An unrecognized role string yields `role: None`, which every
    /// resolution path treats as most restrictive.
    #[must_use]
    pub fn from_parts(id: UserId, role: &str, manager_id: Option<UserId>) -> Self {
        Self {
            id,
            role: Role::parse(role),
            manager_id,
        }
    }
}

impl From<&SessionUser> for Actor {
    fn from(user: &SessionUser) -> Self {
        Self::from_parts(user.id, &user.role, user.manager_id)
    }
}

/// Point-in-time user snapshot as consumed from the backend.
///
/// The backend owns persistence; pages only read and display whatever
/// was current at load time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// User id.
    pub id: UserId,
    /// Display name.
    pub full_name: String,
    /// Email address.
    pub email: String,
    /// Account username.
    pub username: String,
    /// Phone number, if set.
    pub phone: Option<String>,
    /// Parsed role; `None` when unrecognized.
    pub role: Option<Role>,
    /// Role name exactly as the backend spelled it, for display.
    pub raw_role: String,
    /// Whether the account is active.
    pub is_active: bool,
    /// Department, if set.
    pub department: Option<String>,
    /// The user's manager, if any.
    pub manager_id: Option<UserId>,
}

/// A record that belongs to some user.
///
/// Implemented by anything carrying a `created_by` or `manager_id`
/// reference so [`AccessScope::filter`] can apply uniformly to users,
/// expenses, revenue, and inventory rows.
pub trait OwnedRecord {
    /// The owning user, if the record has one.
    fn owner_id(&self) -> Option<UserId>;
}

impl OwnedRecord for UserRecord {
    fn owner_id(&self) -> Option<UserId> {
        self.manager_id
    }
}

/// The set of user ids the actor may see or act on.
///
/// Derived fresh on every load, never persisted. An unrestricted scope
/// (admin roles) permits every id; a restricted scope permits exactly
/// its visible set. Advisory for UX only: the server enforces
/// authorization independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessScope {
    unrestricted: bool,
    visible: BTreeSet<UserId>,
}

impl AccessScope {
    /// Scope that permits everything. `visible` holds the ids known at
    /// resolution time, for display purposes.
    #[must_use]
    pub fn unrestricted(visible: impl IntoIterator<Item = UserId>) -> Self {
        Self {
            unrestricted: true,
            visible: visible.into_iter().collect(),
        }
    }

    /// Scope restricted to exactly the actor's own id.
    ///
    /// This is the fail-closed fallback for unknown roles and failed
    /// subordinate lookups.
    #[must_use]
    pub fn only(actor_id: UserId) -> Self {
        Self {
            unrestricted: false,
            visible: BTreeSet::from([actor_id]),
        }
    }

    /// Scope restricted to the given ids.
    #[must_use]
    pub fn restricted(visible: impl IntoIterator<Item = UserId>) -> Self {
        Self {
            unrestricted: false,
            visible: visible.into_iter().collect(),
        }
    }

    /// Whether the given id is inside the scope.
    #[must_use]
    pub fn permits(&self, id: UserId) -> bool {
        self.unrestricted || self.visible.contains(&id)
    }

    /// Whether this scope skips filtering entirely.
    #[must_use]
    pub const fn is_unrestricted(&self) -> bool {
        self.unrestricted
    }

    /// The ids known to be visible, in ascending order.
    #[must_use]
    pub const fn visible_ids(&self) -> &BTreeSet<UserId> {
        &self.visible
    }

    /// Number of known visible ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.visible.len()
    }

    /// Whether no ids are visible. Never true for resolved scopes,
    /// which always include the actor.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.unrestricted && self.visible.is_empty()
    }

    /// Retains the records this scope permits.
    ///
    /// Records without an owner are kept only by unrestricted scopes:
    /// a row nobody claims must not leak into a restricted view.
    pub fn filter<'a, T: OwnedRecord>(&self, records: &'a [T]) -> Vec<&'a T> {
        records
            .iter()
            .filter(|record| match record.owner_id() {
                Some(owner) => self.permits(owner),
                None => self.unrestricted,
            })
            .collect()
    }
}

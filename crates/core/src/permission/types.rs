//! Permission domain types.
//!
//! A permission is a per-resource set of action flags. The backend
//! stores them sparsely: an entry can carry any subset of flags, and a
//! missing entry means no access at all.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A resource the panel manages permissions for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    /// User directory and accounts.
    Users,
    /// Revenue records.
    Revenues,
    /// Expense records.
    Expenses,
    /// Transaction history.
    Transactions,
    /// Financial reports.
    Reports,
    /// Inventory items.
    Inventory,
    /// Notification feed.
    Notifications,
    /// The user's own profile.
    Profile,
}

impl Resource {
    /// Every resource, in display order.
    pub const ALL: [Self; 8] = [
        Self::Users,
        Self::Revenues,
        Self::Expenses,
        Self::Transactions,
        Self::Reports,
        Self::Inventory,
        Self::Notifications,
        Self::Profile,
    ];

    /// Parse a resource from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "users" => Some(Self::Users),
            "revenues" => Some(Self::Revenues),
            "expenses" => Some(Self::Expenses),
            "transactions" => Some(Self::Transactions),
            "reports" => Some(Self::Reports),
            "inventory" => Some(Self::Inventory),
            "notifications" => Some(Self::Notifications),
            "profile" => Some(Self::Profile),
            _ => None,
        }
    }

    /// Returns the string representation of the resource.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Revenues => "revenues",
            Self::Expenses => "expenses",
            Self::Transactions => "transactions",
            Self::Reports => "reports",
            Self::Inventory => "inventory",
            Self::Notifications => "notifications",
            Self::Profile => "profile",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An action a permission entry can grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// View the resource.
    Read,
    /// Create new records.
    Create,
    /// Edit existing records.
    Update,
    /// Delete records.
    Delete,
    /// Administer the resource (templates, bulk operations).
    Manage,
}

impl Action {
    /// Every action, in display order.
    pub const ALL: [Self; 5] = [
        Self::Read,
        Self::Create,
        Self::Update,
        Self::Delete,
        Self::Manage,
    ];
}

/// The action flags granted on one resource.
///
/// Wire entries are sparse: absent flags deserialize as `false`, so
/// `{"create": true}` is a valid entry granting only create.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionSet {
    /// View access.
    #[serde(default)]
    pub read: bool,
    /// Create access.
    #[serde(default)]
    pub create: bool,
    /// Edit access.
    #[serde(default)]
    pub update: bool,
    /// Delete access.
    #[serde(default)]
    pub delete: bool,
    /// Administrative access.
    #[serde(default)]
    pub manage: bool,
}

impl ActionSet {
    /// No actions granted.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            read: false,
            create: false,
            update: false,
            delete: false,
            manage: false,
        }
    }

    /// Every action granted.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            read: true,
            create: true,
            update: true,
            delete: true,
            manage: true,
        }
    }

    /// Grants exactly the given actions.
    #[must_use]
    pub fn of(actions: &[Action]) -> Self {
        let mut set = Self::none();
        for &action in actions {
            set.set(action, true);
        }
        set
    }

    /// Whether the given action is granted.
    #[must_use]
    pub const fn enabled(&self, action: Action) -> bool {
        match action {
            Action::Read => self.read,
            Action::Create => self.create,
            Action::Update => self.update,
            Action::Delete => self.delete,
            Action::Manage => self.manage,
        }
    }

    /// Sets one action flag.
    pub const fn set(&mut self, action: Action, value: bool) {
        match action {
            Action::Read => self.read = value,
            Action::Create => self.create = value,
            Action::Update => self.update = value,
            Action::Delete => self.delete = value,
            Action::Manage => self.manage = value,
        }
    }

    /// Flag-wise union with another set.
    #[must_use]
    pub const fn union(&self, other: Self) -> Self {
        Self {
            read: self.read || other.read,
            create: self.create || other.create,
            update: self.update || other.update,
            delete: self.delete || other.delete,
            manage: self.manage || other.manage,
        }
    }

    /// Whether any action is granted.
    #[must_use]
    pub const fn any(&self) -> bool {
        self.read || self.create || self.update || self.delete || self.manage
    }

    /// Whether every action is granted.
    #[must_use]
    pub const fn all_enabled(&self) -> bool {
        self.read && self.create && self.update && self.delete && self.manage
    }
}

/// One permission entry: a resource and its granted actions.
///
/// After aggregation there is at most one entry per resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionItem {
    /// The resource this entry covers.
    pub resource: Resource,
    /// The actions granted on it.
    pub actions: ActionSet,
}

impl PermissionItem {
    /// Creates a permission entry.
    #[must_use]
    pub const fn new(resource: Resource, actions: ActionSet) -> Self {
        Self { resource, actions }
    }
}

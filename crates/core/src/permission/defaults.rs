//! Default permission grants per role.
//!
//! Users without stored overrides get these. The matrix mirrors what
//! the visibility rules already imply: admins get everything, managing
//! roles get working access minus delete, and the narrower roles get
//! progressively less. Everyone can read and update their own profile.

use crate::access::types::Role;
use crate::permission::aggregate::PermissionAggregator;
use crate::permission::types::{Action, ActionSet, PermissionItem, Resource};

/// Stateless provider of per-role default permissions.
pub struct PermissionDefaults;

impl PermissionDefaults {
    /// Default permission entries for a role.
    ///
    /// An unknown role (`None`) gets only the profile basics.
    #[must_use]
    pub fn for_role(role: Option<Role>) -> Vec<PermissionItem> {
        let mut items = match role {
            Some(r) if r.is_admin() => Resource::ALL
                .iter()
                .map(|&resource| PermissionItem::new(resource, ActionSet::all()))
                .collect(),
            Some(r) if r.is_managing() => grant(
                &[
                    Resource::Users,
                    Resource::Revenues,
                    Resource::Expenses,
                    Resource::Transactions,
                    Resource::Reports,
                ],
                &[Action::Read, Action::Create, Action::Update, Action::Manage],
            ),
            Some(Role::Accountant) => grant(
                &[
                    Resource::Revenues,
                    Resource::Expenses,
                    Resource::Transactions,
                    Resource::Reports,
                ],
                &[Action::Read, Action::Create, Action::Update],
            ),
            Some(Role::Employee) => grant(
                &[Resource::Revenues, Resource::Expenses],
                &[Action::Read, Action::Create],
            ),
            _ => Vec::new(),
        };

        items.push(PermissionItem::new(
            Resource::Profile,
            ActionSet::of(&[Action::Read, Action::Update]),
        ));

        PermissionAggregator::merge_by_resource(&items)
    }
}

fn grant(resources: &[Resource], actions: &[Action]) -> Vec<PermissionItem> {
    let set = ActionSet::of(actions);
    resources
        .iter()
        .map(|&resource| PermissionItem::new(resource, set))
        .collect()
}

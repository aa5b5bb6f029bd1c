//! Canonicalization of permission entry lists.
//!
//! The backend can hand back (and the editor can momentarily hold)
//! several entries for the same resource. Everything downstream wants
//! exactly one entry per resource, so every load and every save runs
//! through the aggregator.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use crate::permission::types::{ActionSet, PermissionItem, Resource};

/// Stateless aggregator for permission entry lists.
pub struct PermissionAggregator;

impl PermissionAggregator {
    /// Collapses duplicate entries into one canonical entry per resource.
    ///
    /// Flags are combined per action: a flag enabled by any duplicate
    /// stays enabled. Output order is the order in which each resource
    /// first appeared. Running the merge twice gives the same result.
    ///
    /// # Arguments
    /// * `items` - Entries as loaded or edited, duplicates allowed
    #[must_use]
    pub fn merge_by_resource(items: &[PermissionItem]) -> Vec<PermissionItem> {
        let mut order: Vec<Resource> = Vec::new();
        let mut merged: BTreeMap<Resource, ActionSet> = BTreeMap::new();

        for item in items {
            match merged.entry(item.resource) {
                Entry::Occupied(mut entry) => {
                    let combined = entry.get().union(item.actions);
                    entry.insert(combined);
                }
                Entry::Vacant(entry) => {
                    order.push(item.resource);
                    entry.insert(item.actions);
                }
            }
        }

        order
            .into_iter()
            .map(|resource| PermissionItem::new(resource, merged[&resource]))
            .collect()
    }

    /// Whether every action is enabled for the given resource.
    ///
    /// Drives the "select all" checkbox header. A resource without an
    /// entry has nothing selected.
    #[must_use]
    pub fn all_actions_selected(items: &[PermissionItem], resource: Resource) -> bool {
        items
            .iter()
            .find(|item| item.resource == resource)
            .is_some_and(|item| item.actions.all_enabled())
    }

    /// Drops entries with no enabled actions.
    ///
    /// The stored representation is sparse: absence means no access, so
    /// an all-false entry is noise and is removed before saving.
    #[must_use]
    pub fn prune_empty(items: &[PermissionItem]) -> Vec<PermissionItem> {
        items.iter().filter(|item| item.actions.any()).copied().collect()
    }
}

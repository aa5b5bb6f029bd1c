//! Property-based tests for permission aggregation.
//!
//! These verify the merge invariants over arbitrary entry lists:
//! canonical output, no grant lost, no grant invented, stable order.

use std::collections::BTreeSet;

use proptest::prelude::*;

use crate::permission::aggregate::PermissionAggregator;
use crate::permission::types::{Action, ActionSet, PermissionItem, Resource};

// ============================================================================
// Strategies
// ============================================================================

fn arb_resource() -> impl Strategy<Value = Resource> {
    prop::sample::select(Resource::ALL.to_vec())
}

fn arb_action_set() -> impl Strategy<Value = ActionSet> {
    (
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(read, create, update, delete, manage)| ActionSet {
            read,
            create,
            update,
            delete,
            manage,
        })
}

fn arb_item() -> impl Strategy<Value = PermissionItem> {
    (arb_resource(), arb_action_set())
        .prop_map(|(resource, actions)| PermissionItem::new(resource, actions))
}

fn arb_items() -> impl Strategy<Value = Vec<PermissionItem>> {
    prop::collection::vec(arb_item(), 0..=24)
}

/// Every enabled (resource, action) pair in a list of entries.
fn enabled_pairs(items: &[PermissionItem]) -> BTreeSet<(Resource, Action)> {
    let mut pairs = BTreeSet::new();
    for item in items {
        for action in Action::ALL {
            if item.actions.enabled(action) {
                pairs.insert((item.resource, action));
            }
        }
    }
    pairs
}

// ============================================================================
// Merge invariants
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_merge_is_idempotent(items in arb_items()) {
        let once = PermissionAggregator::merge_by_resource(&items);
        let twice = PermissionAggregator::merge_by_resource(&once);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_merge_yields_one_entry_per_resource(items in arb_items()) {
        let merged = PermissionAggregator::merge_by_resource(&items);
        let resources: BTreeSet<Resource> = merged.iter().map(|i| i.resource).collect();
        prop_assert_eq!(resources.len(), merged.len());
    }

    #[test]
    fn prop_merge_never_drops_a_grant(items in arb_items()) {
        let merged = PermissionAggregator::merge_by_resource(&items);
        let before = enabled_pairs(&items);
        let after = enabled_pairs(&merged);
        prop_assert!(before.is_subset(&after));
    }

    #[test]
    fn prop_merge_never_invents_a_grant(items in arb_items()) {
        let merged = PermissionAggregator::merge_by_resource(&items);
        let before = enabled_pairs(&items);
        let after = enabled_pairs(&merged);
        prop_assert!(after.is_subset(&before));
    }

    #[test]
    fn prop_merge_keeps_first_occurrence_order(items in arb_items()) {
        let merged = PermissionAggregator::merge_by_resource(&items);

        let mut seen = Vec::new();
        for item in &items {
            if !seen.contains(&item.resource) {
                seen.push(item.resource);
            }
        }
        let merged_order: Vec<Resource> = merged.iter().map(|i| i.resource).collect();
        prop_assert_eq!(merged_order, seen);
    }

    #[test]
    fn prop_prune_keeps_exactly_nonempty_entries(items in arb_items()) {
        let pruned = PermissionAggregator::prune_empty(&items);
        prop_assert!(pruned.iter().all(|i| i.actions.any()));

        let kept = items.iter().filter(|i| i.actions.any()).count();
        prop_assert_eq!(pruned.len(), kept);
    }

    #[test]
    fn prop_prune_after_merge_preserves_grants(items in arb_items()) {
        let merged = PermissionAggregator::merge_by_resource(&items);
        let pruned = PermissionAggregator::prune_empty(&merged);
        prop_assert_eq!(enabled_pairs(&pruned), enabled_pairs(&items));
    }

    #[test]
    fn prop_all_selected_matches_merged_entry(items in arb_items(), resource in arb_resource()) {
        let merged = PermissionAggregator::merge_by_resource(&items);
        let all = PermissionAggregator::all_actions_selected(&merged, resource);
        let entry = merged.iter().find(|i| i.resource == resource);
        prop_assert_eq!(all, entry.is_some_and(|i| i.actions.all_enabled()));
    }
}

// ============================================================================
// Edge cases
// ============================================================================

mod edge_case_tests {
    use super::*;

    #[test]
    fn test_merge_of_empty_list_is_empty() {
        assert!(PermissionAggregator::merge_by_resource(&[]).is_empty());
    }

    #[test]
    fn test_merge_of_many_duplicates_is_single_entry() {
        let items: Vec<PermissionItem> = (0..100)
            .map(|_| PermissionItem::new(Resource::Reports, ActionSet::of(&[Action::Read])))
            .collect();

        let merged = PermissionAggregator::merge_by_resource(&items);
        assert_eq!(merged.len(), 1);
        assert!(merged[0].actions.read);
        assert!(!merged[0].actions.manage);
    }

    #[test]
    fn test_prune_of_all_empty_entries_is_empty() {
        let items: Vec<PermissionItem> = Resource::ALL
            .into_iter()
            .map(|resource| PermissionItem::new(resource, ActionSet::none()))
            .collect();

        assert!(PermissionAggregator::prune_empty(&items).is_empty());
    }
}

//! Manager/subordinate tree building and traversal.
//!
//! The backend is trusted to keep `manager_id` chains acyclic, but this
//! module does not rely on it: a malformed org chart must never hang or
//! hide users. Unreachable users (cycle members) are promoted to roots
//! and every traversal carries a visited guard.

use std::collections::{BTreeMap, BTreeSet};

use finboard_shared::types::UserId;

use crate::access::types::UserRecord;

/// The manager → direct-subordinate tree for a user snapshot.
///
/// `children(u)` is exactly the set of users whose `manager_id == u.id`.
/// A user with no manager, an unknown manager, or themselves as manager
/// is a root. Children and roots are kept in ascending id order so the
/// rendered tree is deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserHierarchy {
    children: BTreeMap<UserId, Vec<UserId>>,
    roots: Vec<UserId>,
}

impl UserHierarchy {
    /// Builds the hierarchy from a flat user snapshot.
    #[must_use]
    pub fn build(users: &[UserRecord]) -> Self {
        let ids: BTreeSet<UserId> = users.iter().map(|u| u.id).collect();

        let mut children: BTreeMap<UserId, Vec<UserId>> = BTreeMap::new();
        let mut roots: Vec<UserId> = Vec::new();

        for user in users {
            match user.manager_id {
                Some(manager) if manager != user.id && ids.contains(&manager) => {
                    children.entry(manager).or_default().push(user.id);
                }
                _ => roots.push(user.id),
            }
        }

        for list in children.values_mut() {
            list.sort_unstable();
            list.dedup();
        }
        roots.sort_unstable();
        roots.dedup();

        let mut hierarchy = Self { children, roots };
        hierarchy.promote_unreachable(&ids);
        hierarchy
    }

    /// Promotes users a root-based traversal cannot reach.
    ///
    /// Users left unreached are members of a manager cycle. Promoting
    /// the smallest unreached id and re-walking repeats until every
    /// user appears in the tree exactly once.
    fn promote_unreachable(&mut self, ids: &BTreeSet<UserId>) {
        let reached: BTreeSet<UserId> = self.walk().map(|(_, id)| id).collect();
        let mut unreached: BTreeSet<UserId> = ids.difference(&reached).copied().collect();

        while let Some(&entry) = unreached.iter().next() {
            self.roots.push(entry);
            let absorbed: Vec<UserId> = self.walk_from(entry).map(|(_, id)| id).collect();
            for id in absorbed {
                unreached.remove(&id);
            }
        }

        self.roots.sort_unstable();
    }

    /// Direct subordinates of the given user, in ascending id order.
    #[must_use]
    pub fn children_of(&self, id: UserId) -> &[UserId] {
        self.children.get(&id).map_or(&[], Vec::as_slice)
    }

    /// Top-level users, in ascending id order.
    #[must_use]
    pub fn roots(&self) -> &[UserId] {
        &self.roots
    }

    /// Whether the given user renders at the top level.
    #[must_use]
    pub fn is_root(&self, id: UserId) -> bool {
        self.roots.binary_search(&id).is_ok()
    }

    /// Depth-first traversal over the whole tree.
    ///
    /// Yields `(depth, id)` in render order: roots at depth 0, each
    /// subtree fully before the next sibling. Every user is yielded at
    /// most once regardless of the input's shape.
    #[must_use]
    pub fn walk(&self) -> Walk<'_> {
        let stack = self
            .roots
            .iter()
            .rev()
            .map(|&id| (0, id))
            .collect();
        Walk {
            children: &self.children,
            stack,
            visited: BTreeSet::new(),
        }
    }

    /// Depth-first traversal of one subtree, starting at `start`.
    #[must_use]
    pub fn walk_from(&self, start: UserId) -> Walk<'_> {
        Walk {
            children: &self.children,
            stack: vec![(0, start)],
            visited: BTreeSet::new(),
        }
    }
}

/// Depth-first iterator over a [`UserHierarchy`].
pub struct Walk<'a> {
    children: &'a BTreeMap<UserId, Vec<UserId>>,
    stack: Vec<(usize, UserId)>,
    visited: BTreeSet<UserId>,
}

impl Iterator for Walk<'_> {
    type Item = (usize, UserId);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((depth, id)) = self.stack.pop() {
            if !self.visited.insert(id) {
                continue;
            }
            if let Some(kids) = self.children.get(&id) {
                for &child in kids.iter().rev() {
                    self.stack.push((depth + 1, child));
                }
            }
            return Some((depth, id));
        }
        None
    }
}

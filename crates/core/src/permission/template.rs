//! Reusable permission templates with an explicit local store.
//!
//! Templates bundle per-resource grants under a name so an admin can
//! stamp a standard profile onto a user instead of ticking boxes one
//! by one. The store replaces ad hoc browser storage with a cache that
//! has defined capacity, expiry, and invalidation.

use std::sync::Arc;
use std::time::Duration;

use moka::sync::Cache;
use serde::{Deserialize, Serialize};

use crate::permission::aggregate::PermissionAggregator;
use crate::permission::types::{PermissionItem, Resource};

/// Default store capacity (number of templates).
const DEFAULT_STORE_CAPACITY: u64 = 64;

/// Default time-to-live for stored templates (1 hour).
const DEFAULT_TTL_SECS: u64 = 3600;

/// A named, reusable bundle of permission entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionTemplate {
    /// Template name, unique within the store.
    pub name: String,
    /// Optional description shown in the picker.
    #[serde(default)]
    pub description: Option<String>,
    /// The entries this template applies.
    pub items: Vec<PermissionItem>,
}

impl PermissionTemplate {
    /// Creates a template. Items are canonicalized on construction.
    #[must_use]
    pub fn new(name: impl Into<String>, items: Vec<PermissionItem>) -> Self {
        Self {
            name: name.into(),
            description: None,
            items: PermissionAggregator::merge_by_resource(&items),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Applies the template over a user's current entries.
    ///
    /// Entries for resources the template names are replaced with the
    /// template's grants; everything else is kept as is. Output is
    /// canonical: one entry per resource, current entries first.
    #[must_use]
    pub fn apply_to(&self, current: &[PermissionItem]) -> Vec<PermissionItem> {
        let named: Vec<Resource> = self.items.iter().map(|i| i.resource).collect();

        let mut out: Vec<PermissionItem> = PermissionAggregator::merge_by_resource(current)
            .into_iter()
            .filter(|item| !named.contains(&item.resource))
            .collect();
        out.extend(self.items.iter().copied());
        out
    }
}

/// Local store for permission templates.
///
/// Thread-safe and cheap to clone; entries expire after the configured
/// TTL so a stale template never outlives a session by much.
#[derive(Clone)]
pub struct TemplateStore {
    cache: Cache<String, Arc<PermissionTemplate>>,
}

impl TemplateStore {
    /// Creates a store with default settings.
    ///
    /// Default: 64 templates max, 1 hour TTL.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(DEFAULT_STORE_CAPACITY, DEFAULT_TTL_SECS)
    }

    /// Creates a store with custom configuration.
    ///
    /// # Arguments
    ///
    /// * `max_capacity` - Maximum number of templates to keep
    /// * `ttl_secs` - Time-to-live in seconds for each template
    #[must_use]
    pub fn with_config(max_capacity: u64, ttl_secs: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { cache }
    }

    /// Saves a template under its name, replacing any previous version.
    pub fn save(&self, template: PermissionTemplate) {
        self.cache.insert(template.name.clone(), Arc::new(template));
    }

    /// Looks up a template by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<PermissionTemplate>> {
        self.cache.get(name)
    }

    /// Removes a template by name.
    pub fn remove(&self, name: &str) {
        self.cache.invalidate(name);
    }

    /// Removes every stored template.
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }

    /// Stored template names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.cache.iter().map(|(name, _)| (*name).clone()).collect();
        names.sort_unstable();
        names
    }

    /// Returns the number of templates currently stored.
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Runs cache maintenance tasks.
    ///
    /// Moka handles expiry in the background; calling this explicitly
    /// makes counts deterministic in tests.
    pub fn run_pending_tasks(&self) {
        self.cache.run_pending_tasks();
    }
}

impl Default for TemplateStore {
    fn default() -> Self {
        Self::new()
    }
}

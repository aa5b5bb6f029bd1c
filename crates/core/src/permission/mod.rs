//! Per-user permission management.
//!
//! A user's permissions are a list of per-resource action grants. The
//! backend may hand back duplicate entries for a resource; this module
//! merges them into one entry per resource (grants combine with OR),
//! supplies role-based defaults for users with no explicit grants, and
//! keeps reusable named templates in a local store.
//!
//! All types here are plain data with no I/O. Fetching and saving
//! entries is the client layer's job.

pub mod aggregate;
pub mod defaults;
pub mod template;
pub mod types;

#[cfg(test)]
mod aggregate_props;

pub use aggregate::PermissionAggregator;
pub use defaults::PermissionDefaults;
pub use template::{PermissionTemplate, TemplateStore};
pub use types::{Action, ActionSet, PermissionItem, Resource};

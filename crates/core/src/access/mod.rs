//! Role-based access scopes for Finboard.
//!
//! This module decides which user and record ids the signed-in actor
//! may see or act on, and builds the manager/subordinate tree for
//! display. Scopes are a UX convenience: the backend enforces
//! authorization on every call regardless of what the client shows.
//!
//! # Modules
//!
//! - `types` - Access domain types (Role, Actor, AccessScope)
//! - `resolver` - Scope resolution rules per role
//! - `hierarchy` - Manager/subordinate tree building and traversal

pub mod hierarchy;
pub mod resolver;
pub mod types;

#[cfg(test)]
mod resolver_props;

#[cfg(test)]
mod benchmark;

pub use hierarchy::{UserHierarchy, Walk};
pub use resolver::AccessScopeResolver;
pub use types::{AccessScope, Actor, OwnedRecord, Role, UserRecord};

//! Core domain logic for Finboard.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, visibility rules, and aggregation logic live here.
//!
//! # Modules
//!
//! - `access` - Role-based visibility scopes and the manager/subordinate tree
//! - `permission` - Per-resource permission merging, defaults, and templates
//! - `confirm` - Password-reverification gate for destructive actions

pub mod access;
pub mod confirm;
pub mod permission;

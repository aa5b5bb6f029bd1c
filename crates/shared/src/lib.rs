//! Shared types, errors, and configuration for Finboard.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Application-wide error types with wire-status mapping
//! - Client configuration management
//! - Authentication payloads for the panel backend

pub mod auth;
pub mod config;
pub mod error;
pub mod types;

pub use config::ClientConfig;
pub use error::{AppError, AppResult, GENERIC_MESSAGE};

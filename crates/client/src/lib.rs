//! Backend API client and stateful services for Finboard.
//!
//! Everything that talks to the panel backend lives here: the reqwest
//! client, the ports it implements, and the services that orchestrate
//! IO around the pure core logic.
//!
//! # Modules
//!
//! - `api` - Ports between services and the HTTP boundary
//! - `http` - The reqwest client and its endpoint surface
//! - `dto` - Wire types, payload validation, and domain conversions
//! - `scope` - Fail-closed visibility scope resolution
//! - `confirm` - The verify-then-mutate flow for destructive actions
//! - `guard` - Double-submit protection for entity mutations
//! - `cache` - Cached user lookups for display-name enrichment
//! - `poll` - Background notification polling

pub mod api;
pub mod cache;
pub mod confirm;
pub mod dto;
pub mod guard;
pub mod http;
pub mod poll;
pub mod scope;

pub use api::{CredentialProbe, DirectoryApi, NotificationsApi};
pub use cache::UserInfoCache;
pub use confirm::{ConfirmOutcome, VerifyThenMutate};
pub use guard::{EntityKind, InFlightTicket, MutationGuard};
pub use http::ApiClient;
pub use poll::{FeedItem, FeedSnapshot, NotificationFeed};
pub use scope::{ScopeResolution, ScopeService};

//! Cached user lookups for display-name enrichment.
//!
//! Notification rows and audit-style views want a display name for a
//! `created_by` id without refetching the directory every time. Lookups
//! here are best-effort: a denied or failed fetch yields `None` and the
//! caller renders the raw id.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use finboard_core::access::UserRecord;
use finboard_shared::config::CacheConfig;
use finboard_shared::types::UserId;

use crate::api::DirectoryApi;

/// TTL + capacity bounded cache of user records.
pub struct UserInfoCache {
    cache: moka::future::Cache<UserId, Arc<UserRecord>>,
}

impl UserInfoCache {
    /// Builds the cache with the configured TTL and capacity.
    #[must_use]
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            cache: moka::future::Cache::builder()
                .max_capacity(config.user_info_capacity)
                .time_to_live(Duration::from_secs(config.user_info_ttl_secs))
                .build(),
        }
    }

    /// Returns the cached record, fetching it on a miss.
    ///
    /// Permission denials are swallowed silently: enrichment is
    /// optional and some roles simply cannot read other users. Any
    /// other failure degrades the same way with a debug trace. Failures
    /// are never cached, so the next call retries.
    pub async fn get_or_fetch<D: DirectoryApi>(
        &self,
        id: UserId,
        directory: &D,
    ) -> Option<Arc<UserRecord>> {
        if let Some(record) = self.cache.get(&id).await {
            return Some(record);
        }

        match directory.get_user(id).await {
            Ok(record) => {
                let record = Arc::new(record);
                self.cache.insert(id, Arc::clone(&record)).await;
                Some(record)
            }
            Err(err) if err.is_permission_denied() => None,
            Err(err) => {
                debug!(
                    user_id = id.into_inner(),
                    error = %err,
                    "user lookup failed; leaving the id unresolved"
                );
                None
            }
        }
    }

    /// Drops one user, forcing a refetch on next use.
    ///
    /// Called after a user mutation so stale names do not linger for a
    /// full TTL.
    pub async fn invalidate(&self, id: UserId) {
        self.cache.invalidate(&id).await;
    }

    /// Drops every cached user.
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }

    /// Number of cached entries.
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Flushes pending cache maintenance so counts are accurate.
    pub async fn run_pending_tasks(&self) {
        self.cache.run_pending_tasks().await;
    }
}

impl Default for UserInfoCache {
    fn default() -> Self {
        Self::new(&CacheConfig::default())
    }
}

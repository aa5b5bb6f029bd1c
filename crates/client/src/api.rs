//! Ports between the stateful services and the HTTP boundary.
//!
//! Services depend on these narrow traits instead of the concrete
//! client, so scope resolution, the confirm flow, and the notification
//! feed are testable against mocks and stubs.

use async_trait::async_trait;

use finboard_core::access::UserRecord;
use finboard_shared::error::AppResult;
use finboard_shared::types::{NotificationId, UserId};

use crate::dto::NotificationDto;

/// Read access to the user directory.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DirectoryApi: Send + Sync {
    /// Fetches every user visible to the session.
    async fn list_users(&self) -> AppResult<Vec<UserRecord>>;

    /// Fetches a single user by id.
    async fn get_user(&self, id: UserId) -> AppResult<UserRecord>;

    /// Fetches the direct subordinates of the given user.
    async fn subordinates(&self, id: UserId) -> AppResult<Vec<UserRecord>>;
}

/// Re-verification of the session password before a destructive call.
///
/// Implementations replay the session username with the supplied
/// password against the login endpoint. Any failure, whatever the
/// status or error code, means the password did not check out.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialProbe: Send + Sync {
    /// Checks the password against the current session account.
    async fn verify_password(&self, password: &str) -> AppResult<()>;
}

/// The notification inbox.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationsApi: Send + Sync {
    /// Fetches the session user's notifications, newest first.
    async fn list_notifications(&self) -> AppResult<Vec<NotificationDto>>;

    /// Marks one notification as read.
    async fn mark_read(&self, id: NotificationId) -> AppResult<()>;

    /// Deletes one notification.
    async fn delete_notification(&self, id: NotificationId) -> AppResult<()>;
}

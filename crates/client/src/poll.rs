//! Background notification polling.
//!
//! One task per session fetches the inbox on an interval and on demand,
//! enriches author names through the user cache, and publishes
//! snapshots over a watch channel. Consumers render whatever snapshot
//! is current; a failed fetch never takes the feed down.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, Notify, watch};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use finboard_shared::config::PollingConfig;
use finboard_shared::error::AppError;
use finboard_shared::types::{NotificationId, UserId};

use crate::api::{DirectoryApi, NotificationsApi};
use crate::cache::UserInfoCache;
use crate::dto::NotificationDto;

/// One notification, enriched for display.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedItem {
    /// Notification id.
    pub id: NotificationId,
    /// Short headline.
    pub title: String,
    /// Full message body.
    pub body: String,
    /// The user whose action produced the notification.
    pub created_by: Option<UserId>,
    /// Display name of that user, when the lookup was permitted.
    pub created_by_name: Option<String>,
    /// When the notification was produced.
    pub created_at: DateTime<Utc>,
    /// Whether the session user has read it.
    pub is_read: bool,
}

/// The published feed state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeedSnapshot {
    /// Notifications, in backend order (newest first).
    pub items: Vec<FeedItem>,
    /// When this snapshot was fetched; `None` before the first fetch.
    pub fetched_at: Option<DateTime<Utc>>,
    /// Monotonic fetch counter; stale responses never overwrite newer.
    pub generation: u64,
}

impl FeedSnapshot {
    /// Number of unread notifications, for the bell badge.
    #[must_use]
    pub fn unread(&self) -> usize {
        self.items.iter().filter(|item| !item.is_read).count()
    }
}

/// Handle to the background polling task.
///
/// Dropping the handle leaves the task running; call
/// [`shutdown`](Self::shutdown) to stop it.
pub struct NotificationFeed {
    snapshot_rx: watch::Receiver<FeedSnapshot>,
    refresh: Arc<Notify>,
    shutdown: Arc<Notify>,
    last_error: Arc<Mutex<Option<AppError>>>,
    refresh_on_focus: bool,
    task: tokio::task::JoinHandle<()>,
}

impl NotificationFeed {
    /// Spawns the polling task.
    ///
    /// The first fetch happens immediately; afterwards the task wakes
    /// on the configured interval and on every
    /// [`trigger_refresh`](Self::trigger_refresh).
    pub fn spawn<N, D>(
        notifications: Arc<N>,
        directory: Arc<D>,
        cache: Arc<UserInfoCache>,
        config: &PollingConfig,
    ) -> Self
    where
        N: NotificationsApi + 'static,
        D: DirectoryApi + 'static,
    {
        let (tx, rx) = watch::channel(FeedSnapshot::default());
        let refresh = Arc::new(Notify::new());
        let shutdown = Arc::new(Notify::new());
        let last_error = Arc::new(Mutex::new(None));

        let task = FeedTask {
            notifications,
            directory,
            cache,
            tx,
            refresh: Arc::clone(&refresh),
            shutdown: Arc::clone(&shutdown),
            last_error: Arc::clone(&last_error),
            // tokio panics on a zero interval
            interval: Duration::from_secs(config.interval_secs.max(1)),
        };

        Self {
            snapshot_rx: rx,
            refresh,
            shutdown,
            last_error,
            refresh_on_focus: config.refresh_on_focus,
            task: tokio::spawn(task.run()),
        }
    }

    /// A receiver that observes every published snapshot.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<FeedSnapshot> {
        self.snapshot_rx.clone()
    }

    /// The currently published snapshot.
    #[must_use]
    pub fn snapshot(&self) -> FeedSnapshot {
        self.snapshot_rx.borrow().clone()
    }

    /// Requests an immediate fetch, ahead of the interval.
    pub fn trigger_refresh(&self) {
        self.refresh.notify_one();
    }

    /// Window-focus hook: refreshes only if configured to.
    pub fn on_focus_regained(&self) {
        if self.refresh_on_focus {
            self.refresh.notify_one();
        }
    }

    /// The most recent fetch error, cleared by the next success.
    pub async fn last_error(&self) -> Option<AppError> {
        self.last_error.lock().await.clone()
    }

    /// Stops the task and waits for it to finish.
    pub async fn shutdown(self) {
        self.shutdown.notify_one();
        if let Err(err) = self.task.await {
            warn!(error = %err, "notification feed task did not stop cleanly");
        }
    }
}

struct FeedTask<N, D> {
    notifications: Arc<N>,
    directory: Arc<D>,
    cache: Arc<UserInfoCache>,
    tx: watch::Sender<FeedSnapshot>,
    refresh: Arc<Notify>,
    shutdown: Arc<Notify>,
    last_error: Arc<Mutex<Option<AppError>>>,
    interval: Duration,
}

impl<N: NotificationsApi, D: DirectoryApi> FeedTask<N, D> {
    async fn run(self) {
        info!(
            interval_secs = self.interval.as_secs(),
            "notification feed started"
        );

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut generation: u64 = 0;

        loop {
            tokio::select! {
                () = self.shutdown.notified() => {
                    info!("notification feed received shutdown signal");
                    break;
                }
                () = self.refresh.notified() => {
                    generation += 1;
                    self.fetch_and_publish(generation).await;
                }
                _ = ticker.tick() => {
                    generation += 1;
                    self.fetch_and_publish(generation).await;
                }
            }
        }

        info!("notification feed stopped");
    }

    async fn fetch_and_publish(&self, generation: u64) {
        match self.notifications.list_notifications().await {
            Ok(dtos) => {
                let items = self.enrich(dtos).await;
                *self.last_error.lock().await = None;
                self.tx.send_if_modified(|snapshot| {
                    if generation > snapshot.generation {
                        *snapshot = FeedSnapshot {
                            items,
                            fetched_at: Some(Utc::now()),
                            generation,
                        };
                        true
                    } else {
                        debug!(
                            generation,
                            published = snapshot.generation,
                            "discarding stale notification response"
                        );
                        false
                    }
                });
            }
            Err(err) => {
                warn!(
                    error = %err,
                    error_code = err.error_code(),
                    "notification fetch failed; keeping the previous snapshot"
                );
                *self.last_error.lock().await = Some(err);
            }
        }
    }

    /// Resolves author display names through the cache.
    ///
    /// A denied or failed lookup leaves the name empty; the row renders
    /// the raw id instead.
    async fn enrich(&self, dtos: Vec<NotificationDto>) -> Vec<FeedItem> {
        let mut items = Vec::with_capacity(dtos.len());
        for dto in dtos {
            let created_by_name = match dto.created_by {
                Some(id) => self
                    .cache
                    .get_or_fetch(id, self.directory.as_ref())
                    .await
                    .map(|record| record.full_name.clone()),
                None => None,
            };
            items.push(FeedItem {
                id: dto.id,
                title: dto.title,
                body: dto.body,
                created_by: dto.created_by,
                created_by_name,
                created_at: dto.created_at,
                is_read: dto.is_read,
            });
        }
        items
    }
}

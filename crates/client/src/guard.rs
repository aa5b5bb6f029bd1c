//! Double-submit protection for entity mutations.
//!
//! Every row action (toggle, approve, delete) registers here before
//! firing. A second attempt on the same entity while the first is still
//! in flight gets a conflict instead of a duplicate request.

use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use finboard_shared::error::{AppError, AppResult};

/// The kinds of entities whose mutations are guarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// A directory user.
    User,
    /// An expense row.
    Expense,
    /// A revenue row.
    Revenue,
    /// An inventory item.
    InventoryItem,
    /// A notification.
    Notification,
}

impl EntityKind {
    /// Stable identifier for logging.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Expense => "expense",
            Self::Revenue => "revenue",
            Self::InventoryItem => "inventory_item",
            Self::Notification => "notification",
        }
    }

    const fn label(&self) -> &'static str {
        match self {
            Self::InventoryItem => "inventory item",
            _ => self.as_str(),
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Tracks which entities have a mutation in flight.
///
/// Clones share the same underlying set, so one guard can serve every
/// page of the panel.
#[derive(Debug, Clone, Default)]
pub struct MutationGuard {
    in_flight: Arc<DashMap<(EntityKind, i64), ()>>,
}

impl MutationGuard {
    /// Creates an empty guard.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a mutation on the given entity.
    ///
    /// The returned ticket releases the entity when dropped. Fails with
    /// `AppError::Conflict` while another ticket for the same entity is
    /// alive.
    pub fn begin(&self, kind: EntityKind, id: i64) -> AppResult<InFlightTicket> {
        match self.in_flight.entry((kind, id)) {
            Entry::Occupied(_) => Err(AppError::Conflict(format!(
                "Another {} change is still in progress",
                kind.label()
            ))),
            Entry::Vacant(slot) => {
                slot.insert(());
                Ok(InFlightTicket {
                    in_flight: Arc::clone(&self.in_flight),
                    key: (kind, id),
                })
            }
        }
    }

    /// Whether the given entity currently has a mutation in flight.
    ///
    /// Drives per-row spinners and disabled buttons.
    #[must_use]
    pub fn in_flight(&self, kind: EntityKind, id: i64) -> bool {
        self.in_flight.contains_key(&(kind, id))
    }
}

/// Releases the guarded entity when dropped.
#[must_use = "dropping the ticket immediately releases the entity"]
pub struct InFlightTicket {
    in_flight: Arc<DashMap<(EntityKind, i64), ()>>,
    key: (EntityKind, i64),
}

impl InFlightTicket {
    /// The guarded entity kind.
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        self.key.0
    }

    /// The guarded entity id.
    #[must_use]
    pub const fn id(&self) -> i64 {
        self.key.1
    }
}

impl Drop for InFlightTicket {
    fn drop(&mut self) {
        self.in_flight.remove(&self.key);
    }
}

impl fmt::Debug for InFlightTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InFlightTicket")
            .field("kind", &self.key.0)
            .field("id", &self.key.1)
            .finish()
    }
}

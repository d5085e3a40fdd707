//! Data source adapters for the ticket queue.
//!
//! The board reads tickets from a backing store through the [`TicketSource`]
//! trait: point-in-time snapshots (filtered, ordered, limited) plus an
//! optional subscription to row-level change events. Two backends exist:
//!
//! - [`MemoryStore`]: local in-memory fallback, also used by `turnos demo`
//!   and the tests. Supports the change stream.
//! - [`RemoteStore`]: PostgREST-style HTTP adapter for the hosted store.
//!   Snapshot-only; `subscribe` reports [`TurnosError::SubscriptionUnsupported`]
//!   and callers degrade to polling.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::error::{Result, TurnosError};
use crate::types::Ticket;

pub mod memory;
pub mod remote;

pub use memory::MemoryStore;
pub use remote::RemoteStore;

/// Default maximum rows a snapshot fetch returns (`display.snapshot_limit`
/// overrides it). There is no pagination beyond the limit; a deeper queue
/// is cut off.
pub const SNAPSHOT_LIMIT: usize = 60;

/// Kind of row-level change reported by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeOp {
    Insert,
    Update,
    Delete,
}

/// A row-level change event on the tickets relation.
///
/// `row` carries the new row payload; it is absent for deletes.
#[derive(Debug, Clone)]
pub struct ChangeEvent {
    pub op: ChangeOp,
    pub row: Option<Ticket>,
}

impl ChangeEvent {
    pub fn insert(row: Ticket) -> Self {
        Self {
            op: ChangeOp::Insert,
            row: Some(row),
        }
    }

    pub fn update(row: Ticket) -> Self {
        Self {
            op: ChangeOp::Update,
            row: Some(row),
        }
    }

    pub fn delete() -> Self {
        Self {
            op: ChangeOp::Delete,
            row: None,
        }
    }
}

/// Common interface for ticket backends.
///
/// Snapshot contract: up to the configured row limit (default
/// [`SNAPSHOT_LIMIT`]) tickets limited to the displayable statuses
/// (queued, accepted), ordered by acceptance time descending with nulls
/// first.
#[async_trait]
pub trait TicketSource: Send + Sync {
    /// Fetch the current snapshot of displayable tickets.
    async fn fetch_snapshot(&self) -> Result<Vec<Ticket>>;

    /// Subscribe to row-level change events.
    ///
    /// Backends without a push channel return
    /// [`TurnosError::SubscriptionUnsupported`]; the board then runs on the
    /// periodic poll alone with no user-visible error.
    fn subscribe(&self) -> Result<broadcast::Receiver<ChangeEvent>>;
}

/// Build the configured backend: remote when a store URL is present,
/// otherwise the in-memory fallback.
pub fn open_source(config: &crate::config::Config) -> Result<std::sync::Arc<dyn TicketSource>> {
    let limit = config.display.snapshot_limit;
    match config.store_url() {
        Some(url) => {
            let remote = RemoteStore::new(
                &url,
                config.store_api_key().as_deref(),
                &config.store.table,
                config.store_timeout(),
                limit,
            )?;
            Ok(std::sync::Arc::new(remote))
        }
        None => Ok(std::sync::Arc::new(MemoryStore::with_limit(limit))),
    }
}

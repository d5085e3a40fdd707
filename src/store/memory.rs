//! In-memory ticket store.
//!
//! Local fallback backend, and the backend behind `turnos demo` and the
//! test suite. Tickets live in a `DashMap`; every mutation broadcasts a
//! [`ChangeEvent`] so the board's change-stream path works exactly as it
//! does against a pushing remote.

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::broadcast;

use crate::error::Result;
use crate::types::{Ticket, TicketStatus};

use super::{ChangeEvent, SNAPSHOT_LIMIT, TicketSource};

/// Capacity of the change-event broadcast channel. A lagging subscriber
/// misses events; it recovers at the next periodic snapshot fetch.
const CHANNEL_CAPACITY: usize = 64;

pub struct MemoryStore {
    tickets: DashMap<String, Ticket>,
    sender: broadcast::Sender<ChangeEvent>,
    limit: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_limit(SNAPSHOT_LIMIT)
    }

    /// Build a store with a custom snapshot row limit
    /// (`display.snapshot_limit`).
    pub fn with_limit(limit: usize) -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            tickets: DashMap::new(),
            sender,
            limit,
        }
    }

    /// Insert or replace a ticket, broadcasting an insert event.
    pub fn insert(&self, ticket: Ticket) {
        self.tickets.insert(ticket.id.clone(), ticket.clone());
        let _ = self.sender.send(ChangeEvent::insert(ticket));
    }

    /// Mark a ticket accepted at a station, broadcasting an update event.
    ///
    /// Returns the updated row, or `None` if the id is unknown.
    pub fn accept(
        &self,
        id: &str,
        station: u32,
        operator: &str,
        accepted_at: &str,
    ) -> Option<Ticket> {
        let mut entry = self.tickets.get_mut(id)?;
        entry.status = TicketStatus::Accepted;
        entry.station = Some(station);
        entry.accepted_by = Some(operator.to_string());
        entry.accepted_at = Some(accepted_at.to_string());
        let updated = entry.clone();
        drop(entry);
        let _ = self.sender.send(ChangeEvent::update(updated.clone()));
        Some(updated)
    }

    /// Cancel a ticket, broadcasting an update event.
    pub fn cancel(&self, id: &str) -> Option<Ticket> {
        let mut entry = self.tickets.get_mut(id)?;
        entry.status = TicketStatus::Cancelled;
        let updated = entry.clone();
        drop(entry);
        let _ = self.sender.send(ChangeEvent::update(updated.clone()));
        Some(updated)
    }

    /// Remove a ticket entirely, broadcasting a delete event.
    pub fn remove(&self, id: &str) -> Option<Ticket> {
        let removed = self.tickets.remove(id).map(|(_, t)| t)?;
        let _ = self.sender.send(ChangeEvent::delete());
        Some(removed)
    }

    /// Number of tickets held, including cancelled ones.
    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }

    /// Queued ticket ids, oldest client number first. Used by the demo
    /// driver to pick the next ticket to call.
    pub fn queued_ids(&self) -> Vec<String> {
        let mut queued: Vec<(Option<u32>, String)> = self
            .tickets
            .iter()
            .filter(|e| e.value().status == TicketStatus::Queued)
            .map(|e| (e.value().client_number, e.key().clone()))
            .collect();
        queued.sort();
        queued.into_iter().map(|(_, id)| id).collect()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TicketSource for MemoryStore {
    async fn fetch_snapshot(&self) -> Result<Vec<Ticket>> {
        let mut rows: Vec<Ticket> = self
            .tickets
            .iter()
            .filter(|e| e.value().status.is_displayable())
            .map(|e| e.value().clone())
            .collect();

        // accepted_at descending, nulls first; ties broken by id so the
        // order is stable across fetches
        rows.sort_by(|a, b| match (&a.accepted_at, &b.accepted_at) {
            (None, None) => a.id.cmp(&b.id),
            (None, Some(_)) => std::cmp::Ordering::Less,
            (Some(_), None) => std::cmp::Ordering::Greater,
            (Some(x), Some(y)) => y.cmp(x).then_with(|| a.id.cmp(&b.id)),
        });

        rows.truncate(self.limit);
        Ok(rows)
    }

    fn subscribe(&self) -> Result<broadcast::Receiver<ChangeEvent>> {
        Ok(self.sender.subscribe())
    }
}

//! Queue projection: snapshot → the two display columns.

use crate::types::{Ticket, TicketStatus};

/// The two ordered display lists derived from a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueueView {
    /// Tickets awaiting service (left column).
    pub pending: Vec<Ticket>,
    /// Tickets currently being served (right column).
    pub accepted: Vec<Ticket>,
}

/// Partition a snapshot into pending and accepted lists, preserving input
/// order. Cancelled tickets never appear in either list, whatever the
/// snapshot contains.
pub fn project(snapshot: &[Ticket]) -> QueueView {
    let mut view = QueueView::default();
    for ticket in snapshot {
        match ticket.status {
            TicketStatus::Queued => view.pending.push(ticket.clone()),
            TicketStatus::Accepted => view.accepted.push(ticket.clone()),
            TicketStatus::Cancelled => {}
        }
    }
    view
}

//! Mock data builders for creating test tickets.
//!
//! This module provides builder patterns for creating test data without
//! needing a running backend.

#![allow(dead_code)]

use turnos::types::{Ticket, TicketStatus};

/// Builder for creating test tickets
pub struct TicketBuilder {
    ticket: Ticket,
}

impl TicketBuilder {
    /// Create a new queued ticket builder with the given ID
    pub fn new(id: &str) -> Self {
        Self {
            ticket: Ticket {
                id: id.to_string(),
                status: TicketStatus::Queued,
                ..Default::default()
            },
        }
    }

    /// Set the client name
    pub fn name(mut self, name: &str) -> Self {
        self.ticket.client_name = Some(name.to_string());
        self
    }

    /// Set the queue number
    pub fn number(mut self, number: u32) -> Self {
        self.ticket.client_number = Some(number);
        self
    }

    /// Set the requested action
    pub fn action(mut self, action: &str) -> Self {
        self.ticket.action = Some(action.to_string());
        self
    }

    /// Set the ticket status
    pub fn status(mut self, status: TicketStatus) -> Self {
        self.ticket.status = status;
        self
    }

    /// Mark the ticket accepted at a station
    pub fn accepted(mut self, station: u32, at: &str) -> Self {
        self.ticket.status = TicketStatus::Accepted;
        self.ticket.station = Some(station);
        self.ticket.accepted_at = Some(at.to_string());
        self
    }

    /// Set the operator who accepted the ticket
    pub fn accepted_by(mut self, operator: &str) -> Self {
        self.ticket.accepted_by = Some(operator.to_string());
        self
    }

    /// Build the ticket
    pub fn build(self) -> Ticket {
        self.ticket
    }
}

/// A queued ticket with a name and number
pub fn mock_queued(id: &str, name: &str, number: u32) -> Ticket {
    TicketBuilder::new(id).name(name).number(number).build()
}

/// An accepted ticket with a name, station and acceptance time
pub fn mock_accepted(id: &str, name: &str, station: u32, at: &str) -> Ticket {
    TicketBuilder::new(id).name(name).accepted(station, at).build()
}

/// A small mixed snapshot in store order (nulls first, then newest
/// acceptance first): two waiting, two being served
pub fn mock_snapshot() -> Vec<Ticket> {
    vec![
        TicketBuilder::new("t-41")
            .name("Ana")
            .number(41)
            .action("pago")
            .build(),
        TicketBuilder::new("t-42")
            .name("Sofía")
            .number(42)
            .action("retiro")
            .build(),
        TicketBuilder::new("t-39")
            .name("Luis")
            .number(39)
            .accepted(2, "2026-08-30T10:02:00Z")
            .build(),
        TicketBuilder::new("t-38")
            .name("Eva")
            .number(38)
            .accepted(1, "2026-08-30T10:01:00Z")
            .build(),
    ]
}

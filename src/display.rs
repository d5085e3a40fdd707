//! Presentation formatting for the board and CLI output.

use owo_colors::OwoColorize;

use crate::types::{Ticket, TicketStatus};

/// Padded display label for a ticket, e.g. `T-042`.
///
/// Falls back to the raw identifier when the client sequence number is
/// missing (tickets created before numbering was enabled).
pub fn ticket_label(ticket: &Ticket) -> String {
    match ticket.client_number {
        Some(n) => format!("T-{n:03}"),
        None => ticket.id.clone(),
    }
}

/// Station column text, e.g. `Caja 3`.
pub fn station_label(station: Option<u32>) -> String {
    match station {
        Some(n) => format!("Caja {n}"),
        None => "—".to_string(),
    }
}

/// Wall-clock sample for the board header, 24h `HH:MM:SS` local time.
pub fn clock_now() -> String {
    format!("{}", jiff::Zoned::now().strftime("%H:%M:%S"))
}

/// Current instant as an RFC 3339 UTC string at second precision, the
/// format ticket rows carry in `accepted_at`.
pub fn now_rfc3339() -> String {
    format!("{}", jiff::Timestamp::now().strftime("%Y-%m-%dT%H:%M:%SZ"))
}

/// One-line colored rendering of a ticket for CLI output.
pub fn format_ticket_line(ticket: &Ticket) -> String {
    let label = ticket_label(ticket);
    let name = ticket.client_name.as_deref().unwrap_or("");
    match ticket.status {
        TicketStatus::Queued => format!("{} {}", label.yellow(), name),
        TicketStatus::Accepted => format!(
            "{} {} {}",
            label.green(),
            name,
            station_label(ticket.station).cyan()
        ),
        TicketStatus::Cancelled => format!("{} {}", label.dimmed(), name.dimmed()),
    }
}

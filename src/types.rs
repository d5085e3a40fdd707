use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TurnosError;

/// Name of the tickets relation in the backing store.
pub const TICKETS_TABLE: &str = "tickets";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TicketStatus {
    #[default]
    Queued,
    Accepted,
    Cancelled,
}

impl TicketStatus {
    /// Whether a ticket with this status belongs on the board at all.
    pub fn is_displayable(&self) -> bool {
        matches!(self, TicketStatus::Queued | TicketStatus::Accepted)
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TicketStatus::Queued => write!(f, "queued"),
            TicketStatus::Accepted => write!(f, "accepted"),
            TicketStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl FromStr for TicketStatus {
    type Err = TurnosError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "queued" => Ok(TicketStatus::Queued),
            "accepted" => Ok(TicketStatus::Accepted),
            "cancelled" => Ok(TicketStatus::Cancelled),
            _ => Err(TurnosError::InvalidStatus(s.to_string())),
        }
    }
}

pub const VALID_STATUSES: &[&str] = &["queued", "accepted", "cancelled"];

/// Read-only projection of a ticket row from the backing store.
///
/// Tickets are created and mutated by an external process; the board only
/// reads snapshots and change events. `accepted_at` is an RFC 3339 UTC
/// timestamp string, so lexicographic order is chronological order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_number: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,

    #[serde(default)]
    pub status: TicketStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub station: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub accepted_by: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub accepted_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_roundtrip() {
        for s in VALID_STATUSES {
            let status: TicketStatus = s.parse().unwrap();
            assert_eq!(status.to_string(), *s);
        }
    }

    #[test]
    fn test_status_parse_invalid() {
        assert!("pending".parse::<TicketStatus>().is_err());
        assert!("".parse::<TicketStatus>().is_err());
    }

    #[test]
    fn test_status_parse_case_insensitive() {
        assert_eq!(
            "Accepted".parse::<TicketStatus>().unwrap(),
            TicketStatus::Accepted
        );
    }

    #[test]
    fn test_displayable() {
        assert!(TicketStatus::Queued.is_displayable());
        assert!(TicketStatus::Accepted.is_displayable());
        assert!(!TicketStatus::Cancelled.is_displayable());
    }

    #[test]
    fn test_ticket_deserializes_sparse_row() {
        // Rows from the store carry nulls for unset columns
        let row = r#"{"id":"t-1","status":"queued","client_name":null}"#;
        let ticket: Ticket = serde_json::from_str(row).unwrap();
        assert_eq!(ticket.id, "t-1");
        assert_eq!(ticket.status, TicketStatus::Queued);
        assert!(ticket.client_name.is_none());
        assert!(ticket.station.is_none());
    }

    #[test]
    fn test_ticket_serde_roundtrip() {
        let ticket = Ticket {
            id: "t-2".to_string(),
            client_name: Some("Ana".to_string()),
            client_number: Some(42),
            action: Some("pago".to_string()),
            status: TicketStatus::Accepted,
            station: Some(3),
            accepted_by: Some("mjr".to_string()),
            accepted_at: Some("2026-08-30T14:02:11Z".to_string()),
        };
        let json = serde_json::to_string(&ticket).unwrap();
        let parsed: Ticket = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, ticket);
    }
}

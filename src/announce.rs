//! Audible announcement of newly accepted tickets.
//!
//! When a change event carries a row that just turned `accepted`, the board
//! calls the client to their station out loud, once. Deduplication is a
//! single-slot memory of the last announced identifier, scoped to the life
//! of the display session. It is never persisted, so an identifier reused
//! in a later session announces again.
//!
//! Speech runs through an external synthesizer command. Any failure to
//! spawn or play is swallowed: the visual board must never be affected by
//! a missing speaker.

use std::sync::Mutex;

use async_trait::async_trait;
use tokio::process::{Child, Command};

use crate::config::SpeechConfig;
use crate::error::{Result, TurnosError};
use crate::store::ChangeEvent;
use crate::types::{Ticket, TicketStatus};

/// A spoken call-out for one accepted ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Announcement {
    pub ticket_id: String,
    pub phrase: String,
}

/// Session-scoped announcement state.
///
/// Holds the single "last announced identifier" slot. Suppression compares
/// identifiers only: a re-emitted update for the same accepted ticket is
/// silenced, but the slot holds one id, not a set, so interleaved
/// re-acceptances of two tickets can each announce again.
#[derive(Debug, Default)]
pub struct Announcer {
    last_announced: Option<String>,
}

impl Announcer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inspect a change event's new-row payload. Returns an announcement
    /// exactly when the row is accepted and differs from the last announced
    /// identifier, updating the slot as a side effect.
    pub fn on_change(&mut self, event: &ChangeEvent) -> Option<Announcement> {
        let row = event.row.as_ref()?;
        if row.status != TicketStatus::Accepted {
            return None;
        }
        if self.last_announced.as_deref() == Some(row.id.as_str()) {
            return None;
        }
        self.last_announced = Some(row.id.clone());
        Some(Announcement {
            ticket_id: row.id.clone(),
            phrase: call_phrase(row),
        })
    }

    /// The identifier most recently announced this session, if any.
    pub fn last_announced(&self) -> Option<&str> {
        self.last_announced.as_deref()
    }
}

/// Build the spoken call-out for an accepted ticket:
/// `"<name>, puede pasar a la caja <station>"`.
///
/// Falls back to the padded ticket label when the client name is missing,
/// and drops the station clause when no station is assigned.
pub fn call_phrase(ticket: &Ticket) -> String {
    let name = ticket
        .client_name
        .clone()
        .unwrap_or_else(|| crate::display::ticket_label(ticket));
    match ticket.station {
        Some(station) => format!("{name}, puede pasar a la caja {station}"),
        None => format!("{name}, puede pasar"),
    }
}

/// Seam between the announcement logic and the platform voice.
#[async_trait]
pub trait Speaker: Send + Sync {
    async fn speak(&self, phrase: &str) -> Result<()>;
}

/// Process-backed speech synthesis.
///
/// Spawns the configured synthesizer command with a fixed voice and rate.
/// At most one utterance is audible: a new call kills the in-flight child
/// before spawning the next.
pub struct SpeechSynthesizer {
    config: SpeechConfig,
    current: Mutex<Option<Child>>,
}

impl SpeechSynthesizer {
    pub fn new(config: SpeechConfig) -> Self {
        Self {
            config,
            current: Mutex::new(None),
        }
    }
}

#[async_trait]
impl Speaker for SpeechSynthesizer {
    async fn speak(&self, phrase: &str) -> Result<()> {
        if !self.config.enabled {
            return Ok(());
        }

        let child = Command::new(&self.config.command)
            .arg("-v")
            .arg(&self.config.voice)
            .arg("-s")
            .arg(self.config.rate.to_string())
            .arg(phrase)
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .spawn()
            .map_err(|e| {
                TurnosError::Speech(format!("failed to spawn '{}': {e}", self.config.command))
            })?;

        let mut guard = self
            .current
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(mut previous) = guard.take() {
            let _ = previous.start_kill();
        }
        *guard = Some(child);
        Ok(())
    }
}

/// Speak an announcement, swallowing any synthesis failure.
pub async fn announce(speaker: &dyn Speaker, announcement: &Announcement) {
    if let Err(e) = speaker.speak(&announcement.phrase).await {
        tracing::debug!(ticket = %announcement.ticket_id, error = %e, "announcement suppressed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ChangeEvent;

    fn accepted(id: &str, name: Option<&str>, station: Option<u32>) -> Ticket {
        Ticket {
            id: id.to_string(),
            client_name: name.map(|s| s.to_string()),
            station,
            status: TicketStatus::Accepted,
            ..Default::default()
        }
    }

    #[test]
    fn test_announces_newly_accepted() {
        let mut announcer = Announcer::new();
        let event = ChangeEvent::update(accepted("b", Some("Ana"), Some(3)));
        let announcement = announcer.on_change(&event).unwrap();
        assert_eq!(announcement.ticket_id, "b");
        assert_eq!(announcement.phrase, "Ana, puede pasar a la caja 3");
        assert_eq!(announcer.last_announced(), Some("b"));
    }

    #[test]
    fn test_same_identifier_announced_once() {
        let mut announcer = Announcer::new();
        let event = ChangeEvent::update(accepted("b", Some("Ana"), Some(3)));
        assert!(announcer.on_change(&event).is_some());
        assert!(announcer.on_change(&event).is_none());
    }

    #[test]
    fn test_distinct_identifiers_each_announce() {
        let mut announcer = Announcer::new();
        let first = ChangeEvent::update(accepted("a", Some("Ana"), Some(1)));
        let second = ChangeEvent::update(accepted("b", Some("Luis"), Some(2)));
        assert!(announcer.on_change(&first).is_some());
        assert!(announcer.on_change(&second).is_some());
    }

    #[test]
    fn test_single_slot_allows_alternating_repeat() {
        // The dedup memory holds one identifier, not a set
        let mut announcer = Announcer::new();
        let a = ChangeEvent::update(accepted("a", None, None));
        let b = ChangeEvent::update(accepted("b", None, None));
        assert!(announcer.on_change(&a).is_some());
        assert!(announcer.on_change(&b).is_some());
        assert!(announcer.on_change(&a).is_some());
    }

    #[test]
    fn test_ignores_non_accepted_rows() {
        let mut announcer = Announcer::new();
        let queued = ChangeEvent::insert(Ticket {
            id: "q".to_string(),
            status: TicketStatus::Queued,
            ..Default::default()
        });
        assert!(announcer.on_change(&queued).is_none());
        assert!(announcer.on_change(&ChangeEvent::delete()).is_none());
    }

    #[test]
    fn test_phrase_without_station() {
        let phrase = call_phrase(&accepted("x", Some("Luis"), None));
        assert_eq!(phrase, "Luis, puede pasar");
    }

    #[test]
    fn test_phrase_falls_back_to_ticket_label() {
        let mut ticket = accepted("t-9", None, Some(2));
        ticket.client_number = Some(7);
        assert_eq!(call_phrase(&ticket), "T-007, puede pasar a la caja 2");
    }
}

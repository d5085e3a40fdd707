//! Synthetic ticket traffic for `turnos demo`.
//!
//! Drives an in-memory store the way a real counter would: new clients
//! take a number, operators call them to a station a little later, and
//! the occasional ticket gets cancelled. Useful for trying the board
//! without a hosted backend.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use uuid::Uuid;

use crate::display::now_rfc3339;
use crate::store::MemoryStore;
use crate::types::Ticket;

const NAMES: &[&str] = &[
    "Ana", "Luis", "Sofía", "Carlos", "María", "Jorge", "Lucía", "Pedro", "Elena", "Diego",
];

const ACTIONS: &[&str] = &["pago", "retiro", "consulta", "depósito"];

const STATIONS: u32 = 4;

fn random_ticket(number: u32) -> Ticket {
    let mut rng = rand::rng();
    Ticket {
        id: Uuid::new_v4().to_string(),
        client_name: Some(NAMES[rng.random_range(0..NAMES.len())].to_string()),
        client_number: Some(number),
        action: Some(ACTIONS[rng.random_range(0..ACTIONS.len())].to_string()),
        ..Default::default()
    }
}

/// Spawn a background task feeding the store with synthetic activity.
///
/// Roughly every couple of seconds either a new ticket joins the queue
/// or the oldest queued ticket is called to a random station. Runs until
/// the returned handle is dropped or aborted.
pub fn spawn_driver(store: Arc<MemoryStore>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut next_number: u32 = 1;

        // Seed a small queue so the board is not empty on first paint
        for _ in 0..3 {
            store.insert(random_ticket(next_number));
            next_number += 1;
        }

        loop {
            let wait_ms = rand::rng().random_range(1500..3500);
            tokio::time::sleep(Duration::from_millis(wait_ms)).await;

            let queued = store.queued_ids();
            let roll: f64 = rand::rng().random();

            if queued.is_empty() || (roll < 0.45 && queued.len() < 8) {
                store.insert(random_ticket(next_number));
                next_number += 1;
            } else if roll < 0.92 {
                let station = rand::rng().random_range(1..=STATIONS);
                store.accept(&queued[0], station, "demo", &now_rfc3339());
            } else {
                store.cancel(&queued[queued.len() - 1]);
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TicketStatus;

    #[test]
    fn test_random_ticket_is_queued_with_name_and_number() {
        let ticket = random_ticket(7);
        assert_eq!(ticket.status, TicketStatus::Queued);
        assert_eq!(ticket.client_number, Some(7));
        assert!(ticket.client_name.is_some());
        assert!(ticket.accepted_at.is_none());
    }

    #[tokio::test]
    async fn test_driver_seeds_initial_queue() {
        let store = Arc::new(MemoryStore::new());
        let handle = spawn_driver(Arc::clone(&store));

        // The seed inserts run before the first sleep
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(store.len() >= 3);

        handle.abort();
    }
}

//! QueueBoard model types for testable state management
//!
//! This module separates state (BoardState) from view (BoardViewModel)
//! enabling comprehensive unit testing without the iocraft framework.

use std::collections::HashSet;

use crate::display;
use crate::queue;
use crate::types::Ticket;

/// Raw display state, overwritten by whichever refresh completes last.
#[derive(Debug, Clone, Default)]
pub struct BoardState {
    /// Tickets awaiting service, in snapshot order.
    pub pending: Vec<Ticket>,
    /// Tickets being served, in snapshot order, minus client-side hides.
    pub accepted: Vec<Ticket>,
    /// Tickets hidden client-side after their announcement window. The
    /// backing store still has them accepted; the hide survives re-fetches
    /// until the store itself stops returning the row.
    pub hidden: HashSet<String>,
    /// Wall-clock sample for the header.
    pub clock: String,
    /// Whether the change-stream subscription is connected. When false the
    /// board runs on the periodic poll alone.
    pub stream_live: bool,
}

impl BoardState {
    /// Replace the display lists with a fresh snapshot projection,
    /// re-applying client-side hides. Hides whose ticket no longer appears
    /// in the snapshot are dropped.
    pub fn apply_snapshot(&mut self, snapshot: &[Ticket]) {
        let view = queue::project(snapshot);
        self.pending = view.pending;
        self.hidden
            .retain(|id| view.accepted.iter().any(|t| &t.id == id));
        let hidden = &self.hidden;
        self.accepted = view
            .accepted
            .into_iter()
            .filter(|t| !hidden.contains(&t.id))
            .collect();
    }

    /// Hide a ticket from the accepted column (deferred-removal timer
    /// firing). Returns `false` when the ticket was already gone, in which
    /// case nothing changes.
    pub fn hide_accepted(&mut self, id: &str) -> bool {
        let before = self.accepted.len();
        self.accepted.retain(|t| t.id != id);
        if self.accepted.len() == before {
            return false;
        }
        self.hidden.insert(id.to_string());
        true
    }

    /// Drop a client-side hide so a re-announced ticket shows again.
    pub fn unhide(&mut self, id: &str) {
        self.hidden.remove(id);
    }

    /// Sample the wall clock for the header.
    pub fn tick_clock(&mut self) {
        self.clock = display::clock_now();
    }
}

/// In-flight snapshot-fetch guard.
///
/// At most one fetch runs at a time; triggers arriving while one is in
/// flight coalesce into a single follow-up fetch, so the display always
/// converges on the latest store state without racing writes.
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchGuard {
    busy: bool,
    pending: bool,
}

impl FetchGuard {
    /// Try to begin a fetch. `true` means the caller owns the fetch;
    /// `false` means one is already running and this trigger coalesced.
    pub fn begin(&mut self) -> bool {
        if self.busy {
            self.pending = true;
            false
        } else {
            self.busy = true;
            true
        }
    }

    /// Finish a fetch. `true` means coalesced triggers arrived and the
    /// owner must fetch once more before releasing.
    pub fn finish(&mut self) -> bool {
        if self.pending {
            self.pending = false;
            true
        } else {
            self.busy = false;
            false
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }
}

/// A single rendered row on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowViewModel {
    pub label: String,
    pub name: String,
    pub detail: String,
    pub highlight: bool,
}

/// Computed view model for rendering
#[derive(Debug, Clone)]
pub struct BoardViewModel {
    pub clock: String,
    pub stream_live: bool,
    pub pending_rows: Vec<RowViewModel>,
    pub serving_rows: Vec<RowViewModel>,
}

/// Compute the renderable rows from the raw state. The first serving row
/// is the most recently accepted ticket and gets the highlight.
pub fn compute_view_model(state: &BoardState) -> BoardViewModel {
    let pending_rows = state
        .pending
        .iter()
        .map(|t| RowViewModel {
            label: display::ticket_label(t),
            name: t.client_name.clone().unwrap_or_default(),
            detail: t.action.clone().unwrap_or_default(),
            highlight: false,
        })
        .collect();

    let serving_rows = state
        .accepted
        .iter()
        .enumerate()
        .map(|(i, t)| RowViewModel {
            label: display::ticket_label(t),
            name: t.client_name.clone().unwrap_or_default(),
            detail: display::station_label(t.station),
            highlight: i == 0,
        })
        .collect();

    BoardViewModel {
        clock: state.clock.clone(),
        stream_live: state.stream_live,
        pending_rows,
        serving_rows,
    }
}

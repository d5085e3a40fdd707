//! Snapshot listing command (`turnos ls`)
//!
//! One-shot view of the queue for terminals where the fullscreen board
//! is overkill: fetches a single snapshot and prints both columns,
//! optionally narrowed to one status.

use owo_colors::OwoColorize;

use crate::config::Config;
use crate::display::format_ticket_line;
use crate::error::Result;
use crate::queue::project;
use crate::store::open_source;
use crate::types::{Ticket, TicketStatus};

/// Keep only the rows with the requested status.
fn retain_status(snapshot: &mut Vec<Ticket>, status: TicketStatus) {
    snapshot.retain(|t| t.status == status);
}

/// Print the current queue snapshot and exit
pub async fn cmd_ls(status: Option<TicketStatus>) -> Result<()> {
    let config = Config::load()?;
    let source = open_source(&config)?;
    let mut snapshot = source.fetch_snapshot().await?;
    if let Some(status) = status {
        retain_status(&mut snapshot, status);
    }
    let view = project(&snapshot);

    println!("{} ({})", "EN ESPERA".yellow().bold(), view.pending.len());
    for ticket in &view.pending {
        println!("  {}", format_ticket_line(ticket));
    }

    println!();
    println!("{} ({})", "ATENDIENDO".green().bold(), view.accepted.len());
    for ticket in &view.accepted {
        println!("  {}", format_ticket_line(ticket));
    }

    Ok(())
}

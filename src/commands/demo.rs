//! Demo command (`turnos demo`)
//!
//! Runs the board against an in-memory store driven by synthetic
//! activity. No backend credentials needed.

use std::sync::Arc;

use iocraft::prelude::*;

use crate::config::{Config, DisplayConfig};
use crate::demo::spawn_driver;
use crate::error::{Result, TurnosError};
use crate::store::{MemoryStore, TicketSource};
use crate::tui::QueueBoard;

/// Launch the queue board over a synthetic in-memory queue
pub async fn cmd_demo() -> Result<()> {
    let mut config = Config::load().unwrap_or_default();
    if config.display.business_name == DisplayConfig::default().business_name {
        config.display.business_name = "Turnos (demo)".to_string();
    }

    let store = Arc::new(MemoryStore::new());
    let driver = spawn_driver(Arc::clone(&store));

    let source: Arc<dyn TicketSource> = store;
    let result = element!(QueueBoard(source: Some(source), config: config))
        .fullscreen()
        .await
        .map_err(|e| TurnosError::Other(format!("TUI error: {e}")));

    driver.abort();
    result
}

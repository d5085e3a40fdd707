//! Queue board command (`turnos board`)
//!
//! Launches the fullscreen "now serving" display against the configured
//! ticket backend.

use iocraft::prelude::*;

use crate::config::Config;
use crate::error::{Result, TurnosError};
use crate::store::open_source;
use crate::tui::QueueBoard;

/// Launch the live queue board TUI
pub async fn cmd_board() -> Result<()> {
    let config = Config::load()?;
    let source = open_source(&config)?;

    element!(QueueBoard(source: Some(source), config: config))
        .fullscreen()
        .await
        .map_err(|e| TurnosError::Other(format!("TUI error: {e}")))
}

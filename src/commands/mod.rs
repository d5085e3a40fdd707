//! Command implementations for the turnos CLI.

mod board;
mod config;
mod demo;
mod ls;

pub use board::cmd_board;
pub use config::{cmd_config_get, cmd_config_set, cmd_config_show};
pub use demo::cmd_demo;
pub use ls::cmd_ls;

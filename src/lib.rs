pub mod announce;
pub mod commands;
pub mod config;
pub mod demo;
pub mod display;
pub mod error;
pub mod queue;
pub mod store;
pub mod tui;
pub mod types;

pub use announce::{Announcement, Announcer, Speaker, call_phrase};
pub use config::{Config, DisplayConfig, SpeechConfig, StoreConfig};
pub use error::{Result, TurnosError};
pub use queue::{QueueView, project};
pub use store::{ChangeEvent, ChangeOp, MemoryStore, RemoteStore, TicketSource, open_source};
pub use types::{TICKETS_TABLE, Ticket, TicketStatus, VALID_STATUSES};

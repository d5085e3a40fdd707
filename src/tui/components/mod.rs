//! Shared TUI components for the queue board.

pub mod column;
pub mod footer;
pub mod header;

pub use column::{QueueColumn, QueueColumnProps};
pub use footer::{Footer, FooterProps, Shortcut, board_shortcuts};
pub use header::{Header, HeaderProps};

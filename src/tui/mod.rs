//! TUI module for the live queue display
//!
//! The board is split into a pure state/view-model layer (`model`) and the
//! iocraft component tree (`board`, `components`), so queue behavior can
//! be unit tested without a terminal.

pub mod board;
pub mod components;
pub mod model;
pub mod theme;
pub mod timers;

pub use board::{QueueBoard, QueueBoardProps};
pub use model::{BoardState, BoardViewModel, FetchGuard, RowViewModel, compute_view_model};
pub use theme::Theme;
pub use timers::TimerRegistry;

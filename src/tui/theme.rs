//! Theme system for TUI colors and styles
//!
//! Defines color constants consistent with the CLI output (display.rs).

use iocraft::prelude::Color;

use crate::types::TicketStatus;

/// Theme configuration for TUI components
#[derive(Debug, Clone)]
pub struct Theme {
    // Status colors (consistent with CLI output)
    pub status_queued: Color,
    pub status_accepted: Color,
    pub status_cancelled: Color,

    // UI colors
    pub border: Color,
    pub background: Color,
    pub text: Color,
    pub text_dimmed: Color,
    pub highlight: Color,
    pub call_out: Color,
    pub label_color: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            status_queued: Color::Yellow,
            status_accepted: Color::Green,
            status_cancelled: Color::Rgb {
                r: 120,
                g: 120,
                b: 120,
            },

            border: Color::Rgb {
                r: 120,
                g: 120,
                b: 120,
            },
            background: Color::Reset,
            text: Color::White,
            text_dimmed: Color::Rgb {
                r: 120,
                g: 120,
                b: 120,
            },
            highlight: Color::Blue,
            call_out: Color::Green,
            label_color: Color::Cyan,
        }
    }
}

impl Theme {
    /// Get the color for a ticket status
    pub fn status_color(&self, status: TicketStatus) -> Color {
        match status {
            TicketStatus::Queued => self.status_queued,
            TicketStatus::Accepted => self.status_accepted,
            TicketStatus::Cancelled => self.status_cancelled,
        }
    }
}

/// Global theme instance
pub static THEME: std::sync::LazyLock<Theme> = std::sync::LazyLock::new(Theme::default);

/// Get a reference to the global theme
pub fn theme() -> &'static Theme {
    &THEME
}

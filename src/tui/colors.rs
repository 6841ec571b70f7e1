//! Color constants for the terminal user interface.

use ratatui::style::Color;

// Each screen has its own accent so the active tab is obvious at a glance.

/// Inbox accent, also used for tab highlights.
pub const INBOX_BLUE: Color = Color::Rgb(0, 122, 255);
/// Next Actions accent
pub const ACTION_GREEN: Color = Color::Rgb(52, 199, 89);
/// Projects accent
pub const PROJECT_PURPLE: Color = Color::Rgb(175, 82, 222);
/// Completed tasks and secondary text
pub const MUTED_GRAY: Color = Color::Rgb(142, 142, 147);

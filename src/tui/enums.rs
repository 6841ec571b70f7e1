//! Enumerations for TUI state management.

use ratatui::style::Color;

use crate::fields::Context;
use crate::project::ProjectId;
use crate::tui::colors::{ACTION_GREEN, INBOX_BLUE, PROJECT_PURPLE};

/// The three top-level screens, in tab order.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Screen {
    Inbox,
    NextActions,
    Projects,
}

impl Screen {
    pub const ALL: [Screen; 3] = [Screen::Inbox, Screen::NextActions, Screen::Projects];

    pub fn index(self) -> usize {
        match self {
            Screen::Inbox => 0,
            Screen::NextActions => 1,
            Screen::Projects => 2,
        }
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn title(self) -> &'static str {
        match self {
            Screen::Inbox => "Inbox",
            Screen::NextActions => "Next Actions",
            Screen::Projects => "Projects",
        }
    }

    pub fn color(self) -> Color {
        match self {
            Screen::Inbox => INBOX_BLUE,
            Screen::NextActions => ACTION_GREEN,
            Screen::Projects => PROJECT_PURPLE,
        }
    }
}

/// Application state for the terminal user interface.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AppState {
    Browse,
    AddTask,
    Process,
    NewProject,
    ConfirmDeleteProject,
    /// The task list of one project, open over the Projects screen.
    ProjectTasks,
    Help,
}

/// Field with focus in the new project dialog.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ProjectField {
    Name,
    Description,
}

/// One row of the process dialog.
#[derive(Clone, PartialEq, Debug)]
pub enum ProcessChoice {
    Project(ProjectId),
    NewProject,
    Context(Context),
}

//! Projects and derived progress.
//!
//! A project is a named container that tasks point at by id. The reference
//! is weak: tasks are never owned by a project, and progress is computed on
//! demand by scanning the tasks that reference it.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque project identifier, unique for the lifetime of a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(pub u64);

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for ProjectId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(ProjectId)
    }
}

/// A multi-step outcome that groups tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// A project together with the counts derived from the tasks that reference it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectProgress<'a> {
    pub project: &'a Project,
    pub progress: u8,
    pub task_count: usize,
    pub completed_count: usize,
}

/// Percentage of completed tasks, rounded half-up. Zero tasks means zero progress.
pub fn progress_percent(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let completed = completed.min(total);
    ((completed * 200 + total) / (total * 2)) as u8
}

/// Where an inbox task should go when it is moved into a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectTarget {
    Existing(ProjectId),
    New { name: String, description: String },
}

impl ProjectTarget {
    pub fn new_project(name: impl Into<String>, description: impl Into<String>) -> Self {
        ProjectTarget::New { name: name.into(), description: description.into() }
    }
}

/// Result of a successful move into a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assignment {
    pub project_id: ProjectId,
    pub created_project: bool,
}

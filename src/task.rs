//! Task data structure and related functionality.
//!
//! A task is a single captured item. It enters the workflow through the inbox
//! and is then processed into a next action or parked under a project.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::fields::{Context, Status, StatusKind};
use crate::project::ProjectId;

/// Opaque task identifier, unique for the lifetime of a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub u64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for TaskId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(TaskId)
    }
}

/// A captured work item.
///
/// On the wire a task is one flat object that always carries `context` and
/// `projectId`, `null` when the status has none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "TaskRecord", try_from = "TaskRecord")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub status: Status,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl Task {
    pub fn kind(&self) -> StatusKind {
        self.status.kind()
    }

    pub fn context(&self) -> Option<&Context> {
        self.status.context()
    }

    pub fn project_id(&self) -> Option<ProjectId> {
        self.status.project_id()
    }

    pub fn is_inbox(&self) -> bool {
        self.kind() == StatusKind::Inbox
    }

    pub fn is_next_action(&self) -> bool {
        self.kind() == StatusKind::NextAction
    }

    /// Apply a patch field by field. Fields the patch leaves unset are kept.
    pub(crate) fn merge(&mut self, patch: TaskPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TaskRecord {
    id: TaskId,
    title: String,
    status: StatusKind,
    #[serde(default)]
    context: Option<Context>,
    #[serde(default)]
    project_id: Option<ProjectId>,
    completed: bool,
    created_at: DateTime<Utc>,
}

impl From<Task> for TaskRecord {
    fn from(task: Task) -> Self {
        TaskRecord {
            status: task.kind(),
            context: task.context().cloned(),
            project_id: task.project_id(),
            id: task.id,
            title: task.title,
            completed: task.completed,
            created_at: task.created_at,
        }
    }
}

impl TryFrom<TaskRecord> for Task {
    type Error = String;

    /// Fields that do not belong to the status are dropped.
    fn try_from(record: TaskRecord) -> Result<Self, Self::Error> {
        let status = match record.status {
            StatusKind::Inbox => Status::Inbox,
            StatusKind::NextAction => Status::NextAction {
                context: record.context,
                project_id: record.project_id,
            },
            StatusKind::Project => match record.project_id {
                Some(project_id) => Status::Project { project_id },
                None => return Err(format!("task {} has status project but no projectId", record.id)),
            },
        };
        Ok(Task {
            id: record.id,
            title: record.title,
            status,
            completed: record.completed,
            created_at: record.created_at,
        })
    }
}

/// A partial update for [`Task`]. Unset fields leave the task untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub status: Option<Status>,
    pub completed: Option<bool>,
}

impl TaskPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }
}

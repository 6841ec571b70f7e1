//! Error types for store operations.
//!
//! A rejected operation never mutates the store. Callers that only care
//! about the happy path can drop the error and observe a silent no-op.

use thiserror::Error;

use crate::fields::Context;
use crate::project::ProjectId;
use crate::task::TaskId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("task title cannot be empty")]
    EmptyTitle,

    #[error("project name cannot be empty")]
    EmptyProjectName,

    #[error("context label cannot be empty")]
    EmptyContext,

    #[error("task {0} not found")]
    TaskNotFound(TaskId),

    #[error("project {0} not found")]
    ProjectNotFound(ProjectId),

    #[error("unknown context {0}")]
    UnknownContext(Context),

    #[error("context {0} already exists")]
    DuplicateContext(Context),

    #[error("task {0} has already been processed out of the inbox")]
    NotInInbox(TaskId),
}

impl StoreError {
    /// Rejections of blank input, which front ends ignore without a message.
    pub fn is_blank_input(&self) -> bool {
        matches!(
            self,
            StoreError::EmptyTitle | StoreError::EmptyProjectName | StoreError::EmptyContext
        )
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;

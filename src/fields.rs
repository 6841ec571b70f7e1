//! Workflow status, context labels and list filters.
//!
//! `Status` is a tagged variant: each case carries only the fields that are
//! meaningful for it, so an inbox task can never hold a stale context or
//! project reference left over from an earlier transition.

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::project::ProjectId;

/// Contexts every fresh store starts with.
pub const DEFAULT_CONTEXTS: [&str; 5] = ["@computer", "@home", "@errands", "@phone", "@office"];

/// A context label such as `@phone`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Context(String);

impl Context {
    /// Build a context from user input: trimmed, `@`-prefixed.
    /// Returns `None` when nothing but whitespace (or a lone `@`) remains.
    pub fn parse(label: &str) -> Option<Self> {
        let trimmed = label.trim();
        let bare = trimmed.strip_prefix('@').unwrap_or(trimmed).trim();
        if bare.is_empty() {
            return None;
        }
        Some(Context(format!("@{bare}")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Context {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Context::parse(s).ok_or_else(|| format!("'{s}' is not a valid context label"))
    }
}

/// Where a task currently sits in the workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum Status {
    /// Captured but not yet processed.
    Inbox,
    /// Ready to be done, optionally in a context and optionally tied to a project.
    NextAction {
        #[serde(default)]
        context: Option<Context>,
        #[serde(default, rename = "projectId")]
        project_id: Option<ProjectId>,
    },
    /// Parked under a project.
    Project {
        #[serde(rename = "projectId")]
        project_id: ProjectId,
    },
}

impl Status {
    /// A next action in `context` with no project.
    pub fn next_action(context: Context) -> Self {
        Status::NextAction { context: Some(context), project_id: None }
    }

    pub fn project(project_id: ProjectId) -> Self {
        Status::Project { project_id }
    }

    pub fn kind(&self) -> StatusKind {
        match self {
            Status::Inbox => StatusKind::Inbox,
            Status::NextAction { .. } => StatusKind::NextAction,
            Status::Project { .. } => StatusKind::Project,
        }
    }

    pub fn context(&self) -> Option<&Context> {
        match self {
            Status::NextAction { context, .. } => context.as_ref(),
            _ => None,
        }
    }

    pub fn project_id(&self) -> Option<ProjectId> {
        match self {
            Status::NextAction { project_id, .. } => *project_id,
            Status::Project { project_id } => Some(*project_id),
            Status::Inbox => None,
        }
    }
}

/// The bare status tag, without payload.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum StatusKind {
    Inbox,
    NextAction,
    Project,
}

/// Format a status tag for display.
pub fn format_status(kind: StatusKind) -> &'static str {
    match kind {
        StatusKind::Inbox => "Inbox",
        StatusKind::NextAction => "Next Action",
        StatusKind::Project => "Project",
    }
}

/// A list filter: either everything, or only entries equal to a value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Filter<T> {
    #[default]
    All,
    Only(T),
}

/// Filter over task contexts. `All` also matches tasks without a context.
pub type ContextFilter = Filter<Context>;

/// Filter over project references. `All` also matches tasks without a project.
pub type ProjectFilter = Filter<ProjectId>;

impl<T: PartialEq> Filter<T> {
    pub fn matches(&self, value: Option<&T>) -> bool {
        match self {
            Filter::All => true,
            Filter::Only(wanted) => value == Some(wanted),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Filter::All)
    }
}

impl<T: fmt::Display> fmt::Display for Filter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::All => f.write_str("all"),
            Filter::Only(value) => value.fmt(f),
        }
    }
}

impl<T> FromStr for Filter<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Filter::All);
        }
        s.parse::<T>().map(Filter::Only).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_parse() {
        assert_eq!(Context::parse("phone").unwrap().as_str(), "@phone");
        assert_eq!(Context::parse("  @home ").unwrap().as_str(), "@home");
        assert!(Context::parse("   ").is_none());
        assert!(Context::parse("@").is_none());
    }

    #[test]
    fn test_filter_all_matches_none() {
        let filter: ContextFilter = Filter::All;
        assert!(filter.matches(None));
        let only = Filter::Only(Context::parse("@home").unwrap());
        assert!(!only.matches(None));
        assert!(only.matches(Context::parse("@home").as_ref()));
        assert!(!only.matches(Context::parse("@phone").as_ref()));
    }

    #[test]
    fn test_filter_from_str() {
        assert_eq!("ALL".parse::<ContextFilter>().unwrap(), Filter::All);
        assert_eq!(
            "phone".parse::<ContextFilter>().unwrap(),
            Filter::Only(Context::parse("@phone").unwrap())
        );
        assert_eq!("7".parse::<ProjectFilter>().unwrap(), Filter::Only(ProjectId(7)));
        assert!("seven".parse::<ProjectFilter>().is_err());
    }

    #[test]
    fn test_status_serializes_with_kebab_tag() {
        let status = Status::next_action(Context::parse("@phone").unwrap());
        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["status"], "next-action");
        assert_eq!(json["context"], "@phone");
        assert!(json["projectId"].is_null());
    }
}

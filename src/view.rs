//! Plain-text rendering of the store's views for the CLI.

use std::fmt::Write;

use chrono::{DateTime, Local, Utc};

use crate::fields::{format_status, ContextFilter, ProjectFilter, StatusKind};
use crate::store::TaskStore;
use crate::task::Task;

/// Format a timestamp as a local calendar date.
pub fn format_date(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%Y-%m-%d").to_string()
}

/// Truncate a string to a maximum width, adding ellipsis if needed.
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

/// A text progress bar such as `[#####-----]`.
pub fn progress_bar(percent: u8, width: usize) -> String {
    let filled = (usize::from(percent.min(100)) * width + 50) / 100;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

fn check(task: &Task) -> &'static str {
    if task.completed {
        "[x]"
    } else {
        "[ ]"
    }
}

/// The inbox as a table.
pub fn inbox_table(store: &TaskStore) -> String {
    let tasks = store.list_inbox();
    let mut out = String::new();
    let _ = writeln!(out, "Inbox ({} items to process)", tasks.len());
    if tasks.is_empty() {
        out.push_str("  Inbox is empty\n");
        return out;
    }
    let _ = writeln!(out, "{:<5} {:<10} {}", "ID", "Captured", "Title");
    for t in tasks {
        let _ = writeln!(out, "{:<5} {:<10} {}", t.id, format_date(t.created_at), t.title);
    }
    out
}

/// Next actions under the given filters as a table.
pub fn next_actions_table(store: &TaskStore, context: &ContextFilter, project: &ProjectFilter) -> String {
    let tasks = store.list_next_actions(context, project);
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Next Actions ({} tasks ready to do) [context: {}, project: {}]",
        tasks.len(),
        context,
        project
    );
    if tasks.is_empty() {
        out.push_str("  No next actions\n");
        return out;
    }
    let _ = writeln!(out, "{:<5} {:<4} {:<10} {:<16} {}", "ID", "Done", "Context", "Project", "Title");
    for t in tasks {
        let context = t.context().map(|c| c.to_string()).unwrap_or_else(|| "-".into());
        let project = match t.project_id() {
            Some(_) => truncate(store.project_name(t.project_id()), 16),
            None => "-".into(),
        };
        let _ = writeln!(out, "{:<5} {:<4} {:<10} {:<16} {}", t.id, check(t), context, project, t.title);
    }
    out
}

/// Every task, optionally only those with the given status.
pub fn tasks_table(store: &TaskStore, status: Option<StatusKind>) -> String {
    let tasks: Vec<&Task> = store
        .tasks()
        .iter()
        .filter(|t| status.map_or(true, |kind| t.kind() == kind))
        .collect();
    let mut out = String::new();
    match status {
        Some(kind) => {
            let _ = writeln!(out, "Tasks ({} with status {})", tasks.len(), format_status(kind));
        }
        None => {
            let _ = writeln!(out, "Tasks ({} total)", tasks.len());
        }
    }
    if tasks.is_empty() {
        out.push_str("  No tasks
");
        return out;
    }
    let _ = writeln!(
        out,
        "{:<5} {:<4} {:<12} {:<10} {:<16} {}",
        "ID", "Done", "Status", "Context", "Project", "Title"
    );
    for t in tasks {
        let context = t.context().map(|c| c.to_string()).unwrap_or_else(|| "-".into());
        let project = match t.project_id() {
            Some(_) => truncate(store.project_name(t.project_id()), 16),
            None => "-".into(),
        };
        let _ = writeln!(
            out,
            "{:<5} {:<4} {:<12} {:<10} {:<16} {}",
            t.id,
            check(t),
            format_status(t.kind()),
            context,
            project,
            t.title
        );
    }
    out
}

/// Every project with its progress.
pub fn projects_table(store: &TaskStore) -> String {
    let projects = store.list_projects_with_progress();
    let mut out = String::new();
    let _ = writeln!(out, "Projects ({} active projects)", projects.len());
    if projects.is_empty() {
        out.push_str("  No projects yet\n");
        return out;
    }
    for p in projects {
        let _ = writeln!(out, "{:<5} {} {:>3}%  {}", p.project.id, progress_bar(p.progress, 10), p.progress, p.project.name);
        if !p.project.description.is_empty() {
            let _ = writeln!(out, "      {}", p.project.description);
        }
        let _ = writeln!(
            out,
            "      {} tasks • {} completed • created {}",
            p.task_count,
            p.completed_count,
            format_date(p.project.created_at)
        );
    }
    out
}

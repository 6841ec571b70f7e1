//! Command implementations for the CLI interface.
//!
//! Every command works on a store built fresh for this process; nothing is
//! written to disk.

use anyhow::Context as _;
use clap::{Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use tracing::info;

use crate::fields::{ContextFilter, ProjectFilter, StatusKind};
use crate::store::TaskStore;
use crate::tui::run::run_tui;
use crate::view::{inbox_table, next_actions_table, projects_table, tasks_table};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Launch the interactive UI (the default).
    Ui,

    /// Print the starting views of the store.
    Show {
        /// Which view to print.
        #[arg(value_enum, default_value_t = ShowView::All)]
        view: ShowView,
        /// Only next actions in this context ("all" for any).
        #[arg(long, value_name = "CONTEXT", default_value = "all")]
        by_context: ContextFilter,
        /// Only next actions tied to this project id ("all" for any).
        #[arg(long, value_name = "PROJECT_ID", default_value = "all")]
        by_project: ProjectFilter,
        /// Only tasks with this status (for the `tasks` view).
        #[arg(long, value_enum)]
        status: Option<StatusKind>,
        /// Print the full snapshot as JSON instead of tables.
        #[arg(long)]
        json: bool,
    },

    /// List the available contexts.
    Contexts,

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for.
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Views printable by `show`.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ShowView {
    Inbox,
    Next,
    Projects,
    /// Every task with its status, context and project.
    Tasks,
    All,
}

/// Launch the terminal user interface.
pub fn cmd_ui(store: TaskStore) -> anyhow::Result<()> {
    info!(tasks = store.tasks().len(), projects = store.projects().len(), "starting ui");
    run_tui(store).context("terminal UI failed")
}

/// Render the requested view(s) to a string.
pub fn render_show(
    store: &TaskStore,
    view: ShowView,
    by_context: &ContextFilter,
    by_project: &ProjectFilter,
    status: Option<StatusKind>,
    json: bool,
) -> anyhow::Result<String> {
    if json {
        let mut out = serde_json::to_string_pretty(&store.snapshot()).context("encoding snapshot")?;
        out.push('\n');
        return Ok(out);
    }
    let out = match view {
        ShowView::Inbox => inbox_table(store),
        ShowView::Next => next_actions_table(store, by_context, by_project),
        ShowView::Projects => projects_table(store),
        ShowView::Tasks => tasks_table(store, status),
        ShowView::All => [
            inbox_table(store),
            next_actions_table(store, by_context, by_project),
            projects_table(store),
        ]
        .join("\n"),
    };
    Ok(out)
}

/// Print the requested view(s).
pub fn cmd_show(
    store: &TaskStore,
    view: ShowView,
    by_context: ContextFilter,
    by_project: ProjectFilter,
    status: Option<StatusKind>,
    json: bool,
) -> anyhow::Result<()> {
    print!("{}", render_show(store, view, &by_context, &by_project, status, json)?);
    Ok(())
}

/// List the available contexts.
pub fn cmd_contexts(store: &TaskStore) {
    for context in store.contexts() {
        let count = store
            .list_next_actions(&ContextFilter::Only(context.clone()), &ProjectFilter::All)
            .len();
        println!("{:<12} {}", context, count);
    }
}

/// Generate shell completion scripts.
pub fn cmd_completions(shell: Shell) {
    use clap::CommandFactory;
    use crate::cli::Cli;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut std::io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{Context, Filter};

    #[test]
    fn test_render_show_json() {
        let store = TaskStore::with_sample_data();
        let out = render_show(&store, ShowView::All, &Filter::All, &Filter::All, None, true).unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["tasks"][0]["title"], "Review quarterly reports");
        assert_eq!(json["contexts"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn test_render_show_filters_next_actions() {
        let store = TaskStore::with_sample_data();
        let home = Filter::Only(Context::parse("@home").unwrap());
        let out = render_show(&store, ShowView::Next, &home, &Filter::All, None, false).unwrap();
        assert!(out.contains("No next actions"));
        assert!(!out.contains("Inbox"));
    }

    #[test]
    fn test_render_show_all() {
        let store = TaskStore::with_sample_data();
        let out = render_show(&store, ShowView::All, &Filter::All, &Filter::All, None, false).unwrap();
        assert!(out.contains("Inbox (1 items to process)"));
        assert!(out.contains("Next Actions (1 tasks ready to do)"));
        assert!(out.contains("Projects (1 active projects)"));
    }

    #[test]
    fn test_render_show_tasks_by_status() {
        let store = TaskStore::with_sample_data();
        let inbox = Some(StatusKind::Inbox);
        let out = render_show(&store, ShowView::Tasks, &Filter::All, &Filter::All, inbox, false).unwrap();
        assert!(out.contains("Tasks (1 with status Inbox)"));
        assert!(out.contains("Review quarterly reports"));
        assert!(!out.contains("Call dentist"));
    }
}

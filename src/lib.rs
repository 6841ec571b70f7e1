//! # gtd - capture, process, organise
//!
//! An inbox-driven task manager. Everything that enters the system lands in
//! the inbox first; processing an item either turns it into a next action in
//! some context (`@phone`, `@home`, ...) or parks it under a project. Next
//! actions are checked off, and projects report progress derived from the
//! tasks that reference them.
//!
//! ## Layout
//!
//! - [`store::TaskStore`] owns tasks, projects and contexts and enforces the
//!   workflow. Front ends only ever talk to the store.
//! - [`task`], [`project`] and [`fields`] hold the domain types.
//! - [`tui`] is a three-tab terminal UI (Inbox, Next Actions, Projects).
//! - [`cli`] and [`cmd`] provide the `gtd` command.
//!
//! ```
//! use gtd::fields::{Context, Filter};
//! use gtd::project::ProjectTarget;
//! use gtd::store::TaskStore;
//!
//! let mut store = TaskStore::new();
//! let milk = store.add_task("Buy milk").unwrap().id;
//! let call = store.add_task("Call the bank").unwrap().id;
//!
//! store.assign_to_project(milk, ProjectTarget::new_project("Groceries", "")).unwrap();
//! store.promote_to_next_action(call, Context::parse("@phone").unwrap()).unwrap();
//!
//! assert!(store.list_inbox().is_empty());
//! assert_eq!(store.list_next_actions(&Filter::All, &Filter::All).len(), 1);
//! ```
//!
//! State lives for the lifetime of the process only.

pub mod cli;
pub mod clock;
pub mod cmd;
pub mod config;
pub mod error;
pub mod fields;
pub mod project;
pub mod store;
pub mod task;
pub mod view;
pub mod tui {
    pub mod app;
    pub mod colors;
    pub mod enums;
    pub mod input;
    pub mod run;
    pub mod utils;
}

pub use error::StoreError;
pub use store::TaskStore;

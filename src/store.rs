//! The in-memory task store.
//!
//! This module provides `TaskStore`, the single owner of tasks, projects and
//! contexts. Every read and write made by a front end goes through it, and it
//! enforces the capture → process → organise workflow: tasks are only ever
//! created in the inbox, and the processing operations only take tasks out
//! of the inbox.

use serde::Serialize;
use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::error::{Result, StoreError};
use crate::fields::{Context, ContextFilter, ProjectFilter, Status, DEFAULT_CONTEXTS};
use crate::project::{progress_percent, Assignment, Project, ProjectId, ProjectProgress, ProjectTarget};
use crate::task::{Task, TaskId, TaskPatch};

/// Name shown for tasks without a (resolvable) project.
pub const NO_PROJECT: &str = "No Project";

/// Monotonic id source, starting at 1.
#[derive(Debug, Clone)]
pub struct IdSequence {
    next: u64,
}

impl IdSequence {
    pub fn new() -> Self {
        IdSequence { next: 1 }
    }

    pub fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }
}

impl Default for IdSequence {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only view over every collection, for rendering or JSON export.
#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    pub tasks: &'a [Task],
    pub projects: &'a [Project],
    pub contexts: &'a [Context],
}

/// In-memory store for tasks, projects and contexts.
#[derive(Debug)]
pub struct TaskStore {
    tasks: Vec<Task>,
    projects: Vec<Project>,
    contexts: Vec<Context>,
    task_ids: IdSequence,
    project_ids: IdSequence,
    clock: Box<dyn Clock>,
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskStore {
    /// An empty store with the default contexts and the system clock.
    pub fn new() -> Self {
        let contexts = DEFAULT_CONTEXTS.iter().filter_map(|c| Context::parse(c)).collect();
        Self::with_contexts(contexts)
    }

    /// An empty store with the given context set. Duplicates are dropped.
    pub fn with_contexts(contexts: Vec<Context>) -> Self {
        let mut unique: Vec<Context> = Vec::with_capacity(contexts.len());
        for context in contexts {
            if !unique.contains(&context) {
                unique.push(context);
            }
        }
        TaskStore {
            tasks: Vec::new(),
            projects: Vec::new(),
            contexts: unique,
            task_ids: IdSequence::new(),
            project_ids: IdSequence::new(),
            clock: Box::new(SystemClock),
        }
    }

    /// Replace the time source.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// A store pre-populated with a small demonstration fixture.
    pub fn with_sample_data() -> Self {
        let mut store = Self::new();
        store.seed_sample_data();
        store
    }

    /// Add the demonstration tasks and project. On an empty store they get
    /// task ids 1 and 2 and project id 1.
    pub fn seed_sample_data(&mut self) {
        let _ = self.add_task("Review quarterly reports");
        if let Ok(task) = self.add_task("Call dentist for appointment") {
            let id = task.id;
            let context = Context::parse("@phone")
                .filter(|phone| self.has_context(phone))
                .or_else(|| self.contexts.first().cloned());
            let status = Status::NextAction { context, project_id: None };
            let _ = self.update_task(id, TaskPatch::new().status(status));
        }
        let _ = self.add_project("Website Redesign", "Redesign company website with new branding");
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn contexts(&self) -> &[Context] {
        &self.contexts
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot { tasks: &self.tasks, projects: &self.projects, contexts: &self.contexts }
    }

    /// Get a task by ID.
    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Get a project by ID.
    pub fn project(&self, id: ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// Resolve a project reference to its name.
    pub fn project_name(&self, id: Option<ProjectId>) -> &str {
        id.and_then(|id| self.project(id))
            .map(|p| p.name.as_str())
            .unwrap_or(NO_PROJECT)
    }

    pub fn has_context(&self, context: &Context) -> bool {
        self.contexts.contains(context)
    }

    fn position(&self, id: TaskId) -> Result<usize> {
        self.tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(StoreError::TaskNotFound(id))
    }

    fn inbox_position(&self, id: TaskId) -> Result<usize> {
        let idx = self.position(id)?;
        if !self.tasks[idx].is_inbox() {
            debug!(task = %id, "task is not in the inbox");
            return Err(StoreError::NotInInbox(id));
        }
        Ok(idx)
    }

    /// Capture a new task into the inbox. Blank titles are rejected.
    pub fn add_task(&mut self, title: &str) -> Result<&Task> {
        let title = title.trim();
        if title.is_empty() {
            debug!("rejected task with blank title");
            return Err(StoreError::EmptyTitle);
        }
        let task = Task {
            id: TaskId(self.task_ids.next_id()),
            title: title.to_string(),
            status: Status::Inbox,
            completed: false,
            created_at: self.clock.now(),
        };
        debug!(task = %task.id, title = %task.title, "captured task");
        self.tasks.push(task);
        let last = self.tasks.len() - 1;
        Ok(&self.tasks[last])
    }

    /// Merge `patch` onto a task. No field-level validation is done.
    pub fn update_task(&mut self, id: TaskId, patch: TaskPatch) -> Result<&Task> {
        let idx = self.position(id).inspect_err(|_| debug!(task = %id, "update of unknown task"))?;
        debug!(task = %id, ?patch, "updating task");
        self.tasks[idx].merge(patch);
        Ok(&self.tasks[idx])
    }

    /// Remove a task. Projects are not affected.
    pub fn delete_task(&mut self, id: TaskId) -> Result<Task> {
        let idx = self.position(id).inspect_err(|_| debug!(task = %id, "delete of unknown task"))?;
        debug!(task = %id, "deleted task");
        Ok(self.tasks.remove(idx))
    }

    /// Flip the completed flag, returning the new value.
    pub fn toggle_completed(&mut self, id: TaskId) -> Result<bool> {
        let idx = self.position(id)?;
        let task = &mut self.tasks[idx];
        task.completed = !task.completed;
        debug!(task = %id, completed = task.completed, "toggled completion");
        Ok(task.completed)
    }

    /// Create a project. Blank names are rejected.
    pub fn add_project(&mut self, name: &str, description: &str) -> Result<ProjectId> {
        let name = name.trim();
        if name.is_empty() {
            debug!("rejected project with blank name");
            return Err(StoreError::EmptyProjectName);
        }
        let project = Project {
            id: ProjectId(self.project_ids.next_id()),
            name: name.to_string(),
            description: description.trim().to_string(),
            created_at: self.clock.now(),
        };
        let id = project.id;
        debug!(project = %id, name = %project.name, "created project");
        self.projects.push(project);
        Ok(id)
    }

    /// Remove a project and clear every reference to it. Tasks parked under
    /// the project go back to the inbox; next actions lose their project.
    pub fn delete_project(&mut self, id: ProjectId) -> Result<Project> {
        let idx = self
            .projects
            .iter()
            .position(|p| p.id == id)
            .ok_or(StoreError::ProjectNotFound(id))?;
        let project = self.projects.remove(idx);

        let mut released = 0;
        for task in self.tasks.iter_mut() {
            match task.status {
                Status::Project { project_id } if project_id == id => {
                    task.status = Status::Inbox;
                    released += 1;
                }
                Status::NextAction { ref mut project_id, .. } if *project_id == Some(id) => {
                    *project_id = None;
                    released += 1;
                }
                _ => {}
            }
        }
        debug!(project = %id, released, "deleted project");
        Ok(project)
    }

    /// Process an inbox task into a project, creating the project first when
    /// asked to. Everything is validated before anything is changed.
    pub fn assign_to_project(&mut self, task_id: TaskId, target: ProjectTarget) -> Result<Assignment> {
        let idx = self.inbox_position(task_id)?;
        let (project_id, created_project) = match target {
            ProjectTarget::Existing(project_id) => {
                if self.project(project_id).is_none() {
                    debug!(project = %project_id, "assignment to unknown project");
                    return Err(StoreError::ProjectNotFound(project_id));
                }
                (project_id, false)
            }
            ProjectTarget::New { name, description } => (self.add_project(&name, &description)?, true),
        };
        self.tasks[idx].status = Status::project(project_id);
        debug!(task = %task_id, project = %project_id, created_project, "moved task to project");
        Ok(Assignment { project_id, created_project })
    }

    /// Process an inbox task into a next action in one of the store's contexts.
    pub fn promote_to_next_action(&mut self, task_id: TaskId, context: Context) -> Result<()> {
        let idx = self.inbox_position(task_id)?;
        if !self.has_context(&context) {
            debug!(%context, "promotion into unknown context");
            return Err(StoreError::UnknownContext(context));
        }
        debug!(task = %task_id, %context, "promoted task to next action");
        self.tasks[idx].status = Status::next_action(context);
        Ok(())
    }

    /// Add a context label. The label is trimmed and `@`-prefixed.
    pub fn add_context(&mut self, label: &str) -> Result<Context> {
        let context = Context::parse(label).ok_or(StoreError::EmptyContext)?;
        if self.has_context(&context) {
            return Err(StoreError::DuplicateContext(context));
        }
        debug!(%context, "added context");
        self.contexts.push(context.clone());
        Ok(context)
    }

    /// Remove a context label. Tasks keep the label they carry.
    pub fn remove_context(&mut self, context: &Context) -> Result<()> {
        let idx = self
            .contexts
            .iter()
            .position(|c| c == context)
            .ok_or_else(|| StoreError::UnknownContext(context.clone()))?;
        self.contexts.remove(idx);
        debug!(%context, "removed context");
        Ok(())
    }

    /// Unprocessed tasks, in capture order.
    pub fn list_inbox(&self) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.is_inbox()).collect()
    }

    pub fn inbox_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.is_inbox()).count()
    }

    /// Next actions matching both filters, in capture order.
    pub fn list_next_actions(&self, context: &ContextFilter, project: &ProjectFilter) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| t.is_next_action())
            .filter(|t| context.matches(t.context()))
            .filter(|t| project.matches(t.project_id().as_ref()))
            .collect()
    }

    pub fn next_action_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.is_next_action()).count()
    }

    /// Tasks counted towards a project: parked under it, or next actions tied
    /// to it. Creation order.
    pub fn list_project_tasks(&self, id: ProjectId) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.project_id() == Some(id)).collect()
    }

    /// Progress for a single project.
    pub fn project_progress(&self, id: ProjectId) -> Option<ProjectProgress<'_>> {
        self.project(id).map(|project| self.progress_of(project))
    }

    /// Every project with its derived progress, in creation order.
    pub fn list_projects_with_progress(&self) -> Vec<ProjectProgress<'_>> {
        self.projects.iter().map(|p| self.progress_of(p)).collect()
    }

    fn progress_of<'a>(&'a self, project: &'a Project) -> ProjectProgress<'a> {
        let (task_count, completed_count) = self
            .list_project_tasks(project.id)
            .into_iter()
            .fold((0, 0), |(total, done), t| (total + 1, done + usize::from(t.completed)));
        ProjectProgress {
            project,
            progress: progress_percent(completed_count, task_count),
            task_count,
            completed_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{Filter, StatusKind};
    use crate::clock::FixedClock;
    use chrono::{TimeZone, Utc};

    fn ctx(label: &str) -> Context {
        Context::parse(label).unwrap()
    }

    fn store() -> TaskStore {
        TaskStore::new().with_clock(FixedClock(Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap()))
    }

    fn ids(tasks: &[&Task]) -> Vec<TaskId> {
        tasks.iter().map(|t| t.id).collect()
    }

    #[test]
    fn test_add_task_enters_inbox() {
        let mut store = store();
        let before = store.list_inbox().len();
        let task = store.add_task("  Buy milk ").unwrap().clone();
        assert_eq!(task.title, "Buy milk");
        assert_eq!(task.status, Status::Inbox);
        assert!(!task.completed);
        assert_eq!(task.created_at, Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap());
        assert_eq!(store.list_inbox().len(), before + 1);
    }

    #[test]
    fn test_blank_title_is_a_no_op() {
        let mut store = store();
        store.add_task("keep").unwrap();
        for blank in ["", "   ", "\t\n"] {
            assert_eq!(store.add_task(blank).unwrap_err(), StoreError::EmptyTitle);
        }
        assert_eq!(store.tasks().len(), 1);
    }

    #[test]
    fn test_ids_are_unique() {
        let mut store = store();
        let a = store.add_task("a").unwrap().id;
        let b = store.add_task("b").unwrap().id;
        store.delete_task(b).unwrap();
        let c = store.add_task("c").unwrap().id;
        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_ne!(a, c);
    }

    #[test]
    fn test_list_inbox_is_stable() {
        let mut store = store();
        for title in ["one", "two", "three"] {
            store.add_task(title).unwrap();
        }
        let first = ids(&store.list_inbox());
        let second = ids(&store.list_inbox());
        assert_eq!(first, second);
        assert_eq!(first, vec![TaskId(1), TaskId(2), TaskId(3)]);
    }

    #[test]
    fn test_update_to_next_action_leaves_inbox() {
        let mut store = store();
        let id = store.add_task("Call mum").unwrap().id;
        store
            .update_task(id, TaskPatch::new().status(Status::next_action(ctx("@phone"))))
            .unwrap();
        let phone = store.list_next_actions(&Filter::Only(ctx("@phone")), &Filter::All);
        assert_eq!(ids(&phone), vec![id]);
        assert!(store.list_inbox().is_empty());
    }

    #[test]
    fn test_update_unknown_task_is_a_no_op() {
        let mut store = store();
        store.add_task("only").unwrap();
        let before = store.tasks().to_vec();
        let err = store.update_task(TaskId(99), TaskPatch::new().completed(true)).unwrap_err();
        assert_eq!(err, StoreError::TaskNotFound(TaskId(99)));
        assert_eq!(store.tasks(), &before[..]);
    }

    #[test]
    fn test_update_preserves_order() {
        let mut store = store();
        for title in ["a", "b", "c"] {
            store.add_task(title).unwrap();
        }
        store.update_task(TaskId(2), TaskPatch::new().title("B")).unwrap();
        let titles: Vec<_> = store.tasks().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["a", "B", "c"]);
    }

    #[test]
    fn test_update_does_not_validate_fields() {
        let mut store = store();
        let id = store.add_task("loose").unwrap().id;
        let status = Status::NextAction { context: None, project_id: Some(ProjectId(42)) };
        let task = store.update_task(id, TaskPatch::new().status(status)).unwrap();
        assert_eq!(task.project_id(), Some(ProjectId(42)));
        assert_eq!(store.project_name(Some(ProjectId(42))), NO_PROJECT);
    }

    #[test]
    fn test_delete_task_removes_from_every_view() {
        let mut store = store();
        let project = store.add_project("Home", "").unwrap();
        let keep = store.add_task("keep").unwrap().id;
        let gone = store.add_task("gone").unwrap().id;
        let parked = store.add_task("parked").unwrap().id;
        store.assign_to_project(parked, ProjectTarget::Existing(project)).unwrap();
        store
            .update_task(gone, TaskPatch::new().status(Status::NextAction {
                context: Some(ctx("@home")),
                project_id: Some(project),
            }))
            .unwrap();
        assert_eq!(store.project_progress(project).unwrap().task_count, 2);

        store.delete_task(gone).unwrap();
        assert!(store.task(gone).is_none());
        assert!(store.list_next_actions(&Filter::All, &Filter::All).is_empty());
        assert_eq!(ids(&store.list_inbox()), vec![keep]);
        let progress = store.project_progress(project).unwrap();
        assert_eq!(progress.task_count, 1);
        assert_eq!(store.projects().len(), 1);
        assert!(store.task(parked).is_some());
    }

    #[test]
    fn test_delete_unknown_task() {
        let mut store = store();
        assert_eq!(store.delete_task(TaskId(3)).unwrap_err(), StoreError::TaskNotFound(TaskId(3)));
    }

    #[test]
    fn test_add_project_trims_and_rejects_blank() {
        let mut store = store();
        assert_eq!(store.add_project("  ", "desc").unwrap_err(), StoreError::EmptyProjectName);
        assert!(store.projects().is_empty());
        let id = store.add_project(" Garden ", " plant beds ").unwrap();
        let project = store.project(id).unwrap();
        assert_eq!(project.name, "Garden");
        assert_eq!(project.description, "plant beds");
    }

    #[test]
    fn test_zero_task_project_has_zero_progress() {
        let mut store = store();
        store.add_project("Empty", "").unwrap();
        let all = store.list_projects_with_progress();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].progress, 0);
        assert_eq!(all[0].task_count, 0);
        assert_eq!(all[0].completed_count, 0);
    }

    #[test]
    fn test_one_of_three_completed_is_33() {
        let mut store = store();
        let project = store.add_project("Trip", "").unwrap();
        for title in ["book", "pack", "go"] {
            let id = store.add_task(title).unwrap().id;
            store.assign_to_project(id, ProjectTarget::Existing(project)).unwrap();
        }
        store.toggle_completed(TaskId(1)).unwrap();
        let progress = store.project_progress(project).unwrap();
        assert_eq!(progress.task_count, 3);
        assert_eq!(progress.completed_count, 1);
        assert_eq!(progress.progress, 33);
    }

    #[test]
    fn test_list_project_tasks() {
        let mut store = store();
        let project = store.add_project("Trip", "").unwrap();
        let parked = store.add_task("pack").unwrap().id;
        let next = store.add_task("book train").unwrap().id;
        store.add_task("unrelated").unwrap();
        store.assign_to_project(parked, ProjectTarget::Existing(project)).unwrap();
        let status = Status::NextAction { context: Some(ctx("@phone")), project_id: Some(project) };
        store.update_task(next, TaskPatch::new().status(status)).unwrap();

        assert_eq!(ids(&store.list_project_tasks(project)), vec![parked, next]);
        assert!(store.list_project_tasks(ProjectId(9)).is_empty());

        store.toggle_completed(parked).unwrap();
        store.toggle_completed(next).unwrap();
        assert_eq!(store.project_progress(project).unwrap().progress, 100);
    }

    #[test]
    fn test_filters_are_conjunctive() {
        let mut store = store();
        let p1 = store.add_project("P1", "").unwrap();
        let p2 = store.add_project("P2", "").unwrap();
        let cases = [("a", "@home", p1), ("b", "@phone", p1), ("c", "@home", p2), ("d", "@phone", p2)];
        for (title, context, project) in cases {
            let id = store.add_task(title).unwrap().id;
            let status = Status::NextAction { context: Some(ctx(context)), project_id: Some(project) };
            store.update_task(id, TaskPatch::new().status(status)).unwrap();
        }

        let both = store.list_next_actions(&Filter::Only(ctx("@home")), &Filter::Only(p1));
        assert_eq!(both.len(), 1);
        assert_eq!(both[0].title, "a");

        let home = store.list_next_actions(&Filter::Only(ctx("@home")), &Filter::All);
        assert_eq!(home.iter().map(|t| t.title.as_str()).collect::<Vec<_>>(), ["a", "c"]);

        let in_p2 = store.list_next_actions(&Filter::All, &Filter::Only(p2));
        assert_eq!(in_p2.iter().map(|t| t.title.as_str()).collect::<Vec<_>>(), ["c", "d"]);

        assert_eq!(store.list_next_actions(&Filter::All, &Filter::All).len(), 4);
    }

    #[test]
    fn test_assign_to_new_project_creates_it() {
        let mut store = store();
        let id = store.add_task("Plan menu").unwrap().id;
        let assignment = store
            .assign_to_project(id, ProjectTarget::new_project(" Dinner party ", ""))
            .unwrap();
        assert!(assignment.created_project);
        assert_eq!(store.project(assignment.project_id).unwrap().name, "Dinner party");
        assert_eq!(store.task(id).unwrap().status, Status::project(assignment.project_id));
    }

    #[test]
    fn test_failed_assignment_leaves_no_orphan_project() {
        let mut store = store();
        let err = store
            .assign_to_project(TaskId(5), ProjectTarget::new_project("Orphan", ""))
            .unwrap_err();
        assert_eq!(err, StoreError::TaskNotFound(TaskId(5)));
        assert!(store.projects().is_empty());

        let id = store.add_task("x").unwrap().id;
        store.promote_to_next_action(id, ctx("@home")).unwrap();
        let err = store
            .assign_to_project(id, ProjectTarget::new_project("Orphan", ""))
            .unwrap_err();
        assert_eq!(err, StoreError::NotInInbox(id));
        assert!(store.projects().is_empty());
    }

    #[test]
    fn test_assign_to_missing_project() {
        let mut store = store();
        let id = store.add_task("x").unwrap().id;
        let err = store.assign_to_project(id, ProjectTarget::Existing(ProjectId(9))).unwrap_err();
        assert_eq!(err, StoreError::ProjectNotFound(ProjectId(9)));
        assert!(store.task(id).unwrap().is_inbox());

        let err = store.assign_to_project(id, ProjectTarget::new_project("  ", "")).unwrap_err();
        assert_eq!(err, StoreError::EmptyProjectName);
        assert!(store.task(id).unwrap().is_inbox());
    }

    #[test]
    fn test_promote_requires_known_context() {
        let mut store = store();
        let id = store.add_task("x").unwrap().id;
        let err = store.promote_to_next_action(id, ctx("@moon")).unwrap_err();
        assert_eq!(err, StoreError::UnknownContext(ctx("@moon")));
        assert!(store.task(id).unwrap().is_inbox());

        store.promote_to_next_action(id, ctx("@errands")).unwrap();
        let task = store.task(id).unwrap();
        assert_eq!(task.kind(), StatusKind::NextAction);
        assert_eq!(task.context(), Some(&ctx("@errands")));
        assert_eq!(task.project_id(), None);
    }

    #[test]
    fn test_toggle_completed() {
        let mut store = store();
        let id = store.add_task("x").unwrap().id;
        assert!(store.toggle_completed(id).unwrap());
        assert!(!store.toggle_completed(id).unwrap());
        assert_eq!(store.toggle_completed(TaskId(7)).unwrap_err(), StoreError::TaskNotFound(TaskId(7)));
    }

    #[test]
    fn test_delete_project_releases_tasks() {
        let mut store = store();
        let project = store.add_project("Move house", "").unwrap();
        let other = store.add_project("Other", "").unwrap();
        let parked = store.add_task("pack").unwrap().id;
        let next = store.add_task("call movers").unwrap().id;
        let elsewhere = store.add_task("unrelated").unwrap().id;
        store.assign_to_project(parked, ProjectTarget::Existing(project)).unwrap();
        store.assign_to_project(elsewhere, ProjectTarget::Existing(other)).unwrap();
        let status = Status::NextAction { context: Some(ctx("@phone")), project_id: Some(project) };
        store.update_task(next, TaskPatch::new().status(status)).unwrap();

        let removed = store.delete_project(project).unwrap();
        assert_eq!(removed.name, "Move house");
        assert!(store.project(project).is_none());
        assert_eq!(ids(&store.list_inbox()), vec![parked]);
        let next_task = store.task(next).unwrap();
        assert_eq!(next_task.project_id(), None);
        assert_eq!(next_task.context(), Some(&ctx("@phone")));
        assert_eq!(store.task(elsewhere).unwrap().project_id(), Some(other));
        assert_eq!(store.delete_project(project).unwrap_err(), StoreError::ProjectNotFound(project));
    }

    #[test]
    fn test_context_management() {
        let mut store = store();
        assert_eq!(store.contexts().len(), DEFAULT_CONTEXTS.len());
        let garage = store.add_context(" garage ").unwrap();
        assert_eq!(garage.as_str(), "@garage");
        assert_eq!(store.add_context("@garage").unwrap_err(), StoreError::DuplicateContext(garage.clone()));
        assert_eq!(store.add_context(" ").unwrap_err(), StoreError::EmptyContext);

        let id = store.add_task("sweep").unwrap().id;
        store.promote_to_next_action(id, garage.clone()).unwrap();
        store.remove_context(&garage).unwrap();
        assert!(!store.has_context(&garage));
        assert_eq!(store.task(id).unwrap().context(), Some(&garage));
        assert_eq!(store.remove_context(&garage).unwrap_err(), StoreError::UnknownContext(garage));
    }

    #[test]
    fn test_with_contexts_drops_duplicates() {
        let store = TaskStore::with_contexts(vec![ctx("@a"), ctx("@b"), ctx("@a")]);
        assert_eq!(store.contexts(), &[ctx("@a"), ctx("@b")]);
    }

    #[test]
    fn test_sample_data() {
        let store = TaskStore::with_sample_data();
        assert_eq!(store.tasks().len(), 2);
        assert_eq!(store.tasks()[0].id, TaskId(1));
        assert!(store.tasks()[0].is_inbox());
        assert_eq!(store.tasks()[1].id, TaskId(2));
        assert_eq!(store.tasks()[1].context(), Some(&ctx("@phone")));
        assert_eq!(store.projects().len(), 1);
        assert_eq!(store.projects()[0].id, ProjectId(1));
        assert_eq!(store.project_name(Some(ProjectId(1))), "Website Redesign");
    }

    #[test]
    fn test_sample_data_stays_within_contexts() {
        let mut store = TaskStore::with_contexts(vec![ctx("@car"), ctx("@phone")]);
        store.seed_sample_data();
        assert_eq!(store.tasks()[1].context(), Some(&ctx("@phone")));

        let mut store = TaskStore::with_contexts(vec![ctx("@desk"), ctx("@car")]);
        store.seed_sample_data();
        assert_eq!(store.tasks()[1].context(), Some(&ctx("@desk")));
        let phone = Filter::Only(ctx("@phone"));
        assert!(store.list_next_actions(&phone, &Filter::All).is_empty());

        let mut store = TaskStore::with_contexts(Vec::new());
        store.seed_sample_data();
        assert!(store.tasks()[1].is_next_action());
        assert_eq!(store.tasks()[1].context(), None);
    }

    #[test]
    fn test_snapshot_json() {
        let store = TaskStore::with_sample_data();
        let json = serde_json::to_value(store.snapshot()).unwrap();
        assert_eq!(json["tasks"].as_array().unwrap().len(), 2);
        assert_eq!(json["tasks"][1]["status"], "next-action");
        assert_eq!(json["projects"][0]["name"], "Website Redesign");
        assert_eq!(json["contexts"][0], "@computer");
    }
}

//! Main application logic for the terminal user interface.
//!
//! This module contains the `App` struct which owns the `TaskStore` for the
//! session, handles user input, and renders the three screens (Inbox, Next
//! Actions, Projects) together with the process and new-project dialogs.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs, Wrap},
    Frame, Terminal,
};

use crate::fields::{format_status, ContextFilter, Filter, ProjectFilter};
use crate::project::{ProjectId, ProjectTarget};
use crate::store::TaskStore;
use crate::task::TaskId;
use crate::tui::{
    colors::{INBOX_BLUE, MUTED_GRAY},
    enums::{AppState, ProcessChoice, ProjectField, Screen},
    input::InputField,
    utils::centered_rect,
};
use crate::view::{format_date, progress_bar};

/// Main application state for the terminal user interface.
pub struct App {
    store: TaskStore,
    screen: Screen,
    state: AppState,
    inbox_state: ListState,
    next_state: ListState,
    projects_state: ListState,
    process_state: ListState,
    project_tasks_state: ListState,
    open_project: Option<ProjectId>,
    process_choices: Vec<ProcessChoice>,
    processing: Option<TaskId>,
    task_input: InputField,
    project_name: InputField,
    project_description: InputField,
    project_field: ProjectField,
    context_filter: ContextFilter,
    project_filter: ProjectFilter,
    status_message: String,
    should_quit: bool,
}

impl App {
    /// Create a new App around a store.
    pub fn new(store: TaskStore) -> Self {
        let mut app = App {
            store,
            screen: Screen::Inbox,
            state: AppState::Browse,
            inbox_state: ListState::default(),
            next_state: ListState::default(),
            projects_state: ListState::default(),
            process_state: ListState::default(),
            project_tasks_state: ListState::default(),
            open_project: None,
            process_choices: Vec::new(),
            processing: None,
            task_input: InputField::new(),
            project_name: InputField::new(),
            project_description: InputField::new(),
            project_field: ProjectField::Name,
            context_filter: Filter::All,
            project_filter: Filter::All,
            status_message: String::new(),
            should_quit: false,
        };
        app.clamp_selections();
        app
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn state(&self) -> AppState {
        self.state
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    fn inbox_ids(&self) -> Vec<TaskId> {
        self.store.list_inbox().iter().map(|t| t.id).collect()
    }

    fn next_ids(&self) -> Vec<TaskId> {
        self.store
            .list_next_actions(&self.context_filter, &self.project_filter)
            .iter()
            .map(|t| t.id)
            .collect()
    }

    fn project_ids(&self) -> Vec<ProjectId> {
        self.store.projects().iter().map(|p| p.id).collect()
    }

    fn selected_inbox_task(&self) -> Option<TaskId> {
        self.inbox_state.selected().and_then(|i| self.inbox_ids().get(i).copied())
    }

    fn selected_next_task(&self) -> Option<TaskId> {
        self.next_state.selected().and_then(|i| self.next_ids().get(i).copied())
    }

    fn selected_project(&self) -> Option<ProjectId> {
        self.projects_state.selected().and_then(|i| self.project_ids().get(i).copied())
    }

    fn project_task_ids(&self) -> Vec<TaskId> {
        match self.open_project {
            Some(id) => self.store.list_project_tasks(id).iter().map(|t| t.id).collect(),
            None => Vec::new(),
        }
    }

    fn selected_project_task(&self) -> Option<TaskId> {
        self.project_tasks_state.selected().and_then(|i| self.project_task_ids().get(i).copied())
    }

    /// Keep every list selection inside its list after the store changed.
    fn clamp_selections(&mut self) {
        fn clamp(state: &mut ListState, len: usize) {
            if len == 0 {
                state.select(None);
            } else {
                let i = state.selected().unwrap_or(0).min(len - 1);
                state.select(Some(i));
            }
        }
        let (inbox, next, projects) = (self.inbox_ids().len(), self.next_ids().len(), self.project_ids().len());
        clamp(&mut self.inbox_state, inbox);
        clamp(&mut self.next_state, next);
        clamp(&mut self.projects_state, projects);
        clamp(&mut self.process_state, self.process_choices.len());
        let project_tasks = self.project_task_ids().len();
        clamp(&mut self.project_tasks_state, project_tasks);
    }

    fn set_status_message(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }

    fn clear_status_message(&mut self) {
        self.status_message.clear();
    }

    fn current_list_state(&mut self) -> (&mut ListState, usize) {
        let len = match self.state {
            AppState::Process => self.process_choices.len(),
            AppState::ProjectTasks => self.project_task_ids().len(),
            _ => match self.screen {
                Screen::Inbox => self.inbox_ids().len(),
                Screen::NextActions => self.next_ids().len(),
                Screen::Projects => self.project_ids().len(),
            },
        };
        let state = match self.state {
            AppState::Process => &mut self.process_state,
            AppState::ProjectTasks => &mut self.project_tasks_state,
            _ => match self.screen {
                Screen::Inbox => &mut self.inbox_state,
                Screen::NextActions => &mut self.next_state,
                Screen::Projects => &mut self.projects_state,
            },
        };
        (state, len)
    }

    fn move_selection(&mut self, down: bool) {
        let (state, len) = self.current_list_state();
        if len == 0 {
            return;
        }
        let current = state.selected().unwrap_or(0);
        let next = if down { (current + 1).min(len - 1) } else { current.saturating_sub(1) };
        state.select(Some(next));
    }

    fn switch_screen(&mut self, screen: Screen) {
        self.screen = screen;
        self.clamp_selections();
    }

    // Inbox

    fn submit_new_task(&mut self) {
        match self.store.add_task(&self.task_input.value) {
            Ok(task) => {
                let msg = format!("Captured \"{}\"", task.title);
                self.task_input.clear();
                self.set_status_message(msg);
                let last = self.inbox_ids().len().saturating_sub(1);
                self.inbox_state.select(Some(last));
            }
            Err(e) if e.is_blank_input() => {}
            Err(e) => self.set_status_message(format!("Error: {e}")),
        }
    }

    fn open_process_dialog(&mut self) {
        let Some(task_id) = self.selected_inbox_task() else {
            self.set_status_message("Nothing to process");
            return;
        };
        let mut choices: Vec<ProcessChoice> = self.project_ids().into_iter().map(ProcessChoice::Project).collect();
        choices.push(ProcessChoice::NewProject);
        choices.extend(self.store.contexts().iter().cloned().map(ProcessChoice::Context));
        self.process_choices = choices;
        self.processing = Some(task_id);
        self.process_state.select(Some(0));
        self.state = AppState::Process;
    }

    fn close_process_dialog(&mut self) {
        self.processing = None;
        self.process_choices.clear();
        self.state = AppState::Browse;
        self.clamp_selections();
    }

    fn apply_process_choice(&mut self) {
        let Some(task_id) = self.processing else {
            self.close_process_dialog();
            return;
        };
        let Some(choice) = self.process_state.selected().and_then(|i| self.process_choices.get(i)).cloned() else {
            return;
        };
        let result = match choice {
            ProcessChoice::NewProject => {
                self.project_name.clear();
                self.project_description.clear();
                self.project_field = ProjectField::Name;
                self.state = AppState::NewProject;
                return;
            }
            ProcessChoice::Project(project_id) => self
                .store
                .assign_to_project(task_id, ProjectTarget::Existing(project_id))
                .map(|_| format!("Moved to {}", self.store.project_name(Some(project_id)))),
            ProcessChoice::Context(context) => {
                let msg = format!("Next action in {context}");
                self.store.promote_to_next_action(task_id, context).map(|_| msg)
            }
        };
        match result {
            Ok(msg) => self.set_status_message(msg),
            Err(e) => self.set_status_message(format!("Error: {e}")),
        }
        self.close_process_dialog();
    }

    fn submit_new_project(&mut self) {
        let Some(task_id) = self.processing else {
            self.close_process_dialog();
            return;
        };
        let target = ProjectTarget::new_project(
            self.project_name.value.clone(),
            self.project_description.value.clone(),
        );
        match self.store.assign_to_project(task_id, target) {
            Ok(assignment) => {
                let name = self.store.project_name(Some(assignment.project_id)).to_string();
                self.set_status_message(format!("Created project {name}"));
                self.project_name.clear();
                self.project_description.clear();
                self.close_process_dialog();
            }
            // Blank name: stay in the dialog, like an unanswered form.
            Err(e) if e.is_blank_input() => {}
            Err(e) => {
                self.set_status_message(format!("Error: {e}"));
                self.close_process_dialog();
            }
        }
    }

    fn delete_selected_task(&mut self) {
        let selected = match self.screen {
            Screen::Inbox => self.selected_inbox_task(),
            Screen::NextActions => self.selected_next_task(),
            Screen::Projects => None,
        };
        if let Some(id) = selected {
            match self.store.delete_task(id) {
                Ok(task) => self.set_status_message(format!("Deleted \"{}\"", task.title)),
                Err(e) => self.set_status_message(format!("Error: {e}")),
            }
            self.clamp_selections();
        }
    }

    fn toggle_task(&mut self, selected: Option<TaskId>) {
        if let Some(id) = selected {
            match self.store.toggle_completed(id) {
                Ok(true) => self.set_status_message("Task marked as completed"),
                Ok(false) => self.set_status_message("Task marked as open"),
                Err(e) => self.set_status_message(format!("Error: {e}")),
            }
        }
    }

    // Next actions

    fn cycle_context_filter(&mut self) {
        let contexts = self.store.contexts();
        self.context_filter = match &self.context_filter {
            Filter::All => contexts.first().cloned().map(Filter::Only).unwrap_or(Filter::All),
            Filter::Only(current) => contexts
                .iter()
                .position(|c| c == current)
                .and_then(|i| contexts.get(i + 1))
                .cloned()
                .map(Filter::Only)
                .unwrap_or(Filter::All),
        };
        self.set_status_message(format!("Context filter: {}", self.context_filter));
        self.clamp_selections();
    }

    fn cycle_project_filter(&mut self) {
        let projects = self.project_ids();
        self.project_filter = match self.project_filter {
            Filter::All => projects.first().copied().map(Filter::Only).unwrap_or(Filter::All),
            Filter::Only(current) => projects
                .iter()
                .position(|&p| p == current)
                .and_then(|i| projects.get(i + 1))
                .copied()
                .map(Filter::Only)
                .unwrap_or(Filter::All),
        };
        let label = match self.project_filter {
            Filter::All => "all".to_string(),
            Filter::Only(id) => self.store.project_name(Some(id)).to_string(),
        };
        self.set_status_message(format!("Project filter: {label}"));
        self.clamp_selections();
    }

    // Projects

    fn open_project_tasks(&mut self) {
        match self.selected_project() {
            Some(id) => {
                self.open_project = Some(id);
                self.project_tasks_state.select(Some(0));
                self.state = AppState::ProjectTasks;
                self.clamp_selections();
            }
            None => self.set_status_message("No project selected"),
        }
    }

    fn close_project_tasks(&mut self) {
        self.open_project = None;
        self.state = AppState::Browse;
        self.clamp_selections();
    }

    fn confirm_delete_project(&mut self) {
        match self.selected_project() {
            Some(id) => {
                let name = self.store.project_name(Some(id)).to_string();
                self.set_status_message(format!("Delete project \"{name}\"? (y/n)"));
                self.state = AppState::ConfirmDeleteProject;
            }
            None => self.set_status_message("No project selected"),
        }
    }

    fn delete_selected_project(&mut self) {
        if let Some(id) = self.selected_project() {
            match self.store.delete_project(id) {
                Ok(project) => {
                    if self.project_filter == Filter::Only(id) {
                        self.project_filter = Filter::All;
                    }
                    self.set_status_message(format!("Deleted project \"{}\"", project.name));
                }
                Err(e) => self.set_status_message(format!("Error: {e}")),
            }
        }
        self.state = AppState::Browse;
        self.clamp_selections();
    }

    /// Apply one key press. Returns true when the app should exit.
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return true;
        }
        match self.state {
            AppState::Browse => self.handle_browse_key(code, modifiers),
            AppState::AddTask => self.handle_add_task_key(code),
            AppState::Process => self.handle_process_key(code),
            AppState::NewProject => self.handle_new_project_key(code),
            AppState::ProjectTasks => self.handle_project_tasks_key(code),
            AppState::ConfirmDeleteProject => match code {
                KeyCode::Char('y') | KeyCode::Char('Y') => self.delete_selected_project(),
                _ => {
                    self.state = AppState::Browse;
                    self.clear_status_message();
                }
            },
            AppState::Help => self.state = AppState::Browse,
        }
        self.should_quit
    }

    fn handle_browse_key(&mut self, code: KeyCode, _modifiers: KeyModifiers) {
        self.clear_status_message();
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab | KeyCode::Right => self.switch_screen(self.screen.next()),
            KeyCode::BackTab | KeyCode::Left => self.switch_screen(self.screen.prev()),
            KeyCode::Char('1') => self.switch_screen(Screen::Inbox),
            KeyCode::Char('2') => self.switch_screen(Screen::NextActions),
            KeyCode::Char('3') => self.switch_screen(Screen::Projects),
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(false),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(true),
            KeyCode::Char('h') | KeyCode::Char('?') => self.state = AppState::Help,
            _ => match self.screen {
                Screen::Inbox => match code {
                    KeyCode::Char('a') | KeyCode::Char('i') => self.state = AppState::AddTask,
                    KeyCode::Enter | KeyCode::Char('p') => self.open_process_dialog(),
                    KeyCode::Char('d') | KeyCode::Delete => self.delete_selected_task(),
                    _ => {}
                },
                Screen::NextActions => match code {
                    KeyCode::Enter | KeyCode::Char(' ') => self.toggle_task(self.selected_next_task()),
                    KeyCode::Char('c') => self.cycle_context_filter(),
                    KeyCode::Char('p') => self.cycle_project_filter(),
                    KeyCode::Char('r') => {
                        self.context_filter = Filter::All;
                        self.project_filter = Filter::All;
                        self.set_status_message("Filters cleared");
                        self.clamp_selections();
                    }
                    KeyCode::Char('d') | KeyCode::Delete => self.delete_selected_task(),
                    _ => {}
                },
                Screen::Projects => match code {
                    KeyCode::Enter => self.open_project_tasks(),
                    KeyCode::Char('d') | KeyCode::Delete => self.confirm_delete_project(),
                    _ => {}
                },
            },
        }
    }

    fn handle_add_task_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => self.state = AppState::Browse,
            KeyCode::Enter => self.submit_new_task(),
            KeyCode::Char(c) => self.task_input.handle_char(c),
            KeyCode::Backspace => self.task_input.handle_backspace(),
            KeyCode::Delete => self.task_input.handle_delete(),
            KeyCode::Left => self.task_input.move_cursor_left(),
            KeyCode::Right => self.task_input.move_cursor_right(),
            KeyCode::Home => self.task_input.move_home(),
            KeyCode::End => self.task_input.move_end(),
            _ => {}
        }
    }

    fn handle_process_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => self.close_process_dialog(),
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(false),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(true),
            KeyCode::Enter => self.apply_process_choice(),
            _ => {}
        }
    }

    fn handle_project_tasks_key(&mut self, code: KeyCode) {
        self.clear_status_message();
        match code {
            KeyCode::Esc | KeyCode::Char('q') => self.close_project_tasks(),
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(false),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(true),
            KeyCode::Enter | KeyCode::Char(' ') => self.toggle_task(self.selected_project_task()),
            _ => {}
        }
    }

    fn handle_new_project_key(&mut self, code: KeyCode) {
        let field = match self.project_field {
            ProjectField::Name => &mut self.project_name,
            ProjectField::Description => &mut self.project_description,
        };
        match code {
            KeyCode::Esc => self.state = AppState::Process,
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.project_field = match self.project_field {
                    ProjectField::Name => ProjectField::Description,
                    ProjectField::Description => ProjectField::Name,
                };
            }
            KeyCode::Enter => self.submit_new_project(),
            KeyCode::Char(c) => field.handle_char(c),
            KeyCode::Backspace => field.handle_backspace(),
            KeyCode::Delete => field.handle_delete(),
            KeyCode::Left => field.move_cursor_left(),
            KeyCode::Right => field.move_cursor_right(),
            KeyCode::Home => field.move_home(),
            KeyCode::End => field.move_end(),
            _ => {}
        }
    }

    /// Poll for one key event and apply it.
    fn handle_input(&mut self) -> io::Result<bool> {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(self.handle_key(key.code, key.modifiers));
                }
            }
        }
        Ok(false)
    }

    /// Render the whole frame.
    pub fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Tabs
                Constraint::Min(0),    // Screen
                Constraint::Length(1), // Status bar
            ])
            .split(f.area());

        self.render_tabs(f, chunks[0]);
        match self.screen {
            Screen::Inbox => self.render_inbox(f, chunks[1]),
            Screen::NextActions => self.render_next_actions(f, chunks[1]),
            Screen::Projects => self.render_projects(f, chunks[1]),
        }
        self.render_status_bar(f, chunks[2]);

        match self.state {
            AppState::Process => self.render_process_dialog(f),
            AppState::NewProject => self.render_new_project_dialog(f),
            AppState::ProjectTasks => self.render_project_tasks(f),
            AppState::Help => self.render_help(f),
            _ => {}
        }
    }

    fn render_tabs(&self, f: &mut Frame, area: Rect) {
        let counts = [
            self.store.inbox_count(),
            self.store.next_action_count(),
            self.store.projects().len(),
        ];
        let titles: Vec<Line> = Screen::ALL
            .iter()
            .zip(counts)
            .map(|(screen, count)| Line::from(format!(" {} ({}) ", screen.title(), count)))
            .collect();
        let tabs = Tabs::new(titles)
            .block(Block::default().borders(Borders::ALL).title(" gtd "))
            .select(self.screen.index())
            .highlight_style(
                Style::default().fg(Color::Black).bg(self.screen.color()).add_modifier(Modifier::BOLD),
            );
        f.render_widget(tabs, area);
    }

    fn screen_block(&self, subtitle: String) -> Block<'static> {
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", self.screen.title()))
            .title_bottom(Line::from(format!(" {subtitle} ")).alignment(Alignment::Right))
            .border_style(Style::default().fg(self.screen.color()))
    }

    fn render_empty(f: &mut Frame, area: Rect, block: Block, title: &str, hint: &str) {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(title.to_string(), Style::default().add_modifier(Modifier::BOLD))),
            Line::from(Span::styled(hint.to_string(), Style::default().fg(MUTED_GRAY))),
        ];
        let para = Paragraph::new(text).block(block).alignment(Alignment::Center);
        f.render_widget(para, area);
    }

    fn render_inbox(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        let editing = self.state == AppState::AddTask;
        let input_style = if editing {
            Style::default().fg(INBOX_BLUE)
        } else {
            Style::default().fg(MUTED_GRAY)
        };
        let shown = if self.task_input.value.is_empty() && !editing {
            Span::styled("What's on your mind? (a to add)", Style::default().fg(MUTED_GRAY))
        } else {
            Span::raw(self.task_input.value.clone())
        };
        let input = Paragraph::new(Line::from(shown))
            .block(Block::default().borders(Borders::ALL).title(" Capture ").border_style(input_style));
        f.render_widget(input, chunks[0]);
        if editing {
            let x = (chunks[0].x + 1).saturating_add(self.task_input.display_cursor());
            f.set_cursor_position((x.min(chunks[0].right().saturating_sub(2)), chunks[0].y + 1));
        }

        let tasks = self.store.list_inbox();
        let block = self.screen_block(format!("{} items to process", tasks.len()));
        if tasks.is_empty() {
            Self::render_empty(f, chunks[1], block, "Inbox is empty", "Add new tasks, ideas, or to-dos above");
            return;
        }
        let items: Vec<ListItem> = tasks
            .iter()
            .map(|t| {
                ListItem::new(Line::from(vec![
                    Span::raw(t.title.clone()),
                    Span::styled(format!("  {}", format_date(t.created_at)), Style::default().fg(MUTED_GRAY)),
                ]))
            })
            .collect();
        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().fg(Color::Black).bg(INBOX_BLUE))
            .highlight_symbol("▶ ");
        f.render_stateful_widget(list, chunks[1], &mut self.inbox_state);
    }

    fn chip<'a>(label: String, active: bool, color: Color) -> Span<'a> {
        if active {
            Span::styled(format!(" {label} "), Style::default().fg(Color::Black).bg(color))
        } else {
            Span::styled(format!(" {label} "), Style::default().fg(MUTED_GRAY))
        }
    }

    fn render_next_actions(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0)])
            .split(area);
        let color = self.screen.color();

        let mut context_chips = vec![Span::raw("c: "), Self::chip("All Contexts".into(), self.context_filter.is_all(), color)];
        for context in self.store.contexts() {
            let active = self.context_filter == Filter::Only(context.clone());
            context_chips.push(Self::chip(context.to_string(), active, color));
        }
        let mut project_chips = vec![Span::raw("p: "), Self::chip("All Projects".into(), self.project_filter.is_all(), color)];
        for project in self.store.projects() {
            let active = self.project_filter == Filter::Only(project.id);
            project_chips.push(Self::chip(project.name.clone(), active, color));
        }
        let filters = Paragraph::new(vec![Line::from(context_chips), Line::from(project_chips)])
            .block(Block::default().borders(Borders::ALL).title(" Filters "))
            .wrap(Wrap { trim: false });
        f.render_widget(filters, chunks[0]);

        let tasks = self.store.list_next_actions(&self.context_filter, &self.project_filter);
        let block = self.screen_block(format!("{} tasks ready to do", tasks.len()));
        if tasks.is_empty() {
            Self::render_empty(f, chunks[1], block, "No next actions", "Process items from your inbox to see them here");
            return;
        }
        let items: Vec<ListItem> = tasks
            .iter()
            .map(|t| {
                let (mark, title_style) = if t.completed {
                    ("[✓] ", Style::default().fg(MUTED_GRAY).add_modifier(Modifier::CROSSED_OUT))
                } else {
                    ("[ ] ", Style::default())
                };
                let mut spans = vec![Span::raw(mark), Span::styled(t.title.clone(), title_style)];
                if let Some(context) = t.context() {
                    spans.push(Span::styled(format!("  {context}"), Style::default().fg(color)));
                }
                if t.project_id().is_some() {
                    let name = self.store.project_name(t.project_id()).to_string();
                    spans.push(Span::styled(format!("  {name}"), Style::default().fg(MUTED_GRAY)));
                }
                ListItem::new(Line::from(spans))
            })
            .collect();
        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("▶ ");
        f.render_stateful_widget(list, chunks[1], &mut self.next_state);
    }

    fn render_projects(&mut self, f: &mut Frame, area: Rect) {
        let projects = self.store.list_projects_with_progress();
        let block = self.screen_block(format!("{} active projects", projects.len()));
        if projects.is_empty() {
            Self::render_empty(f, area, block, "No projects yet", "Create projects when processing items from your inbox");
            return;
        }
        let color = self.screen.color();
        let items: Vec<ListItem> = projects
            .iter()
            .map(|p| {
                let mut lines = vec![Line::from(vec![
                    Span::styled(p.project.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
                    Span::styled(format!("  {} {}%", progress_bar(p.progress, 20), p.progress), Style::default().fg(color)),
                ])];
                if !p.project.description.is_empty() {
                    lines.push(Line::from(Span::raw(p.project.description.clone())));
                }
                lines.push(Line::from(Span::styled(
                    format!(
                        "{} tasks • {} completed • Created {}",
                        p.task_count,
                        p.completed_count,
                        format_date(p.project.created_at)
                    ),
                    Style::default().fg(MUTED_GRAY),
                )));
                lines.push(Line::from(""));
                ListItem::new(lines)
            })
            .collect();
        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("▶ ");
        f.render_stateful_widget(list, area, &mut self.projects_state);
    }

    fn render_process_dialog(&mut self, f: &mut Frame) {
        let area = centered_rect(60, 70, f.area());
        f.render_widget(Clear, area);

        let title = self
            .processing
            .and_then(|id| self.store.task(id))
            .map(|t| t.title.clone())
            .unwrap_or_default();
        let items: Vec<ListItem> = self
            .process_choices
            .iter()
            .map(|choice| match choice {
                ProcessChoice::Project(id) => {
                    ListItem::new(format!("Move to project: {}", self.store.project_name(Some(*id))))
                }
                ProcessChoice::NewProject => ListItem::new(Span::styled(
                    "+ New Project",
                    Style::default().fg(Screen::Projects.color()),
                )),
                ProcessChoice::Context(context) => ListItem::new(format!("Next action: {context}")),
            })
            .collect();
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" Process: {title} "))
                    .title_bottom(" Enter: choose | Esc: cancel ")
                    .border_style(Style::default().fg(INBOX_BLUE)),
            )
            .highlight_style(Style::default().fg(Color::Black).bg(INBOX_BLUE))
            .highlight_symbol("▶ ");
        f.render_stateful_widget(list, area, &mut self.process_state);
    }

    fn render_project_tasks(&mut self, f: &mut Frame) {
        let area = centered_rect(60, 60, f.area());
        f.render_widget(Clear, area);
        let color = Screen::Projects.color();
        let Some(progress) = self.open_project.and_then(|id| self.store.project_progress(id)) else {
            return;
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} {}% ", progress.project.name, progress.progress))
            .title_bottom(" Space: toggle done | Esc: back ")
            .border_style(Style::default().fg(color));
        let tasks = self.store.list_project_tasks(progress.project.id);
        if tasks.is_empty() {
            Self::render_empty(f, area, block, "No tasks in this project", "Move inbox items here while processing");
            return;
        }
        let items: Vec<ListItem> = tasks
            .iter()
            .map(|t| {
                let (mark, title_style) = if t.completed {
                    ("[✓] ", Style::default().fg(MUTED_GRAY).add_modifier(Modifier::CROSSED_OUT))
                } else {
                    ("[ ] ", Style::default())
                };
                let mut spans = vec![Span::raw(mark), Span::styled(t.title.clone(), title_style)];
                spans.push(Span::styled(format!("  {}", format_status(t.kind())), Style::default().fg(MUTED_GRAY)));
                if let Some(context) = t.context() {
                    spans.push(Span::styled(format!(" {context}"), Style::default().fg(color)));
                }
                ListItem::new(Line::from(spans))
            })
            .collect();
        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("▶ ");
        f.render_stateful_widget(list, area, &mut self.project_tasks_state);
    }

    fn render_new_project_dialog(&self, f: &mut Frame) {
        let area = centered_rect(60, 40, f.area());
        f.render_widget(Clear, area);
        let outer = Block::default()
            .borders(Borders::ALL)
            .title(" New Project ")
            .title_bottom(" Tab: switch field | Enter: create | Esc: back ")
            .border_style(Style::default().fg(Screen::Projects.color()));
        let inner = outer.inner(area);
        f.render_widget(outer, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Length(3), Constraint::Min(0)])
            .split(inner);
        let fields = [
            (ProjectField::Name, "Project name", &self.project_name),
            (ProjectField::Description, "Project description (optional)", &self.project_description),
        ];
        for (i, (field, label, input)) in fields.into_iter().enumerate() {
            let focused = self.project_field == field;
            let border = if focused {
                Style::default().fg(Screen::Projects.color())
            } else {
                Style::default().fg(MUTED_GRAY)
            };
            let para = Paragraph::new(input.value.clone())
                .block(Block::default().borders(Borders::ALL).title(format!(" {label} ")).border_style(border));
            f.render_widget(para, chunks[i]);
            if focused {
                let x = (chunks[i].x + 1).saturating_add(input.display_cursor());
                f.set_cursor_position((x.min(chunks[i].right().saturating_sub(2)), chunks[i].y + 1));
            }
        }
    }

    fn render_help(&self, f: &mut Frame) {
        let area = centered_rect(60, 60, f.area());
        f.render_widget(Clear, area);
        let lines = vec![
            Line::from(Span::styled("Everywhere", Style::default().add_modifier(Modifier::BOLD))),
            Line::from("  Tab/1/2/3: switch screen   ↑/↓: select   q/Esc: quit"),
            Line::from(""),
            Line::from(Span::styled("Inbox", Style::default().add_modifier(Modifier::BOLD))),
            Line::from("  a: capture   Enter/p: process   d: delete"),
            Line::from(""),
            Line::from(Span::styled("Next Actions", Style::default().add_modifier(Modifier::BOLD))),
            Line::from("  Space/Enter: toggle done   c: context filter   p: project filter"),
            Line::from("  r: clear filters   d: delete"),
            Line::from(""),
            Line::from(Span::styled("Projects", Style::default().add_modifier(Modifier::BOLD))),
            Line::from("  Enter: open task list (Space: toggle done)"),
            Line::from("  d: delete project (its tasks go back to the inbox)"),
        ];
        let para = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title(" Help (any key to close) "))
            .wrap(Wrap { trim: false });
        f.render_widget(para, area);
    }

    fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let text = if !self.status_message.is_empty() {
            self.status_message.clone()
        } else {
            match (self.state, self.screen) {
                (AppState::AddTask, _) => "Type a task, Enter to capture, Esc to stop".to_string(),
                (AppState::ProjectTasks, _) => "Space: Done | ↑/↓: Select | Esc: Back".to_string(),
                (_, Screen::Inbox) => "a: Capture | Enter: Process | d: Delete | Tab: Next screen | h: Help".to_string(),
                (_, Screen::NextActions) => {
                    "Space: Done | c: Context | p: Project | r: Reset | Tab: Next screen | h: Help".to_string()
                }
                (_, Screen::Projects) => "Enter: Tasks | d: Delete project | Tab: Next screen | h: Help".to_string(),
            }
        };
        let status = Paragraph::new(text)
            .style(Style::default().bg(self.screen.color()).fg(Color::Black))
            .alignment(Alignment::Left);
        f.render_widget(status, area);
    }

    /// Main event loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.handle_input()? {
                break;
            }
        }
        Ok(())
    }
}

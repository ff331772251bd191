use crate::domain::{
    filter_tasks, weekly_dashboard, DayColumn, Priority, Task, TaskDraft, TaskStore, TaskUpdate,
    UiMode, ViewMode,
};
use crate::export::export_csv;
use anyhow::Result;
use chrono::{DateTime, Local, NaiveDate};
use log::{debug, info, warn};
use std::path::PathBuf;

/// Fields of the add-task form, in Tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    DueDate,
    Priority,
    Category,
}

impl FormField {
    pub fn next(&self) -> Self {
        match self {
            Self::Title => Self::DueDate,
            Self::DueDate => Self::Priority,
            Self::Priority => Self::Category,
            Self::Category => Self::Title,
        }
    }
}

/// Input form state for adding tasks
#[derive(Debug, Clone)]
pub struct InputFormState {
    pub draft: TaskDraft,
    pub editing_field: FormField,
}

impl Default for InputFormState {
    fn default() -> Self {
        Self {
            draft: TaskDraft::default(),
            editing_field: FormField::Title,
        }
    }
}

/// One-line feedback shown under the list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    Info(String),
    Error(String),
}

/// Main application state
pub struct AppState {
    pub store: TaskStore,
    pub view: ViewMode,
    /// Index into the filtered list for the current view
    pub selected_index: usize,
    pub ui_mode: UiMode,
    pub input_form: Option<InputFormState>,
    pub status_message: Option<StatusMessage>,
    pub export_path: PathBuf,
    /// Clock snapshot taken once per loop iteration
    pub now: DateTime<Local>,
}

impl AppState {
    pub fn new(store: TaskStore, view: ViewMode, export_path: PathBuf, now: DateTime<Local>) -> Self {
        Self {
            store,
            view,
            selected_index: 0,
            ui_mode: UiMode::Normal,
            input_form: None,
            status_message: None,
            export_path,
            now,
        }
    }

    /// Refresh the clock snapshot used for filtering and live timer display
    pub fn tick(&mut self, now: DateTime<Local>) {
        self.now = now;
        self.clamp_selection();
    }

    pub fn today(&self) -> NaiveDate {
        self.now.date_naive()
    }

    /// Tasks shown in the main list
    pub fn visible_tasks(&self) -> Vec<&Task> {
        filter_tasks(self.store.tasks(), self.view, self.today())
    }

    pub fn dashboard(&self) -> Vec<DayColumn<'_>> {
        weekly_dashboard(self.store.tasks(), self.today())
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.visible_tasks().get(self.selected_index).copied()
    }

    fn selected_id(&self) -> Option<i64> {
        self.selected_task().map(|t| t.id)
    }

    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn move_selection_down(&mut self) {
        if self.selected_index + 1 < self.visible_tasks().len() {
            self.selected_index += 1;
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.visible_tasks().len();
        if self.selected_index >= len {
            self.selected_index = len.saturating_sub(1);
        }
    }

    pub fn set_view(&mut self, view: ViewMode) {
        if self.view != view {
            info!("Switching to {} view", view.name());
            self.view = view;
            self.selected_index = 0;
        }
    }

    /// Start or stop the selected task's timer
    pub fn toggle_timer(&mut self, now: DateTime<Local>) {
        if let Some(id) = self.selected_id() {
            let result = self.store.toggle_timer(id, now);
            self.report(result);
            if let Some(task) = self.store.get(id) {
                debug!("Task {} timer running: {}", id, task.is_running());
            }
        }
    }

    /// Advance the selected task's status (Not Started → In Progress → Completed → ...)
    pub fn cycle_status(&mut self) {
        if let Some(task) = self.selected_task() {
            let id = task.id;
            let update = TaskUpdate::status(task.status.next());
            let result = self.store.update(id, &update);
            self.report(result);
        }
    }

    /// Advance the selected task's priority (Low → Medium → High → ...)
    pub fn cycle_priority(&mut self) {
        if let Some(task) = self.selected_task() {
            let id = task.id;
            let update = TaskUpdate::priority(task.priority.next());
            let result = self.store.update(id, &update);
            self.report(result);
        }
    }

    /// Write the full, unfiltered task list to the export file
    pub fn export(&mut self) {
        match export_csv(self.store.tasks(), &self.export_path) {
            Ok(()) => {
                self.status_message = Some(StatusMessage::Info(format!(
                    "Exported {} tasks to {}",
                    self.store.len(),
                    self.export_path.display()
                )));
            }
            Err(e) => {
                warn!("Export failed: {}", e);
                self.status_message = Some(StatusMessage::Error(format!("Export failed: {}", e)));
            }
        }
    }

    /// Open the add-task form, keeping whatever was typed before
    pub fn start_add_task(&mut self) {
        if self.input_form.is_none() {
            self.input_form = Some(InputFormState::default());
        }
        self.ui_mode = UiMode::AddingTask;
    }

    pub fn input_form_toggle_field(&mut self) {
        if let Some(form) = &mut self.input_form {
            form.editing_field = form.editing_field.next();
        }
    }

    /// Type into the current field. On the priority field l/m/h pick a value, other keys cycle.
    pub fn input_form_add_char(&mut self, c: char) {
        let Some(field) = self.input_form.as_ref().map(|form| form.editing_field) else {
            return;
        };
        if field == FormField::Priority {
            match c.to_ascii_lowercase() {
                'l' => self.input_form_set_priority(Priority::Low),
                'm' => self.input_form_set_priority(Priority::Medium),
                'h' => self.input_form_set_priority(Priority::High),
                _ => self.input_form_cycle_priority(),
            }
        } else if let Some(form) = &mut self.input_form {
            match field {
                FormField::Title => form.draft.title.push(c),
                FormField::DueDate => form.draft.due_date.push(c),
                FormField::Category => form.draft.category.push(c),
                FormField::Priority => {}
            }
        }
    }

    pub fn input_form_cycle_priority(&mut self) {
        if let Some(form) = &mut self.input_form {
            form.draft.priority = form.draft.priority.next();
        }
    }

    pub fn input_form_set_priority(&mut self, priority: Priority) {
        if let Some(form) = &mut self.input_form {
            form.draft.priority = priority;
        }
    }

    pub fn input_form_backspace(&mut self) {
        if let Some(form) = &mut self.input_form {
            match form.editing_field {
                FormField::Title => {
                    form.draft.title.pop();
                }
                FormField::DueDate => {
                    form.draft.due_date.pop();
                }
                FormField::Priority => {}
                FormField::Category => {
                    form.draft.category.pop();
                }
            }
        }
    }

    /// Add the drafted task. A blank title leaves the form open and unchanged.
    pub fn submit_input_form(&mut self, now: DateTime<Local>) {
        let Some(form) = &self.input_form else {
            return;
        };
        if !form.draft.is_valid() {
            return;
        }

        let draft = form.draft.clone();
        let before = self.store.len();
        let result = self.store.add(&draft, now);
        self.report(result);
        // A failed save still leaves the task in the store, so the draft is spent
        if self.store.len() > before {
            self.input_form = None;
            self.ui_mode = UiMode::Normal;
        }
    }

    /// Close the form; the draft is kept for the next time it opens
    pub fn cancel_input_form(&mut self) {
        self.ui_mode = UiMode::Normal;
    }

    /// Turn a failed persistence write into a status line instead of aborting
    fn report<T>(&mut self, result: Result<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Failed to save tasks: {:#}", e);
                self.status_message = Some(StatusMessage::Error(format!("Failed to save tasks: {:#}", e)));
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Status, TaskObserver};
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Local> {
        // Wednesday
        Local.with_ymd_and_hms(2024, 1, 10, 9, 0, 0).unwrap()
    }

    fn draft(title: &str, due: &str) -> TaskDraft {
        TaskDraft {
            title: title.to_string(),
            due_date: due.to_string(),
            ..TaskDraft::default()
        }
    }

    fn create_test_app() -> AppState {
        let mut store = TaskStore::default();
        store.add(&draft("Today", "2024-01-10"), now()).unwrap();
        store.add(&draft("Friday", "2024-01-12"), now()).unwrap();
        store.add(&draft("Next month", "2024-02-19"), now()).unwrap();
        store.add(&draft("Someday", ""), now()).unwrap();
        AppState::new(store, ViewMode::Daily, PathBuf::from("tasks.csv"), now())
    }

    fn type_text(app: &mut AppState, text: &str) {
        for c in text.chars() {
            app.input_form_add_char(c);
        }
    }

    #[test]
    fn test_app_state_new() {
        let app = create_test_app();
        assert_eq!(app.store.len(), 4);
        assert_eq!(app.selected_index, 0);
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(app.input_form.is_none());
    }

    #[test]
    fn test_visible_tasks_per_view() {
        let mut app = create_test_app();
        assert_eq!(app.visible_tasks().len(), 1);

        app.set_view(ViewMode::Weekly);
        assert_eq!(app.visible_tasks().len(), 2);

        app.set_view(ViewMode::Monthly);
        assert_eq!(app.visible_tasks().len(), 2);

        app.set_view(ViewMode::All);
        assert_eq!(app.visible_tasks().len(), 4);
    }

    #[test]
    fn test_move_selection_stays_in_view() {
        let mut app = create_test_app();
        app.set_view(ViewMode::Weekly);

        app.move_selection_down();
        assert_eq!(app.selected_index, 1);
        app.move_selection_down();
        assert_eq!(app.selected_index, 1);

        app.move_selection_up();
        app.move_selection_up();
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_set_view_resets_selection() {
        let mut app = create_test_app();
        app.set_view(ViewMode::All);
        app.move_selection_down();
        app.move_selection_down();
        app.set_view(ViewMode::Daily);
        assert_eq!(app.selected_index, 0);
        assert_eq!(app.selected_task().unwrap().title, "Today");
    }

    #[test]
    fn test_toggle_timer_on_selected() {
        let mut app = create_test_app();

        app.toggle_timer(now());
        assert!(app.selected_task().unwrap().is_running());

        app.toggle_timer(now() + Duration::seconds(75));
        let task = app.selected_task().unwrap();
        assert!(!task.is_running());
        assert_eq!(task.time_spent, 75);
    }

    #[test]
    fn test_cycle_status_changes_only_selected() {
        let mut app = create_test_app();
        app.cycle_status();

        let tasks = app.store.tasks();
        assert_eq!(tasks[0].status, Status::InProgress);
        assert!(tasks[1..].iter().all(|t| t.status == Status::NotStarted));
    }

    #[test]
    fn test_cycle_priority() {
        let mut app = create_test_app();
        app.cycle_priority();
        assert_eq!(app.store.tasks()[0].priority, Priority::High);
    }

    #[test]
    fn test_add_task_via_form() {
        let mut app = create_test_app();
        app.start_add_task();
        type_text(&mut app, "Write tests");
        app.input_form_toggle_field();
        type_text(&mut app, "2024-01-10");
        app.input_form_toggle_field();
        app.input_form_set_priority(Priority::High);
        app.input_form_toggle_field();
        type_text(&mut app, "Dev");

        app.submit_input_form(now() + Duration::seconds(1));

        assert_eq!(app.store.len(), 5);
        let added = &app.store.tasks()[4];
        assert_eq!(added.title, "Write tests");
        assert_eq!(added.due_date, "2024-01-10");
        assert_eq!(added.priority, Priority::High);
        assert_eq!(added.category, "Dev");
        assert!(app.input_form.is_none());
        assert_eq!(app.ui_mode, UiMode::Normal);

        // The next form starts blank
        app.start_add_task();
        assert_eq!(app.input_form.as_ref().unwrap().draft, TaskDraft::default());
    }

    #[test]
    fn test_blank_title_is_silently_ignored() {
        let mut app = create_test_app();
        app.start_add_task();
        type_text(&mut app, "   ");
        app.submit_input_form(now());

        assert_eq!(app.store.len(), 4);
        assert_eq!(app.ui_mode, UiMode::AddingTask);
        assert!(app.status_message.is_none());
        assert_eq!(app.input_form.as_ref().unwrap().draft.title, "   ");
    }

    #[test]
    fn test_cancel_keeps_draft() {
        let mut app = create_test_app();
        app.start_add_task();
        type_text(&mut app, "Half");
        app.cancel_input_form();
        app.start_add_task();
        assert_eq!(app.input_form.as_ref().unwrap().draft.title, "Half");
    }

    #[test]
    fn test_export_writes_all_tasks() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut app = create_test_app();
        app.export_path = temp_dir.path().join("tasks.csv");

        app.export();

        let content = std::fs::read_to_string(&app.export_path).unwrap();
        // Header plus every task, regardless of the daily view
        assert_eq!(content.lines().count(), 5);
        assert!(matches!(app.status_message, Some(StatusMessage::Info(_))));
    }

    struct Failing;

    impl TaskObserver for Failing {
        fn on_change(&mut self, _tasks: &[Task]) -> Result<()> {
            anyhow::bail!("read-only")
        }
    }

    #[test]
    fn test_save_failure_becomes_status_message() {
        let mut app = create_test_app();
        app.store.subscribe(Box::new(Failing));
        app.toggle_timer(now());

        assert!(matches!(app.status_message, Some(StatusMessage::Error(_))));
        assert!(app.selected_task().unwrap().is_running());
    }

    #[test]
    fn test_failed_save_still_closes_form() {
        let mut app = create_test_app();
        app.store.subscribe(Box::new(Failing));

        app.start_add_task();
        type_text(&mut app, "Once");
        app.submit_input_form(now());

        assert_eq!(app.store.len(), 5);
        assert!(app.input_form.is_none());
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(matches!(app.status_message, Some(StatusMessage::Error(_))));

        // Enter again with the form closed must not add a second copy
        app.submit_input_form(now() + Duration::seconds(1));
        let onces = app.store.tasks().iter().filter(|t| t.title == "Once").count();
        assert_eq!(onces, 1);
    }

    #[test]
    fn test_dashboard_uses_clock_snapshot() {
        let mut app = create_test_app();
        let columns = app.dashboard();
        assert!(columns[3].is_today);

        app.tick(now() + Duration::days(1));
        assert!(app.dashboard()[4].is_today);
    }
}

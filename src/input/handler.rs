use crate::app::{AppState, FormField};
use crate::domain::{UiMode, ViewMode};
use anyhow::Result;
use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent};

/// Handle keyboard input events. Returns true when the app should quit.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match app.ui_mode {
        UiMode::Normal => handle_normal_mode(app, key),
        UiMode::AddingTask => handle_input_form_mode(app, key),
    }
}

/// Handle keys in normal mode
fn handle_normal_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        // Navigation
        KeyCode::Up | KeyCode::Char('k') => {
            app.move_selection_up();
            Ok(false)
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.move_selection_down();
            Ok(false)
        }

        // Start/stop timer
        KeyCode::Enter | KeyCode::Char(' ') => {
            app.toggle_timer(Local::now());
            Ok(false)
        }

        // Status and priority selectors
        KeyCode::Char('s') | KeyCode::Char('S') => {
            app.cycle_status();
            Ok(false)
        }
        KeyCode::Char('p') | KeyCode::Char('P') => {
            app.cycle_priority();
            Ok(false)
        }

        // Views
        KeyCode::Char('d') | KeyCode::Char('D') => {
            app.set_view(ViewMode::Daily);
            Ok(false)
        }
        KeyCode::Char('w') | KeyCode::Char('W') => {
            app.set_view(ViewMode::Weekly);
            Ok(false)
        }
        KeyCode::Char('m') | KeyCode::Char('M') => {
            app.set_view(ViewMode::Monthly);
            Ok(false)
        }
        KeyCode::Char('l') | KeyCode::Char('L') => {
            app.set_view(ViewMode::All);
            Ok(false)
        }

        // Add task
        KeyCode::Char('a') | KeyCode::Char('A') => {
            app.start_add_task();
            Ok(false)
        }

        // Export CSV
        KeyCode::Char('e') | KeyCode::Char('E') => {
            app.export();
            Ok(false)
        }

        // Quit
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Ok(true),

        _ => Ok(false),
    }
}

/// Handle keys in the add-task form
fn handle_input_form_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    let on_priority = app
        .input_form
        .as_ref()
        .is_some_and(|form| form.editing_field == FormField::Priority);

    match key.code {
        // Submit form
        KeyCode::Enter => {
            app.submit_input_form(Local::now());
            Ok(false)
        }

        // Cancel form
        KeyCode::Esc => {
            app.cancel_input_form();
            Ok(false)
        }

        // Switch field
        KeyCode::Tab => {
            app.input_form_toggle_field();
            Ok(false)
        }

        KeyCode::Backspace => {
            app.input_form_backspace();
            Ok(false)
        }

        // Priority selector
        KeyCode::Left | KeyCode::Right if on_priority => {
            app.input_form_cycle_priority();
            Ok(false)
        }

        KeyCode::Char(c) => {
            app.input_form_add_char(c);
            Ok(false)
        }

        _ => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Priority, Status, TaskDraft, TaskStore};
    use chrono::TimeZone;
    use crossterm::event::KeyModifiers;
    use std::path::PathBuf;

    fn create_test_app() -> AppState {
        let now = Local::now();
        let mut store = TaskStore::default();
        let draft = TaskDraft {
            title: "Test task".to_string(),
            due_date: now.format("%Y-%m-%d").to_string(),
            ..TaskDraft::default()
        };
        store.add(&draft, now).unwrap();
        AppState::new(store, ViewMode::All, PathBuf::from("tasks.csv"), now)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    fn type_text(app: &mut AppState, text: &str) {
        for c in text.chars() {
            handle_key(app, key(KeyCode::Char(c))).unwrap();
        }
    }

    #[test]
    fn test_handle_navigation() {
        let mut app = create_test_app();
        let later = Local.with_ymd_and_hms(2030, 6, 1, 12, 0, 0).unwrap();
        app.store.add(&TaskDraft::new("Task 2"), later).unwrap();

        assert_eq!(app.selected_index, 0);

        handle_key(&mut app, key(KeyCode::Down)).unwrap();
        assert_eq!(app.selected_index, 1);

        handle_key(&mut app, key(KeyCode::Up)).unwrap();
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_handle_quit() {
        let mut app = create_test_app();
        assert!(handle_key(&mut app, key(KeyCode::Char('q'))).unwrap());
        assert!(handle_key(&mut app, key(KeyCode::Esc)).unwrap());
    }

    #[test]
    fn test_handle_add_task() {
        let mut app = create_test_app();
        let initial_count = app.store.len();

        handle_key(&mut app, key(KeyCode::Char('a'))).unwrap();
        assert_eq!(app.ui_mode, UiMode::AddingTask);
        assert!(app.input_form.is_some());

        // Letters that are shortcuts in normal mode go into the title
        type_text(&mut app, "New");
        handle_key(&mut app, key(KeyCode::Tab)).unwrap();
        handle_key(&mut app, key(KeyCode::Tab)).unwrap();
        handle_key(&mut app, key(KeyCode::Right)).unwrap();

        handle_key(&mut app, key(KeyCode::Enter)).unwrap();
        assert_eq!(app.store.len(), initial_count + 1);
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(app.input_form.is_none());

        let added = app.store.tasks().last().unwrap();
        assert_eq!(added.title, "New");
        assert_eq!(added.priority, Priority::High);
    }

    #[test]
    fn test_handle_blank_add_keeps_form_open() {
        let mut app = create_test_app();
        handle_key(&mut app, key(KeyCode::Char('a'))).unwrap();
        handle_key(&mut app, key(KeyCode::Enter)).unwrap();

        assert_eq!(app.store.len(), 1);
        assert_eq!(app.ui_mode, UiMode::AddingTask);

        handle_key(&mut app, key(KeyCode::Esc)).unwrap();
        assert_eq!(app.ui_mode, UiMode::Normal);
    }

    #[test]
    fn test_handle_views() {
        let mut app = create_test_app();
        handle_key(&mut app, key(KeyCode::Char('w'))).unwrap();
        assert_eq!(app.view, ViewMode::Weekly);
        handle_key(&mut app, key(KeyCode::Char('m'))).unwrap();
        assert_eq!(app.view, ViewMode::Monthly);
        handle_key(&mut app, key(KeyCode::Char('d'))).unwrap();
        assert_eq!(app.view, ViewMode::Daily);
        handle_key(&mut app, key(KeyCode::Char('l'))).unwrap();
        assert_eq!(app.view, ViewMode::All);
    }

    #[test]
    fn test_handle_timer_and_status() {
        let mut app = create_test_app();

        handle_key(&mut app, key(KeyCode::Enter)).unwrap();
        assert!(app.store.tasks()[0].is_running());
        handle_key(&mut app, key(KeyCode::Enter)).unwrap();
        assert!(!app.store.tasks()[0].is_running());

        handle_key(&mut app, key(KeyCode::Char('s'))).unwrap();
        assert_eq!(app.store.tasks()[0].status, Status::InProgress);
    }
}

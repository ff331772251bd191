use crate::app::AppState;
use crate::domain::{format_time, timer_badge, Task};
use crate::ui::styles::{
    border_style, default_style, priority_style, running_style, selected_style, status_style,
    title_style,
};
use chrono::{DateTime, Local};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Render the task list for the current view
pub fn render_list_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let visible = app.visible_tasks();

    let items: Vec<ListItem> = visible
        .iter()
        .enumerate()
        .map(|(idx, task)| {
            let line = create_task_line(task, app.now);
            let style = if idx == app.selected_index {
                selected_style()
            } else {
                default_style()
            };

            ListItem::new(line).style(style)
        })
        .collect();

    let title = format!(
        " {} ({} of {}) ",
        app.view.title(),
        visible.len(),
        app.store.len()
    );

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(Span::styled(title, title_style())),
    );

    f.render_widget(list, area);
}

/// Create a single line for a task
/// Format: ⏱ [High] Write proposal  2024-01-10  In Progress  12m 5s
fn create_task_line(task: &Task, now: DateTime<Local>) -> Line<'static> {
    let mut spans = Vec::new();

    spans.push(Span::styled(format!("{} ", timer_badge(task)), running_style()));
    spans.push(Span::styled(
        format!("[{}] ", task.priority.label()),
        priority_style(task.priority),
    ));
    spans.push(Span::raw(task.title.clone()));

    if !task.due_date.is_empty() {
        spans.push(Span::raw(format!("  {}", task.due_date)));
    }

    spans.push(Span::raw("  ".to_string()));
    spans.push(Span::styled(task.status.label().to_string(), status_style(task.status)));

    // Banked time, plus the live segment while the timer runs
    spans.push(Span::raw(format!("  {}", task.time_spent_formatted())));
    if task.is_running() {
        spans.push(Span::styled(
            format!(" (+{})", format_time(task.running_seconds(now))),
            running_style(),
        ));
    }

    Line::from(spans)
}

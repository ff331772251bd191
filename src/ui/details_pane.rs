use crate::app::AppState;
use crate::domain::{format_time, timer_action_label};
use crate::ui::styles::{
    border_style, default_style, priority_style, running_style, status_style, title_style,
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Render the details pane for the selected task
pub fn render_details_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(" Details ", title_style()));

    let Some(task) = app.selected_task() else {
        let empty = Paragraph::new("No task selected").block(block);
        f.render_widget(empty, area);
        return;
    };

    let mut lines = Vec::new();

    lines.push(Line::from(vec![
        Span::styled("Title:      ", title_style()),
        Span::raw(task.title.clone()),
    ]));
    lines.push(Line::raw(""));

    let due = if task.due_date.is_empty() {
        "(unscheduled)".to_string()
    } else {
        task.due_date.clone()
    };
    lines.push(Line::from(vec![
        Span::styled("Due:        ", title_style()),
        Span::raw(due),
    ]));

    lines.push(Line::from(vec![
        Span::styled("Priority:   ", title_style()),
        Span::styled(task.priority.label(), priority_style(task.priority)),
    ]));

    let category = if task.category.is_empty() {
        "(none)".to_string()
    } else {
        task.category.clone()
    };
    lines.push(Line::from(vec![
        Span::styled("Category:   ", title_style()),
        Span::raw(category),
    ]));

    lines.push(Line::from(vec![
        Span::styled("Status:     ", title_style()),
        Span::styled(task.status.label(), status_style(task.status)),
    ]));

    lines.push(Line::from(vec![
        Span::styled("Time Spent: ", title_style()),
        Span::raw(task.time_spent_formatted()),
    ]));

    if task.is_running() {
        lines.push(Line::from(vec![
            Span::styled("Running:    ", title_style()),
            Span::styled(format_time(task.running_seconds(app.now)), running_style()),
        ]));
    }
    lines.push(Line::raw(""));

    lines.push(Line::from(vec![
        Span::styled("[Enter] ", title_style()),
        Span::styled(timer_action_label(task), default_style()),
    ]));

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });

    f.render_widget(paragraph, area);
}

use crate::app::AppState;
use crate::domain::DayColumn;
use crate::ui::layout::create_day_columns;
use crate::ui::styles::{border_style, default_style, hint_style, title_style, today_border_style};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Render the weekly dashboard: one column per day with time per task and a daily total
pub fn render_dashboard_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let columns = app.dashboard();
    let areas = create_day_columns(area);

    for (column, column_area) in columns.iter().zip(areas) {
        render_day_column(f, column, column_area);
    }
}

fn render_day_column(f: &mut Frame, column: &DayColumn, area: Rect) {
    let border = if column.is_today {
        today_border_style()
    } else {
        border_style()
    };

    let paragraph = Paragraph::new(day_lines(column))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(Span::styled(format!(" {} ", column.day_name()), title_style())),
        )
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, area);
}

/// Task entries followed by the day's total
fn day_lines(column: &DayColumn) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for task in &column.tasks {
        lines.push(Line::from(Span::styled(task.title.clone(), default_style())));
        lines.push(Line::from(Span::styled(task.time_spent_formatted(), hint_style())));
    }

    lines.push(Line::from(Span::styled(
        format!("Total: {}", column.total_formatted()),
        title_style(),
    )));

    lines
}

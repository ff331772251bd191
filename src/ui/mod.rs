pub mod dashboard_pane;
pub mod details_pane;
pub mod input_form;
pub mod keybindings;
pub mod layout;
pub mod list_pane;
pub mod styles;

use crate::app::{AppState, StatusMessage};
use crate::domain::UiMode;
use dashboard_pane::render_dashboard_pane;
use details_pane::render_details_pane;
use input_form::render_input_form;
use keybindings::render_keybindings;
use layout::create_layout;
use list_pane::render_list_pane;
use ratatui::{layout::Rect, text::Span, widgets::Paragraph, Frame};
use styles::{error_style, info_style};

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &AppState) {
    let size = f.size();
    let layout = create_layout(size);

    render_keybindings(f, layout.keybindings_area);
    render_list_pane(f, app, layout.list_area);
    render_details_pane(f, app, layout.details_area);
    render_status_line(f, app, layout.status_area);
    render_dashboard_pane(f, app, layout.dashboard_area);

    if app.ui_mode == UiMode::AddingTask {
        render_input_form(f, app, size);
    }
}

fn render_status_line(f: &mut Frame, app: &AppState, area: Rect) {
    let span = match &app.status_message {
        Some(StatusMessage::Info(text)) => Span::styled(format!(" {}", text), info_style()),
        Some(StatusMessage::Error(text)) => Span::styled(format!(" {}", text), error_style()),
        None => Span::raw(""),
    };
    f.render_widget(Paragraph::new(span), area);
}

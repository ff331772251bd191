use crate::app::{AppState, FormField, InputFormState};
use crate::domain::Priority;
use crate::ui::{
    layout::create_modal_area,
    styles::{modal_bg_style, modal_title_style, priority_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Label line and value line for one text field
fn text_field<'a>(form: &'a InputFormState, field: FormField, label: &'a str, value: &'a str) -> [Line<'a>; 2] {
    let editing = form.editing_field == field;
    let label_line = if editing {
        Line::raw(format!("{} (editing)", label))
    } else {
        Line::raw(label)
    };

    let value_line = Line::from(vec![
        Span::raw("> "),
        Span::styled(value, modal_title_style()),
        if editing {
            Span::styled("█", modal_title_style()) // Cursor
        } else {
            Span::raw("")
        },
    ]);

    [label_line, value_line]
}

/// Render the input form for adding tasks
pub fn render_input_form(f: &mut Frame, app: &AppState, area: Rect) {
    let Some(form) = &app.input_form else {
        return;
    };

    let modal_area = create_modal_area(area);

    // Clear the area behind the form
    f.render_widget(Clear, modal_area);

    let mut lines = Vec::new();

    lines.extend(text_field(form, FormField::Title, "Title:", &form.draft.title));
    lines.extend(text_field(form, FormField::DueDate, "Due date (YYYY-MM-DD):", &form.draft.due_date));

    // Priority selector
    let priority_label = if form.editing_field == FormField::Priority {
        "Priority: (←/→ or l/m/h)"
    } else {
        "Priority:"
    };
    lines.push(Line::raw(priority_label));
    let mut options = vec![Span::raw("> ")];
    for priority in Priority::all() {
        let label = if *priority == form.draft.priority {
            format!("[{}] ", priority.label())
        } else {
            format!(" {}  ", priority.label())
        };
        options.push(Span::styled(label, priority_style(*priority)));
    }
    lines.push(Line::from(options));

    lines.extend(text_field(form, FormField::Category, "Category:", &form.draft.category));
    lines.push(Line::raw(""));

    lines.push(Line::raw("Tab to switch fields  ·  Enter to add  ·  Esc to close"));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(" Add Task ", modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}

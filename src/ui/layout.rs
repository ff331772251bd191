use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main layout structure
pub struct MainLayout {
    pub keybindings_area: Rect,
    pub list_area: Rect,
    pub details_area: Rect,
    pub status_area: Rect,
    pub dashboard_area: Rect,
}

/// Create the main layout
/// - Top bar: keybindings (1 row)
/// - Middle: List (65%) | Details (35%)
/// - Status line (1 row)
/// - Bottom: weekly dashboard, one column per day
pub fn create_layout(area: Rect) -> MainLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),      // Keybindings bar
            Constraint::Percentage(60), // List + details
            Constraint::Length(1),      // Status line
            Constraint::Min(6),         // Dashboard
        ])
        .split(area);

    let top_horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(65), // List pane
            Constraint::Percentage(35), // Details pane
        ])
        .split(vertical[1]);

    MainLayout {
        keybindings_area: vertical[0],
        list_area: top_horizontal[0],
        details_area: top_horizontal[1],
        status_area: vertical[2],
        dashboard_area: vertical[3],
    }
}

/// Split the dashboard area into seven equal day columns
pub fn create_day_columns(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 7); 7])
        .split(area)
        .to_vec()
}

/// Create centered modal area (for the add-task form)
pub fn create_modal_area(area: Rect) -> Rect {
    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Length(16),
            Constraint::Percentage(25),
        ])
        .split(area);

    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(60),
            Constraint::Percentage(20),
        ])
        .split(vertical_chunks[1]);

    horizontal_chunks[1]
}

//! Layout components (content area, status bar)

use crate::app::App;
use crate::state::DisplayState;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Split the screen into the content area and the status bar
pub fn screen_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1])
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![];

    // Submission state
    let state = if app.form.is_submitting() {
        Span::styled(" ◐ ", Style::default().fg(Color::Yellow))
    } else if app.form.display() == DisplayState::Submitted {
        Span::styled(" ● ", Style::default().fg(Color::Green))
    } else {
        Span::styled(" ○ ", Style::default().fg(Color::Gray))
    };
    spans.push(state);

    spans.push(Span::styled(
        get_hints(app),
        Style::default().fg(Color::Gray),
    ));

    if !app.notifications.is_empty() {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            "Esc:dismiss",
            Style::default().fg(Color::Red),
        ));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);

    // Endpoint on the right
    let endpoint = format!(" {} ", app.endpoint);
    let width = (endpoint.chars().count() as u16).min(area.width / 2);
    let endpoint_area = Rect {
        x: area.x + area.width.saturating_sub(width),
        y: area.y,
        width,
        height: 1,
    };
    let endpoint_widget =
        Paragraph::new(endpoint).style(Style::default().bg(Color::DarkGray).fg(Color::Blue));
    frame.render_widget(endpoint_widget, endpoint_area);
}

/// Keyboard hints for the current screen
fn get_hints(app: &App) -> &'static str {
    if app.form.display() == DisplayState::Submitted {
        "q:quit"
    } else if app.form.is_submitting() {
        "Saving…  ^C:quit"
    } else {
        "Tab:next  ←/→:change  Enter/^S:save  ^C:quit"
    }
}

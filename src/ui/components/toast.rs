//! Toast notifications stacked in the top-right corner

use crate::state::{Notification, Notifications};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::time::Instant;

const TOAST_WIDTH: u16 = 46;
/// Borders + two message lines + progress line
const TOAST_HEIGHT: u16 = 5;
const TOAST_MARGIN: u16 = 1;
const MESSAGE_LINES: usize = 2;

/// Screen areas of the first `count` toasts, oldest on top.
///
/// Toasts that do not fit below each other are not given an area.
pub fn toast_areas(area: Rect, count: usize) -> Vec<Rect> {
    let width = TOAST_WIDTH.min(area.width.saturating_sub(TOAST_MARGIN * 2));
    if width < 10 {
        return Vec::new();
    }
    let x = area.x + area.width - width - TOAST_MARGIN;

    let mut areas = Vec::with_capacity(count);
    let mut y = area.y + TOAST_MARGIN;
    for _ in 0..count {
        if y + TOAST_HEIGHT > area.y + area.height {
            break;
        }
        areas.push(Rect {
            x,
            y,
            width,
            height: TOAST_HEIGHT,
        });
        y += TOAST_HEIGHT;
    }
    areas
}

/// Render all visible notifications over `area`
pub fn render_toasts(frame: &mut Frame, area: Rect, notifications: &Notifications) {
    let now = Instant::now();
    let areas = toast_areas(area, notifications.len());
    for (notification, toast_area) in notifications.iter().zip(areas) {
        render_toast(frame, toast_area, notification, now);
    }
}

fn render_toast(frame: &mut Frame, area: Rect, notification: &Notification, now: Instant) {
    frame.render_widget(Clear, area);

    let inner_width = area.width.saturating_sub(4) as usize;
    let mut lines: Vec<Line> = wrap_text(&notification.message, inner_width, MESSAGE_LINES)
        .into_iter()
        .map(Line::from)
        .collect();
    while lines.len() < MESSAGE_LINES {
        lines.push(Line::from(""));
    }

    let filled = (notification.remaining_fraction(now) * inner_width as f64).round() as usize;
    lines.push(Line::from(Span::styled(
        "━".repeat(filled),
        Style::default().fg(Color::Red),
    )));

    let block = Block::default()
        .title(Span::styled(
            " Error ",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .style(Style::default().bg(Color::Black));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().fg(Color::White).bg(Color::Black));
    frame.render_widget(paragraph, area);
}

/// Word-wrap `text` to `max_width` columns, keeping at most `max_lines`.
/// A cut-off tail is marked with an ellipsis.
fn wrap_text(text: &str, max_width: usize, max_lines: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    if max_width == 0 {
        return lines;
    }

    for word in text.split_whitespace() {
        let needed = current.chars().count() + word.chars().count() + 1;
        if needed > max_width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        // Words wider than a line are broken at the edge
        for c in word.chars() {
            if current.chars().count() == max_width {
                lines.push(std::mem::take(&mut current));
            }
            current.push(c);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    if lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            let keep = max_width.saturating_sub(1);
            *last = last.chars().take(keep).collect();
            last.push('…');
        }
    }
    lines
}

//! Field rendering utilities for the dish form

use crate::state::{DishType, InputKind, SPICINESS_MAX, SPICINESS_MIN};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Placeholder for the not yet typed part of a preparation time
const CLOCK_PLACEHOLDER: &str = "__:__:__";

fn border_style(is_active: bool, has_error: bool) -> Style {
    if is_active {
        Style::default().fg(Color::Cyan)
    } else if has_error {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn field_block(label: &str, is_active: bool, has_error: bool) -> Block<'_> {
    Block::default()
        .title(format!(" {label} "))
        .borders(Borders::ALL)
        .border_style(border_style(is_active, has_error))
}

/// Draw a free-text or masked input
pub fn draw_text_field(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    kind: InputKind,
    is_active: bool,
    has_error: bool,
) {
    let style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let cursor = if is_active { "▌" } else { "" };

    let mut spans = vec![
        Span::styled(value, style),
        Span::styled(cursor, Style::default().fg(Color::Cyan)),
    ];

    if kind == InputKind::ClockTime && (is_active || !value.is_empty()) {
        let rest: String = CLOCK_PLACEHOLDER.chars().skip(value.chars().count()).collect();
        spans.push(Span::styled(rest, Style::default().fg(Color::DarkGray)));
    } else if kind == InputKind::Decimal && !value.is_empty() {
        spans.push(Span::styled(" cm", Style::default().fg(Color::DarkGray)));
    } else if value.is_empty() && !is_active {
        spans.push(Span::styled("(empty)", Style::default().fg(Color::DarkGray)));
    }

    let paragraph = Paragraph::new(Line::from(spans));
    frame.render_widget(
        paragraph.block(field_block(label, is_active, has_error)),
        area,
    );
}

/// Draw the dish type selector
pub fn draw_choice_field(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: Option<DishType>,
    is_active: bool,
    has_error: bool,
) {
    let arrow_style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let value_span = match value {
        Some(dish_type) => Span::styled(
            dish_type.label(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        None => Span::styled("(select)", Style::default().fg(Color::DarkGray)),
    };

    let line = Line::from(vec![
        Span::styled("◀ ", arrow_style),
        value_span,
        Span::styled(" ▶", arrow_style),
    ]);

    frame.render_widget(
        Paragraph::new(line).block(field_block(label, is_active, has_error)),
        area,
    );
}

/// Draw the spiciness slider as a row of marks from min to max
pub fn draw_slider_field(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: Option<u8>,
    is_active: bool,
    has_error: bool,
) {
    let filled_style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Red)
    };
    let empty_style = Style::default().fg(Color::DarkGray);

    let mut spans = Vec::new();
    for level in SPICINESS_MIN..=SPICINESS_MAX {
        let span = match value {
            Some(v) if level == v => Span::styled("● ", filled_style),
            Some(v) if level < v => Span::styled("━ ", filled_style),
            _ => Span::styled("─ ", empty_style),
        };
        spans.push(span);
    }
    let readout = match value {
        Some(v) => format!(" {v}/{SPICINESS_MAX}"),
        None => " -".to_string(),
    };
    spans.push(Span::styled(readout, Style::default().add_modifier(Modifier::BOLD)));

    frame.render_widget(
        Paragraph::new(Line::from(spans)).block(field_block(label, is_active, has_error)),
        area,
    );
}

/// Draw an inline validation message below a field
pub fn draw_error(frame: &mut Frame, area: Rect, message: &str) {
    let line = Line::from(Span::styled(
        format!(" {message}"),
        Style::default().fg(Color::Red),
    ));
    frame.render_widget(Paragraph::new(line), area);
}

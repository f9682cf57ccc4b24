//! Dish form screen and the post-submit thank-you screen

use super::field_renderer::{draw_choice_field, draw_error, draw_slider_field, draw_text_field};
use crate::state::{DishForm, Field, Focus, InputKind};
use crate::ui::components::{render_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const FIELD_HEIGHT: u16 = 3;
const ERROR_HEIGHT: u16 = 1;
const PANEL_WIDTH: u16 = 64;
const TITLE_HEIGHT: u16 = 2;
const BUTTON_WIDTH: u16 = 20;

const TITLE: &str = "DISHES FORM";
const SUBMIT_LABEL: &str = "Save dish!";
const SUBMITTING_LABEL: &str = "Saving…";
const THANK_YOU: &str = "Thanks for adding a new dish!";

/// Screen positions of the form's parts, shared by drawing and mouse hit-testing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormLayout {
    pub panel: Rect,
    pub title: Rect,
    /// Focus targets in display order; parts that do not fit are left out
    pub targets: Vec<(Focus, Rect)>,
    /// Line below each field reserved for its validation message
    pub errors: Vec<(Field, Rect)>,
}

impl FormLayout {
    pub fn target_at(&self, column: u16, row: u16) -> Option<Focus> {
        let position = ratatui::layout::Position::new(column, row);
        self.targets
            .iter()
            .find(|(_, rect)| rect.contains(position))
            .map(|(focus, _)| *focus)
    }
}

/// Compute the form layout inside `area`.
///
/// The panel is centered; when the terminal is too short it is pinned to
/// the top and rows below the bottom edge are dropped.
pub fn form_layout(area: Rect, form: &DishForm) -> FormLayout {
    let fields = form.draft.active_fields();
    let content_height =
        TITLE_HEIGHT + fields.len() as u16 * (FIELD_HEIGHT + ERROR_HEIGHT) + BUTTON_HEIGHT;

    let width = PANEL_WIDTH.min(area.width);
    let height = (content_height + 2).min(area.height);
    let panel = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    };

    let inner = panel.inner(Margin {
        horizontal: 2,
        vertical: 1,
    });
    let bottom = inner.y + inner.height;
    let fits = |y: u16, h: u16| y + h <= bottom;

    let title = Rect {
        height: TITLE_HEIGHT.min(inner.height),
        ..inner
    };

    let mut targets = Vec::with_capacity(fields.len() + 1);
    let mut errors = Vec::with_capacity(fields.len());
    let mut y = inner.y + TITLE_HEIGHT;

    for field in fields {
        if fits(y, FIELD_HEIGHT) {
            targets.push((
                Focus::Field(field),
                Rect {
                    x: inner.x,
                    y,
                    width: inner.width,
                    height: FIELD_HEIGHT,
                },
            ));
        }
        y += FIELD_HEIGHT;
        if fits(y, ERROR_HEIGHT) {
            errors.push((
                field,
                Rect {
                    x: inner.x,
                    y,
                    width: inner.width,
                    height: ERROR_HEIGHT,
                },
            ));
        }
        y += ERROR_HEIGHT;
    }

    if fits(y, BUTTON_HEIGHT) {
        let button_width = BUTTON_WIDTH.min(inner.width);
        targets.push((
            Focus::SubmitButton,
            Rect {
                x: inner.x + (inner.width - button_width) / 2,
                y,
                width: button_width,
                height: BUTTON_HEIGHT,
            },
        ));
    }

    FormLayout {
        panel,
        title,
        targets,
        errors,
    }
}

/// Draw the editable dish form
pub fn draw_dish_form(frame: &mut Frame, area: Rect, form: &DishForm) {
    let layout = form_layout(area, form);
    let active = form.active_focus();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    frame.render_widget(block, layout.panel);

    let title = Paragraph::new(Line::from(Span::styled(
        TITLE,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(title, layout.title);

    for (target, rect) in &layout.targets {
        let is_active = *target == active;
        match target {
            Focus::Field(field) => draw_field(frame, *rect, form, *field, is_active),
            Focus::SubmitButton => {
                let label = if form.is_submitting() {
                    SUBMITTING_LABEL
                } else {
                    SUBMIT_LABEL
                };
                render_button(frame, *rect, label, is_active, !form.is_submitting());
            }
        }
    }

    for (field, rect) in &layout.errors {
        if let Some(message) = form.visible_error(*field) {
            draw_error(frame, *rect, message);
        }
    }
}

fn draw_field(frame: &mut Frame, area: Rect, form: &DishForm, field: Field, is_active: bool) {
    let has_error = form.visible_error(field).is_some();
    match field.input_kind() {
        InputKind::Choice => draw_choice_field(
            frame,
            area,
            field.label(),
            form.draft.dish_type,
            is_active,
            has_error,
        ),
        InputKind::Slider => draw_slider_field(
            frame,
            area,
            field.label(),
            form.draft.spiciness,
            is_active,
            has_error,
        ),
        kind => draw_text_field(
            frame,
            area,
            field.label(),
            form.draft.text(field).unwrap_or_default(),
            kind,
            is_active,
            has_error,
        ),
    }
}

/// Draw the screen shown once the dish was created
pub fn draw_submitted(frame: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(5),
            Constraint::Min(0),
        ])
        .split(area);

    let lines = vec![
        Line::from(Span::styled(
            TITLE,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            THANK_YOU,
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press q to quit",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        chunks[1],
    );
}

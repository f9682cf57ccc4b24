//! Dish form state: focus, touched fields, submission lifecycle

use super::dish::{validate, DishDraft, DishType, NewDish, ValidationErrors};
use super::dish::{SPICINESS_MAX, SPICINESS_MIN};
use super::field::{Field, InputKind};
use crate::gateway::{SubmissionError, SubmissionOutcome};
use crate::state::notifications::failure_messages;
use std::collections::BTreeSet;
use tracing::{debug, info};

/// Trait for common form operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
}

/// Visible screen of the form session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayState {
    #[default]
    Editing,
    /// Terminal: the session ends once a dish was created
    Submitted,
}

/// Focusable element of the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Field(Field),
    SubmitButton,
}

/// Result of asking the form to submit
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitAttempt {
    /// Valid; the caller must send this payload exactly once
    Ready(NewDish),
    Invalid(ValidationErrors),
    /// A previous submission has not resolved yet
    InFlight,
    /// The dish was already created
    Closed,
}

#[derive(Debug, Clone, Default)]
pub struct DishForm {
    pub draft: DishDraft,
    pub active_field_index: usize,
    errors: ValidationErrors,
    touched: BTreeSet<Field>,
    display: DisplayState,
    in_flight: bool,
}

impl DishForm {
    pub fn new() -> Self {
        let mut form = Self::default();
        form.revalidate();
        form
    }

    pub fn display(&self) -> DisplayState {
        self.display
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight
    }

    /// Focus targets in display order: active fields, then the button
    pub fn focus_targets(&self) -> Vec<Focus> {
        let mut targets: Vec<Focus> = self
            .draft
            .active_fields()
            .into_iter()
            .map(Focus::Field)
            .collect();
        targets.push(Focus::SubmitButton);
        targets
    }

    pub fn active_focus(&self) -> Focus {
        self.focus_targets()
            .get(self.active_field_index)
            .copied()
            .unwrap_or(Focus::SubmitButton)
    }

    /// Move focus to a given target if it is currently shown
    pub fn focus(&mut self, target: Focus) {
        if let Some(index) = self.focus_targets().iter().position(|t| *t == target) {
            self.set_active_field(index);
        }
    }

    /// Error to show inline for `field`, once the field has been touched
    pub fn visible_error(&self, field: Field) -> Option<&'static str> {
        if self.is_touched(field) {
            self.errors.get(field)
        } else {
            None
        }
    }

    #[cfg(test)]
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn is_touched(&self, field: Field) -> bool {
        self.touched.contains(&field)
    }

    /// Apply a typed character to the focused field
    pub fn input_char(&mut self, c: char) {
        if self.display == DisplayState::Submitted {
            return;
        }
        let Focus::Field(field) = self.active_focus() else {
            return;
        };

        match field.input_kind() {
            InputKind::Choice => {
                if c == ' ' {
                    self.cycle_choice(true);
                }
            }
            InputKind::Slider => {
                if let Some(d) = c.to_digit(10) {
                    // '0' stands for the top of the scale
                    let level = if d == 0 { SPICINESS_MAX } else { d as u8 };
                    self.draft.spiciness = Some(level);
                }
            }
            kind => {
                if let Some(value) = self.draft.text_mut(field) {
                    kind.accept(value, c);
                }
            }
        }
        self.revalidate();
    }

    /// Delete the last character of the focused field
    pub fn backspace(&mut self) {
        if self.display == DisplayState::Submitted {
            return;
        }
        let Focus::Field(field) = self.active_focus() else {
            return;
        };

        match field.input_kind() {
            InputKind::Choice => self.set_dish_type(None),
            InputKind::Slider => self.draft.spiciness = None,
            kind => {
                if let Some(value) = self.draft.text_mut(field) {
                    kind.backspace(value);
                }
            }
        }
        self.revalidate();
    }

    /// Step the focused choice or slider field forward or backward
    pub fn cycle_choice(&mut self, forward: bool) {
        if self.display == DisplayState::Submitted {
            return;
        }
        match self.active_focus() {
            Focus::Field(Field::DishType) => {
                let next = match (self.draft.dish_type, forward) {
                    (None, true) => DishType::Pizza,
                    (None, false) => DishType::Sandwich,
                    (Some(current), true) => current.next(),
                    (Some(current), false) => current.prev(),
                };
                self.set_dish_type(Some(next));
            }
            Focus::Field(Field::Spiciness) => {
                let level = match (self.draft.spiciness, forward) {
                    (None, _) => SPICINESS_MIN,
                    (Some(level), true) => level.saturating_add(1).min(SPICINESS_MAX),
                    (Some(level), false) => level.saturating_sub(1).max(SPICINESS_MIN),
                };
                self.draft.spiciness = Some(level);
                self.revalidate();
            }
            _ => {}
        }
    }

    /// Change the discriminant. Fields of the previous variant stop being
    /// required and lose their touched state and errors.
    pub fn set_dish_type(&mut self, dish_type: Option<DishType>) {
        if self.draft.dish_type == dish_type {
            return;
        }
        if let Some(previous) = self.draft.dish_type {
            for field in previous.variant_fields() {
                self.touched.remove(field);
            }
        }
        debug!(from = ?self.draft.dish_type, to = ?dish_type, "dish type changed");
        self.draft.dish_type = dish_type;
        self.active_field_index = self.active_field_index.min(self.field_count() - 1);
        self.revalidate();
    }

    fn revalidate(&mut self) {
        self.errors = validate(&self.draft).err().unwrap_or_default();
    }

    fn touch(&mut self, focus: Focus) {
        if let Focus::Field(field) = focus {
            self.touched.insert(field);
        }
    }

    /// Validate and, if valid, mark a submission as in flight
    pub fn begin_submit(&mut self) -> SubmitAttempt {
        if self.display == DisplayState::Submitted {
            return SubmitAttempt::Closed;
        }
        if self.in_flight {
            debug!("submit ignored: request already in flight");
            return SubmitAttempt::InFlight;
        }

        for field in self.draft.active_fields() {
            self.touched.insert(field);
        }

        match validate(&self.draft) {
            Ok(dish) => {
                self.errors = ValidationErrors::default();
                self.in_flight = true;
                info!(dish_type = ?dish.kind.dish_type(), "submitting dish");
                SubmitAttempt::Ready(NewDish::from(&dish))
            }
            Err(errors) => {
                let fields: Vec<Field> = errors.iter().map(|(field, _)| field).collect();
                debug!(?fields, "submit blocked by validation errors");
                self.errors = errors.clone();
                SubmitAttempt::Invalid(errors)
            }
        }
    }

    /// Resolve the in-flight submission.
    ///
    /// Returns the notifications to show; success moves to `Submitted`.
    pub fn finish_submit(&mut self, outcome: &SubmissionOutcome) -> Vec<String> {
        self.in_flight = false;
        match outcome {
            Ok(_) => {
                info!("dish submitted");
                self.display = DisplayState::Submitted;
                Vec::new()
            }
            Err(e) => {
                info!("submission failed: {e}");
                if let SubmissionError::Fields(errors) = e {
                    self.focus_rejected_field(errors.iter().map(|err| err.key.as_str()));
                }
                failure_messages(e)
            }
        }
    }

    /// Move focus to the first shown field the server rejected
    fn focus_rejected_field<'a>(&mut self, keys: impl Iterator<Item = &'a str>) {
        let shown = self.draft.active_fields();
        if let Some(field) = keys
            .filter_map(Field::from_wire_name)
            .find(|field| shown.contains(field))
        {
            debug!(?field, "focusing field rejected by server");
            self.focus(Focus::Field(field));
        }
    }
}

impl Form for DishForm {
    fn field_count(&self) -> usize {
        self.focus_targets().len()
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        let index = index.min(self.field_count() - 1);
        if index != self.active_field_index {
            // Leaving a field marks it touched
            self.touch(self.active_focus());
        }
        self.active_field_index = index;
    }
}

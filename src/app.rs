//! Application state and core logic

use crate::gateway::{DishGatewayTrait, SubmissionOutcome};
use crate::state::{DishForm, DisplayState, Focus, Form, Notifications, SubmitAttempt};
use crate::ui;
use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::{Position, Rect};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info};

/// Main application struct
pub struct App {
    /// The dish being edited
    pub form: DishForm,
    /// Visible toasts
    pub notifications: Notifications,
    /// Where dishes are sent, shown in the status bar
    pub endpoint: String,
    /// Terminal size for mouse hit-testing (height, width)
    pub terminal_size: Option<(u16, u16)>,
    gateway: Arc<dyn DishGatewayTrait>,
    outcome_tx: UnboundedSender<SubmissionOutcome>,
    outcome_rx: UnboundedReceiver<SubmissionOutcome>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    pub fn new(
        gateway: Arc<dyn DishGatewayTrait>,
        endpoint: impl Into<String>,
        notification_ttl: Duration,
    ) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        Self {
            form: DishForm::new(),
            notifications: Notifications::new(notification_ttl),
            endpoint: endpoint.into(),
            terminal_size: None,
            gateway,
            outcome_tx,
            outcome_rx,
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn quit(&mut self) {
        info!("quitting");
        self.quit = true;
    }

    /// Advance time-driven state: expire toasts and apply finished submissions
    pub fn tick(&mut self) {
        let expired = self.notifications.prune_expired(Instant::now());
        if expired > 0 {
            debug!(expired, "notifications expired");
        }
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            self.apply_outcome(outcome);
        }
    }

    /// Toast progress bars and the pending request need frequent redraws
    pub fn needs_fast_redraw(&self) -> bool {
        !self.notifications.is_empty() || self.form.is_submitting()
    }

    /// Validate and, if valid, send the dish in the background
    pub fn submit(&mut self) {
        match self.form.begin_submit() {
            SubmitAttempt::Ready(dish) => {
                let gateway = Arc::clone(&self.gateway);
                let tx = self.outcome_tx.clone();
                tokio::spawn(async move {
                    let outcome = gateway.add_dish(&dish).await;
                    // The receiver lives as long as the app
                    let _ = tx.send(outcome);
                });
            }
            SubmitAttempt::Invalid(errors) => {
                debug!(count = errors.len(), "dish not sent");
            }
            SubmitAttempt::InFlight | SubmitAttempt::Closed => {}
        }
    }

    fn apply_outcome(&mut self, outcome: SubmissionOutcome) {
        for message in self.form.finish_submit(&outcome) {
            self.notifications.push(message);
        }
    }

    /// Content area the UI is drawn into, matching `ui::draw`
    fn content_area(&self) -> Option<Rect> {
        let (height, width) = self.terminal_size?;
        let (content, _) = ui::screen_layout(Rect::new(0, 0, width, height));
        Some(content)
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if self.form.display() == DisplayState::Submitted {
            if matches!(
                key.code,
                KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter
            ) {
                self.quit();
            }
            return;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => {
                self.notifications.dismiss_latest();
            }
            KeyCode::Tab | KeyCode::Down => self.form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.form.prev_field(),
            // Keyboard shortcut (works from anywhere)
            KeyCode::Char('s') if ctrl => self.submit(),
            KeyCode::Enter => self.submit(),
            KeyCode::Left => self.form.cycle_choice(false),
            KeyCode::Right => self.form.cycle_choice(true),
            KeyCode::Char(c) if !ctrl => self.form.input_char(c),
            KeyCode::Backspace => self.form.backspace(),
            _ => {}
        }
    }

    /// Notification drawn at `position`, if any
    fn toast_at(&self, content: Rect, position: Position) -> Option<u64> {
        self.notifications
            .iter()
            .map(|n| n.id)
            .zip(ui::toast_areas(content, self.notifications.len()))
            .find(|(_, area)| area.contains(position))
            .map(|(id, _)| id)
    }

    /// Handle a mouse event
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        let Some(content) = self.content_area() else {
            return;
        };
        let position = Position::new(mouse.column, mouse.row);

        match mouse.kind {
            MouseEventKind::Moved => {
                let hovered = self.toast_at(content, position);
                self.notifications.set_hovered(hovered, Instant::now());
                return;
            }
            MouseEventKind::Down(MouseButton::Left) => {}
            _ => return,
        }

        // Toasts are drawn on top, so they take the click first
        if let Some(id) = self.toast_at(content, position) {
            self.notifications.dismiss(id);
            return;
        }

        if self.form.display() == DisplayState::Submitted {
            return;
        }

        let layout = ui::form_layout(content, &self.form);
        if let Some(target) = layout.target_at(mouse.column, mouse.row) {
            self.form.focus(target);
            if target == Focus::SubmitButton {
                self.submit();
            }
        }
    }
}

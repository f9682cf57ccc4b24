//! Transient notifications for submission failures
//!
//! Notifications never block input. Each one expires on its own after the
//! configured duration and can be dismissed early.

use crate::gateway::SubmissionError;
use std::time::{Duration, Instant};

pub const GENERIC_FAILURE_MESSAGE: &str = "Oops, something went wrong. Please try again later.";

/// Label used for error keys the form does not know
pub const UNKNOWN_ERROR_LABEL: &str = "Unknown error occurred";

/// Payload key to human label, for server-reported field errors
pub const API_ERROR_LABELS: &[(&str, &str)] = &[
    ("name", "Dish name"),
    ("preparation_time", "Preparation time"),
    ("type", "Dish type"),
    ("no_of_slices", "Number of slices"),
    ("diameter", "Diameter"),
    ("spiciness_scale", "Spiciness"),
    ("slices_of_bread", "Number of slices of bread"),
];

/// Default lifetime of a notification
pub const DEFAULT_NOTIFICATION_TTL: Duration = Duration::from_millis(7000);

pub fn api_error_label(key: &str) -> &'static str {
    API_ERROR_LABELS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, label)| *label)
        .unwrap_or(UNKNOWN_ERROR_LABEL)
}

/// Messages to show for a failed submission: one per rejected field,
/// or the generic retry message.
pub fn failure_messages(error: &SubmissionError) -> Vec<String> {
    match error {
        SubmissionError::Fields(errors) if !errors.is_empty() => errors
            .iter()
            .map(|e| format!("{} - {}!", api_error_label(&e.key), e.message()))
            .collect(),
        _ => vec![GENERIC_FAILURE_MESSAGE.to_string()],
    }
}

/// A toast. Its countdown only runs while it is not paused.
#[derive(Debug, Clone)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub ttl: Duration,
    /// Time shown before the current run
    shown: Duration,
    /// Start of the current run; `None` while paused
    running_since: Option<Instant>,
}

impl Notification {
    fn new(id: u64, message: String, ttl: Duration, now: Instant) -> Self {
        Self {
            id,
            message,
            ttl,
            shown: Duration::ZERO,
            running_since: Some(now),
        }
    }

    fn elapsed_at(&self, now: Instant) -> Duration {
        let running = self
            .running_since
            .map(|since| now.saturating_duration_since(since))
            .unwrap_or_default();
        self.shown + running
    }

    pub fn is_paused(&self) -> bool {
        self.running_since.is_none()
    }

    fn pause(&mut self, now: Instant) {
        if let Some(since) = self.running_since.take() {
            self.shown += now.saturating_duration_since(since);
        }
    }

    fn resume(&mut self, now: Instant) {
        if self.running_since.is_none() {
            self.running_since = Some(now);
        }
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        self.elapsed_at(now) >= self.ttl
    }

    /// Share of the lifetime still left, from 1.0 (new) down to 0.0
    pub fn remaining_fraction(&self, now: Instant) -> f64 {
        if self.ttl.is_zero() {
            return 0.0;
        }
        let elapsed = self.elapsed_at(now);
        (1.0 - elapsed.as_secs_f64() / self.ttl.as_secs_f64()).clamp(0.0, 1.0)
    }
}

/// Queue of visible notifications, oldest first
#[derive(Debug, Clone)]
pub struct Notifications {
    items: Vec<Notification>,
    ttl: Duration,
    next_id: u64,
}

impl Default for Notifications {
    fn default() -> Self {
        Self::new(DEFAULT_NOTIFICATION_TTL)
    }
}

impl Notifications {
    pub fn new(ttl: Duration) -> Self {
        Self {
            items: Vec::new(),
            ttl,
            next_id: 0,
        }
    }

    pub fn push(&mut self, message: impl Into<String>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push(Notification::new(
            id,
            message.into(),
            self.ttl,
            Instant::now(),
        ));
        id
    }

    /// Pause the countdown of the hovered notification and resume the others
    pub fn set_hovered(&mut self, hovered: Option<u64>, now: Instant) {
        for notification in &mut self.items {
            if Some(notification.id) == hovered {
                notification.pause(now);
            } else {
                notification.resume(now);
            }
        }
    }

    /// Drop expired notifications, returning how many were removed
    pub fn prune_expired(&mut self, now: Instant) -> usize {
        let before = self.items.len();
        self.items.retain(|n| !n.is_expired_at(now));
        before - self.items.len()
    }

    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|n| n.id != id);
        before != self.items.len()
    }

    pub fn dismiss_latest(&mut self) -> bool {
        self.items.pop().is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter()
    }
}

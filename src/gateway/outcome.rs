//! Submission results and failure classification

use serde_json::Value;
use thiserror::Error;

/// Decoded success body, or the reason the dish was not created
pub type SubmissionOutcome = Result<Value, SubmissionError>;

/// Failure of a submission, as surfaced to the form
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmissionError {
    /// The server rejected one or more fields
    #[error("server rejected {} field(s)", .0.len())]
    Fields(FieldErrors),
    /// Transport failure, or an error response without a usable body
    #[error("submission failed: {0}")]
    Generic(String),
}

/// Messages the server reported for one payload key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub key: String,
    pub messages: Vec<String>,
}

impl FieldError {
    /// Messages joined the way the web client stringified arrays
    pub fn message(&self) -> String {
        self.messages.join(",")
    }
}

/// Structured error body, in the order the server sent the keys
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    #[cfg(test)]
    pub fn new(errors: Vec<FieldError>) -> Self {
        Self(errors)
    }

    /// Parse an error response body.
    ///
    /// Returns `None` unless the body is a non-empty JSON object.
    pub fn from_body(body: &str) -> Option<Self> {
        let value: Value = serde_json::from_str(body).ok()?;
        let object = value.as_object()?;
        if object.is_empty() {
            return None;
        }

        let errors = object
            .iter()
            .map(|(key, value)| FieldError {
                key: key.clone(),
                messages: messages_of(value),
            })
            .collect();
        Some(Self(errors))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }
}

fn messages_of(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) => vec![s.clone()],
        Value::Array(items) => items.iter().map(message_text).collect(),
        other => vec![message_text(other)],
    }
}

fn message_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Decode a 2xx body. Empty bodies become `null`, non-JSON text is kept as a string.
pub(super) fn decode_success_body(body: &str) -> Value {
    if body.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string()))
}

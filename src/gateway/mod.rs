//! Submission gateway for the dishes API

mod client;
mod outcome;
mod traits;

pub use client::HttpDishGateway;
pub use outcome::{SubmissionError, SubmissionOutcome};
pub use traits::DishGatewayTrait;

#[cfg(test)]
pub use outcome::{FieldError, FieldErrors};
#[cfg(test)]
pub use traits::MockDishGatewayTrait;

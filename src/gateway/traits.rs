//! Trait abstraction for the gateway to enable mocking in tests

use super::outcome::SubmissionOutcome;
use crate::state::NewDish;
use async_trait::async_trait;

/// Performs one outbound request per call. Never retries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DishGatewayTrait: Send + Sync {
    /// Create a dish, returning the decoded response body or a classified failure
    async fn add_dish(&self, dish: &NewDish) -> SubmissionOutcome;
}

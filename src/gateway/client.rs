//! HTTP client for the dishes API
//!
//! Sends the dish as JSON to a fixed endpoint and classifies the response
//! into a [`SubmissionOutcome`].

use super::outcome::{decode_success_body, FieldErrors, SubmissionError, SubmissionOutcome};
use super::traits::DishGatewayTrait;
use crate::state::NewDish;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Gateway posting dishes over HTTP
pub struct HttpDishGateway {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpDishGateway {
    /// Create a gateway for `endpoint`. Requests are abandoned after `timeout`.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl DishGatewayTrait for HttpDishGateway {
    async fn add_dish(&self, dish: &NewDish) -> SubmissionOutcome {
        debug!(endpoint = %self.endpoint, name = %dish.name, "posting dish");

        let response = match self.client.post(&self.endpoint).json(dish).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("Dish request failed: {e}");
                return Err(SubmissionError::Generic(e.to_string()));
            }
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!("Failed to read response body ({status}): {e}");
                return Err(SubmissionError::Generic(e.to_string()));
            }
        };

        if status.is_success() {
            info!(%status, "dish created");
            return Ok(decode_success_body(&body));
        }

        match FieldErrors::from_body(&body) {
            Some(errors) => {
                info!(%status, fields = errors.len(), "dish rejected by server");
                Err(SubmissionError::Fields(errors))
            }
            None => {
                warn!(%status, "error response without field errors");
                Err(SubmissionError::Generic(format!("HTTP {status}")))
            }
        }
    }
}

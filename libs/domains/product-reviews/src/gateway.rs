//! HTTP gateway client for review submission.
//!
//! New reviews are handed to the commerce backend over HTTP; the backend
//! decides acceptance (duplicate detection, moderation rules). A rejection
//! is a regular result with `is_success == false`, not a fault.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::debug;

use core_config::{env_required, ConfigError, FromEnv};

use crate::clients::ReviewSubmissionClient;
use crate::error::{ClientError, ClientResult};
use crate::models::{ReviewSubmission, ReviewSubmissionResult};

/// Connection settings of the review submission gateway.
#[derive(Clone, Debug)]
pub struct GatewayConfig {
    /// Base URL of the backend gateway (required)
    pub base_url: String,
}

impl FromEnv for GatewayConfig {
    /// Reads `REVIEW_GATEWAY_URL` (required).
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: env_required("REVIEW_GATEWAY_URL")?,
        })
    }
}

/// Review submission client over the backend HTTP gateway.
pub struct HttpReviewGateway {
    client: Client,
    submit_url: String,
}

impl HttpReviewGateway {
    pub fn new(client: Client, config: &GatewayConfig) -> Self {
        Self {
            client,
            submit_url: format!(
                "{}/product-reviews",
                config.base_url.trim_end_matches('/')
            ),
        }
    }
}

#[async_trait]
impl ReviewSubmissionClient for HttpReviewGateway {
    async fn submit(&self, submission: &ReviewSubmission) -> ClientResult<ReviewSubmissionResult> {
        debug!(
            "Submitting review for abstract product {} to {}",
            submission.abstract_sku, self.submit_url
        );

        let response = self
            .client
            .post(&self.submit_url)
            .json(submission)
            .send()
            .await
            .map_err(|e| ClientError::Submission(e.to_string()))?;

        let status = response.status();
        if is_rejection(status) {
            return Ok(ReviewSubmissionResult {
                is_success: false,
                review: None,
            });
        }
        if !status.is_success() {
            return Err(ClientError::Submission(format!(
                "gateway returned status {}",
                status
            )));
        }

        response
            .json::<ReviewSubmissionResult>()
            .await
            .map_err(|e| ClientError::Malformed {
                origin: "submission",
                details: e.to_string(),
            })
    }
}

/// Statuses the gateway uses for business-rule rejections.
fn is_rejection(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::FORBIDDEN | StatusCode::UNPROCESSABLE_ENTITY
    )
}

//! Remote results endpoint sink.
//!
//! POSTs the results payload as JSON to `{base_url}/send-results`; the
//! endpoint emails the summary to its fixed recipient list and answers
//! with a `{success, message}` object.

use async_trait::async_trait;
use tracing::instrument;

use mathdrill_core::traits::{NotificationSink, ResultsPayload, SinkResponse};

use crate::error::SinkError;

const RESULTS_PATH: &str = "/send-results";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Sink that delivers results over HTTP.
pub struct HttpSink {
    base_url: String,
    client: reqwest::Client,
}

impl HttpSink {
    pub fn new(base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .expect("failed to build HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }
}

#[async_trait]
impl NotificationSink for HttpSink {
    fn name(&self) -> &str {
        "email"
    }

    #[instrument(skip(self, payload), fields(player = %payload.player_name))]
    async fn deliver(&self, payload: &ResultsPayload) -> anyhow::Result<SinkResponse> {
        let response = self
            .client
            .post(format!("{}{RESULTS_PATH}", self.base_url))
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SinkError::Timeout(DEFAULT_TIMEOUT_SECS)
                } else {
                    SinkError::Network(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        if status >= 400 {
            let body = response.text().await.unwrap_or_default();
            // The endpoint reports rejections in the same two-field shape.
            let message = serde_json::from_str::<SinkResponse>(&body)
                .map(|r| r.message)
                .unwrap_or(body);
            return Err(SinkError::Rejected { status, message }.into());
        }

        let response: SinkResponse = response
            .json()
            .await
            .map_err(|e| SinkError::InvalidResponse(e.to_string()))?;
        Ok(response)
    }
}

//! Mock sink for testing.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use mathdrill_core::traits::{NotificationSink, ResultsPayload, SinkResponse};

use crate::error::SinkError;

/// A mock notification sink with a configurable outcome.
///
/// Records the call count and the last payload so tests can assert that a
/// completed session invokes the sink exactly once.
pub struct MockSink {
    response: Option<SinkResponse>,
    call_count: AtomicU32,
    last_payload: Mutex<Option<ResultsPayload>>,
}

impl MockSink {
    /// A sink that always reports successful delivery.
    pub fn succeeding() -> Self {
        Self::with_response(SinkResponse {
            success: true,
            message: "Results sent to dad successfully!".into(),
        })
    }

    /// A sink that always returns the given response.
    pub fn with_response(response: SinkResponse) -> Self {
        Self {
            response: Some(response),
            call_count: AtomicU32::new(0),
            last_payload: Mutex::new(None),
        }
    }

    /// A sink whose delivery always errors.
    pub fn failing() -> Self {
        Self {
            response: None,
            call_count: AtomicU32::new(0),
            last_payload: Mutex::new(None),
        }
    }

    /// Number of deliveries attempted against this sink.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// The most recent payload delivered to this sink.
    pub fn last_payload(&self) -> Option<ResultsPayload> {
        self.last_payload.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationSink for MockSink {
    fn name(&self) -> &str {
        "mock"
    }

    async fn deliver(&self, payload: &ResultsPayload) -> anyhow::Result<SinkResponse> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        *self.last_payload.lock().unwrap() = Some(payload.clone());

        match &self.response {
            Some(response) => Ok(response.clone()),
            None => Err(SinkError::Network("mock sink configured to fail".into()).into()),
        }
    }
}

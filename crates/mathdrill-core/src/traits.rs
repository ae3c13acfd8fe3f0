//! Notification sink contract.
//!
//! When a session completes, its summary is handed to a sink for rendering
//! or delivery. Sinks are best-effort collaborators: the session's terminal
//! state never depends on their outcome. Implementations live in
//! `mathdrill-notify`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::session::Summary;

/// The payload shape every notification sink accepts.
///
/// Field names follow the wire format of the results endpoint, so this
/// serializes directly as the HTTP request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsPayload {
    pub player_name: String,
    pub score: u32,
    pub accuracy: u32,
    /// Human-readable elapsed time, e.g. `"42s"`.
    pub total_time: String,
    pub difficulty: String,
    pub operation: String,
    pub questions_answered: u32,
    pub correct_answers: u32,
}

impl From<&Summary> for ResultsPayload {
    fn from(summary: &Summary) -> Self {
        Self {
            player_name: summary.player_name.clone(),
            score: summary.final_score,
            accuracy: summary.accuracy_percent,
            total_time: format!("{}s", summary.total_time_secs),
            difficulty: summary.difficulty.to_string(),
            operation: summary.operation.to_string(),
            questions_answered: summary.questions_answered,
            correct_answers: summary.correct_answers,
        }
    }
}

/// The two-field response every sink returns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SinkResponse {
    pub success: bool,
    pub message: String,
}

/// A destination for a completed session's results.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Human-readable sink name (e.g. "email").
    fn name(&self) -> &str;

    /// Render or deliver the payload.
    async fn deliver(&self, payload: &ResultsPayload) -> anyhow::Result<SinkResponse>;
}

/// Best-effort delivery of a completed session's summary.
///
/// The returned response only feeds a transient status line; failures are
/// logged and folded into it, never propagated as errors.
pub async fn deliver_summary(sink: &dyn NotificationSink, summary: &Summary) -> SinkResponse {
    let payload = ResultsPayload::from(summary);
    match sink.deliver(&payload).await {
        Ok(response) => {
            if !response.success {
                tracing::warn!(
                    sink = sink.name(),
                    "results delivery rejected: {}",
                    response.message
                );
            }
            response
        }
        Err(e) => {
            tracing::warn!(sink = sink.name(), "results delivery failed: {e:#}");
            SinkResponse {
                success: false,
                message: format!("Failed to send results via {}", sink.name()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Difficulty, Operation};
    use chrono::Utc;
    use std::sync::atomic::{AtomicU32, Ordering};
    use uuid::Uuid;

    fn summary() -> Summary {
        Summary {
            id: Uuid::nil(),
            created_at: Utc::now(),
            player_name: "Autumn".into(),
            difficulty: Difficulty::Easy,
            operation: Operation::Mixed,
            final_score: 145,
            accuracy_percent: 100,
            total_time_secs: 42,
            questions_answered: 10,
            correct_answers: 10,
        }
    }

    struct CountingSink {
        calls: AtomicU32,
        fail: bool,
    }

    #[async_trait]
    impl NotificationSink for CountingSink {
        fn name(&self) -> &str {
            "counting"
        }

        async fn deliver(&self, _payload: &ResultsPayload) -> anyhow::Result<SinkResponse> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            if self.fail {
                anyhow::bail!("endpoint unreachable");
            }
            Ok(SinkResponse {
                success: true,
                message: "Results sent successfully!".into(),
            })
        }
    }

    #[test]
    fn payload_uses_wire_field_names() {
        let payload = ResultsPayload::from(&summary());
        let json = serde_json::to_string(&payload).unwrap();
        assert!(json.contains("\"playerName\":\"Autumn\""));
        assert!(json.contains("\"totalTime\":\"42s\""));
        assert!(json.contains("\"questionsAnswered\":10"));
        assert!(json.contains("\"difficulty\":\"easy\""));
        assert!(json.contains("\"operation\":\"mixed\""));
    }

    #[tokio::test]
    async fn delivery_invokes_sink_once() {
        let sink = CountingSink {
            calls: AtomicU32::new(0),
            fail: false,
        };
        let response = deliver_summary(&sink, &summary()).await;
        assert!(response.success);
        assert_eq!(sink.calls.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn delivery_failure_is_swallowed() {
        let sink = CountingSink {
            calls: AtomicU32::new(0),
            fail: true,
        };
        let response = deliver_summary(&sink, &summary()).await;
        assert!(!response.success);
        assert!(response.message.contains("counting"));
        assert_eq!(sink.calls.load(Ordering::Relaxed), 1);
    }
}

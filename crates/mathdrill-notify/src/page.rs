//! Local renderer sink.
//!
//! Writes a self-contained shareable results page into a directory, as the
//! fallback for setups without a reachable results endpoint.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;
use tracing::instrument;

use mathdrill_core::traits::{NotificationSink, ResultsPayload, SinkResponse};
use mathdrill_report::html::write_results_page;

/// Sink that renders the results page to a local directory.
pub struct PageSink {
    dir: PathBuf,
}

impl PageSink {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn page_path(&self, payload: &ResultsPayload) -> PathBuf {
        let player: String = payload
            .player_name
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { '-' })
            .collect();
        let timestamp = Utc::now().format("%Y-%m-%dT%H%M%S");
        self.dir.join(format!("math-results-{player}-{timestamp}.html"))
    }
}

#[async_trait]
impl NotificationSink for PageSink {
    fn name(&self) -> &str {
        "page"
    }

    #[instrument(skip(self, payload), fields(player = %payload.player_name))]
    async fn deliver(&self, payload: &ResultsPayload) -> anyhow::Result<SinkResponse> {
        let path = self.page_path(payload);
        write_results_page(payload, Utc::now(), &path)?;
        Ok(SinkResponse {
            success: true,
            message: format!("Results page saved to {}", path.display()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> ResultsPayload {
        ResultsPayload {
            player_name: "Autumn Rose".into(),
            score: 145,
            accuracy: 100,
            total_time: "42s".into(),
            difficulty: "easy".into(),
            operation: "mixed".into(),
            questions_answered: 10,
            correct_answers: 10,
        }
    }

    #[tokio::test]
    async fn writes_page_into_directory() {
        let dir = tempfile::tempdir().unwrap();
        let sink = PageSink::new(dir.path().to_path_buf());

        let response = sink.deliver(&payload()).await.unwrap();
        assert!(response.success);

        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(entries.len(), 1);
        // Whitespace in the player name is sanitized out of the filename.
        assert!(entries[0].starts_with("math-results-Autumn-Rose-"));
        assert!(entries[0].ends_with(".html"));
        assert!(response.message.contains(&entries[0]));
    }

    #[tokio::test]
    async fn creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let sink = PageSink::new(nested.clone());

        sink.deliver(&payload()).await.unwrap();
        assert_eq!(std::fs::read_dir(&nested).unwrap().count(), 1);
    }
}

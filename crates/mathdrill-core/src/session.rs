//! Session controller: Idle → Active → Complete.
//!
//! A [`GameSession`] owns the mutable [`SessionState`], the active
//! question, and the random source. It sequences generator calls and
//! scoring updates until the question quota is reached, then freezes the
//! state into an immutable [`Summary`].

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::generator::next_question;
use crate::model::{Difficulty, Operation, Question};
use crate::scoring::{evaluate, Feedback, SessionState};

/// Fixed question quota per session.
pub const QUESTIONS_PER_SESSION: u32 = 10;

/// Pre-game configuration, chosen once per session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSettings {
    pub player_name: String,
    pub difficulty: Difficulty,
    pub operation: Operation,
}

impl GameSettings {
    /// Placeholder used when the player leaves the name blank.
    pub const DEFAULT_PLAYER: &'static str = "Your Child";

    /// The trimmed player name, or the placeholder when blank.
    pub fn effective_player_name(&self) -> &str {
        let trimmed = self.player_name.trim();
        if trimmed.is_empty() {
            Self::DEFAULT_PLAYER
        } else {
            trimmed
        }
    }
}

/// Lifecycle phase of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Active,
    Complete,
}

/// What a submission produced: per-answer feedback plus, on the
/// quota-reaching answer, the final summary.
#[derive(Debug, Clone)]
pub struct SubmitOutcome {
    pub feedback: Feedback,
    pub summary: Option<Summary>,
}

/// The session state machine.
pub struct GameSession {
    settings: GameSettings,
    phase: Phase,
    state: SessionState,
    current: Option<Question>,
    started: Option<Instant>,
    rng: StdRng,
}

impl GameSession {
    pub fn new(settings: GameSettings) -> Self {
        Self::with_rng(settings, StdRng::from_entropy())
    }

    /// Reproducible session with a fixed question sequence.
    pub fn with_seed(settings: GameSettings, seed: u64) -> Self {
        Self::with_rng(settings, StdRng::seed_from_u64(seed))
    }

    fn with_rng(settings: GameSettings, rng: StdRng) -> Self {
        Self {
            settings,
            phase: Phase::Idle,
            state: SessionState::default(),
            current: None,
            started: None,
            rng,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    /// The question awaiting an answer, if the session is active.
    pub fn current_question(&self) -> Option<&Question> {
        self.current.as_ref()
    }

    /// Elapsed whole seconds since start, for the cooperative display tick.
    /// Never mutates scoring state.
    pub fn elapsed_secs(&self) -> u64 {
        self.started.map(|s| s.elapsed().as_secs()).unwrap_or(0)
    }

    /// Idle (or Complete) → Active: zero the counters, record the start
    /// time, and deal the first question. Has no effect mid-session.
    pub fn start(&mut self) {
        if self.phase == Phase::Active {
            return;
        }
        self.state = SessionState::default();
        self.started = Some(Instant::now());
        self.current = Some(next_question(
            self.settings.difficulty,
            self.settings.operation,
            &mut self.rng,
        ));
        self.phase = Phase::Active;
    }

    /// Evaluate a submission against the active question.
    ///
    /// Returns `None` when no session is active. An invalid submission
    /// leaves the current question in place; an accepted one below quota
    /// deals the next question, and the quota-reaching answer transitions
    /// to Complete and carries the final [`Summary`].
    pub fn submit(&mut self, raw_input: &str) -> Option<SubmitOutcome> {
        if self.phase != Phase::Active {
            return None;
        }
        let question = self.current.as_ref()?;
        let feedback = evaluate(
            &mut self.state,
            question,
            raw_input,
            self.settings.difficulty,
        );

        if !feedback.accepted {
            return Some(SubmitOutcome {
                feedback,
                summary: None,
            });
        }

        if self.state.questions_answered >= QUESTIONS_PER_SESSION {
            self.phase = Phase::Complete;
            self.current = None;
            let summary = self.summarize();
            Some(SubmitOutcome {
                feedback,
                summary: Some(summary),
            })
        } else {
            self.current = Some(next_question(
                self.settings.difficulty,
                self.settings.operation,
                &mut self.rng,
            ));
            Some(SubmitOutcome {
                feedback,
                summary: None,
            })
        }
    }

    /// Complete (or Active) → Idle. No partial state survives.
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.state = SessionState::default();
        self.current = None;
        self.started = None;
    }

    fn summarize(&self) -> Summary {
        let accuracy = (self.state.correct_answers as f64 / QUESTIONS_PER_SESSION as f64
            * 100.0)
            .round() as u32;
        Summary {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            player_name: self.settings.effective_player_name().to_string(),
            difficulty: self.settings.difficulty,
            operation: self.settings.operation,
            final_score: self.state.score,
            accuracy_percent: accuracy,
            total_time_secs: self.elapsed_secs(),
            questions_answered: self.state.questions_answered,
            correct_answers: self.state.correct_answers,
        }
    }
}

/// Immutable end-of-session snapshot, computed once and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub player_name: String,
    pub difficulty: Difficulty,
    pub operation: Operation,
    pub final_score: u32,
    pub accuracy_percent: u32,
    pub total_time_secs: u64,
    pub questions_answered: u32,
    pub correct_answers: u32,
}

impl Summary {
    /// Save the summary as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize summary")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write summary to {}", path.display()))?;
        Ok(())
    }

    /// Load a summary from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read summary from {}", path.display()))?;
        let summary: Summary =
            serde_json::from_str(&content).context("failed to parse summary JSON")?;
        Ok(summary)
    }

    /// Accuracy-gated banner shown on completion and in reports.
    pub fn performance_message(&self) -> &'static str {
        performance_message(self.accuracy_percent)
    }
}

/// Banner text for a given accuracy percentage.
pub fn performance_message(accuracy_percent: u32) -> &'static str {
    if accuracy_percent >= 90 {
        "Excellent! You're a math superstar!"
    } else if accuracy_percent >= 70 {
        "Good job! Keep practicing to improve!"
    } else {
        "Keep practicing! You'll get better with time!"
    }
}

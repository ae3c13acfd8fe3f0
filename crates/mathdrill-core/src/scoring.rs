//! Streak-based scoring and answer evaluation.
//!
//! [`evaluate`] is the only place that mutates [`SessionState`]. An invalid
//! submission never consumes a question; a wrong answer resets the streak;
//! a correct answer earns base points scaled by the streak multiplier.

use serde::{Deserialize, Serialize};

use crate::model::{Difficulty, Question};

/// Absolute tolerance for answer equality, guarding against float rounding.
pub const ANSWER_TOLERANCE: f64 = 0.01;

/// Per-step streak bonus and its cap. The multiplier is 1.0 at streak 1 and
/// reaches the 2.0 cap at streak 11.
const STREAK_STEP: f64 = 0.1;
const MULTIPLIER_CAP: f64 = 2.0;

/// Mutable per-session counters.
///
/// Owned by the session controller; mutated exclusively by [`evaluate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub score: u32,
    pub streak: u32,
    pub questions_answered: u32,
    pub correct_answers: u32,
}

/// Outcome of a single submission, surfaced to the caller for display.
#[derive(Debug, Clone, PartialEq)]
pub struct Feedback {
    /// Whether the submission consumed a question. False only for input
    /// that did not parse as a number.
    pub accepted: bool,
    pub correct: bool,
    pub points_awarded: u32,
    pub message: String,
}

/// Streak multiplier: 1.0 at streak 1, +0.1 per consecutive correct answer,
/// capped at 2.0.
pub fn streak_multiplier(streak: u32) -> f64 {
    (1.0 + streak.saturating_sub(1) as f64 * STREAK_STEP).min(MULTIPLIER_CAP)
}

/// Points awarded for a correct answer at the given (post-increment) streak.
pub fn points_for(difficulty: Difficulty, streak: u32) -> u32 {
    (difficulty.base_points() as f64 * streak_multiplier(streak)).floor() as u32
}

/// Evaluate a raw submission against the active question.
///
/// Input that fails numeric parsing is rejected without touching the state:
/// `questions_answered` stays put and the same question remains active.
pub fn evaluate(
    state: &mut SessionState,
    question: &Question,
    raw_input: &str,
    difficulty: Difficulty,
) -> Feedback {
    // `f64::from_str` accepts "NaN", which is not an answer.
    let parsed = match raw_input.trim().parse::<f64>() {
        Ok(v) if !v.is_nan() => v,
        _ => {
            return Feedback {
                accepted: false,
                correct: false,
                points_awarded: 0,
                message: "Please enter a valid number!".to_string(),
            }
        }
    };

    state.questions_answered += 1;
    let correct = (parsed - question.expected_answer).abs() < ANSWER_TOLERANCE;

    if correct {
        state.correct_answers += 1;
        state.streak += 1;
        let points = points_for(difficulty, state.streak);
        state.score += points;
        Feedback {
            accepted: true,
            correct: true,
            points_awarded: points,
            message: "Correct! Great job!".to_string(),
        }
    } else {
        state.streak = 0;
        Feedback {
            accepted: true,
            correct: false,
            points_awarded: 0,
            message: format!(
                "Not quite. The answer is {}. Keep trying!",
                format_answer(question.expected_answer)
            ),
        }
    }
}

/// Render an expected answer without a trailing `.0` for whole numbers.
pub fn format_answer(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}

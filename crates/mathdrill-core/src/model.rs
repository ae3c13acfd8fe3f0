//! Core data model types for mathdrill.
//!
//! These are the fundamental types the whole system uses to represent
//! difficulty tiers, operations, and generated questions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Difficulty tier, chosen once per session.
///
/// Each tier maps to an inclusive operand range and a base point value per
/// correct answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Inclusive `[min, max]` operand range for this tier.
    pub fn operand_range(self) -> (i64, i64) {
        match self {
            Difficulty::Easy => (1, 10),
            Difficulty::Medium => (1, 50),
            Difficulty::Hard => (1, 100),
        }
    }

    /// Base points per correct answer, before the streak multiplier.
    pub fn base_points(self) -> u32 {
        match self {
            Difficulty::Easy => 10,
            Difficulty::Medium => 15,
            Difficulty::Hard => 20,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

/// Operation selector for a session.
///
/// `Mixed` is a meta-selector resolved per question to one of the four
/// concrete operations; it is never attached to a generated [`Question`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Addition,
    Subtraction,
    Multiplication,
    Division,
    Mixed,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Addition => write!(f, "addition"),
            Operation::Subtraction => write!(f, "subtraction"),
            Operation::Multiplication => write!(f, "multiplication"),
            Operation::Division => write!(f, "division"),
            Operation::Mixed => write!(f, "mixed"),
        }
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "addition" | "add" => Ok(Operation::Addition),
            "subtraction" | "sub" => Ok(Operation::Subtraction),
            "multiplication" | "mul" => Ok(Operation::Multiplication),
            "division" | "div" => Ok(Operation::Division),
            "mixed" => Ok(Operation::Mixed),
            other => Err(format!("unknown operation: {other}")),
        }
    }
}

/// A concrete arithmetic operation attached to a generated question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Op {
    Addition,
    Subtraction,
    Multiplication,
    Division,
}

impl Op {
    /// All concrete operations, in the order `Mixed` draws from.
    pub const ALL: [Op; 4] = [
        Op::Addition,
        Op::Subtraction,
        Op::Multiplication,
        Op::Division,
    ];

    /// Display symbol used when rendering a question.
    pub fn symbol(self) -> char {
        match self {
            Op::Addition => '+',
            Op::Subtraction => '-',
            Op::Multiplication => '×',
            Op::Division => '÷',
        }
    }

    /// Apply the operation to two operands.
    pub fn apply(self, a: i64, b: i64) -> f64 {
        match self {
            Op::Addition => (a + b) as f64,
            Op::Subtraction => (a - b) as f64,
            Op::Multiplication => (a * b) as f64,
            Op::Division => a as f64 / b as f64,
        }
    }
}

/// A single generated question.
///
/// Immutable once created; the session controller replaces it with a fresh
/// one rather than mutating it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub operand1: i64,
    pub operand2: i64,
    pub op: Op,
    /// The exact expected answer, rounded to 2 decimal places.
    pub expected_answer: f64,
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} = ?",
            self.operand1,
            self.op.symbol(),
            self.operand2
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_display_and_parse() {
        assert_eq!(Difficulty::Easy.to_string(), "easy");
        assert_eq!(Difficulty::Hard.to_string(), "hard");
        assert_eq!("medium".parse::<Difficulty>().unwrap(), Difficulty::Medium);
        assert_eq!("HARD".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert!("extreme".parse::<Difficulty>().is_err());
    }

    #[test]
    fn difficulty_ranges_and_points() {
        assert_eq!(Difficulty::Easy.operand_range(), (1, 10));
        assert_eq!(Difficulty::Medium.operand_range(), (1, 50));
        assert_eq!(Difficulty::Hard.operand_range(), (1, 100));
        assert_eq!(Difficulty::Easy.base_points(), 10);
        assert_eq!(Difficulty::Medium.base_points(), 15);
        assert_eq!(Difficulty::Hard.base_points(), 20);
    }

    #[test]
    fn operation_display_and_parse() {
        assert_eq!(Operation::Mixed.to_string(), "mixed");
        assert_eq!(
            "multiplication".parse::<Operation>().unwrap(),
            Operation::Multiplication
        );
        assert_eq!("add".parse::<Operation>().unwrap(), Operation::Addition);
        assert_eq!("div".parse::<Operation>().unwrap(), Operation::Division);
        assert!("modulo".parse::<Operation>().is_err());
    }

    #[test]
    fn op_apply() {
        assert_eq!(Op::Addition.apply(3, 4), 7.0);
        assert_eq!(Op::Subtraction.apply(4, 4), 0.0);
        assert_eq!(Op::Multiplication.apply(6, 7), 42.0);
        assert_eq!(Op::Division.apply(63, 7), 9.0);
    }

    #[test]
    fn question_display() {
        let q = Question {
            operand1: 3,
            operand2: 4,
            op: Op::Addition,
            expected_answer: 7.0,
        };
        assert_eq!(q.to_string(), "3 + 4 = ?");

        let q = Question {
            operand1: 63,
            operand2: 7,
            op: Op::Division,
            expected_answer: 9.0,
        };
        assert_eq!(q.to_string(), "63 ÷ 7 = ?");
    }

    #[test]
    fn question_serde_roundtrip() {
        let q = Question {
            operand1: 8,
            operand2: 2,
            op: Op::Division,
            expected_answer: 4.0,
        };
        let json = serde_json::to_string(&q).unwrap();
        assert!(json.contains("\"division\""));
        let back: Question = serde_json::from_str(&json).unwrap();
        assert_eq!(back, q);
    }
}

//! Keyword scoring engine.
//!
//! Maps a task's free text to an urgency score and an importance score, both
//! in 0..=10. The text is the lower-cased title, followed by a space and the
//! description when one is present. Each axis starts at [`BASE_SCORE`] and is
//! raised to the heaviest matching trigger phrase of its table:
//!
//! ```text
//! urgency    = max(BASE_SCORE, max(weight of matching urgency phrases))
//! importance = max(BASE_SCORE, max(weight of matching importance phrases))
//! ```
//!
//! Taking the maximum (never the sum) keeps the result bounded and makes it
//! independent of table order.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::keywords::{KeywordTable, KeywordWeight};
use crate::quadrant::{classify, Priority};

/// Score an axis keeps when none of its phrases match.
pub const BASE_SCORE: u8 = 3;
/// Upper bound of both axes.
pub const MAX_SCORE: u8 = 10;

/// Urgency, importance and the quadrant derived from them.
///
/// Fields are private so the priority can never drift from the scores.
/// Deserialization re-checks both the range and the label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawScores")]
pub struct TaskScores {
    urgency_score: u8,
    importance_score: u8,
    priority: Priority,
}

impl TaskScores {
    /// Build from raw scores; values above 10 are capped.
    pub fn new(urgency: u8, importance: u8) -> Self {
        let urgency = urgency.min(MAX_SCORE);
        let importance = importance.min(MAX_SCORE);
        Self {
            urgency_score: urgency,
            importance_score: importance,
            priority: classify(i32::from(urgency), i32::from(importance)),
        }
    }

    pub fn urgency(&self) -> u8 {
        self.urgency_score
    }

    pub fn importance(&self) -> u8 {
        self.importance_score
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// Human-readable justification naming both scores and the quadrant's
    /// reasoning.
    pub fn justification(&self) -> String {
        format!(
            "緊急度 {}/{MAX_SCORE}・重要度 {}/{MAX_SCORE}: {}",
            self.urgency_score,
            self.importance_score,
            self.priority.reasoning()
        )
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawScores {
    urgency_score: i64,
    importance_score: i64,
    priority: Priority,
}

impl TryFrom<RawScores> for TaskScores {
    type Error = ValidationError;

    fn try_from(raw: RawScores) -> Result<Self, Self::Error> {
        let urgency = checked_axis("urgency", raw.urgency_score)?;
        let importance = checked_axis("importance", raw.importance_score)?;
        let scores = TaskScores::new(urgency, importance);
        if scores.priority != raw.priority {
            return Err(ValidationError::PriorityMismatch {
                stored: raw.priority.to_string(),
                expected: scores.priority.to_string(),
                urgency,
                importance,
            });
        }
        Ok(scores)
    }
}

fn checked_axis(axis: &'static str, value: i64) -> Result<u8, ValidationError> {
    u8::try_from(value)
        .ok()
        .filter(|v| *v <= MAX_SCORE)
        .ok_or(ValidationError::ScoreOutOfRange { axis, value })
}

/// Lower-cased title plus optional description.
///
/// An empty description contributes nothing, not even the separator.
pub fn normalize_text(title: &str, description: Option<&str>) -> String {
    match description.filter(|d| !d.is_empty()) {
        Some(description) => format!("{title} {description}").to_lowercase(),
        None => title.to_lowercase(),
    }
}

/// A pluggable scoring strategy.
///
/// Implementations must be pure: the same text always yields the same
/// scores, and no input makes them fail.
pub trait Scorer: Send + Sync {
    /// Identifier used in logs and error messages.
    fn name(&self) -> &str;

    /// Score one task's text.
    fn score(&self, title: &str, description: Option<&str>) -> TaskScores;
}

/// Phrases that fired on each axis, for explaining a score.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreExplanation {
    pub scores: TaskScores,
    pub urgency_matches: Vec<KeywordWeight>,
    pub importance_matches: Vec<KeywordWeight>,
    pub justification: String,
}

/// Scorer backed by static keyword tables.
#[derive(Debug, Clone, Copy)]
pub struct KeywordScorer {
    urgency: KeywordTable,
    importance: KeywordTable,
}

impl KeywordScorer {
    /// Scorer over the reference tables.
    pub const fn new() -> Self {
        Self {
            urgency: KeywordTable::urgency(),
            importance: KeywordTable::importance(),
        }
    }

    /// Scorer over caller-supplied tables.
    pub const fn with_tables(urgency: KeywordTable, importance: KeywordTable) -> Self {
        Self { urgency, importance }
    }

    /// Score and report which phrases matched.
    pub fn explain(&self, title: &str, description: Option<&str>) -> ScoreExplanation {
        let text = normalize_text(title, description);
        let scores = self.score_normalized(&text);
        ScoreExplanation {
            scores,
            urgency_matches: self.urgency.matches(&text).copied().collect(),
            importance_matches: self.importance.matches(&text).copied().collect(),
            justification: scores.justification(),
        }
    }

    fn score_normalized(&self, text: &str) -> TaskScores {
        let urgency = axis_score(&self.urgency, text);
        let importance = axis_score(&self.importance, text);
        tracing::debug!(urgency, importance, "scored task text");
        TaskScores::new(urgency, importance)
    }
}

impl Default for KeywordScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl Scorer for KeywordScorer {
    fn name(&self) -> &str {
        "keyword"
    }

    fn score(&self, title: &str, description: Option<&str>) -> TaskScores {
        self.score_normalized(&normalize_text(title, description))
    }
}

fn axis_score(table: &KeywordTable, text: &str) -> u8 {
    table
        .max_weight(text)
        .map_or(BASE_SCORE, |weight| weight.max(BASE_SCORE))
}

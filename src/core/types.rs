//! Common type definitions used across the codebase

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::core::errors::{Error, Result};

/// Region name attached to points produced by mean aggregation.
pub const AGGREGATE_REGION: &str = "ALL";

/// One simulated observation on the annual bleaching-index series.
///
/// `index_value` is drawn from a uniform placeholder distribution in
/// [0, 100). It illustrates the shape of a bleaching series and must never
/// be treated as scientific data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub region: String,
    pub index_value: f64,
}

/// One dataset row projected to its region name and numeric health metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionRecord {
    pub region: String,
    pub metric: f64,
}

/// A record paired with its derived bleaching label.
///
/// The label is computed, never written back into the source dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedRecord {
    #[serde(flatten)]
    pub record: RegionRecord,
    pub bleached: bool,
}

/// An immutable tabular dataset: one header row plus records.
///
/// Rows are kept as raw text so exports can pass every original column
/// through untouched; typed access goes through [`numeric_column`] and
/// [`text_column`].
///
/// [`numeric_column`]: TabularDataset::numeric_column
/// [`text_column`]: TabularDataset::text_column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabularDataset {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TabularDataset {
    /// Position of a named column in the header row.
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|header| header == name)
            .ok_or_else(|| Error::UnknownColumn(name.to_string()))
    }

    /// Project a named column as numbers, failing on the first bad cell.
    pub fn numeric_column(&self, name: &str) -> Result<Vec<f64>> {
        let index = self.column_index(name)?;
        self.rows
            .iter()
            .enumerate()
            .map(|(row, fields)| {
                let raw = fields.get(index).map(String::as_str).unwrap_or("");
                raw.trim().parse::<f64>().map_err(|_| Error::InvalidMetric {
                    row: row + 1,
                    column: name.to_string(),
                    value: raw.to_string(),
                })
            })
            .collect()
    }

    /// Project a named column as text; short rows yield empty strings.
    pub fn text_column(&self, name: &str) -> Result<Vec<String>> {
        let index = self.column_index(name)?;
        Ok(self
            .rows
            .iter()
            .map(|fields| fields.get(index).cloned().unwrap_or_default())
            .collect())
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

/// A quiz question with its answer key.
///
/// Invariants (checked by `quiz::validate_questions`): `answer` is one of
/// `options`, at least two options exist, and ids are unique. Question order
/// in the containing list is significant for report output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub id: u32,
    pub prompt: String,
    pub options: Vec<String>,
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Incrementally filled map from question id to the selected option text.
///
/// A question with no entry counts as unanswered; callers clear or replace
/// entries freely until they decide to score.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuizSubmission {
    answers: HashMap<u32, String>,
}

impl QuizSubmission {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record (or replace) the selected option for a question.
    pub fn select(&mut self, id: u32, option: impl Into<String>) {
        self.answers.insert(id, option.into());
    }

    /// Drop the entry for a question, returning it to unanswered.
    pub fn clear(&mut self, id: u32) {
        self.answers.remove(&id);
    }

    pub fn selected(&self, id: u32) -> Option<&str> {
        self.answers.get(&id).map(String::as_str)
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

/// Outcome of one question after scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionOutcome {
    Correct,
    Incorrect,
    Unanswered,
}

impl QuestionOutcome {
    pub fn is_correct(self) -> bool {
        matches!(self, QuestionOutcome::Correct)
    }
}

/// Per-question scoring detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionScore {
    pub id: u32,
    pub outcome: QuestionOutcome,
    pub selected: Option<String>,
    pub expected: String,
}

/// Full scoring report: per-question outcomes in question order plus totals.
///
/// Unanswered questions count toward `total_questions` but never toward
/// `total_correct`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub per_question: Vec<QuestionScore>,
    pub total_correct: usize,
    pub total_questions: usize,
}

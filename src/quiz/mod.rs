//! Quiz definition loading, validation, and scoring.
//!
//! Scoring is stateless and repeatable; the one-shot "submit" trigger that
//! freezes a submission belongs to the caller, not to this module.

use std::collections::HashSet;
use std::path::Path;

use log::warn;

use crate::core::{
    Error, QuestionOutcome, QuestionScore, QuizQuestion, QuizSubmission, Result, ScoreResult,
};

/// Validate the structural invariants of a quiz definition.
///
/// Every question needs at least two options, its answer key among them,
/// and an id no other question uses.
pub fn validate_questions(questions: &[QuizQuestion]) -> Result<()> {
    if questions.is_empty() {
        return Err(Error::quiz("quiz has no questions"));
    }

    let mut seen = HashSet::new();
    for question in questions {
        if question.options.len() < 2 {
            return Err(Error::quiz(format!(
                "question {} needs at least two options",
                question.id
            )));
        }
        if !question.options.contains(&question.answer) {
            return Err(Error::quiz(format!(
                "question {}: answer {:?} is not among its options",
                question.id, question.answer
            )));
        }
        if !seen.insert(question.id) {
            return Err(Error::quiz(format!("duplicate question id {}", question.id)));
        }
    }
    Ok(())
}

/// Load and validate a quiz definition from a JSON file.
pub fn load_questions(path: &Path) -> Result<Vec<QuizQuestion>> {
    let content = std::fs::read_to_string(path)?;
    let questions: Vec<QuizQuestion> = serde_json::from_str(&content)?;
    validate_questions(&questions)?;
    Ok(questions)
}

/// Load a submission (JSON map of question id to selected option text).
pub fn load_submission(path: &Path) -> Result<QuizSubmission> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Score a submission against the questions, in question order.
///
/// Questions with no submission entry score as unanswered: they count
/// toward `total_questions` but never toward `total_correct`. Submitted ids
/// with no matching question are ignored. Option text compares verbatim,
/// case-sensitively.
pub fn score(questions: &[QuizQuestion], submission: &QuizSubmission) -> ScoreResult {
    let matched = questions
        .iter()
        .filter(|question| submission.selected(question.id).is_some())
        .count();
    let stray = submission.answered_count().saturating_sub(matched);
    if stray > 0 {
        warn!("submission carries {stray} answer(s) for unknown question ids; ignoring");
    }

    let per_question: Vec<QuestionScore> = questions
        .iter()
        .map(|question| {
            let selected = submission.selected(question.id).map(str::to_string);
            let outcome = match selected.as_deref() {
                None => QuestionOutcome::Unanswered,
                Some(choice) if choice == question.answer => QuestionOutcome::Correct,
                Some(_) => QuestionOutcome::Incorrect,
            };
            QuestionScore {
                id: question.id,
                outcome,
                selected,
                expected: question.answer.clone(),
            }
        })
        .collect();

    let total_correct = per_question
        .iter()
        .filter(|entry| entry.outcome.is_correct())
        .count();

    ScoreResult {
        total_correct,
        total_questions: questions.len(),
        per_question,
    }
}

/// The four-question reef quiz bundled with the dashboard.
pub fn builtin_questions() -> Vec<QuizQuestion> {
    vec![
        QuizQuestion {
            id: 1,
            prompt: "What is the state of the coral in the photo?".to_string(),
            options: vec![
                "Healthy".to_string(),
                "Bleached".to_string(),
                "Dead".to_string(),
                "Algae-covered".to_string(),
            ],
            answer: "Healthy".to_string(),
            image: Some(
                "https://cdn.greenpostkorea.co.kr/news/photo/201704/75294_62473_art_1491801757.jpg"
                    .to_string(),
            ),
        },
        QuizQuestion {
            id: 2,
            prompt: "What is the main driver of coral bleaching?".to_string(),
            options: vec![
                "Rising sea temperature".to_string(),
                "Increased algae activity".to_string(),
                "Falling salinity".to_string(),
                "Excess oxygen".to_string(),
            ],
            answer: "Rising sea temperature".to_string(),
            image: None,
        },
        QuizQuestion {
            id: 3,
            prompt: "Which organism lives in symbiosis with healthy coral?".to_string(),
            options: vec![
                "Zooxanthellae algae".to_string(),
                "Jellyfish".to_string(),
                "Sharks".to_string(),
                "Penguins".to_string(),
            ],
            answer: "Zooxanthellae algae".to_string(),
            image: None,
        },
        QuizQuestion {
            id: 4,
            prompt: "Which action helps protect bleached reefs?".to_string(),
            options: vec![
                "Curbing sea temperature rise".to_string(),
                "Coral harvesting".to_string(),
                "Releasing more algae".to_string(),
                "Dredging the seabed".to_string(),
            ],
            answer: "Curbing sea temperature rise".to_string(),
            image: None,
        },
    ]
}

use anyhow::Result;
use log::info;
use std::path::PathBuf;

use crate::io::output::{create_writer, output_target, OutputFormat};
use crate::quiz;

/// Effective `score` settings after flag parsing.
pub struct ScoreArgs {
    pub answers: PathBuf,
    pub quiz: Option<PathBuf>,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
}

pub fn handle_score(args: ScoreArgs) -> Result<()> {
    let questions = match &args.quiz {
        Some(path) => quiz::load_questions(path)?,
        None => quiz::builtin_questions(),
    };
    let submission = quiz::load_submission(&args.answers)?;

    info!(
        "scoring {} answer(s) against {} question(s)",
        submission.answered_count(),
        questions.len()
    );
    let result = quiz::score(&questions, &submission);

    let mut writer = create_writer(args.format, output_target(args.output.as_deref())?);
    writer.write_score(&result)
}

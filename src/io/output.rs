use crate::classify::ClassificationReport;
use crate::core::{QuestionOutcome, ScoreResult, SeriesPoint};
use crate::io::csv;
use colored::*;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

#[derive(Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Csv,
    Terminal,
}

pub trait OutputWriter {
    fn write_series(&mut self, points: &[SeriesPoint]) -> anyhow::Result<()>;
    fn write_classification(&mut self, report: &ClassificationReport) -> anyhow::Result<()>;
    fn write_score(&mut self, result: &ScoreResult) -> anyhow::Result<()>;
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_value<T: serde::Serialize>(&mut self, value: &T) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        Ok(())
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_series(&mut self, points: &[SeriesPoint]) -> anyhow::Result<()> {
        self.write_value(&points)
    }

    fn write_classification(&mut self, report: &ClassificationReport) -> anyhow::Result<()> {
        self.write_value(report)
    }

    fn write_score(&mut self, result: &ScoreResult) -> anyhow::Result<()> {
        self.write_value(result)
    }
}

pub struct CsvWriter<W: Write> {
    writer: W,
}

impl<W: Write> CsvWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for CsvWriter<W> {
    fn write_series(&mut self, points: &[SeriesPoint]) -> anyhow::Result<()> {
        csv::write_row(&mut self.writer, &["date", "region", "index_value"])?;
        for point in points {
            let date = point.date.to_string();
            let value = format!("{:.6}", point.index_value);
            csv::write_row(
                &mut self.writer,
                &[date.as_str(), point.region.as_str(), value.as_str()],
            )?;
        }
        Ok(())
    }

    fn write_classification(&mut self, report: &ClassificationReport) -> anyhow::Result<()> {
        csv::write_classified(
            &mut self.writer,
            &report.dataset,
            &report.labels,
            &report.label_column,
        )?;
        Ok(())
    }

    fn write_score(&mut self, result: &ScoreResult) -> anyhow::Result<()> {
        csv::write_row(&mut self.writer, &["id", "outcome", "selected", "expected"])?;
        for entry in &result.per_question {
            let id = entry.id.to_string();
            let outcome = match entry.outcome {
                QuestionOutcome::Correct => "correct",
                QuestionOutcome::Incorrect => "incorrect",
                QuestionOutcome::Unanswered => "unanswered",
            };
            let selected = entry.selected.as_deref().unwrap_or("");
            csv::write_row(
                &mut self.writer,
                &[id.as_str(), outcome, selected, entry.expected.as_str()],
            )?;
        }
        Ok(())
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_series(&mut self, points: &[SeriesPoint]) -> anyhow::Result<()> {
        writeln!(
            self.writer,
            "{} ({} points)",
            "Bleaching index series".bold(),
            points.len()
        )?;
        writeln!(self.writer)?;
        for point in points {
            writeln!(
                self.writer,
                "  {}  {:<16} {:>7.2}",
                point.date,
                point.region,
                point.index_value
            )?;
        }
        Ok(())
    }

    fn write_classification(&mut self, report: &ClassificationReport) -> anyhow::Result<()> {
        writeln!(
            self.writer,
            "{} — {} on column {:?}",
            "Reef classification".bold(),
            report.rule.describe(),
            report.metric_column
        )?;
        writeln!(self.writer)?;
        for entry in &report.records {
            let status = if entry.bleached {
                "BLEACHED".red().bold()
            } else {
                "healthy".green()
            };
            writeln!(
                self.writer,
                "  {:<24} {:>10.3}  {}",
                entry.record.region, entry.record.metric, status
            )?;
        }
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "{} of {} rows flagged bleached",
            report.bleached_rows(),
            report.total_rows()
        )?;
        Ok(())
    }

    fn write_score(&mut self, result: &ScoreResult) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", "Quiz results".bold())?;
        writeln!(self.writer)?;
        for entry in &result.per_question {
            match entry.outcome {
                QuestionOutcome::Correct => {
                    let selected = entry.selected.as_deref().unwrap_or("");
                    writeln!(
                        self.writer,
                        "  {} question {}: {}",
                        "✓".green(),
                        entry.id,
                        selected
                    )?;
                }
                QuestionOutcome::Incorrect => {
                    let selected = entry.selected.as_deref().unwrap_or("");
                    writeln!(
                        self.writer,
                        "  {} question {}: selected {:?}, expected {:?}",
                        "✗".red(),
                        entry.id,
                        selected,
                        entry.expected
                    )?;
                }
                QuestionOutcome::Unanswered => {
                    writeln!(
                        self.writer,
                        "  {} question {}: no answer",
                        "-".yellow(),
                        entry.id
                    )?;
                }
            }
        }
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "{} {}/{}",
            "Score:".bold(),
            result.total_correct,
            result.total_questions
        )?;
        Ok(())
    }
}

pub fn create_writer(format: OutputFormat, target: Box<dyn Write>) -> Box<dyn OutputWriter> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(target)),
        OutputFormat::Csv => Box::new(CsvWriter::new(target)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(target)),
    }
}

/// Open the output destination: a buffered file when a path is given,
/// stdout otherwise.
pub fn output_target(path: Option<&Path>) -> anyhow::Result<Box<dyn Write>> {
    match path {
        Some(path) => Ok(Box::new(BufWriter::new(File::create(path)?))),
        None => Ok(Box::new(std::io::stdout())),
    }
}

#[cfg(test)]
mod tests {
    use super::{CsvWriter, JsonWriter, OutputWriter, TerminalWriter};
    use crate::core::{QuestionOutcome, QuestionScore, ScoreResult, SeriesPoint};
    use chrono::NaiveDate;

    fn sample_points() -> Vec<SeriesPoint> {
        vec![SeriesPoint {
            date: NaiveDate::from_ymd_opt(2000, 12, 31).unwrap(),
            region: "Okinawa".to_string(),
            index_value: 41.25,
        }]
    }

    fn sample_score() -> ScoreResult {
        ScoreResult {
            per_question: vec![
                QuestionScore {
                    id: 1,
                    outcome: QuestionOutcome::Correct,
                    selected: Some("Healthy".to_string()),
                    expected: "Healthy".to_string(),
                },
                QuestionScore {
                    id: 2,
                    outcome: QuestionOutcome::Unanswered,
                    selected: None,
                    expected: "Rising sea temperature".to_string(),
                },
            ],
            total_correct: 1,
            total_questions: 2,
        }
    }

    #[test]
    fn json_series_output_is_valid_json() {
        let mut out = Vec::new();
        JsonWriter::new(&mut out).write_series(&sample_points()).unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed[0]["region"], "Okinawa");
        assert_eq!(parsed[0]["date"], "2000-12-31");
    }

    #[test]
    fn csv_series_output_has_header_and_rows() {
        let mut out = Vec::new();
        CsvWriter::new(&mut out).write_series(&sample_points()).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("date,region,index_value"));
        assert_eq!(lines.next(), Some("2000-12-31,Okinawa,41.250000"));
    }

    #[test]
    fn csv_score_output_lists_each_question() {
        let mut out = Vec::new();
        CsvWriter::new(&mut out).write_score(&sample_score()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("id,outcome,selected,expected\n"));
        assert!(text.contains("1,correct,Healthy,Healthy"));
        assert!(text.contains("2,unanswered,,Rising sea temperature"));
    }

    #[test]
    fn terminal_score_output_reports_the_total() {
        let mut out = Vec::new();
        TerminalWriter::new(&mut out).write_score(&sample_score()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("1/2"));
        assert!(text.contains("no answer"));
    }
}

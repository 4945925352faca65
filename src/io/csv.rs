//! Line-based CSV reading and the classified-row export.
//!
//! The export format is fixed by the dashboard contract: UTF-8,
//! comma-separated, header row first, every original column passed through
//! in order with the derived label appended as the final column. Fields
//! containing commas, quotes, or newlines are double-quoted with `""`
//! escaping; the reader accepts the same quoting.

use std::borrow::Cow;
use std::io::Write;
use std::path::Path;

use crate::core::{Error, Result, TabularDataset};

/// Parse CSV text into a dataset. The first record is the header row;
/// blank lines are skipped.
pub fn parse(content: &str) -> Result<TabularDataset> {
    let mut records: Vec<Vec<String>> = Vec::new();
    let mut fields: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut line = 1usize;

    let mut chars = content.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' => {
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                }
                '\n' => {
                    line += 1;
                    field.push('\n');
                }
                _ => field.push(c),
            }
        } else {
            match c {
                '"' if field.is_empty() => in_quotes = true,
                ',' => fields.push(std::mem::take(&mut field)),
                '\r' => {} // bare or part of CRLF; the newline itself ends the record
                '\n' => {
                    line += 1;
                    push_record(&mut records, &mut fields, &mut field);
                }
                _ => field.push(c),
            }
        }
    }
    if in_quotes {
        return Err(Error::csv(line, "unterminated quoted field"));
    }
    if !field.is_empty() || !fields.is_empty() {
        push_record(&mut records, &mut fields, &mut field);
    }

    if records.is_empty() {
        return Err(Error::csv(1, "missing header row"));
    }
    let headers = records.remove(0);
    Ok(TabularDataset {
        headers,
        rows: records,
    })
}

fn push_record(records: &mut Vec<Vec<String>>, fields: &mut Vec<String>, field: &mut String) {
    fields.push(std::mem::take(field));
    // A record holding a single empty field is a blank line.
    if fields.len() == 1 && fields[0].is_empty() {
        fields.clear();
        return;
    }
    records.push(std::mem::take(fields));
}

/// Read and parse a CSV file.
pub fn read_dataset(path: &Path) -> Result<TabularDataset> {
    parse(&std::fs::read_to_string(path)?)
}

fn escape(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

/// Write one CSV record, quoting fields as needed.
pub fn write_row<W: Write>(writer: &mut W, fields: &[&str]) -> Result<()> {
    let rendered: Vec<Cow<'_, str>> = fields.iter().map(|field| escape(field)).collect();
    writeln!(writer, "{}", rendered.join(","))?;
    Ok(())
}

/// Export the dataset with the derived label appended as the final column.
pub fn write_classified<W: Write>(
    writer: &mut W,
    dataset: &TabularDataset,
    labels: &[bool],
    label_column: &str,
) -> Result<()> {
    if labels.len() != dataset.rows.len() {
        return Err(Error::configuration(format!(
            "label count {} does not match row count {}",
            labels.len(),
            dataset.rows.len()
        )));
    }

    let mut header: Vec<&str> = dataset.headers.iter().map(String::as_str).collect();
    header.push(label_column);
    write_row(writer, &header)?;

    for (row, label) in dataset.rows.iter().zip(labels) {
        let mut fields: Vec<&str> = row.iter().map(String::as_str).collect();
        fields.push(if *label { "true" } else { "false" });
        write_row(writer, &fields)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{parse, write_classified, write_row};
    use crate::core::Error;
    use indoc::indoc;

    #[test]
    fn parses_header_and_rows() {
        let dataset = parse(indoc! {"
            region,coral_cover
            Okinawa,34.5
            Cairns,12.0
        "})
        .unwrap();
        assert_eq!(dataset.headers, vec!["region", "coral_cover"]);
        assert_eq!(dataset.rows.len(), 2);
        assert_eq!(dataset.rows[1], vec!["Cairns", "12.0"]);
    }

    #[test]
    fn handles_quoted_fields_and_escaped_quotes() {
        let dataset = parse("name,note\n\"Great Barrier, south\",\"said \"\"ok\"\"\"\n").unwrap();
        assert_eq!(dataset.rows[0][0], "Great Barrier, south");
        assert_eq!(dataset.rows[0][1], "said \"ok\"");
    }

    #[test]
    fn handles_newlines_inside_quoted_fields() {
        let dataset = parse("name,note\nHeron,\"line one\nline two\"\n").unwrap();
        assert_eq!(dataset.rows.len(), 1);
        assert_eq!(dataset.rows[0][1], "line one\nline two");
    }

    #[test]
    fn skips_blank_lines_and_crlf_endings() {
        let dataset = parse("a,b\r\n\r\n1,2\r\n").unwrap();
        assert_eq!(dataset.rows, vec![vec!["1", "2"]]);
    }

    #[test]
    fn missing_final_newline_is_fine() {
        let dataset = parse("a,b\n1,2").unwrap();
        assert_eq!(dataset.rows, vec![vec!["1", "2"]]);
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(parse(""), Err(Error::Csv { .. })));
    }

    #[test]
    fn unterminated_quote_is_rejected() {
        assert!(matches!(parse("a,b\n\"oops,2\n"), Err(Error::Csv { .. })));
    }

    #[test]
    fn write_row_quotes_only_when_needed() {
        let mut out = Vec::new();
        write_row(&mut out, &["plain", "with,comma", "with \"quote\""]).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "plain,\"with,comma\",\"with \"\"quote\"\"\"\n"
        );
    }

    #[test]
    fn classified_export_appends_exactly_one_column() {
        let dataset = parse("region,cover\nOkinawa,34.5\nCairns,12.0\n").unwrap();
        let mut out = Vec::new();
        write_classified(&mut out, &dataset, &[false, true], "bleached").unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "region,cover,bleached\nOkinawa,34.5,false\nCairns,12.0,true\n"
        );
    }

    #[test]
    fn label_row_count_mismatch_is_rejected() {
        let dataset = parse("a\n1\n2\n").unwrap();
        let mut out = Vec::new();
        let err = write_classified(&mut out, &dataset, &[true], "bleached").unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn export_round_trips_through_the_parser() {
        let original = parse("site,note,sst\nMoorea,\"calm, clear\",27.1\n").unwrap();
        let mut out = Vec::new();
        write_classified(&mut out, &original, &[false], "bleached").unwrap();

        let reparsed = parse(&String::from_utf8(out).unwrap()).unwrap();
        assert_eq!(reparsed.headers, vec!["site", "note", "sst", "bleached"]);
        assert_eq!(reparsed.rows[0][1], "calm, clear");
        assert_eq!(reparsed.rows[0][3], "false");
    }
}

//! # Roster Export
//!
//! Renders the standby roster for people outside the application: a CSV file
//! for spreadsheets and a printable HTML page that browsers can save as PDF.
//! Dates are written the way French-Canadian users read them
//! (`2025-01-10 16 h 00`), in the rotation time zone.
//!
//! The CSV keeps seconds and the UTC offset (`2025-01-10 16 h 00:00 -05:00`) so
//! that [`parse_csv`] gets back the exact instants, including inside the
//! repeated hour when clocks fall back.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::{
    errors::{StandbyError, StandbyResult},
    models::{assignment::AssignmentWindow, person::Person},
};

pub const CSV_HEADER: [&str; 5] = ["Date de début", "Date de fin", "Personne", "Courriel", "Type"];
pub const DATE_FORMAT: &str = "%Y-%m-%d %H h %M";
pub const CSV_DATE_FORMAT: &str = "%Y-%m-%d %H h %M:%S%.f %:z";

const WEEKLY_LABEL: &str = "Semaine complète";
const DAILY_LABEL: &str = "Jour";
const UNKNOWN_PERSON: &str = "Inconnu";

/// One roster line with the person already looked up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub person_name: String,
    pub email: String,
    pub is_full_week: bool,
}

impl ExportRow {
    fn type_label(&self) -> &'static str {
        if self.is_full_week { WEEKLY_LABEL } else { DAILY_LABEL }
    }
}

/// Joins windows with the directory, keeping the order of `windows`.
pub fn rows(windows: &[AssignmentWindow], persons: &[Person]) -> Vec<ExportRow> {
    let by_id: HashMap<&str, &Person> = persons.iter().map(|p| (p.id.as_str(), p)).collect();
    windows
        .iter()
        .map(|window| {
            let person = by_id.get(window.person_id.as_str());
            ExportRow {
                start: window.start,
                end: window.end,
                person_name: person.map_or_else(|| UNKNOWN_PERSON.to_string(), |p| p.name.clone()),
                email: person.map(|p| p.email.clone()).unwrap_or_default(),
                is_full_week: window.is_full_week,
            }
        })
        .collect()
}

pub fn format_date(at: DateTime<Utc>, tz: Tz) -> String {
    at.with_timezone(&tz).format(DATE_FORMAT).to_string()
}

/// Exact form used in CSV cells.
pub fn format_csv_date(at: DateTime<Utc>, tz: Tz) -> String {
    at.with_timezone(&tz).format(CSV_DATE_FORMAT).to_string()
}

pub fn parse_date(text: &str) -> StandbyResult<DateTime<Utc>> {
    DateTime::parse_from_str(text.trim(), CSV_DATE_FORMAT)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StandbyError::Validation(format!("invalid date '{}': {}", text, e)))
}

pub fn to_csv(rows: &[ExportRow], tz: Tz) -> String {
    let mut out = String::new();
    push_csv_line(&mut out, &CSV_HEADER);
    for row in rows {
        push_csv_line(
            &mut out,
            &[
                &format_csv_date(row.start, tz),
                &format_csv_date(row.end, tz),
                &row.person_name,
                &row.email,
                row.type_label(),
            ],
        );
    }
    out
}

fn push_csv_line(out: &mut String, fields: &[&str]) {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        if field.contains([',', '"', '\n', '\r']) {
            out.push('"');
            out.push_str(&field.replace('"', "\"\""));
            out.push('"');
        } else {
            out.push_str(field);
        }
    }
    out.push_str("\r\n");
}

/// Reads a CSV produced by [`to_csv`] back into rows.
///
/// Only the person name survives the trip, not the id, so the result is meant
/// for comparison and display rather than re-import into the store.
pub fn parse_csv(text: &str) -> StandbyResult<Vec<ExportRow>> {
    let mut records = split_records(text)?.into_iter();
    match records.next() {
        Some(header) if header == CSV_HEADER => {}
        _ => {
            return Err(StandbyError::Validation(
                "missing or unexpected CSV header".to_string(),
            ));
        }
    }

    records
        .enumerate()
        .map(|(line, record)| {
            let [start, end, person_name, email, kind]: [String; 5] =
                record.try_into().map_err(|r: Vec<String>| {
                    StandbyError::Validation(format!(
                        "row {} has {} fields, expected {}",
                        line + 1,
                        r.len(),
                        CSV_HEADER.len()
                    ))
                })?;
            let is_full_week = match kind.as_str() {
                WEEKLY_LABEL => true,
                DAILY_LABEL => false,
                other => {
                    return Err(StandbyError::Validation(format!(
                        "row {} has unknown type '{}'",
                        line + 1,
                        other
                    )));
                }
            };
            Ok(ExportRow {
                start: parse_date(&start)?,
                end: parse_date(&end)?,
                person_name,
                email,
                is_full_week,
            })
        })
        .collect()
}

fn split_records(text: &str) -> StandbyResult<Vec<Vec<String>>> {
    let mut records = Vec::new();
    let mut record = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    field.push('"');
                    chars.next();
                }
                '"' => in_quotes = false,
                _ => field.push(c),
            }
            continue;
        }
        match c {
            '"' => in_quotes = true,
            ',' => record.push(std::mem::take(&mut field)),
            '\r' => {}
            '\n' => {
                record.push(std::mem::take(&mut field));
                records.push(std::mem::take(&mut record));
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(StandbyError::Validation("unterminated quoted field".to_string()));
    }
    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        records.push(record);
    }
    Ok(records)
}

/// Printable roster page. Opening it and printing to PDF gives the paper copy.
pub fn to_html(rows: &[ExportRow], tz: Tz, generated_at: DateTime<Utc>) -> String {
    let mut body = String::new();
    for row in rows {
        body.push_str(&format!(
            "      <tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            escape_html(&format_date(row.start, tz)),
            escape_html(&format_date(row.end, tz)),
            escape_html(&row.person_name),
            escape_html(&row.email),
            row.type_label(),
        ));
    }

    let header: String = CSV_HEADER.iter().map(|h| format!("<th>{}</th>", h)).collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="fr-CA">
<head>
  <meta charset="utf-8">
  <title>Horaire de garde</title>
  <style>
    body {{ font-family: sans-serif; margin: 2rem; }}
    table {{ border-collapse: collapse; width: 100%; }}
    th, td {{ border: 1px solid #999; padding: 4px 8px; text-align: left; }}
    th {{ background: #eee; }}
    @media print {{ body {{ margin: 0; }} }}
  </style>
</head>
<body>
  <h1>Horaire de garde</h1>
  <p>Généré le {generated}</p>
  <table>
    <thead><tr>{header}</tr></thead>
    <tbody>
{body}    </tbody>
  </table>
</body>
</html>
"#,
        generated = escape_html(&format_date(generated_at, tz)),
        header = header,
        body = body,
    )
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

//! Record counts per calendar date

use super::require;
use crate::error::AnalysisError;
use crate::table::Table;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::collections::BTreeMap;

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Counts of records per date of a timestamp column
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DateCounts {
    pub counts: BTreeMap<NaiveDate, usize>,
    /// Non-null cells that could not be read as a timestamp
    pub unparsed: usize,
}

/// Calendar date of a timestamp.
///
/// Accepts RFC 3339 (date taken in the timestamp's own offset), an ISO 8601
/// date-time without offset, or a plain `YYYY-MM-DD` date.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f%:z") {
        return Some(dt.date_naive());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .map(|dt| dt.date())
        .or_else(|| NaiveDate::parse_from_str(text, "%Y-%m-%d").ok())
}

/// Count records per date of `column`. Null cells are skipped.
pub fn records_per_date(table: &Table, column: &str) -> Result<DateCounts, AnalysisError> {
    let idx = require(table, column)?;
    let mut result = DateCounts::default();
    for row in table.rows() {
        let cell = &row[idx];
        if cell.is_null() {
            continue;
        }
        match cell.as_str().and_then(parse_date) {
            Some(date) => *result.counts.entry(date).or_insert(0) += 1,
            None => result.unparsed += 1,
        }
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Value;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_formats() {
        assert_eq!(parse_date("2025-05-21T14:42:43.123456+00:00"), Some(date(2025, 5, 21)));
        assert_eq!(parse_date("2025-05-21 23:30:00+01:00"), Some(date(2025, 5, 21)));
        assert_eq!(parse_date("2025-05-21T01:02:03"), Some(date(2025, 5, 21)));
        assert_eq!(parse_date("2025-05-21 01:02:03.5"), Some(date(2025, 5, 21)));
        assert_eq!(parse_date("2025-05-21"), Some(date(2025, 5, 21)));
        assert_eq!(parse_date("yesterday"), None);
    }

    #[test]
    fn test_records_per_date() {
        let table = Table::from_rows(
            vec!["created"],
            vec![
                vec![Value::from("2025-05-21T10:00:00Z")],
                vec![Value::from("2025-05-21T18:00:00Z")],
                vec![Value::from("2025-05-22T09:00:00Z")],
                vec![Value::Null],
                vec![Value::from("garbage")],
            ],
        );
        let counts = records_per_date(&table, "created").unwrap();
        assert_eq!(counts.counts[&date(2025, 5, 21)], 2);
        assert_eq!(counts.counts[&date(2025, 5, 22)], 1);
        assert_eq!(counts.unparsed, 1);
    }
}

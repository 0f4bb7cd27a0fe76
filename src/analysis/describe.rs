//! Per-column descriptive statistics

use crate::table::{ColumnType, Table, Value};
use std::collections::{HashMap, HashSet};

/// Statistics for one column
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    pub name: String,
    pub column_type: ColumnType,
    pub non_null: usize,
    pub nulls: usize,
    pub stats: ColumnStats,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ColumnStats {
    Numeric {
        mean: f64,
        /// Sample standard deviation, `None` with fewer than two values
        std: Option<f64>,
        min: f64,
        max: f64,
    },
    Categorical {
        unique: usize,
        /// Most frequent value and its count; ties go to the first seen
        top: Option<(String, usize)>,
    },
}

/// Summarise every column of `table`, in column order.
pub fn describe(table: &Table) -> Vec<ColumnSummary> {
    table
        .columns()
        .iter()
        .map(|name| describe_column(table, name))
        .collect()
}

fn describe_column(table: &Table, name: &str) -> ColumnSummary {
    let column_type = table.column_type(name).unwrap_or(ColumnType::Text);
    let present: Vec<&Value> = table
        .column(name)
        .map(|cells| cells.filter(|v| !v.is_null()).collect())
        .unwrap_or_default();
    let non_null = present.len();
    let nulls = table.num_rows() - non_null;

    let stats = match column_type {
        ColumnType::Integer | ColumnType::Float if non_null > 0 => {
            let values: Vec<f64> = present.iter().filter_map(|v| v.as_f64()).collect();
            numeric_stats(&values)
        }
        _ => categorical_stats(&present),
    };

    ColumnSummary {
        name: name.to_string(),
        column_type,
        non_null,
        nulls,
        stats,
    }
}

fn numeric_stats(values: &[f64]) -> ColumnStats {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let std = (values.len() > 1).then(|| {
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
        variance.sqrt()
    });
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    ColumnStats::Numeric {
        mean,
        std,
        min,
        max,
    }
}

fn categorical_stats(values: &[&Value]) -> ColumnStats {
    let counts = count_values(values.iter().copied());
    ColumnStats::Categorical {
        unique: counts.len(),
        top: counts.into_iter().next(),
    }
}

/// Occurrences of each distinct value, most frequent first; ties keep the
/// order values are first seen in.
fn count_values<'a>(values: impl Iterator<Item = &'a Value>) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    for value in values {
        let text = value.to_string();
        match positions.get(&text) {
            Some(&idx) => counts[idx].1 += 1,
            None => {
                positions.insert(text.clone(), counts.len());
                counts.push((text, 1));
            }
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Frequency of every non-null value of `column`, most frequent first.
///
/// Values are compared by their CSV text. Returns `None` if the column does
/// not exist.
pub fn value_counts(table: &Table, column: &str) -> Option<Vec<(String, usize)>> {
    let cells = table.column(column)?;
    Some(count_values(cells.filter(|v| !v.is_null())))
}

/// Number of rows identical to an earlier row.
pub fn duplicate_rows(table: &Table) -> usize {
    let mut seen = HashSet::new();
    table
        .rows()
        .iter()
        .filter(|row| {
            let key: Vec<String> = row.iter().map(|v| format!("{:?}", v)).collect();
            !seen.insert(key)
        })
        .count()
}

//! Contingency tables of two categorical columns

use super::require;
use crate::error::AnalysisError;
use crate::table::Table;
use std::collections::BTreeMap;

/// Frequency of each (row value, column value) pair. Labels are sorted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Crosstab {
    pub row_labels: Vec<String>,
    pub column_labels: Vec<String>,
    pub counts: Vec<Vec<usize>>,
}

impl Crosstab {
    /// Counts divided by their row total.
    pub fn proportions(&self) -> Vec<Vec<f64>> {
        self.counts
            .iter()
            .map(|row| {
                let total: usize = row.iter().sum();
                row.iter()
                    .map(|&c| match total {
                        0 => 0.0,
                        _ => c as f64 / total as f64,
                    })
                    .collect()
            })
            .collect()
    }
}

/// Cross-tabulate `row_column` against `column_column`, skipping rows where
/// either is null.
pub fn crosstab(
    table: &Table,
    row_column: &str,
    column_column: &str,
) -> Result<Crosstab, AnalysisError> {
    let r = require(table, row_column)?;
    let c = require(table, column_column)?;

    let mut pairs: BTreeMap<(String, String), usize> = BTreeMap::new();
    for row in table.rows() {
        if let (Some(rv), Some(cv)) = (row[r].key(), row[c].key()) {
            *pairs.entry((rv, cv)).or_insert(0) += 1;
        }
    }

    let mut row_labels: Vec<String> = pairs.keys().map(|(rv, _)| rv.clone()).collect();
    row_labels.dedup();
    let mut column_labels: Vec<String> = pairs.keys().map(|(_, cv)| cv.clone()).collect();
    column_labels.sort();
    column_labels.dedup();

    let counts = row_labels
        .iter()
        .map(|rv| {
            column_labels
                .iter()
                .map(|cv| pairs.get(&(rv.clone(), cv.clone())).copied().unwrap_or(0))
                .collect()
        })
        .collect();

    Ok(Crosstab {
        row_labels,
        column_labels,
        counts,
    })
}

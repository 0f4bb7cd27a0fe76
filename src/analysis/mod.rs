//! Summary statistics for the merged dataset
//!
//! The non-graphical part of the exploratory pass over
//! `merged_dataset.csv`: shape, a preview of the first rows, per-column
//! statistics and value counts, duplicates, the largest GBP holder, activity
//! per date, numeric correlations and the allocation/currency mix.

mod correlation;
mod crosstab;
mod describe;
mod holdings;
mod timeline;

pub use correlation::{CorrelationMatrix, correlation};
pub use crosstab::{Crosstab, crosstab};
pub use describe::{ColumnStats, ColumnSummary, describe, duplicate_rows, value_counts};
pub use holdings::{TopHolder, top_holder, totals_by_holder};
pub use timeline::{DateCounts, parse_date, records_per_date};

use crate::error::AnalysisError;
use crate::table::{InferenceOptions, Table};

/// Currency the top-holder report is computed for
pub const REPORT_CURRENCY: &str = "GBP";
/// Timestamp column counted per date
pub const CREATED_COLUMN: &str = "created";
/// Rows shown in the preview
pub const HEAD_ROWS: usize = 5;

/// Columns the merged dataset must provide for a summary
pub const REQUIRED_COLUMNS: &[&str] = &[
    "_id",
    "asset_allocation_id",
    "asset_value",
    "asset_currency",
    "asset_allocation",
    "risk_tolerance",
    CREATED_COLUMN,
];

/// Index of `column`, or [`AnalysisError::MissingColumn`].
fn require(table: &Table, column: &str) -> Result<usize, AnalysisError> {
    table
        .column_index(column)
        .ok_or_else(|| AnalysisError::MissingColumn {
            column: column.to_string(),
        })
}

/// Everything `bfds summary` reports
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSummary {
    pub rows: usize,
    pub columns: Vec<String>,
    /// First [`HEAD_ROWS`] rows
    pub head: Table,
    pub column_summaries: Vec<ColumnSummary>,
    /// Value frequencies per column, in column order
    pub value_counts: Vec<(String, Vec<(String, usize)>)>,
    pub duplicate_rows: usize,
    /// Numeric columns, identifiers excluded
    pub numeric_columns: Vec<String>,
    /// Text columns, identifiers and the timestamp excluded
    pub categorical_columns: Vec<String>,
    pub top_holder: Option<TopHolder>,
    pub records_per_date: DateCounts,
    /// Pearson correlation of the numeric columns
    pub correlation: CorrelationMatrix,
    pub allocation_by_currency: Crosstab,
}

/// Compute the summary of a merged dataset.
///
/// # Errors
/// Returns [`AnalysisError::MissingColumn`] if any of [`REQUIRED_COLUMNS`]
/// is absent
pub fn summarize(
    table: &Table,
    options: &InferenceOptions,
) -> Result<DatasetSummary, AnalysisError> {
    for column in REQUIRED_COLUMNS {
        require(table, column)?;
    }

    let column_summaries = describe(table);
    let (numeric_columns, categorical_columns) = column_summaries
        .iter()
        .filter(|s| !options.is_identifier(&s.name) && s.name != CREATED_COLUMN)
        .fold((Vec::new(), Vec::new()), |(mut num, mut cat), s| {
            match s.column_type.is_numeric() {
                true => num.push(s.name.clone()),
                false => cat.push(s.name.clone()),
            }
            (num, cat)
        });

    let counts_per_column = table
        .columns()
        .iter()
        .map(|name| {
            let counts = value_counts(table, name).unwrap_or_default();
            (name.clone(), counts)
        })
        .collect();

    Ok(DatasetSummary {
        rows: table.num_rows(),
        columns: table.columns().to_vec(),
        head: table.head(HEAD_ROWS),
        value_counts: counts_per_column,
        duplicate_rows: duplicate_rows(table),
        correlation: correlation(table, &numeric_columns)?,
        numeric_columns,
        categorical_columns,
        top_holder: top_holder(table, REPORT_CURRENCY)?,
        records_per_date: records_per_date(table, CREATED_COLUMN)?,
        allocation_by_currency: crosstab(table, "asset_allocation", "asset_currency")?,
        column_summaries,
    })
}

//! Relational join of two tables on a key column
//!
//! Follows the usual data-frame merge conventions:
//! - the output holds the left table's columns in order, followed by the right
//!   table's columns without its key column;
//! - non-key columns present on both sides are suffixed (`_x` / `_y` by
//!   default);
//! - a key repeated on either side fans out into one row per matching pair;
//! - keys compare by their text form; null keys match each other unless
//!   [`MergeOptions::null_keys_match`] is off.

use crate::error::{MergeError, Result};
use crate::etl::Transformer;
use crate::table::{Table, Value};
use clap::ValueEnum;
use std::collections::{HashMap, HashSet};

/// Which unmatched rows a join keeps.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum JoinType {
    /// Only rows whose key appears on both sides
    Inner,
    /// Every left row, null-filled where the right side has no match
    Left,
    /// Every right row, null-filled where the left side has no match
    Right,
    /// Every row from both sides
    #[default]
    Outer,
}

impl std::fmt::Display for JoinType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Inner => write!(f, "inner"),
            Self::Left => write!(f, "left"),
            Self::Right => write!(f, "right"),
            Self::Outer => write!(f, "outer"),
        }
    }
}

/// How two tables are joined.
#[derive(Clone, Debug, PartialEq)]
pub struct MergeOptions {
    /// Key column, present in both tables
    pub on: String,
    pub how: JoinType,
    /// Appended to overlapping non-key column names (left, right)
    pub suffixes: (String, String),
    /// Sort output rows by key text, null keys last
    pub sort: bool,
    /// Join null keys with each other. Off gives SQL semantics where a null
    /// key never matches and its row is kept unmatched.
    pub null_keys_match: bool,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            on: "_id".to_string(),
            how: JoinType::Outer,
            suffixes: ("_x".to_string(), "_y".to_string()),
            sort: false,
            null_keys_match: true,
        }
    }
}

/// Join `left` and `right` on `options.on`.
///
/// # Errors
/// Returns [`MergeError::MissingKey`] if either table lacks the key column
/// and [`MergeError::DuplicateColumn`] if suffixing produces a column name
/// that already exists
///
/// # Example
/// ```
/// use behavioural_finance_datasets::table::{Table, Value};
/// use behavioural_finance_datasets::transform::{MergeOptions, merge};
///
/// let people = Table::from_rows(vec!["_id", "trait"], vec![vec![Value::from("1"), Value::from("X")]]);
/// let assets = Table::from_rows(
///     vec!["_id", "asset_value"],
///     vec![
///         vec![Value::from("1"), Value::Integer(100)],
///         vec![Value::from("2"), Value::Integer(50)],
///     ],
/// );
///
/// let merged = merge(&people, &assets, &MergeOptions::default()).unwrap();
/// assert_eq!(merged.columns(), ["_id", "trait", "asset_value"]);
/// assert_eq!(merged.num_rows(), 2);
/// assert_eq!(merged.get(1, "trait"), Some(&Value::Null));
/// ```
pub fn merge(
    left: &Table,
    right: &Table,
    options: &MergeOptions,
) -> std::result::Result<Table, MergeError> {
    let on = options.on.as_str();
    let left_key = left
        .column_index(on)
        .ok_or_else(|| MergeError::MissingKey {
            column: on.to_string(),
            side: "left",
        })?;
    let right_key = right
        .column_index(on)
        .ok_or_else(|| MergeError::MissingKey {
            column: on.to_string(),
            side: "right",
        })?;

    log::debug!(
        "Merging {} left rows with {} right rows on '{}' ({} join)",
        left.num_rows(),
        right.num_rows(),
        on,
        options.how
    );

    let right_columns: Vec<usize> = (0..right.num_columns())
        .filter(|&idx| idx != right_key)
        .collect();
    let columns = merged_columns(left, right, &right_columns, options)?;

    let joiner = RowJoiner {
        left_key,
        left_width: left.num_columns(),
        right_key,
        right_columns: &right_columns,
    };

    let mut rows = Vec::new();
    match options.how {
        JoinType::Inner | JoinType::Left | JoinType::Outer => {
            let index = key_index(right, right_key, options.null_keys_match);
            let mut matched = vec![false; right.num_rows()];

            for l in left.rows() {
                match index.get(&l[left_key].key()) {
                    Some(matches) => {
                        for &idx in matches {
                            matched[idx] = true;
                            rows.push(joiner.join(Some(l), Some(&right.rows()[idx])));
                        }
                    }
                    None if options.how != JoinType::Inner => rows.push(joiner.join(Some(l), None)),
                    None => {}
                }
            }

            if options.how == JoinType::Outer {
                for (r, _) in right.rows().iter().zip(&matched).filter(|(_, m)| !**m) {
                    rows.push(joiner.join(None, Some(r)));
                }
            }
        }
        JoinType::Right => {
            let index = key_index(left, left_key, options.null_keys_match);
            for r in right.rows() {
                match index.get(&r[right_key].key()) {
                    Some(matches) => {
                        for &idx in matches {
                            rows.push(joiner.join(Some(&left.rows()[idx]), Some(r)));
                        }
                    }
                    None => rows.push(joiner.join(None, Some(r))),
                }
            }
        }
    }

    if options.sort {
        rows.sort_by_key(|row| {
            let key = row[left_key].key();
            (key.is_none(), key)
        });
    }

    Ok(Table::from_rows(columns, rows))
}

/// Row positions per key, null keys under `None` unless `with_nulls` is off.
fn key_index(
    table: &Table,
    key: usize,
    with_nulls: bool,
) -> HashMap<Option<String>, Vec<usize>> {
    let mut index: HashMap<Option<String>, Vec<usize>> = HashMap::new();
    for (idx, row) in table.rows().iter().enumerate() {
        let k = row[key].key();
        if k.is_some() || with_nulls {
            index.entry(k).or_default().push(idx);
        }
    }
    index
}

fn merged_columns(
    left: &Table,
    right: &Table,
    right_columns: &[usize],
    options: &MergeOptions,
) -> std::result::Result<Vec<String>, MergeError> {
    let on = options.on.as_str();
    let right_names: HashSet<&str> = right_columns
        .iter()
        .map(|&idx| right.columns()[idx].as_str())
        .collect();
    let overlap: HashSet<&str> = left
        .columns()
        .iter()
        .map(String::as_str)
        .filter(|name| *name != on && right_names.contains(name))
        .collect();

    let (left_suffix, right_suffix) = &options.suffixes;
    let rename = |name: &str, suffix: &str| match overlap.contains(name) {
        true => format!("{}{}", name, suffix),
        false => name.to_string(),
    };

    let columns: Vec<String> = left
        .columns()
        .iter()
        .map(|name| rename(name, left_suffix))
        .chain(
            right_columns
                .iter()
                .map(|&idx| rename(&right.columns()[idx], right_suffix)),
        )
        .collect();

    let mut seen = HashSet::new();
    if let Some(duplicate) = columns.iter().find(|c| !seen.insert(c.as_str())) {
        return Err(MergeError::DuplicateColumn {
            column: duplicate.clone(),
        });
    }

    Ok(columns)
}

struct RowJoiner<'a> {
    left_key: usize,
    left_width: usize,
    right_key: usize,
    right_columns: &'a [usize],
}

impl RowJoiner<'_> {
    /// Build one output row. A missing side contributes nulls, except that a
    /// right-only row still carries its key in the key column.
    fn join(&self, left: Option<&Vec<Value>>, right: Option<&Vec<Value>>) -> Vec<Value> {
        let mut row = Vec::with_capacity(self.left_width + self.right_columns.len());

        match left {
            Some(l) => row.extend(l.iter().cloned()),
            None => {
                row.resize(self.left_width, Value::Null);
                if let Some(r) = right {
                    row[self.left_key] = r[self.right_key].clone();
                }
            }
        }

        match right {
            Some(r) => row.extend(self.right_columns.iter().map(|&idx| r[idx].clone())),
            None => row.resize(self.left_width + self.right_columns.len(), Value::Null),
        }

        row
    }
}

/// Transformer joining `(personality, assets)` into the merged dataset
///
/// # Example
/// ```
/// use behavioural_finance_datasets::etl::Transformer;
/// use behavioural_finance_datasets::table::{Table, Value};
/// use behavioural_finance_datasets::transform::Merger;
///
/// let a = Table::from_rows(vec!["_id"], vec![vec![Value::from("1")]]);
/// let b = Table::from_rows(vec!["_id"], vec![vec![Value::from("2")]]);
///
/// let merged = Merger::default().transform(&(a, b)).unwrap();
/// assert_eq!(merged.num_rows(), 2);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Merger {
    options: MergeOptions,
}

impl Merger {
    pub fn new(options: MergeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &MergeOptions {
        &self.options
    }
}

impl Transformer for Merger {
    type Input = (Table, Table);
    type Output = Table;

    fn transform(&self, input: &Self::Input) -> Result<Self::Output> {
        let (left, right) = input;
        Ok(merge(left, right, &self.options)?)
    }
}

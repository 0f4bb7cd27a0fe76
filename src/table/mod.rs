//! In-memory tables
//!
//! A [`Table`] is an ordered list of uniquely named columns and an ordered
//! list of rows, each row holding exactly one [`Value`] per column. Tables are
//! built from CSV or JSON through [`csv`] and [`json`], which apply the
//! inference rules documented in [`infer`].

pub mod csv;
pub mod infer;
pub mod json;
mod value;

pub use infer::InferenceOptions;
pub use value::{ColumnType, Value};

/// An ordered table with a fixed column schema.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Create an empty table with the given columns.
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Create a table from column names and rows.
    ///
    /// # Panics
    /// Panics if a row does not have one cell per column.
    pub fn from_rows<S: Into<String>>(columns: Vec<S>, rows: Vec<Vec<Value>>) -> Self {
        let mut table = Self::new(columns.into_iter().map(Into::into).collect());
        for row in rows {
            table.push_row(row);
        }
        table
    }

    /// Build a table from `(name, cells)` columns of equal length.
    pub(crate) fn from_columns(columns: Vec<(String, Vec<Value>)>) -> Self {
        let height = columns.first().map(|(_, cells)| cells.len()).unwrap_or(0);
        let (names, cells): (Vec<String>, Vec<Vec<Value>>) = columns.into_iter().unzip();

        let mut iters: Vec<_> = cells.into_iter().map(Vec::into_iter).collect();
        let rows = (0..height)
            .map(|_| {
                iters
                    .iter_mut()
                    .map(|it| it.next().unwrap_or(Value::Null))
                    .collect()
            })
            .collect();

        Self {
            columns: names,
            rows,
        }
    }

    /// Append a row.
    ///
    /// # Panics
    /// Panics if the row does not have one cell per column.
    pub fn push_row(&mut self, row: Vec<Value>) {
        assert_eq!(
            row.len(),
            self.columns.len(),
            "row width does not match table width"
        );
        self.rows.push(row);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// The first `n` rows, or all of them if there are fewer.
    pub fn head(&self, n: usize) -> Table {
        Self {
            columns: self.columns.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }

    pub(crate) fn into_rows(self) -> Vec<Vec<Value>> {
        self.rows
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Iterate the cells of a column, or `None` if the column does not exist.
    pub fn column(&self, name: &str) -> Option<impl Iterator<Item = &Value>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(move |row| &row[idx]))
    }

    /// Cell at `row` in column `name`.
    pub fn get(&self, row: usize, name: &str) -> Option<&Value> {
        let idx = self.column_index(name)?;
        self.rows.get(row).map(|r| &r[idx])
    }

    /// Type of a column, derived from its non-null cells.
    ///
    /// Columns with no non-null cells report [`ColumnType::Text`]. Columns
    /// mixing integers and floats (possible after a merge) report
    /// [`ColumnType::Float`].
    pub fn column_type(&self, name: &str) -> Option<ColumnType> {
        let mut found: Option<ColumnType> = None;
        for ty in self.column(name)?.filter_map(Value::column_type) {
            found = Some(match (found, ty) {
                (None, ty) => ty,
                (Some(a), b) if a == b => a,
                (Some(a), b) if a.is_numeric() && b.is_numeric() => ColumnType::Float,
                _ => return Some(ColumnType::Text),
            });
        }
        Some(found.unwrap_or(ColumnType::Text))
    }
}

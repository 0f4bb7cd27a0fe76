//! Column type inference
//!
//! Inference works a whole column at a time so every cell of a column ends
//! up with the same type:
//!
//! 1. Identifier columns and pinned text columns are always text.
//! 2. Null cells (empty CSV fields, the [`NULL_TOKENS`], JSON `null`) are
//!    ignored when deciding the type.
//! 3. Integer if every remaining cell is an integer, float if every one is a
//!    number, boolean if every one is a boolean, text otherwise.
//!
//! CSV text is parsed to decide; JSON values are taken at their JSON type, so
//! a JSON string holding digits stays text.

use super::{ColumnType, Table, Value};
use serde_json::Value as Json;

/// CSV field contents read as null.
pub const NULL_TOKENS: &[&str] = &[
    "", "NA", "N/A", "n/a", "NaN", "nan", "NULL", "null", "None", "<NA>", "#N/A",
];

/// Columns pinned to text regardless of their content.
pub const DEFAULT_IDENTIFIER_COLUMNS: &[&str] = &["_id", "asset_allocation_id"];

/// Controls how column types are inferred on ingestion.
#[derive(Debug, Clone, PartialEq)]
pub struct InferenceOptions {
    pub identifier_columns: Vec<String>,
    /// Further columns read as text, such as codes with leading zeros
    pub text_columns: Vec<String>,
}

impl Default for InferenceOptions {
    fn default() -> Self {
        Self {
            identifier_columns: DEFAULT_IDENTIFIER_COLUMNS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            text_columns: Vec::new(),
        }
    }
}

impl InferenceOptions {
    pub fn is_identifier(&self, column: &str) -> bool {
        self.identifier_columns.iter().any(|c| c == column)
    }

    /// Whether `column` skips inference and stays text
    pub fn keeps_text(&self, column: &str) -> bool {
        self.is_identifier(column) || self.text_columns.iter().any(|c| c == column)
    }

    /// Pin every text column of `table`, so that re-reading its CSV output
    /// gives back the same column types.
    pub fn with_text_columns_of(mut self, table: &Table) -> Self {
        for column in table.columns() {
            if table.column_type(column) == Some(ColumnType::Text) && !self.keeps_text(column) {
                self.text_columns.push(column.clone());
            }
        }
        self
    }
}

fn is_null_token(field: &str) -> bool {
    NULL_TOKENS.contains(&field)
}

fn parse_bool(field: &str) -> Option<bool> {
    match field {
        "true" | "True" | "TRUE" => Some(true),
        "false" | "False" | "FALSE" => Some(false),
        _ => None,
    }
}

/// Infer typed cells for a column of raw CSV fields.
pub fn infer_csv_column(fields: Vec<String>, as_text: bool) -> Vec<Value> {
    let present = || fields.iter().filter(|f| !is_null_token(f));

    let to_value = |field: String, convert: &dyn Fn(&str) -> Option<Value>| {
        if is_null_token(&field) {
            Value::Null
        } else {
            convert(field.trim()).unwrap_or(Value::Text(field))
        }
    };

    if as_text {
        return fields
            .into_iter()
            .map(|f| to_value(f, &|s| Some(Value::Text(s.to_string()))))
            .collect();
    }

    if present().all(|f| f.trim().parse::<i64>().is_ok()) {
        fields
            .into_iter()
            .map(|f| to_value(f, &|s| s.parse::<i64>().ok().map(Value::Integer)))
            .collect()
    } else if present().all(|f| f.trim().parse::<f64>().is_ok()) {
        fields
            .into_iter()
            .map(|f| to_value(f, &|s| s.parse::<f64>().ok().map(Value::Float)))
            .collect()
    } else if present().all(|f| parse_bool(f.trim()).is_some()) {
        fields
            .into_iter()
            .map(|f| to_value(f, &|s| parse_bool(s).map(Value::Boolean)))
            .collect()
    } else {
        fields
            .into_iter()
            .map(|f| {
                if is_null_token(&f) {
                    Value::Null
                } else {
                    Value::Text(f)
                }
            })
            .collect()
    }
}

fn json_as_text(value: Json) -> Value {
    match value {
        Json::Null => Value::Null,
        Json::String(s) => Value::Text(s),
        Json::Number(n) => Value::Text(n.to_string()),
        Json::Bool(b) => Value::Text(b.to_string()),
        nested => Value::Text(nested.to_string()),
    }
}

/// Infer typed cells for a column of JSON values.
pub fn infer_json_column(values: Vec<Json>, as_text: bool) -> Vec<Value> {
    let present = || values.iter().filter(|v| !v.is_null());

    if as_text {
        return values.into_iter().map(json_as_text).collect();
    }

    if present().all(|v| v.is_i64()) {
        values
            .into_iter()
            .map(|v| v.as_i64().map(Value::Integer).unwrap_or(Value::Null))
            .collect()
    } else if present().all(|v| v.is_number()) {
        values
            .into_iter()
            .map(|v| v.as_f64().map(Value::Float).unwrap_or(Value::Null))
            .collect()
    } else if present().all(|v| v.is_boolean()) {
        values
            .into_iter()
            .map(|v| v.as_bool().map(Value::Boolean).unwrap_or(Value::Null))
            .collect()
    } else {
        values.into_iter().map(json_as_text).collect()
    }
}

//! JSON record codec for tables

use super::infer::{InferenceOptions, infer_json_column};
use super::Table;
use crate::error::ParseError;
use serde_json::Value as Json;

/// Parse a JSON array of flat objects into a table.
///
/// Columns are the union of all object keys in the order they are first seen.
/// Keys missing from an object become null cells.
pub fn read_json_records(
    body: &[u8],
    origin: &str,
    options: &InferenceOptions,
) -> Result<Table, ParseError> {
    let document: Json = serde_json::from_slice(body).map_err(|source| ParseError::Json {
        origin: origin.to_string(),
        source,
    })?;
    records_to_table(document, origin, options)
}

/// Convert an already parsed JSON document into a table.
pub fn records_to_table(
    document: Json,
    origin: &str,
    options: &InferenceOptions,
) -> Result<Table, ParseError> {
    let shape_error = |reason: String| ParseError::JsonShape {
        origin: origin.to_string(),
        reason,
    };

    let records = match document {
        Json::Array(records) => records,
        other => return Err(shape_error(format!("found {}", json_kind(&other)))),
    };

    let mut objects = Vec::with_capacity(records.len());
    for (idx, record) in records.into_iter().enumerate() {
        match record {
            Json::Object(map) => objects.push(map),
            other => {
                return Err(shape_error(format!(
                    "element {} is {}",
                    idx,
                    json_kind(&other)
                )));
            }
        }
    }

    let mut names: Vec<String> = Vec::new();
    for object in &objects {
        for key in object.keys() {
            if !names.contains(key) {
                names.push(key.clone());
            }
        }
    }

    let mut raw: Vec<Vec<Json>> = vec![Vec::with_capacity(objects.len()); names.len()];
    for mut object in objects {
        for (name, column) in names.iter().zip(raw.iter_mut()) {
            column.push(object.remove(name).unwrap_or(Json::Null));
        }
    }

    let columns = names
        .into_iter()
        .zip(raw)
        .map(|(name, values)| {
            let cells = infer_json_column(values, options.keeps_text(&name));
            (name, cells)
        })
        .collect();

    Ok(Table::from_columns(columns))
}

fn json_kind(value: &Json) -> &'static str {
    match value {
        Json::Null => "null",
        Json::Bool(_) => "a boolean",
        Json::Number(_) => "a number",
        Json::String(_) => "a string",
        Json::Array(_) => "an array",
        Json::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{ColumnType, Value};

    fn parse(input: &str) -> Result<Table, ParseError> {
        read_json_records(input.as_bytes(), "assets", &InferenceOptions::default())
    }

    #[test]
    fn test_union_of_keys_in_first_seen_order() {
        let table = parse(
            r#"[
                {"_id": "1", "asset_value": 100, "asset_currency": "GBP"},
                {"_id": "2", "asset_value": 50.5, "risk_tolerance": 3}
            ]"#,
        )
        .unwrap();

        assert_eq!(
            table.columns(),
            ["_id", "asset_value", "asset_currency", "risk_tolerance"]
        );
        assert_eq!(table.get(1, "asset_currency"), Some(&Value::Null));
        assert_eq!(table.get(0, "risk_tolerance"), Some(&Value::Null));
        assert_eq!(table.get(0, "asset_value"), Some(&Value::Float(100.0)));
        assert_eq!(table.column_type("risk_tolerance"), Some(ColumnType::Integer));
    }

    #[test]
    fn test_numeric_identifiers_are_text() {
        let table = parse(r#"[{"_id": 17, "asset_allocation_id": 4}]"#).unwrap();
        assert_eq!(table.get(0, "_id"), Some(&Value::from("17")));
        assert_eq!(table.get(0, "asset_allocation_id"), Some(&Value::from("4")));
    }

    #[test]
    fn test_empty_array() {
        let table = parse("[]").unwrap();
        assert_eq!(table.num_columns(), 0);
        assert!(table.is_empty());
    }

    #[test]
    fn test_not_an_array() {
        let err = parse(r#"{"message": "unauthorized"}"#).unwrap_err();
        assert!(matches!(err, ParseError::JsonShape { .. }));
        assert!(err.to_string().contains("found an object"));
    }

    #[test]
    fn test_element_not_an_object() {
        let err = parse(r#"[{"_id": "1"}, 2]"#).unwrap_err();
        assert!(err.to_string().contains("element 1 is a number"));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(parse("[{"), Err(ParseError::Json { .. })));
    }
}

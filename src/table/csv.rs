//! CSV codec for tables

use super::infer::{InferenceOptions, infer_csv_column};
use super::Table;
use crate::error::ParseError;
use csv::{ReaderBuilder, Terminator, WriterBuilder};
use std::collections::HashSet;
use std::io::{Read, Write};

/// Parse comma-separated data with a header row into a table.
///
/// `origin` names the source (URL or path) in error messages. Every record
/// must have as many fields as the header.
pub fn read_csv<R: Read>(
    reader: R,
    origin: &str,
    options: &InferenceOptions,
) -> Result<Table, ParseError> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|source| ParseError::Csv {
            origin: origin.to_string(),
            source,
        })?
        .clone();

    if headers.is_empty() {
        return Err(ParseError::MissingHeader {
            origin: origin.to_string(),
        });
    }

    let mut seen = HashSet::new();
    let names: Vec<String> = headers
        .iter()
        .enumerate()
        .map(|(idx, name)| match idx {
            0 => name.trim_start_matches('\u{feff}').to_string(),
            _ => name.to_string(),
        })
        .collect();
    for name in &names {
        if !seen.insert(name.as_str()) {
            return Err(ParseError::DuplicateColumn {
                origin: origin.to_string(),
                column: name.clone(),
            });
        }
    }

    let mut fields: Vec<Vec<String>> = vec![Vec::new(); names.len()];
    for record in reader.records() {
        let record = record.map_err(|source| ParseError::Csv {
            origin: origin.to_string(),
            source,
        })?;
        for (column, field) in fields.iter_mut().zip(record.iter()) {
            column.push(field.to_string());
        }
    }

    let columns = names
        .into_iter()
        .zip(fields)
        .map(|(name, raw)| {
            let cells = infer_csv_column(raw, options.keeps_text(&name));
            (name, cells)
        })
        .collect();

    Ok(Table::from_columns(columns))
}

/// Write a table as comma-separated data with a header row and no index.
pub fn write_csv<W: Write>(writer: W, table: &Table) -> Result<(), csv::Error> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);

    if table.num_columns() > 0 {
        writer.write_record(table.columns())?;
        for row in table.rows() {
            writer.write_record(row.iter().map(|v| v.to_string()))?;
        }
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{ColumnType, Value};

    fn parse(input: &str) -> Result<Table, ParseError> {
        read_csv(input.as_bytes(), "test.csv", &InferenceOptions::default())
    }

    #[test]
    fn test_read_preserves_column_order() {
        let table = parse("_id,zeta,alpha\n1,2,x\n2,3,y\n").unwrap();
        assert_eq!(table.columns(), ["_id", "zeta", "alpha"]);
        assert_eq!(table.num_rows(), 2);
        assert_eq!(table.get(0, "_id"), Some(&Value::from("1")));
        assert_eq!(table.column_type("zeta"), Some(ColumnType::Integer));
        assert_eq!(table.column_type("alpha"), Some(ColumnType::Text));
    }

    #[test]
    fn test_read_strips_bom() {
        let table = parse("\u{feff}_id,a\nx,1\n").unwrap();
        assert_eq!(table.columns()[0], "_id");
    }

    #[test]
    fn test_read_quoted_fields() {
        let table = parse("_id,comment\n1,\"hello, world\"\n").unwrap();
        assert_eq!(table.get(0, "comment"), Some(&Value::from("hello, world")));
    }

    #[test]
    fn test_empty_body_is_missing_header() {
        assert!(matches!(parse(""), Err(ParseError::MissingHeader { .. })));
    }

    #[test]
    fn test_inconsistent_field_count() {
        let err = parse("a,b\n1,2\n3\n").unwrap_err();
        assert!(matches!(err, ParseError::Csv { .. }));
    }

    #[test]
    fn test_duplicate_column() {
        let err = parse("a,a\n1,2\n").unwrap_err();
        assert!(matches!(err, ParseError::DuplicateColumn { ref column, .. } if column == "a"));
    }

    #[test]
    fn test_write_nulls_and_floats() {
        let table = Table::from_rows(
            vec!["_id", "asset_value", "trait"],
            vec![
                vec![Value::from("1"), Value::Float(100.0), Value::from("X")],
                vec![Value::from("2"), Value::Float(50.5), Value::Null],
            ],
        );
        let mut out = Vec::new();
        write_csv(&mut out, &table).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "_id,asset_value,trait\n1,100.0,X\n2,50.5,\n"
        );
    }

    #[test]
    fn test_round_trip_keeps_shape_and_types() {
        let input = "_id,score,ratio,flag,name\n1,5,0.5,True,a\n2,,1.0,False,\n";
        let table = parse(input).unwrap();

        let mut out = Vec::new();
        write_csv(&mut out, &table).unwrap();
        let reread = parse(std::str::from_utf8(&out).unwrap()).unwrap();

        assert_eq!(reread.columns(), table.columns());
        assert_eq!(reread.num_rows(), table.num_rows());
        for column in table.columns() {
            assert_eq!(reread.column_type(column), table.column_type(column));
        }
        assert_eq!(reread, table);
    }
}

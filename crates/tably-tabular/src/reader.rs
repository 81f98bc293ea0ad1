use std::collections::BTreeSet;
use std::fs::File;
use std::path::Path;

use tably_codec::{ColumnType, Value};
use tracing::{debug, warn};

use crate::cell::parse_cell;
use crate::error::{TabularError, TabularResult};
use crate::schema::Schema;
use crate::table::{Column, Table};

/// Untyped CSV contents, column-major.
pub(crate) struct RawCsv {
    pub headers: Vec<String>,
    pub columns: Vec<Vec<String>>,
}

/// Read `path` as CSV with a header row.
pub(crate) fn read_raw(path: &Path) -> TabularResult<RawCsv> {
    let file = File::open(path).map_err(|source| TabularError::SourceUnreadable {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(file);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| TabularError::from_csv(path, e))?
        .iter()
        .map(str::to_string)
        .collect();
    if headers.is_empty() {
        return Err(TabularError::SourceUnparsable {
            path: path.to_path_buf(),
            reason: "missing header row".into(),
        });
    }
    let mut seen = BTreeSet::new();
    for name in &headers {
        if !seen.insert(name.as_str()) {
            return Err(TabularError::SourceUnparsable {
                path: path.to_path_buf(),
                reason: format!("duplicate column name {name:?}"),
            });
        }
    }

    let mut columns = vec![Vec::new(); headers.len()];
    for record in reader.records() {
        let record = record.map_err(|e| TabularError::from_csv(path, e))?;
        for (column, cell) in columns.iter_mut().zip(record.iter()) {
            column.push(cell.to_string());
        }
    }
    Ok(RawCsv { headers, columns })
}

/// Read `path` into a typed [`Table`] under `schema`.
///
/// Columns the schema does not mention are read as `utf8`. Cells that do not
/// parse as their declared type become null; each affected column is
/// reported once with a `warn!` carrying the count.
pub fn read_csv(path: &Path, schema: &Schema) -> TabularResult<Table> {
    let raw = read_raw(path)?;
    let mut columns = Vec::with_capacity(raw.headers.len());

    for (name, cells) in raw.headers.into_iter().zip(raw.columns) {
        let column_type = schema.get(&name).unwrap_or(ColumnType::Utf8);
        let mut unparsable = 0usize;
        let values: Vec<Value> = cells
            .iter()
            .map(|cell| {
                parse_cell(cell, column_type).unwrap_or_else(|| {
                    unparsable += 1;
                    Value::Null
                })
            })
            .collect();
        if unparsable > 0 {
            warn!(
                path = %path.display(),
                column = %name,
                %column_type,
                count = unparsable,
                "cells did not parse as declared type; stored as null"
            );
        }
        columns.push(Column::new(name, column_type, values));
    }

    let table = Table::new(columns)?;
    debug!(path = %path.display(), rows = table.row_count(), columns = table.columns().len(), "read csv");
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn reads_under_schema() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "t.csv", "id,name,score\n1,ann,1.5\n2,,\n");
        let schema: Schema = [
            ("id", ColumnType::Int64),
            ("name", ColumnType::Utf8),
            ("score", ColumnType::Float64),
        ]
        .into_iter()
        .collect();
        let table = read_csv(&path, &schema).unwrap();
        assert_eq!(table.column_order(), vec!["id", "name", "score"]);
        assert_eq!(
            table.column("id").unwrap().values,
            vec![Value::Int64(1), Value::Int64(2)]
        );
        assert_eq!(
            table.column("name").unwrap().values,
            vec![Value::from("ann"), Value::Null]
        );
        assert_eq!(
            table.column("score").unwrap().values,
            vec![Value::Float64(1.5), Value::Null]
        );
    }

    #[test]
    fn unparsable_cells_become_null() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "t.csv", "n\n1\noops\n3\n");
        let schema: Schema = [("n", ColumnType::Int64)].into_iter().collect();
        let table = read_csv(&path, &schema).unwrap();
        assert_eq!(
            table.column("n").unwrap().values,
            vec![Value::Int64(1), Value::Null, Value::Int64(3)]
        );
    }

    #[test]
    fn unknown_columns_read_as_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "t.csv", "a,b\n1,2\n");
        let schema: Schema = [("a", ColumnType::Int64)].into_iter().collect();
        let table = read_csv(&path, &schema).unwrap();
        assert_eq!(table.column("b").unwrap().column_type, ColumnType::Utf8);
        assert_eq!(table.column("b").unwrap().values, vec![Value::from("2")]);
    }

    #[test]
    fn missing_file_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_csv(&dir.path().join("absent.csv"), &Schema::new()).unwrap_err();
        assert!(matches!(err, TabularError::SourceUnreadable { .. }));
    }

    #[test]
    fn ragged_rows_are_unparsable() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "t.csv", "a,b\n1,2\n3\n");
        let err = read_csv(&path, &Schema::new()).unwrap_err();
        assert!(matches!(err, TabularError::SourceUnparsable { .. }));
    }

    #[test]
    fn empty_file_is_unparsable() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "t.csv", "");
        let err = read_csv(&path, &Schema::new()).unwrap_err();
        assert!(matches!(err, TabularError::SourceUnparsable { .. }));
    }

    #[test]
    fn duplicate_headers_are_unparsable() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "t.csv", "a,a\n1,2\n");
        let err = read_csv(&path, &Schema::new()).unwrap_err();
        assert!(matches!(err, TabularError::SourceUnparsable { .. }));
    }

    #[test]
    fn header_only_has_zero_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "t.csv", "a,b\n");
        let table = read_csv(&path, &Schema::new()).unwrap();
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.column_order(), vec!["a", "b"]);
    }
}

use std::path::Path;

use tably_codec::ColumnType;
use tracing::debug;

use crate::cell::parse_bool;
use crate::error::TabularResult;
use crate::reader::read_raw;
use crate::schema::Schema;

/// Infer a schema from the contents of `path`.
///
/// For each column, over its non-empty cells: all parse as `i64` gives
/// `int64`; else all parse as `f64` gives `float64`; else all are
/// `true`/`false` in any case gives `boolean`; otherwise `utf8`. A column
/// with no non-empty cells is `utf8`.
pub fn infer_schema(path: &Path) -> TabularResult<Schema> {
    let raw = read_raw(path)?;
    let schema: Schema = raw
        .headers
        .into_iter()
        .zip(raw.columns.iter())
        .map(|(name, cells)| (name, infer_column(cells)))
        .collect();
    debug!(path = %path.display(), columns = schema.len(), "inferred schema");
    Ok(schema)
}

fn infer_column(cells: &[String]) -> ColumnType {
    let mut present = cells.iter().map(String::as_str).filter(|c| !c.is_empty()).peekable();
    if present.peek().is_none() {
        return ColumnType::Utf8;
    }
    let present: Vec<&str> = present.collect();
    if present.iter().all(|c| c.parse::<i64>().is_ok()) {
        ColumnType::Int64
    } else if present.iter().all(|c| c.parse::<f64>().is_ok()) {
        ColumnType::Float64
    } else if present.iter().all(|c| parse_bool(c).is_some()) {
        ColumnType::Boolean
    } else {
        ColumnType::Utf8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn promotion_order() {
        assert_eq!(infer_column(&cells(&["1", "-2", ""])), ColumnType::Int64);
        assert_eq!(infer_column(&cells(&["1", "2.5"])), ColumnType::Float64);
        assert_eq!(infer_column(&cells(&["True", "false", ""])), ColumnType::Boolean);
        assert_eq!(infer_column(&cells(&["1", "true"])), ColumnType::Utf8);
        assert_eq!(infer_column(&cells(&["a", "1"])), ColumnType::Utf8);
    }

    #[test]
    fn empty_column_is_utf8() {
        assert_eq!(infer_column(&cells(&["", ""])), ColumnType::Utf8);
        assert_eq!(infer_column(&[]), ColumnType::Utf8);
    }

    #[test]
    fn infers_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("people.csv");
        std::fs::write(&path, "id,name,height,active\n1,ann,1.7,true\n2,bob,,FALSE\n").unwrap();
        let schema = infer_schema(&path).unwrap();
        assert_eq!(schema.get("id"), Some(ColumnType::Int64));
        assert_eq!(schema.get("name"), Some(ColumnType::Utf8));
        assert_eq!(schema.get("height"), Some(ColumnType::Float64));
        assert_eq!(schema.get("active"), Some(ColumnType::Boolean));
    }
}

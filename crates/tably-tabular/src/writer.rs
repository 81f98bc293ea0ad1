use std::path::Path;

use crate::cell::format_value;
use crate::error::{TabularError, TabularResult};
use crate::table::Table;

/// Write `table` to `path` as CSV, header first, columns in header order.
///
/// Overwrites any existing file. The parent directory must exist.
pub fn write_csv(table: &Table, path: &Path) -> TabularResult<()> {
    let fail = |e: csv::Error| TabularError::WriteFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    };
    let mut writer = csv::Writer::from_path(path).map_err(fail)?;
    writer.write_record(table.columns().iter().map(|c| c.name.as_str())).map_err(fail)?;
    for row in 0..table.row_count() {
        writer
            .write_record(table.columns().iter().map(|c| format_value(&c.values[row])))
            .map_err(fail)?;
    }
    writer.flush().map_err(|e| TabularError::WriteFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    Ok(())
}

use tably_codec::{ColumnType, Value};

/// Parse a raw CSV cell as `column_type`.
///
/// Empty cells are null. Returns `None` when the cell is non-empty but does
/// not parse as the declared type.
pub fn parse_cell(raw: &str, column_type: ColumnType) -> Option<Value> {
    if raw.is_empty() {
        return Some(Value::Null);
    }
    match column_type {
        ColumnType::Utf8 => Some(Value::Utf8(raw.to_string())),
        ColumnType::Int64 => raw.parse().ok().map(Value::Int64),
        ColumnType::Float64 => raw.parse().ok().map(Value::Float64),
        ColumnType::Boolean => parse_bool(raw).map(Value::Boolean),
    }
}

/// `true` / `false` in any letter case.
pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    if raw.eq_ignore_ascii_case("true") {
        Some(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Render a value as a CSV cell. Null renders as the empty string.
///
/// Finite floats always carry a decimal point or exponent so they read back
/// as `float64` rather than `int64`.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Utf8(s) => s.clone(),
        Value::Int64(v) => v.to_string(),
        Value::Float64(v) => {
            let mut s = v.to_string();
            if v.is_finite() && !s.contains(['.', 'e', 'E']) {
                s.push_str(".0");
            }
            s
        }
        Value::Boolean(v) => v.to_string(),
    }
}

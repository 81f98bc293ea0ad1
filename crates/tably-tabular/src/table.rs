use tably_codec::{ColumnType, Value};

use crate::error::{TabularError, TabularResult};

/// One named, typed column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub column_type: ColumnType,
    pub values: Vec<Value>,
}

impl Column {
    pub fn new(name: impl Into<String>, column_type: ColumnType, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            column_type,
            values,
        }
    }
}

/// Column-major table.
///
/// `columns` is in source header order, which is also `column_order`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    /// Build a table, checking that every column has the same row count.
    pub fn new(columns: Vec<Column>) -> TabularResult<Self> {
        if let Some(first) = columns.first() {
            let expected = first.values.len();
            for column in &columns {
                if column.values.len() != expected {
                    return Err(TabularError::RaggedColumns {
                        column: column.name.clone(),
                        expected,
                        actual: column.values.len(),
                    });
                }
            }
        }
        Ok(Self { columns })
    }

    /// Column names in header order.
    pub fn column_order(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Columns sorted by name.
    pub fn sorted_columns(&self) -> Vec<&Column> {
        let mut sorted: Vec<&Column> = self.columns.iter().collect();
        sorted.sort_by(|a, b| a.name.cmp(&b.name));
        sorted
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, |c| c.values.len())
    }
}

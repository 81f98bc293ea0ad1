//! Tabular data for tably.
//!
//! Reads CSV sources into typed, column-major [`Table`]s under a [`Schema`],
//! infers schemas from raw sources, and writes tables back out as CSV.
//!
//! # Key Types
//!
//! - [`Schema`] -- column name to [`ColumnType`](tably_codec::ColumnType)
//! - [`Table`] -- columns in source order plus the original header order
//! - [`Column`] -- one named, typed run of nullable values
//!
//! Parsing under a schema is lenient: an empty cell is null and a cell that
//! does not parse as its declared type becomes null and is reported with
//! `tracing::warn!`.

pub mod cell;
pub mod error;
pub mod infer;
pub mod reader;
pub mod schema;
pub mod table;
pub mod writer;

pub use cell::{format_value, parse_cell};
pub use error::{TabularError, TabularResult};
pub use infer::infer_schema;
pub use reader::read_csv;
pub use schema::Schema;
pub use table::{Column, Table};
pub use writer::write_csv;

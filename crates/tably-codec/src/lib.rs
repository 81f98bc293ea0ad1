//! Canonical value encoding for tably column chunks.
//!
//! A [`Chunk`] is a column name, a [`ColumnType`] and an ordered run of
//! nullable [`Value`]s. [`Chunk::encode`] turns it into bytes that depend
//! only on that logical input: no locale, no float print precision, no map
//! iteration order. [`Chunk::decode`] is the exact inverse.
//!
//! # Wire layout
//!
//! ```text
//! name ‖ DELIM ‖ type_tag ‖ (DELIM ‖ value)*
//! ```
//!
//! | value     | bytes                                   |
//! |-----------|-----------------------------------------|
//! | null      | [`NULL_SENTINEL`]                       |
//! | utf8      | UTF-8 bytes                             |
//! | int64     | 8-byte big-endian two's complement      |
//! | float64   | 8-byte big-endian IEEE-754 bit pattern  |
//! | boolean   | `0x00` or `0x01`                        |
//!
//! Every payload (name and tag included) is byte-stuffed so that
//! [`DELIMITER`] and [`ESCAPE`] never appear raw inside a field; the
//! sentinel is an escape sequence the stuffing never produces.

pub mod chunk;
pub mod error;
pub mod value;

pub use chunk::{Chunk, DELIMITER, ESCAPE, NULL_SENTINEL};
pub use error::{CodecError, CodecResult};
pub use value::{ColumnType, Value};

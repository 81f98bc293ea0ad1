//! Merkle recipe tree for tably.
//!
//! A CSV source is decomposed into a four-level tree of content-addressed
//! objects:
//!
//! ```text
//! directory recipe  { "files": { path: file_recipe } }
//!   file recipe     { "type": "columnar", "column_order": [..], "columns": [{name, recipe}] }
//!     column recipe { "chunks": [chunk, ..] }
//!       chunk       canonical bytes of up to `chunk_rows` values
//! ```
//!
//! Recipes are JSON with sorted keys, so equal logical content always hashes
//! to the same ID. Unchanged row ranges produce the same chunk hashes and are
//! stored once.

pub mod build;
pub mod error;
pub mod materialize;
pub mod model;
pub mod read;

pub use build::{build_file_recipe, store_table, DEFAULT_CHUNK_ROWS};
pub use error::{RecipeError, RecipeResult};
pub use materialize::{materialize, MaterializeReport, SkippedFile};
pub use model::{canonical_json, ColumnEntry, ColumnRecipe, DirectoryRecipe, FileRecipe, RecipeKind};
pub use read::{
    load_column_recipe, load_directory_recipe, load_file_recipe, read_table,
    write_directory_recipe,
};

use std::path::Path;

use tably_codec::Chunk;
use tably_schema::SchemaCache;
use tably_store::ObjectStore;
use tably_tabular::{read_csv, Table};
use tably_types::{Namespace, ObjectId};
use tracing::{debug, info};

use crate::error::{RecipeError, RecipeResult};
use crate::model::{canonical_json, ColumnEntry, ColumnRecipe, FileRecipe, RecipeKind};

/// Rows per chunk unless configured otherwise.
pub const DEFAULT_CHUNK_ROWS: usize = 10_000;

/// Ingest `source` as the tracked path `key` and return its file recipe hash.
///
/// The schema is resolved through `schemas` (inferred and pinned on first
/// sight of `key`), the source is parsed under it, and every column is
/// chunked and stored.
pub fn build_file_recipe(
    store: &dyn ObjectStore,
    schemas: &mut SchemaCache,
    key: &str,
    source: &Path,
    chunk_rows: usize,
) -> RecipeResult<ObjectId> {
    let schema = schemas.resolve(key, source)?;
    let table = read_csv(source, &schema)?;
    let id = store_table(store, &table, chunk_rows)?;
    info!(
        key,
        recipe = %id.short_hex(),
        rows = table.row_count(),
        columns = table.columns().len(),
        "built file recipe"
    );
    Ok(id)
}

/// Store an already-typed table and return its file recipe hash.
///
/// Columns are processed in name order. Each column is cut into consecutive
/// runs of `chunk_rows` values; a table with no rows has no chunks.
pub fn store_table(
    store: &dyn ObjectStore,
    table: &Table,
    chunk_rows: usize,
) -> RecipeResult<ObjectId> {
    let chunk_rows = chunk_rows.max(1);
    let mut columns = Vec::with_capacity(table.columns().len());

    for column in table.sorted_columns() {
        let mut chunks = Vec::new();
        for run in column.values.chunks(chunk_rows) {
            let chunk = Chunk::new(column.name.clone(), column.column_type, run.to_vec());
            let bytes = chunk.encode().map_err(|source| RecipeError::Codec {
                chunk: format!("{}[{}]", column.name, chunks.len()),
                source,
            })?;
            chunks.push(store.put(&bytes, Namespace::Chunk)?);
        }
        debug!(column = %column.name, chunks = chunks.len(), "stored column");

        let recipe = store.put(&canonical_json(&ColumnRecipe { chunks })?, Namespace::Recipe)?;
        columns.push(ColumnEntry {
            name: column.name.clone(),
            recipe,
        });
    }

    let file = FileRecipe {
        kind: RecipeKind::Columnar,
        column_order: table.column_order(),
        columns,
    };
    Ok(store.put(&canonical_json(&file)?, Namespace::Recipe)?)
}

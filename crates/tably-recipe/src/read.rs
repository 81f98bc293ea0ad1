use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use tably_codec::{Chunk, ColumnType, Value};
use tably_store::ObjectStore;
use tably_tabular::{Column, Table};
use tably_types::{Namespace, ObjectId};

use crate::error::{RecipeError, RecipeResult};
use crate::model::{canonical_json, ColumnRecipe, DirectoryRecipe, FileRecipe};

fn load_recipe<T: DeserializeOwned>(store: &dyn ObjectStore, id: &ObjectId) -> RecipeResult<T> {
    let bytes = store.get(id, Namespace::Recipe)?;
    serde_json::from_slice(&bytes).map_err(|e| RecipeError::Corrupt {
        id: *id,
        reason: e.to_string(),
    })
}

pub fn load_directory_recipe(
    store: &dyn ObjectStore,
    id: &ObjectId,
) -> RecipeResult<DirectoryRecipe> {
    load_recipe(store, id)
}

pub fn load_file_recipe(store: &dyn ObjectStore, id: &ObjectId) -> RecipeResult<FileRecipe> {
    load_recipe(store, id)
}

pub fn load_column_recipe(store: &dyn ObjectStore, id: &ObjectId) -> RecipeResult<ColumnRecipe> {
    load_recipe(store, id)
}

/// Store a directory recipe for `files` and return its hash.
pub fn write_directory_recipe(
    store: &dyn ObjectStore,
    files: &BTreeMap<String, ObjectId>,
) -> RecipeResult<ObjectId> {
    let recipe = DirectoryRecipe {
        files: files.clone(),
    };
    Ok(store.put(&canonical_json(&recipe)?, Namespace::Recipe)?)
}

/// Reassemble the table behind a file recipe, columns in original order.
pub fn read_table(store: &dyn ObjectStore, file_recipe: &ObjectId) -> RecipeResult<Table> {
    let recipe = load_file_recipe(store, file_recipe)?;
    let mut columns = Vec::with_capacity(recipe.column_order.len());

    for name in &recipe.column_order {
        let column_id = recipe.column(name).ok_or_else(|| RecipeError::Corrupt {
            id: *file_recipe,
            reason: format!("column {name:?} listed in column_order has no recipe"),
        })?;
        columns.push(read_column(store, name, column_id)?);
    }

    Table::new(columns).map_err(|e| RecipeError::Corrupt {
        id: *file_recipe,
        reason: e.to_string(),
    })
}

fn read_column(store: &dyn ObjectStore, name: &str, id: &ObjectId) -> RecipeResult<Column> {
    let recipe = load_column_recipe(store, id)?;
    let mut column_type: Option<ColumnType> = None;
    let mut values: Vec<Value> = Vec::new();

    for chunk_id in &recipe.chunks {
        let bytes = store.get(chunk_id, Namespace::Chunk)?;
        let chunk = Chunk::decode(&bytes).map_err(|source| RecipeError::Codec {
            chunk: chunk_id.to_hex(),
            source,
        })?;
        if chunk.name != name || column_type.is_some_and(|t| t != chunk.column_type) {
            return Err(RecipeError::Corrupt {
                id: *id,
                reason: format!(
                    "chunk {} is {}:{}, expected column {name:?}",
                    chunk_id.short_hex(),
                    chunk.name,
                    chunk.column_type
                ),
            });
        }
        column_type = Some(chunk.column_type);
        values.extend(chunk.values);
    }

    // A column with no rows carries no chunk and so no type.
    Ok(Column::new(
        name,
        column_type.unwrap_or(ColumnType::Utf8),
        values,
    ))
}

#[cfg(test)]
mod tests {
    use tably_codec::ColumnType;
    use tably_store::InMemoryObjectStore;

    use super::*;
    use crate::build::store_table;

    fn sample() -> Table {
        Table::new(vec![
            Column::new(
                "name",
                ColumnType::Utf8,
                vec![Value::from("a"), Value::Null, Value::from("c")],
            ),
            Column::new(
                "id",
                ColumnType::Int64,
                vec![Value::Int64(1), Value::Int64(2), Value::Int64(3)],
            ),
        ])
        .unwrap()
    }

    #[test]
    fn read_table_restores_order_and_values() {
        let store = InMemoryObjectStore::new();
        let table = sample();
        let id = store_table(&store, &table, 2).unwrap();
        assert_eq!(read_table(&store, &id).unwrap(), table);
    }

    #[test]
    fn directory_recipe_roundtrip() {
        let store = InMemoryObjectStore::new();
        let id = store_table(&store, &sample(), 2).unwrap();
        let files = BTreeMap::from([("data/t.csv".to_string(), id)]);
        let dir_id = write_directory_recipe(&store, &files).unwrap();
        assert_eq!(load_directory_recipe(&store, &dir_id).unwrap().files, files);
        // Same mapping, same hash.
        assert_eq!(write_directory_recipe(&store, &files).unwrap(), dir_id);
    }

    #[test]
    fn non_recipe_bytes_are_corrupt() {
        let store = InMemoryObjectStore::new();
        let id = store.put(b"not json", Namespace::Recipe).unwrap();
        assert!(matches!(
            load_file_recipe(&store, &id),
            Err(RecipeError::Corrupt { .. })
        ));
    }

    #[test]
    fn missing_recipe_is_store_not_found() {
        let store = InMemoryObjectStore::new();
        let err = read_table(&store, &ObjectId::from_bytes(b"gone")).unwrap_err();
        assert!(matches!(
            err,
            RecipeError::Store(tably_store::StoreError::NotFound { .. })
        ));
    }
}

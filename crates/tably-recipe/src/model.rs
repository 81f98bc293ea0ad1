use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tably_types::ObjectId;

/// Ordered list of chunk hashes forming one column.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRecipe {
    pub chunks: Vec<ObjectId>,
}

/// Layout discriminator for file recipes. Only columnar files exist today.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecipeKind {
    Columnar,
}

/// One column of a file recipe.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnEntry {
    pub name: String,
    pub recipe: ObjectId,
}

/// A tracked file: original header order plus its columns sorted by name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecipe {
    #[serde(rename = "type")]
    pub kind: RecipeKind,
    pub column_order: Vec<String>,
    pub columns: Vec<ColumnEntry>,
}

impl FileRecipe {
    /// Column recipe for `name`.
    pub fn column(&self, name: &str) -> Option<&ObjectId> {
        self.columns.iter().find(|c| c.name == name).map(|c| &c.recipe)
    }
}

/// A committed snapshot: tracked path to file recipe.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryRecipe {
    pub files: BTreeMap<String, ObjectId>,
}

/// Serialize `value` as JSON with object keys sorted.
///
/// Struct fields are emitted in declaration order by `serde_json`, so the
/// value is routed through `serde_json::Value`, whose maps are ordered.
pub fn canonical_json<T: Serialize>(value: &T) -> serde_json::Result<Vec<u8>> {
    serde_json::to_vec(&serde_json::to_value(value)?)
}

use std::path::{Component, Path};

use tably_store::ObjectStore;
use tably_tabular::write_csv;
use tably_types::ObjectId;
use tracing::{info, warn};

use crate::error::{RecipeError, RecipeResult};
use crate::read::{load_directory_recipe, read_table};

/// A file that could not be reconstructed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: String,
    pub reason: String,
}

/// Outcome of [`materialize`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MaterializeReport {
    /// Paths written, in recipe order.
    pub written: Vec<String>,
    /// Paths skipped because an object was missing or corrupt.
    pub skipped: Vec<SkippedFile>,
}

impl MaterializeReport {
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Rebuild every file of a directory recipe under `target_root`.
///
/// Existing files are overwritten and parent directories created. Failure to
/// load the directory recipe itself is an error; a failure on one file is
/// logged, recorded in the report and does not stop the others. Files
/// already written stay written.
pub fn materialize(
    store: &dyn ObjectStore,
    directory_recipe: &ObjectId,
    target_root: &Path,
) -> RecipeResult<MaterializeReport> {
    let recipe = load_directory_recipe(store, directory_recipe)?;
    let mut report = MaterializeReport::default();

    for (path, file_recipe) in &recipe.files {
        match materialize_file(store, file_recipe, target_root, path) {
            Ok(()) => report.written.push(path.clone()),
            Err(e) => {
                warn!(path = %path, recipe = %file_recipe.short_hex(), error = %e, "skipping file");
                report.skipped.push(SkippedFile {
                    path: path.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    info!(
        recipe = %directory_recipe.short_hex(),
        written = report.written.len(),
        skipped = report.skipped.len(),
        "materialized directory recipe"
    );
    Ok(report)
}

fn materialize_file(
    store: &dyn ObjectStore,
    file_recipe: &ObjectId,
    target_root: &Path,
    path: &str,
) -> RecipeResult<()> {
    let relative = Path::new(path);
    if !relative
        .components()
        .all(|c| matches!(c, Component::Normal(_)))
    {
        return Err(RecipeError::Corrupt {
            id: *file_recipe,
            reason: format!("path {path:?} escapes the working tree"),
        });
    }

    let table = read_table(store, file_recipe)?;
    let target = target_root.join(relative);
    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent)?;
    }
    write_csv(&table, &target)?;
    Ok(())
}

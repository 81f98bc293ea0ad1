//! Working tree helpers: path keys and untracked file discovery.

use std::path::{Component, Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{SdkError, SdkResult};

/// The `/`-separated key of `file` relative to `root`.
///
/// `file` is made absolute against the current directory and canonicalized;
/// `root` must already be canonical. Files outside `root` are rejected.
pub fn path_key(root: &Path, file: &Path) -> SdkResult<String> {
    let absolute = if file.is_absolute() {
        file.to_path_buf()
    } else {
        std::env::current_dir()?.join(file)
    };
    let canonical = absolute.canonicalize().map_err(|source| {
        tably_tabular::TabularError::SourceUnreadable {
            path: file.to_path_buf(),
            source,
        }
    })?;
    let relative = canonical
        .strip_prefix(root)
        .map_err(|_| SdkError::OutsideRepository(file.to_path_buf()))?;
    key_of(relative).ok_or_else(|| SdkError::OutsideRepository(file.to_path_buf()))
}

/// Join the normal components of `relative` with `/`.
pub fn key_of(relative: &Path) -> Option<String> {
    let mut parts = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_str()?.to_string()),
            _ => return None,
        }
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}

/// Absolute path of a key under `root`.
pub fn key_path(root: &Path, key: &str) -> PathBuf {
    key.split('/').fold(root.to_path_buf(), |acc, part| acc.join(part))
}

/// Every `*.csv` file under `root`, as keys, skipping `control_dir_name`.
pub fn scan_tabular_files(root: &Path, control_dir_name: &str) -> SdkResult<Vec<String>> {
    let mut keys = Vec::new();
    let walker = WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .filter_entry(|e| !(e.depth() == 1 && e.file_name() == control_dir_name));
    for entry in walker {
        let entry = entry.map_err(|e| SdkError::Io(e.into()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let is_csv = entry
            .path()
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if !is_csv {
            continue;
        }
        if let Some(key) = entry.path().strip_prefix(root).ok().and_then(key_of) {
            keys.push(key);
        }
    }
    keys.sort();
    Ok(keys)
}

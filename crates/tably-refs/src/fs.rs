//! Filesystem-backed reference store.
//!
//! Layout under the control directory:
//!
//! ```text
//! HEAD              "ref: refs/heads/<name>" or a 64-char hex hash
//! refs/heads/<name> a 64-char hex hash, or empty for a view with no commits
//! ```

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tably_store::write_atomic;
use tably_types::ObjectId;
use tracing::debug;
use walkdir::WalkDir;

use crate::error::{RefError, RefResult};
use crate::names::validate_view_name;
use crate::traits::RefStore;
use crate::types::{Head, View, HEADS_PREFIX};

/// Refs stored as small text files, written atomically.
#[derive(Debug, Clone)]
pub struct FsRefStore {
    root: PathBuf,
}

impl FsRefStore {
    /// Open the ref store rooted at the control directory `root`.
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    fn heads_dir(&self) -> PathBuf {
        self.root.join(HEADS_PREFIX)
    }

    fn view_path(&self, name: &str) -> PathBuf {
        self.heads_dir().join(name)
    }

    fn head_path(&self) -> PathBuf {
        self.root.join("HEAD")
    }

    fn parse_tip(name: &str, text: &str) -> RefResult<Option<ObjectId>> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }
        ObjectId::from_hex(text)
            .map(Some)
            .map_err(|e| RefError::Corrupt {
                name: format!("{HEADS_PREFIX}{name}"),
                reason: e.to_string(),
            })
    }
}

fn read_optional(path: &Path) -> RefResult<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

impl RefStore for FsRefStore {
    fn view(&self, name: &str) -> RefResult<Option<View>> {
        // No view can exist under a name that fails validation.
        if validate_view_name(name).is_err() {
            return Ok(None);
        }
        let path = self.view_path(name);
        if path.is_dir() {
            return Ok(None);
        }
        match read_optional(&path)? {
            Some(text) => Ok(Some(View {
                name: name.to_string(),
                tip: Self::parse_tip(name, &text)?,
            })),
            None => Ok(None),
        }
    }

    fn write_view(&self, name: &str, tip: Option<ObjectId>) -> RefResult<()> {
        validate_view_name(name)?;
        let contents = tip.map(|id| id.to_hex()).unwrap_or_default();
        write_atomic(&self.view_path(name), contents.as_bytes())?;
        debug!(view = name, tip = ?tip, "wrote view");
        Ok(())
    }

    fn list_views(&self) -> RefResult<Vec<View>> {
        let heads = self.heads_dir();
        if !heads.is_dir() {
            return Ok(Vec::new());
        }
        let mut views = Vec::new();
        for entry in WalkDir::new(&heads).min_depth(1) {
            let entry = entry.map_err(|e| RefError::Io(e.into()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Ok(relative) = entry.path().strip_prefix(&heads) else {
                continue;
            };
            let name = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            // Temp files from interrupted writes never pass validation.
            if validate_view_name(&name).is_err() {
                continue;
            }
            let text = std::fs::read_to_string(entry.path())?;
            let tip = Self::parse_tip(&name, &text)?;
            views.push(View { name, tip });
        }
        views.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(views)
    }

    fn head(&self) -> RefResult<Option<Head>> {
        read_optional(&self.head_path())?
            .map(|text| Head::parse(&text))
            .transpose()
    }

    fn set_head(&self, head: &Head) -> RefResult<()> {
        if let Head::Symbolic(name) = head {
            validate_view_name(name)?;
        }
        write_atomic(&self.head_path(), format!("{head}\n").as_bytes())?;
        debug!(%head, "updated HEAD");
        Ok(())
    }
}

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use tably_index::StagingIndex;
use tably_recipe::{load_directory_recipe, materialize, write_directory_recipe, MaterializeReport};
use tably_refs::{validate_view_name, Head, RefStore};
use tably_store::ObjectStore;
use tably_types::{Namespace, ObjectId};
use tracing::{debug, info};

use crate::error::{LedgerError, LedgerResult};
use crate::manifest::Manifest;

/// Result of a successful commit.
#[derive(Clone, Debug)]
pub struct CommitOutcome {
    pub id: ObjectId,
    pub manifest: Manifest,
    /// The view that was advanced.
    pub view: String,
}

/// One entry of [`Ledger::log`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogEntry {
    pub id: ObjectId,
    pub manifest: Manifest,
}

/// A view as listed by [`Ledger::list_views`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewInfo {
    pub name: String,
    pub tip: Option<ObjectId>,
    pub is_current: bool,
}

/// Result of [`Ledger::activate`].
#[derive(Clone, Debug)]
pub struct Activation {
    /// The new HEAD.
    pub head: Head,
    /// The manifest that was materialized, if any.
    pub manifest: Option<ObjectId>,
    pub report: MaterializeReport,
}

/// History operations over a pair of stores.
pub struct Ledger<'a> {
    store: &'a dyn ObjectStore,
    refs: &'a dyn RefStore,
}

impl<'a> Ledger<'a> {
    pub fn new(store: &'a dyn ObjectStore, refs: &'a dyn RefStore) -> Self {
        Self { store, refs }
    }

    fn head(&self) -> LedgerResult<Head> {
        self.refs.head()?.ok_or(LedgerError::HeadMissing)
    }

    /// The manifest HEAD currently designates, if any.
    ///
    /// A symbolic HEAD yields its view's tip (none for an empty or missing
    /// view); a detached HEAD yields its hash.
    pub fn resolve_head(&self) -> LedgerResult<Option<ObjectId>> {
        match self.head()? {
            Head::Symbolic(name) => Ok(self.refs.view(&name)?.and_then(|v| v.tip)),
            Head::Detached(id) => Ok(Some(id)),
        }
    }

    /// Name of the active view, or `None` when detached.
    pub fn current_view(&self) -> LedgerResult<Option<String>> {
        Ok(self.head()?.view().map(str::to_string))
    }

    /// Load a manifest that must exist.
    pub fn manifest(&self, id: &ObjectId) -> LedgerResult<Manifest> {
        Manifest::load(self.store, id)?.ok_or(LedgerError::ManifestNotFound(*id))
    }

    /// Files recorded by the commit HEAD resolves to; empty before the first
    /// commit.
    pub fn head_files(&self) -> LedgerResult<BTreeMap<String, ObjectId>> {
        match self.resolve_head()? {
            Some(id) => {
                let manifest = self.manifest(&id)?;
                Ok(load_directory_recipe(self.store, &manifest.recipe)?.files)
            }
            None => Ok(BTreeMap::new()),
        }
    }

    /// File recipe that HEAD's commit records for `path`.
    pub fn committed_recipe(&self, path: &str) -> LedgerResult<Option<ObjectId>> {
        Ok(self.head_files()?.remove(path))
    }

    /// Commit the staged entries with the current time.
    pub fn commit(&self, message: &str, index: &StagingIndex) -> LedgerResult<CommitOutcome> {
        self.commit_at(message, index, Utc::now())
    }

    /// Commit the staged entries on top of HEAD.
    ///
    /// The new directory recipe is the parent's files with the staged
    /// entries laid over them. Fails without touching any ref when the index
    /// is empty, when it only restates HEAD's files, or when HEAD is
    /// detached. The caller clears the index on success.
    pub fn commit_at(
        &self,
        message: &str,
        index: &StagingIndex,
        timestamp: DateTime<Utc>,
    ) -> LedgerResult<CommitOutcome> {
        if index.is_empty() {
            return Err(LedgerError::NothingToCommit);
        }
        let view = match self.head()? {
            Head::Symbolic(name) => name,
            Head::Detached(_) => return Err(LedgerError::DetachedHeadCommit),
        };

        let parent = self.resolve_head()?;
        let committed = self.head_files()?;
        let mut files = committed.clone();
        files.extend(index.entries().iter().map(|(k, v)| (k.clone(), *v)));
        if files == committed {
            return Err(LedgerError::NothingToCommit);
        }
        let recipe = write_directory_recipe(self.store, &files)?;

        let manifest = Manifest {
            parent,
            message: message.to_string(),
            timestamp,
            recipe,
        };
        let id = manifest.store(self.store)?;
        self.refs.write_view(&view, Some(id))?;

        info!(view = %view, commit = %id.short_hex(), files = files.len(), "committed");
        Ok(CommitOutcome { id, manifest, view })
    }

    /// Create a view at `start_point`, or at HEAD's commit if none is given.
    ///
    /// HEAD is not moved.
    pub fn create_view(&self, name: &str, start_point: Option<&ObjectId>) -> LedgerResult<ObjectId> {
        validate_view_name(name)?;
        if self.refs.view(name)?.is_some() {
            return Err(LedgerError::AlreadyExists(name.to_string()));
        }
        let tip = match start_point {
            Some(id) => {
                if !self.store.exists(id, Namespace::Manifest)? {
                    return Err(LedgerError::ManifestNotFound(*id));
                }
                *id
            }
            None => self.resolve_head()?.ok_or(LedgerError::NoCommitsYet)?,
        };
        self.refs.create_view(name, Some(tip))?;
        info!(view = name, commit = %tip.short_hex(), "created view");
        Ok(tip)
    }

    /// Work out what activating `target` means without changing anything.
    ///
    /// An existing view wins over a hash; otherwise `target` must be the full
    /// hex hash of a stored manifest.
    pub fn resolve_target(&self, target: &str) -> LedgerResult<(Head, Option<ObjectId>)> {
        if let Some(view) = self.refs.view(target)? {
            return Ok((Head::Symbolic(view.name), view.tip));
        }
        let id = ObjectId::from_hex(target)
            .map_err(|_| LedgerError::UnknownTarget(target.to_string()))?;
        if !self.store.exists(&id, Namespace::Manifest)? {
            return Err(LedgerError::UnknownTarget(target.to_string()));
        }
        Ok((Head::Detached(id), Some(id)))
    }

    /// Point HEAD at `target` and rebuild its files under `work_root`.
    ///
    /// Refused while `index` holds staged entries.
    pub fn activate(
        &self,
        target: &str,
        index: &StagingIndex,
        work_root: &Path,
    ) -> LedgerResult<Activation> {
        if !index.is_empty() {
            return Err(LedgerError::DirtyIndex);
        }
        let (head, manifest_id) = self.resolve_target(target)?;
        let manifest = manifest_id.map(|id| self.manifest(&id)).transpose()?;

        self.refs.set_head(&head)?;
        info!(%head, "activated");

        let report = match manifest {
            Some(m) => materialize(self.store, &m.recipe, work_root)?,
            None => {
                debug!("target has no commits; nothing to materialize");
                MaterializeReport::default()
            }
        };
        Ok(Activation {
            head,
            manifest: manifest_id,
            report,
        })
    }

    /// History from HEAD backwards, newest first, at most `limit` entries.
    pub fn log(&self, limit: Option<usize>) -> LedgerResult<Vec<LogEntry>> {
        let mut entries = Vec::new();
        let mut next = self.resolve_head()?;
        while let Some(id) = next {
            if limit.is_some_and(|n| entries.len() >= n) {
                break;
            }
            let manifest = Manifest::load(self.store, &id)?
                .ok_or(LedgerError::CorruptedHistory { missing: id })?;
            next = manifest.parent;
            entries.push(LogEntry { id, manifest });
        }
        Ok(entries)
    }

    /// All views, sorted by name, flagging the active one.
    pub fn list_views(&self) -> LedgerResult<Vec<ViewInfo>> {
        let current = self.current_view()?;
        Ok(self
            .refs
            .list_views()?
            .into_iter()
            .map(|v| ViewInfo {
                is_current: current.as_deref() == Some(v.name.as_str()),
                name: v.name,
                tip: v.tip,
            })
            .collect())
    }
}

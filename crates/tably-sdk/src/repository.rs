use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tably_index::{compute_status, StageOutcome, StagingIndex, WorkdirStatus};
use tably_ledger::{Activation, CommitOutcome, Ledger, LedgerError, LogEntry, ViewInfo};
use tably_recipe::{build_file_recipe, store_table};
use tably_refs::{FsRefStore, Head, RefStore};
use tably_schema::SchemaCache;
use tably_store::{FsObjectStore, InMemoryObjectStore, ObjectStore};
use tably_tabular::{infer_schema, read_csv};
use tably_types::ObjectId;
use tracing::{debug, info, warn};

use crate::config::RepoConfig;
use crate::error::{SdkError, SdkResult};
use crate::lock::RepoLock;
use crate::workdir::{key_path, path_key, scan_tabular_files};

/// Name of the control directory at the working root.
pub const CONTROL_DIR: &str = ".tably";

const INDEX_FILE: &str = "index.json";
const SCHEMAS_FILE: &str = "schemas.json";
const CONFIG_FILE: &str = "config.toml";

/// Result of [`Repository::add`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddOutcome {
    /// Path key relative to the working root.
    pub path: String,
    pub recipe: ObjectId,
    pub outcome: StageOutcome,
}

/// Handle to an on-disk tably repository.
#[derive(Debug)]
pub struct Repository {
    root: PathBuf,
    control: PathBuf,
    store: FsObjectStore,
    refs: FsRefStore,
    config: RepoConfig,
}

impl Repository {
    /// Create a repository at `root` with an empty default view, HEAD on
    /// that view, an empty index and default config.
    pub fn init(root: &Path) -> SdkResult<Self> {
        std::fs::create_dir_all(root)?;
        let root = root.canonicalize()?;
        let control = root.join(CONTROL_DIR);
        if control.exists() {
            return Err(SdkError::AlreadyInitialized(root));
        }
        std::fs::create_dir_all(&control)?;

        let config = RepoConfig::default();
        config.save(&control.join(CONFIG_FILE))?;
        let store = FsObjectStore::init(&control)?;
        let refs = FsRefStore::new(&control);
        refs.write_view(&config.default_view, None)?;
        refs.set_head(&Head::Symbolic(config.default_view.clone()))?;
        StagingIndex::new().save(&control.join(INDEX_FILE))?;
        SchemaCache::load(&control.join(SCHEMAS_FILE))?.save()?;

        info!(root = %root.display(), view = %config.default_view, "initialized repository");
        Ok(Self {
            root,
            control,
            store,
            refs,
            config,
        })
    }

    /// Open the repository whose working root is exactly `root`.
    pub fn open(root: &Path) -> SdkResult<Self> {
        let root = root
            .canonicalize()
            .map_err(|_| SdkError::RepositoryNotFound(root.to_path_buf()))?;
        let control = root.join(CONTROL_DIR);
        if !control.is_dir() {
            return Err(SdkError::RepositoryNotFound(root));
        }
        let config = RepoConfig::load(&control.join(CONFIG_FILE))?;
        let store = FsObjectStore::open(&control)?;
        let refs = FsRefStore::new(&control);
        debug!(root = %root.display(), "opened repository");
        Ok(Self {
            root,
            control,
            store,
            refs,
            config,
        })
    }

    /// Open the nearest repository at or above `start`.
    pub fn discover(start: &Path) -> SdkResult<Self> {
        let start = start
            .canonicalize()
            .map_err(|_| SdkError::RepositoryNotFound(start.to_path_buf()))?;
        match start.ancestors().find(|dir| dir.join(CONTROL_DIR).is_dir()) {
            Some(root) => Self::open(root),
            None => Err(SdkError::RepositoryNotFound(start)),
        }
    }

    /// The working root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn control_dir(&self) -> &Path {
        &self.control
    }

    pub fn config(&self) -> &RepoConfig {
        &self.config
    }

    pub fn store(&self) -> &dyn ObjectStore {
        &self.store
    }

    pub fn refs(&self) -> &dyn RefStore {
        &self.refs
    }

    pub fn ledger(&self) -> Ledger<'_> {
        Ledger::new(&self.store, &self.refs)
    }

    fn index_path(&self) -> PathBuf {
        self.control.join(INDEX_FILE)
    }

    pub fn index(&self) -> SdkResult<StagingIndex> {
        Ok(StagingIndex::load(&self.index_path())?)
    }

    pub fn schemas(&self) -> SdkResult<SchemaCache> {
        Ok(SchemaCache::load(&self.control.join(SCHEMAS_FILE))?)
    }

    /// Drop the cached schema for `file` so the next `add` infers it again.
    /// Returns whether an entry was cached.
    pub fn forget_schema(&self, file: &Path) -> SdkResult<bool> {
        let _lock = self.lock()?;
        let key = path_key(&self.root, file)?;
        let removed = self.schemas()?.remove(&key)?.is_some();
        info!(path = %key, removed, "forget schema");
        Ok(removed)
    }

    fn lock(&self) -> SdkResult<RepoLock> {
        RepoLock::acquire(&self.control)
    }

    /// Ingest `file` and stage its file recipe.
    ///
    /// Staging is skipped when the content matches what is already staged.
    /// Content equal to what HEAD records is never staged, and any earlier
    /// staged version of the path is dropped from the index.
    pub fn add(&self, file: &Path) -> SdkResult<AddOutcome> {
        let _lock = self.lock()?;
        let key = path_key(&self.root, file)?;
        if key == CONTROL_DIR || key.starts_with(&format!("{CONTROL_DIR}/")) {
            return Err(SdkError::OutsideRepository(file.to_path_buf()));
        }

        let mut schemas = self.schemas()?;
        let source = key_path(&self.root, &key);
        let recipe = build_file_recipe(
            &self.store,
            &mut schemas,
            &key,
            &source,
            self.config.chunk_rows,
        )?;

        let mut index = self.index()?;
        let outcome = if self.ledger().committed_recipe(&key)? == Some(recipe) {
            // Back to HEAD's content: an earlier staged version no longer applies.
            if index.get(&key).is_some() {
                index.unstage(&key)?;
                index.save(&self.index_path())?;
                debug!(path = %key, "unstaged; content matches HEAD");
            }
            StageOutcome::Unchanged
        } else {
            let outcome = index.stage(&key, recipe)?;
            if outcome == StageOutcome::Staged {
                index.save(&self.index_path())?;
            }
            outcome
        };

        info!(path = %key, recipe = %recipe.short_hex(), ?outcome, "add");
        Ok(AddOutcome {
            path: key,
            recipe,
            outcome,
        })
    }

    /// Commit the staged entries and clear the index.
    pub fn commit(&self, message: &str) -> SdkResult<CommitOutcome> {
        let _lock = self.lock()?;
        let mut index = self.index()?;
        let outcome = self.ledger().commit(message, &index)?;
        index.clear();
        index.save(&self.index_path())?;
        Ok(outcome)
    }

    /// History from HEAD, newest first.
    pub fn log(&self, limit: Option<usize>) -> SdkResult<Vec<LogEntry>> {
        Ok(self.ledger().log(limit)?)
    }

    /// Create a view at `start_point` (a full commit hash) or at HEAD.
    pub fn create_view(&self, name: &str, start_point: Option<&str>) -> SdkResult<ObjectId> {
        let _lock = self.lock()?;
        let start = start_point
            .map(|s| ObjectId::from_hex(s).map_err(|_| LedgerError::UnknownTarget(s.to_string())))
            .transpose()?;
        Ok(self.ledger().create_view(name, start.as_ref())?)
    }

    pub fn list_views(&self) -> SdkResult<Vec<ViewInfo>> {
        Ok(self.ledger().list_views()?)
    }

    pub fn current_view(&self) -> SdkResult<Option<String>> {
        Ok(self.ledger().current_view()?)
    }

    pub fn resolve_head(&self) -> SdkResult<Option<ObjectId>> {
        Ok(self.ledger().resolve_head()?)
    }

    /// Switch HEAD to a view or commit and rebuild its files in the working
    /// tree.
    pub fn activate(&self, target: &str) -> SdkResult<Activation> {
        let _lock = self.lock()?;
        let index = self.index()?;
        Ok(self.ledger().activate(target, &index, &self.root)?)
    }

    /// Compare the working tree against the index and HEAD's commit.
    pub fn status(&self) -> SdkResult<WorkdirStatus> {
        let index = self.index()?;
        let committed = self.ledger().head_files()?;
        let schemas = self.schemas()?;

        let mut working = BTreeMap::new();
        for key in index.entries().keys().chain(committed.keys()) {
            if working.contains_key(key) {
                continue;
            }
            let path = key_path(&self.root, key);
            if path.is_file() {
                working.insert(key.clone(), self.working_recipe(&schemas, key, &path)?);
            }
        }

        let candidates = scan_tabular_files(&self.root, CONTROL_DIR)?;
        Ok(compute_status(&index, &committed, &working, candidates))
    }

    /// File recipe hash `path` would get if added now, without storing
    /// anything or pinning a schema.
    fn working_recipe(&self, schemas: &SchemaCache, key: &str, path: &Path) -> SdkResult<ObjectId> {
        let schema = match schemas.get(key) {
            Some(schema) => schema.clone(),
            None => infer_schema(path)?,
        };
        match read_csv(path, &schema) {
            Ok(table) => Ok(store_table(&InMemoryObjectStore::new(), &table, self.config.chunk_rows)?),
            Err(e) => {
                // Unparsable now: hash the raw bytes so it reports as modified.
                warn!(path = %key, error = %e, "cannot parse tracked file");
                Ok(ObjectId::from_bytes(&std::fs::read(path)?))
            }
        }
    }
}

//! High-level SDK for tably.
//!
//! [`Repository`] is the explicit handle every operation goes through. It
//! owns the on-disk object store and refs, loads the staging index and the
//! schema cache on demand, and holds an exclusive advisory lock for the
//! duration of each mutating call.
//!
//! ```no_run
//! use tably_sdk::Repository;
//!
//! # fn main() -> tably_sdk::SdkResult<()> {
//! let repo = Repository::init(std::path::Path::new("/data/project"))?;
//! repo.add(std::path::Path::new("/data/project/sales.csv"))?;
//! repo.commit("import sales")?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod lock;
pub mod repository;
pub mod workdir;

pub use config::RepoConfig;
pub use error::{SdkError, SdkResult};
pub use lock::RepoLock;
pub use repository::{AddOutcome, Repository, CONTROL_DIR};

// Re-export key types
pub use tably_index::{FileStatus, StageOutcome, StatusEntry, WorkdirStatus};
pub use tably_ledger::{Activation, CommitOutcome, LogEntry, Manifest, ViewInfo};
pub use tably_recipe::{MaterializeReport, SkippedFile};
pub use tably_refs::Head;
pub use tably_types::ObjectId;

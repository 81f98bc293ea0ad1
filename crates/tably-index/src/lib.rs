//! Staging index for tably.
//!
//! The index maps tracked paths to the file recipe hash that the next commit
//! will record for them. It is persisted as `index.json` and cleared after a
//! successful commit.
//!
//! # Key Types
//!
//! - [`StagingIndex`] -- The staging area (BTreeMap-backed)
//! - [`StageOutcome`] -- Whether staging changed anything
//! - [`WorkdirStatus`] -- Result of status computation
//! - [`FileStatus`] -- Kind of staged change (New, Modified)

pub mod error;
pub mod index;
pub mod status;

pub use error::{IndexError, IndexResult};
pub use index::{StageOutcome, StagingIndex};
pub use status::{compute_status, FileStatus, StatusEntry, WorkdirStatus};

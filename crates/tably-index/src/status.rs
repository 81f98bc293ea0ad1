//! Working tree status types.
//!
//! These types represent the result of comparing the working tree against
//! the index and the last committed directory recipe.

use std::collections::{BTreeMap, BTreeSet};

use tably_types::ObjectId;

use crate::index::StagingIndex;

/// Complete status of the working tree.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WorkdirStatus {
    /// Paths staged for the next commit.
    pub staged: Vec<StatusEntry>,
    /// Tracked paths whose current contents differ from what is staged or
    /// committed.
    pub modified: Vec<String>,
    /// Tracked paths missing from the working tree.
    pub deleted: Vec<String>,
    /// Tabular files present in the working tree but not tracked.
    pub untracked: Vec<String>,
}

impl WorkdirStatus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if there are no changes of any kind.
    pub fn is_clean(&self) -> bool {
        self.staged.is_empty()
            && self.modified.is_empty()
            && self.deleted.is_empty()
            && self.untracked.is_empty()
    }

    pub fn has_staged_changes(&self) -> bool {
        !self.staged.is_empty()
    }
}

/// A single staged change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusEntry {
    /// The file path relative to the working root.
    pub path: String,
    pub status: FileStatus,
}

impl StatusEntry {
    pub fn new(path: impl Into<String>, status: FileStatus) -> Self {
        Self {
            path: path.into(),
            status,
        }
    }
}

/// The kind of staged change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileStatus {
    /// The path is not in the last commit.
    New,
    /// The path is in the last commit with different content.
    Modified,
}

/// Classify every path.
///
/// - `committed`: the files of HEAD's directory recipe (empty before the
///   first commit).
/// - `working`: current file recipe hash of each tracked path still present
///   in the working tree.
/// - `untracked`: candidate files found on disk; tracked ones are dropped.
///
/// Staged entries identical to the committed hash are not reported.
pub fn compute_status(
    index: &StagingIndex,
    committed: &BTreeMap<String, ObjectId>,
    working: &BTreeMap<String, ObjectId>,
    untracked: impl IntoIterator<Item = String>,
) -> WorkdirStatus {
    let mut status = WorkdirStatus::new();

    for (path, staged) in index.entries() {
        match committed.get(path) {
            None => status.staged.push(StatusEntry::new(path, FileStatus::New)),
            Some(prev) if prev != staged => {
                status.staged.push(StatusEntry::new(path, FileStatus::Modified))
            }
            Some(_) => {}
        }
    }

    let tracked: BTreeSet<&String> = index.entries().keys().chain(committed.keys()).collect();
    for path in &tracked {
        let expected = index.get(path).or_else(|| committed.get(*path));
        match working.get(*path) {
            None => status.deleted.push((*path).clone()),
            Some(current) if Some(current) != expected => status.modified.push((*path).clone()),
            Some(_) => {}
        }
    }

    let mut untracked: Vec<String> = untracked
        .into_iter()
        .filter(|p| !tracked.contains(p))
        .collect();
    untracked.sort();
    untracked.dedup();
    status.untracked = untracked;

    status
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> ObjectId {
        ObjectId::from_bytes(s.as_bytes())
    }

    #[test]
    fn empty_status_is_clean() {
        let status = WorkdirStatus::new();
        assert!(status.is_clean());
        assert!(!status.has_staged_changes());
    }

    #[test]
    fn classifies_all_kinds() {
        let mut index = StagingIndex::new();
        index.stage("new.csv", id("n1")).unwrap();
        index.stage("changed.csv", id("c2")).unwrap();

        let committed = BTreeMap::from([
            ("changed.csv".to_string(), id("c1")),
            ("same.csv".to_string(), id("s1")),
            ("edited.csv".to_string(), id("e1")),
            ("gone.csv".to_string(), id("g1")),
        ]);
        let working = BTreeMap::from([
            ("new.csv".to_string(), id("n1")),
            ("changed.csv".to_string(), id("c2")),
            ("same.csv".to_string(), id("s1")),
            ("edited.csv".to_string(), id("e2")),
        ]);
        let status = compute_status(
            &index,
            &committed,
            &working,
            vec!["extra.csv".to_string(), "same.csv".to_string()],
        );

        assert_eq!(
            status.staged,
            vec![
                StatusEntry::new("changed.csv", FileStatus::Modified),
                StatusEntry::new("new.csv", FileStatus::New),
            ]
        );
        assert_eq!(status.modified, vec!["edited.csv"]);
        assert_eq!(status.deleted, vec!["gone.csv"]);
        assert_eq!(status.untracked, vec!["extra.csv"]);
    }

    #[test]
    fn edit_after_staging_is_modified() {
        let mut index = StagingIndex::new();
        index.stage("a.csv", id("v1")).unwrap();
        let working = BTreeMap::from([("a.csv".to_string(), id("v2"))]);
        let status = compute_status(&index, &BTreeMap::new(), &working, Vec::new());
        assert_eq!(status.staged.len(), 1);
        assert_eq!(status.modified, vec!["a.csv"]);
    }

    #[test]
    fn staged_back_to_committed_is_not_reported() {
        let mut index = StagingIndex::new();
        index.stage("a.csv", id("v1")).unwrap();
        let committed = BTreeMap::from([("a.csv".to_string(), id("v1"))]);
        let status = compute_status(&index, &committed, &committed, Vec::new());
        assert!(status.is_clean());
    }
}

//! Commit history for tably.
//!
//! This crate ties the object store, the refs and the staging index into a
//! version history:
//! - [`Manifest`] -- a commit object linking a directory recipe to its
//!   parent, message and timestamp
//! - [`Ledger`] -- HEAD resolution, commit, view creation, activation and
//!   log over any [`ObjectStore`](tably_store::ObjectStore) and
//!   [`RefStore`](tably_refs::RefStore)

pub mod error;
pub mod ledger;
pub mod manifest;

pub use error::{LedgerError, LedgerResult};
pub use ledger::{Activation, CommitOutcome, Ledger, LogEntry, ViewInfo};
pub use manifest::Manifest;

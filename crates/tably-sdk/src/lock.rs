use std::fs::{File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use fs4::FileExt;
use tracing::debug;

use crate::error::{SdkError, SdkResult};

/// Exclusive advisory lock on `<control>/lock`.
///
/// Held for the lifetime of the value; the OS releases it when the file
/// handle is dropped.
#[derive(Debug)]
pub struct RepoLock {
    _file: File,
    path: PathBuf,
}

impl RepoLock {
    /// Take the lock without waiting. Fails with [`SdkError::Locked`] if
    /// another handle holds it.
    pub fn acquire(control_dir: &Path) -> SdkResult<Self> {
        let path = control_dir.join("lock");
        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(&path)?;
        match file.try_lock_exclusive() {
            Ok(()) => {
                debug!(path = %path.display(), "acquired repository lock");
                Ok(Self { _file: file, path })
            }
            Err(e) if e.kind() == ErrorKind::WouldBlock => Err(SdkError::Locked(path)),
            Err(e) => Err(e.into()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_acquire_is_locked_until_release() {
        let dir = tempfile::tempdir().unwrap();
        let first = RepoLock::acquire(dir.path()).unwrap();
        assert!(matches!(
            RepoLock::acquire(dir.path()),
            Err(SdkError::Locked(_))
        ));
        drop(first);
        assert!(RepoLock::acquire(dir.path()).is_ok());
    }
}

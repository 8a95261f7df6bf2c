//! Repository probing under a scoped working directory.

use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Result, VersionHeaderError};
use crate::git::RevisionLister;

/// The two facts read from history for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryState {
    pub commit_count: u64,
    pub short_hash: String,
    pub long_hash: String,
}

/// Switches the process working directory and restores it when dropped.
///
/// Restoration happens on every exit path, including early returns through `?`
/// and unwinding, so callers never see the switched directory.
#[derive(Debug)]
pub struct DirectoryGuard {
    previous: PathBuf,
}

impl DirectoryGuard {
    /// Capture the current working directory, then switch to `dir`.
    pub fn enter(dir: &Path) -> Result<Self> {
        let previous = env::current_dir()?;
        env::set_current_dir(dir).map_err(|e| {
            VersionHeaderError::probe(format!("Cannot enter '{}': {}", dir.display(), e))
        })?;
        log::debug!("entered {} (from {})", dir.display(), previous.display());
        Ok(DirectoryGuard { previous })
    }

    /// Directory that will be restored on drop
    pub fn previous(&self) -> &Path {
        &self.previous
    }
}

impl Drop for DirectoryGuard {
    fn drop(&mut self) {
        if let Err(e) = env::set_current_dir(&self.previous) {
            log::warn!(
                "could not restore working directory {}: {}",
                self.previous.display(),
                e
            );
        }
    }
}

/// Query `dir` for its commit count and tip hashes.
///
/// Both queries run with the working directory switched to `dir`; the previous
/// directory is back in place before this returns, whether it succeeds or not.
/// Query failures surface as [VersionHeaderError::Probe].
pub fn probe<L: RevisionLister + ?Sized>(lister: &L, dir: &Path) -> Result<RepositoryState> {
    // Resolve before switching, or a relative path would be applied twice
    let dir = if dir.is_absolute() {
        dir.to_path_buf()
    } else {
        env::current_dir()?.join(dir)
    };
    let dir = dir.as_path();
    let _guard = DirectoryGuard::enter(dir)?;

    let commit_count = lister.count_commits(dir).map_err(into_probe_error)?;
    let (short_hash, long_hash) = lister.head_hashes(dir).map_err(into_probe_error)?;

    log::debug!(
        "{}: {} commits, tip {} ({})",
        dir.display(),
        commit_count,
        short_hash,
        long_hash
    );

    Ok(RepositoryState {
        commit_count,
        short_hash,
        long_hash,
    })
}

fn into_probe_error(err: VersionHeaderError) -> VersionHeaderError {
    match err {
        VersionHeaderError::Probe(_) => err,
        VersionHeaderError::Execution(msg) => VersionHeaderError::Probe(msg),
        other => VersionHeaderError::probe(other.to_string()),
    }
}

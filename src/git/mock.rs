use std::cell::RefCell;
use std::path::{Path, PathBuf};

use crate::error::{Result, VersionHeaderError};
use crate::git::RevisionLister;

/// Mock lister for testing without a repository
pub struct MockLister {
    count: u64,
    short_hash: String,
    long_hash: String,
    failing: bool,
    seen_dirs: RefCell<Vec<PathBuf>>,
}

impl MockLister {
    /// Create a mock that reports the given history
    pub fn new(count: u64, short_hash: impl Into<String>, long_hash: impl Into<String>) -> Self {
        MockLister {
            count,
            short_hash: short_hash.into(),
            long_hash: long_hash.into(),
            failing: false,
            seen_dirs: RefCell::new(Vec::new()),
        }
    }

    /// Create a mock whose queries always fail
    pub fn failing() -> Self {
        MockLister {
            failing: true,
            ..Self::new(0, "", "")
        }
    }

    /// Working directories observed while each query ran
    pub fn seen_dirs(&self) -> Vec<PathBuf> {
        self.seen_dirs.borrow().clone()
    }

    fn record(&self) -> Result<()> {
        self.seen_dirs.borrow_mut().push(std::env::current_dir()?);
        if self.failing {
            return Err(VersionHeaderError::execution("mock query failed"));
        }
        Ok(())
    }
}

impl RevisionLister for MockLister {
    fn count_commits(&self, _path: &Path) -> Result<u64> {
        self.record()?;
        Ok(self.count)
    }

    fn head_hashes(&self, _path: &Path) -> Result<(String, String)> {
        self.record()?;
        Ok((self.short_hash.clone(), self.long_hash.clone()))
    }
}

//! Revision history abstraction layer
//!
//! The tool reads exactly two facts from history: how many commits are reachable
//! from the current tip, and the tip's abbreviated and full identifiers. The
//! [RevisionLister] trait exposes those two queries and nothing else, so the
//! probe does not care how they are answered.
//!
//! # Implementations
//!
//! - [command::GitCommandLister]: runs the `git` executable
//! - [repository::Git2Lister]: reads the repository through `libgit2`
//! - [mock::MockLister]: canned answers for tests
//!
//! ```rust
//! # use version_headers::git::RevisionLister;
//! # use std::path::Path;
//! # fn example<L: RevisionLister>(lister: &L) -> version_headers::Result<()> {
//! let count = lister.count_commits(Path::new("."))?;
//! let (short, long) = lister.head_hashes(Path::new("."))?;
//! println!("{} commits, tip {} ({})", count, short, long);
//! # Ok(())
//! # }
//! ```

pub mod command;
pub mod mock;
pub mod repository;

pub use command::GitCommandLister;
pub use mock::MockLister;
pub use repository::Git2Lister;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, VersionHeaderError};

/// Narrow capability for querying revision history.
///
/// Implementations report abnormal termination of a query as
/// [VersionHeaderError::Execution].
pub trait RevisionLister {
    /// Total number of commits reachable from the current history tip
    fn count_commits(&self, path: &Path) -> Result<u64>;

    /// Abbreviated and full identifiers of the current history tip
    ///
    /// # Returns
    /// * `Ok((short, long))` - e.g. `("1a2b3c4", "1a2b3c4d...")`
    /// * `Err` - If the query fails or there is no history
    fn head_hashes(&self, path: &Path) -> Result<(String, String)>;
}

/// Selects which [RevisionLister] answers the history queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Spawn the `git` executable
    #[default]
    Command,
    /// Use libgit2 in-process
    Git2,
}

impl Backend {
    /// Build the lister for this backend
    pub fn lister(self) -> Box<dyn RevisionLister> {
        match self {
            Backend::Command => Box::new(GitCommandLister::new()),
            Backend::Git2 => Box::new(Git2Lister::new()),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Command => write!(f, "command"),
            Backend::Git2 => write!(f, "git2"),
        }
    }
}

impl FromStr for Backend {
    type Err = VersionHeaderError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "command" | "git" => Ok(Backend::Command),
            "git2" | "libgit2" => Ok(Backend::Git2),
            other => Err(VersionHeaderError::config(format!(
                "Unknown probe backend '{}' (expected 'command' or 'git2')",
                other
            ))),
        }
    }
}

impl<L: RevisionLister + ?Sized> RevisionLister for Box<L> {
    fn count_commits(&self, path: &Path) -> Result<u64> {
        (**self).count_commits(path)
    }

    fn head_hashes(&self, path: &Path) -> Result<(String, String)> {
        (**self).head_hashes(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_backend_from_str() {
        assert_eq!("command".parse::<Backend>().unwrap(), Backend::Command);
        assert_eq!("GIT2".parse::<Backend>().unwrap(), Backend::Git2);
        assert!("svn".parse::<Backend>().is_err());
    }

    #[test]
    fn test_backend_display_round_trips() {
        for backend in [Backend::Command, Backend::Git2] {
            assert_eq!(backend.to_string().parse::<Backend>().unwrap(), backend);
        }
    }

    #[test]
    #[serial]
    fn test_boxed_lister_delegates() {
        let lister: Box<dyn RevisionLister> = Box::new(MockLister::new(4, "abc", "abcdef"));
        assert_eq!(lister.count_commits(Path::new(".")).unwrap(), 4);
        assert_eq!(
            lister.head_hashes(Path::new(".")).unwrap(),
            ("abc".to_string(), "abcdef".to_string())
        );
    }
}

use std::path::Path;

use git2::Repository as Git2Repo;

use crate::error::{Result, VersionHeaderError};
use crate::git::RevisionLister;

/// Answers history queries in-process through libgit2
#[derive(Debug, Clone, Default)]
pub struct Git2Lister;

impl Git2Lister {
    pub fn new() -> Self {
        Git2Lister
    }

    /// Open or discover the repository containing `path`
    fn open(path: &Path) -> Result<Git2Repo> {
        Git2Repo::discover(path).map_err(|e| {
            VersionHeaderError::execution(format!(
                "Not in a git repository '{}': {}",
                path.display(),
                e
            ))
        })
    }
}

fn git_failure(context: &str) -> impl FnOnce(git2::Error) -> VersionHeaderError + '_ {
    move |e| VersionHeaderError::execution(format!("{}: {}", context, e))
}

impl RevisionLister for Git2Lister {
    fn count_commits(&self, path: &Path) -> Result<u64> {
        let repo = Self::open(path)?;

        let mut revwalk = repo.revwalk().map_err(git_failure("Cannot walk history"))?;
        revwalk
            .push_head()
            .map_err(git_failure("HEAD has no reachable history"))?;

        let mut count = 0u64;
        for oid in revwalk {
            oid.map_err(git_failure("Cannot walk history"))?;
            count += 1;
        }

        log::debug!("{} commits reachable from HEAD", count);
        Ok(count)
    }

    fn head_hashes(&self, path: &Path) -> Result<(String, String)> {
        let repo = Self::open(path)?;

        let head = repo
            .head()
            .map_err(git_failure("HEAD is unborn or invalid"))?
            .peel_to_commit()
            .map_err(git_failure("HEAD does not point at a commit"))?;

        let short = head
            .as_object()
            .short_id()
            .map_err(git_failure("Cannot abbreviate HEAD"))?;
        let short = short.as_str().ok_or_else(|| {
            VersionHeaderError::execution("Abbreviated HEAD id is not valid UTF-8")
        })?;

        Ok((short.to_string(), head.id().to_string()))
    }
}

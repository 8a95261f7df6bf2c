use std::path::Path;
use std::process::Command;

use crate::error::{Result, VersionHeaderError};
use crate::git::RevisionLister;

/// Format passed to `git log` so both identifiers come back in one value
const HASH_PAIR_FORMAT: &str = "--pretty=format:%h:%H";

/// Answers history queries by running the `git` executable
#[derive(Debug, Clone)]
pub struct GitCommandLister {
    program: String,
}

impl GitCommandLister {
    /// Use `git` from `PATH`
    pub fn new() -> Self {
        GitCommandLister {
            program: "git".to_string(),
        }
    }

    /// Use a specific executable instead of `git` from `PATH`
    pub fn with_program(program: impl Into<String>) -> Self {
        GitCommandLister {
            program: program.into(),
        }
    }

    /// Run `git <args>` in `path` and return its trimmed stdout.
    ///
    /// A spawn failure or any non-zero exit status is an execution error.
    fn run(&self, path: &Path, args: &[&str]) -> Result<String> {
        log::debug!("running {} {} in {}", self.program, args.join(" "), path.display());

        let output = Command::new(&self.program)
            .args(args)
            .current_dir(path)
            .output()
            .map_err(|e| {
                VersionHeaderError::execution(format!(
                    "Failed to execute {} {}: {}",
                    self.program,
                    args.join(" "),
                    e
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(VersionHeaderError::execution(format!(
                "{} {} failed with exit code {}\nStderr: {}",
                self.program,
                args.join(" "),
                output.status.code().unwrap_or(-1),
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl Default for GitCommandLister {
    fn default() -> Self {
        Self::new()
    }
}

impl RevisionLister for GitCommandLister {
    fn count_commits(&self, path: &Path) -> Result<u64> {
        let text = self.run(path, &["rev-list", "--count", "HEAD"])?;
        text.parse::<u64>().map_err(|_| {
            VersionHeaderError::probe(format!("Unexpected commit count output: '{}'", text))
        })
    }

    fn head_hashes(&self, path: &Path) -> Result<(String, String)> {
        let text = self.run(path, &["log", HASH_PAIR_FORMAT, "-n", "1"])?;
        split_hash_pair(&text)
    }
}

/// Split a `short:long` value on its first colon.
///
/// Both halves must be non-empty; an empty log (no history) fails here too.
pub fn split_hash_pair(value: &str) -> Result<(String, String)> {
    match value.trim().split_once(':') {
        Some((short, long)) if !short.is_empty() && !long.is_empty() => {
            Ok((short.to_string(), long.to_string()))
        }
        _ => Err(VersionHeaderError::probe(format!(
            "Unexpected commit hash output: '{}'",
            value
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_hash_pair() {
        let (short, long) = split_hash_pair("1a2b3c4:1a2b3c4d5e6f").unwrap();
        assert_eq!(short, "1a2b3c4");
        assert_eq!(long, "1a2b3c4d5e6f");
    }

    #[test]
    fn test_split_hash_pair_uses_first_colon() {
        let (short, long) = split_hash_pair("abc:def:ghi").unwrap();
        assert_eq!(short, "abc");
        assert_eq!(long, "def:ghi");
    }

    #[test]
    fn test_split_hash_pair_rejects_malformed() {
        for bad in ["", "abcdef", ":abc", "abc:", "\n"] {
            let err = split_hash_pair(bad).unwrap_err();
            assert!(matches!(err, VersionHeaderError::Probe(_)), "{:?}", bad);
        }
    }

    #[test]
    fn test_missing_program_is_execution_error() {
        let lister = GitCommandLister::with_program("definitely-not-a-real-git-binary");
        let err = lister.count_commits(Path::new(".")).unwrap_err();
        assert!(matches!(err, VersionHeaderError::Execution(_)));
        assert!(err.to_string().contains("Failed to execute"));
    }

    #[test]
    fn test_non_git_directory_is_execution_error() {
        let dir = tempfile::tempdir().unwrap();
        let lister = GitCommandLister::new();
        // Either git is missing or it exits non-zero outside a repository
        let err = lister.head_hashes(dir.path()).unwrap_err();
        assert!(matches!(err, VersionHeaderError::Execution(_)));
    }
}

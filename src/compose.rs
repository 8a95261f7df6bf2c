use std::fmt;

use crate::probe::RepositoryState;
use crate::version::BaselineVersion;

/// Canonical version for one build: the baseline triple, the commit count as
/// build number, and the baseline tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedVersion {
    pub major: u64,
    pub minor: u64,
    pub release: u64,
    pub build_number: u64,
    pub tag: String,
    pub full_string: String,
}

impl ComposedVersion {
    /// `major.minor.release.build`, without the tag
    pub fn product(&self) -> String {
        format!(
            "{}.{}.{}.{}",
            self.major, self.minor, self.release, self.build_number
        )
    }

    /// Comma-separated numeric quadruple used by resource scripts
    pub fn file_version(&self) -> String {
        format!(
            "{},{},{},{}",
            self.major, self.minor, self.release, self.build_number
        )
    }
}

impl fmt::Display for ComposedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_string)
    }
}

/// Combine the baseline descriptor with repository history.
///
/// The build number is the commit count, copied as is. The `-tag` suffix is only
/// appended when the baseline tag is non-empty.
pub fn compose(baseline: &BaselineVersion, state: &RepositoryState) -> ComposedVersion {
    let mut composed = ComposedVersion {
        major: baseline.major,
        minor: baseline.minor,
        release: baseline.release,
        build_number: state.commit_count,
        tag: baseline.tag.clone(),
        full_string: String::new(),
    };

    let mut full_string = composed.product();
    if !composed.tag.is_empty() {
        full_string.push('-');
        full_string.push_str(&composed.tag);
    }
    composed.full_string = full_string;
    composed
}

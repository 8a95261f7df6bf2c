use std::fmt;
use std::fs;
use std::path::Path;

use regex::Regex;

use crate::error::{Result, VersionHeaderError};

/// Grammar of the baseline descriptor: `MAJOR.MINOR.RELEASE[-TAG]`.
pub const DESCRIPTOR_PATTERN: &str = r"^(\d+)\.(\d+)\.(\d+)-?(.*)$";

/// Maintainer-authored baseline version read from the descriptor file.
///
/// The tag is free-form and may be empty; it never includes the leading `-`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaselineVersion {
    pub major: u64,
    pub minor: u64,
    pub release: u64,
    pub tag: String,
}

impl BaselineVersion {
    /// Create a new baseline version
    pub fn new(major: u64, minor: u64, release: u64, tag: impl Into<String>) -> Self {
        BaselineVersion {
            major,
            minor,
            release,
            tag: tag.into(),
        }
    }

    /// Parse descriptor contents, reporting `origin` as the offending file on failure.
    ///
    /// Surrounding whitespace is stripped before matching. A component that does not
    /// fit in a `u64` is reported the same way as a grammar mismatch.
    pub fn parse(contents: &str, origin: &Path) -> Result<Self> {
        let trimmed = contents.trim();
        let format_error = || VersionHeaderError::format(origin, trimmed);

        let re = Regex::new(DESCRIPTOR_PATTERN).map_err(|_| format_error())?;
        let caps = re.captures(trimmed).ok_or_else(format_error)?;

        let component = |index: usize| -> Result<u64> {
            caps[index].parse::<u64>().map_err(|_| format_error())
        };

        Ok(BaselineVersion {
            major: component(1)?,
            minor: component(2)?,
            release: component(3)?,
            tag: caps
                .get(4)
                .map(|m| m.as_str().to_string())
                .unwrap_or_default(),
        })
    }
}

impl fmt::Display for BaselineVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.release)?;
        if !self.tag.is_empty() {
            write!(f, "-{}", self.tag)?;
        }
        Ok(())
    }
}

/// Reads and parses the baseline descriptor at `path`.
///
/// # Returns
/// * `Ok(BaselineVersion)` - Parsed descriptor
/// * `Err(Io)` - If the file cannot be read
/// * `Err(Format)` - If the contents do not match `MAJOR.MINOR.RELEASE[-TAG]`
pub fn read_baseline(path: &Path) -> Result<BaselineVersion> {
    let contents = fs::read_to_string(path)?;
    log::debug!("read version descriptor {}", path.display());
    BaselineVersion::parse(&contents, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn parse(s: &str) -> Result<BaselineVersion> {
        BaselineVersion::parse(s, Path::new("product.version"))
    }

    #[test]
    fn test_parse_without_tag() {
        let v = parse("1.0.0").unwrap();
        assert_eq!(v, BaselineVersion::new(1, 0, 0, ""));
    }

    #[test]
    fn test_parse_with_tag() {
        let v = parse("2.4.1-dev").unwrap();
        assert_eq!(v, BaselineVersion::new(2, 4, 1, "dev"));
    }

    #[test]
    fn test_parse_keeps_tag_verbatim() {
        let v = parse("10.20.30-rc1-hotfix.2").unwrap();
        assert_eq!(v.tag, "rc1-hotfix.2");
    }

    #[test]
    fn test_parse_strips_surrounding_whitespace() {
        let v = parse("  3.1.4-beta \n\n").unwrap();
        assert_eq!(v, BaselineVersion::new(3, 1, 4, "beta"));
    }

    #[test]
    fn test_parse_dash_without_tag_is_empty_tag() {
        let v = parse("1.2.3-").unwrap();
        assert_eq!(v.tag, "");
    }

    #[test]
    fn test_parse_tag_without_dash() {
        // The separator is optional in the grammar
        let v = parse("1.2.3rc").unwrap();
        assert_eq!(v, BaselineVersion::new(1, 2, 3, "rc"));
    }

    #[test]
    fn test_parse_many_numeric_triples() {
        for (m, n, r) in [(0, 0, 0), (1, 2, 3), (99, 0, 7), (4000, 12, 1)] {
            let v = parse(&format!("{}.{}.{}", m, n, r)).unwrap();
            assert_eq!(v, BaselineVersion::new(m, n, r, ""));
        }
    }

    #[test]
    fn test_parse_malformed() {
        for bad in ["abc", "", "1.2", "1..2", "v1.2.3", "1.2.x", "   "] {
            let err = parse(bad).unwrap_err();
            assert!(
                matches!(err, VersionHeaderError::Format { .. }),
                "'{}' should be a format error, got {:?}",
                bad,
                err
            );
        }
    }

    #[test]
    fn test_parse_internal_newline_rejected() {
        assert!(parse("1.2.3-dev\nextra").is_err());
    }

    #[test]
    fn test_parse_components_beyond_u32() {
        let v = parse("4294967296.0.12345678901-big").unwrap();
        assert_eq!(v, BaselineVersion::new(4_294_967_296, 0, 12_345_678_901, "big"));
    }

    #[test]
    fn test_parse_overflowing_component() {
        let err = parse("18446744073709551616.0.0").unwrap_err();
        assert!(matches!(err, VersionHeaderError::Format { .. }));
    }

    #[test]
    fn test_format_error_names_origin() {
        let err = BaselineVersion::parse("nope", Path::new("/tmp/x/product.version")).unwrap_err();
        assert!(err.to_string().contains("/tmp/x/product.version"));
    }

    #[test]
    fn test_display() {
        assert_eq!(BaselineVersion::new(2, 4, 1, "dev").to_string(), "2.4.1-dev");
        assert_eq!(BaselineVersion::new(1, 0, 0, "").to_string(), "1.0.0");
    }

    #[test]
    fn test_read_baseline_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"10.20.30-rc1\n").unwrap();
        file.flush().unwrap();

        let v = read_baseline(file.path()).unwrap();
        assert_eq!(v, BaselineVersion::new(10, 20, 30, "rc1"));
    }

    #[test]
    fn test_read_baseline_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_baseline(&dir.path().join("product.version")).unwrap_err();
        assert!(matches!(err, VersionHeaderError::Io(_)));
    }
}

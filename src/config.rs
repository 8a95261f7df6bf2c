use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::emit::EmitOptions;
use crate::error::{Result, VersionHeaderError};
use crate::git::Backend;

/// File name looked up inside the source directory
pub const CONFIG_FILE_NAME: &str = "version-headers.toml";

/// Represents the complete configuration for version-headers.
///
/// Every section is optional; a missing file behaves like an empty one.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub files: FilesConfig,

    #[serde(default)]
    pub header: HeaderConfig,

    #[serde(default)]
    pub probe: ProbeConfig,
}

fn default_descriptor() -> String {
    "product.version".to_string()
}

fn default_header_file() -> String {
    "version_auto.h".to_string()
}

fn default_release_marker() -> String {
    "git_action_release".to_string()
}

fn default_macro_prefix() -> String {
    "SMEXT".to_string()
}

/// Input and output file names.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct FilesConfig {
    /// Baseline descriptor, relative to the source directory
    #[serde(default = "default_descriptor")]
    pub descriptor: String,

    /// Header written into the output directory
    #[serde(default = "default_header_file")]
    pub header: String,

    /// Plain version marker written into the output directory
    #[serde(default = "default_release_marker")]
    pub release_marker: String,
}

impl Default for FilesConfig {
    fn default() -> Self {
        FilesConfig {
            descriptor: default_descriptor(),
            header: default_header_file(),
            release_marker: default_release_marker(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct HeaderConfig {
    #[serde(default = "default_macro_prefix")]
    pub macro_prefix: String,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        HeaderConfig {
            macro_prefix: default_macro_prefix(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct ProbeConfig {
    #[serde(default)]
    pub backend: Backend,
}

impl Config {
    /// Emitter settings derived from this configuration
    pub fn emit_options(&self) -> EmitOptions {
        EmitOptions {
            header_file: self.files.header.clone(),
            release_file: self.files.release_marker.clone(),
            macro_prefix: self.header.macro_prefix.clone(),
        }
    }

    /// Full path of the baseline descriptor for `source_dir`
    pub fn descriptor_path(&self, source_dir: &Path) -> PathBuf {
        source_dir.join(&self.files.descriptor)
    }

    fn validate(self) -> Result<Self> {
        let prefix = &self.header.macro_prefix;
        let valid_prefix = prefix
            .chars()
            .next()
            .map_or(false, |c| c.is_ascii_alphabetic() || c == '_')
            && prefix.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !valid_prefix {
            return Err(VersionHeaderError::config(format!(
                "macro_prefix '{}' is not a valid C identifier",
                prefix
            )));
        }

        for name in [&self.files.header, &self.files.release_marker] {
            if name.is_empty() || name.contains(&['/', '\\'][..]) {
                return Err(VersionHeaderError::config(format!(
                    "output file name '{}' must be a plain file name",
                    name
                )));
            }
        }

        Ok(self)
    }
}

/// Parse configuration text
pub fn parse_config(text: &str) -> Result<Config> {
    let config: Config =
        toml::from_str(text).map_err(|e| VersionHeaderError::config(e.to_string()))?;
    config.validate()
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `version-headers.toml` in the source directory
/// 3. `~/.config/.version-headers.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>, source_dir: &Path) -> Result<Config> {
    let path = if let Some(path) = config_path {
        Some(path.to_path_buf())
    } else if source_dir.join(CONFIG_FILE_NAME).exists() {
        Some(source_dir.join(CONFIG_FILE_NAME))
    } else {
        dirs::config_dir()
            .map(|dir| dir.join(format!(".{}", CONFIG_FILE_NAME)))
            .filter(|path| path.exists())
    };

    match path {
        Some(path) => {
            log::debug!("loading configuration from {}", path.display());
            let text = fs::read_to_string(&path)?;
            parse_config(&text)
        }
        None => Ok(Config::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.files.descriptor, "product.version");
        assert_eq!(config.emit_options(), EmitOptions::default());
        assert_eq!(config.probe.backend, Backend::Command);
    }

    #[test]
    fn test_empty_text_is_default() {
        assert_eq!(parse_config("").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_sections() {
        let config = parse_config(
            r#"
[header]
macro_prefix = "MYEXT"

[probe]
backend = "git2"
"#,
        )
        .unwrap();

        assert_eq!(config.header.macro_prefix, "MYEXT");
        assert_eq!(config.probe.backend, Backend::Git2);
        assert_eq!(config.files, FilesConfig::default());
    }

    #[test]
    fn test_invalid_prefix() {
        for bad in ["", "1ABC", "MY-EXT", "MY EXT"] {
            let text = format!("[header]\nmacro_prefix = \"{}\"\n", bad);
            assert!(matches!(
                parse_config(&text),
                Err(VersionHeaderError::Config(_))
            ));
        }
    }

    #[test]
    fn test_output_names_must_be_plain() {
        let text = "[files]\nheader = \"../escape.h\"\n";
        assert!(parse_config(text).is_err());
    }

    #[test]
    fn test_unknown_backend() {
        assert!(parse_config("[probe]\nbackend = \"svn\"\n").is_err());
    }

    #[test]
    fn test_descriptor_path() {
        let config = Config::default();
        assert_eq!(
            config.descriptor_path(Path::new("/src")),
            PathBuf::from("/src/product.version")
        );
    }

    #[test]
    fn test_load_from_source_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[files]\ndescriptor = \"VERSION\"\n",
        )
        .unwrap();

        let config = load_config(None, dir.path()).unwrap();
        assert_eq!(config.files.descriptor, "VERSION");
    }

    #[test]
    fn test_explicit_path_wins() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "[header]\nmacro_prefix = \"A\"\n").unwrap();
        let explicit = dir.path().join("other.toml");
        fs::write(&explicit, "[header]\nmacro_prefix = \"B\"\n").unwrap();

        let config = load_config(Some(&explicit), dir.path()).unwrap();
        assert_eq!(config.header.macro_prefix, "B");
    }

    #[test]
    fn test_missing_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(Some(&dir.path().join("missing.toml")), dir.path()).unwrap_err();
        assert!(matches!(err, VersionHeaderError::Io(_)));
    }
}

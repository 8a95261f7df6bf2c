//! Output artifacts: the generated C header and the plain release marker.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::compose::ComposedVersion;
use crate::error::Result;

/// Names and macro prefix for the two artifacts
#[derive(Debug, Clone, PartialEq)]
pub struct EmitOptions {
    pub header_file: String,
    pub release_file: String,
    pub macro_prefix: String,
}

impl Default for EmitOptions {
    fn default() -> Self {
        EmitOptions {
            header_file: "version_auto.h".to_string(),
            release_file: "git_action_release".to_string(),
            macro_prefix: "SMEXT".to_string(),
        }
    }
}

/// Paths written by [write_artifacts]
#[derive(Debug, Clone, PartialEq)]
pub struct EmittedArtifacts {
    pub header_path: PathBuf,
    pub release_path: PathBuf,
}

/// Render the header text.
///
/// Bindings, in order: tag, short changeset hash, major, minor, release, local
/// revision, unique id (`LOCAL_REV ":" CSET`), version string. The full hash and the
/// numeric file version follow.
pub fn render_header(
    prefix: &str,
    version: &ComposedVersion,
    short_hash: &str,
    long_hash: &str,
) -> String {
    format!(
        "#ifndef _{p}_AUTO_VERSION_INFORMATION_H_\n\
         #define _{p}_AUTO_VERSION_INFORMATION_H_\n\
         \n\
         #define {p}_BUILD_TAG\t\t\"{tag}\"\n\
         #define {p}_BUILD_CSET\t\t\"{cset}\"\n\
         #define {p}_BUILD_MAJOR\t\t\"{major}\"\n\
         #define {p}_BUILD_MINOR\t\t\"{minor}\"\n\
         #define {p}_BUILD_RELEASE\t\"{release}\"\n\
         #define {p}_BUILD_LOCAL_REV\t\"{local_rev}\"\n\
         \n\
         #define {p}_BUILD_UNIQUEID\t{p}_BUILD_LOCAL_REV \":\" {p}_BUILD_CSET\n\
         \n\
         #define {p}_VERSION_STRING\t\"{full}\"\n\
         #define {p}_BUILD_CSET_FULL\t\"{cset_full}\"\n\
         #define {p}_VERSION_FILE\t\t{file_version}\n\
         \n\
         #endif /* _{p}_AUTO_VERSION_INFORMATION_H_ */\n",
        p = prefix,
        tag = escape(&version.tag),
        cset = escape(short_hash),
        major = version.major,
        minor = version.minor,
        release = version.release,
        local_rev = version.build_number,
        full = escape(&version.full_string),
        cset_full = escape(long_hash),
        file_version = version.file_version(),
    )
}

/// Escape a value for use inside a C string literal
fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Write the header and the release marker into `output_dir`.
///
/// Existing files are overwritten. The directory must already exist; it is never
/// created. If the second write fails the first file is left in place.
pub fn write_artifacts(
    output_dir: &Path,
    options: &EmitOptions,
    version: &ComposedVersion,
    short_hash: &str,
    long_hash: &str,
) -> Result<EmittedArtifacts> {
    if !output_dir.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("output directory '{}' does not exist", output_dir.display()),
        )
        .into());
    }

    let header_path = output_dir.join(&options.header_file);
    let header = render_header(&options.macro_prefix, version, short_hash, long_hash);
    fs::write(&header_path, header).map_err(|e| with_path(e, &header_path))?;
    log::debug!("wrote {}", header_path.display());

    let release_path = output_dir.join(&options.release_file);
    fs::write(&release_path, &version.full_string).map_err(|e| with_path(e, &release_path))?;
    log::debug!("wrote {}", release_path.display());

    Ok(EmittedArtifacts {
        header_path,
        release_path,
    })
}

fn with_path(err: io::Error, path: &Path) -> io::Error {
    io::Error::new(err.kind(), format!("{}: {}", path.display(), err))
}

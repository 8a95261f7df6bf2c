//! Main workflow orchestration logic
//!
//! Runs the four stages in order: read the baseline descriptor, probe the
//! repository, compose the version, write the artifacts. Kept apart from
//! `main.rs` so the workflow can be driven without clap.

use std::path::{Path, PathBuf};

use crate::compose::{compose, ComposedVersion};
use crate::config::{self, Config};
use crate::emit::write_artifacts;
use crate::error::{Result, VersionHeaderError};
use crate::git::{Backend, RevisionLister};
use crate::probe::{probe, RepositoryState};
use crate::version::read_baseline;

/// Usage line printed when inputs are missing
pub const USAGE: &str = "version-headers <source_path> <output_folder>";

/// Arguments for the generate workflow
///
/// Mirrors the CLI Args in a form that does not depend on clap.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateArgs {
    /// Directory holding the descriptor; must be a repository root
    pub source_dir: PathBuf,

    /// Existing directory that receives the artifacts
    pub output_dir: PathBuf,

    /// Path to custom config file
    pub config_path: Option<PathBuf>,

    /// Overrides the configured probe backend
    pub backend: Option<Backend>,
}

impl GenerateArgs {
    /// Build arguments from the two positional inputs.
    ///
    /// Fails with a usage error if either is missing. Nothing on disk is touched.
    pub fn from_positionals(source: Option<PathBuf>, output: Option<PathBuf>) -> Result<Self> {
        match (source, output) {
            (Some(source_dir), Some(output_dir)) => Ok(GenerateArgs {
                source_dir,
                output_dir,
                config_path: None,
                backend: None,
            }),
            _ => Err(VersionHeaderError::usage(USAGE)),
        }
    }
}

/// Result of a successful run
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationReport {
    pub version: ComposedVersion,
    pub state: RepositoryState,
    pub header_path: PathBuf,
    pub release_path: PathBuf,
}

/// Main generate workflow
///
/// Loads configuration for the source directory, picks the configured lister and
/// runs [generate_with].
pub fn run_generate_workflow(args: &GenerateArgs) -> Result<GenerationReport> {
    let source_dir = absolute(&args.source_dir)?;
    let config = config::load_config(args.config_path.as_deref(), &source_dir)?;
    let backend = args.backend.unwrap_or(config.probe.backend);
    log::debug!("probing history with the {} backend", backend);

    let lister = backend.lister();
    generate_with(&lister, &source_dir, &args.output_dir, &config)
}

/// Run the workflow with an explicit lister and configuration.
///
/// The source directory is made absolute before the probe switches the working
/// directory.
pub fn generate_with<L: RevisionLister + ?Sized>(
    lister: &L,
    source_dir: &Path,
    output_dir: &Path,
    config: &Config,
) -> Result<GenerationReport> {
    let source_dir = absolute(source_dir)?;

    let state = probe(lister, &source_dir)?;
    let baseline = read_baseline(&config.descriptor_path(&source_dir))?;
    let version = compose(&baseline, &state);
    log::info!("resolved version {}", version);

    let written = write_artifacts(
        output_dir,
        &config.emit_options(),
        &version,
        &state.short_hash,
        &state.long_hash,
    )?;

    Ok(GenerationReport {
        version,
        state,
        header_path: written.header_path,
        release_path: written.release_path,
    })
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

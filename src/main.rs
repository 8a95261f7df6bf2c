use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use version_headers::cli::{self, GenerateArgs};
use version_headers::git::Backend;
use version_headers::{ui, VersionHeaderError};

#[derive(clap::Parser)]
#[command(
    name = "version-headers",
    version,
    about = "Generate build version headers from product.version and git history"
)]
struct Args {
    #[arg(help = "Source directory containing product.version (a git repository root)")]
    source_path: Option<PathBuf>,

    #[arg(help = "Existing directory that receives the generated files")]
    output_folder: Option<PathBuf>,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(short, long, help = "History backend: 'command' (git executable) or 'git2'")]
    backend: Option<Backend>,

    #[arg(short, long, help = "Enable debug logging")]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let mut generate_args =
        match GenerateArgs::from_positionals(args.source_path, args.output_folder) {
            Ok(generate_args) => generate_args,
            Err(VersionHeaderError::Usage(usage)) => {
                ui::display_usage(&usage);
                std::process::exit(1);
            }
            Err(e) => return Err(e.into()),
        };
    generate_args.config_path = args.config;
    generate_args.backend = args.backend;

    match cli::run_generate_workflow(&generate_args) {
        Ok(report) => {
            ui::display_report(&report);
            Ok(())
        }
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    }
}

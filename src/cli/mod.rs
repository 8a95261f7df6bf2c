//! Command-line workflow, independent of argument parsing.

pub mod orchestration;

pub use orchestration::{
    generate_with, run_generate_workflow, GenerateArgs, GenerationReport, USAGE,
};

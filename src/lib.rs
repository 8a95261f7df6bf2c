pub mod cli;
pub mod compose;
pub mod config;
pub mod emit;
pub mod error;
pub mod git;
pub mod probe;
pub mod ui;
pub mod version;

pub use error::{Result, VersionHeaderError};

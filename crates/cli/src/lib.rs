//! Command-line driver for the Javelin compiler.

pub mod cli;
pub mod pipeline;

pub use cli::Cli;
pub use pipeline::{compile_file, Options, PipelineError, PipelineResult};

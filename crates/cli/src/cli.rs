//! Command-line interface for Javelin.

use clap::Parser;
use std::path::PathBuf;

/// Javelin - compile a small object-oriented language to JVM class files
#[derive(Debug, Parser)]
#[command(name = "javelin")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Source file to compile
    pub file: PathBuf,

    /// Directory the class files are written to
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Report each compilation stage as it runs
    #[arg(short, long)]
    pub verbose: bool,

    /// Print the token stream
    #[arg(long)]
    pub tokens: bool,

    /// Print the abstract syntax tree
    #[arg(long)]
    pub ast: bool,

    /// Print the intermediate representation
    #[arg(long)]
    pub ir: bool,
}

impl Cli {
    pub fn options(&self) -> crate::pipeline::Options {
        crate::pipeline::Options {
            output: self.output.clone(),
            verbose: self.verbose,
            tokens: self.tokens,
            ast: self.ast,
            ir: self.ir,
        }
    }
}

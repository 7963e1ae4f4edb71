use clap::Parser;
use javelin_cli::{compile_file, Cli};
use owo_colors::OwoColorize;
use std::process;

fn main() {
    let cli = Cli::parse();

    match compile_file(&cli.file, &cli.options()) {
        Ok(written) => {
            println!(
                "{} compiled {} ({} class file{})",
                "✓".green(),
                cli.file.display(),
                written.len(),
                if written.len() == 1 { "" } else { "s" }
            );
        }
        Err(error) => {
            eprintln!("{} {error}", "error:".red().bold());
            process::exit(1);
        }
    }
}

// Declare modules
pub mod cli;
pub mod config;
pub mod formatter;
pub mod language;
pub mod matcher;
pub mod models;
pub mod scanner;

use anyhow::{Context, Result};
use clap::Parser;
use std::env;
use std::fs;
use std::path::PathBuf;

use self::cli::Cli;
use self::config::resolve_config;

/// Initializes components and orchestrates data flow.
pub fn run() -> Result<()> {
    // 1. Parse Args
    let args = Cli::parse();
    let to_stdout = args.stdout;

    // 2. Resolve Configuration (defaults < source-tree.toml < CLI)
    let config = resolve_config(args)?;

    // 3. Generate the document
    let document = formatter::generate(&config)?;

    // 4. Emit
    if to_stdout {
        print!("{document}");
        return Ok(());
    }

    let out_path = absolute_output_path(&config.output)?;
    if let Some(parent) = out_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory {}", parent.display()))?;
    }
    fs::write(&out_path, &document)
        .with_context(|| format!("Failed to write {}", out_path.display()))?;
    println!("Wrote {}", out_path.display());

    Ok(())
}

/// Relative output paths are resolved against the current directory, not the
/// project root.
pub(crate) fn absolute_output_path(output: &std::path::Path) -> Result<PathBuf> {
    if output.is_absolute() {
        Ok(output.to_path_buf())
    } else {
        let cwd = env::current_dir().context("Failed to get current directory")?;
        Ok(cwd.join(output))
    }
}

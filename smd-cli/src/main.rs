//! Git merge driver for RPM spec files.
//!
//! Invoked by git as `rpm-spec-merge-driver %O %A %B %L %P` (configured
//! via `merge.<name>.driver`): the ancestor, current and other versions
//! of the conflicting file, the conflict marker length and the path of
//! the merged file. The current file is rewritten in place with the
//! merged result.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use spec_merge::{driver, MergeOutcome, DEFAULT_MARKER_LENGTH};

/// Three-way merge driver for RPM spec files
#[derive(Parser)]
#[command(name = "rpm-spec-merge-driver")]
#[command(version)]
#[command(about = "Three-way merge driver for RPM spec files", long_about = None)]
struct Cli {
    /// Common ancestor version (%O)
    ancestor: PathBuf,

    /// Current version, rewritten in place with the result (%A)
    current: PathBuf,

    /// Other branch's version (%B)
    other: PathBuf,

    /// Conflict marker length (%L)
    #[arg(default_value_t = DEFAULT_MARKER_LENGTH)]
    marker_length: usize,

    /// Path of the merged file, used to label conflict markers (%P)
    #[arg(default_value = "merged")]
    label: String,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match driver::run(
        &cli.ancestor,
        &cli.current,
        &cli.other,
        cli.marker_length,
        &cli.label,
    ) {
        Ok(MergeOutcome::Clean) => ExitCode::SUCCESS,
        Ok(MergeOutcome::Conflicts(count)) => {
            eprintln!("MERGE FAILED: {} conflicts in {}.", count, cli.label);
            ExitCode::from(1)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        }
    }
}

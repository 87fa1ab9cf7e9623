//! Command line configuration and validation of the input path.

use std::path::{Path, PathBuf};

use clap::Parser;
use clockify_condense::{Error, Result};

/// Condense a Clockify time-tracking export: drop unused columns, merge
/// entries per project, description, billable flag and day, and write
/// `<name>_modified.csv` next to the input.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Args {
    /// Path to the exported CSV file
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub input: PathBuf,

    /// Print the report to stdout instead of writing the output file
    #[arg(short, long)]
    pub print: bool,
}

#[derive(Debug)]
pub struct Config {
    pub input: PathBuf,
    pub print: bool,
}

impl Config {
    pub fn from_args(args: Args) -> Result<Self> {
        validate_input(&args.input)?;
        Ok(Self {
            input: args.input,
            print: args.print,
        })
    }
}

/// Accepts only existing regular files with a `.csv` extension (any case).
fn validate_input(path: &Path) -> Result<()> {
    let invalid = |reason| Error::InvalidInputPath {
        path: path.to_owned(),
        reason,
    };
    let is_csv = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if !is_csv {
        return Err(invalid("not a .csv file"));
    }
    if !path.exists() {
        return Err(invalid("file does not exist"));
    }
    if !path.is_file() {
        return Err(invalid("not a regular file"));
    }
    Ok(())
}

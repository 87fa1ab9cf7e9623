//! Failures of a report conversion.
//!
//! Every variant aborts the whole run: a single bad row is never skipped,
//! and no output file is left behind.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("could not read input file {path:?}")]
    InputRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("input is not a valid CSV file")]
    CsvParse(#[from] csv::Error),
    #[error("required column {column:?} is missing from the header")]
    RequiredColumnMissing { column: &'static str },
    #[error("malformed start date {value:?} on line {line}")]
    MalformedDate { line: u64, value: String },
    #[error("malformed duration {value:?} on line {line}")]
    MalformedDuration { line: u64, value: String },
    #[error("could not write output file {path:?}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{path:?} is not a usable input: {reason}")]
    InvalidInputPath { path: PathBuf, reason: &'static str },
}

pub type Result<T> = std::result::Result<T, Error>;

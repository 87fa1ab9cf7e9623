mod aggregator;
mod csv_utils;
mod dto;
mod duration;
mod error;
mod projection;
mod report;
mod runner;

pub use aggregator::Aggregator;
pub use dto::{AggregatedRecord, GroupKey, OutputRow, DROPPED_COLUMNS, OUTPUT_HEADER};
pub use duration::{format_clock, format_decimal};
pub use error::{Error, Result};
pub use projection::ColumnProjector;
pub use report::Report;
pub use runner::{build_report, output_path_for, run};

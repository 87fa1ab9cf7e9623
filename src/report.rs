use std::io::Write;

use crate::csv_utils::write_csv;
use crate::dto::{AggregatedRecord, OutputRow, OUTPUT_HEADER};

/// The condensed report: one line per group, in report order.
#[derive(Debug, Default)]
pub struct Report {
    records: Vec<AggregatedRecord>,
}

impl Report {
    /// Orders `records` by start date, then by project, description and
    /// billable flag, so the result does not depend on the input order.
    pub fn new(records: impl IntoIterator<Item = AggregatedRecord>) -> Self {
        let mut records: Vec<_> = records.into_iter().collect();
        records.sort_by(|a, b| a.key.cmp(&b.key));
        Self { records }
    }

    pub fn records(&self) -> &[AggregatedRecord] {
        &self.records
    }

    pub fn rows(&self) -> impl Iterator<Item = OutputRow> + '_ {
        self.records.iter().map(OutputRow::from)
    }

    /// Serializes the header and every row.
    pub fn write<W: Write>(&self, writer: W) -> csv::Result<()> {
        write_csv(writer, OUTPUT_HEADER, self.rows())
    }
}

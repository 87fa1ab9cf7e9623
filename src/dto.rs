use std::cmp::Ordering;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::duration;

pub const PROJECT: &str = "Project";
pub const DESCRIPTION: &str = "Description";
pub const BILLABLE: &str = "Billable";
pub const START_DATE: &str = "Start Date";
pub const DURATION_DECIMAL_HOURS: &str = "Duration (decimal hours)";

/// Columns a report line is built from.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    PROJECT,
    DESCRIPTION,
    BILLABLE,
    START_DATE,
    DURATION_DECIMAL_HOURS,
];

/// Columns removed from every row before aggregation.
pub const DROPPED_COLUMNS: [&str; 12] = [
    "Client",
    "Task",
    "User",
    "Group",
    "Email",
    "Tags",
    "Start Time",
    "End Date",
    "End Time",
    "Duration (h)",
    "Billable Rate (EUR)",
    "Billable Amount (EUR)",
];

/// Header of the condensed report, in output column order.
pub const OUTPUT_HEADER: [&str; 6] = [
    PROJECT,
    DESCRIPTION,
    BILLABLE,
    START_DATE,
    "Duration (decimal)",
    "Duration (h short)",
];

/// Format of the `Start Date` cell in the export.
pub const INPUT_DATE_FORMAT: &str = "%d/%m/%Y";

/// Identity of one report line. Rows with equal keys are merged.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupKey {
    pub project: String,
    pub description: String,
    pub billable: String,
    pub start_date: NaiveDate,
}

/// Report order: by start date, then project, description and billable flag.
impl Ord for GroupKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.start_date
            .cmp(&other.start_date)
            .then_with(|| self.project.cmp(&other.project))
            .then_with(|| self.description.cmp(&other.description))
            .then_with(|| self.billable.cmp(&other.billable))
    }
}

impl PartialOrd for GroupKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedRecord {
    pub key: GroupKey,
    pub hours: Decimal,
}

impl AggregatedRecord {
    pub fn new(key: GroupKey) -> Self {
        Self {
            key,
            hours: Decimal::ZERO,
        }
    }
}

/// A serialized line of the report. Field order matches [`OUTPUT_HEADER`].
#[derive(Debug, Serialize, PartialEq)]
pub struct OutputRow {
    pub project: String,
    pub description: String,
    pub billable: String,
    pub start_date: NaiveDate,
    pub duration_decimal: String,
    pub duration_short: String,
}

impl From<&AggregatedRecord> for OutputRow {
    fn from(record: &AggregatedRecord) -> Self {
        Self {
            project: record.key.project.clone(),
            description: record.key.description.clone(),
            billable: record.key.billable.clone(),
            start_date: record.key.start_date,
            duration_decimal: duration::format_decimal(record.hours),
            duration_short: duration::format_clock(record.hours),
        }
    }
}

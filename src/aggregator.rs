use std::collections::HashMap;
use std::ops::RangeInclusive;
use std::str::FromStr;

use chrono::NaiveDate;
use csv::StringRecord;
use rust_decimal::Decimal;

use crate::dto::{
    AggregatedRecord, GroupKey, BILLABLE, DESCRIPTION, DURATION_DECIMAL_HOURS, INPUT_DATE_FORMAT,
    PROJECT, START_DATE,
};
use crate::{Error, Result};

/// Positions of the fields a group is built from, resolved by name.
#[derive(Debug, Clone, Copy, PartialEq)]
struct FieldIndices {
    project: usize,
    description: usize,
    billable: usize,
    start_date: usize,
    duration: usize,
}

impl FieldIndices {
    fn resolve(header: &StringRecord) -> Result<Self> {
        let find = |column: &'static str| {
            header
                .iter()
                .position(|name| name == column)
                .ok_or(Error::RequiredColumnMissing { column })
        };
        Ok(Self {
            project: find(PROJECT)?,
            description: find(DESCRIPTION)?,
            billable: find(BILLABLE)?,
            start_date: find(START_DATE)?,
            duration: find(DURATION_DECIMAL_HOURS)?,
        })
    }
}

/// Sums durations of projected rows per [`GroupKey`].
pub struct Aggregator {
    fields: FieldIndices,
    records: HashMap<GroupKey, AggregatedRecord>,
}

impl Aggregator {
    /// Creates an aggregator for rows shaped like `header`.
    /// Fails if any field of the group key or the duration column is absent.
    pub fn new(header: &StringRecord) -> Result<Self> {
        Ok(Self {
            fields: FieldIndices::resolve(header)?,
            records: HashMap::new(),
        })
    }

    /// Adds one row to its group. `line` is only used for error reporting.
    pub fn add(&mut self, line: u64, row: &StringRecord) -> Result<()> {
        let cell = |index: usize| row.get(index).unwrap_or_default();

        let date_cell = cell(self.fields.start_date);
        let start_date = parse_start_date(date_cell).ok_or_else(|| Error::MalformedDate {
            line,
            value: date_cell.to_owned(),
        })?;

        let duration_cell = cell(self.fields.duration);
        let malformed_duration = || Error::MalformedDuration {
            line,
            value: duration_cell.to_owned(),
        };
        let hours = parse_hours(duration_cell).ok_or_else(malformed_duration)?;

        let key = GroupKey {
            project: cell(self.fields.project).to_owned(),
            description: cell(self.fields.description).to_owned(),
            billable: cell(self.fields.billable).to_owned(),
            start_date,
        };
        let record = self
            .records
            .entry(key)
            .or_insert_with_key(|key| AggregatedRecord::new(key.clone()));
        record.hours = record
            .hours
            .checked_add(hours)
            .ok_or_else(malformed_duration)?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Hands the accumulated groups over, in no particular order.
    pub fn into_records(self) -> impl Iterator<Item = AggregatedRecord> {
        self.records.into_values()
    }
}

/// Parses a `dd/mm/yyyy` date. Day and month may have one or two digits,
/// the year must have four. Surrounding whitespace is rejected.
fn parse_start_date(cell: &str) -> Option<NaiveDate> {
    let mut parts = cell.split('/');
    let (day, month, year) = (parts.next()?, parts.next()?, parts.next()?);
    let is_digits = |part: &str, widths: RangeInclusive<usize>| {
        widths.contains(&part.len()) && part.bytes().all(|b| b.is_ascii_digit())
    };
    if parts.next().is_some()
        || !is_digits(day, 1..=2)
        || !is_digits(month, 1..=2)
        || !is_digits(year, 4..=4)
    {
        return None;
    }
    NaiveDate::parse_from_str(cell, INPUT_DATE_FORMAT).ok()
}

/// Parses non-negative decimal hours: digits with an optional fractional part.
fn parse_hours(cell: &str) -> Option<Decimal> {
    let (whole, fraction) = cell.split_once('.').unwrap_or((cell, ""));
    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if whole.is_empty() || !all_digits(whole) || !all_digits(fraction) {
        return None;
    }
    Decimal::from_str(cell).ok()
}

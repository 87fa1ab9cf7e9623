//! Column projection.
//!
//! Column names are resolved against the header once per run; the resulting
//! index set is applied to every row of the same file.

use std::collections::BTreeSet;

use csv::StringRecord;

#[derive(Debug)]
pub struct ColumnProjector {
    dropped: BTreeSet<usize>,
}

impl ColumnProjector {
    /// Resolves `names` to positions in `header`.
    /// Names that are not present in the header are ignored.
    pub fn new<'a>(header: &StringRecord, names: impl IntoIterator<Item = &'a str>) -> Self {
        let dropped = names
            .into_iter()
            .filter_map(|name| header.iter().position(|column| column == name))
            .collect();
        Self { dropped }
    }

    pub fn dropped_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.dropped.iter().copied()
    }

    /// Returns a copy of `row` without the dropped cells.
    /// Surviving cells keep their relative order.
    pub fn project(&self, row: &StringRecord) -> StringRecord {
        row.iter()
            .enumerate()
            .filter(|(index, _)| !self.dropped.contains(index))
            .map(|(_, cell)| cell)
            .collect()
    }
}

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::aggregator::Aggregator;
use crate::csv_utils::{read_table, write_atomically};
use crate::dto::{DROPPED_COLUMNS, REQUIRED_COLUMNS};
use crate::projection::ColumnProjector;
use crate::report::Report;
use crate::{Error, Result};

const OUTPUT_SUFFIX: &str = "_modified.csv";

/// Builds the condensed report from a time-tracking export.
///
/// The whole input is read before anything is aggregated. Any malformed
/// row fails the entire conversion.
///
/// # Errors
/// Returns an error if:
/// * The CSV is malformed or a row has the wrong number of cells
/// * A group key column or the duration column is missing
/// * A start date or duration cannot be parsed
pub fn build_report<R: Read>(reader: R) -> Result<Report> {
    let table = read_table(reader)?;
    debug!("Read {} data rows", table.rows.len());

    let projector = ColumnProjector::new(&table.header, DROPPED_COLUMNS);
    debug!(
        "Dropping columns at {:?}",
        projector.dropped_indices().collect::<Vec<_>>()
    );
    let header = projector.project(&table.header);
    let discarded: Vec<_> = header
        .iter()
        .filter(|name| !REQUIRED_COLUMNS.contains(name))
        .collect();
    if !discarded.is_empty() {
        debug!("Columns not carried into the report: {:?}", discarded);
    }

    let mut aggregator = Aggregator::new(&header)?;
    for (index, row) in table.rows.iter().enumerate() {
        // Header is line 1; fall back to counting rows if the reader had no position.
        let line = row
            .position()
            .map(|position| position.line())
            .unwrap_or(index as u64 + 2);
        aggregator.add(line, &projector.project(row))?;
    }
    info!(
        "Merged {} rows into {} groups",
        table.rows.len(),
        aggregator.len()
    );

    Ok(Report::new(aggregator.into_records()))
}

/// Path of the report written for `input`: the same directory, with the
/// `.csv` suffix replaced by `_modified.csv`.
pub fn output_path_for(input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    input.with_file_name(format!("{stem}{OUTPUT_SUFFIX}"))
}

/// Converts the export at `input_path` and writes the report next to it,
/// overwriting any previous report. Returns the path of the report.
///
/// No output file is created or replaced unless the conversion succeeds.
///
/// # Errors
/// Returns an error if:
/// * The input file cannot be read
/// * The report cannot be built (see [`build_report`])
/// * Writing the output file fails
pub fn run<P: AsRef<Path>>(input_path: P) -> Result<PathBuf> {
    let input_path = input_path.as_ref();
    info!("Processing {}", input_path.display());

    let file = File::open(input_path).map_err(|source| Error::InputRead {
        path: input_path.to_owned(),
        source,
    })?;
    let report = build_report(file)?;

    let output_path = output_path_for(input_path);
    let output_write = |source: io::Error| Error::OutputWrite {
        path: output_path.clone(),
        source,
    };

    let mut contents = Vec::new();
    report
        .write(&mut contents)
        .map_err(|err| output_write(err.into()))?;
    write_atomically(&output_path, &contents).map_err(output_write)?;

    info!(
        "Wrote {} report rows to {}",
        report.records().len(),
        output_path.display()
    );
    Ok(output_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;
    use std::fs;

    type TestResult = std::result::Result<(), Box<dyn StdError>>;

    const HEADER: &str = "Project,Client,Description,Task,User,Group,Email,Tags,Billable,Start Date,Start Time,End Date,End Time,Duration (h),Duration (decimal hours),Billable Rate (EUR),Billable Amount (EUR)";

    fn export(rows: &[&str]) -> String {
        let mut out = String::from(HEADER);
        out.push('\n');
        for row in rows {
            out.push_str(row);
            out.push('\n');
        }
        out
    }

    fn render(report: &Report) -> std::result::Result<String, Box<dyn StdError>> {
        let mut output = Vec::new();
        report.write(&mut output)?;
        Ok(String::from_utf8(output)?)
    }

    #[test]
    fn test_example_export() -> TestResult {
        let report = build_report(File::open("data/example_export.csv")?)?;

        let expected = "Project,Description,Billable,Start Date,Duration (decimal),Duration (h short)
Acme,Development,Yes,2024-03-01,3.75,03:45
Acme,Meetings,No,2024-03-01,0.50,00:30
Beta,\"Review, QA\",Yes,2024-03-01,1.99,01:59
Acme,Development,Yes,2024-03-02,7.50,07:30
Beta,\"Review, QA\",Yes,2024-03-02,2.00,02:00
";
        assert_eq!(render(&report)?, expected);
        Ok(())
    }

    #[test]
    fn test_rows_sharing_a_key_are_merged() -> TestResult {
        let input = export(&[
            "Acme,Corp,Dev,,Jo,,jo@example.com,,Yes,01/03/2024,09:00:00,01/03/2024,10:30:00,01:30:00,1.5,100,150",
            "Acme,Corp,Dev,,Jo,,jo@example.com,,Yes,01/03/2024,11:00:00,01/03/2024,13:15:00,02:15:00,2.25,100,225",
        ]);
        let report = build_report(input.as_bytes())?;

        let expected = "Project,Description,Billable,Start Date,Duration (decimal),Duration (h short)
Acme,Dev,Yes,2024-03-01,3.75,03:45
";
        assert_eq!(render(&report)?, expected);
        Ok(())
    }

    #[test]
    fn test_header_only_export() -> TestResult {
        let report = build_report(export(&[]).as_bytes())?;
        assert!(report.records().is_empty());
        assert_eq!(
            render(&report)?,
            "Project,Description,Billable,Start Date,Duration (decimal),Duration (h short)\n"
        );
        Ok(())
    }

    #[test]
    fn test_malformed_date_reports_line() {
        let input = export(&[
            "Acme,,Dev,,,,,,Yes,01/03/2024,,,,,1,,",
            "Acme,,Dev,,,,,,Yes,not-a-date,,,,,1,,",
        ]);
        assert!(matches!(
            build_report(input.as_bytes()),
            Err(Error::MalformedDate { line: 3, .. })
        ));
    }

    #[test]
    fn test_malformed_duration() {
        let input = export(&["Acme,,Dev,,,,,,Yes,01/03/2024,,,,,1h,,"]);
        assert!(matches!(
            build_report(input.as_bytes()),
            Err(Error::MalformedDuration { line: 2, .. })
        ));
    }

    #[test]
    fn test_missing_required_column() {
        let input = "Project,Description,Start Date,Duration (decimal hours)\n";
        assert!(matches!(
            build_report(input.as_bytes()),
            Err(Error::RequiredColumnMissing { column: "Billable" })
        ));
    }

    #[test]
    fn test_ragged_row() {
        let input = export(&["Acme,Dev,Yes"]);
        assert!(matches!(
            build_report(input.as_bytes()),
            Err(Error::CsvParse(_))
        ));
    }

    #[test]
    fn test_output_path() {
        assert_eq!(
            output_path_for(Path::new("/tmp/exports/report.csv")),
            PathBuf::from("/tmp/exports/report_modified.csv")
        );
        assert_eq!(
            output_path_for(Path::new("report.csv")),
            PathBuf::from("report_modified.csv")
        );
    }

    #[test]
    fn test_run_writes_next_to_input() -> TestResult {
        let dir = tempfile::tempdir()?;
        let input_path = dir.path().join("export.csv");
        fs::copy("data/example_export.csv", &input_path)?;
        fs::write(dir.path().join("export_modified.csv"), "stale")?;

        let output_path = run(&input_path)?;

        assert_eq!(output_path, dir.path().join("export_modified.csv"));
        let output = fs::read_to_string(&output_path)?;
        assert!(output.starts_with("Project,Description,Billable,Start Date,"));
        assert_eq!(output.lines().count(), 6);
        Ok(())
    }

    #[test]
    fn test_run_header_only_export_writes_header_only() -> TestResult {
        let dir = tempfile::tempdir()?;
        let input_path = dir.path().join("export.csv");
        fs::write(&input_path, export(&[]))?;

        let output_path = run(&input_path)?;

        assert_eq!(output_path, dir.path().join("export_modified.csv"));
        assert_eq!(
            fs::read_to_string(&output_path)?,
            "Project,Description,Billable,Start Date,Duration (decimal),Duration (h short)\n"
        );
        Ok(())
    }

    #[test]
    fn test_run_is_idempotent() -> TestResult {
        let dir = tempfile::tempdir()?;
        let input_path = dir.path().join("export.csv");
        fs::copy("data/example_export.csv", &input_path)?;

        let first = fs::read(run(&input_path)?)?;
        let second = fs::read(run(&input_path)?)?;
        assert_eq!(first, second);
        Ok(())
    }

    #[test]
    fn test_failed_run_leaves_no_output() -> TestResult {
        let dir = tempfile::tempdir()?;
        let input_path = dir.path().join("export.csv");
        fs::write(
            &input_path,
            export(&["Acme,,Dev,,,,,,Yes,not-a-date,,,,,1,,"]),
        )?;

        let result = run(&input_path);

        assert!(matches!(result, Err(Error::MalformedDate { .. })));
        assert!(!dir.path().join("export_modified.csv").exists());
        assert_eq!(fs::read_dir(dir.path())?.count(), 1);
        Ok(())
    }

    #[test]
    fn test_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            run(dir.path().join("missing.csv")),
            Err(Error::InputRead { .. })
        ));
    }
}

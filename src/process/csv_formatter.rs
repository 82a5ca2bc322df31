use anyhow::Result;
use std::path::Path;
use tracing::{info, instrument, warn};

use crate::normalize::{is_missing, normalize_date_to_dmy, normalize_time, PrayerColumn};
use crate::process::raw_table::{self, RawTable};

/// Rows shown in the preview printed after formatting.
pub const PREVIEW_ROWS: usize = 5;

/// What one formatting pass did to a table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatReport {
    pub rows: usize,
    /// Non-empty cells that could not be parsed and were written back as-is.
    pub unchanged_cells: usize,
}

/// `Date`, `Day` and the six prayer columns, in timetable order.
pub fn required_columns() -> Vec<&'static str> {
    let mut cols = vec!["Date", "Day"];
    cols.extend(PrayerColumn::ALL.iter().map(|c| c.header()));
    cols
}

/// Normalize the `Date` column to `dd-mm-yyyy` and every prayer column to
/// 24-hour `HHMM`, in place. Other columns, and the order of rows and
/// columns, are left alone.
pub fn format_table(table: &mut RawTable) -> Result<FormatReport> {
    let idx = table.require_columns(&required_columns())?;
    let date_idx = idx[0];
    // idx[1] is Day, which passes through untouched
    let prayer_idx: Vec<(PrayerColumn, usize)> =
        PrayerColumn::ALL.into_iter().zip(idx[2..].iter().copied()).collect();

    let mut report = FormatReport::default();
    for (row_no, row) in table.rows.iter_mut().enumerate() {
        // NA markers are missing values in every column, not malformed ones
        row.iter_mut().filter(|c| is_missing(c)).for_each(String::clear);

        if !row[date_idx].is_empty() {
            let date = normalize_date_to_dmy(&row[date_idx]);
            if date.is_unchanged() {
                warn!(row = row_no + 1, value = %row[date_idx], "date left unchanged");
                report.unchanged_cells += 1;
            }
            row[date_idx] = date.into_string();
        }

        for &(column, i) in &prayer_idx {
            let cell = row[i].as_str();
            let time = normalize_time((!cell.is_empty()).then_some(cell), column.header());
            if time.is_unchanged() && !time.as_str().is_empty() {
                warn!(row = row_no + 1, %column, value = %time, "time left unchanged");
                report.unchanged_cells += 1;
            }
            row[i] = time.into_string();
        }
        report.rows += 1;
    }

    Ok(report)
}

/// Read `input`, normalize it with [`format_table`], write the result to
/// `output` and print a preview of the first rows.
#[instrument(level = "info", skip_all, fields(input = %input.as_ref().display(), output = %output.as_ref().display()))]
pub fn format_prayer_times<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
) -> Result<(RawTable, FormatReport)> {
    let mut table = raw_table::load_csv(&input)?;
    let report = format_table(&mut table)?;
    raw_table::write_csv(&table, &output)?;
    info!(
        rows = report.rows,
        unchanged = report.unchanged_cells,
        "formatted csv written"
    );

    println!("Formatted CSV saved as: {}", output.as_ref().display());
    println!("\nFirst {} rows of formatted data:", PREVIEW_ROWS);
    println!("{}", table.preview(PREVIEW_ROWS));

    Ok((table, report))
}

/// First `n` values of each prayer column, for a quick eyeball check.
pub fn sample_conversions(table: &RawTable, n: usize) -> Vec<(PrayerColumn, Vec<&str>)> {
    PrayerColumn::ALL
        .into_iter()
        .filter_map(|c| {
            let idx = table.column_index(c.header())?;
            Some((c, table.column_values(idx).take(n).collect()))
        })
        .collect()
}

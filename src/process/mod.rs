// src/process/mod.rs
use anyhow::Result;
use std::path::Path;
use tracing::{info, instrument};

pub mod csv_formatter;
pub mod json_builder;
pub mod raw_table;

pub use csv_formatter::{format_prayer_times, format_table, FormatReport};
pub use json_builder::{build_document, csv_to_json, DayEntry, PrayerDocument, Prayers, Record};
pub use raw_table::RawTable;

/// Raw timetable → normalized CSV at `csv_out` → grouped JSON at `json_out`.
#[instrument(level = "info", skip_all, fields(input = %input.as_ref().display()))]
pub fn run_pipeline<P, Q, R>(input: P, csv_out: Q, json_out: R) -> Result<PrayerDocument>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    R: AsRef<Path>,
{
    // ─── 1) normalize the raw csv ────────────────────────────────────
    let (_, report) = format_prayer_times(&input, &csv_out)?;
    info!(rows = report.rows, unchanged = report.unchanged_cells, "stage 1 done");

    // ─── 2) group by month into json ─────────────────────────────────
    let doc = csv_to_json(&csv_out, &json_out)?;
    info!(months = doc.prayer_times.len(), "stage 2 done");

    Ok(doc)
}

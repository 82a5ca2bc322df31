//! csv_formatter.rs
//!
//! Normalizes a raw prayer timetable CSV: `Date` becomes `dd-mm-yyyy`, each
//! prayer time becomes 24-hour `HHMM`.

use clap::Parser;
use std::{path::PathBuf, process::ExitCode};
use tracing::info;

use prayerfmt::{
    cli::{self, DEFAULT_CSV_OUTPUT, DEFAULT_INPUT},
    process::csv_formatter::{format_prayer_times, sample_conversions},
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Normalize dates and prayer times in a timetable CSV")]
struct Args {
    /// Raw timetable CSV
    #[arg(default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Where to write the normalized CSV
    #[arg(default_value = DEFAULT_CSV_OUTPUT)]
    output: PathBuf,
}

fn main() -> ExitCode {
    cli::init_tracing();
    let args = Args::parse();
    info!(input = %args.input.display(), output = %args.output.display(), "formatting");

    match format_prayer_times(&args.input, &args.output) {
        Ok((table, report)) => {
            println!(
                "\nSuccessfully converted {} to {}",
                args.input.display(),
                args.output.display()
            );
            if report.unchanged_cells > 0 {
                println!(
                    "{} cell(s) could not be parsed and were left as-is",
                    report.unchanged_cells
                );
            }

            println!("\nSample conversions:");
            for (column, values) in sample_conversions(&table, 3) {
                println!("{}: {}", column, cli::quoted_list(values));
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            cli::report_failure(&args.input, &e);
            ExitCode::FAILURE
        }
    }
}

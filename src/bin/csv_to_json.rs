//! csv_to_json.rs
//!
//! Turns a normalized timetable CSV into one JSON document grouped by month.

use clap::Parser;
use std::{io, path::PathBuf, process::ExitCode};
use tracing::info;

use prayerfmt::{
    cli::{self, DEFAULT_CSV_OUTPUT, DEFAULT_JSON_OUTPUT},
    process::json_builder::{csv_to_json, write_document},
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Group a normalized timetable CSV into monthly JSON")]
struct Args {
    /// Normalized timetable CSV (dd-mm-yyyy dates, HHMM times)
    #[arg(default_value = DEFAULT_CSV_OUTPUT)]
    input: PathBuf,

    /// Where to write the JSON document
    #[arg(default_value = DEFAULT_JSON_OUTPUT)]
    output: PathBuf,
}

fn main() -> ExitCode {
    cli::init_tracing();
    let args = Args::parse();
    info!(input = %args.input.display(), output = %args.output.display(), "converting");

    let result = csv_to_json(&args.input, &args.output).and_then(|doc| {
        if let Some(sample) = doc.sample() {
            println!("\nSample of JSON structure:");
            write_document(&sample, io::stdout())?;
            println!();
        }
        Ok(doc)
    });

    match result {
        Ok(_) => {
            println!(
                "\nSuccessfully converted {} to {}",
                args.input.display(),
                args.output.display()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            cli::report_failure(&args.input, &e);
            ExitCode::FAILURE
        }
    }
}

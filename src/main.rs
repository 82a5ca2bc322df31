use clap::Parser;
use std::{path::PathBuf, process::ExitCode};
use tracing::info;

use prayerfmt::{
    cli::{self, DEFAULT_CSV_OUTPUT, DEFAULT_INPUT, DEFAULT_JSON_OUTPUT},
    process,
};

/// Raw timetable CSV → normalized CSV → monthly JSON, in one go.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Raw timetable CSV
    #[arg(default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Normalized CSV output
    #[arg(default_value = DEFAULT_CSV_OUTPUT)]
    csv_output: PathBuf,

    /// JSON output
    #[arg(default_value = DEFAULT_JSON_OUTPUT)]
    json_output: PathBuf,
}

fn main() -> ExitCode {
    // ─── 1) init logging ─────────────────────────────────────────────
    cli::init_tracing();
    info!("startup");
    let args = Args::parse();

    // ─── 2) run both stages ──────────────────────────────────────────
    match process::run_pipeline(&args.input, &args.csv_output, &args.json_output) {
        Ok(doc) => {
            println!(
                "\nSuccessfully converted {} to {} and {}",
                args.input.display(),
                args.csv_output.display(),
                args.json_output.display()
            );
            info!(year = doc.year, "all done");
            ExitCode::SUCCESS
        }
        Err(e) => {
            cli::report_failure(&args.input, &e);
            ExitCode::FAILURE
        }
    }
}

// src/cli.rs
use std::{io, path::Path};
use tracing::error;
use tracing_subscriber::{fmt, EnvFilter};

/// Default paths, relative to the directory the tools are run from.
pub const DEFAULT_INPUT: &str = "../2024/csv/prayer_times_2024.csv";
pub const DEFAULT_CSV_OUTPUT: &str = "Expected.csv";
pub const DEFAULT_JSON_OUTPUT: &str = "Expected.json";

/// Console logging on stderr, filtered by `RUST_LOG` (default `info`).
/// Stdout is left to the conversion report.
pub fn init_tracing() {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Render `items` the way the conversion report prints lists:
/// `['0543', '0544']`.
pub fn quoted_list<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let quoted: Vec<String> = items
        .into_iter()
        .map(|s| format!("'{}'", s.as_ref()))
        .collect();
    format!("[{}]", quoted.join(", "))
}

/// True if anything in the error chain is an I/O "not found".
pub fn is_file_not_found(err: &anyhow::Error) -> bool {
    err.chain()
        .filter_map(|e| e.downcast_ref::<io::Error>())
        .any(|e| e.kind() == io::ErrorKind::NotFound)
}

/// Print the user-facing failure message for a run over `input`.
pub fn report_failure(input: &Path, err: &anyhow::Error) {
    error!("{:#}", err);
    if is_file_not_found(err) {
        println!(
            "Error: File '{}' not found. Please make sure it exists.",
            input.display()
        );
    } else {
        println!("An error occurred: {:#}", err);
    }
}

use anyhow::{bail, Context, Result};
use csv::{ReaderBuilder, Terminator, WriterBuilder};
use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
    path::Path,
};
use tracing::debug;

/// A header-ordered table of string cells, exactly as read from a CSV file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    /// Column names from the header row, in file order.
    pub headers: Vec<String>,
    /// One Vec per data row; short rows are padded with empty cells so every
    /// row is `headers.len()` wide.
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Resolve each of `names` to its column index, failing with every
    /// missing name listed.
    pub fn require_columns(&self, names: &[&str]) -> Result<Vec<usize>> {
        let missing: Vec<&str> = names
            .iter()
            .copied()
            .filter(|n| self.column_index(n).is_none())
            .collect();
        if !missing.is_empty() {
            bail!(
                "missing required column(s) {:?}; header is {:?}",
                missing,
                self.headers
            );
        }
        Ok(names.iter().filter_map(|n| self.column_index(n)).collect())
    }

    pub fn column_values(&self, idx: usize) -> impl Iterator<Item = &str> + '_ {
        self.rows.iter().map(move |r| r[idx].as_str())
    }

    /// Render the first `n` rows as a right-aligned text table.
    pub fn preview(&self, n: usize) -> String {
        let shown = &self.rows[..n.min(self.rows.len())];
        let widths: Vec<usize> = self
            .headers
            .iter()
            .enumerate()
            .map(|(i, h)| {
                shown
                    .iter()
                    .map(|r| r[i].chars().count())
                    .chain(std::iter::once(h.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let render = |cells: &[String]| -> String {
            cells
                .iter()
                .zip(&widths)
                .map(|(c, w)| format!("{:>w$}", c, w = *w))
                .collect::<Vec<_>>()
                .join(" ")
        };

        let mut out = render(&self.headers[..]);
        for row in shown {
            out.push('\n');
            out.push_str(&render(&row[..]));
        }
        out
    }
}

/// Load a headed CSV file into memory.
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<RawTable> {
    let path = path.as_ref();
    let file =
        File::open(path).with_context(|| format!("Failed to open CSV file: {:?}", path))?;
    let table = read_table(BufReader::new(file))
        .with_context(|| format!("Failed to parse CSV file: {:?}", path))?;
    debug!(
        path = %path.display(),
        columns = table.headers.len(),
        rows = table.rows.len(),
        "loaded csv"
    );
    Ok(table)
}

pub fn read_table<R: Read>(reader: R) -> Result<RawTable> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()
        .context("CSV has no header row")?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let record = result.with_context(|| format!("CSV parse error at record {}", idx + 1))?;
        if record.len() > headers.len() {
            bail!(
                "record {} has {} fields, header has {}",
                idx + 1,
                record.len(),
                headers.len()
            );
        }
        let mut row: Vec<String> = record.iter().map(str::to_string).collect();
        row.resize(headers.len(), String::new());
        rows.push(row);
    }

    Ok(RawTable { headers, rows })
}

/// Write `table` with its header row, `\n` line endings and minimal quoting.
pub fn write_csv<P: AsRef<Path>>(table: &RawTable, path: P) -> Result<()> {
    let path = path.as_ref();
    let file =
        File::create(path).with_context(|| format!("Failed to create CSV file: {:?}", path))?;
    write_table(table, BufWriter::new(file))
        .with_context(|| format!("Failed to write CSV file: {:?}", path))
}

pub fn write_table<W: Write>(table: &RawTable, writer: W) -> Result<()> {
    let mut wtr = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);
    wtr.write_record(&table.headers)?;
    for row in &table.rows {
        wtr.write_record(row)?;
    }
    wtr.flush()?;
    Ok(())
}

use anyhow::{anyhow, Context, Result};
use chrono::Datelike;
use csv::ReaderBuilder;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
    path::Path,
};
use tracing::{debug, info, instrument};

use crate::cli::quoted_list;
use crate::normalize::{month_name, normalize_date_to_ymd, parse_dmy, time_with_colon};

/// One row of a normalized timetable CSV. Every cell is kept as text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Record {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Day")]
    pub day: String,
    #[serde(rename = "Subuh")]
    pub subuh: String,
    #[serde(rename = "Syuruk")]
    pub syuruk: String,
    #[serde(rename = "Zohor")]
    pub zohor: String,
    #[serde(rename = "Asar")]
    pub asar: String,
    #[serde(rename = "Maghrib")]
    pub maghrib: String,
    #[serde(rename = "Isyak")]
    pub isyak: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prayers {
    pub subuh: String,
    pub syuruk: String,
    pub zohor: String,
    pub asar: String,
    pub maghrib: String,
    pub isyak: String,
}

impl Prayers {
    fn from_record(rec: &Record) -> Self {
        let hhmm = |s: &str| time_with_colon(Some(s)).into_string();
        Self {
            subuh: hhmm(&rec.subuh),
            syuruk: hhmm(&rec.syuruk),
            zohor: hhmm(&rec.zohor),
            asar: hhmm(&rec.asar),
            maghrib: hhmm(&rec.maghrib),
            isyak: hhmm(&rec.isyak),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayEntry {
    /// `yyyy-mm-dd`
    pub date: String,
    pub day: String,
    pub prayers: Prayers,
}

/// A year of prayer times grouped by month name. Months keep the order in
/// which they first appear in the source, days keep their row order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrayerDocument {
    pub year: i32,
    pub prayer_times: IndexMap<String, Vec<DayEntry>>,
}

impl PrayerDocument {
    /// The document cut down to the first day of the first month.
    pub fn sample(&self) -> Option<PrayerDocument> {
        let (month, days) = self.prayer_times.first()?;
        let first = days.first()?.clone();
        Some(PrayerDocument {
            year: self.year,
            prayer_times: IndexMap::from([(month.clone(), vec![first])]),
        })
    }

    pub fn month_counts(&self) -> Vec<(&str, usize)> {
        self.prayer_times
            .iter()
            .map(|(m, days)| (m.as_str(), days.len()))
            .collect()
    }
}

pub fn read_records<R: Read>(reader: R) -> Result<Vec<Record>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);
    rdr.deserialize::<Record>()
        .enumerate()
        .map(|(idx, r)| r.with_context(|| format!("CSV parse error at record {}", idx + 1)))
        .collect()
}

/// Group normalized records into a [`PrayerDocument`].
///
/// The year comes from the first row. Every `Date` must be `dd-mm-yyyy`,
/// since it decides which month a row lands in.
pub fn build_document(records: &[Record]) -> Result<PrayerDocument> {
    let first = records
        .first()
        .ok_or_else(|| anyhow!("input has no data rows"))?;
    let year = parse_dmy(&first.date)
        .ok_or_else(|| anyhow!("first row date {:?} is not dd-mm-yyyy", first.date))?
        .year();

    let mut prayer_times: IndexMap<String, Vec<DayEntry>> = IndexMap::new();
    for (idx, rec) in records.iter().enumerate() {
        let date = parse_dmy(&rec.date).ok_or_else(|| {
            anyhow!("row {}: date {:?} is not dd-mm-yyyy", idx + 1, rec.date)
        })?;
        let entry = DayEntry {
            date: normalize_date_to_ymd(&rec.date).into_string(),
            day: rec.day.clone(),
            prayers: Prayers::from_record(rec),
        };
        prayer_times
            .entry(month_name(date).to_string())
            .or_default()
            .push(entry);
    }
    debug!(year, months = prayer_times.len(), "grouped records");

    Ok(PrayerDocument { year, prayer_times })
}

/// Serialize with two-space indentation; non-ASCII text is written as-is.
pub fn write_document<W: Write>(doc: &PrayerDocument, writer: W) -> Result<()> {
    let mut w = BufWriter::new(writer);
    serde_json::to_writer_pretty(&mut w, doc)?;
    w.flush()?;
    Ok(())
}

/// Read a normalized CSV, group it by month and write the JSON document to
/// `output`, printing a per-month summary.
#[instrument(level = "info", skip_all, fields(input = %input.as_ref().display(), output = %output.as_ref().display()))]
pub fn csv_to_json<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q) -> Result<PrayerDocument> {
    let (input, output) = (input.as_ref(), output.as_ref());

    let file =
        File::open(input).with_context(|| format!("Failed to open CSV file: {:?}", input))?;
    let records = read_records(BufReader::new(file))
        .with_context(|| format!("Failed to parse CSV file: {:?}", input))?;
    let doc = build_document(&records)
        .with_context(|| format!("Failed to group {:?} by month", input))?;

    let out =
        File::create(output).with_context(|| format!("Failed to create JSON file: {:?}", output))?;
    write_document(&doc, out).with_context(|| format!("Failed to write JSON file: {:?}", output))?;
    info!(rows = records.len(), months = doc.prayer_times.len(), "json written");

    println!("JSON file saved as: {}", output.display());
    println!("\nConversion Summary:");
    println!("Year: {}", doc.year);
    println!("Months processed: {}", quoted_list(doc.prayer_times.keys()));
    for (month, days) in doc.month_counts() {
        println!("  {}: {} days", month, days);
    }

    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const HEADER: &str = "Date,Day,Subuh,Syuruk,Zohor,Asar,Maghrib,Isyak";

    fn records(body: &str) -> Result<Vec<Record>> {
        read_records(format!("{}\n{}", HEADER, body).as_bytes())
    }

    #[test]
    fn test_single_row_document() -> Result<()> {
        let recs = records("01-01-2024,Isnin,0543,0707,1315,1643,1919,2033\n")?;
        let doc = build_document(&recs)?;
        assert_eq!(doc.year, 2024);
        let jan = &doc.prayer_times["January"];
        assert_eq!(
            jan[0],
            DayEntry {
                date: "2024-01-01".into(),
                day: "Isnin".into(),
                prayers: Prayers {
                    subuh: "05:43".into(),
                    syuruk: "07:07".into(),
                    zohor: "13:15".into(),
                    asar: "16:43".into(),
                    maghrib: "19:19".into(),
                    isyak: "20:33".into(),
                },
            }
        );
        Ok(())
    }

    #[test]
    fn test_groups_by_month_in_row_order() -> Result<()> {
        let mut body = String::new();
        for d in 1..=31 {
            body.push_str(&format!("{:02}-01-2024,Hari,543,707,1315,1643,1919,2033\n", d));
        }
        body.push_str("01-02-2024,Khamis,544,708,1316,1644,1920,2034\n");
        let doc = build_document(&records(&body)?)?;

        assert_eq!(doc.month_counts(), vec![("January", 31), ("February", 1)]);
        let dates: Vec<&str> = doc.prayer_times["January"]
            .iter()
            .map(|e| e.date.as_str())
            .collect();
        assert_eq!(dates[0], "2024-01-01");
        assert_eq!(dates[30], "2024-01-31");
        // three-digit times get their leading zero back
        assert_eq!(doc.prayer_times["February"][0].prayers.subuh, "05:44");
        Ok(())
    }

    #[test]
    fn test_months_keep_first_seen_order() -> Result<()> {
        let doc = build_document(&records(
            "01-03-2024,A,0543,0707,1315,1643,1919,2033\n\
             01-01-2024,B,0543,0707,1315,1643,1919,2033\n\
             02-03-2024,C,0543,0707,1315,1643,1919,2033\n",
        )?)?;
        assert_eq!(doc.month_counts(), vec![("March", 2), ("January", 1)]);
        Ok(())
    }

    #[test]
    fn test_empty_input_rejected() -> Result<()> {
        let err = build_document(&records("")?).unwrap_err();
        assert!(err.to_string().contains("no data rows"));
        Ok(())
    }

    #[test]
    fn test_bad_date_rejected_with_row() -> Result<()> {
        let recs = records(
            "01-01-2024,A,0543,0707,1315,1643,1919,2033\n\
             2024-01-02,B,0543,0707,1315,1643,1919,2033\n",
        )?;
        let err = build_document(&recs).unwrap_err();
        assert!(err.to_string().contains("row 2"));
        Ok(())
    }

    #[test]
    fn test_first_row_bad_date_rejected() -> Result<()> {
        let recs = records(
            "2024-01-01,A,0543,0707,1315,1643,1919,2033\n\
             02-01-2024,B,0543,0707,1315,1643,1919,2033\n",
        )?;
        let err = build_document(&recs).unwrap_err();
        assert!(err.to_string().contains("first row date"));
        Ok(())
    }

    #[test]
    fn test_odd_times() -> Result<()> {
        let doc = build_document(&records("01-01-2024,A,abc,,12345,12,1919,2033\n")?)?;
        let p = &doc.prayer_times["January"][0].prayers;
        // three characters are always padded, even when not digits
        assert_eq!(p.subuh, "0a:bc");
        assert_eq!(p.syuruk, "");
        assert_eq!(p.zohor, "12345");
        assert_eq!(p.asar, "12");
        Ok(())
    }

    #[test]
    fn test_json_layout() -> Result<()> {
        let dir = tempdir()?;
        let input = dir.path().join("in.csv");
        let output = dir.path().join("out.json");
        fs::write(
            &input,
            format!("{}\n01-01-2024,Isnin,0543,0707,1315,1643,1919,2033\n", HEADER),
        )?;
        let doc = csv_to_json(&input, &output)?;

        let text = fs::read_to_string(&output)?;
        assert!(text.starts_with("{\n  \"year\": 2024,\n  \"prayer_times\": {\n    \"January\": ["));
        let back: PrayerDocument = serde_json::from_str(&text)?;
        assert_eq!(back, doc);
        Ok(())
    }

    #[test]
    fn test_non_ascii_not_escaped() -> Result<()> {
        let doc = build_document(&records("01-01-2024,Isnin – Ahad,0543,0707,1315,1643,1919,2033\n")?)?;
        let mut buf = Vec::new();
        write_document(&doc, &mut buf)?;
        let text = String::from_utf8(buf)?;
        assert!(text.contains("\"day\": \"Isnin – Ahad\""));
        Ok(())
    }

    #[test]
    fn test_sample_keeps_first_entry() -> Result<()> {
        let doc = build_document(&records(
            "01-01-2024,A,0543,0707,1315,1643,1919,2033\n\
             02-01-2024,B,0544,0707,1315,1643,1919,2033\n",
        )?)?;
        let sample = doc.sample().expect("sample");
        assert_eq!(sample.month_counts(), vec![("January", 1)]);
        assert_eq!(sample.prayer_times["January"][0].day, "A");
        Ok(())
    }
}

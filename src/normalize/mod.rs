// src/normalize/mod.rs
use std::fmt;
use std::str::FromStr;

pub mod date_parser;
pub mod time_parser;

pub use date_parser::{month_name, normalize_date_to_dmy, normalize_date_to_ymd, parse_dmy};
pub use time_parser::{normalize_time, time_with_colon};

/// Outcome of a lenient field parse.
///
/// A malformed cell never aborts a run: it is carried through as
/// `Unchanged` with the text it arrived with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Normalized {
    /// Parsed and re-emitted in canonical form.
    Value(String),
    /// Could not be parsed; holds the original text.
    Unchanged(String),
    /// No input at all. Renders as the empty string.
    Missing,
}

impl Normalized {
    pub fn as_str(&self) -> &str {
        match self {
            Normalized::Value(s) | Normalized::Unchanged(s) => s,
            Normalized::Missing => "",
        }
    }

    pub fn into_string(self) -> String {
        match self {
            Normalized::Value(s) | Normalized::Unchanged(s) => s,
            Normalized::Missing => String::new(),
        }
    }

    pub fn is_unchanged(&self) -> bool {
        matches!(self, Normalized::Unchanged(_))
    }
}

impl fmt::Display for Normalized {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Normalized> for String {
    fn from(n: Normalized) -> Self {
        n.into_string()
    }
}

/// Cell texts a dataframe reader treats as "no value" by default.
static NA_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// True for an empty cell or one of the usual NA markers (`NA`, `N/A`,
/// `null`, `NaN`, ...). Matching is exact, no trimming.
pub fn is_missing(cell: &str) -> bool {
    NA_TOKENS.contains(&cell)
}

/// The six daily prayer columns, in timetable order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrayerColumn {
    Subuh,
    Syuruk,
    Zohor,
    Asar,
    Maghrib,
    Isyak,
}

impl PrayerColumn {
    pub const ALL: [PrayerColumn; 6] = [
        PrayerColumn::Subuh,
        PrayerColumn::Syuruk,
        PrayerColumn::Zohor,
        PrayerColumn::Asar,
        PrayerColumn::Maghrib,
        PrayerColumn::Isyak,
    ];

    /// Column name as it appears in the CSV header.
    pub fn header(self) -> &'static str {
        match self {
            PrayerColumn::Subuh => "Subuh",
            PrayerColumn::Syuruk => "Syuruk",
            PrayerColumn::Zohor => "Zohor",
            PrayerColumn::Asar => "Asar",
            PrayerColumn::Maghrib => "Maghrib",
            PrayerColumn::Isyak => "Isyak",
        }
    }

    /// Afternoon/evening prayers are printed on a 12-hour clock in the
    /// source timetables, so their hours get shifted into PM.
    pub fn is_afternoon(self) -> bool {
        matches!(
            self,
            PrayerColumn::Zohor | PrayerColumn::Asar | PrayerColumn::Maghrib | PrayerColumn::Isyak
        )
    }
}

impl FromStr for PrayerColumn {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PrayerColumn::ALL
            .into_iter()
            .find(|c| c.header() == s)
            .ok_or_else(|| anyhow::anyhow!("unknown prayer column {:?}", s))
    }
}

impl fmt::Display for PrayerColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

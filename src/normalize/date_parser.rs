use chrono::{Datelike, NaiveDate};

use crate::normalize::Normalized;

/// Output layout for the normalized CSV.
pub const DMY_FORMAT: &str = "%d-%m-%Y";
/// Output layout for `date` in the JSON document.
pub const YMD_FORMAT: &str = "%Y-%m-%d";

static MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// English month name for `date`.
pub fn month_name(date: NaiveDate) -> &'static str {
    MONTH_NAMES[date.month0() as usize]
}

/// Strict `yyyy-mm-dd`: four-digit year, one or two digit month and day, and
/// the date must exist.
pub fn parse_ymd(s: &str) -> Option<NaiveDate> {
    let (y, m, d) = split3(s)?;
    build_date(y, m, d)
}

/// Strict `dd-mm-yyyy`, same field rules as [`parse_ymd`].
pub fn parse_dmy(s: &str) -> Option<NaiveDate> {
    let (d, m, y) = split3(s)?;
    build_date(y, m, d)
}

fn split3(s: &str) -> Option<(&str, &str, &str)> {
    let mut parts = s.split('-');
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(a), Some(b), Some(c), None) => Some((a, b, c)),
        _ => None,
    }
}

fn build_date(y: &str, m: &str, d: &str) -> Option<NaiveDate> {
    if !digits(y, 4, 4) || !digits(m, 1, 2) || !digits(d, 1, 2) {
        return None;
    }
    let year: i32 = y.parse().ok()?;
    if year < 1 {
        return None;
    }
    NaiveDate::from_ymd_opt(year, m.parse().ok()?, d.parse().ok()?)
}

fn digits(s: &str, min: usize, max: usize) -> bool {
    (min..=max).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_digit())
}

/// Left-pad with zeros up to `width` characters.
fn zfill(s: &str, width: usize) -> String {
    let len = s.chars().count();
    if len >= width {
        s.to_string()
    } else {
        format!("{}{}", "0".repeat(width - len), s)
    }
}

/// Normalize a raw date (`2024-01-01`, `1-1-2025`, `01-1-2025`, ...) to
/// `dd-mm-yyyy`. Anything that is neither ISO nor day-first comes back
/// `Unchanged`.
pub fn normalize_date_to_dmy(raw: &str) -> Normalized {
    if let Some(date) = parse_ymd(raw) {
        return Normalized::Value(date.format(DMY_FORMAT).to_string());
    }

    let Some((day, month, year)) = split3(raw) else {
        return Normalized::Unchanged(raw.to_string());
    };
    let padded = format!("{}-{}-{}", zfill(day, 2), zfill(month, 2), year);
    match parse_dmy(&padded) {
        Some(date) => Normalized::Value(date.format(DMY_FORMAT).to_string()),
        None => Normalized::Unchanged(raw.to_string()),
    }
}

/// Re-emit an already normalized `dd-mm-yyyy` date as `yyyy-mm-dd`.
pub fn normalize_date_to_ymd(raw: &str) -> Normalized {
    match parse_dmy(raw) {
        Some(date) => Normalized::Value(date.format(YMD_FORMAT).to_string()),
        None => Normalized::Unchanged(raw.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dmy(raw: &str) -> String {
        normalize_date_to_dmy(raw).into_string()
    }

    #[test]
    fn test_iso_to_dmy() {
        assert_eq!(dmy("2024-01-01"), "01-01-2024");
        assert_eq!(dmy("2024-12-31"), "31-12-2024");
        assert_eq!(dmy("2024-1-5"), "05-01-2024");
    }

    #[test]
    fn test_day_first_to_dmy() {
        assert_eq!(dmy("1-1-2025"), "01-01-2025");
        assert_eq!(dmy("5-12-2024"), "05-12-2024");
        assert_eq!(dmy("29-02-2024"), "29-02-2024");
    }

    #[test]
    fn test_dmy_passthrough() {
        assert_eq!(
            normalize_date_to_dmy("not-a-date"),
            Normalized::Unchanged("not-a-date".into())
        );
        assert_eq!(dmy("2024-02-30"), "2024-02-30");
        assert_eq!(dmy("29-02-2023"), "29-02-2023");
        assert_eq!(dmy("01/01/2024"), "01/01/2024");
        assert_eq!(dmy("1-1-25"), "1-1-25");
        assert_eq!(dmy("1-1-2025-x"), "1-1-2025-x");
        assert_eq!(dmy(" 2024-01-01"), " 2024-01-01");
        assert_eq!(dmy(""), "");
        assert_eq!(dmy("0000-01-01"), "0000-01-01");
        assert_eq!(dmy("1-1-0000"), "1-1-0000");
        assert_eq!(dmy("0001-01-01"), "01-01-0001");
    }

    #[test]
    fn test_dmy_is_fixed_point() {
        for raw in ["2024-01-01", "1-1-2025", "not-a-date", "31-12-2024"] {
            let once = dmy(raw);
            assert_eq!(dmy(&once), once);
        }
    }

    #[test]
    fn test_dmy_to_ymd() {
        assert_eq!(normalize_date_to_ymd("01-01-2024").into_string(), "2024-01-01");
        assert_eq!(normalize_date_to_ymd("31-12-2024").into_string(), "2024-12-31");
        assert_eq!(
            normalize_date_to_ymd("2024-01-01"),
            Normalized::Unchanged("2024-01-01".into())
        );
    }

    #[test]
    fn test_month_name() {
        let d = parse_dmy("15-02-2024").unwrap();
        assert_eq!(month_name(d), "February");
        assert_eq!(month_name(parse_dmy("1-12-2024").unwrap()), "December");
    }
}

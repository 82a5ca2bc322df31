use crate::normalize::{Normalized, PrayerColumn};

/// Normalize a raw timetable token such as `"543"`, `"5 43"` or `"0707"` into
/// a zero-padded 24-hour `HHMM` string.
///
/// `column` is the CSV header the token came from; afternoon prayers have 12
/// added to any hour below 12. Unparseable tokens come back `Unchanged`
/// (trimmed), and hour/minute values are not range checked.
pub fn normalize_time(raw: Option<&str>, column: &str) -> Normalized {
    let Some(raw) = raw else {
        return Normalized::Missing;
    };
    let token = raw.trim();

    let Some((hour, minute)) = split_hour_minute(token) else {
        return Normalized::Unchanged(token.to_string());
    };
    let (Ok(mut hour), Ok(minute)) = (hour.trim().parse::<i64>(), minute.trim().parse::<i64>())
    else {
        return Normalized::Unchanged(token.to_string());
    };

    let afternoon = column
        .parse::<PrayerColumn>()
        .map(PrayerColumn::is_afternoon)
        .unwrap_or(false);
    if afternoon && hour < 12 {
        hour += 12;
    }

    Normalized::Value(format!("{:02}{:02}", hour, minute))
}

/// `"5 43"` → (`"5"`, `"43"`), `"543"` → (`"5"`, `"43"`), `"0707"` → (`"07"`, `"07"`).
fn split_hour_minute(token: &str) -> Option<(&str, &str)> {
    if token.contains(' ') {
        let mut parts = token.split_whitespace();
        return match (parts.next(), parts.next(), parts.next()) {
            (Some(h), Some(m), None) => Some((h, m)),
            _ => None,
        };
    }

    let hour_len = match token.chars().count() {
        3 => 1,
        4 => 2,
        _ => return None,
    };
    // char boundary after the hour digits
    let cut = token.char_indices().nth(hour_len).map(|(i, _)| i)?;
    Some((&token[..cut], &token[cut..]))
}

/// Re-express a normalized `HHMM` token as `HH:MM` for the JSON document.
/// Three-character tokens are left-padded with `0` first; anything that is not
/// four characters after padding is passed through.
pub fn time_with_colon(raw: Option<&str>) -> Normalized {
    let token = match raw.map(str::trim) {
        None | Some("") => return Normalized::Missing,
        Some(t) => t,
    };

    let padded = if token.chars().count() == 3 {
        format!("0{}", token)
    } else {
        token.to_string()
    };
    if padded.chars().count() != 4 {
        return Normalized::Unchanged(token.to_string());
    }

    let cut = padded
        .char_indices()
        .nth(2)
        .map(|(i, _)| i)
        .unwrap_or(padded.len());
    Normalized::Value(format!("{}:{}", &padded[..cut], &padded[cut..]))
}

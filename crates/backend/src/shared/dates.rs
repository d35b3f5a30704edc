use chrono::{NaiveDate, NaiveTime};
use contracts::shared::filters::DateRange;

/// Parse a stored date. Values with a time part ("2024-01-05T10:00:00")
/// are cut down to their calendar date.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let date_part = value.trim().get(..10)?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// Calendar-date key of a stored date, "YYYY-MM-DD"
pub fn date_key(value: &str) -> String {
    match parse_date(value) {
        Some(date) => date.format("%Y-%m-%d").to_string(),
        None => value.trim().to_string(),
    }
}

/// SQL bounds for a stored-date column: `col >= from AND col < to_exclusive`.
///
/// `to_exclusive` is `to` followed by '~', which sorts after any time suffix
/// ("T10:00:00", " 23:59") so rows stamped on the last day stay in range.
pub fn range_bounds(range: &DateRange) -> (String, String) {
    let (from, to) = range.as_strings();
    (from, format!("{}~", to))
}

/// Parse a same-day wall-clock string, "HH:MM" or "HH:MM:SS"
pub fn parse_wall_clock(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .ok()
}

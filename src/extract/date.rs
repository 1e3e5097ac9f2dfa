use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// Formats accepted for timestamps that carry no timezone offset.
/// Naive values are interpreted as UTC.
const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"];

/// Parses a machine-readable datetime attribute or free-text timestamp
/// into a UTC instant.
///
/// Empty or whitespace-only input yields `None`, as does any string that
/// fails to parse — an unparseable date is "field absent", never an error.
/// Tried in order: RFC 3339, RFC 2822, naive datetime (assumed UTC), and a
/// bare `YYYY-MM-DD` date (midnight UTC). No locale-specific formats.
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date.and_time(NaiveTime::MIN).and_utc());
    }

    None
}

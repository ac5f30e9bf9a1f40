use crate::models::Entry;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use tracing::warn;

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];

/// Parses a store timestamp. RFC 3339 values carry their own offset; naive
/// values are read as wall-clock time in `tz`.
pub fn parse_timestamp(raw: &str, tz: FixedOffset) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed);
    }
    NAIVE_FORMATS.iter().find_map(|format| {
        NaiveDateTime::parse_from_str(raw, format)
            .ok()
            .and_then(|naive| tz.from_local_datetime(&naive).single())
    })
}

/// Calendar date of `instant` in `tz`.
pub fn local_date<Tz: TimeZone>(instant: &DateTime<Tz>, tz: FixedOffset) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}

/// Keeps the entries stamped on the same calendar day as `now` in `tz`,
/// preserving fetch order. Entries without a parseable timestamp are dropped.
pub fn filter_today(entries: Vec<Entry>, now: DateTime<Utc>, tz: FixedOffset) -> Vec<Entry> {
    let today = local_date(&now, tz);
    let mut skipped = 0usize;

    let todays: Vec<Entry> = entries
        .into_iter()
        .filter(|entry| match parse_timestamp(&entry.timestamp, tz) {
            Some(stamp) => local_date(&stamp, tz) == today,
            None => {
                skipped += 1;
                false
            }
        })
        .collect();

    if skipped > 0 {
        warn!(skipped, "excluded entries with unparseable timestamps");
    }
    todays
}

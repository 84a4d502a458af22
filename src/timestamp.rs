//! Parsing and rendering of user supplied instants.
//!
//! Accepted forms (surrounding whitespace ignored):
//! - `now`
//! - RFC 3339: `2020-01-01T00:00:00Z`, `2020-01-01T00:00:00.5+02:00`
//! - minute precision with zone: `2020-01-01T00:00Z`, `2020-01-01T00:00+01:00`
//! - local wall clock: `2020-01-01 13:45`, `2020-01-01 13:45:10`, `2020-01-01T13:45`
//! - local date: `2020-01-01` (midnight)

use chrono::{DateTime, Local, LocalResult, NaiveDate, NaiveDateTime, TimeZone, Utc};

const LOCAL_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Parse an instant; local forms are resolved in the machine's time zone.
pub fn parse_timestamp(input: &str) -> Result<DateTime<Utc>, String> {
    let s = input.trim();
    if s.eq_ignore_ascii_case("now") {
        return Ok(Utc::now());
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Some(dt) = parse_minute_precision_utc(s) {
        return Ok(dt);
    }

    for fmt in LOCAL_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return resolve_local(naive, s);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return resolve_local(naive, s);
        }
    }

    Err(format!(
        "unrecognised timestamp '{s}' (try RFC 3339, 'YYYY-MM-DD HH:MM' or 'now')"
    ))
}

// "2020-01-01T00:00Z" / "2020-01-01T00:00+01:00": RFC 3339 without seconds.
fn parse_minute_precision_utc(s: &str) -> Option<DateTime<Utc>> {
    if let Some(body) = s.strip_suffix('Z').or_else(|| s.strip_suffix('z')) {
        return NaiveDateTime::parse_from_str(body, "%Y-%m-%dT%H:%M")
            .ok()
            .map(|n| Utc.from_utc_datetime(&n));
    }
    DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M%:z")
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn resolve_local(naive: NaiveDateTime, original: &str) -> Result<DateTime<Utc>, String> {
    match Local.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
        // Ambiguous during a DST fold: take the earlier instant.
        LocalResult::Ambiguous(early, _) => Ok(early.with_timezone(&Utc)),
        LocalResult::None => Err(format!(
            "'{original}' does not exist in the local time zone (DST gap)"
        )),
    }
}

/// Local, human-readable rendering used by the CLI.
pub fn display_local(dt: &DateTime<Utc>) -> String {
    dt.with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S %:z")
        .to_string()
}

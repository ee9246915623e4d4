// SPDX-License-Identifier: Apache-2.0

//! Timestamp canonicalization for composite record keys.
//!
//! Records such as medical entries and feeding schedules are keyed by
//! `(animal, timestamp)` instead of a surrogate id, so a caller-supplied
//! timestamp must be reduced to the exact stored text before it can be
//! used as a lookup key. Two shapes exist: date-only (`YYYY-MM-DD`) and
//! date-time (`YYYY-MM-DD HH:MM:SS`).
//!
//! Zone offsets (`Z`, `+07:00`, `-05:00`) are stripped, not converted:
//! stored values carry the wall-clock fields they were inserted with, and
//! a client echoing `2024-05-01T08:00:00.000Z` must land back on
//! `2024-05-01 08:00:00`.

use chrono::{NaiveDate, NaiveTime};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampError(pub String);

impl Display for TimestampError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for TimestampError {}

/// Canonicalize a raw timestamp to the date-only key form `YYYY-MM-DD`.
///
/// Accepts bare dates, `T`- or space-separated date-times, fractional
/// seconds, and zone suffixes. A clock portion is discarded from the key
/// but still validated, so both shapes reject the same garbage.
pub fn canonical_date(raw: &str) -> Result<String, TimestampError> {
    let (date_part, clock_part) = split_clock(raw.trim());
    let date = parse_date(date_part)?;
    if let Some(clock) = clock_part {
        parse_clock(clock)?;
    }
    Ok(date.format("%Y-%m-%d").to_string())
}

/// Canonicalize a raw timestamp to the date-time key form
/// `YYYY-MM-DD HH:MM:SS`.
///
/// A bare date canonicalizes to midnight. Fractional seconds and zone
/// suffixes are stripped; the wall-clock fields are kept as written.
pub fn canonical_datetime(raw: &str) -> Result<String, TimestampError> {
    let (date_part, clock_part) = split_clock(raw.trim());
    let date = parse_date(date_part)?;
    let time = match clock_part {
        Some(clock) => parse_clock(clock)?,
        None => NaiveTime::MIN,
    };
    Ok(format!(
        "{} {}",
        date.format("%Y-%m-%d"),
        time.format("%H:%M:%S")
    ))
}

fn split_clock(raw: &str) -> (&str, Option<&str>) {
    match raw.split_once(['T', ' ']) {
        Some((date, clock)) if !clock.is_empty() => (date, Some(clock)),
        Some((date, _)) => (date, None),
        None => (raw, None),
    }
}

fn parse_date(part: &str) -> Result<NaiveDate, TimestampError> {
    NaiveDate::parse_from_str(part, "%Y-%m-%d")
        .map_err(|_| TimestampError(format!("unparseable date: {part:?}")))
}

fn parse_clock(part: &str) -> Result<NaiveTime, TimestampError> {
    // Offset starts at the first '+' or '-'; '-' cannot appear earlier in
    // a valid clock field.
    let bare = part.strip_suffix('Z').unwrap_or(part);
    let bare = match bare.find(['+', '-']) {
        Some(idx) => &bare[..idx],
        None => bare,
    };
    let bare = bare.split('.').next().unwrap_or(bare);
    NaiveTime::parse_from_str(bare, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(bare, "%H:%M"))
        .map_err(|_| TimestampError(format!("unparseable clock: {part:?}")))
}

#[cfg(test)]
mod tests {
    use super::{canonical_date, canonical_datetime};

    #[test]
    fn date_forms_of_one_instant_share_a_canonical_key() {
        for raw in [
            "2024-03-01",
            "2024-03-01 00:00:00",
            "2024-03-01T00:00:00",
            "2024-03-01T00:00:00.000Z",
        ] {
            assert_eq!(canonical_date(raw).expect(raw), "2024-03-01");
        }
    }

    #[test]
    fn datetime_keeps_wall_clock_fields_instead_of_converting_zones() {
        assert_eq!(
            canonical_datetime("2024-05-01T08:00:00.000Z").expect("utc suffix"),
            "2024-05-01 08:00:00"
        );
        assert_eq!(
            canonical_datetime("2024-05-01T08:00:00+07:00").expect("plus offset"),
            "2024-05-01 08:00:00"
        );
        assert_eq!(
            canonical_datetime("2024-05-01T08:00:00-05:00").expect("minus offset"),
            "2024-05-01 08:00:00"
        );
    }

    #[test]
    fn datetime_of_a_bare_date_is_midnight() {
        assert_eq!(
            canonical_datetime("2024-05-01").expect("bare date"),
            "2024-05-01 00:00:00"
        );
    }

    #[test]
    fn stored_form_is_a_fixed_point() {
        assert_eq!(
            canonical_datetime("2024-05-01 08:00:00").expect("stored form"),
            "2024-05-01 08:00:00"
        );
        assert_eq!(canonical_date("2024-05-01").expect("stored form"), "2024-05-01");
    }

    #[test]
    fn minutes_only_clock_gains_seconds() {
        assert_eq!(
            canonical_datetime("2024-05-01T08:30").expect("hh:mm"),
            "2024-05-01 08:30:00"
        );
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(canonical_date("yesterday").is_err());
        assert!(canonical_date("2024-13-40").is_err());
        assert!(canonical_datetime("2024-05-01T99:00:00").is_err());
        assert!(canonical_datetime("").is_err());
    }

    #[test]
    fn date_shape_rejects_a_malformed_clock_it_would_discard() {
        assert!(canonical_date("2024-05-01T99:99").is_err());
        assert!(canonical_date("2024-05-01 8 o'clock").is_err());
        assert_eq!(
            canonical_date("2024-05-01T08:00:00Z").expect("valid clock"),
            "2024-05-01"
        );
    }
}

//! Epoch timestamps.
//!
//! The OEM feed writes epochs as CCSDS day-of-year strings
//! (`2024-047T12:00:00.000Z`). Stores key on the raw string; the time
//! value only matters when searching for the epoch nearest to a moment.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::constants::EPOCH_FORMAT;
use crate::error::{IssError, Result};

/// Parses a CCSDS day-of-year epoch into a UTC timestamp.
pub fn parse_epoch(epoch: &str) -> Result<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(epoch.trim(), EPOCH_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|_| IssError::InvalidEpoch(epoch.to_string()))
}

/// Formats a UTC timestamp as a CCSDS day-of-year epoch with millisecond precision.
pub fn format_epoch(at: DateTime<Utc>) -> String {
    at.format("%Y-%jT%H:%M:%S%.3fZ").to_string()
}

/// Finds the epoch closest to `at`.
///
/// Strings that do not parse as epochs are skipped. On a tie the first
/// candidate wins. Returns `None` when no candidate parses.
pub fn nearest_epoch<'a, I>(epochs: I, at: DateTime<Utc>) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<(&'a str, i64)> = None;

    for epoch in epochs {
        let Ok(time) = parse_epoch(epoch) else {
            continue;
        };
        let diff = (time - at).num_milliseconds().abs();
        match best {
            Some((_, best_diff)) if best_diff <= diff => {}
            _ => best = Some((epoch, diff)),
        }
    }

    best.map(|(epoch, _)| epoch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use proptest::prelude::*;
    use test_case::test_case;

    #[test_case("2024-047T12:00:00.000Z", 2024, 2, 16, 12 ; "mid february")]
    #[test_case("2024-001T00:00:00.000Z", 2024, 1, 1, 0 ; "first day")]
    #[test_case("2024-366T23:00:00.000Z", 2024, 12, 31, 23 ; "leap year last day")]
    #[test_case("2023-365T06:30:00Z", 2023, 12, 31, 6 ; "no fraction")]
    fn test_parse_epoch(input: &str, year: i32, month: u32, day: u32, hour: u32) {
        let parsed = parse_epoch(input).unwrap();
        let expected_date = Utc.with_ymd_and_hms(year, month, day, hour, 0, 0).unwrap();
        assert_eq!(parsed.date_naive(), expected_date.date_naive());
        assert_eq!(parsed.format("%H").to_string(), format!("{:02}", hour));
    }

    #[test_case("" ; "empty")]
    #[test_case("2024-02-16T12:00:00Z" ; "calendar date")]
    #[test_case("2024-400T00:00:00.000Z" ; "day out of range")]
    #[test_case("not an epoch" ; "garbage")]
    fn test_parse_epoch_rejects(input: &str) {
        assert!(matches!(parse_epoch(input), Err(IssError::InvalidEpoch(_))));
    }

    #[test]
    fn test_format_epoch_round_trip() {
        let at = Utc.with_ymd_and_hms(2024, 2, 16, 12, 4, 0).unwrap();
        let text = format_epoch(at);
        assert_eq!(text, "2024-047T12:04:00.000Z");
        assert_eq!(parse_epoch(&text).unwrap(), at);
    }

    #[test]
    fn test_nearest_epoch() {
        let epochs = [
            "2024-047T12:00:00.000Z",
            "2024-047T12:04:00.000Z",
            "2024-047T12:08:00.000Z",
        ];
        let at = Utc.with_ymd_and_hms(2024, 2, 16, 12, 5, 0).unwrap();
        assert_eq!(nearest_epoch(epochs, at), Some("2024-047T12:04:00.000Z"));

        let far_future = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(nearest_epoch(epochs, far_future), Some("2024-047T12:08:00.000Z"));
    }

    #[test]
    fn test_nearest_epoch_skips_garbage() {
        let at = Utc.with_ymd_and_hms(2024, 2, 16, 12, 0, 0).unwrap();
        assert_eq!(nearest_epoch(["garbage"], at), None);
        assert_eq!(
            nearest_epoch(["garbage", "2024-047T13:00:00.000Z"], at),
            Some("2024-047T13:00:00.000Z")
        );
        assert_eq!(nearest_epoch(std::iter::empty(), at), None);
    }

    proptest! {
        #[test]
        fn prop_nearest_is_minimal(
            offsets in prop::collection::vec(-100_000i64..100_000, 1..40),
            probe in -120_000i64..120_000,
        ) {
            let base = Utc.with_ymd_and_hms(2024, 2, 16, 0, 0, 0).unwrap();
            let epochs: Vec<String> = offsets
                .iter()
                .map(|s| format_epoch(base + Duration::seconds(*s)))
                .collect();
            let at = base + Duration::seconds(probe);

            let chosen = nearest_epoch(epochs.iter().map(String::as_str), at).unwrap();
            let chosen_diff = (parse_epoch(chosen).unwrap() - at).num_milliseconds().abs();
            for epoch in &epochs {
                let diff = (parse_epoch(epoch).unwrap() - at).num_milliseconds().abs();
                prop_assert!(chosen_diff <= diff);
            }
        }
    }
}

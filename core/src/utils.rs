use chrono::{DateTime, Datelike, TimeZone, Utc};
use chrono_tz::Europe::Zurich;

use crate::PLACEHOLDER;

const WEEKDAYS: [&str; 7] = [
    "Montag",
    "Dienstag",
    "Mittwoch",
    "Donnerstag",
    "Freitag",
    "Samstag",
    "Sonntag",
];
const MONTHS: [&str; 12] = [
    "Januar",
    "Februar",
    "März",
    "April",
    "Mai",
    "Juni",
    "Juli",
    "August",
    "September",
    "Oktober",
    "November",
    "Dezember",
];

/// One decimal, as in `18.3`; `--` when there is no value.
///
/// Ties round away from zero, so `18.25` shows as `18.3`.
pub fn format_temperature(value: Option<f64>) -> String {
    value
        .map(|value| format!("{:.1}", (value * 10.0).round() / 10.0))
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

/// `Dienstag, 14. November 2023 um 23:13` in Swiss local time.
pub fn format_long_datetime(instant: DateTime<Utc>) -> String {
    let local = Zurich.from_utc_datetime(&instant.naive_utc());
    format!(
        "{}, {}. {} {} um {}",
        WEEKDAYS[local.weekday().num_days_from_monday() as usize],
        local.day(),
        MONTHS[local.month0() as usize],
        local.year(),
        local.format("%H:%M")
    )
}

pub fn format_clock(instant: DateTime<Utc>) -> String {
    Zurich
        .from_utc_datetime(&instant.naive_utc())
        .format("%H:%M:%S")
        .to_string()
}

pub fn format_hour_minute(instant: DateTime<Utc>) -> String {
    Zurich
        .from_utc_datetime(&instant.naive_utc())
        .format("%H:%M")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instant(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    #[test]
    fn temperature_has_one_decimal() {
        assert_eq!(format_temperature(Some(18.3)), "18.3");
        assert_eq!(format_temperature(Some(18.0)), "18.0");
        assert_eq!(format_temperature(None), "--");
    }

    #[test]
    fn temperature_ties_round_away_from_zero() {
        assert_eq!(format_temperature(Some(18.25)), "18.3");
        assert_eq!(format_temperature(Some(18.24)), "18.2");
        assert_eq!(format_temperature(Some(-1.25)), "-1.3");
    }

    #[test]
    fn long_datetime_in_winter_time() {
        assert_eq!(
            format_long_datetime(instant(1_700_000_000)),
            "Dienstag, 14. November 2023 um 23:13"
        );
    }

    #[test]
    fn long_datetime_in_summer_time() {
        // 2024-07-01T10:00:00Z
        assert_eq!(
            format_long_datetime(instant(1_719_828_000)),
            "Montag, 1. Juli 2024 um 12:00"
        );
    }

    #[test]
    fn clock_and_short_time() {
        assert_eq!(format_clock(instant(1_700_000_000)), "23:13:20");
        assert_eq!(format_hour_minute(instant(1_700_000_000)), "23:13");
    }
}

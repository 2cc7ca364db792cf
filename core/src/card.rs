//! Display-ready view models for the dashboard panels.
//!
//! Everything here is plain data: the terminal front end only decides where
//! and in which color to draw it.

use chrono::{DateTime, Utc};

use crate::mood::{Mood, temperature_mood};
use crate::river::RiverReading;
use crate::transit::{DepartureEntry, minutes_until};
use crate::utils::{format_clock, format_hour_minute, format_long_datetime, format_temperature};
use crate::{NOT_YET_UPDATED, PLACEHOLDER};

pub const TEMPERATURE_UNIT: &str = "°C";
pub const TRANSIT_LOADING: &str = "Verbindungen werden geladen...";

#[derive(Debug, Clone, PartialEq)]
pub struct RiverCard {
    pub title: &'static str,
    pub location: String,
    /// Temperature without unit, `--` when unknown.
    pub temperature: String,
    pub mood: Mood,
    pub error: Option<String>,
    pub last_update: String,
    pub source: &'static str,
}

impl RiverCard {
    pub fn new(reading: &RiverReading, error: Option<&str>) -> Self {
        Self {
            title: "Aare River",
            location: reading.location_name.clone(),
            temperature: format_temperature(reading.temperature_celsius),
            mood: temperature_mood(reading.temperature_celsius),
            error: error.map(str::to_string),
            last_update: reading
                .observed_at
                .map(format_long_datetime)
                .unwrap_or_else(|| NOT_YET_UPDATED.to_string()),
            source: "aare.guru",
        }
    }

    /// Temperature with unit, e.g. `18.3°C` or `--°C`.
    pub fn temperature_with_unit(&self) -> String {
        format!("{}{TEMPERATURE_UNIT}", self.temperature)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DepartureRow {
    pub line: String,
    pub destination: String,
    pub platform: String,
    pub time: String,
    pub relative: String,
}

impl DepartureRow {
    pub fn new(departure: &DepartureEntry, now: DateTime<Utc>) -> Self {
        Self {
            line: departure.line.clone(),
            destination: departure.destination.clone(),
            platform: format!(
                "Gleis {}",
                departure
                    .platform
                    .as_deref()
                    .filter(|platform| !platform.is_empty())
                    .unwrap_or(PLACEHOLDER)
            ),
            time: departure
                .scheduled_departure
                .map(format_hour_minute)
                .unwrap_or_else(|| "--:--".to_string()),
            relative: minutes_until(departure.scheduled_departure, now),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransitCard {
    pub title: &'static str,
    pub station_name: String,
    pub loading: bool,
    pub rows: Vec<DepartureRow>,
    pub error: Option<String>,
    pub last_update: String,
    pub source: &'static str,
}

impl TransitCard {
    pub fn new(
        station_name: &str,
        departures: &[DepartureEntry],
        loading: bool,
        error: Option<&str>,
        last_update: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            title: "Public Transport",
            station_name: station_name.to_string(),
            loading,
            rows: departures
                .iter()
                .map(|departure| DepartureRow::new(departure, now))
                .collect(),
            error: error.map(str::to_string),
            last_update: last_update
                .map(format_hour_minute)
                .unwrap_or_else(|| NOT_YET_UPDATED.to_string()),
            source: "transport.opendata.ch",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClockCard {
    pub caption: &'static str,
    pub time: String,
    pub date: String,
}

impl ClockCard {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            caption: "Jetzt",
            time: format_clock(now),
            date: format_long_datetime(now),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromoPanel {
    pub brand: &'static str,
    pub headline: &'static str,
    pub blurb: &'static str,
    pub tags: [&'static str; 3],
    /// Palette name of the panel accent.
    pub accent: &'static str,
}

pub const ACCELERIT: PromoPanel = PromoPanel {
    brand: "Accelerit",
    headline: "Build. Scale. Accelerate.",
    blurb: "Produkt- und Plattformteams, die jetzt liefern. Fokus auf Engineering, \
            Geschwindigkeit und messbaren Impact.",
    tags: ["Engineering Momentum", "Cloud & Platform", "Delivery Partners"],
    accent: "violet",
};

pub const RENTSHOP: PromoPanel = PromoPanel {
    brand: "Rentshop",
    headline: "Easy Miete. Easy Lieferung.",
    blurb: "Mieten statt kaufen: bei Rentshop findest du alles für deinen Event. \
            Das Material wird per Post zu dir nach Hause geliefert.",
    tags: ["Locations & Leasing", "Pop-up Spaces", "Community Driven"],
    accent: "orange",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub caption: &'static str,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub footer: &'static str,
}

pub const HEADER: Header = Header {
    caption: "Office Dashboard",
    title: "Wander Workspace",
    subtitle: "Gemeinsamer Standort · Bern · Fokus auf Klarheit, Energie und Flow",
    footer: "Shared Office",
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mood::MoodBand;
    use chrono::TimeZone;

    #[test]
    fn river_card_with_reading() {
        let reading = RiverReading {
            temperature_celsius: Some(18.3),
            location_name: "Bern".to_string(),
            observed_at: DateTime::from_timestamp(1_700_000_000, 0),
        };
        let card = RiverCard::new(&reading, None);
        assert_eq!(card.temperature_with_unit(), "18.3°C");
        assert_eq!(card.mood.band, MoodBand::Ideal);
        assert_eq!(card.last_update, "Dienstag, 14. November 2023 um 23:13");
        assert_eq!(card.error, None);
    }

    #[test]
    fn river_card_without_reading() {
        let card = RiverCard::new(&RiverReading::default(), Some("Aare API antwortet nicht"));
        assert_eq!(card.temperature, "--");
        assert_eq!(card.temperature_with_unit(), "--°C");
        assert_eq!(card.mood.band, MoodBand::Loading);
        assert_eq!(card.location, "Aare · Bern");
        assert_eq!(card.last_update, "gleich");
        assert_eq!(card.error.as_deref(), Some("Aare API antwortet nicht"));
    }

    #[test]
    fn transit_rows() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        let departures = vec![
            DepartureEntry {
                line: "S1".to_string(),
                destination: "Thun".to_string(),
                scheduled_departure: Some(now + chrono::Duration::minutes(4)),
                platform: Some("4".to_string()),
            },
            DepartureEntry {
                line: "?".to_string(),
                destination: "Unbekannt".to_string(),
                scheduled_departure: None,
                platform: None,
            },
        ];
        let card = TransitCard::new("Bern", &departures, false, None, Some(now), now);
        assert_eq!(card.rows[0].platform, "Gleis 4");
        assert_eq!(card.rows[0].time, "10:04");
        assert_eq!(card.rows[0].relative, "in 4 min");
        assert_eq!(card.rows[1].platform, "Gleis --");
        assert_eq!(card.rows[1].time, "--:--");
        assert_eq!(card.rows[1].relative, "--");
        assert_eq!(card.last_update, "10:00");
    }

    #[test]
    fn empty_platform_shows_placeholder() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        let departure = DepartureEntry {
            line: "10".to_string(),
            destination: "Ostermundigen".to_string(),
            scheduled_departure: None,
            platform: Some(String::new()),
        };
        assert_eq!(DepartureRow::new(&departure, now).platform, "Gleis --");
    }

    #[test]
    fn clock_card_uses_swiss_time() {
        let card = ClockCard::new(Utc.with_ymd_and_hms(2023, 11, 14, 22, 13, 20).unwrap());
        assert_eq!(card.time, "23:13:20");
        assert_eq!(card.date, "Dienstag, 14. November 2023 um 23:13");
    }
}

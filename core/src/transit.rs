use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::parse::{
    deserialize_lenient, deserialize_lenient_list, deserialize_lenient_string, parse_timestamp_str,
};

pub const UNKNOWN_LINE: &str = "?";
pub const UNKNOWN_DESTINATION: &str = "Unbekannt";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Coordinate {
    #[serde(default)]
    pub x: Option<serde_json::Value>,
    #[serde(default)]
    pub y: Option<serde_json::Value>,
}

impl Coordinate {
    fn is_valid(&self) -> bool {
        let is_number = |value: &Option<serde_json::Value>| {
            value.as_ref().is_some_and(serde_json::Value::is_number)
        };
        is_number(&self.x) && is_number(&self.y)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiStation {
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub coordinate: Option<Coordinate>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LocationsResponse {
    #[serde(default, deserialize_with = "deserialize_lenient_list")]
    pub stations: Option<Vec<ApiStation>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiPrognosis {
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub departure: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub platform: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiStop {
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub departure: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub platform: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub prognosis: Option<ApiPrognosis>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiStationboardEntry {
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub number: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub to: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub stop: Option<ApiStop>,
}

#[derive(Debug, Default, Deserialize)]
pub struct StationboardResponse {
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub station: Option<ApiStation>,
    #[serde(default, deserialize_with = "deserialize_lenient_list")]
    pub stationboard: Option<Vec<ApiStationboardEntry>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DepartureEntry {
    pub line: String,
    pub destination: String,
    pub scheduled_departure: Option<DateTime<Utc>>,
    pub platform: Option<String>,
}

impl From<&ApiStationboardEntry> for DepartureEntry {
    fn from(entry: &ApiStationboardEntry) -> Self {
        let stop = entry.stop.as_ref();
        let prognosis = stop.and_then(|stop| stop.prognosis.as_ref());

        let departure_raw = prognosis
            .and_then(|p| p.departure.as_deref())
            .or_else(|| stop.and_then(|s| s.departure.as_deref()));
        let platform = prognosis
            .and_then(|p| p.platform.clone())
            .or_else(|| stop.and_then(|s| s.platform.clone()));

        Self {
            line: entry
                .number
                .clone()
                .or_else(|| entry.name.clone())
                .unwrap_or_else(|| UNKNOWN_LINE.to_string()),
            destination: entry
                .to
                .clone()
                .unwrap_or_else(|| UNKNOWN_DESTINATION.to_string()),
            scheduled_departure: departure_raw.and_then(parse_timestamp_str),
            platform,
        }
    }
}

/// Departures in the order the station board lists them.
pub fn parse_departures(board: &StationboardResponse) -> Vec<DepartureEntry> {
    board
        .stationboard
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(DepartureEntry::from)
        .collect()
}

/// Picks the station to query the board for: the first candidate carrying an
/// id, else the first with numeric coordinates, else simply the first one.
pub fn select_station(stations: &[ApiStation]) -> Option<&ApiStation> {
    stations
        .iter()
        .find(|station| station.id.as_deref().is_some_and(|id| !id.is_empty()))
        .or_else(|| {
            stations.iter().find(|station| {
                station
                    .coordinate
                    .as_ref()
                    .is_some_and(Coordinate::is_valid)
            })
        })
        .or_else(|| stations.first())
}

impl ApiStation {
    /// Value for the station board `id` parameter: the id if known, else the name.
    pub fn board_key(&self) -> Option<&str> {
        self.id
            .as_deref()
            .filter(|id| !id.is_empty())
            .or(self.name.as_deref())
    }
}

/// Relative label for a departure: `jetzt`, `in N min` or the placeholder.
pub fn minutes_until(departure: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(departure) = departure else {
        return crate::PLACEHOLDER.to_string();
    };
    let millis = (departure - now).num_milliseconds() as f64;
    let minutes = (millis / 60_000.0).round() as i64;
    if minutes <= 0 {
        "jetzt".to_string()
    } else {
        format!("in {minutes} min")
    }
}

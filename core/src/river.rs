use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::parse::{parse_float_prefix, parse_timestamp, probe};

pub const DEFAULT_LOCATION: &str = "Aare · Bern";

const TEMPERATURE_KEYS: &[&str] = &[
    "aare",
    "aare_prec",
    "temperature",
    "aareTemperature",
    "aare_temperature",
    "temperature_precise",
    "aare_temperature_precise",
];
const TIMESTAMP_KEYS: &[&str] = &["time", "timestamp", "updated", "updated_at"];
const LOCATION_KEYS: &[&str] = &["longname", "name", "location"];

#[derive(Debug, Clone, PartialEq)]
pub struct RiverReading {
    pub temperature_celsius: Option<f64>,
    pub location_name: String,
    pub observed_at: Option<DateTime<Utc>>,
}

impl Default for RiverReading {
    fn default() -> Self {
        Self {
            temperature_celsius: None,
            location_name: DEFAULT_LOCATION.to_string(),
            observed_at: None,
        }
    }
}

impl RiverReading {
    /// Builds a reading out of an arbitrary aare.guru-like payload.
    ///
    /// Never fails: a payload that is not an object, or fields that cannot be
    /// parsed, simply leave the corresponding value empty.
    pub fn from_payload(payload: &Value) -> Self {
        let Some(fields) = payload.as_object() else {
            return Self::default();
        };
        Self {
            temperature_celsius: extract_temperature(fields),
            location_name: extract_location(fields),
            observed_at: probe(fields, TIMESTAMP_KEYS).and_then(parse_timestamp),
        }
    }
}

fn extract_temperature(fields: &Map<String, Value>) -> Option<f64> {
    match probe(fields, TEMPERATURE_KEYS)? {
        Value::Number(number) => number.as_f64().filter(|value| value.is_finite()),
        Value::String(raw) => parse_float_prefix(raw),
        _ => None,
    }
}

fn extract_location(fields: &Map<String, Value>) -> String {
    LOCATION_KEYS
        .iter()
        .find_map(|key| fields.get(*key).and_then(Value::as_str))
        .unwrap_or(DEFAULT_LOCATION)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn first_present_temperature_key_wins() {
        for (index, key) in TEMPERATURE_KEYS.iter().enumerate() {
            let mut payload = Map::new();
            payload.insert((*key).to_string(), json!(10.0 + index as f64));
            for later in &TEMPERATURE_KEYS[index + 1..] {
                payload.insert((*later).to_string(), json!(99.0));
            }
            let reading = RiverReading::from_payload(&Value::Object(payload));
            assert_eq!(reading.temperature_celsius, Some(10.0 + index as f64), "{key}");
        }
    }

    #[test]
    fn unusable_first_key_is_not_skipped() {
        let reading = RiverReading::from_payload(&json!({"aare": "kalt", "aare_prec": 17.2}));
        assert_eq!(reading.temperature_celsius, None);
    }

    #[test]
    fn null_temperature_falls_through_to_next_key() {
        let reading = RiverReading::from_payload(&json!({"aare": null, "aare_prec": 17.25}));
        assert_eq!(reading.temperature_celsius, Some(17.25));
    }

    #[test]
    fn non_finite_temperature_is_absent() {
        for raw in ["Infinity", "NaN", "1e999", "", "abc"] {
            let reading = RiverReading::from_payload(&json!({ "aare": raw }));
            assert_eq!(reading.temperature_celsius, None, "{raw}");
        }
    }

    #[test]
    fn string_temperature_and_epoch_time() {
        let reading = RiverReading::from_payload(&json!({"aare": "18.3", "time": "1700000000"}));
        assert_eq!(reading.temperature_celsius, Some(18.3));
        assert_eq!(reading.observed_at.map(|t| t.timestamp()), Some(1_700_000_000));
        assert_eq!(reading.location_name, DEFAULT_LOCATION);
    }

    #[test]
    fn date_string_timestamp_is_parsed() {
        let reading = RiverReading::from_payload(&json!({"updated_at": "2024-07-01T12:00:00Z"}));
        assert_eq!(
            reading.observed_at.map(|t| t.to_rfc3339()),
            Some("2024-07-01T12:00:00+00:00".to_string())
        );
    }

    #[test]
    fn invalid_timestamp_is_absent() {
        let reading = RiverReading::from_payload(&json!({"time": "yesterday", "aare": 15}));
        assert_eq!(reading.observed_at, None);
        assert_eq!(reading.temperature_celsius, Some(15.0));
    }

    #[test]
    fn location_is_probed_in_order() {
        let reading = RiverReading::from_payload(&json!({"name": "Bern", "location": "x"}));
        assert_eq!(reading.location_name, "Bern");
        let reading =
            RiverReading::from_payload(&json!({"longname": "Bern, Schönau", "name": "Bern"}));
        assert_eq!(reading.location_name, "Bern, Schönau");
    }

    #[test]
    fn non_object_payload_yields_defaults() {
        assert_eq!(RiverReading::from_payload(&json!([1, 2, 3])), RiverReading::default());
        assert_eq!(RiverReading::from_payload(&Value::Null), RiverReading::default());
    }
}

use std::time::Duration;

use office_dashboard_core::transit::{
    DepartureEntry, LocationsResponse, StationboardResponse, parse_departures, select_station,
};
use reqwest::Client as HTTPClient;

use super::{Messages, Widget, build_url, get_json};
use crate::error::FetchError;
use crate::logging::Logger;

pub const TRANSPORT_API_BASE: &str = "https://transport.opendata.ch/v1";
const LOCATIONS_PATH: &str = "/locations";
const STATIONBOARD_PATH: &str = "/stationboard";
const MAX_DEPARTURES: &str = "6";
const REFRESH_PERIOD: Duration = Duration::from_secs(60);

const LOCATION_MESSAGES: Messages = Messages {
    status: "ÖV-Station konnte nicht geladen werden",
    data: "ÖV-Datenfehler",
};
const BOARD_MESSAGES: Messages = Messages {
    status: "ÖV-Verbindungen konnten nicht geladen werden",
    data: "ÖV-Datenfehler",
};

#[derive(Debug, Clone, PartialEq)]
pub struct TransitBoard {
    pub station_name: String,
    pub departures: Vec<DepartureEntry>,
}

/// Upcoming departures for a station looked up by free text.
pub struct Transit {
    api_base: String,
    station_query: String,
}

impl Transit {
    pub fn new(station_query: impl Into<String>) -> Self {
        Self::with_api_base(TRANSPORT_API_BASE, station_query)
    }

    pub fn with_api_base(api_base: impl Into<String>, station_query: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into().trim_end_matches('/').to_string(),
            station_query: station_query.into(),
        }
    }
}

impl Widget for Transit {
    type Output = TransitBoard;
    type View = TransitBoard;

    fn name(&self) -> &'static str {
        "transit"
    }

    fn period(&self) -> Duration {
        REFRESH_PERIOD
    }

    fn initial_view(&self) -> TransitBoard {
        TransitBoard {
            station_name: self.station_query.clone(),
            departures: Vec::new(),
        }
    }

    async fn fetch(&self, http_client: &HTTPClient) -> Result<TransitBoard, FetchError> {
        let logger = Logger::new().widget(self.name());
        let api_base = &self.api_base;

        let url = build_url(
            &format!("{api_base}{LOCATIONS_PATH}"),
            &[("query", self.station_query.as_str()), ("type", "station")],
            LOCATION_MESSAGES,
        )?;
        let locations: LocationsResponse =
            get_json(http_client, url, LOCATION_MESSAGES, &logger).await?;
        let stations = locations.stations.unwrap_or_default();

        let station = select_station(&stations)
            .filter(|station| station.name.as_deref().is_some_and(|name| !name.is_empty()))
            .ok_or_else(|| FetchError::StationNotFound(self.station_query.clone()))?;
        let station_name = station.name.clone().unwrap_or_default();
        let board_key = station.board_key().unwrap_or(station_name.as_str());

        let url = build_url(
            &format!("{api_base}{STATIONBOARD_PATH}"),
            &[("id", board_key), ("limit", MAX_DEPARTURES)],
            BOARD_MESSAGES,
        )?;
        let board: StationboardResponse =
            get_json(http_client, url, BOARD_MESSAGES, &logger).await?;

        Ok(TransitBoard {
            station_name: board
                .station
                .as_ref()
                .and_then(|station| station.name.clone())
                .unwrap_or(station_name),
            departures: parse_departures(&board),
        })
    }

    fn apply(&self, view: &mut TransitBoard, output: TransitBoard) -> Option<FetchError> {
        let empty = output.departures.is_empty();
        *view = output;
        empty.then_some(FetchError::NoDepartures)
    }

    fn on_failure(&self, view: &mut TransitBoard) {
        view.departures.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poller;
    use crate::state::Phase;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn locations_body() -> serde_json::Value {
        json!({"stations": [
            {"id": null, "name": "Bern, Hirschengraben", "coordinate": {"x": 46.94, "y": 7.44}},
            {"id": "8507000", "name": "Bern", "coordinate": {"x": 46.94, "y": 7.43}}
        ]})
    }

    fn board_body() -> serde_json::Value {
        json!({
            "station": {"id": "8507000", "name": "Bern"},
            "stationboard": [
                {"name": "IC 8", "number": "8", "to": "Brig",
                 "stop": {"departure": "2024-05-01T10:04:00+0200", "platform": "7",
                          "prognosis": {"departure": "2024-05-01T10:06:00+0200", "platform": null}}},
                {"name": "S 1", "number": "1", "to": "Thun",
                 "stop": {"departure": "2024-05-01T10:01:00+0200", "platform": "4"}}
            ]
        })
    }

    async fn mount_locations(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/locations"))
            .and(query_param("query", "Bern"))
            .and(query_param("type", "station"))
            .respond_with(ResponseTemplate::new(200).set_body_json(locations_body()))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn resolves_station_with_id_and_loads_board() {
        let server = MockServer::start().await;
        mount_locations(&server).await;
        Mock::given(method("GET"))
            .and(path("/stationboard"))
            .and(query_param("id", "8507000"))
            .and(query_param("limit", "6"))
            .respond_with(ResponseTemplate::new(200).set_body_json(board_body()))
            .expect(1)
            .mount(&server)
            .await;

        let transit = Transit::with_api_base(server.uri(), "Bern");
        let board = transit.fetch(&HTTPClient::new()).await.unwrap();

        assert_eq!(board.station_name, "Bern");
        let lines: Vec<_> = board.departures.iter().map(|d| d.line.as_str()).collect();
        assert_eq!(lines, vec!["8", "1"]);
        assert_eq!(board.departures[0].platform.as_deref(), Some("7"));
        assert_eq!(
            board.departures[0]
                .scheduled_departure
                .map(|t| t.to_rfc3339()),
            Some("2024-05-01T08:06:00+00:00".to_string())
        );
    }

    #[tokio::test]
    async fn no_station_is_an_error_state() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/locations"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"stations": []})))
            .mount(&server)
            .await;

        let transit = Transit::with_api_base(server.uri(), "Atlantis");
        let (handle, mut rx) = poller::spawn(transit, HTTPClient::new());
        let state = rx
            .wait_for(|state| state.phase == Phase::Error)
            .await
            .unwrap()
            .clone();
        handle.stop();

        assert_eq!(
            state.error.as_deref(),
            Some("Keine Station für \"Atlantis\" gefunden")
        );
        assert_eq!(state.data.station_name, "Atlantis");
        assert!(state.data.departures.is_empty());
        assert_eq!(state.last_update, None);
    }

    #[tokio::test]
    async fn board_failure_reports_and_keeps_station_name() {
        let server = MockServer::start().await;
        mount_locations(&server).await;
        Mock::given(method("GET"))
            .and(path("/stationboard"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let transit = Transit::with_api_base(server.uri(), "Bern");
        let mut view = TransitBoard {
            station_name: "Bern Bahnhof".to_string(),
            departures: vec![DepartureEntry {
                line: "1".to_string(),
                destination: "Thun".to_string(),
                scheduled_departure: None,
                platform: None,
            }],
        };
        let err = transit.fetch(&HTTPClient::new()).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "ÖV-Verbindungen konnten nicht geladen werden"
        );
        transit.on_failure(&mut view);
        assert_eq!(view.station_name, "Bern Bahnhof");
        assert!(view.departures.is_empty());
    }

    #[tokio::test]
    async fn locations_failure_uses_station_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let transit = Transit::with_api_base(server.uri(), "Bern");
        let err = transit.fetch(&HTTPClient::new()).await.unwrap_err();
        assert_eq!(err.to_string(), "ÖV-Station konnte nicht geladen werden");
    }

    #[tokio::test]
    async fn empty_board_is_shown_with_error() {
        let server = MockServer::start().await;
        mount_locations(&server).await;
        Mock::given(method("GET"))
            .and(path("/stationboard"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"station": {"name": "Bern"}, "stationboard": []})),
            )
            .mount(&server)
            .await;

        let transit = Transit::with_api_base(format!("{}/", server.uri()), "Bern");
        let (handle, mut rx) = poller::spawn(transit, HTTPClient::new());
        let state = rx
            .wait_for(|state| matches!(state.phase, Phase::Ready | Phase::Error))
            .await
            .unwrap()
            .clone();
        handle.stop();

        assert_eq!(state.phase, Phase::Error);
        assert_eq!(state.error.as_deref(), Some("Keine aktuellen Abfahrten"));
        assert_eq!(state.data.station_name, "Bern");
        assert!(state.last_update.is_some());
    }
}

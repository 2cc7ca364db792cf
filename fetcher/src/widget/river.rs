use std::time::Duration;

use office_dashboard_core::river::RiverReading;
use reqwest::Client as HTTPClient;
use serde_json::Value;

use super::{Messages, Widget, build_url, get_json};
use crate::error::FetchError;
use crate::logging::Logger;

pub const AARE_ENDPOINT: &str =
    "https://aareguru.existenz.ch/v2018/today?app=office-dashboard&version=1.0.1&city=bern";
const REFRESH_PERIOD: Duration = Duration::from_secs(5 * 60);
const MESSAGES: Messages = Messages {
    status: "Aare API antwortet nicht",
    data: "Datenfehler",
};

/// Aare water temperature from aare.guru.
pub struct River {
    endpoint: String,
}

impl Default for River {
    fn default() -> Self {
        Self::new()
    }
}

impl River {
    pub fn new() -> Self {
        Self::with_endpoint(AARE_ENDPOINT)
    }

    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

impl Widget for River {
    type Output = RiverReading;
    type View = RiverReading;

    fn name(&self) -> &'static str {
        "river"
    }

    fn period(&self) -> Duration {
        REFRESH_PERIOD
    }

    fn initial_view(&self) -> RiverReading {
        RiverReading::default()
    }

    async fn fetch(&self, http_client: &HTTPClient) -> Result<RiverReading, FetchError> {
        let logger = Logger::new().widget(self.name());
        let url = build_url(&self.endpoint, &[], MESSAGES)?;
        let payload: Value = get_json(http_client, url, MESSAGES, &logger).await?;
        Ok(RiverReading::from_payload(&payload))
    }

    fn apply(&self, view: &mut RiverReading, output: RiverReading) -> Option<FetchError> {
        let missing = output.temperature_celsius.is_none();
        *view = output;
        missing.then_some(FetchError::NoTemperature)
    }
}

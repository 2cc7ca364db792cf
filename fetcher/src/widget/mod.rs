use std::future::Future;
use std::time::Duration;

use reqwest::Client as HTTPClient;
use reqwest::header::CACHE_CONTROL;
use serde::de::DeserializeOwned;

use crate::error::FetchError;
use crate::logging::Logger;

pub mod river;
pub mod transit;

/// One self-contained dashboard panel: what to fetch, how often, and how a
/// result changes what the panel shows.
pub trait Widget: Send + Sync + 'static {
    /// Normalized result of one successful fetch.
    type Output: Send + 'static;
    /// What the panel renders from.
    type View: Send + Sync + 'static;

    fn name(&self) -> &'static str;

    fn period(&self) -> Duration;

    fn initial_view(&self) -> Self::View;

    fn fetch(
        &self,
        http_client: &HTTPClient,
    ) -> impl Future<Output = Result<Self::Output, FetchError>> + Send;

    /// Replaces the view with a fresh result. Returns an error when the data
    /// arrived but is not usable, the view is still updated in that case.
    fn apply(&self, view: &mut Self::View, output: Self::Output) -> Option<FetchError>;

    /// Called when a tick fails. Default keeps the previous view.
    fn on_failure(&self, _view: &mut Self::View) {}
}

/// Error texts a widget shows for the different ways an HTTP call can fail.
#[derive(Clone, Copy)]
pub(crate) struct Messages {
    pub(crate) status: &'static str,
    pub(crate) data: &'static str,
}

pub(crate) async fn get_json<T: DeserializeOwned>(
    http_client: &HTTPClient,
    url: reqwest::Url,
    messages: Messages,
    logger: &Logger,
) -> Result<T, FetchError> {
    let logger = logger.clone().url(url.as_str());
    logger.debug("http.request", "Sending request");

    let response = http_client
        .get(url)
        .header(CACHE_CONTROL, "no-cache")
        .send()
        .await
        .map_err(|source| FetchError::Transport {
            message: messages.data,
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            message: messages.status,
            status,
        });
    }

    response.json::<T>().await.map_err(|source| FetchError::Decode {
        message: messages.data,
        source,
    })
}

pub(crate) fn build_url(
    endpoint: &str,
    params: &[(&str, &str)],
    messages: Messages,
) -> Result<reqwest::Url, FetchError> {
    let parsed = if params.is_empty() {
        reqwest::Url::parse(endpoint)
    } else {
        reqwest::Url::parse_with_params(endpoint, params)
    };
    parsed.map_err(|err| FetchError::Endpoint {
        message: messages.data,
        reason: err.to_string(),
    })
}

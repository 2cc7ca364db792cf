use reqwest::StatusCode;

/// Everything that can go wrong in one poll tick.
///
/// The `Display` text is what the dashboard shows inline below the widget.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The request never produced a response (DNS, connect, timeout).
    #[error("{message}")]
    Transport {
        message: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{message}")]
    Status {
        message: &'static str,
        status: StatusCode,
    },
    /// The body was not the JSON we asked for.
    #[error("{message}")]
    Decode {
        message: &'static str,
        #[source]
        source: reqwest::Error,
    },
    /// An endpoint plus its query parameters did not form a valid URL.
    #[error("{message}")]
    Endpoint {
        message: &'static str,
        reason: String,
    },
    #[error("Keine Station für \"{0}\" gefunden")]
    StationNotFound(String),
    #[error("Keine Temperaturdaten")]
    NoTemperature,
    #[error("Keine aktuellen Abfahrten")]
    NoDepartures,
}

impl FetchError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            FetchError::Transport { source, .. } | FetchError::Decode { source, .. } => {
                source.status()
            }
            _ => None,
        }
    }
}

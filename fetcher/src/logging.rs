use tracing::{debug, info, warn};

pub(crate) const TARGET: &str = "office_dashboard_fetcher";

#[derive(Clone, Default)]
pub(crate) struct Logger {
    widget: Option<&'static str>,
    seq: Option<u64>,
    url: Option<String>,
    status: Option<u16>,
    error_text: Option<String>,
}

impl Logger {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn widget(mut self, widget: &'static str) -> Self {
        self.widget = Some(widget);
        self
    }

    pub(crate) fn seq(mut self, seq: u64) -> Self {
        self.seq = Some(seq);
        self
    }

    pub(crate) fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub(crate) fn status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub(crate) fn error_text(mut self, error_text: impl Into<String>) -> Self {
        self.error_text = Some(error_text.into());
        self
    }

    pub(crate) fn debug(&self, event: &'static str, message: &str) {
        debug!(
            target: TARGET,
            event,
            widget = self.widget,
            seq = self.seq,
            url = self.url.as_deref(),
            status = self.status,
            error_text = self.error_text.as_deref(),
            "{}",
            message
        );
    }

    pub(crate) fn info(&self, event: &'static str, message: &str) {
        info!(
            target: TARGET,
            event,
            widget = self.widget,
            seq = self.seq,
            url = self.url.as_deref(),
            status = self.status,
            error_text = self.error_text.as_deref(),
            "{}",
            message
        );
    }

    pub(crate) fn warn<E: std::fmt::Debug>(&self, event: &'static str, err: &E, message: &str) {
        warn!(
            target: TARGET,
            event,
            widget = self.widget,
            seq = self.seq,
            url = self.url.as_deref(),
            status = self.status,
            error_text = self.error_text.as_deref(),
            error = ?err,
            "{}",
            message
        );
    }
}

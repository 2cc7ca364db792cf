use chrono::{DateTime, Utc};

use crate::error::FetchError;
use crate::widget::Widget;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Spawned, first tick not issued yet.
    Idle,
    /// A request is in flight.
    Loading,
    Ready,
    Error,
}

/// What a widget currently shows.
///
/// Only the poller's completion handler writes to it; everything else reads
/// a snapshot through a `watch` channel.
#[derive(Debug, Clone)]
pub struct WidgetState<V> {
    pub phase: Phase,
    pub data: V,
    pub error: Option<String>,
    /// Local time of the last successful fetch.
    pub last_update: Option<DateTime<Utc>>,
    issued: u64,
    applied: u64,
}

impl<V> WidgetState<V> {
    pub fn new(data: V) -> Self {
        Self {
            phase: Phase::Idle,
            data,
            error: None,
            last_update: None,
            issued: 0,
            applied: 0,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Idle | Phase::Loading)
    }

    /// Starts a new request and returns its sequence number.
    pub(crate) fn begin(&mut self) -> u64 {
        self.issued += 1;
        self.phase = Phase::Loading;
        self.issued
    }

    /// Applies the outcome of request `seq`.
    ///
    /// Returns `false` when a later request has already been applied; the
    /// outcome is dropped in that case.
    pub(crate) fn settle<W>(
        &mut self,
        widget: &W,
        seq: u64,
        result: Result<W::Output, FetchError>,
        now: DateTime<Utc>,
    ) -> bool
    where
        W: Widget<View = V>,
    {
        if seq <= self.applied {
            return false;
        }
        self.applied = seq;

        let error = match result {
            Ok(output) => {
                self.last_update = Some(now);
                widget.apply(&mut self.data, output)
            }
            Err(err) => {
                widget.on_failure(&mut self.data);
                Some(err)
            }
        };
        self.error = error.map(|err| err.to_string());
        self.phase = if self.issued > seq {
            Phase::Loading
        } else if self.error.is_some() {
            Phase::Error
        } else {
            Phase::Ready
        };
        true
    }
}

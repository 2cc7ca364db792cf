use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use reqwest::Client as HTTPClient;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::logging::Logger;
use crate::state::WidgetState;
use crate::widget::Widget;

/// Keeps a periodic task alive; stopping or dropping it tears the task down.
///
/// Work the task already started is not aborted, it only sees the liveness
/// flag cleared and must discard its result.
pub struct TaskHandle {
    name: &'static str,
    active: Arc<AtomicBool>,
    teardown: Option<Teardown>,
    task: JoinHandle<()>,
}

/// Clears the liveness flag and reports whether it was still set.
type Teardown = Box<dyn Fn(&AtomicBool) -> bool + Send + Sync>;

impl TaskHandle {
    pub(crate) fn new(name: &'static str, active: Arc<AtomicBool>, task: JoinHandle<()>) -> Self {
        Self {
            name,
            active,
            teardown: None,
            task,
        }
    }

    /// Clears the flag through `teardown` instead of a bare store, so it can
    /// happen under the same lock completions publish with.
    pub(crate) fn with_teardown(
        mut self,
        teardown: impl Fn(&AtomicBool) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.teardown = Some(Box::new(teardown));
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    pub fn stop(&self) {
        let was_active = match &self.teardown {
            Some(teardown) => teardown(&self.active),
            None => self.active.swap(false, Ordering::AcqRel),
        };
        if was_active {
            Logger::new()
                .widget(self.name)
                .debug("poll.stopped", "Task torn down");
        }
        self.task.abort();
    }
}

impl Drop for TaskHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Starts polling `widget`: one fetch right away, then one every
/// `widget.period()` until the returned handle is stopped or dropped.
///
/// Ticks do not wait for each other, so a slow fetch can overlap with the next
/// one. Completions older than the last applied one are dropped.
pub fn spawn<W: Widget>(
    widget: W,
    http_client: HTTPClient,
) -> (TaskHandle, watch::Receiver<WidgetState<W::View>>) {
    let name = widget.name();
    let (tx, rx) = watch::channel(WidgetState::new(widget.initial_view()));
    let tx = Arc::new(tx);
    let active = Arc::new(AtomicBool::new(true));
    let task = tokio::spawn(run(
        Arc::new(widget),
        http_client,
        Arc::clone(&tx),
        Arc::clone(&active),
    ));

    // holding the watch lock here serializes teardown with `complete`
    let handle = TaskHandle::new(name, active, task).with_teardown(move |active| {
        let mut was_active = false;
        tx.send_if_modified(|_| {
            was_active = active.swap(false, Ordering::AcqRel);
            false
        });
        was_active
    });
    (handle, rx)
}

async fn run<W: Widget>(
    widget: Arc<W>,
    http_client: HTTPClient,
    tx: Arc<watch::Sender<WidgetState<W::View>>>,
    active: Arc<AtomicBool>,
) {
    let mut ticks = tokio::time::interval(widget.period());
    ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticks.tick().await;
        if !active.load(Ordering::Acquire) {
            break;
        }

        let mut seq = 0;
        tx.send_modify(|state| seq = state.begin());
        Logger::new()
            .widget(widget.name())
            .seq(seq)
            .debug("poll.tick", "Fetching");

        tokio::spawn(complete(
            Arc::clone(&widget),
            http_client.clone(),
            Arc::clone(&tx),
            Arc::clone(&active),
            seq,
        ));
    }
}

async fn complete<W: Widget>(
    widget: Arc<W>,
    http_client: HTTPClient,
    tx: Arc<watch::Sender<WidgetState<W::View>>>,
    active: Arc<AtomicBool>,
    seq: u64,
) {
    let result = widget.fetch(&http_client).await;
    let logger = Logger::new().widget(widget.name()).seq(seq);

    if !active.load(Ordering::Acquire) {
        logger.debug("poll.discarded", "Widget torn down, dropping result");
        return;
    }

    match &result {
        Ok(_) => logger.info("poll.succeeded", "Fetch completed"),
        Err(err) => {
            let logger = match err.status() {
                Some(status) => logger.clone().status(status.as_u16()),
                None => logger.clone(),
            };
            logger
                .error_text(err.to_string())
                .warn("poll.failed", err, "Fetch failed");
        }
    }

    let mut torn_down = false;
    let applied = tx.send_if_modified(|state| {
        if !active.load(Ordering::Acquire) {
            torn_down = true;
            return false;
        }
        state.settle(widget.as_ref(), seq, result, Utc::now())
    });
    if torn_down {
        logger.debug("poll.discarded", "Widget torn down, dropping result");
    } else if !applied {
        logger.debug("poll.stale", "A newer result was already applied");
    }
}

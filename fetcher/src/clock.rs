use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;

use crate::poller::TaskHandle;

pub const CLOCK_PERIOD: Duration = Duration::from_secs(1);

/// Publishes the wall-clock time every `period` until the handle goes away.
///
/// Display only: widget polling runs on its own timers.
pub fn spawn_clock(period: Duration) -> (TaskHandle, watch::Receiver<DateTime<Utc>>) {
    let (tx, rx) = watch::channel(Utc::now());
    let active = Arc::new(AtomicBool::new(true));
    let flag = Arc::clone(&active);

    let task = tokio::spawn(async move {
        let mut ticks = tokio::time::interval(period);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            ticks.tick().await;
            if !flag.load(Ordering::Acquire) || tx.send(Utc::now()).is_err() {
                break;
            }
        }
    });

    (TaskHandle::new("clock", active, task), rx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn ticks_until_stopped() {
        let (handle, mut rx) = spawn_clock(CLOCK_PERIOD);

        for _ in 0..3 {
            rx.changed().await.unwrap();
        }

        handle.stop();
        let _ = rx.borrow_and_update();
        let after = tokio::time::timeout(Duration::from_secs(10), rx.changed()).await;
        assert!(!matches!(after, Ok(Ok(()))));
    }
}

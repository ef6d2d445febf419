//! One-second wall-clock ticker.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Cadence of the clock.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Publishes the current instant on a fixed cadence from a background task.
///
/// The task is aborted by [`ClockTicker::stop`] or on drop, so no timer
/// outlives the view that owns the ticker.
pub struct ClockTicker {
    rx: watch::Receiver<DateTime<Utc>>,
    task: JoinHandle<()>,
}

impl ClockTicker {
    /// Tick the system clock every [`TICK_PERIOD`].
    #[must_use]
    pub fn spawn() -> Self {
        Self::spawn_with(TICK_PERIOD, Utc::now)
    }

    /// Tick an arbitrary clock source every `period`.
    pub fn spawn_with<F>(period: Duration, clock: F) -> Self
    where
        F: Fn() -> DateTime<Utc> + Send + 'static,
    {
        let (tx, rx) = watch::channel(clock());
        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                if tx.send(clock()).is_err() {
                    break;
                }
            }
        });
        Self { rx, task }
    }

    /// Most recently published instant.
    #[must_use]
    pub fn latest(&self) -> DateTime<Utc> {
        *self.rx.borrow()
    }

    /// Wait for the next tick. `false` once the ticker has stopped.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }

    pub fn stop(&self) {
        self.task.abort();
    }
}

impl Drop for ClockTicker {
    fn drop(&mut self) {
        self.task.abort();
    }
}

//! Periodic metrics refresh.
//!
//! The dashboard keeps its counters fresh by re-fetching them on a fixed
//! interval. [`MetricsPoller::spawn`] runs that loop as a tokio task and
//! publishes each result on a watch channel; the returned [`PollerHandle`]
//! stops the task when cancelled or dropped.

use std::time::Duration;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use log::debug;
use log::warn;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::DashboardClient;
use crate::error::Error;
use crate::model::Metrics;

/// Something that can fetch a metrics snapshot.
#[async_trait]
pub trait MetricsSource: Send + Sync + 'static {
    async fn fetch_metrics(&self) -> Result<Metrics, Error>;
}

#[async_trait]
impl MetricsSource for DashboardClient {
    async fn fetch_metrics(&self) -> Result<Metrics, Error> {
        self.metrics().await
    }
}

/// Result of one poll.
#[derive(Debug, Clone)]
pub struct PollUpdate {
    /// The snapshot, or the error message of a failed fetch.
    pub result: Result<Metrics, String>,
    pub fetched_at: DateTime<Utc>,
    /// 1 for the first poll, incremented on every poll.
    pub sequence: u64,
}

impl PollUpdate {
    pub fn metrics(&self) -> Option<&Metrics> {
        self.result.as_ref().ok()
    }

    pub fn error(&self) -> Option<&str> {
        self.result.as_ref().err().map(String::as_str)
    }
}

/// Spawns metrics polling tasks.
pub struct MetricsPoller;

impl MetricsPoller {
    /// Fetches from `source` now and then every `interval`.
    ///
    /// A failed fetch is published and polling carries on. Must be called
    /// from within a tokio runtime.
    pub fn spawn<S: MetricsSource>(source: S, interval: Duration) -> PollerHandle {
        let (sender, receiver) = watch::channel(None);
        let cancel = CancellationToken::new();
        let task_cancel = cancel.clone();
        let interval = interval.max(Duration::from_millis(1));

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut sequence = 0;

            loop {
                tokio::select! {
                    _ = task_cancel.cancelled() => break,
                    _ = ticker.tick() => {}
                }

                let result = tokio::select! {
                    _ = task_cancel.cancelled() => break,
                    result = source.fetch_metrics() => result,
                };

                sequence += 1;
                if let Err(e) = &result {
                    warn!("Metrics poll #{} failed: {}", sequence, e);
                }

                let update = PollUpdate {
                    result: result.map_err(|e| e.to_string()),
                    fetched_at: Utc::now(),
                    sequence,
                };
                if sender.send(Some(update)).is_err() {
                    break;
                }
            }

            debug!("Metrics poller stopped after {} polls", sequence);
        });

        PollerHandle {
            receiver,
            cancel,
            task: Some(task),
        }
    }
}

/// Handle to a running poller. Dropping it stops the poller.
pub struct PollerHandle {
    receiver: watch::Receiver<Option<PollUpdate>>,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl PollerHandle {
    /// The most recent update, if any poll has finished.
    pub fn latest(&self) -> Option<PollUpdate> {
        self.receiver.borrow().clone()
    }

    /// Waits for the next update.
    ///
    /// Returns `None` once the poller has stopped.
    pub async fn changed(&mut self) -> Option<PollUpdate> {
        tokio::select! {
            _ = self.cancel.cancelled() => None,
            changed = self.receiver.changed() => match changed {
                Ok(()) => self.receiver.borrow_and_update().clone(),
                Err(_) => None,
            },
        }
    }

    /// Another receiver of the same updates.
    pub fn subscribe(&self) -> watch::Receiver<Option<PollUpdate>> {
        self.receiver.clone()
    }

    /// Stops polling. An in-flight fetch is abandoned.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Stops polling and waits for the task to finish.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!("Metrics poller task failed: {}", e);
            }
        }
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

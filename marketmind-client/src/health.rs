//! Periodic backend liveness polling.

use crate::api::MarketMindApi;
use shared::models::HealthStatus;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Default delay between probes.
pub const DEFAULT_HEALTH_INTERVAL: Duration = Duration::from_secs(30);

/// Shorter intervals passed to [`HealthMonitor::spawn`] are raised to this.
pub const MIN_HEALTH_INTERVAL: Duration = Duration::from_millis(10);

/// Owns the polling task. Dropping the monitor stops it.
#[derive(Debug)]
pub struct HealthMonitor {
    status: watch::Receiver<HealthStatus>,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl HealthMonitor {
    /// Starts polling: one probe right away, then one every `every`, never
    /// more often than [`MIN_HEALTH_INTERVAL`].
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn spawn(api: Arc<dyn MarketMindApi>, every: Duration) -> Self {
        let every = every.max(MIN_HEALTH_INTERVAL);
        let (tx, status) = watch::channel(HealthStatus::Checking);
        let cancel = CancellationToken::new();
        let task = tokio::spawn(poll(api, every, tx, cancel.clone()));

        Self {
            status,
            cancel,
            task: Some(task),
        }
    }

    /// Latest published status.
    #[must_use]
    pub fn status(&self) -> HealthStatus {
        *self.status.borrow()
    }

    /// Receiver notified whenever the status changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<HealthStatus> {
        self.status.clone()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Stops polling and waits for the task to exit.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take()
            && let Err(err) = task.await
        {
            debug!(error = %err, "health monitor task ended abnormally");
        }
    }
}

impl Drop for HealthMonitor {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn poll(
    api: Arc<dyn MarketMindApi>,
    every: Duration,
    tx: watch::Sender<HealthStatus>,
    cancel: CancellationToken,
) {
    let mut ticker = interval(every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = ticker.tick() => {}
        }

        let online = tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            online = api.check_health() => online,
        };

        let next = HealthStatus::from_probe(online);
        tx.send_if_modified(|current| {
            if *current == next {
                return false;
            }
            debug!(from = %current, to = %next, "backend status changed");
            *current = next;
            true
        });
    }

    info!("health monitor stopped");
}

//! Presence Simulator
//!
//! Periodically redraws every record's `is_online` flag. Stands in for a
//! real presence feed while the dashboard runs in demo mode.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{oneshot, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{info, warn};

use crate::application::directory::DirectoryService;
use crate::config::PresenceConfig;
use crate::domain::{DomainResult, PresenceSource, PresenceTick, RandomPresence};
use crate::shared::ShutdownSignal;

type SharedSource = Arc<Mutex<Box<dyn PresenceSource>>>;

pub struct PresenceSimulator {
    service: Arc<DirectoryService>,
    source: SharedSource,
    interval: Duration,
    running: Arc<AtomicBool>,
}

impl PresenceSimulator {
    pub fn new(
        service: Arc<DirectoryService>,
        source: Box<dyn PresenceSource>,
        interval: Duration,
    ) -> Self {
        Self {
            service,
            source: Arc::new(Mutex::new(source)),
            interval,
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Random draws per `[presence]`; seeded when `seed` is set.
    pub fn from_config(service: Arc<DirectoryService>, config: &PresenceConfig) -> Self {
        let source = match config.seed {
            Some(seed) => RandomPresence::seeded(seed, config.online_threshold),
            None => RandomPresence::new(config.online_threshold),
        };
        Self::new(
            service,
            Box::new(source),
            Duration::from_secs(config.interval_secs),
        )
    }

    pub fn service(&self) -> &Arc<DirectoryService> {
        &self.service
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Run a single tick now, outside the schedule.
    pub async fn tick_once(&self) -> DomainResult<PresenceTick> {
        let mut source = self.source.lock().await;
        self.service.tick_presence(&mut **source).await
    }

    /// Spawn the periodic task. The first tick fires one full interval
    /// after start. The task ends when the returned handle is stopped or
    /// dropped, or when `shutdown` fires.
    ///
    /// Returns `None` while a previously started task is still running.
    pub fn start(&self, shutdown: ShutdownSignal) -> Option<PresenceHandle> {
        if self
            .running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            warn!("Presence simulator already running, start ignored");
            return None;
        }

        let service = self.service.clone();
        let source = self.source.clone();
        let period = self.interval;
        let running = self.running.clone();
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            info!(interval_secs = period.as_secs_f64(), "🌊 Presence simulator started");

            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let shutdown = shutdown.notified().wait();
            tokio::pin!(shutdown);

            loop {
                tokio::select! {
                    biased;
                    _ = &mut stop_rx => {
                        info!("🌊 Presence simulator stop requested");
                        break;
                    }
                    _ = &mut shutdown => {
                        info!("🌊 Presence simulator shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        let mut source = source.lock().await;
                        if let Err(e) = service.tick_presence(&mut **source).await {
                            warn!(error = %e, "Presence tick failed");
                        }
                    }
                }
            }

            running.store(false, Ordering::SeqCst);
            info!("🌊 Presence simulator stopped");
        });

        Some(PresenceHandle {
            stop: Some(stop_tx),
            task: Some(task),
        })
    }
}

/// Owns the running presence task.
///
/// Dropping the handle requests a stop without waiting for it.
pub struct PresenceHandle {
    stop: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl PresenceHandle {
    /// Stop the task and wait until it has exited.
    pub async fn stop(mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!(error = %e, "Presence task ended abnormally");
            }
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, |t| t.is_finished())
    }
}

impl Drop for PresenceHandle {
    fn drop(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
    }
}

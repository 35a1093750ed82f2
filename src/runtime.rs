//! Reusable directory runtime.
//!
//! Provides [`DirectoryRuntime`] that wires the in-memory directory, the
//! event bus, the presence simulator and shutdown handling together, so
//! front ends don't repeat the bootstrap code.

use std::sync::Arc;

use tracing::info;

use crate::application::{DemoMode, DirectoryService, PresenceSimulator};
use crate::config::AppConfig;
use crate::infrastructure::InMemoryUserDirectory;
use crate::notifications::{EventBus, SharedEventBus};
use crate::shared::{ShutdownCoordinator, ShutdownSignal, SharedClock, SystemClock};

// ── Options ────────────────────────────────────────────────────────

/// Options for starting the directory runtime.
pub struct RuntimeOptions {
    /// Application configuration.
    pub config: AppConfig,
    /// Load the sample staff accounts (default: true).
    pub seed_sample_users: bool,
    /// Time source for events and creation dates.
    pub clock: SharedClock,
}

impl Default for RuntimeOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            seed_sample_users: true,
            clock: Arc::new(SystemClock),
        }
    }
}

// ── DirectoryRuntime ───────────────────────────────────────────────

/// Handle to a running directory.
///
/// # Examples
///
/// ```rust,no_run
/// use oceanwatch::runtime::{DirectoryRuntime, RuntimeOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let runtime = DirectoryRuntime::start(RuntimeOptions::default()).await;
///     let stats = runtime.service.stats().await?;
///     println!("{} users", stats.total);
///     runtime.shutdown().await;
///     Ok(())
/// }
/// ```
pub struct DirectoryRuntime {
    /// Directory commands and queries.
    pub service: Arc<DirectoryService>,
    /// Change notifications.
    pub event_bus: SharedEventBus,
    /// Presence simulation toggle.
    pub demo: Arc<DemoMode>,
    /// The configuration the runtime was started with.
    pub config: AppConfig,

    shutdown: ShutdownCoordinator,
}

impl DirectoryRuntime {
    /// Build the directory and, if `[presence] enabled`, turn on demo mode.
    pub async fn start(opts: RuntimeOptions) -> Self {
        let config = opts.config;

        info!("Starting OceanWatch user directory...");

        let directory = if opts.seed_sample_users {
            InMemoryUserDirectory::seeded()
        } else {
            InMemoryUserDirectory::new()
        };

        let event_bus: SharedEventBus = Arc::new(EventBus::new().with_clock(opts.clock.clone()));
        let service = Arc::new(DirectoryService::new(
            Arc::new(directory),
            event_bus.clone(),
            opts.clock,
        ));

        let shutdown = ShutdownCoordinator::new(config.shutdown.timeout_secs);
        let simulator = Arc::new(PresenceSimulator::from_config(
            service.clone(),
            &config.presence,
        ));
        let demo = Arc::new(DemoMode::new(simulator, shutdown.signal()));

        if config.presence.enabled {
            demo.enable().await;
        }

        let stats = service.stats().await.unwrap_or_default();
        info!(
            users = stats.total,
            demo_mode = config.presence.enabled,
            "🚀 Directory ready"
        );

        Self {
            service,
            event_bus,
            demo,
            config,
            shutdown,
        }
    }

    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Listen for SIGINT/SIGTERM and trigger the shutdown signal.
    pub fn listen_for_signals(&self) {
        self.shutdown.start_signal_listener();
    }

    /// Block until the shutdown signal fires, then stop background work.
    pub async fn run_until_shutdown(&self) -> bool {
        let demo = self.demo.clone();
        self.shutdown
            .shutdown_with_cleanup(|| async move {
                demo.disable().await;
            })
            .await
    }

    /// Trigger shutdown and stop background work.
    pub async fn shutdown(&self) {
        self.shutdown.signal().trigger();
        self.run_until_shutdown().await;
        info!("👋 OceanWatch user directory shutdown complete");
    }
}

/// Install the global tracing subscriber. `RUST_LOG` wins over the
/// configured level.
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PresenceConfig;

    fn options(enabled: bool) -> RuntimeOptions {
        RuntimeOptions {
            config: AppConfig {
                presence: PresenceConfig {
                    enabled,
                    seed: Some(1),
                    ..PresenceConfig::default()
                },
                ..AppConfig::default()
            },
            ..RuntimeOptions::default()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn starts_seeded_with_demo_mode_from_config() {
        let runtime = DirectoryRuntime::start(options(true)).await;
        assert_eq!(runtime.service.stats().await.unwrap().total, 8);
        assert!(runtime.demo.is_enabled().await);

        runtime.shutdown().await;
        assert!(!runtime.demo.is_enabled().await);
        assert!(!runtime.demo.simulator().is_running());
    }

    #[tokio::test]
    async fn demo_mode_off_and_empty_directory() {
        let runtime = DirectoryRuntime::start(RuntimeOptions {
            seed_sample_users: false,
            ..options(false)
        })
        .await;
        assert!(!runtime.demo.is_enabled().await);
        assert_eq!(runtime.service.stats().await.unwrap().total, 0);
        runtime.shutdown().await;
    }
}

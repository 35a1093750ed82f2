//! Demo mode toggle
//!
//! Holds the presence task while demo mode is on. Turning it off (or
//! dropping the toggle) stops the task and releases its timer.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::info;

use super::simulator::{PresenceHandle, PresenceSimulator};
use crate::notifications::{DemoModeChangedEvent, Event};
use crate::shared::ShutdownSignal;

pub struct DemoMode {
    simulator: Arc<PresenceSimulator>,
    shutdown: ShutdownSignal,
    handle: Mutex<Option<PresenceHandle>>,
}

impl DemoMode {
    pub fn new(simulator: Arc<PresenceSimulator>, shutdown: ShutdownSignal) -> Self {
        Self {
            simulator,
            shutdown,
            handle: Mutex::new(None),
        }
    }

    pub fn simulator(&self) -> &Arc<PresenceSimulator> {
        &self.simulator
    }

    pub async fn is_enabled(&self) -> bool {
        self.handle.lock().await.is_some()
    }

    /// Returns `true` if the mode changed.
    pub async fn set_enabled(&self, enabled: bool) -> bool {
        if enabled {
            self.enable().await
        } else {
            self.disable().await
        }
    }

    /// Start the presence task. No-op when already enabled.
    pub async fn enable(&self) -> bool {
        let mut handle = self.handle.lock().await;
        if handle.is_some() {
            return false;
        }
        let Some(started) = self.simulator.start(self.shutdown.clone()) else {
            return false;
        };
        *handle = Some(started);
        drop(handle);

        info!("Demo mode enabled");
        self.announce(true);
        true
    }

    /// Stop the presence task and wait for it to exit. No-op when
    /// already disabled.
    pub async fn disable(&self) -> bool {
        let Some(running) = self.handle.lock().await.take() else {
            return false;
        };
        running.stop().await;

        info!("Demo mode disabled");
        self.announce(false);
        true
    }

    fn announce(&self, enabled: bool) {
        self.simulator
            .service()
            .publish(Event::DemoModeChanged(DemoModeChangedEvent { enabled }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::application::directory::DirectoryService;
    use crate::domain::ScriptedPresence;
    use crate::infrastructure::InMemoryUserDirectory;
    use crate::notifications::{EventBus, EventSubscriber};
    use crate::shared::SystemClock;

    fn demo() -> (DemoMode, EventSubscriber) {
        let bus = Arc::new(EventBus::new());
        let events = bus.subscribe();
        let service = Arc::new(DirectoryService::new(
            Arc::new(InMemoryUserDirectory::seeded()),
            bus,
            Arc::new(SystemClock),
        ));
        let simulator = Arc::new(PresenceSimulator::new(
            service,
            Box::new(ScriptedPresence::new(vec![true, false, false])),
            Duration::from_secs(10),
        ));
        (DemoMode::new(simulator, ShutdownSignal::new()), events)
    }

    fn event_types(events: &mut EventSubscriber) -> Vec<&'static str> {
        let mut types = Vec::new();
        while let Some(msg) = events.try_recv() {
            types.push(msg.event.event_type());
        }
        types
    }

    #[tokio::test(start_paused = true)]
    async fn toggling_starts_and_stops_ticks() {
        let (demo, mut events) = demo();

        assert!(demo.enable().await);
        assert!(!demo.enable().await);
        assert!(demo.is_enabled().await);

        tokio::time::sleep(Duration::from_secs(25)).await;
        assert!(demo.disable().await);
        assert!(!demo.disable().await);
        assert!(!demo.is_enabled().await);
        assert!(!demo.simulator().is_running());

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(
            event_types(&mut events),
            vec![
                "demo_mode_changed",
                "presence_ticked",
                "presence_ticked",
                "demo_mode_changed"
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn can_re_enable_after_disable() {
        let (demo, mut events) = demo();
        assert!(demo.set_enabled(true).await);
        assert!(demo.set_enabled(false).await);
        assert!(demo.set_enabled(true).await);

        tokio::time::sleep(Duration::from_secs(15)).await;
        assert!(demo.simulator().is_running());
        demo.disable().await;

        let ticks = event_types(&mut events)
            .into_iter()
            .filter(|t| *t == "presence_ticked")
            .count();
        assert_eq!(ticks, 1);
    }
}

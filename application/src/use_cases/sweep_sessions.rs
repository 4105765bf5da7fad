//! Background session sweeper
//!
//! Periodically evicts idle sessions from a [`SessionRegistry`] until
//! shut down.

use crate::use_cases::session_registry::SessionRegistry;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

const MIN_SWEEP_INTERVAL: Duration = Duration::from_millis(100);

/// Handle to a running sweeper task
///
/// Dropping the handle stops the task at its next wake-up.
pub struct SessionSweeper {
    token: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl SessionSweeper {
    /// Spawn a sweeper using the registry's configured interval and timeout
    pub fn spawn(registry: Arc<SessionRegistry>) -> Self {
        let interval = registry.params().sweep_interval;
        let idle_timeout = registry.params().idle_timeout;
        Self::spawn_with(registry, interval, idle_timeout)
    }

    /// Spawn a sweeper with explicit timings
    pub fn spawn_with(
        registry: Arc<SessionRegistry>,
        interval: Duration,
        idle_timeout: Duration,
    ) -> Self {
        let interval = interval.max(MIN_SWEEP_INTERVAL);
        let token = CancellationToken::new();
        let child = token.child_token();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately
            ticker.tick().await;

            info!(
                "Session sweeper started (every {:?}, idle after {:?})",
                interval, idle_timeout
            );
            loop {
                tokio::select! {
                    _ = child.cancelled() => break,
                    _ = ticker.tick() => {
                        let removed = registry.sweep(idle_timeout);
                        debug!("Sweep removed {} session(s)", removed);
                    }
                }
            }
            debug!("Session sweeper stopped");
        });

        Self {
            token,
            handle: Some(handle),
        }
    }

    /// Stop the sweeper and wait for it to exit
    pub async fn shutdown(mut self) {
        self.token.cancel();
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for SessionSweeper {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionParams;
    use crate::ports::capability::CapabilityError;
    use crate::ports::clock::ManualClock;
    use crate::ports::conversation::ConversationCapability;
    use async_trait::async_trait;
    use tripscout_domain::ConversationTurn;

    struct SilentConversation;

    #[async_trait]
    impl ConversationCapability for SilentConversation {
        async fn converse(
            &self,
            _history: &[ConversationTurn],
            _message: &str,
        ) -> Result<String, CapabilityError> {
            Ok("ok".to_string())
        }
    }

    fn registry(clock: Arc<ManualClock>) -> Arc<SessionRegistry> {
        let params = SessionParams::default()
            .with_idle_timeout(Duration::from_secs(60))
            .with_sweep_interval(Duration::from_secs(1));
        Arc::new(SessionRegistry::new(Arc::new(SilentConversation), params).with_clock(clock))
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_evicts_idle_sessions() {
        let clock = Arc::new(ManualClock::default());
        let registry = registry(clock.clone());
        registry.get_or_create(None, None);
        let sweeper = SessionSweeper::spawn(registry.clone());

        clock.advance(Duration::from_secs(61));
        tokio::time::sleep(Duration::from_millis(1500)).await;

        assert!(registry.is_empty());
        sweeper.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_keeps_active_sessions() {
        let clock = Arc::new(ManualClock::default());
        let registry = registry(clock.clone());
        registry.get_or_create(None, None);
        let sweeper = SessionSweeper::spawn(registry.clone());

        clock.advance(Duration::from_secs(30));
        tokio::time::sleep(Duration::from_secs(3)).await;

        assert_eq!(registry.len(), 1);
        sweeper.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_stops_sweeping() {
        let clock = Arc::new(ManualClock::default());
        let registry = registry(clock.clone());
        registry.get_or_create(None, None);

        SessionSweeper::spawn(registry.clone()).shutdown().await;
        clock.advance(Duration::from_secs(120));
        tokio::time::sleep(Duration::from_secs(5)).await;

        assert_eq!(registry.len(), 1);
    }
}

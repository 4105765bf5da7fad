//! Session registry
//!
//! Keeps every live [`ConversationSession`] keyed by id. Lookups, creation
//! and removal may happen from many tasks at once; the map is sharded so
//! they never block each other for long.

use crate::config::SessionParams;
use crate::ports::clock::{Clock, SystemClock};
use crate::ports::conversation::ConversationCapability;
use crate::use_cases::chat_session::ConversationSession;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Registry of live chat sessions
pub struct SessionRegistry {
    sessions: DashMap<String, Arc<ConversationSession>>,
    capability: Arc<dyn ConversationCapability>,
    clock: Arc<dyn Clock>,
    params: SessionParams,
}

impl SessionRegistry {
    pub fn new(capability: Arc<dyn ConversationCapability>, params: SessionParams) -> Self {
        Self {
            sessions: DashMap::new(),
            capability,
            clock: Arc::new(SystemClock),
            params,
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn params(&self) -> &SessionParams {
        &self.params
    }

    /// Return the live session for `id`, or allocate a new one
    ///
    /// A new session gets a freshly generated id, never the supplied one.
    /// This happens when `id` is absent, unknown, expired, or owned by a
    /// different non-empty owner.
    pub fn get_or_create(&self, id: Option<&str>, owner: Option<&str>) -> Arc<ConversationSession> {
        let owner = owner.map(str::trim).filter(|o| !o.is_empty());

        if let Some(id) = id.map(str::trim).filter(|id| !id.is_empty()) {
            match self.get(id) {
                Some(session) if owner_matches(&session, owner) => return session,
                Some(_) => warn!("Session {} belongs to another owner, allocating a new one", id),
                None => debug!("Session {} not found, allocating a new one", id),
            }
        }

        self.create(owner)
    }

    /// Look up a live session
    ///
    /// An expired, idle session found here is evicted and `None` is returned.
    /// Lookup does not refresh the activity timestamp.
    pub fn get(&self, id: &str) -> Option<Arc<ConversationSession>> {
        let session = self.sessions.get(id).map(|entry| Arc::clone(entry.value()))?;

        if session.is_idle(self.params.idle_timeout, self.clock.now()) && !session.is_busy() {
            self.sessions
                .remove_if(id, |_, current| Arc::ptr_eq(current, &session));
            debug!("Session {} expired on lookup", id);
            return None;
        }
        Some(session)
    }

    /// Remove a session; returns whether it existed
    pub fn remove(&self, id: &str) -> bool {
        let removed = self.sessions.remove(id).is_some();
        if removed {
            info!("Removed session {}", id);
        }
        removed
    }

    /// Evict sessions idle for longer than `idle_threshold`
    ///
    /// Sessions with a send in flight are skipped. Returns the number of
    /// sessions removed.
    pub fn sweep(&self, idle_threshold: Duration) -> usize {
        let now = self.clock.now();
        let expired: Vec<String> = self
            .sessions
            .iter()
            .filter(|entry| entry.value().is_idle(idle_threshold, now))
            .map(|entry| entry.key().clone())
            .collect();

        let removed = expired
            .iter()
            .filter(|id| {
                self.sessions
                    .remove_if(id.as_str(), |_, session| {
                        session.is_idle(idle_threshold, now) && !session.is_busy()
                    })
                    .is_some()
            })
            .count();

        if removed > 0 {
            info!("Swept {} idle session(s), {} remaining", removed, self.sessions.len());
        }
        removed
    }

    /// Sweep with the configured idle timeout
    pub fn sweep_expired(&self) -> usize {
        self.sweep(self.params.idle_timeout)
    }

    /// Drop every session; returns how many were removed
    pub fn clear_all(&self) -> usize {
        let count = self.sessions.len();
        self.sessions.clear();
        info!("Cleared all {} session(s)", count);
        count
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Ids of all registered sessions, in no particular order
    pub fn ids(&self) -> Vec<String> {
        self.sessions.iter().map(|entry| entry.key().clone()).collect()
    }

    fn create(&self, owner: Option<&str>) -> Arc<ConversationSession> {
        let id = Uuid::new_v4().to_string();
        let session = Arc::new(ConversationSession::new(
            id.clone(),
            owner.map(String::from),
            Arc::clone(&self.capability),
            Arc::clone(&self.clock),
            &self.params,
        ));
        self.sessions.insert(id.clone(), Arc::clone(&session));
        info!("Created session {}", id);
        session
    }
}

fn owner_matches(session: &ConversationSession, owner: Option<&str>) -> bool {
    match (session.owner(), owner) {
        (Some(existing), Some(requested)) => existing == requested,
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::capability::CapabilityError;
    use crate::ports::clock::ManualClock;
    use async_trait::async_trait;
    use std::collections::HashSet;
    use tokio::sync::Notify;
    use tripscout_domain::ConversationTurn;

    // ==================== Test Mocks ====================

    struct EchoConversation;

    #[async_trait]
    impl ConversationCapability for EchoConversation {
        async fn converse(
            &self,
            _history: &[ConversationTurn],
            message: &str,
        ) -> Result<String, CapabilityError> {
            Ok(format!("echo: {}", message))
        }
    }

    /// Blocks every call until released
    struct GatedConversation {
        entered: Notify,
        release: Notify,
    }

    #[async_trait]
    impl ConversationCapability for GatedConversation {
        async fn converse(
            &self,
            _history: &[ConversationTurn],
            _message: &str,
        ) -> Result<String, CapabilityError> {
            self.entered.notify_one();
            self.release.notified().await;
            Ok("done".to_string())
        }
    }

    const IDLE: Duration = Duration::from_secs(30 * 60);

    fn registry() -> (SessionRegistry, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::default());
        let registry = SessionRegistry::new(
            Arc::new(EchoConversation),
            SessionParams::default().with_idle_timeout(IDLE),
        )
        .with_clock(clock.clone());
        (registry, clock)
    }

    // ==================== Tests ====================

    #[test]
    fn test_create_without_id() {
        let (registry, _) = registry();

        let session = registry.get_or_create(None, None);

        assert_eq!(registry.len(), 1);
        assert!(registry.get(session.id()).is_some());
    }

    #[test]
    fn test_two_creations_get_distinct_ids() {
        let (registry, _) = registry();

        let first = registry.get_or_create(None, None);
        let second = registry.get_or_create(None, None);

        assert_ne!(first.id(), second.id());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_existing_id_returns_same_session() {
        let (registry, _) = registry();
        let first = registry.get_or_create(None, Some("alice"));

        let again = registry.get_or_create(Some(first.id()), Some("alice"));

        assert!(Arc::ptr_eq(&first, &again));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_unknown_id_gets_fresh_id() {
        let (registry, _) = registry();

        let session = registry.get_or_create(Some("made-up"), None);

        assert_ne!(session.id(), "made-up");
        assert!(registry.get("made-up").is_none());
    }

    #[test]
    fn test_owner_mismatch_allocates_new_session() {
        let (registry, _) = registry();
        let alice = registry.get_or_create(None, Some("alice"));

        let bob = registry.get_or_create(Some(alice.id()), Some("bob"));

        assert_ne!(alice.id(), bob.id());
        assert_eq!(bob.owner(), Some("bob"));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_remove() {
        let (registry, _) = registry();
        let session = registry.get_or_create(None, None);

        assert!(registry.remove(session.id()));
        assert!(!registry.remove(session.id()));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_sweep_threshold_boundary() {
        let (registry, clock) = registry();
        let old = registry.get_or_create(None, None);
        clock.advance(Duration::from_secs(2));
        let recent = registry.get_or_create(None, None);

        // old: idle 30m+1s, recent: idle 30m-1s
        clock.advance(IDLE - Duration::from_secs(1));
        let removed = registry.sweep(IDLE);

        assert_eq!(removed, 1);
        assert!(registry.ids().contains(&recent.id().to_string()));
        assert!(!registry.ids().contains(&old.id().to_string()));
    }

    #[test]
    fn test_expired_session_replaced_on_lookup() {
        let (registry, clock) = registry();
        let session = registry.get_or_create(None, None);
        clock.advance(IDLE + Duration::from_secs(1));

        let replacement = registry.get_or_create(Some(session.id()), None);

        assert_ne!(replacement.id(), session.id());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_clear_all() {
        let (registry, _) = registry();
        for _ in 0..3 {
            registry.get_or_create(None, None);
        }

        assert_eq!(registry.clear_all(), 3);
        assert!(registry.is_empty());
    }

    #[tokio::test]
    async fn test_sweep_skips_busy_session() {
        let clock = Arc::new(ManualClock::default());
        let gate = Arc::new(GatedConversation {
            entered: Notify::new(),
            release: Notify::new(),
        });
        let registry = Arc::new(
            SessionRegistry::new(gate.clone(), SessionParams::default().with_idle_timeout(IDLE))
                .with_clock(clock.clone()),
        );
        let session = registry.get_or_create(None, None);
        clock.advance(IDLE * 2);

        let sending = {
            let session = session.clone();
            tokio::spawn(async move { session.send("hello").await })
        };
        gate.entered.notified().await;

        assert_eq!(registry.sweep(IDLE), 0);
        assert_eq!(registry.len(), 1);

        gate.release.notify_one();
        sending.await.unwrap().unwrap();
        assert_eq!(session.turns().await.len(), 2);
        assert_eq!(registry.sweep(IDLE), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_access_stays_consistent() {
        let (registry, _) = registry();
        let registry = Arc::new(registry);
        let shared = registry.get_or_create(None, None);

        let mut tasks = Vec::new();
        for i in 0..32 {
            let registry = registry.clone();
            let shared_id = shared.id().to_string();
            tasks.push(tokio::spawn(async move {
                let session = if i % 2 == 0 {
                    registry.get_or_create(Some(&shared_id), None)
                } else {
                    registry.get_or_create(None, None)
                };
                session.send(&format!("message {}", i)).await.unwrap();
                session.id().to_string()
            }));
        }

        let mut ids = HashSet::new();
        for task in futures::future::join_all(tasks).await {
            ids.insert(task.unwrap());
        }

        // 16 fresh sessions plus the shared one
        assert_eq!(ids.len(), 17);
        assert_eq!(registry.len(), 17);
        assert_eq!(shared.turns().await.len(), 32);
    }
}

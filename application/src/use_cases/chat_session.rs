//! Chat session use case
//!
//! A [`ConversationSession`] owns one ordered history and serializes sends:
//! the history lock is held across the capability call, so concurrent
//! sends on the same session never interleave their turns.

use crate::config::SessionParams;
use crate::ports::capability::CapabilityError;
use crate::ports::clock::Clock;
use crate::ports::conversation::ConversationCapability;
use crate::use_cases::shared::{bounded_call, cancellable};
use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use tripscout_domain::util::truncate_str;
use tripscout_domain::{ConversationHistory, ConversationTurn, DomainError};

/// Errors that can occur while sending a chat message
#[derive(Error, Debug)]
pub enum ChatError {
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] DomainError),

    #[error("Conversation failed: {0}")]
    ConversationFailed(#[source] CapabilityError),
}

impl ChatError {
    /// Suggested HTTP-style status code for this failure
    pub fn status_hint(&self) -> u16 {
        match self {
            ChatError::InvalidInput(_) => 400,
            ChatError::ConversationFailed(e) if e.is_rate_limited() => 429,
            ChatError::ConversationFailed(_) => 503,
        }
    }

    /// End-user message without internal detail
    pub fn user_message(&self) -> String {
        match self {
            ChatError::InvalidInput(e) => e.to_string(),
            ChatError::ConversationFailed(e) if e.is_rate_limited() => {
                "The assistant is busy right now. Please try again in a moment.".to_string()
            }
            ChatError::ConversationFailed(CapabilityError::Cancelled) => {
                "Message cancelled.".to_string()
            }
            ChatError::ConversationFailed(_) => {
                "The assistant could not reply. Please try again.".to_string()
            }
        }
    }
}

/// Point-in-time view of a session
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub id: String,
    pub owner: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_active_at: DateTime<Utc>,
    pub turns: Vec<ConversationTurn>,
}

/// One ongoing conversation
pub struct ConversationSession {
    id: String,
    owner: Option<String>,
    created_at: DateTime<Utc>,
    /// Milliseconds since the epoch, readable without the history lock
    last_active_ms: AtomicI64,
    history: Mutex<ConversationHistory>,
    capability: Arc<dyn ConversationCapability>,
    clock: Arc<dyn Clock>,
    call_timeout: Option<Duration>,
}

impl ConversationSession {
    pub fn new(
        id: impl Into<String>,
        owner: Option<String>,
        capability: Arc<dyn ConversationCapability>,
        clock: Arc<dyn Clock>,
        params: &SessionParams,
    ) -> Self {
        let now = clock.now();
        Self {
            id: id.into(),
            owner,
            created_at: now,
            last_active_ms: AtomicI64::new(now.timestamp_millis()),
            history: Mutex::new(ConversationHistory::new(params.max_turns)),
            capability,
            clock,
            call_timeout: params.call_timeout,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn last_active_at(&self) -> DateTime<Utc> {
        let millis = self.last_active_ms.load(Ordering::Acquire);
        Utc.timestamp_millis_opt(millis)
            .single()
            .unwrap_or(self.created_at)
    }

    /// True when the last activity is strictly older than `threshold`
    pub fn is_idle(&self, threshold: Duration, now: DateTime<Utc>) -> bool {
        let elapsed = now.timestamp_millis() - self.last_active_ms.load(Ordering::Acquire);
        let threshold = i64::try_from(threshold.as_millis()).unwrap_or(i64::MAX);
        elapsed > threshold
    }

    /// True while a send or clear holds the history
    pub fn is_busy(&self) -> bool {
        self.history.try_lock().is_err()
    }

    /// Send a message and return the assistant reply
    ///
    /// On success both the user and assistant turns are appended. On failure
    /// only the user turn is appended. If this future is dropped before the
    /// capability answers, nothing is appended.
    pub async fn send(&self, message: &str) -> Result<String, ChatError> {
        if message.trim().is_empty() {
            return Err(DomainError::EmptyMessage.into());
        }

        let mut history = self.history.lock().await;
        debug!(
            "Session {} sending message ({} prior turns): {}",
            self.id,
            history.len(),
            truncate_str(message, 80)
        );

        let outcome = bounded_call(
            self.call_timeout,
            self.capability.converse(history.turns(), message),
        )
        .await
        .and_then(|reply| {
            let reply = reply.trim();
            if reply.is_empty() {
                Err(CapabilityError::InvalidResponse("empty reply".to_string()))
            } else {
                Ok(reply.to_string())
            }
        });

        match outcome {
            Ok(reply) => {
                history.record_exchange(message, reply.clone());
                self.touch();
                Ok(reply)
            }
            Err(e) => {
                history.push(ConversationTurn::user(message));
                warn!("Session {} conversation failed: {}", self.id, e);
                Err(ChatError::ConversationFailed(e))
            }
        }
    }

    /// Like [`send`](Self::send), but gives up when `token` is cancelled
    ///
    /// A cancelled send leaves the history unchanged.
    pub async fn send_cancellable(
        &self,
        message: &str,
        token: &CancellationToken,
    ) -> Result<String, ChatError> {
        match cancellable(token, self.send(message)).await {
            Some(result) => result,
            None => {
                debug!("Session {} send cancelled", self.id);
                Err(ChatError::ConversationFailed(CapabilityError::Cancelled))
            }
        }
    }

    /// Empty the history; waits for an in-flight send to finish first
    pub async fn clear(&self) {
        self.history.lock().await.clear();
        debug!("Session {} history cleared", self.id);
    }

    /// Copy of the current turns
    pub async fn turns(&self) -> Vec<ConversationTurn> {
        self.history.lock().await.turns().to_vec()
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        let turns = self.turns().await;
        SessionSnapshot {
            id: self.id.clone(),
            owner: self.owner.clone(),
            created_at: self.created_at,
            last_active_at: self.last_active_at(),
            turns,
        }
    }

    fn touch(&self) {
        self.last_active_ms
            .store(self.clock.now().timestamp_millis(), Ordering::Release);
    }
}

impl std::fmt::Debug for ConversationSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversationSession")
            .field("id", &self.id)
            .field("owner", &self.owner)
            .field("created_at", &self.created_at)
            .field("last_active_at", &self.last_active_at())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::clock::ManualClock;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use tripscout_domain::Role;

    // ==================== Test Mocks ====================

    /// Replies from a queue; records the history length seen by each call
    struct MockConversation {
        replies: std::sync::Mutex<VecDeque<Result<String, CapabilityError>>>,
        seen_history: std::sync::Mutex<Vec<usize>>,
        delay: Option<Duration>,
    }

    impl MockConversation {
        fn new(replies: Vec<Result<String, CapabilityError>>) -> Self {
            Self {
                replies: std::sync::Mutex::new(VecDeque::from(replies)),
                seen_history: std::sync::Mutex::new(Vec::new()),
                delay: None,
            }
        }

        fn echo(count: usize) -> Self {
            Self::new((0..count).map(|i| Ok(format!("reply {}", i))).collect())
        }

        fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }
    }

    #[async_trait]
    impl ConversationCapability for MockConversation {
        async fn converse(
            &self,
            history: &[ConversationTurn],
            _message: &str,
        ) -> Result<String, CapabilityError> {
            self.seen_history.lock().unwrap().push(history.len());
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(CapabilityError::Other("No more replies".to_string())))
        }
    }

    fn session(mock: MockConversation) -> (ConversationSession, Arc<MockConversation>) {
        let mock = Arc::new(mock);
        let session = ConversationSession::new(
            "s-1",
            None,
            mock.clone(),
            Arc::new(ManualClock::default()),
            &SessionParams::default(),
        );
        (session, mock)
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_successful_send_appends_two_turns() {
        let (session, _) = session(MockConversation::new(vec![Ok("  Try Lisbon!  ".to_string())]));

        let reply = session.send("Where should I go?").await.unwrap();

        assert_eq!(reply, "Try Lisbon!");
        let turns = session.turns().await;
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0], ConversationTurn::user("Where should I go?"));
        assert_eq!(turns[1], ConversationTurn::assistant("Try Lisbon!"));
    }

    #[tokio::test]
    async fn test_two_sends_build_ordered_history() {
        let (session, _) = session(MockConversation::new(vec![
            Ok("R1".to_string()),
            Ok("R2".to_string()),
        ]));

        session.send("hello").await.unwrap();
        session.send("how are you").await.unwrap();

        assert_eq!(
            session.turns().await,
            vec![
                ConversationTurn::user("hello"),
                ConversationTurn::assistant("R1"),
                ConversationTurn::user("how are you"),
                ConversationTurn::assistant("R2"),
            ]
        );
    }

    #[tokio::test]
    async fn test_failed_send_appends_user_turn_only() {
        let (session, _) = session(MockConversation::new(vec![Err(
            CapabilityError::Connection("reset".to_string()),
        )]));

        let err = session.send("hello").await.unwrap_err();

        assert!(matches!(err, ChatError::ConversationFailed(_)));
        let turns = session.turns().await;
        assert_eq!(turns.len(), 1);
        assert_eq!(turns[0].role, Role::User);
    }

    #[tokio::test]
    async fn test_empty_reply_is_failure() {
        let (session, _) = session(MockConversation::new(vec![Ok("   ".to_string())]));

        let err = session.send("hello").await.unwrap_err();

        assert!(matches!(
            err,
            ChatError::ConversationFailed(CapabilityError::InvalidResponse(_))
        ));
        assert_eq!(session.turns().await.len(), 1);
    }

    #[tokio::test]
    async fn test_blank_message_rejected_without_call() {
        let (session, mock) = session(MockConversation::echo(1));

        let err = session.send(" \t ").await.unwrap_err();

        assert!(matches!(err, ChatError::InvalidInput(DomainError::EmptyMessage)));
        assert_eq!(err.status_hint(), 400);
        assert!(session.turns().await.is_empty());
        assert!(mock.seen_history.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_capability_sees_prior_turns_only() {
        let (session, mock) = session(MockConversation::echo(2));

        session.send("first").await.unwrap();
        session.send("second").await.unwrap();

        assert_eq!(*mock.seen_history.lock().unwrap(), vec![0, 2]);
    }

    #[tokio::test]
    async fn test_clear_empties_history() {
        let (session, _) = session(MockConversation::echo(1));
        session.send("hi").await.unwrap();

        session.clear().await;

        assert!(session.turns().await.is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_sends_never_interleave() {
        let (session, _) = session(MockConversation::echo(8).with_delay(Duration::from_millis(5)));
        let session = Arc::new(session);

        let sends = (0..8).map(|i| {
            let session = session.clone();
            async move { session.send(&format!("message {}", i)).await }
        });
        let results = futures::future::join_all(sends).await;

        assert!(results.iter().all(|r| r.is_ok()));
        let turns = session.turns().await;
        assert_eq!(turns.len(), 16);
        for pair in turns.chunks(2) {
            assert_eq!(pair[0].role, Role::User);
            assert_eq!(pair[1].role, Role::Assistant);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_records_user_turn() {
        let (session, _) = session(MockConversation::echo(1).with_delay(Duration::from_secs(600)));

        let err = session.send("hello").await.unwrap_err();

        assert!(matches!(
            err,
            ChatError::ConversationFailed(CapabilityError::Timeout(_))
        ));
        assert_eq!(err.status_hint(), 503);
        assert_eq!(session.turns().await.len(), 1);
    }

    #[tokio::test]
    async fn test_cancelled_send_leaves_history_unchanged() {
        let (session, _) = session(MockConversation::echo(1).with_delay(Duration::from_secs(600)));
        let token = CancellationToken::new();
        token.cancel();

        let err = session.send_cancellable("hello", &token).await.unwrap_err();

        assert!(matches!(
            err,
            ChatError::ConversationFailed(CapabilityError::Cancelled)
        ));
        assert!(session.turns().await.is_empty());
    }

    #[tokio::test]
    async fn test_success_refreshes_activity() {
        let clock = Arc::new(ManualClock::default());
        let session = ConversationSession::new(
            "s-2",
            None,
            Arc::new(MockConversation::echo(1)),
            clock.clone(),
            &SessionParams::default(),
        );
        let idle = Duration::from_secs(60);

        clock.advance(Duration::from_secs(120));
        assert!(session.is_idle(idle, clock.now()));

        session.send("hi").await.unwrap();

        assert!(!session.is_idle(idle, clock.now()));
        assert_eq!(
            session.last_active_at().timestamp_millis(),
            clock.now().timestamp_millis()
        );
    }

    #[tokio::test]
    async fn test_history_is_bounded() {
        let mock = Arc::new(MockConversation::echo(5));
        let session = ConversationSession::new(
            "s-3",
            None,
            mock,
            Arc::new(ManualClock::default()),
            &SessionParams::default().with_max_turns(4),
        );

        for i in 0..5 {
            session.send(&format!("m{}", i)).await.unwrap();
        }

        let turns = session.turns().await;
        assert_eq!(turns.len(), 4);
        assert_eq!(turns[0], ConversationTurn::user("m3"));
    }
}

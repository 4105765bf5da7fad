//! Bounded, append-only turn history

use crate::conversation::turn::{ConversationTurn, Role};
use serde::{Deserialize, Serialize};

/// Default cap on retained turns (50 exchanges)
pub const DEFAULT_MAX_TURNS: usize = 100;

/// Ordered history of a single conversation (Entity)
///
/// Turns are only ever appended. When the cap is reached the oldest turns are
/// dropped first, so the history never grows beyond `max_turns`. A trimmed
/// history always starts with a user turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationHistory {
    turns: Vec<ConversationTurn>,
    max_turns: usize,
}

impl Default for ConversationHistory {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TURNS)
    }
}

impl ConversationHistory {
    /// Create an empty history. The cap is raised to 2 if smaller, so one
    /// full exchange always fits.
    pub fn new(max_turns: usize) -> Self {
        Self {
            turns: Vec::new(),
            max_turns: max_turns.max(2),
        }
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn max_turns(&self) -> usize {
        self.max_turns
    }

    pub fn last(&self) -> Option<&ConversationTurn> {
        self.turns.last()
    }

    /// Append a turn, evicting the oldest ones past the cap
    pub fn push(&mut self, turn: ConversationTurn) {
        self.turns.push(turn);
        if self.turns.len() > self.max_turns {
            let excess = self.turns.len() - self.max_turns;
            self.turns.drain(..excess);

            // Multi-turn APIs reject a transcript opening with the assistant
            let leading = self
                .turns
                .iter()
                .take_while(|t| t.role != Role::User)
                .count();
            self.turns.drain(..leading);
        }
    }

    /// Append a completed user/assistant exchange
    pub fn record_exchange(&mut self, user: impl Into<String>, assistant: impl Into<String>) {
        self.push(ConversationTurn::user(user));
        self.push(ConversationTurn::assistant(assistant));
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_exchange_keeps_order() {
        let mut history = ConversationHistory::default();
        history.record_exchange("hello", "hi there");
        history.record_exchange("how are you", "great");

        let contents: Vec<_> = history.turns().iter().map(|t| t.content.as_str()).collect();
        assert_eq!(contents, vec!["hello", "hi there", "how are you", "great"]);
        assert_eq!(history.turns()[2].role, Role::User);
    }

    #[test]
    fn test_cap_drops_oldest_turns() {
        let mut history = ConversationHistory::new(4);
        for i in 0..3 {
            history.record_exchange(format!("q{}", i), format!("a{}", i));
        }

        assert_eq!(history.len(), 4);
        assert_eq!(history.turns()[0].content, "q1");
        assert_eq!(history.last().unwrap().content, "a2");
    }

    #[test]
    fn test_trim_after_lone_user_turn_starts_with_user() {
        let mut history = ConversationHistory::new(4);
        history.record_exchange("q0", "a0");
        // A failed send leaves only the user turn behind
        history.push(ConversationTurn::user("q1"));
        history.record_exchange("q2", "a2");

        let roles: Vec<Role> = history.turns().iter().map(|t| t.role).collect();
        assert_eq!(roles, vec![Role::User, Role::User, Role::Assistant]);
        assert_eq!(history.turns()[0].content, "q1");
    }

    #[test]
    fn test_odd_cap_keeps_user_first() {
        let mut history = ConversationHistory::new(5);
        for i in 0..4 {
            history.record_exchange(format!("q{}", i), format!("a{}", i));
        }

        assert_eq!(history.turns()[0].role, Role::User);
        assert!(history.len() <= 5);
        assert_eq!(history.last().unwrap().content, "a3");
    }

    #[test]
    fn test_tiny_cap_still_fits_one_exchange() {
        let mut history = ConversationHistory::new(0);
        history.record_exchange("q", "a");
        assert_eq!(history.max_turns(), 2);
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_clear() {
        let mut history = ConversationHistory::default();
        history.push(ConversationTurn::user("hello"));
        history.clear();
        assert!(history.is_empty());
    }
}

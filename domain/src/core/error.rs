//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Search text cannot be empty")]
    EmptySearchText,

    #[error("Message cannot be empty")]
    EmptyMessage,

    #[error("Invalid result limit: {0} (must be greater than zero)")]
    InvalidLimit(usize),
}

impl DomainError {
    /// Check if this error was caused by blank caller input
    pub fn is_empty_input(&self) -> bool {
        matches!(self, DomainError::EmptySearchText | DomainError::EmptyMessage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_search_text_display() {
        let error = DomainError::EmptySearchText;
        assert_eq!(error.to_string(), "Search text cannot be empty");
    }

    #[test]
    fn test_is_empty_input_check() {
        assert!(DomainError::EmptySearchText.is_empty_input());
        assert!(DomainError::EmptyMessage.is_empty_input());
        assert!(!DomainError::InvalidLimit(0).is_empty_input());
    }
}

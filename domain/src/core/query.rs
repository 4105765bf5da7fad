//! Search text value object

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Free-text search input typed by a user (Value Object)
///
/// Guaranteed to contain at least one non-whitespace character. The original
/// text is kept verbatim because it doubles as the fallback search term when
/// interpretation yields no category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchText {
    content: String,
}

impl SearchText {
    /// Validate and wrap user input
    pub fn try_new(content: impl Into<String>) -> Result<Self, DomainError> {
        let content = content.into();
        if content.trim().is_empty() {
            Err(DomainError::EmptySearchText)
        } else {
            Ok(Self { content })
        }
    }

    /// Get the text exactly as typed
    pub fn as_str(&self) -> &str {
        &self.content
    }

    /// Consume and return the inner content
    pub fn into_inner(self) -> String {
        self.content
    }
}

impl std::fmt::Display for SearchText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl AsRef<str> for SearchText {
    fn as_ref(&self) -> &str {
        &self.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_text_keeps_input_verbatim() {
        let text = SearchText::try_new("  cafes near the harbour ").unwrap();
        assert_eq!(text.as_str(), "  cafes near the harbour ");
    }

    #[test]
    fn test_try_new_rejects_blank() {
        assert_eq!(SearchText::try_new(""), Err(DomainError::EmptySearchText));
        assert_eq!(SearchText::try_new(" \t\n"), Err(DomainError::EmptySearchText));
    }
}

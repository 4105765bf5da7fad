//! Search intent value object

use crate::search::filter::{FilterIssue, FilterSpec};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Structured interpretation of free-text search input (Value Object)
///
/// Produced by the query interpreter and consumed once by the search
/// orchestrator. Filter values stay loosely typed until
/// [`SearchIntent::filter_spec`] converts them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchIntent {
    raw_text: String,
    category: Option<String>,
    filters: BTreeMap<String, Value>,
}

impl SearchIntent {
    /// Create an intent. A blank category is normalized to `None`.
    pub fn new(
        raw_text: impl Into<String>,
        category: Option<String>,
        filters: BTreeMap<String, Value>,
    ) -> Self {
        let category = category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());

        Self {
            raw_text: raw_text.into(),
            category,
            filters,
        }
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn filters(&self) -> &BTreeMap<String, Value> {
        &self.filters
    }

    /// Term to send to the place search: the category when present,
    /// otherwise the raw text verbatim.
    pub fn search_term(&self) -> &str {
        self.category.as_deref().unwrap_or(&self.raw_text)
    }

    /// Convert the loosely-typed filters, see [`FilterSpec::from_filters`].
    pub fn filter_spec(&self) -> (FilterSpec, Vec<FilterIssue>) {
        FilterSpec::from_filters(&self.filters)
    }
}

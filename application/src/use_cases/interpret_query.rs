//! Interpret Query use case
//!
//! Converts free text into a [`SearchIntent`] by asking the interpretation
//! capability for a JSON reply and parsing it leniently.

use crate::ports::capability::CapabilityError;
use crate::ports::interpretation::InterpretationCapability;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};
use tripscout_domain::util::{extract_json_object, truncate_str};
use tripscout_domain::{DomainError, PromptTemplate, SearchIntent, SearchText};

/// Errors that can occur while interpreting a query
#[derive(Error, Debug)]
pub enum InterpretError {
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] DomainError),

    #[error("Interpretation failed: {0}")]
    CapabilityFailed(#[source] CapabilityError),

    #[error("Malformed interpretation reply: {reason}")]
    MalformedReply { reason: String, reply: String },
}

impl InterpretError {
    fn malformed(reason: impl Into<String>, reply: &str) -> Self {
        InterpretError::MalformedReply {
            reason: reason.into(),
            reply: reply.to_string(),
        }
    }
}

/// Interprets free-text requests into structured search intents
pub struct QueryInterpreter<I: InterpretationCapability + ?Sized> {
    capability: Arc<I>,
}

impl<I: InterpretationCapability + ?Sized> QueryInterpreter<I> {
    pub fn new(capability: Arc<I>) -> Self {
        Self { capability }
    }

    /// Interpret `raw_text`
    ///
    /// Blank text is rejected before the capability is called. The returned
    /// intent always carries `raw_text` unchanged.
    pub async fn interpret(&self, raw_text: &str) -> Result<SearchIntent, InterpretError> {
        let text = SearchText::try_new(raw_text)?;
        debug!("Interpreting query: {}", truncate_str(text.as_str(), 80));

        let prompt = PromptTemplate::interpretation(text.as_str());
        let reply = self
            .capability
            .ask(&prompt)
            .await
            .map_err(InterpretError::CapabilityFailed)?;

        let intent = parse_intent_reply(raw_text, &reply)?;
        info!(
            "Interpreted query as category {:?} with {} filter(s)",
            intent.category(),
            intent.filters().len()
        );
        Ok(intent)
    }
}

/// Parse an interpretation reply into a [`SearchIntent`]
///
/// The reply must contain a JSON object. `category` may be a string, null
/// or absent; `filters` may be an object, null or absent. Anything else is
/// malformed.
pub fn parse_intent_reply(raw_text: &str, reply: &str) -> Result<SearchIntent, InterpretError> {
    let json = extract_json_object(reply).ok_or_else(|| {
        warn!("Interpretation reply has no JSON object: {}", truncate_str(reply, 120));
        InterpretError::malformed("reply contains no JSON object", reply)
    })?;

    let value: Value = serde_json::from_str(json)
        .map_err(|e| InterpretError::malformed(format!("invalid JSON: {}", e), reply))?;
    let Value::Object(object) = value else {
        return Err(InterpretError::malformed("reply is not a JSON object", reply));
    };

    let category = match object.get("category") {
        None | Some(Value::Null) => None,
        Some(Value::String(category)) => Some(category.clone()),
        Some(other) => {
            return Err(InterpretError::malformed(
                format!("category must be a string, got {}", other),
                reply,
            ));
        }
    };

    let filters = match object.get("filters") {
        None | Some(Value::Null) => BTreeMap::new(),
        Some(Value::Object(filters)) => into_filter_map(filters),
        Some(other) => {
            return Err(InterpretError::malformed(
                format!("filters must be an object, got {}", other),
                reply,
            ));
        }
    };

    Ok(SearchIntent::new(raw_text, category, filters))
}

fn into_filter_map(filters: &Map<String, Value>) -> BTreeMap<String, Value> {
    filters
        .iter()
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

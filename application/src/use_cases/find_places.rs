//! Find Places use case
//!
//! Orchestrates the full search flow: interpret the text, search for the
//! resulting term, then filter the candidates.

use crate::config::SearchParams;
use crate::ports::capability::{CapabilityError, ServiceStage};
use crate::ports::interpretation::InterpretationCapability;
use crate::ports::place_search::PlaceSearchCapability;
use crate::ports::progress::{NoProgress, SearchProgress};
use crate::use_cases::interpret_query::{InterpretError, QueryInterpreter};
use crate::use_cases::search_places::{PlaceSearchClient, SearchClientError};
use crate::use_cases::shared::with_timeout;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};
use tripscout_domain::{FilterIssue, FilterSpec, PlaceCandidate, ResultFilter, SearchIntent};

/// Errors that can occur while finding places
///
/// The variants form a closed taxonomy; each carries a suggested status
/// code and a message safe to show to end users.
#[derive(Error, Debug)]
pub enum FindPlacesError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Could not understand the query: {0}")]
    InvalidQuery(String),

    #[error("External service failed during {stage}: {source}")]
    ExternalService {
        stage: ServiceStage,
        #[source]
        source: CapabilityError,
    },

    #[error("No places found for '{term}'")]
    PlaceNotFound { term: String },
}

impl FindPlacesError {
    /// Suggested HTTP-style status code for this failure
    pub fn status_hint(&self) -> u16 {
        match self {
            FindPlacesError::InvalidInput(_) => 400,
            FindPlacesError::InvalidQuery(_) => 422,
            FindPlacesError::PlaceNotFound { .. } => 404,
            FindPlacesError::ExternalService { source, .. } if source.is_rate_limited() => 429,
            FindPlacesError::ExternalService { .. } => 503,
        }
    }

    /// End-user message without internal detail
    pub fn user_message(&self) -> String {
        match self {
            FindPlacesError::InvalidInput(reason) => format!("Invalid request: {}", reason),
            FindPlacesError::InvalidQuery(_) => {
                "Sorry, that request could not be understood. Try rephrasing it.".to_string()
            }
            FindPlacesError::PlaceNotFound { term } => format!("No places found for '{}'.", term),
            FindPlacesError::ExternalService { source, .. } if source.is_rate_limited() => {
                "The service is busy right now. Please try again in a moment.".to_string()
            }
            FindPlacesError::ExternalService { stage, .. } => format!(
                "The {} service is unavailable. Please try again later.",
                stage
            ),
        }
    }

    fn from_interpret(error: InterpretError) -> Self {
        match error {
            InterpretError::InvalidInput(e) => FindPlacesError::InvalidInput(e.to_string()),
            InterpretError::CapabilityFailed(source) => FindPlacesError::ExternalService {
                stage: ServiceStage::Interpretation,
                source,
            },
            InterpretError::MalformedReply { reason, .. } => FindPlacesError::ExternalService {
                stage: ServiceStage::Interpretation,
                source: CapabilityError::InvalidResponse(reason),
            },
        }
    }

    fn from_search(error: SearchClientError) -> Self {
        match error {
            SearchClientError::InvalidInput(e) => FindPlacesError::InvalidInput(e.to_string()),
            SearchClientError::Unavailable(source) => FindPlacesError::ExternalService {
                stage: ServiceStage::Search,
                source,
            },
        }
    }
}

/// Output of a successful search
#[derive(Debug, Clone, Serialize)]
pub struct FindPlacesOutput {
    /// How the text was interpreted
    pub intent: SearchIntent,
    /// Constraints actually applied
    pub filter: FilterSpec,
    /// Interpreted filters that could not be applied
    pub dropped_filters: Vec<FilterIssue>,
    /// Candidates returned by the place search before filtering
    pub candidates_found: usize,
    /// Places satisfying every applied constraint, in search order
    pub places: Vec<PlaceCandidate>,
}

/// Use case for finding places from free text
pub struct FindPlacesUseCase<I, S>
where
    I: InterpretationCapability + ?Sized,
    S: PlaceSearchCapability + ?Sized,
{
    interpreter: QueryInterpreter<I>,
    search_client: PlaceSearchClient<S>,
    params: SearchParams,
}

impl<I, S> FindPlacesUseCase<I, S>
where
    I: InterpretationCapability + ?Sized,
    S: PlaceSearchCapability + ?Sized,
{
    pub fn new(interpretation: Arc<I>, place_search: Arc<S>) -> Self {
        Self {
            interpreter: QueryInterpreter::new(interpretation),
            search_client: PlaceSearchClient::new(place_search),
            params: SearchParams::default(),
        }
    }

    pub fn with_params(mut self, params: SearchParams) -> Self {
        self.params = params;
        self
    }

    pub fn params(&self) -> &SearchParams {
        &self.params
    }

    /// Find places matching `raw_text`
    pub async fn find(&self, raw_text: &str) -> Result<Vec<PlaceCandidate>, FindPlacesError> {
        Ok(self.execute(raw_text, &NoProgress).await?.places)
    }

    /// Execute the full flow with progress callbacks
    ///
    /// An interpretation without a category is `InvalidQuery` and is never
    /// searched. An empty candidate list from the search is `PlaceNotFound`;
    /// an empty list after filtering is a valid result.
    pub async fn execute(
        &self,
        raw_text: &str,
        progress: &dyn SearchProgress,
    ) -> Result<FindPlacesOutput, FindPlacesError> {
        if raw_text.trim().is_empty() {
            return Err(FindPlacesError::InvalidInput(
                "search text cannot be empty".to_string(),
            ));
        }
        if self.params.result_limit == 0 {
            return Err(FindPlacesError::InvalidInput(
                "result limit must be greater than zero".to_string(),
            ));
        }

        // Interpretation
        progress.on_stage_start(ServiceStage::Interpretation);
        let interpreted = with_timeout(self.params.call_timeout, self.interpreter.interpret(raw_text))
            .await
            .map_err(|source| FindPlacesError::ExternalService {
                stage: ServiceStage::Interpretation,
                source,
            })
            .and_then(|result| result.map_err(FindPlacesError::from_interpret));
        progress.on_stage_complete(ServiceStage::Interpretation, interpreted.is_ok());
        let intent = interpreted.inspect_err(|e| warn!("Interpretation failed: {}", e))?;

        if intent.category().is_none() {
            info!("No place category in '{}'", raw_text);
            return Err(FindPlacesError::InvalidQuery(
                "no place category could be identified".to_string(),
            ));
        }

        // Search
        let term = intent.search_term().to_string();
        progress.on_stage_start(ServiceStage::Search);
        let searched = with_timeout(
            self.params.call_timeout,
            self.search_client.search(&term, self.params.result_limit),
        )
        .await
        .map_err(|source| FindPlacesError::ExternalService {
            stage: ServiceStage::Search,
            source,
        })
        .and_then(|result| result.map_err(FindPlacesError::from_search));
        progress.on_stage_complete(ServiceStage::Search, searched.is_ok());
        let candidates = searched.inspect_err(|e| warn!("Place search failed: {}", e))?;

        if candidates.is_empty() {
            info!("No places found for '{}'", term);
            return Err(FindPlacesError::PlaceNotFound { term });
        }

        // Filtering
        let (filter, dropped_filters) = intent.filter_spec();
        for issue in &dropped_filters {
            warn!("Ignoring {}", issue);
        }
        let places = ResultFilter::apply(&candidates, &filter);
        progress.on_filtered(places.len(), candidates.len());
        info!(
            "Found {} place(s) for '{}' ({} before filtering)",
            places.len(),
            term,
            candidates.len()
        );

        Ok(FindPlacesOutput {
            intent,
            filter,
            dropped_filters,
            candidates_found: candidates.len(),
            places,
        })
    }
}

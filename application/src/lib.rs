//! Application layer for tripscout
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{DEFAULT_RESULT_LIMIT, SearchParams, SessionParams};
pub use ports::{
    capability::{CapabilityError, ServiceStage},
    clock::{Clock, ManualClock, SystemClock},
    conversation::ConversationCapability,
    interpretation::InterpretationCapability,
    place_search::PlaceSearchCapability,
    progress::{NoProgress, SearchProgress},
};
pub use use_cases::chat_session::{ChatError, ConversationSession, SessionSnapshot};
pub use use_cases::find_places::{FindPlacesError, FindPlacesOutput, FindPlacesUseCase};
pub use use_cases::interpret_query::{InterpretError, QueryInterpreter};
pub use use_cases::search_places::{PlaceSearchClient, SearchClientError};
pub use use_cases::session_registry::SessionRegistry;
pub use use_cases::sweep_sessions::SessionSweeper;

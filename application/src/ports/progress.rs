//! Progress notification port
//!
//! Defines the interface for reporting progress while a search runs.

use super::capability::ServiceStage;

/// Callback for progress updates during a place search
///
/// Implementations live in the presentation layer (spinner, plain log, ...).
pub trait SearchProgress: Send + Sync {
    /// Called when an external stage starts
    fn on_stage_start(&self, stage: ServiceStage);

    /// Called when an external stage finishes
    fn on_stage_complete(&self, stage: ServiceStage, success: bool);

    /// Called after filtering with the number of places kept
    fn on_filtered(&self, _kept: usize, _total: usize) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl SearchProgress for NoProgress {
    fn on_stage_start(&self, _stage: ServiceStage) {}
    fn on_stage_complete(&self, _stage: ServiceStage, _success: bool) {}
}

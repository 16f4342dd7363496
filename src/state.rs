use std::sync::Arc;

use log::{debug, warn};

use crate::data::error::LoadError;
use crate::data::loader::{load_sources, LoadReport, SourceDescriptor};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// State shared by every request handler.
///
/// Only the source list is shared; each request loads its own collection.
#[derive(Debug, Clone)]
pub struct AppState {
    pub sources: Arc<[SourceDescriptor]>,
}

impl AppState {
    pub fn new(sources: Vec<SourceDescriptor>) -> Self {
        Self {
            sources: sources.into(),
        }
    }

    /// Load the card collection from the configured sources.
    pub fn load_cards(&self) -> Result<LoadReport, LoadError> {
        let report = load_sources(&self.sources)?;
        if !report.warnings.is_empty() {
            warn!("{} card list cells fell back to defaults", report.warnings.len());
            for warning in &report.warnings {
                debug!("{warning}");
            }
        }
        Ok(report)
    }
}

//! Application state for the PPh21 Withholding Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::{ConfigLoader, ContributionParameters, RegulationMetadata};

/// Shared application state.
///
/// Holds the regulation configuration loaded at startup. It is read-only,
/// so handlers share it without locking.
#[derive(Clone)]
pub struct AppState {
    /// The loaded regulation configuration.
    config: Arc<ConfigLoader>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Regulation shown in the page header.
    pub fn regulation(&self) -> &RegulationMetadata {
        self.config.regulation()
    }

    /// Contribution parameters every calculation runs with.
    pub fn contributions(&self) -> &ContributionParameters {
        self.config.contributions()
    }
}

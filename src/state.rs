//! Shared application state for request handlers.

use std::sync::Arc;
use std::time::Duration;
use tera::Tera;

use crate::config::LIVENESS_FAILURE_DELAY;
use crate::probe::ProbeState;

/// Shared application state, cloneable across handlers via Arc-wrapped fields.
///
/// Holds the probe state (also owned by the startup task), the Tera engine for
/// the dashboard, and the latency injected into failing liveness checks.
#[derive(Clone)]
pub struct AppState {
    pub probes: Arc<ProbeState>,
    pub tera: Arc<Tera>,
    pub liveness_failure_delay: Duration,
}

impl AppState {
    /// Creates a new application state around existing probe state and templates.
    pub fn new(probes: Arc<ProbeState>, tera: Tera) -> Self {
        Self {
            probes,
            tera: Arc::new(tera),
            liveness_failure_delay: LIVENESS_FAILURE_DELAY,
        }
    }

    /// Replace the injected liveness failure latency.
    pub fn with_liveness_failure_delay(mut self, delay: Duration) -> Self {
        self.liveness_failure_delay = delay;
        self
    }
}

//! Simulated failure switches.

use axum::extract::State;
use tracing::instrument;

use crate::probe::Probe;
use crate::state::AppState;

/// `GET /toggle-liveness-failure`
#[instrument(name = "toggles::liveness", skip(state))]
pub async fn toggle_liveness_failure(State(state): State<AppState>) -> String {
    toggle(&state, Probe::Liveness)
}

/// `GET /toggle-readiness-failure`
#[instrument(name = "toggles::readiness", skip(state))]
pub async fn toggle_readiness_failure(State(state): State<AppState>) -> String {
    toggle(&state, Probe::Readiness)
}

fn toggle(state: &AppState, probe: Probe) -> String {
    let toggled = state.probes.toggles().toggle(probe);
    tracing::info!(probe = %probe, state = %toggled, "Simulated failure toggled");
    toggled.message()
}
